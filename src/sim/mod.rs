pub mod event;
pub mod game_loop;
pub mod save;
pub mod scheduler;
pub mod step;
pub mod world;
