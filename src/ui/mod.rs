pub mod gamepad;
pub mod input;
pub mod paint;
pub mod prompt;
pub mod renderer;
