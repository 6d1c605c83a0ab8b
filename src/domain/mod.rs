pub mod cell;
pub mod color;
pub mod direction;
pub mod glyph;
pub mod layout;
pub mod placement;
pub mod snake;
