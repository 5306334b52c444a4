mod canvas;
mod color;
pub(crate) mod hud;
pub(crate) mod terminal;

pub use canvas::{Canvas, Cell, STAGE_SIZE};
pub use color::{Color, InvalidColor, hsl_to_rgb};
