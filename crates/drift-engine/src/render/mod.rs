pub mod color;
pub mod display_list;

pub use color::Color;
pub use display_list::{Blend, ColorStop, DisplayList, DrawCommand, LineCap, Paint, Stroke};
