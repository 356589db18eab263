//! Integer and floating-point geometry primitives shared by every generation stage.

pub mod point;
pub mod rect;

pub use point::{Point, Pos};
pub use rect::Rect;
