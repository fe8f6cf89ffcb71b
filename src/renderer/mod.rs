//! Software rendering module
//!
//! Everything is drawn into an RGBA `Canvas` the size of the virtual
//! screen; the host composites the finished frame into its display.

pub mod canvas;
pub mod font;
pub mod scenes;

pub use canvas::{Canvas, Pixel};
