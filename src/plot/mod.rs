//! Map rendering back-ends.
//!
//! The extractor only prepares a [`MapFrame`]; how it is drawn is up to the
//! [`MapRenderer`] passed in:
//!
//! - `ascii`: fixed-size character grid for the terminal
//! - `svg`: Plotters chart written to an SVG file

use crate::domain::MapFrame;
use crate::error::AppError;

pub mod ascii;
pub mod svg;

pub use ascii::AsciiMapRenderer;
pub use svg::SvgMapRenderer;

/// Draws one state map: a base map of the frame's bounds with the points on top.
pub trait MapRenderer {
    fn render(&mut self, frame: &MapFrame) -> Result<(), AppError>;
}
