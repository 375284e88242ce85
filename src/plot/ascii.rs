//! ASCII plotting of incident locations for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - a single incident in a cell: `+`
//! - several incidents sharing a cell: `*`

use std::io::Write;

use crate::domain::{BoundingBox, MapFrame};
use crate::error::AppError;
use crate::plot::MapRenderer;

pub struct AsciiMapRenderer<W: Write> {
    out: W,
    width: usize,
    height: usize,
}

impl<W: Write> AsciiMapRenderer<W> {
    pub fn new(out: W, width: usize, height: usize) -> Self {
        Self { out, width, height }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MapRenderer for AsciiMapRenderer<W> {
    fn render(&mut self, frame: &MapFrame) -> Result<(), AppError> {
        let text = render_ascii_map(frame, self.width, self.height);
        self.out
            .write_all(text.as_bytes())
            .map_err(|e| AppError::output(format!("Failed to write map: {e}")))
    }
}

/// Render a frame to a string: a range header followed by the grid rows.
pub fn render_ascii_map(frame: &MapFrame, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);
    // Zero-span axes (a single point) would divide by zero below.
    let b = frame.bounds.padded(0.0);

    let mut hits = vec![vec![0u32; width]; height];
    for &(lon, lat) in &frame.points {
        let x = map_x(lon, &b, width);
        let y = map_y(lat, &b, height);
        hits[y][x] += 1;
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Map: {} | lon=[{:.3}, {:.3}] | lat=[{:.3}, {:.3}]\n",
        frame.title, b.lon_min, b.lon_max, b.lat_min, b.lat_max
    ));

    for row in hits {
        let line: String = row
            .into_iter()
            .map(|n| match n {
                0 => ' ',
                1 => '+',
                _ => '*',
            })
            .collect();
        out.push_str(&line);
        out.push('\n');
    }

    out
}

fn map_x(lon: f64, b: &BoundingBox, width: usize) -> usize {
    let u = ((lon - b.lon_min) / (b.lon_max - b.lon_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(lat: f64, b: &BoundingBox, height: usize) -> usize {
    let u = ((lat - b.lat_min) / (b.lat_max - b.lat_min)).clamp(0.0, 1.0);
    // north is row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}
