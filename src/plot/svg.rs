//! Plotters-powered incident map written as SVG.
//!
//! The base map is a longitude/latitude graticule (the chart mesh, labelled
//! in degrees) over a slightly padded view of the frame's bounding box; each
//! incident is a small filled circle.

use std::path::{Path, PathBuf};

use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::domain::MapFrame;
use crate::error::AppError;
use crate::plot::MapRenderer;

/// Fraction of each axis span added around the incidents.
const VIEW_PADDING: f64 = 0.05;

pub struct SvgMapRenderer {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl SvgMapRenderer {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MapRenderer for SvgMapRenderer {
    fn render(&mut self, frame: &MapFrame) -> Result<(), AppError> {
        let path = self.path.as_path();
        let fail = |e: DrawingAreaErrorKind<std::io::Error>| {
            AppError::output(format!("Failed to draw map '{}': {e}", path.display()))
        };

        let root = SVGBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(fail)?;

        let view = frame.bounds.padded(VIEW_PADDING);
        let mut chart = ChartBuilder::on(&root)
            .caption(&frame.title, ("sans-serif", 18))
            .margin(10)
            .set_label_area_size(LabelAreaPosition::Left, 50)
            .set_label_area_size(LabelAreaPosition::Bottom, 35)
            .build_cartesian_2d(view.lon_min..view.lon_max, view.lat_min..view.lat_max)
            .map_err(fail)?;

        let grid_minor = RGBColor(235, 235, 235);
        let grid_major = RGBColor(200, 200, 200);
        chart
            .configure_mesh()
            .x_desc("longitude")
            .y_desc("latitude")
            .x_labels(8)
            .y_labels(8)
            .x_label_formatter(&|v| format!("{v:.1}°"))
            .y_label_formatter(&|v| format!("{v:.1}°"))
            .light_line_style(&grid_minor)
            .bold_line_style(&grid_major)
            .draw()
            .map_err(fail)?;

        let point_color = RGBColor(200, 30, 30);
        chart
            .draw_series(
                frame
                    .points
                    .iter()
                    .map(|&(lon, lat)| Circle::new((lon, lat), 2, point_color.filled())),
            )
            .map_err(fail)?;

        root.present().map_err(fail)?;
        Ok(())
    }
}
