//! Phase-portrait rendering.
//!
//! Every orbit of an ensemble is overlaid on one shared figure as small
//! filled markers, one palette color per orbit in draw order. Output is
//! SVG via plotters; text is emitted as SVG `<text>` so no font files are
//! read at render time.

use plotters::prelude::{ChartBuilder, Circle, IntoDrawingArea, RGBColor, SVGBackend, WHITE};
use plotters::style::Color as _;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::config::{Projection, TwistConfig};
use crate::error::{TwistError, TwistResult};
use crate::twist::orbit::Orbit;

/// Relative padding added around the fitted data range.
pub const BOUNDS_MARGIN: f64 = 0.05;

/// RGB color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Categorical palette, cycled per orbit.
    pub const PALETTE: [Self; 10] = [
        Self::rgb(0x1f, 0x77, 0xb4),
        Self::rgb(0xff, 0x7f, 0x0e),
        Self::rgb(0x2c, 0xa0, 0x2c),
        Self::rgb(0xd6, 0x27, 0x28),
        Self::rgb(0x94, 0x67, 0xbd),
        Self::rgb(0x8c, 0x56, 0x4b),
        Self::rgb(0xe3, 0x77, 0xc2),
        Self::rgb(0x7f, 0x7f, 0x7f),
        Self::rgb(0xbc, 0xbd, 0x22),
        Self::rgb(0x17, 0xbe, 0xcf),
    ];

    /// Palette color for orbit `index`.
    #[must_use]
    pub const fn cycle(index: usize) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }

    /// Lowercase `#rrggbb` form, as it appears in SVG output.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    const fn to_plotters(self) -> RGBColor {
        RGBColor(self.r, self.g, self.b)
    }
}

/// Axis ranges of the figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for PlotBounds {
    fn default() -> Self {
        Self {
            x_min: -1.0,
            x_max: 1.0,
            y_min: -1.0,
            y_max: 1.0,
        }
    }
}

impl PlotBounds {
    /// Fit bounds around `points`, padding each axis by `margin` of its span.
    ///
    /// No points gives the unit square. A zero span on one axis is widened
    /// to ±1 around its value.
    #[must_use]
    pub fn fit<I>(points: I, margin: f64) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut seen = false;
        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for (x, y) in points {
            seen = true;
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        if !seen {
            return Self::default();
        }
        let (x_min, x_max) = pad(x_min, x_max, margin);
        let (y_min, y_max) = pad(y_min, y_max, margin);
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// True if `(x, y)` lies inside the bounds.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

fn pad(lo: f64, hi: f64, margin: f64) -> (f64, f64) {
    let span = hi - lo;
    if span > 0.0 {
        (lo - span * margin, hi + span * margin)
    } else {
        (lo - 1.0, hi + 1.0)
    }
}

/// Everything the renderer needs besides the orbit data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    pub marker_size: u32,
    pub projection: Projection,
}

impl Figure {
    /// Figure settings from an experiment configuration.
    #[must_use]
    pub fn from_config(config: &TwistConfig) -> Self {
        Self {
            title: config.title(),
            x_label: config.plot.x_label.clone(),
            y_label: config.plot.y_label.clone(),
            width: config.plot.width,
            height: config.plot.height,
            marker_size: config.plot.marker_size,
            projection: config.plot.projection,
        }
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::from_config(&TwistConfig::default())
    }
}

/// The (horizontal, vertical) sequence plotted for one orbit.
#[must_use]
pub fn project(orbit: &Orbit, projection: Projection) -> Vec<(f64, f64)> {
    match projection {
        Projection::Cartesian => orbit.points.iter().map(|p| (p.x, p.y)).collect(),
        Projection::Phase => orbit
            .points
            .iter()
            .map(|p| (p.action, p.signed_angle))
            .collect(),
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> TwistError {
    TwistError::render(e.to_string())
}

/// Render all orbits onto one SVG document.
///
/// # Errors
///
/// Returns [`TwistError::Render`] if plotters fails to lay out or draw.
pub fn render_svg(figure: &Figure, orbits: &[Orbit]) -> TwistResult<String> {
    let series: Vec<Vec<(f64, f64)>> = orbits
        .iter()
        .map(|o| project(o, figure.projection))
        .collect();
    let bounds = PlotBounds::fit(series.iter().flatten().copied(), BOUNDS_MARGIN);
    let marker = i32::try_from(figure.marker_size).unwrap_or(1);

    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (figure.width, figure.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .caption(figure.title.as_str(), ("sans-serif", 28))
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(bounds.x_min..bounds.x_max, bounds.y_min..bounds.y_max)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(figure.x_label.as_str())
            .y_desc(figure.y_label.as_str())
            .draw()
            .map_err(render_err)?;

        for (index, points) in series.iter().enumerate() {
            let color = Color::cycle(index).to_plotters();
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&p| Circle::new(p, marker, color.filled())),
                )
                .map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

/// Render and write the SVG to `path`.
///
/// # Errors
///
/// Returns a render error or the I/O error from writing the file.
pub fn write_svg<P: AsRef<Path>>(figure: &Figure, orbits: &[Orbit], path: P) -> TwistResult<()> {
    let svg = render_svg(figure, orbits)?;
    std::fs::write(path.as_ref(), svg)?;
    info!(path = %path.as_ref().display(), orbits = orbits.len(), "figure written");
    Ok(())
}
