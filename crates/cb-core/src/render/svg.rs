//! Standalone SVG line chart.
//!
//! The document is assembled with `format!` into a single string; no
//! external assets or scripts.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use cb_common::{Error, Result};
use tracing::info;

use super::{Chart, RenderSink};

const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 70.0;
const TICKS: usize = 5;
const MIN_SIDE: u32 = 100;

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn tick_label(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e4).contains(&magnitude) {
        format!("{value:.4}")
    } else {
        format!("{value:.2e}")
    }
}

/// Render `chart` as an SVG document `width` x `height` pixels.
pub fn render_svg(chart: &Chart<'_>, width: u32, height: u32) -> Result<String> {
    chart.validate()?;
    if width < MIN_SIDE || height < MIN_SIDE {
        return Err(Error::Render(format!(
            "SVG size {width}x{height} is below the {MIN_SIDE}px minimum"
        )));
    }

    let (w, h) = (f64::from(width), f64::from(height));
    let plot_w = w - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = h - MARGIN_TOP - MARGIN_BOTTOM;
    let (x_lo, x_hi) = chart.x_range();
    let (y_lo, y_hi) = chart.y_range();
    let px = |x: f64| MARGIN_LEFT + (x - x_lo) / (x_hi - x_lo) * plot_w;
    let py = |y: f64| MARGIN_TOP + plot_h - (y - y_lo) / (y_hi - y_lo) * plot_h;

    let mut grid = String::new();
    let mut ticks = String::new();
    for i in 0..=TICKS {
        let f = i as f64 / TICKS as f64;
        let xv = x_lo + f * (x_hi - x_lo);
        let yv = y_lo + f * (y_hi - y_lo);
        let (gx, gy) = (px(xv), py(yv));
        if chart.grid {
            let _ = writeln!(
                grid,
                r##"<line x1="{gx:.2}" y1="{top:.2}" x2="{gx:.2}" y2="{bottom:.2}" stroke="#dddddd" stroke-width="1"/>"##,
                top = MARGIN_TOP,
                bottom = MARGIN_TOP + plot_h,
            );
            let _ = writeln!(
                grid,
                r##"<line x1="{left:.2}" y1="{gy:.2}" x2="{right:.2}" y2="{gy:.2}" stroke="#dddddd" stroke-width="1"/>"##,
                left = MARGIN_LEFT,
                right = MARGIN_LEFT + plot_w,
            );
        }
        let _ = writeln!(
            ticks,
            r#"<text x="{gx:.2}" y="{ty:.2}" text-anchor="middle" font-size="12">{label}</text>"#,
            ty = MARGIN_TOP + plot_h + 18.0,
            label = tick_label(xv),
        );
        let _ = writeln!(
            ticks,
            r#"<text x="{tx:.2}" y="{gy:.2}" text-anchor="end" dominant-baseline="middle" font-size="12">{label}</text>"#,
            tx = MARGIN_LEFT - 6.0,
            label = tick_label(yv),
        );
    }

    let points = chart
        .x
        .iter()
        .zip(chart.y)
        .map(|(&x, &y)| format!("{:.2},{:.2}", px(x), py(y)))
        .collect::<Vec<_>>()
        .join(" ");

    let legend_x = MARGIN_LEFT + plot_w - 130.0;
    let legend_y = MARGIN_TOP + 12.0;
    let color = xml_escape(chart.color);

    Ok(format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif">
<rect width="100%" height="100%" fill="white"/>
<text x="{title_x:.2}" y="32" text-anchor="middle" font-size="18">{title}</text>
<g class="grid">
{grid}</g>
<rect x="{MARGIN_LEFT:.2}" y="{MARGIN_TOP:.2}" width="{plot_w:.2}" height="{plot_h:.2}" fill="none" stroke="#333333" stroke-width="1"/>
<g class="ticks">
{ticks}</g>
<polyline class="series" fill="none" stroke="{color}" stroke-width="2" points="{points}"/>
<text x="{title_x:.2}" y="{x_label_y:.2}" text-anchor="middle" font-size="14">{x_label}</text>
<text x="20" y="{y_label_y:.2}" text-anchor="middle" font-size="14" transform="rotate(-90 20 {y_label_y:.2})">{y_label}</text>
<g class="legend">
<rect x="{legend_x:.2}" y="{legend_y:.2}" width="120" height="28" fill="white" stroke="#999999"/>
<line x1="{lx1:.2}" y1="{ly:.2}" x2="{lx2:.2}" y2="{ly:.2}" stroke="{color}" stroke-width="2"/>
<text x="{ltx:.2}" y="{ly:.2}" dominant-baseline="middle" font-size="12">{legend}</text>
</g>
</svg>
"##,
        title_x = MARGIN_LEFT + plot_w / 2.0,
        title = xml_escape(chart.title),
        x_label_y = h - 20.0,
        x_label = xml_escape(chart.x_label),
        y_label_y = MARGIN_TOP + plot_h / 2.0,
        y_label = xml_escape(chart.y_label),
        lx1 = legend_x + 10.0,
        lx2 = legend_x + 40.0,
        ly = legend_y + 14.0,
        ltx = legend_x + 48.0,
        legend = xml_escape(chart.legend),
    ))
}

/// Writes charts to an SVG file, replacing any existing file.
#[derive(Debug, Clone)]
pub struct SvgSink {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl SvgSink {
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

impl RenderSink for SvgSink {
    fn render(&mut self, chart: &Chart<'_>) -> Result<()> {
        let document = render_svg(chart, self.width, self.height)?;
        std::fs::write(&self.path, document)?;
        info!(path = %self.path.display(), width = self.width, height = self.height, "chart written");
        Ok(())
    }
}
