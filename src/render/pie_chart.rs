//! Pie chart rendering.
//!
//! The chart is drawn into an [`SvgCanvas`] and then rasterised with resvg into
//! an anti-aliased RGBA pixmap, which is encoded as PNG.

use crate::domain::model::WorkRecord;
use crate::domain::services::{compute_slices, percentage, total_hours, PALETTE_SIZE};
use crate::utils::error::{ReportError, Result};
use std::fmt::Write as _;

pub const CHART_WIDTH: u32 = 800;
pub const CHART_HEIGHT: u32 = 600;
pub const DEFAULT_CHART_TITLE: &str = "Employee Work Time Distribution";

/// red, blue, green, orange, purple, teal
pub const PALETTE: [&str; PALETTE_SIZE] = [
    "#ff0000", "#0000ff", "#008000", "#ffa500", "#800080", "#008080",
];

const PIE_X: f64 = 50.0;
const PIE_Y: f64 = 50.0;
const PIE_SIZE: f64 = 400.0;
const LEGEND_X: f64 = 500.0;
const LEGEND_TOP: f64 = 50.0;
const LEGEND_ROW_HEIGHT: f64 = 25.0;
const SWATCH_SIZE: f64 = 20.0;
const LABEL_X: f64 = 530.0;
const LABEL_FONT_SIZE: f64 = 10.0;
const TITLE_X: f64 = 200.0;
const TITLE_Y: f64 = 10.0;
const TITLE_FONT_SIZE: f64 = 16.0;
const FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";

#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub title: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_CHART_TITLE.to_string(),
        }
    }
}

/// 累積 SVG 繪圖指令的畫布
pub struct SvgCanvas {
    width: u32,
    height: u32,
    body: String,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    pub fn clear(&mut self, fill: &str) {
        let _ = writeln!(
            self.body,
            "  <rect x='0' y='0' width='{}' height='{}' fill='{}'/>",
            self.width, self.height, fill
        );
    }

    /// 畫一片扇形，角度以度為單位、順時針
    pub fn pie_slice(&mut self, x: f64, y: f64, size: f64, start: f64, sweep: f64, fill: &str) {
        let r = size / 2.0;
        let (cx, cy) = (x + r, y + r);

        if sweep <= 0.0 {
            return;
        }

        if sweep >= 360.0 - 1e-9 {
            let _ = writeln!(
                self.body,
                "  <circle cx='{cx:.3}' cy='{cy:.3}' r='{r:.3}' fill='{fill}' stroke='#000000' stroke-width='1'/>"
            );
            return;
        }

        let (x0, y0) = point_on_circle(cx, cy, r, start);
        let (x1, y1) = point_on_circle(cx, cy, r, start + sweep);
        let large_arc = if sweep > 180.0 { 1 } else { 0 };

        let _ = writeln!(
            self.body,
            "  <path d='M {cx:.3} {cy:.3} L {x0:.3} {y0:.3} A {r:.3} {r:.3} 0 {large_arc} 1 {x1:.3} {y1:.3} Z' fill='{fill}' stroke='#000000' stroke-width='1'/>"
        );
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str) {
        let _ = writeln!(
            self.body,
            "  <rect x='{x}' y='{y}' width='{width}' height='{height}' fill='{fill}'/>"
        );
    }

    /// `top` 是文字框上緣，轉換成 SVG 的基線座標
    pub fn text(&mut self, x: f64, top: f64, font_size: f64, bold: bool, content: &str) {
        let weight = if bold { "bold" } else { "normal" };
        let _ = writeln!(
            self.body,
            "  <text x='{x}' y='{baseline}' fill='#000000' font-family='{FONT_FAMILY}' font-size='{font_size}' font-weight='{weight}'>{text}</text>",
            baseline = top + font_size,
            text = xml_escape(content),
        );
    }

    pub fn finish(self) -> String {
        format!(
            "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}'>\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body,
        )
    }
}

fn point_on_circle(cx: f64, cy: f64, r: f64, degrees: f64) -> (f64, f64) {
    let radians = degrees.to_radians();
    (cx + r * radians.cos(), cy + r * radians.sin())
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn legend_label(record: &WorkRecord, total: f64) -> String {
    format!(
        "{}: {:.1}%",
        record.employee_name,
        percentage(record.hours_worked, total)
    )
}

/// 產生圖表的 SVG 文件（尚未點陣化）
pub fn build_chart_svg(records: &[WorkRecord], options: &ChartOptions) -> Result<String> {
    let slices = compute_slices(records)?;
    let total = total_hours(records);

    let mut canvas = SvgCanvas::new(CHART_WIDTH, CHART_HEIGHT);
    canvas.clear("#ffffff");

    for slice in &slices {
        canvas.pie_slice(
            PIE_X,
            PIE_Y,
            PIE_SIZE,
            slice.start_angle,
            slice.sweep_angle,
            PALETTE[slice.color_index],
        );
    }

    let mut legend_y = LEGEND_TOP;
    for (record, slice) in records.iter().zip(&slices) {
        canvas.rect(LEGEND_X, legend_y, SWATCH_SIZE, SWATCH_SIZE, PALETTE[slice.color_index]);
        canvas.text(LABEL_X, legend_y, LABEL_FONT_SIZE, false, &legend_label(record, total));
        legend_y += LEGEND_ROW_HEIGHT;
    }

    canvas.text(TITLE_X, TITLE_Y, TITLE_FONT_SIZE, true, &options.title);

    tracing::debug!("Built chart with {} slices", slices.len());
    Ok(canvas.finish())
}

pub fn render_pie_chart(records: &[WorkRecord], options: &ChartOptions) -> Result<Vec<u8>> {
    let svg = build_chart_svg(records, options)?;
    svg_to_png(&svg, CHART_WIDTH, CHART_HEIGHT)
}

fn svg_to_png(svg: &str, width: u32, height: u32) -> Result<Vec<u8>> {
    use png::{BitDepth, ColorType, Encoder};
    use resvg::render;
    use tiny_skia::{Pixmap, Transform};
    use usvg::{Options, Tree};

    let mut options = Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = Tree::from_data(svg.as_bytes(), &options).map_err(|err| render_error(format!("SVG parse failed: {err}")))?;

    let mut pixmap =
        Pixmap::new(width, height).ok_or_else(|| render_error("Pixmap allocation failed".to_string()))?;
    render(&tree, Transform::default(), &mut pixmap.as_mut());

    let mut out = Vec::new();
    {
        let mut encoder = Encoder::new(&mut out, width, height);
        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(BitDepth::Eight);
        encoder
            .write_header()
            .map_err(|err| render_error(err.to_string()))?
            .write_image_data(pixmap.data())
            .map_err(|err| render_error(err.to_string()))?;
    }

    Ok(out)
}

fn render_error(message: String) -> ReportError {
    ReportError::RenderError { message }
}
