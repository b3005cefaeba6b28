//! HTML table report.
//!
//! Produces a self-contained document (inline CSS, no external assets) listing
//! aggregated hours per employee. Rows under the threshold get the
//! `low-hours` class.

use crate::domain::model::AggregatedEmployee;
use std::fmt::Write as _;

pub const DEFAULT_LOW_HOURS_THRESHOLD: f64 = 100.0;
pub const DEFAULT_REPORT_TITLE: &str = "Employees Sorted by Total Hours Worked (Descending)";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone)]
pub struct HtmlReportOptions {
    pub title: String,
    pub low_hours_threshold: f64,
    /// 已格式化的產生時間
    pub generated_at: String,
}

impl HtmlReportOptions {
    pub fn new(title: impl Into<String>, low_hours_threshold: f64) -> Self {
        Self {
            title: title.into(),
            low_hours_threshold,
            generated_at: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

impl Default for HtmlReportOptions {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_TITLE, DEFAULT_LOW_HOURS_THRESHOLD)
    }
}

pub fn render_html_report(aggregated: &[AggregatedEmployee], options: &HtmlReportOptions) -> String {
    let mut out = String::new();
    write_head(&mut out);
    write_body(&mut out, aggregated, options);
    out
}

fn write_head(out: &mut String) {
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html lang=\"en\">");
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, "    <meta charset=\"UTF-8\">");
    let _ = writeln!(out, "    <title>Employee Work Hours Report</title>");
    let _ = writeln!(out, "    <style>{}</style>", inline_css());
    let _ = writeln!(out, "</head>");
}

fn write_body(out: &mut String, aggregated: &[AggregatedEmployee], options: &HtmlReportOptions) {
    let _ = writeln!(out, "<body>");
    let _ = writeln!(out, "    <h1>{}</h1>", html_escape(&options.title));
    let _ = writeln!(out, "    <p>Generated on {}</p>", html_escape(&options.generated_at));
    let _ = writeln!(out, "    <table>");
    let _ = writeln!(out, "        <thead>");
    let _ = writeln!(out, "            <tr><th>Employee Name</th><th>Total Hours</th></tr>");
    let _ = writeln!(out, "        </thead>");
    let _ = writeln!(out, "        <tbody>");
    for employee in aggregated {
        write_row(out, employee, options.low_hours_threshold);
    }
    let _ = writeln!(out, "        </tbody>");
    let _ = writeln!(out, "    </table>");
    let _ = writeln!(
        out,
        "    <footer><small>Rows in yellow indicate &lt; {} hours.</small></footer>",
        options.low_hours_threshold
    );
    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
}

fn write_row(out: &mut String, employee: &AggregatedEmployee, threshold: f64) {
    let row_class = if employee.is_low_hours(threshold) {
        " class=\"low-hours\""
    } else {
        ""
    };
    let _ = writeln!(
        out,
        "            <tr{}><td>{}</td><td>{:.1}</td></tr>",
        row_class,
        html_escape(&employee.name),
        employee.total_hours
    );
}

fn inline_css() -> &'static str {
    r#"
        body { font-family: Arial, Helvetica, sans-serif; }
        table { border-collapse: collapse; width: 50%; margin: 20px 0; }
        th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
        th { background-color: #f2f2f2; }
        .low-hours { background-color: #fff3a0; }
    "#
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
