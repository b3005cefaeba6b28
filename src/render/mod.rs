pub mod html_table;
pub mod pie_chart;

pub use html_table::{render_html_report, HtmlReportOptions};
pub use pie_chart::{render_pie_chart, ChartOptions};
