#[cfg(feature = "cli")]
pub mod cli;
pub mod settings;
pub mod toml_config;

pub use settings::{ReportKind, ReportSettings, SourceSettings};
pub use toml_config::ReportConfig;
