pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{Cli, Command};

pub use adapters::{DataSource, LocalStorage};
pub use config::{ReportKind, ReportSettings};
pub use crate::core::{engine::ReportEngine, ChartPipeline, TablePipeline};
pub use utils::error::{ReportError, Result};
