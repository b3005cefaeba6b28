pub mod engine;

pub use crate::app::pipelines::chart_pipeline::ChartPipeline;
pub use crate::app::pipelines::table_pipeline::TablePipeline;
pub use crate::domain::model::{AggregatedEmployee, ChartSlice, TransformResult, WorkRecord};
pub use crate::domain::ports::{ConfigProvider, FailurePolicy, Pipeline, RecordSource, Storage};
pub use crate::utils::error::Result;
