pub mod chart_pipeline;
pub mod table_pipeline;
