use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting report generation...");

        // Extract
        let records = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", records.len());

        // Transform
        let result = self.pipeline.transform(records).await?;
        tracing::info!(
            "Rendered {} ({} bytes) from {} records",
            result.file_name,
            result.content.len(),
            result.record_count
        );
        if !result.low_hours.is_empty() {
            tracing::info!("{} employees are under the low-hours threshold", result.low_hours.len());
        }

        // Load
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {} in {:?}", output_path, started.elapsed());

        Ok(output_path)
    }
}
