use crate::adapters::source::fetch_with_policy;
use crate::core::{ConfigProvider, Pipeline, RecordSource, Storage, TransformResult, WorkRecord};
use crate::render::pie_chart::{render_pie_chart, ChartOptions};
use crate::utils::error::Result;
use std::path::Path;

/// 取得工時紀錄並輸出圓餅圖；每筆紀錄一片，不做彙總
pub struct ChartPipeline<S: Storage, C: ConfigProvider, R: RecordSource> {
    storage: S,
    config: C,
    source: R,
}

impl<S: Storage, C: ConfigProvider, R: RecordSource> ChartPipeline<S, C, R> {
    pub fn new(storage: S, config: C, source: R) -> Self {
        Self {
            storage,
            config,
            source,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, R: RecordSource> Pipeline for ChartPipeline<S, C, R> {
    async fn extract(&self) -> Result<Vec<WorkRecord>> {
        tracing::info!("🚀 Fetching employee data from {}", self.source.describe());
        fetch_with_policy(&self.source, self.config.failure_policy()).await
    }

    async fn transform(&self, data: Vec<WorkRecord>) -> Result<TransformResult> {
        let options = ChartOptions {
            title: self.config.title().to_string(),
        };
        let content = render_pie_chart(&data, &options)?;

        tracing::debug!("Rendered chart PNG ({} bytes)", content.len());

        Ok(TransformResult {
            file_name: self.config.output_file_name().to_string(),
            content,
            record_count: data.len(),
            low_hours: Vec::new(),
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        self.storage
            .write_file(&result.file_name, &result.content)
            .await?;

        let output_path = Path::new(self.config.output_path()).join(&result.file_name);
        Ok(output_path.display().to_string())
    }
}
