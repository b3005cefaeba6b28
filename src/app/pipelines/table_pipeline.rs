use crate::adapters::source::fetch_with_policy;
use crate::core::{ConfigProvider, Pipeline, RecordSource, Storage, TransformResult, WorkRecord};
use crate::domain::services::aggregate;
use crate::render::html_table::{render_html_report, HtmlReportOptions};
use crate::utils::error::Result;
use std::path::Path;

/// 依員工彙總工時並輸出 HTML 表格
pub struct TablePipeline<S: Storage, C: ConfigProvider, R: RecordSource> {
    storage: S,
    config: C,
    source: R,
}

impl<S: Storage, C: ConfigProvider, R: RecordSource> TablePipeline<S, C, R> {
    pub fn new(storage: S, config: C, source: R) -> Self {
        Self {
            storage,
            config,
            source,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, R: RecordSource> Pipeline for TablePipeline<S, C, R> {
    async fn extract(&self) -> Result<Vec<WorkRecord>> {
        tracing::info!("🚀 Fetching employee data from {}", self.source.describe());
        fetch_with_policy(&self.source, self.config.failure_policy()).await
    }

    async fn transform(&self, data: Vec<WorkRecord>) -> Result<TransformResult> {
        let threshold = self.config.low_hours_threshold();
        let employees = aggregate(&data);
        tracing::info!("Processed {} unique employees.", employees.len());

        let low_hours: Vec<_> = employees
            .iter()
            .filter(|e| e.is_low_hours(threshold))
            .cloned()
            .collect();
        for employee in &low_hours {
            tracing::warn!("- {} has low hours: {:.1}", employee.name, employee.total_hours);
        }

        let options = HtmlReportOptions::new(self.config.title(), threshold);
        let html = render_html_report(&employees, &options);

        Ok(TransformResult {
            file_name: self.config.output_file_name().to_string(),
            content: html.into_bytes(),
            record_count: data.len(),
            low_hours,
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
