use crate::adapters::source::{DataSource, HttpRecordSource, InlineRecordSource, SampleRecordSource, DEFAULT_TIMEOUT_SECONDS};
use crate::config::toml_config::ReportConfig;
use crate::core::{ConfigProvider, FailurePolicy};
use crate::render::html_table::{DEFAULT_LOW_HOURS_THRESHOLD, DEFAULT_REPORT_TITLE};
use crate::render::pie_chart::DEFAULT_CHART_TITLE;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{self, Validate};
use std::time::Duration;

pub const DEFAULT_TIME_ENTRIES_ENDPOINT: &str =
    "https://rc-vault-fap-live-1.azurewebsites.net/api/gettimeentries";
pub const CHART_FILE_NAME: &str = "EmployeePieChart.png";
pub const TABLE_FILE_NAME: &str = "employee_work_report.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Chart,
    Table,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceSettings {
    Http { endpoint: String },
    /// `path` 為 None 時使用內嵌資料
    Inline { path: Option<String> },
    Sample,
}

/// CLI、TOML 與預設值合併後的最終設定
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub kind: ReportKind,
    pub source: SourceSettings,
    /// 與來源分開保存，切換成 HTTP 來源時才使用
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    pub output_path: String,
    pub output_file_name: String,
    pub failure_policy: FailurePolicy,
    pub low_hours_threshold: f64,
    pub title: String,
}

impl ReportSettings {
    pub fn chart_defaults() -> Self {
        Self {
            kind: ReportKind::Chart,
            source: SourceSettings::Http {
                endpoint: DEFAULT_TIME_ENTRIES_ENDPOINT.to_string(),
            },
            api_key: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            output_path: ".".to_string(),
            output_file_name: CHART_FILE_NAME.to_string(),
            failure_policy: FailurePolicy::Fallback,
            low_hours_threshold: DEFAULT_LOW_HOURS_THRESHOLD,
            title: DEFAULT_CHART_TITLE.to_string(),
        }
    }

    pub fn table_defaults() -> Self {
        Self {
            kind: ReportKind::Table,
            source: SourceSettings::Inline { path: None },
            api_key: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            output_path: ".".to_string(),
            output_file_name: TABLE_FILE_NAME.to_string(),
            failure_policy: FailurePolicy::Abort,
            low_hours_threshold: DEFAULT_LOW_HOURS_THRESHOLD,
            title: DEFAULT_REPORT_TITLE.to_string(),
        }
    }

    pub fn defaults_for(kind: ReportKind) -> Self {
        match kind {
            ReportKind::Chart => Self::chart_defaults(),
            ReportKind::Table => Self::table_defaults(),
        }
    }

    /// 套用 TOML 設定；只覆蓋檔案中有寫的欄位
    pub fn apply_config(&mut self, config: &ReportConfig) -> Result<()> {
        if let Some(source) = &config.source {
            if let Some(source_type) = &source.r#type {
                self.source = match source_type.as_str() {
                    "http" => {
                        let endpoint = validation::validate_required_field("source.endpoint", &source.endpoint)?;
                        SourceSettings::Http {
                            endpoint: endpoint.clone(),
                        }
                    }
                    "inline" => SourceSettings::Inline { path: None },
                    "sample" => SourceSettings::Sample,
                    other => {
                        return Err(ReportError::InvalidConfigValueError {
                            field: "source.type".to_string(),
                            value: other.to_string(),
                            reason: "Valid types: http, inline, sample".to_string(),
                        })
                    }
                };
            }

            if let Some(endpoint) = &source.endpoint {
                self.set_endpoint(endpoint.clone());
            }
            if let Some(api_key) = &source.api_key {
                self.set_api_key(api_key.clone());
            }
            if let Some(timeout) = source.timeout_seconds {
                self.set_timeout_seconds(timeout);
            }
            if let Some(path) = &source.path {
                self.source = SourceSettings::Inline {
                    path: Some(path.clone()),
                };
            }
            if let Some(policy) = source.on_failure {
                self.failure_policy = policy;
            }
        }

        if let Some(output) = &config.output {
            if let Some(directory) = &output.directory {
                self.output_path = directory.clone();
            }
            if let Some(file_name) = &output.file_name {
                self.output_file_name = file_name.clone();
            }
        }

        if let Some(report) = &config.report {
            if let Some(title) = &report.title {
                self.title = title.clone();
            }
            if let Some(threshold) = report.low_hours_threshold {
                self.low_hours_threshold = threshold;
            }
        }

        Ok(())
    }

    /// 改用 HTTP 來源；API key 與逾時沿用先前的設定
    pub fn set_endpoint(&mut self, endpoint: String) {
        self.source = SourceSettings::Http { endpoint };
    }

    pub fn set_api_key(&mut self, key: String) {
        self.api_key = Some(key);
    }

    pub fn set_timeout_seconds(&mut self, seconds: u64) {
        self.timeout_seconds = seconds;
    }

    pub fn build_source(&self) -> DataSource {
        match &self.source {
            SourceSettings::Http { endpoint } => DataSource::Http(HttpRecordSource::new(
                endpoint.clone(),
                self.api_key.clone(),
                Duration::from_secs(self.timeout_seconds),
            )),
            SourceSettings::Inline { path: Some(path) } => {
                DataSource::Inline(InlineRecordSource::from_path(path))
            }
            SourceSettings::Inline { path: None } => DataSource::Inline(InlineRecordSource::embedded()),
            SourceSettings::Sample => DataSource::Sample(SampleRecordSource),
        }
    }

    /// 給 dry-run 與日誌用的設定摘要，不輸出 API key
    pub fn summary(&self) -> Vec<(String, String)> {
        let source = match &self.source {
            SourceSettings::Http { endpoint } => format!(
                "http {} (api key: {}, timeout: {}s)",
                endpoint,
                if self.api_key.is_some() { "set" } else { "none" },
                self.timeout_seconds
            ),
            SourceSettings::Inline { path: Some(path) } => format!("file {}", path),
            SourceSettings::Inline { path: None } => "embedded payload".to_string(),
            SourceSettings::Sample => "built-in sample data".to_string(),
        };

        let mut rows = vec![
            ("report".to_string(), format!("{:?}", self.kind).to_lowercase()),
            ("source".to_string(), source),
            ("on failure".to_string(), self.failure_policy.to_string()),
            (
                "output".to_string(),
                std::path::Path::new(&self.output_path)
                    .join(&self.output_file_name)
                    .display()
                    .to_string(),
            ),
            ("title".to_string(), self.title.clone()),
        ];
        if self.kind == ReportKind::Table {
            rows.push((
                "low-hours threshold".to_string(),
                self.low_hours_threshold.to_string(),
            ));
        }
        rows
    }
}

impl ConfigProvider for ReportSettings {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file_name(&self) -> &str {
        &self.output_file_name
    }

    fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    fn low_hours_threshold(&self) -> f64 {
        self.low_hours_threshold
    }

    fn title(&self) -> &str {
        &self.title
    }
}

impl Validate for ReportSettings {
    fn validate(&self) -> Result<()> {
        match &self.source {
            SourceSettings::Http { endpoint } => {
                validation::validate_url("source.endpoint", endpoint)?;
                validation::validate_positive_number("source.timeout_seconds", self.timeout_seconds, 1)?;
            }
            SourceSettings::Inline { path: Some(path) } => {
                validation::validate_path("source.path", path)?;
            }
            SourceSettings::Inline { path: None } | SourceSettings::Sample => {}
        }

        validation::validate_path("output.directory", &self.output_path)?;
        validation::validate_file_name("output.file_name", &self.output_file_name)?;
        validation::validate_non_empty_string("report.title", &self.title)?;
        validation::validate_range("report.low_hours_threshold", self.low_hours_threshold, 0.0, 1_000_000.0)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_per_report() {
        let chart = ReportSettings::chart_defaults();
        let table = ReportSettings::table_defaults();

        assert_eq!(chart.failure_policy, FailurePolicy::Fallback);
        assert_eq!(chart.output_file_name, "EmployeePieChart.png");
        assert!(matches!(chart.source, SourceSettings::Http { .. }));

        assert_eq!(table.failure_policy, FailurePolicy::Abort);
        assert_eq!(table.output_file_name, "employee_work_report.html");
        assert_eq!(table.source, SourceSettings::Inline { path: None });

        assert!(chart.validate().is_ok());
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_apply_config_overrides_only_given_fields() {
        let config = ReportConfig::from_toml_str(
            r#"
[source]
timeout_seconds = 5
api_key = "k"

[report]
low_hours_threshold = 40
"#,
        )
        .unwrap();

        let mut settings = ReportSettings::chart_defaults();
        settings.apply_config(&config).unwrap();

        assert_eq!(
            settings.source,
            SourceSettings::Http {
                endpoint: DEFAULT_TIME_ENTRIES_ENDPOINT.to_string(),
            }
        );
        assert_eq!(settings.api_key.as_deref(), Some("k"));
        assert_eq!(settings.timeout_seconds, 5);
        assert_eq!(settings.low_hours_threshold, 40.0);
        assert_eq!(settings.output_file_name, CHART_FILE_NAME);
    }

    #[test]
    fn test_apply_config_switches_table_to_http() {
        let config = ReportConfig::from_toml_str(
            r#"
[source]
type = "http"
endpoint = "https://logs.example.com/worklogs"
on_failure = "fallback"
"#,
        )
        .unwrap();

        let mut settings = ReportSettings::table_defaults();
        settings.apply_config(&config).unwrap();

        assert!(matches!(settings.source, SourceSettings::Http { ref endpoint, .. } if endpoint == "https://logs.example.com/worklogs"));
        assert_eq!(settings.failure_policy, FailurePolicy::Fallback);
    }

    #[test]
    fn test_source_options_survive_switch_to_http() {
        let config = ReportConfig::from_toml_str(
            r#"
[source]
type = "sample"
api_key = "from-toml"
timeout_seconds = 7
"#,
        )
        .unwrap();

        let mut settings = ReportSettings::chart_defaults();
        settings.apply_config(&config).unwrap();
        assert_eq!(settings.source, SourceSettings::Sample);

        settings.set_endpoint("https://logs.example.com/worklogs".to_string());

        assert_eq!(settings.api_key.as_deref(), Some("from-toml"));
        assert_eq!(settings.timeout_seconds, 7);
        let summary = settings.summary();
        assert!(summary
            .iter()
            .any(|(key, value)| key == "source" && value.contains("api key: set") && value.contains("timeout: 7s")));
    }

    #[test]
    fn test_http_type_requires_endpoint() {
        let config = ReportConfig::from_toml_str("[source]\ntype = \"http\"\n").unwrap();
        let mut settings = ReportSettings::table_defaults();

        assert!(matches!(
            settings.apply_config(&config),
            Err(ReportError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_unknown_source_type() {
        let config = ReportConfig::from_toml_str("[source]\ntype = \"ftp\"\n").unwrap();
        let mut settings = ReportSettings::chart_defaults();

        assert!(settings.apply_config(&config).is_err());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut settings = ReportSettings::chart_defaults();
        settings.set_timeout_seconds(0);
        assert!(settings.validate().is_err());

        let mut settings = ReportSettings::chart_defaults();
        settings.set_endpoint("not a url".to_string());
        assert!(settings.validate().is_err());

        let mut settings = ReportSettings::table_defaults();
        settings.low_hours_threshold = -5.0;
        assert!(settings.validate().is_err());

        let mut settings = ReportSettings::table_defaults();
        settings.output_file_name = "sub/report.html".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_summary_hides_api_key() {
        let mut settings = ReportSettings::chart_defaults();
        settings.set_api_key("super-secret".to_string());

        let summary = settings.summary();

        assert!(summary.iter().all(|(_, value)| !value.contains("super-secret")));
        assert!(summary.iter().any(|(key, value)| key == "source" && value.contains("api key: set")));
    }
}
