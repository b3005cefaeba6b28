use crate::core::FailurePolicy;
use crate::utils::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 可選的 TOML 設定檔；所有欄位都可省略，省略時使用各報表的預設值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub source: Option<SourceConfig>,
    pub output: Option<OutputConfig>,
    pub report: Option<ReportSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// "http" | "inline" | "sample"
    pub r#type: Option<String>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub path: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub on_failure: Option<FailurePolicy>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSection {
    pub title: Option<String>,
    pub low_hours_threshold: Option<f64>,
}

impl ReportConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReportError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TIME_ENTRIES_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReportError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[source]
type = "http"
endpoint = "https://api.example.com/time"
timeout_seconds = 10
on_failure = "abort"

[output]
directory = "./reports"
file_name = "chart.png"

[report]
title = "Q3 Hours"
low_hours_threshold = 80.0
"#;

        let config = ReportConfig::from_toml_str(toml_content).unwrap();
        let source = config.source.unwrap();

        assert_eq!(source.r#type.as_deref(), Some("http"));
        assert_eq!(source.timeout_seconds, Some(10));
        assert_eq!(source.on_failure, Some(FailurePolicy::Abort));
        assert_eq!(config.output.unwrap().file_name.as_deref(), Some("chart.png"));
        assert_eq!(config.report.unwrap().low_hours_threshold, Some(80.0));
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = ReportConfig::from_toml_str("").unwrap();
        assert!(config.source.is_none());
        assert!(config.output.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HOURS_REPORT_TEST_KEY", "abc123");

        let config = ReportConfig::from_toml_str(
            r#"
[source]
api_key = "${HOURS_REPORT_TEST_KEY}"
"#,
        )
        .unwrap();
        assert_eq!(config.source.unwrap().api_key.as_deref(), Some("abc123"));

        std::env::remove_var("HOURS_REPORT_TEST_KEY");
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result = ReportConfig::from_toml_str(
            r#"
[source]
on_failure = "retry"
"#,
        );
        assert!(matches!(result, Err(ReportError::ConfigValidationError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\ndirectory = \"./out\"\n")
            .unwrap();

        let config = ReportConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output.unwrap().directory.as_deref(), Some("./out"));
    }
}
