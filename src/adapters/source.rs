use crate::adapters::sample::{sample_records, EMBEDDED_WORK_LOGS};
use crate::core::{FailurePolicy, RecordSource, WorkRecord};
use crate::utils::error::{ReportError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// 解析 JSON 陣列並逐筆檢查；`null` 與空陣列都視為沒有資料
pub fn parse_records(payload: &str) -> Result<Vec<WorkRecord>> {
    let records: Option<Vec<WorkRecord>> = serde_json::from_str(payload)?;
    let records = records.unwrap_or_default();

    if records.is_empty() {
        return Err(ReportError::EmptyPayload);
    }

    let mut running_total = 0.0_f64;
    for (index, record) in records.iter().enumerate() {
        record
            .check()
            .map_err(|reason| ReportError::InvalidRecord { index, reason })?;

        running_total += record.hours_worked;
        if !running_total.is_finite() {
            return Err(ReportError::InvalidRecord {
                index,
                reason: "total hours overflow".to_string(),
            });
        }
    }

    Ok(records)
}

/// 依失敗策略取得資料：fallback 改用範例資料，abort 直接回傳錯誤
pub async fn fetch_with_policy<R: RecordSource + ?Sized>(
    source: &R,
    policy: FailurePolicy,
) -> Result<Vec<WorkRecord>> {
    match source.fetch().await {
        Ok(records) => {
            tracing::info!("📥 Loaded {} records from {}", records.len(), source.describe());
            Ok(records)
        }
        Err(e) => match policy {
            FailurePolicy::Fallback => {
                tracing::warn!("⚠️ {} failed: {}", source.describe(), e);
                tracing::warn!("Using sample data instead.");
                Ok(sample_records())
            }
            FailurePolicy::Abort => match e {
                ReportError::EmptyPayload => Err(ReportError::NoData {
                    reason: format!("{} returned no work records", source.describe()),
                }),
                other => Err(other),
            },
        },
    }
}

pub struct HttpRecordSource {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpRecordSource {
    pub fn new(endpoint: String, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            timeout,
        }
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch(&self) -> Result<Vec<WorkRecord>> {
        let mut request = self.client.get(&self.endpoint).timeout(self.timeout);

        if let Some(key) = &self.api_key {
            request = request.query(&[("code", key)]);
        }

        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = request.send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(ReportError::UpstreamStatus {
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        parse_records(&body)
    }

    fn describe(&self) -> String {
        format!("API {}", self.endpoint)
    }
}

/// 內嵌或檔案中的 JSON 工時紀錄
pub struct InlineRecordSource {
    payload: String,
    path: Option<PathBuf>,
}

impl InlineRecordSource {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            path: None,
        }
    }

    pub fn embedded() -> Self {
        Self::new(EMBEDDED_WORK_LOGS)
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            payload: String::new(),
            path: Some(path.into()),
        }
    }
}

#[async_trait]
impl RecordSource for InlineRecordSource {
    async fn fetch(&self) -> Result<Vec<WorkRecord>> {
        match &self.path {
            Some(path) => {
                let payload = tokio::fs::read_to_string(path).await?;
                parse_records(&payload)
            }
            None => parse_records(&self.payload),
        }
    }

    fn describe(&self) -> String {
        match &self.path {
            Some(path) => format!("file {}", path.display()),
            None => "embedded payload".to_string(),
        }
    }
}

pub struct SampleRecordSource;

#[async_trait]
impl RecordSource for SampleRecordSource {
    async fn fetch(&self) -> Result<Vec<WorkRecord>> {
        Ok(sample_records())
    }

    fn describe(&self) -> String {
        "built-in sample data".to_string()
    }
}

/// 設定檔選出的資料來源
pub enum DataSource {
    Http(HttpRecordSource),
    Inline(InlineRecordSource),
    Sample(SampleRecordSource),
}

#[async_trait]
impl RecordSource for DataSource {
    async fn fetch(&self) -> Result<Vec<WorkRecord>> {
        match self {
            DataSource::Http(source) => source.fetch().await,
            DataSource::Inline(source) => source.fetch().await,
            DataSource::Sample(source) => source.fetch().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            DataSource::Http(source) => source.describe(),
            DataSource::Inline(source) => source.describe(),
            DataSource::Sample(source) => source.describe(),
        }
    }
}
