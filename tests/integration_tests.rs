use anyhow::Result;
use httpmock::prelude::*;
use hours_report::config::SourceSettings;
use hours_report::core::FailurePolicy;
use hours_report::{
    ChartPipeline, LocalStorage, ReportEngine, ReportError, ReportSettings, TablePipeline,
};
use std::path::Path;
use tempfile::TempDir;

fn chart_settings(output_path: &str, endpoint: String) -> ReportSettings {
    let mut settings = ReportSettings::chart_defaults();
    settings.output_path = output_path.to_string();
    settings.set_endpoint(endpoint);
    settings.set_timeout_seconds(5);
    settings
}

fn table_settings(output_path: &str, input: &Path) -> ReportSettings {
    let mut settings = ReportSettings::table_defaults();
    settings.output_path = output_path.to_string();
    settings.source = SourceSettings::Inline {
        path: Some(input.to_str().unwrap().to_string()),
    };
    settings
}

fn png_size(path: &Path) -> (u32, u32) {
    let file = std::fs::File::open(path).unwrap();
    let reader = png::Decoder::new(std::io::BufReader::new(file))
        .read_info()
        .unwrap();
    (reader.info().width, reader.info().height)
}

fn png_pixels(path: &Path) -> (u32, Vec<u8>) {
    let file = std::fs::File::open(path).unwrap();
    let mut reader = png::Decoder::new(std::io::BufReader::new(file))
        .read_info()
        .unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    buf.truncate(info.buffer_size());
    (info.width, buf)
}

fn pixel(buf: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
}

async fn run_chart(settings: ReportSettings) -> hours_report::Result<String> {
    let storage = LocalStorage::new(settings.output_path.clone());
    let source = settings.build_source();
    let pipeline = ChartPipeline::new(storage, settings, source);
    ReportEngine::new(pipeline).run().await
}

async fn run_table(settings: ReportSettings) -> hours_report::Result<String> {
    let storage = LocalStorage::new(settings.output_path.clone());
    let source = settings.build_source();
    let pipeline = TablePipeline::new(storage, settings, source);
    ReportEngine::new(pipeline).run().await
}

#[tokio::test]
async fn test_chart_end_to_end_with_api_data() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/gettimeentries")
            .query_param("code", "test-key");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"EmployeeName": "Alice", "HoursWorked": 32.5},
                {"EmployeeName": "Bob", "HoursWorked": 20},
                {"EmployeeName": "Alice", "HoursWorked": 7.5}
            ]));
    });

    let mut settings = chart_settings(&output_path, server.url("/api/gettimeentries"));
    settings.set_api_key("test-key".to_string());

    let result = run_chart(settings).await.unwrap();

    api_mock.assert();
    assert!(result.ends_with("EmployeePieChart.png"));

    let full_path = temp_dir.path().join("EmployeePieChart.png");
    assert!(full_path.exists());
    assert_eq!(png_size(&full_path), (800, 600));
}

#[tokio::test]
async fn test_chart_end_to_end_with_api_failure() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/failed");
        then.status(500);
    });

    let result = run_chart(chart_settings(&output_path, server.url("/failed"))).await;

    // Falls back to the five sample records
    assert!(result.is_ok());
    api_mock.assert();

    let full_path = temp_dir.path().join("EmployeePieChart.png");
    assert_eq!(png_size(&full_path), (800, 600));

    // 第五列圖例為紫色，第六列不存在
    let (width, buf) = png_pixels(&full_path);
    assert_eq!(pixel(&buf, width, 510, 160), [128, 0, 128, 255]);
    assert_eq!(pixel(&buf, width, 510, 185), [255, 255, 255, 255]);
}

#[tokio::test]
async fn test_chart_with_abort_policy_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/failed");
        then.status(502);
    });

    let mut settings = chart_settings(&output_path, server.url("/failed"));
    settings.failure_policy = FailurePolicy::Abort;

    let result = run_chart(settings).await;

    assert!(matches!(result, Err(ReportError::UpstreamStatus { status: 502 })));
    assert!(!temp_dir.path().join("EmployeePieChart.png").exists());
}

#[tokio::test]
async fn test_chart_zero_hours_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/idle");
        then.status(200)
            .json_body(serde_json::json!([{"EmployeeName": "Idle", "HoursWorked": 0}]));
    });

    let result = run_chart(chart_settings(&output_path, server.url("/idle"))).await;

    assert!(matches!(result, Err(ReportError::NoChartData)));
    assert!(!temp_dir.path().join("EmployeePieChart.png").exists());
}

#[tokio::test]
async fn test_table_end_to_end_case_sensitive_groups() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();
    let input = temp_dir.path().join("logs.json");
    std::fs::write(&input, r#"[{"name":"A","hours":60},{"name":"a ","hours":40}]"#).unwrap();

    let result = run_table(table_settings(&output_path, &input)).await.unwrap();
    assert!(result.ends_with("employee_work_report.html"));

    let html = std::fs::read_to_string(temp_dir.path().join("employee_work_report.html")).unwrap();
    let upper = html
        .find("<tr class=\"low-hours\"><td>A</td><td>60.0</td></tr>")
        .unwrap();
    let lower = html
        .find("<tr class=\"low-hours\"><td>a</td><td>40.0</td></tr>")
        .unwrap();
    assert!(upper < lower);
}

#[tokio::test]
async fn test_table_end_to_end_embedded_payload() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut settings = ReportSettings::table_defaults();
    settings.output_path = temp_dir.path().to_str().unwrap().to_string();

    run_table(settings).await?;

    let html = std::fs::read_to_string(temp_dir.path().join("employee_work_report.html"))?;
    let guru = html.find("<tr><td>GuruCharran</td><td>150.0</td></tr>").unwrap();
    let ram = html.find("<tr><td>RamVignes</td><td>120.0</td></tr>").unwrap();
    let sethu = html
        .find("<tr class=\"low-hours\"><td>Sethupathi</td><td>80.0</td></tr>")
        .unwrap();
    assert!(guru < ram && ram < sethu);
    Ok(())
}

#[tokio::test]
async fn test_table_empty_payload_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();
    let input = temp_dir.path().join("empty.json");
    std::fs::write(&input, "[]").unwrap();

    let result = run_table(table_settings(&output_path, &input)).await;

    assert!(matches!(result, Err(ReportError::NoData { .. })));
    assert!(!temp_dir.path().join("employee_work_report.html").exists());
}

#[tokio::test]
async fn test_table_escapes_untrusted_names() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();
    let input = temp_dir.path().join("logs.json");
    std::fs::write(
        &input,
        r#"[{"name":"<script>alert(1)</script>","hours":12}]"#,
    )
    .unwrap();

    run_table(table_settings(&output_path, &input)).await.unwrap();

    let html = std::fs::read_to_string(temp_dir.path().join("employee_work_report.html")).unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[tokio::test]
async fn test_table_from_http_endpoint() {
    let temp_dir = TempDir::new().unwrap();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/worklogs");
        then.status(200)
            .json_body(serde_json::json!([
                {"name": "Dana", "hours": 55},
                {"name": "Dana", "hours": 50}
            ]));
    });

    let mut settings = ReportSettings::table_defaults();
    settings.output_path = temp_dir.path().to_str().unwrap().to_string();
    settings.set_endpoint(server.url("/worklogs"));

    run_table(settings).await.unwrap();

    api_mock.assert();
    let html = std::fs::read_to_string(temp_dir.path().join("employee_work_report.html")).unwrap();
    assert!(html.contains("<tr><td>Dana</td><td>105.0</td></tr>"));
}
