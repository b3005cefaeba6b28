use crate::domain::model::WorkRecord;

/// 表格報表預設讀取的內嵌 JSON
pub const EMBEDDED_WORK_LOGS: &str = r#"[{"name":"RamVignes","hours":120},{"name":"Sethupathi","hours":80},{"name":"GuruCharran","hours":150}]"#;

/// API 無法使用時的範例資料
pub fn sample_records() -> Vec<WorkRecord> {
    vec![
        WorkRecord::new("Alice", 120.0),
        WorkRecord::new("Bob", 80.0),
        WorkRecord::new("Charlie", 150.0),
        WorkRecord::new("David", 90.0),
        WorkRecord::new("Eva", 110.0),
    ]
}
