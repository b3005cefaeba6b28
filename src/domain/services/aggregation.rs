use crate::domain::model::{AggregatedEmployee, WorkRecord};
use std::collections::HashMap;

pub fn total_hours(records: &[WorkRecord]) -> f64 {
    records.iter().map(|r| r.hours_worked).sum()
}

/// 依去除空白後的姓名分組加總，結果依總工時由大到小排序。
/// 同分時保留第一次出現的順序（`sort_by` 為穩定排序）。
pub fn aggregate(records: &[WorkRecord]) -> Vec<AggregatedEmployee> {
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<AggregatedEmployee> = Vec::new();

    for record in records {
        let key = record.normalized_name();
        match index_by_name.get(key) {
            Some(&idx) => groups[idx].total_hours += record.hours_worked,
            None => {
                index_by_name.insert(key, groups.len());
                groups.push(AggregatedEmployee {
                    name: key.to_string(),
                    total_hours: record.hours_worked,
                });
            }
        }
    }

    groups.sort_by(|a, b| b.total_hours.total_cmp(&a.total_hours));
    groups
}
