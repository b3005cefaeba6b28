use crate::domain::model::{ChartSlice, WorkRecord};
use crate::domain::services::aggregation::total_hours;
use crate::utils::error::{ReportError, Result};

pub const PALETTE_SIZE: usize = 6;

/// 每筆紀錄一片，從 0 度開始依序累加
pub fn compute_slices(records: &[WorkRecord]) -> Result<Vec<ChartSlice>> {
    let total = total_hours(records);
    if !total.is_finite() || total <= 0.0 {
        return Err(ReportError::NoChartData);
    }

    let mut start_angle = 0.0;
    let slices = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let sweep_angle = record.hours_worked / total * 360.0;
            let slice = ChartSlice {
                color_index: i % PALETTE_SIZE,
                start_angle,
                sweep_angle,
            };
            start_angle += sweep_angle;
            slice
        })
        .collect();

    Ok(slices)
}

pub fn percentage(hours: f64, total: f64) -> f64 {
    hours / total * 100.0
}
