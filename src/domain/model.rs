use serde::{Deserialize, Serialize};

/// 單筆工時紀錄，兩種來源的欄位命名都接受
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkRecord {
    #[serde(rename = "name", alias = "EmployeeName", alias = "employeeName")]
    pub employee_name: String,
    #[serde(rename = "hours", alias = "HoursWorked", alias = "hoursWorked")]
    pub hours_worked: f64,
}

impl WorkRecord {
    pub fn new(employee_name: impl Into<String>, hours_worked: f64) -> Self {
        Self {
            employee_name: employee_name.into(),
            hours_worked,
        }
    }

    /// 分組用的鍵：只去除前後空白，不做大小寫轉換
    pub fn normalized_name(&self) -> &str {
        self.employee_name.trim()
    }

    pub fn check(&self) -> std::result::Result<(), String> {
        if self.normalized_name().is_empty() {
            return Err("employee name is empty".to_string());
        }
        if !self.hours_worked.is_finite() {
            return Err(format!("hours worked is not a finite number ({})", self.hours_worked));
        }
        if self.hours_worked < 0.0 {
            return Err(format!("hours worked is negative ({})", self.hours_worked));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedEmployee {
    pub name: String,
    pub total_hours: f64,
}

impl AggregatedEmployee {
    pub fn is_low_hours(&self, threshold: f64) -> bool {
        self.total_hours < threshold
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSlice {
    pub color_index: usize,
    /// 角度以 3 點鐘方向為 0，順時針遞增
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl ChartSlice {
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle
    }
}

/// transform 階段產出的報表，交給 load 寫檔
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub file_name: String,
    pub content: Vec<u8>,
    pub record_count: usize,
    pub low_hours: Vec<AggregatedEmployee>,
}
