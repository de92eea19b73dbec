//! # 提取报告导出
//!
//! 将每个步骤的处理结果导出为 CSV：
//! `log,step,markers,last_marker_line,atoms,status,output,error`
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs` 调用
//! - 使用 `models/scan.rs` 的 StepReport
//! - 使用 `csv` + `serde` 写入 CSV 文件

use crate::error::{ScanError, Result};
use crate::models::StepReport;

use serde::Serialize;
use std::path::Path;

/// 报告中的一行（一个扫描步骤）
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub log: String,
    pub step: usize,
    pub markers: usize,
    pub last_marker_line: Option<usize>,
    pub atoms: Option<usize>,
    pub status: String,
    pub output: String,
    pub error: String,
}

impl ReportRow {
    /// 由步骤结果构造；`status` 与 `output` 由调用方根据写文件结果给出
    pub fn new(log: &str, report: &StepReport, status: &str, output: Option<&Path>) -> Self {
        ReportRow {
            log: log.to_string(),
            step: report.step,
            markers: report.markers.len(),
            last_marker_line: report.last_marker(),
            atoms: report.geometry().map(|g| g.len()),
            status: status.to_string(),
            output: output.map(|p| p.display().to_string()).unwrap_or_default(),
            error: report.error().map(|e| e.to_string()).unwrap_or_default(),
        }
    }

    /// 附加写文件阶段的错误信息
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = error.into();
        self
    }
}

/// 导出报告为 CSV
pub fn to_csv(rows: &[ReportRow], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(ScanError::CsvError)?;

    for row in rows {
        wtr.serialize(row).map_err(ScanError::CsvError)?;
    }

    wtr.flush().map_err(|e| ScanError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StepError;
    use crate::models::{AtomRecord, Geometry};

    #[test]
    fn test_report_csv() {
        let ok = StepReport {
            step: 1,
            markers: vec![12, 40],
            outcome: Ok(Geometry::new(vec![AtomRecord::new(1, vec![0.0, 0.0, 0.0])])),
        };
        let missing = StepReport {
            step: 2,
            markers: vec![],
            outcome: Err(StepError::NotFound { step: 2 }),
        };

        let rows = vec![
            ReportRow::new("scan.log", &ok, "written", Some(Path::new("out/in1.gjf"))),
            ReportRow::new("scan.log", &missing, "not found", None),
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        to_csv(&rows, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "log,step,markers,last_marker_line,atoms,status,output,error"
        );
        assert_eq!(lines[1], "scan.log,1,2,40,1,written,out/in1.gjf,");
        assert_eq!(
            lines[2],
            "scan.log,2,0,,,not found,,step 2: progress marker not found in log"
        );
    }

    #[test]
    fn test_with_error() {
        let ok = StepReport {
            step: 3,
            markers: vec![5],
            outcome: Ok(Geometry::new(vec![AtomRecord::new(200, vec![0.0, 0.0, 0.0])])),
        };
        let row = ReportRow::new("a.log", &ok, "write failed", None)
            .with_error("No element symbol for atomic number 200");
        assert_eq!(row.error, "No element symbol for atomic number 200");
        assert_eq!(row.atoms, Some(1));
    }
}
