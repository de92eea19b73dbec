//! # Standard orientation 几何块解析
//!
//! 从某步骤最后一个进度标记之后，找到第一个 `Standard orientation` 块：
//! ```text
//!                          Standard orientation:
//!  ---------------------------------------------------------------------
//!  Center     Atomic      Atomic             Coordinates (Angstroms)
//!  Number     Number       Type             X           Y           Z
//!  ---------------------------------------------------------------------
//!       1          6           0        0.000000    0.000000    0.000000
//!       2          1           0        1.089000    0.000000    0.000000
//!  ---------------------------------------------------------------------
//! ```
//! 标题行之后固定跳过 4 行，再读取恰好 M 行原子数据。
//!
//! ## 依赖关系
//! - 被 `scan/pipeline.rs`, `commands/index.rs` 使用
//! - 使用 `parsers/log.rs`, `models/atom.rs`

use super::log::ScanLog;
use crate::error::StepError;
use crate::models::{AtomRecord, Geometry};

/// 几何块标题
pub const ORIENTATION_HEADER: &str = "Standard orientation";

/// 标题与原子数据之间的固定行数（分隔线 + 两行表头 + 分隔线）
pub const ORIENTATION_PREAMBLE: usize = 4;

/// 每行至少需要的坐标分量数
pub const MIN_COORDINATES: usize = 3;

/// 提取某步骤的收敛几何结构
///
/// `marker_line` 为该步骤最后一个标记所在行（1 起），从其下一行开始搜索。
pub fn extract_geometry(
    log: &ScanLog,
    step: usize,
    marker_line: usize,
    atoms: usize,
) -> Result<Geometry, StepError> {
    let header = find_orientation_after(log, marker_line).ok_or_else(|| StepError::Format {
        step,
        line: marker_line,
        reason: format!("no '{}' block after line {}", ORIENTATION_HEADER, marker_line),
    })?;

    parse_orientation_block(log, step, header, atoms)
}

/// 从 `after` 之后查找第一个 `Standard orientation` 标题行（1 起）
pub fn find_orientation_after(log: &ScanLog, after: usize) -> Option<usize> {
    log.lines()
        .iter()
        .enumerate()
        .skip(after)
        .find(|(_, line)| line.contains(ORIENTATION_HEADER))
        .map(|(i, _)| i + 1)
}

/// 统计 (after, before) 区间内的 `Standard orientation` 块数
pub fn count_orientation_blocks(log: &ScanLog, after: usize, before: Option<usize>) -> usize {
    let end = before
        .map(|b| b.saturating_sub(1))
        .unwrap_or(log.line_count())
        .min(log.line_count());

    if end <= after {
        return 0;
    }

    log.lines()[after..end]
        .iter()
        .filter(|line| line.contains(ORIENTATION_HEADER))
        .count()
}

/// 解析标题行 `header` 之后的几何块
pub fn parse_orientation_block(
    log: &ScanLog,
    step: usize,
    header: usize,
    atoms: usize,
) -> Result<Geometry, StepError> {
    let first_row = header + ORIENTATION_PREAMBLE + 1;
    let mut records = Vec::with_capacity(atoms);

    for k in 0..atoms {
        let number = first_row + k;
        let row = log.line(number).ok_or_else(|| StepError::Format {
            step,
            line: number,
            reason: format!(
                "log ends after {} of {} atom rows of the block at line {}",
                k, atoms, header
            ),
        })?;

        let atom = parse_atom_row(row).map_err(|reason| StepError::Format {
            step,
            line: number,
            reason,
        })?;
        records.push(atom);
    }

    Ok(Geometry::new(records))
}

/// 解析一行原子数据：序号、原子序数、原子类型、坐标...
pub fn parse_atom_row(row: &str) -> std::result::Result<AtomRecord, String> {
    let parts: Vec<&str> = row.split_whitespace().collect();

    if parts.len() < 3 + MIN_COORDINATES {
        return Err(format!(
            "expected at least {} columns in atom row, found {}: '{}'",
            3 + MIN_COORDINATES,
            parts.len(),
            row.trim()
        ));
    }

    parts[0]
        .parse::<i64>()
        .map_err(|_| format!("invalid center number '{}'", parts[0]))?;

    let atomic_number = parts[1]
        .parse::<u32>()
        .map_err(|_| format!("invalid atomic number '{}'", parts[1]))?;

    parts[2]
        .parse::<i64>()
        .map_err(|_| format!("invalid atomic type '{}'", parts[2]))?;

    let coordinates = parts[3..]
        .iter()
        .map(|tok| parse_fortran_f64(tok).ok_or_else(|| format!("invalid coordinate '{}'", tok)))
        .collect::<std::result::Result<Vec<f64>, String>>()?;

    Ok(AtomRecord::new(atomic_number, coordinates))
}

/// 解析浮点数，兼容 Fortran 的 `D` 指数记法
fn parse_fortran_f64(token: &str) -> Option<f64> {
    let value = match token.parse::<f64>() {
        Ok(v) => v,
        Err(_) => token.replace(['D', 'd'], "E").parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEPARATOR: &str =
        " ---------------------------------------------------------------------";

    fn orientation_block(rows: &[&str]) -> Vec<String> {
        let mut lines = vec![
            "                         Standard orientation:".to_string(),
            SEPARATOR.to_string(),
            " Center     Atomic      Atomic             Coordinates (Angstroms)".to_string(),
            " Number     Number       Type             X           Y           Z".to_string(),
            SEPARATOR.to_string(),
        ];
        lines.extend(rows.iter().map(|r| r.to_string()));
        lines.push(SEPARATOR.to_string());
        lines
    }

    fn log_from(lines: Vec<String>) -> ScanLog {
        ScanLog::from_content(&lines.join("\n"), "geom.log")
    }

    const METHYLENE: [&str; 3] = [
        "      1          6           0        0.000000    0.000000    0.000000",
        "      2          1           0        1.000000    0.000000    0.000000",
        "      3          1           0        0.000000    1.000000    0.000000",
    ];

    #[test]
    fn test_parse_block_at_line() {
        let mut lines = vec![" filler".to_string(); 100];
        lines.extend(orientation_block(&METHYLENE));
        let log = log_from(lines);

        let geom = parse_orientation_block(&log, 1, 101, 3).unwrap();
        assert_eq!(
            geom,
            Geometry::new(vec![
                AtomRecord::new(6, vec![0.0, 0.0, 0.0]),
                AtomRecord::new(1, vec![1.0, 0.0, 0.0]),
                AtomRecord::new(1, vec![0.0, 1.0, 0.0]),
            ])
        );
    }

    #[test]
    fn test_extract_uses_first_block_after_marker() {
        let mut lines = vec![" scan point     1 out of     2".to_string()];
        lines.extend(orientation_block(&[
            "      1          8           0        0.100000    0.200000    0.300000",
        ]));
        lines.extend(orientation_block(&[
            "      1          8           0        9.000000    9.000000    9.000000",
        ]));
        let log = log_from(lines);

        let geom = extract_geometry(&log, 1, 1, 1).unwrap();
        assert_eq!(geom.atoms()[0].coordinates, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_extract_ignores_block_before_marker() {
        let mut lines = orientation_block(&[
            "      1          8           0        5.000000    5.000000    5.000000",
        ]);
        lines.push(" scan point     1 out of     1".to_string());
        let marker = lines.len();
        lines.extend(orientation_block(&[
            "      1          8           0        1.500000   -2.500000    0.000000",
        ]));
        let log = log_from(lines);

        let geom = extract_geometry(&log, 1, marker, 1).unwrap();
        assert_eq!(geom.atoms()[0].coordinates, vec![1.5, -2.5, 0.0]);
    }

    #[test]
    fn test_extract_without_orientation_block() {
        let log = log_from(vec![" scan point     1 out of     1".to_string(), " end".to_string()]);
        let err = extract_geometry(&log, 4, 1, 3).unwrap_err();
        assert!(matches!(err, StepError::Format { step: 4, line: 1, .. }));
    }

    #[test]
    fn test_extract_marker_past_end_of_log() {
        let log = log_from(vec![" short".to_string()]);
        let err = extract_geometry(&log, 1, 50, 3).unwrap_err();
        assert!(matches!(err, StepError::Format { step: 1, .. }));
    }

    #[test]
    fn test_truncated_block() {
        let mut lines = orientation_block(&METHYLENE[..2]);
        lines.pop(); // 去掉结尾分隔线，日志在第二行原子后结束
        let log = log_from(lines);

        let err = parse_orientation_block(&log, 2, 1, 3).unwrap_err();
        assert_eq!(
            err,
            StepError::Format {
                step: 2,
                line: 8,
                reason: "log ends after 2 of 3 atom rows of the block at line 1".to_string(),
            }
        );
    }

    #[test]
    fn test_too_many_atoms_hits_separator() {
        let log = log_from(orientation_block(&METHYLENE));
        let err = parse_orientation_block(&log, 1, 1, 4).unwrap_err();
        assert!(matches!(err, StepError::Format { line: 9, .. }));
    }

    #[test]
    fn test_parse_atom_row_extra_columns() {
        let atom = parse_atom_row("   1   17   0   1.0   2.0   3.0   4.0").unwrap();
        assert_eq!(atom.atomic_number, 17);
        assert_eq!(atom.coordinates, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_parse_atom_row_fortran_exponent() {
        let atom = parse_atom_row("   1   6   0   1.0D-01   -2.5d+00   0.0E+00").unwrap();
        assert_eq!(atom.coordinates, vec![0.1, -2.5, 0.0]);
    }

    #[test]
    fn test_parse_atom_row_missing_coordinate() {
        let err = parse_atom_row("      1          6           0        0.000000    0.000000").unwrap_err();
        assert!(err.contains("expected at least 6 columns"));
    }

    #[test]
    fn test_parse_atom_row_bad_tokens() {
        assert!(parse_atom_row("   x   6   0   0.0   0.0   0.0").is_err());
        assert!(parse_atom_row("   1   C   0   0.0   0.0   0.0").is_err());
        assert!(parse_atom_row("   1   6   0   0.0   abc   0.0").is_err());
        assert!(parse_atom_row("   1   6   0   0.0   NaN   0.0").is_err());
    }

    #[test]
    fn test_count_orientation_blocks() {
        let mut lines = vec![" marker".to_string()];
        lines.extend(orientation_block(&METHYLENE));
        lines.extend(orientation_block(&METHYLENE));
        let next = lines.len() + 1;
        lines.push(" next marker".to_string());
        lines.extend(orientation_block(&METHYLENE));
        let log = log_from(lines);

        assert_eq!(count_orientation_blocks(&log, 1, Some(next)), 2);
        assert_eq!(count_orientation_blocks(&log, 1, None), 3);
        assert_eq!(count_orientation_blocks(&log, next, None), 1);
        assert_eq!(count_orientation_blocks(&log, 500, None), 0);
    }
}
