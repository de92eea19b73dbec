//! # 扫描元数据读取
//!
//! 从日志头部读取原子数和扫描步数：
//! ```text
//!  NAtoms=      3 NQM=        3 NQMF=       0 NMMI=      0
//!  ...
//!  Search for a local minimum.
//!  Step number   1 out of a maximum of   20 on scan point     1 out of     6
//! ```
//! 原子数是 `NAtoms` 词元之后的下一个词元；步数是
//! `Search for a local minimum` 下一行的最后 3 个字符。
//!
//! ## 依赖关系
//! - 被 `scan/pipeline.rs`, `commands/index.rs` 使用
//! - 使用 `parsers/log.rs`, `models/scan.rs`

use super::log::ScanLog;
use crate::error::{ScanError, Result};
use crate::models::ScanMetadata;

/// 原子数标签
pub const NATOMS_TAG: &str = "NAtoms";

/// 扫描步数所在行的前一行
pub const SCAN_HEADER: &str = "Search for a local minimum";

/// 步数字段宽度（行尾右对齐）
const STEP_FIELD_WIDTH: usize = 3;

/// 读取完整元数据
pub fn read_metadata(log: &ScanLog) -> Result<ScanMetadata> {
    let steps = find_step_count(log)?;
    let atoms = find_atom_count(log)?;
    Ok(ScanMetadata { steps, atoms })
}

/// 原子数：第一个包含 `NAtoms` 的词元之后的词元
pub fn find_atom_count(log: &ScanLog) -> Result<usize> {
    let mut tokens = log.tokens();

    if !tokens.any(|t| t.contains(NATOMS_TAG)) {
        return Err(ScanError::MetadataNotFound {
            what: format!("'{}' token", NATOMS_TAG),
        });
    }

    let value = tokens.next().ok_or_else(|| ScanError::MetadataNotFound {
        what: format!("atom count after '{}'", NATOMS_TAG),
    })?;

    parse_positive(value, "atom count")
}

/// 扫描步数：`Search for a local minimum` 下一行末尾 3 个字符
pub fn find_step_count(log: &ScanLog) -> Result<usize> {
    let lines = log.lines();

    let header = lines
        .iter()
        .position(|l| l.contains(SCAN_HEADER))
        .ok_or_else(|| ScanError::MetadataNotFound {
            what: format!("'{}' line", SCAN_HEADER),
        })?;

    let line = lines
        .get(header + 1)
        .ok_or_else(|| ScanError::MetadataNotFound {
            what: format!("scan step line after '{}'", SCAN_HEADER),
        })?;

    let line = line.trim_end_matches('\r');
    let chars: Vec<char> = line.chars().collect();
    let start = chars.len().saturating_sub(STEP_FIELD_WIDTH);
    let field: String = chars[start..].iter().collect();

    parse_positive(field.trim(), "scan step count")
}

fn parse_positive(value: &str, what: &str) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ScanError::MetadataParse {
            what: what.to_string(),
            value: value.to_string(),
        }),
    }
}
