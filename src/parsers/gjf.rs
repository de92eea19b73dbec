//! # Gaussian 输入文件 (.gjf) 生成
//!
//! 读取用户模板（Link 0 命令、路由行、标题、电荷与多重度），
//! 在其后写入一个扫描步骤的笛卡尔坐标，生成新的输入文件。
//!
//! ## .gjf 格式说明
//! ```text
//! %chk=scan_3.chk
//! %nprocshared=8
//! # B3LYP/6-31G(d) opt
//!
//! title
//!
//! 0 1
//!  C       0.00000000      0.00000000      0.00000000
//!  H       1.08900000      0.00000000      0.00000000
//!
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs` 使用
//! - 使用 `models/atom.rs`, `models/elements.rs`

use crate::error::{ScanError, Result};
use crate::models::{elements, Geometry};

use regex::Regex;
use std::fs;
use std::path::Path;

/// 读取模板文件的所有行
pub fn read_template(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| ScanError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(content.lines().map(str::to_string).collect())
}

/// 将模板中的 `%chk=name.chk` 改写为 `%chk=name_<step>.chk`
///
/// 多个输入文件共用一个检查点文件时，并行运行会互相覆盖。
pub fn rename_checkpoint(template: &[String], step: usize) -> Result<Vec<String>> {
    let pattern = Regex::new(r"(?i)^(\s*%chk\s*=\s*)(\S+?)(\.chk)?\s*$")
        .map_err(|e| ScanError::Other(format!("Invalid checkpoint pattern: {}", e)))?;

    let replacement = format!("${{1}}${{2}}_{}.chk", step);

    Ok(template
        .iter()
        .map(|line| pattern.replace(line, replacement.as_str()).into_owned())
        .collect())
}

/// 生成 .gjf 内容：模板行 + 原子行 + 结尾空行
pub fn to_gjf_string(template: &[String], geometry: &Geometry) -> Result<String> {
    let mut result = String::new();

    // 去掉模板末尾的空行，使坐标紧跟电荷/多重度行
    let end = template
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map(|i| i + 1)
        .unwrap_or(0);

    for line in &template[..end] {
        result.push_str(line);
        result.push('\n');
    }

    for atom in geometry {
        let symbol = elements::symbol(atom.atomic_number)
            .ok_or(ScanError::UnknownElement(atom.atomic_number))?;

        result.push_str(&format!(" {:<2}", symbol));
        for coord in &atom.coordinates {
            result.push_str(&format!(" {:>15.8}", coord));
        }
        result.push('\n');
    }

    // Gaussian 以空行结束分子说明
    result.push('\n');
    Ok(result)
}

/// 写入 .gjf 文件
pub fn write_gjf(path: &Path, template: &[String], geometry: &Geometry) -> Result<()> {
    let content = to_gjf_string(template, geometry)?;

    fs::write(path, content).map_err(|e| ScanError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}
