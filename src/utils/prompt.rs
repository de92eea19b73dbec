//! # 交互式输入
//!
//! 命令行未给出文件名时，在终端提示用户输入。
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs` 使用
//! - 使用 `console`, `colored` crate

use crate::error::{ScanError, Result};

use colored::Colorize;
use console::Term;
use std::path::PathBuf;

/// 提示输入一个文件路径
pub fn prompt_path(label: &str) -> Result<PathBuf> {
    let term = Term::stdout();

    term.write_str(&format!("{} {}: ", "[?]".cyan().bold(), label))
        .and_then(|_| term.flush())
        .map_err(|e| ScanError::Other(format!("Failed to write prompt: {}", e)))?;

    let answer = term
        .read_line()
        .map_err(|e| ScanError::Other(format!("Failed to read {}: {}", label, e)))?;

    parse_answer(&answer, label)
}

fn parse_answer(answer: &str, label: &str) -> Result<PathBuf> {
    let answer = answer.trim().trim_matches(|c| c == '"' || c == '\'');
    if answer.is_empty() {
        return Err(ScanError::InvalidArgument(format!("{} is required", label)));
    }
    Ok(PathBuf::from(answer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(
            parse_answer("  scan.log \n", "log").unwrap(),
            PathBuf::from("scan.log")
        );
        assert_eq!(
            parse_answer("'my scan.log'", "log").unwrap(),
            PathBuf::from("my scan.log")
        );
        assert!(matches!(
            parse_answer("   ", "template"),
            Err(ScanError::InvalidArgument(_))
        ));
    }
}
