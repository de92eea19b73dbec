//! # Gaussian 日志内存缓冲
//!
//! 将扫描日志一次性读入内存，按行保存。元数据读取、标记索引和几何提取
//! 都借用同一个只读缓冲，避免每个步骤重新打开文件。
//!
//! ## 依赖关系
//! - 被 `parsers/metadata.rs`, `parsers/marker.rs`, `parsers/geometry.rs` 使用
//! - 被 `scan/pipeline.rs` 创建

use crate::error::{ScanError, Result};
use std::fs;
use std::path::Path;

/// 只读的日志行缓冲
#[derive(Debug, Clone)]
pub struct ScanLog {
    /// 日志名称（通常为文件名）
    name: String,

    /// 所有行，不含换行符；下标 i 对应第 i+1 行
    lines: Vec<String>,
}

impl ScanLog {
    /// 读取日志文件（非 UTF-8 字节按替换字符处理）
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| ScanError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let content = String::from_utf8_lossy(&bytes);
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("log");

        Ok(Self::from_content(&content, name))
    }

    /// 从字符串内容构造
    pub fn from_content(content: &str, name: &str) -> Self {
        ScanLog {
            name: name.to_string(),
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// 按 1 起的行号取行
    pub fn line(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(String::as_str)
    }

    /// 按空白切分的全部词元，跨行连续
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().flat_map(|l| l.split_whitespace())
    }
}
