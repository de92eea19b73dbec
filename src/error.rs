//! # 统一错误处理模块
//!
//! 定义 gscan 的所有错误类型，使用 `thiserror` 派生。
//!
//! - `ScanError`: 整体错误（I/O、元数据、参数等），通过 `?` 向上传播
//! - `StepError`: 单个扫描步骤的错误，收集在扫描结果中，不中断其他步骤
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// gscan 统一错误类型
#[derive(Error, Debug)]
pub enum ScanError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 日志元数据错误（对整个日志是致命的）
    // ─────────────────────────────────────────────────────────────
    #[error("Scan metadata not found: {what}")]
    MetadataNotFound { what: String },

    #[error("Failed to parse scan metadata ({what}): '{value}'")]
    MetadataParse { what: String, value: String },

    // ─────────────────────────────────────────────────────────────
    // 步骤错误（严格模式下提升为致命错误）
    // ─────────────────────────────────────────────────────────────
    #[error(transparent)]
    Step(#[from] StepError),

    // ─────────────────────────────────────────────────────────────
    // 输出错误
    // ─────────────────────────────────────────────────────────────
    #[error("No element symbol for atomic number {0}")]
    UnknownElement(u32),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// 单个扫描步骤的错误
///
/// 只影响对应步骤：该步骤不产生几何结构，其余步骤照常处理。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    /// 日志中从未出现该步骤的进度标记
    #[error("step {step}: progress marker not found in log")]
    NotFound { step: usize },

    /// 找到标记之后，几何块缺失或无法解析
    #[error("step {step}: line {line}: {reason}")]
    Format {
        step: usize,
        line: usize,
        reason: String,
    },
}

impl StepError {
    /// 出错的步骤编号
    pub fn step(&self) -> usize {
        match self {
            StepError::NotFound { step } => *step,
            StepError::Format { step, .. } => *step,
        }
    }

    /// 简短的错误类别，用于表格和报告
    pub fn kind(&self) -> &'static str {
        match self {
            StepError::NotFound { .. } => "not found",
            StepError::Format { .. } => "format error",
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ScanError>;
