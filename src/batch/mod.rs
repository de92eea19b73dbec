//! # 批量处理模块
//!
//! 对目录中的多个扫描日志统一处理。
//!
//! ## 功能
//! - 自动检测输入类型（文件/目录）
//! - 收集匹配的日志文件
//! - 并行处理
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchResult, BatchRunner, ProcessResult};
