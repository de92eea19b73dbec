//! # 扫描处理模块
//!
//! 弛豫扫描的提取流水线和结果导出。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `parsers/`, `models/`
//! - 子模块: pipeline, export

pub mod export;
pub mod pipeline;

pub use export::ReportRow;
pub use pipeline::ScanPipeline;
