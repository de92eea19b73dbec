//! # 解析器模块
//!
//! Gaussian 弛豫扫描日志的解析，以及 .gjf 输入文件的生成。
//!
//! ## 依赖关系
//! - 被 `scan/` 和 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: log, metadata, marker, geometry, gjf

pub mod geometry;
pub mod gjf;
pub mod log;
pub mod marker;
pub mod metadata;

pub use log::ScanLog;
