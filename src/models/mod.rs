//! # 数据模型模块
//!
//! 定义原子、几何结构和扫描结果数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `scan/` 和 `commands/` 使用
//! - 子模块: atom, elements, scan

pub mod atom;
pub mod elements;
pub mod scan;

pub use atom::{AtomRecord, Geometry};
pub use scan::{MarkerIndex, ScanMetadata, ScanResult, StepReport};
