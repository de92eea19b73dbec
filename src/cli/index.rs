//! # index 子命令 CLI 定义
//!
//! 列出扫描元数据与各步骤进度标记所在行号
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/index.rs`

use clap::Args;
use std::path::PathBuf;

/// index 子命令参数
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Gaussian scan log
    pub log: PathBuf,

    /// Print every marker line number, not only the first and last
    #[arg(short, long, default_value_t = false)]
    pub lines: bool,
}
