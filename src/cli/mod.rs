//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `extract`: 从弛豫扫描日志提取各步骤收敛结构，生成 .gjf 输入文件
//! - `index`: 列出各步骤进度标记所在行号
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: extract, index

pub mod extract;
pub mod index;

use clap::{Parser, Subcommand};

/// gscan - Gaussian 弛豫扫描结构提取工具
#[derive(Parser)]
#[command(name = "gscan")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Extract converged geometries from Gaussian relaxed-scan logs",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Extract each scan step's converged geometry into a new Gaussian input file
    Extract(extract::ExtractArgs),

    /// Show scan metadata and the log lines where each step's progress marker appears
    Index(index::IndexArgs),
}
