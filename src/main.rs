//! # gscan - Gaussian 弛豫扫描结构提取工具
//!
//! 从 Gaussian 弛豫扫描 (opt=modredundant) 的输出日志中，取出每个扫描点
//! 收敛后的 `Standard orientation` 结构，按用户模板生成新的输入文件。
//!
//! ## 子命令
//! - `extract` - 提取各步骤结构并写出 .gjf 输入文件（单文件或批量）
//! - `index`   - 查看扫描元数据与各步骤进度标记所在行号
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── scan/      (提取流水线与报告)
//!   │     ├── batch/     (批量处理)
//!   │     ├── parsers/   (日志解析与 .gjf 生成)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod scan;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
