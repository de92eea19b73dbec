//! # extract 子命令 CLI 定义
//!
//! 从弛豫扫描日志提取收敛结构并生成 .gjf 输入文件
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/extract.rs`

use clap::Args;
use std::path::PathBuf;

/// extract 子命令参数
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Gaussian scan log, or a directory of logs (batch mode); prompted for if omitted
    pub input: Option<PathBuf>,

    /// Input file template (Link 0, route, title, charge/multiplicity); prompted for if omitted
    #[arg(short, long, env = "GSCAN_TEMPLATE")]
    pub template: Option<PathBuf>,

    /// Output directory for generated input files
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// File name prefix; step N is written to <prefix>N.<ext>
    #[arg(long, default_value = "in")]
    pub prefix: String,

    /// File extension for generated input files
    #[arg(long, default_value = "gjf")]
    pub ext: String,

    /// Rewrite the template's %chk line to a per-step checkpoint name
    #[arg(long, default_value_t = false)]
    pub rename_chk: bool,

    /// Write a CSV report of every step's outcome
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Fail with a non-zero exit status if any step could not be extracted
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    // ─────────────────────────────────────────────────────────────
    // 批量处理参数
    // ─────────────────────────────────────────────────────────────
    /// Glob pattern for log files (batch mode, e.g., "*.log,*.out")
    #[arg(long, default_value = "*.log,*.out")]
    pub pattern: String,

    /// Recurse into subdirectories (batch mode)
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0, env = "GSCAN_JOBS")]
    pub jobs: usize,
}
