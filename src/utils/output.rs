//! # 美化输出工具
//!
//! 提供统一的终端输出样式，以及失败步骤的汇总打印。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块使用
//! - 使用 `colored` crate

use crate::error::StepError;
use colored::Colorize;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印跳过消息
pub fn print_skip(msg: &str) {
    println!("{} {}", "[SKIP]".dimmed(), msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}

/// 打印失败步骤汇总（最多 `limit` 条）
pub fn print_step_failures(failures: &[&StepError], limit: usize) {
    if failures.is_empty() {
        return;
    }

    let steps: Vec<String> = failures.iter().map(|e| e.step().to_string()).collect();
    print_warning(&format!(
        "{} step(s) without a geometry: {}",
        failures.len(),
        steps.join(", ")
    ));

    for err in failures.iter().take(limit) {
        eprintln!("  {} {}", format!("[{}]", err.kind()).red(), err);
    }
    if failures.len() > limit {
        print_warning(&format!("  ... and {} more", failures.len() - limit));
    }
}
