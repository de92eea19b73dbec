//! # 扫描进度标记索引
//!
//! Gaussian 在每个优化子迭代中输出 `scan point     i out of     N`，
//! 其中 N 右对齐在 6 字符宽的字段中。某步骤最后一次出现该标记之后的
//! 第一个 `Standard orientation` 块即为该步骤的收敛结构。
//!
//! ## 依赖关系
//! - 被 `scan/pipeline.rs`, `commands/index.rs` 使用
//! - 使用 `parsers/log.rs`, `models/scan.rs`

use super::log::ScanLog;
use crate::models::MarkerIndex;

/// 日志中步数字段的宽度
pub const MARKER_FIELD_WIDTH: usize = 6;

/// 构造步骤 `step` 的标记文本，例如 N=6 时步骤 2 为 `" 2 out of     6"`
pub fn marker_needle(step: usize, total: usize) -> String {
    format!(
        " {} out of{:>width$}",
        step,
        total,
        width = MARKER_FIELD_WIDTH
    )
}

/// 查找某步骤标记出现的所有行号（1 起，升序）
///
/// 每次调用都完整扫描一遍日志；没有匹配时返回空列表。
pub fn find_marker_lines(log: &ScanLog, step: usize, total: usize) -> Vec<usize> {
    let needle = marker_needle(step, total);

    log.lines()
        .iter()
        .enumerate()
        .filter(|(_, line)| line.contains(&needle))
        .map(|(i, _)| i + 1)
        .collect()
}

/// 为步骤 1..=total 构建完整标记索引
pub fn build_marker_index(log: &ScanLog, total: usize) -> MarkerIndex {
    let mut index = MarkerIndex::new();
    for step in 1..=total {
        index.insert(step, find_marker_lines(log, step, total));
    }
    index
}
