//! # index 命令实现
//!
//! 打印扫描元数据，以及每个步骤的进度标记在日志中出现的行号。
//! 同时统计每个步骤最后一个标记之后（下一步骤第一个标记之前）的
//! `Standard orientation` 块数，便于发现需要人工确认的日志。
//!
//! ## 依赖关系
//! - 使用 `cli/index.rs` 定义的参数
//! - 使用 `parsers/log.rs`, `parsers/metadata.rs`, `parsers/marker.rs`, `parsers/geometry.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::index::IndexArgs;
use crate::error::{ScanError, Result};
use crate::models::{MarkerIndex, ScanMetadata};
use crate::parsers::{geometry, marker, metadata, ScanLog};
use crate::utils::{output, progress};

use tabled::{Table, Tabled};

/// 标记表中的一行
#[derive(Debug, Clone, PartialEq, Tabled)]
struct IndexRow {
    #[tabled(rename = "Step")]
    step: usize,
    #[tabled(rename = "Markers")]
    markers: usize,
    #[tabled(rename = "First line")]
    first: String,
    #[tabled(rename = "Last line")]
    last: String,
    #[tabled(rename = "Orientation blocks")]
    blocks: usize,
}

/// 执行 index 命令
pub fn execute(args: IndexArgs) -> Result<()> {
    output::print_header("Scan Log Index");

    if !args.log.is_file() {
        return Err(ScanError::FileNotFound {
            path: args.log.display().to_string(),
        });
    }

    let spinner = progress::create_spinner("Indexing scan log");
    let indexed = ScanLog::read(&args.log).and_then(|log| {
        let meta = metadata::read_metadata(&log)?;
        let markers = marker::build_marker_index(&log, meta.steps);
        Ok((log, meta, markers))
    });
    spinner.finish_and_clear();
    let (log, meta, markers) = indexed?;

    output::print_info(&format!(
        "'{}': {} lines, {} scan steps, {} atoms",
        log.name(),
        log.line_count(),
        meta.steps,
        meta.atoms
    ));

    let rows = index_rows(&log, &meta, &markers);

    println!("{}", Table::new(&rows));

    if args.lines {
        output::print_header("Marker Lines");
        for (step, lines) in markers.iter() {
            println!("Instances of {} out of {}: {:?}", step, meta.steps, lines);
        }
    }

    let missing: Vec<usize> = rows.iter().filter(|r| r.markers == 0).map(|r| r.step).collect();
    if !missing.is_empty() {
        output::print_warning(&format!(
            "{} of {} steps have no progress marker: {:?}",
            missing.len(),
            markers.len(),
            missing
        ));
    }

    for row in rows.iter().filter(|r| r.blocks > 1) {
        output::print_warning(&format!(
            "step {}: {} orientation blocks after the last marker, the first one is extracted",
            row.step, row.blocks
        ));
    }

    for row in rows.iter().filter(|r| r.markers > 0 && r.blocks == 0) {
        output::print_warning(&format!(
            "step {}: no orientation block before the next step begins",
            row.step
        ));
    }

    Ok(())
}

/// 为每个步骤生成一行统计
fn index_rows(log: &ScanLog, meta: &ScanMetadata, markers: &MarkerIndex) -> Vec<IndexRow> {
    (1..=meta.steps)
        .map(|step| {
            let lines = markers.get(step);
            let blocks = match lines.last() {
                Some(&last) => {
                    // 其他步骤中紧随其后的第一个标记
                    let next = markers
                        .iter()
                        .filter(|(s, _)| *s != step)
                        .flat_map(|(_, l)| l.iter().copied())
                        .filter(|&n| n > last)
                        .min();
                    geometry::count_orientation_blocks(log, last, next)
                }
                None => 0,
            };

            IndexRow {
                step,
                markers: lines.len(),
                first: lines
                    .first()
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                last: lines
                    .last()
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                blocks,
            }
        })
        .collect()
}
