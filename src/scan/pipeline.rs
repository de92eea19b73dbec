//! # 扫描提取流水线
//!
//! 串联元数据读取、标记索引和几何提取，为每个扫描步骤生成一个结果。
//!
//! ## 流程
//! 1. 日志一次性读入 `ScanLog`
//! 2. 读取步数 N 和原子数 M（失败则整体中止）
//! 3. 对每个步骤 1..N：查找标记行 → 取最后一行 → 提取几何结构
//! 4. 按步骤顺序汇总为 `ScanResult`
//!
//! 各步骤只读共享的日志缓冲并写入各自的结果槽，可用 rayon 并行执行。
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs`, `commands/index.rs` 调用
//! - 使用 `parsers/` 和 `models/`
//! - 使用 `rayon` 进行并行计算

use crate::error::{ScanError, StepError, Result};
use crate::models::{ScanMetadata, ScanResult, StepReport};
use crate::parsers::{geometry, marker, metadata, ScanLog};

use rayon::prelude::*;
use std::path::Path;

/// 扫描提取流水线
pub struct ScanPipeline {
    /// 并行作业数（1 = 顺序执行）
    jobs: usize,
}

impl ScanPipeline {
    /// 创建流水线，`jobs` 为 0 时使用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    /// 读取日志文件并运行
    pub fn run_file(&self, path: &Path) -> Result<ScanResult> {
        let log = ScanLog::read(path)?;
        self.run(&log)
    }

    /// 对已加载的日志运行完整流水线
    pub fn run(&self, log: &ScanLog) -> Result<ScanResult> {
        let metadata = metadata::read_metadata(log)?;

        let steps: Vec<StepReport> = if self.jobs <= 1 {
            (1..=metadata.steps)
                .map(|step| process_step(log, step, metadata))
                .collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.jobs)
                .build()
                .map_err(|e| ScanError::Other(format!("Failed to build thread pool: {}", e)))?;

            pool.install(|| {
                (1..=metadata.steps)
                    .into_par_iter()
                    .map(|step| process_step(log, step, metadata))
                    .collect()
            })
        };

        Ok(ScanResult { metadata, steps })
    }
}

/// 处理单个扫描步骤
pub fn process_step(log: &ScanLog, step: usize, metadata: ScanMetadata) -> StepReport {
    let markers = marker::find_marker_lines(log, step, metadata.steps);

    let outcome = match markers.last() {
        Some(&last) => geometry::extract_geometry(log, step, last, metadata.atoms),
        None => Err(StepError::NotFound { step }),
    };

    StepReport {
        step,
        markers,
        outcome,
    }
}
