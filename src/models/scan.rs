//! # 弛豫扫描结果数据模型
//!
//! 扫描元数据、进度标记索引，以及逐步骤的提取结果。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `scan/`, `commands/` 使用
//! - 使用 `models/atom.rs`, `error.rs`

use super::atom::Geometry;
use crate::error::StepError;

use std::collections::BTreeMap;

/// 从日志头部读出的扫描元数据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanMetadata {
    /// 扫描步数 N
    pub steps: usize,

    /// 原子数 M
    pub atoms: usize,
}

/// 步骤编号 -> 该步骤进度标记出现的行号（1 起，升序）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerIndex {
    lines: BTreeMap<usize, Vec<usize>>,
}

impl MarkerIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, step: usize, lines: Vec<usize>) {
        self.lines.insert(step, lines);
    }

    /// 某步骤的全部标记行号；未记录的步骤返回空切片
    pub fn get(&self, step: usize) -> &[usize] {
        self.lines.get(&step).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 某步骤最后一次出现的标记行号
    pub fn last(&self, step: usize) -> Option<usize> {
        self.get(step).last().copied()
    }

    /// 按步骤编号升序遍历
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.lines.iter().map(|(step, lines)| (*step, lines.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// 单个步骤的处理结果
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// 步骤编号（1..N）
    pub step: usize,

    /// 该步骤的全部标记行号
    pub markers: Vec<usize>,

    /// 提取得到的几何结构，或该步骤的错误
    pub outcome: std::result::Result<Geometry, StepError>,
}

impl StepReport {
    pub fn last_marker(&self) -> Option<usize> {
        self.markers.last().copied()
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&StepError> {
        self.outcome.as_ref().err()
    }
}

/// 一次完整扫描的提取结果，下标 i 对应步骤 i+1
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    pub metadata: ScanMetadata,
    pub steps: Vec<StepReport>,
}

impl ScanResult {
    /// 成功提取的 (步骤编号, 几何结构)
    pub fn geometries(&self) -> impl Iterator<Item = (usize, &Geometry)> {
        self.steps
            .iter()
            .filter_map(|r| r.geometry().map(|g| (r.step, g)))
    }

    /// 失败步骤的错误列表
    pub fn failures(&self) -> Vec<&StepError> {
        self.steps.iter().filter_map(StepReport::error).collect()
    }

    pub fn success_count(&self) -> usize {
        self.steps.iter().filter(|r| r.outcome.is_ok()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.steps.iter().all(|r| r.outcome.is_ok())
    }
}
