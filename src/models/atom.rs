//! # 原子与几何结构数据模型
//!
//! 从 Gaussian `Standard orientation` 表中解析出的原子记录，
//! 以及一个扫描步骤的完整几何结构。
//!
//! ## 依赖关系
//! - 被 `parsers/geometry.rs` 创建
//! - 被 `parsers/gjf.rs`, `scan/` 使用
//! - 无外部模块依赖

/// 单个原子记录
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// 原子序数
    pub atomic_number: u32,

    /// 笛卡尔坐标 (Å)，至少 3 个分量，按文件中的列顺序
    pub coordinates: Vec<f64>,
}

impl AtomRecord {
    pub fn new(atomic_number: u32, coordinates: Vec<f64>) -> Self {
        AtomRecord {
            atomic_number,
            coordinates,
        }
    }
}

/// 一个扫描步骤收敛后的几何结构
///
/// 原子数总是等于日志声明的 `NAtoms`，由解析器保证。
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    atoms: Vec<AtomRecord>,
}

impl Geometry {
    pub fn new(atoms: Vec<AtomRecord>) -> Self {
        Geometry { atoms }
    }

    pub fn atoms(&self) -> &[AtomRecord] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AtomRecord> {
        self.atoms.iter()
    }

    /// 计算化学式（Hill 顺序：C、H 在前，其余按符号排序）
    pub fn formula(&self) -> String {
        use std::collections::BTreeMap;
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

        for atom in &self.atoms {
            let symbol = super::elements::symbol(atom.atomic_number).unwrap_or("X");
            *counts.entry(symbol).or_insert(0) += 1;
        }

        let mut parts = Vec::new();
        if counts.contains_key("C") {
            for el in ["C", "H"] {
                if let Some(count) = counts.remove(el) {
                    parts.push((el, count));
                }
            }
        }
        parts.extend(counts);

        parts
            .into_iter()
            .map(|(el, count)| {
                if count == 1 {
                    el.to_string()
                } else {
                    format!("{}{}", el, count)
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

impl<'a> IntoIterator for &'a Geometry {
    type Item = &'a AtomRecord;
    type IntoIter = std::slice::Iter<'a, AtomRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}
