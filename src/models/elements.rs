//! # 元素周期表
//!
//! 原子序数到元素符号的映射（Z = 1..118）。
//!
//! ## 依赖关系
//! - 被 `models/atom.rs`, `parsers/gjf.rs` 使用
//! - 无外部模块依赖

const SYMBOLS: [&str; 118] = [
    "H", "He", // 1-2
    "Li", "Be", "B", "C", "N", "O", "F", "Ne", // 3-10
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", // 11-18
    "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se",
    "Br", "Kr", // 19-36
    "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", "Sb", "Te",
    "I", "Xe", // 37-54
    "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb",
    "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At",
    "Rn", // 55-86
    "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", "Md", "No",
    "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts",
    "Og", // 87-118
];

/// 原子序数 -> 元素符号
pub fn symbol(atomic_number: u32) -> Option<&'static str> {
    match atomic_number {
        0 => None,
        z => SYMBOLS.get(z as usize - 1).copied(),
    }
}
