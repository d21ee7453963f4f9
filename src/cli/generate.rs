//! # xyz / extxyz 子命令 CLI 定义
//!
//! 从列式文本文件 (real_atom_types / coord / energy / force / box / 标签)
//! 生成多帧轨迹文件。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/generate.rs`

use super::view::PlotArgs;
use crate::models::PbcMode;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// PBC 输出选项
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum PbcOption {
    /// Use the per-frame box descriptor when available
    Box,
    /// Always write pbc="F F F"
    #[default]
    Fff,
}

impl From<PbcOption> for PbcMode {
    fn from(option: PbcOption) -> Self {
        match option {
            PbcOption::Box => PbcMode::Box,
            PbcOption::Fff => PbcMode::Fff,
        }
    }
}

impl std::fmt::Display for PbcOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PbcOption::Box => write!(f, "box"),
            PbcOption::Fff => write!(f, "fff"),
        }
    }
}

/// 两种生成命令共用的必需输入
#[derive(Args, Debug)]
pub struct CoreInputs {
    /// Per-frame atom types (real_atom_types.npy.txt)
    #[arg(short, long)]
    pub atom_types: PathBuf,

    /// Per-frame coordinates, 3 values per atom (coord.npy.txt)
    #[arg(short, long)]
    pub coord: PathBuf,

    /// Per-frame energies, first token used (energy.npy.txt)
    #[arg(short, long)]
    pub energy: PathBuf,

    /// Output trajectory file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Overwrite an existing output file
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}

/// xyz 子命令参数
#[derive(Args, Debug)]
pub struct XyzArgs {
    #[command(flatten)]
    pub inputs: CoreInputs,

    #[command(flatten)]
    pub plot: PlotArgs,
}

/// extxyz 子命令参数
#[derive(Args, Debug)]
pub struct ExtxyzArgs {
    #[command(flatten)]
    pub inputs: CoreInputs,

    /// Per-frame forces, 3 values per atom (force.npy.txt)
    #[arg(short, long)]
    pub force: Option<PathBuf>,

    /// Per-frame box / PBC descriptor (box.npy.txt)
    #[arg(short, long = "box")]
    pub box_file: Option<PathBuf>,

    /// Label file, one value per frame; the file stem becomes the label name (repeatable)
    #[arg(short, long = "label")]
    pub labels: Vec<PathBuf>,

    /// Directory to collect additional label files from
    #[arg(long)]
    pub label_dir: Option<PathBuf>,

    /// Glob pattern(s) for --label-dir, comma separated
    #[arg(long, default_value = "*.txt")]
    pub label_pattern: String,

    /// Recurse into subdirectories of --label-dir
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// How the pbc field is written
    #[arg(long, value_enum, default_value_t = PbcOption::Fff)]
    pub pbc: PbcOption,

    #[command(flatten)]
    pub plot: PlotArgs,
}
