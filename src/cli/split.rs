//! # split 子命令 CLI 定义
//!
//! 把 ExtXYZ 拆回列式文本文件
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/split.rs`

use clap::Args;
use std::path::PathBuf;

/// split 子命令参数
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Input .extxyz file
    pub input: PathBuf,

    /// Output directory for the columnar files
    #[arg(short, long, default_value = "split_output")]
    pub output: PathBuf,

    /// Write a line for every frame in label/box files (None / F F F when absent)
    #[arg(long, default_value_t = false)]
    pub pad_missing: bool,

    /// Overwrite existing files in the output directory
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
