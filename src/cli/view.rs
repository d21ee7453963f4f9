//! # view 子命令 CLI 定义
//!
//! 逐帧渲染三维散点图；`PlotArgs` 也被 xyz / extxyz 复用
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs`, `cli/generate.rs` 使用
//! - 参数传递给 `commands/view.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 图像输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// PNG image
    #[default]
    Png,
    /// SVG vector image
    Svg,
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFormat::Png => write!(f, "png"),
            ImageFormat::Svg => write!(f, "svg"),
        }
    }
}

/// 绘图参数
#[derive(Args, Debug, Clone)]
pub struct PlotArgs {
    /// Render frame images into this directory
    #[arg(long)]
    pub plot_dir: Option<PathBuf>,

    /// Frames to render, 0-based (e.g. '0,2,5-9'); default all
    #[arg(long)]
    pub frames: Option<String>,

    /// Image format
    #[arg(long, value_enum, default_value_t = ImageFormat::Png)]
    pub format: ImageFormat,

    /// Image width in pixels
    #[arg(long, default_value_t = 900)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Number of parallel render jobs (0 = auto)
    #[arg(short, long, default_value_t = 0, env = "DPXYZ_JOBS")]
    pub jobs: usize,

    /// Also write the projected coordinates of the selected frames as CSV
    #[arg(long)]
    pub export_csv: Option<PathBuf>,
}

/// view 子命令参数
#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Input .xyz / .extxyz trajectory
    pub input: PathBuf,

    #[command(flatten)]
    pub plot: PlotArgs,
}
