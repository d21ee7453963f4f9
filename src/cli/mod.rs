//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `xyz`: 列式文本 -> 普通多帧 XYZ
//! - `extxyz`: 列式文本 -> ExtXYZ
//! - `split`: ExtXYZ -> 列式文本
//! - `types`: 类型索引 + type_map -> 物种列
//! - `view`: 逐帧三维散点图
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: generate, split, types, view

pub mod generate;
pub mod split;
pub mod types;
pub mod view;

use clap::{Parser, Subcommand};

/// dpxyz - DeePMD 列式数据与 XYZ / ExtXYZ 轨迹互转工具
#[derive(Parser)]
#[command(name = "dpxyz")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Convert columnar MD trajectory data to and from XYZ / ExtXYZ", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Build a plain multi-frame XYZ file from columnar text files
    Xyz(generate::XyzArgs),

    /// Build an extended XYZ file (forces, box, labels) from columnar text files
    Extxyz(generate::ExtxyzArgs),

    /// Split an extended XYZ file back into columnar text files
    Split(split::SplitArgs),

    /// Expand integer type indices into species names using type_map.raw
    Types(types::TypesArgs),

    /// Render frames of an XYZ / ExtXYZ trajectory as 3D scatter plots
    View(view::ViewArgs),
}
