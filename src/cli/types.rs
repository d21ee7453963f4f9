//! # types 子命令 CLI 定义
//!
//! 用 type_map.raw 把整数类型索引翻译成物种名
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/types.rs`

use clap::{ArgGroup, Args};
use std::path::PathBuf;

/// types 子命令参数
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["indices", "type_file"])))]
pub struct TypesArgs {
    /// type_map.raw: one species name per line, line number = type index
    #[arg(long)]
    pub type_map: PathBuf,

    /// Per-frame rows of type indices (e.g. real_atom_types.npy.txt with numbers)
    #[arg(long)]
    pub indices: Option<PathBuf>,

    /// type.raw: one type index per atom, shared by every frame
    #[arg(long = "type")]
    pub type_file: Option<PathBuf>,

    /// Number of frames to emit with --type
    #[arg(long, conflicts_with = "energy")]
    pub frames: Option<usize>,

    /// Take the frame count from this energy file (non-blank lines) with --type
    #[arg(long)]
    pub energy: Option<PathBuf>,

    /// Output file
    #[arg(short, long, default_value = "real_atom_types.npy.txt")]
    pub output: PathBuf,

    /// Overwrite an existing output file
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
