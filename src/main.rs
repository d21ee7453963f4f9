//! # dpxyz - DeePMD 列式数据与 XYZ / ExtXYZ 轨迹互转工具
//!
//! 把按帧逐行存放的列式文本 (real_atom_types / coord / energy / force / box /
//! 标签) 组装为多帧 XYZ / ExtXYZ 轨迹，或把 ExtXYZ 拆回列式文本。
//!
//! ## 子命令
//! - `xyz`    - 列式文本 -> 普通多帧 XYZ
//! - `extxyz` - 列式文本 -> ExtXYZ (受力 / 盒子 / 标签)
//! - `split`  - ExtXYZ -> 列式文本
//! - `types`  - 类型索引 + type_map -> 物种列
//! - `view`   - 逐帧三维散点图
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (列式文本 / XYZ / ExtXYZ 读写)
//!   │     ├── frames/    (校验、组装、投影、类型展开)
//!   │     ├── plot/      (散点图渲染)
//!   │     ├── batch/     (并行渲染、标签文件收集)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (终端输出、进度条、临时目录)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod frames;
mod models;
mod parsers;
mod plot;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
