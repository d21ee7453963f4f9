//! # split 命令实现
//!
//! ExtXYZ -> 列式文本文件。所有文件先写入临时工作目录，全部成功后
//! 才移动到输出目录；解析失败时输出目录保持不变。
//!
//! ## 依赖关系
//! - 使用 `cli/split.rs` 定义的参数
//! - 使用 `parsers/extxyz.rs`
//! - 使用 `utils/workspace.rs`, `utils/output.rs`

use crate::cli::split::SplitArgs;
use crate::error::{Result, XyzError};
use crate::parsers::extxyz::{parse_extxyz_file, split_columns, ColumnStream, SplitOptions};
use crate::utils::output;
use crate::utils::workspace::Workspace;

use std::path::Path;
use tabled::{Table, Tabled};

/// 输出文件摘要行
#[derive(Debug, Clone, Tabled)]
struct StreamRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Lines")]
    lines: usize,
}

/// 执行 split 命令
pub fn execute(args: SplitArgs) -> Result<()> {
    output::print_header("Splitting ExtXYZ trajectory");

    if !args.input.exists() {
        return Err(XyzError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let frames = parse_extxyz_file(&args.input)?;
    output::print_info(&format!(
        "Parsed {} frame(s) from '{}'",
        frames.len(),
        args.input.display()
    ));

    let outcome = split_columns(
        &frames,
        SplitOptions {
            pad_missing: args.pad_missing,
        },
    );
    let streams = outcome.value;

    if !args.overwrite {
        check_existing(&streams, &args.output)?;
    }

    let names = stage_and_publish(&streams, &args.output)?;

    let rows: Vec<StreamRow> = streams
        .iter()
        .map(|s| StreamRow {
            file: s.file_name.clone(),
            lines: s.lines.len(),
        })
        .collect();
    println!("{}\n", Table::new(rows));

    output::print_warnings(&outcome.warnings);
    output::print_done(&format!(
        "Wrote {} file(s) to '{}'",
        names.len(),
        args.output.display()
    ));
    Ok(())
}

/// 写入临时目录后整体发布
fn stage_and_publish(streams: &[ColumnStream], dest: &Path) -> Result<Vec<String>> {
    let workspace = Workspace::create("dpxyz-split")?;

    let mut names = Vec::with_capacity(streams.len());
    for stream in streams {
        workspace.write(&stream.file_name, &stream.render())?;
        names.push(stream.file_name.clone());
    }

    workspace.publish(&names, dest)?;
    Ok(names)
}

fn check_existing(streams: &[ColumnStream], dest: &Path) -> Result<()> {
    for stream in streams {
        let target = dest.join(&stream.file_name);
        if target.exists() {
            return Err(XyzError::OutputExists {
                path: target.display().to_string(),
            });
        }
    }
    Ok(())
}
