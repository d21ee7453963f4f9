//! # types 命令实现
//!
//! 用 type_map 把整数类型索引翻译为物种名，写出 `real_atom_types` 列文件。
//!
//! ## 依赖关系
//! - 使用 `cli/types.rs` 定义的参数
//! - 使用 `frames/types.rs`, `parsers/columns.rs`

use crate::cli::types::TypesArgs;
use crate::commands::{ensure_writable, write_output};
use crate::error::{Result, XyzError};
use crate::frames::types::{expand_per_atom, map_rows, parse_type_map, render_rows};
use crate::parsers::columns::read_columns;
use crate::utils::output;

use std::fs;
use std::path::Path;

/// 执行 types 命令
pub fn execute(args: TypesArgs) -> Result<()> {
    output::print_header("Expanding atom types");
    ensure_writable(&args.output, args.overwrite)?;

    let type_map = parse_type_map(
        &read_text(&args.type_map)?,
        &args.type_map.display().to_string(),
    )?;
    if type_map.is_empty() {
        return Err(XyzError::ParseError {
            format: "type_map".to_string(),
            path: args.type_map.display().to_string(),
            reason: "no species names found".to_string(),
        });
    }
    output::print_info(&format!(
        "type_map: {} species ({})",
        type_map.len(),
        type_map.join(", ")
    ));

    let rows = match (&args.indices, &args.type_file) {
        (Some(path), _) => {
            let outcome = read_columns(path)?;
            output::print_warnings(&outcome.warnings);
            map_rows(&type_map, &outcome.value, &path.display().to_string())?
        }
        (None, Some(path)) => {
            let per_atom: Vec<String> = read_text(path)?
                .split_whitespace()
                .map(str::to_string)
                .collect();
            let num_frames = frame_count(&args)?;
            expand_per_atom(&type_map, &per_atom, num_frames, &path.display().to_string())?
        }
        (None, None) => {
            return Err(XyzError::InvalidArgument(
                "either --indices or --type is required".to_string(),
            ))
        }
    };

    write_output(&args.output, &render_rows(&rows))?;
    output::print_done(&format!(
        "Wrote {} frame(s) to '{}'",
        rows.len(),
        args.output.display()
    ));
    Ok(())
}

/// `--type` 模式下的帧数：`--frames` 或能量文件的非空行数
fn frame_count(args: &TypesArgs) -> Result<usize> {
    if let Some(n) = args.frames {
        return Ok(n);
    }
    match &args.energy {
        Some(path) => Ok(read_text(path)?
            .lines()
            .filter(|l| !l.trim().is_empty())
            .count()),
        None => Err(XyzError::InvalidArgument(
            "--type needs --frames or --energy to know how many frames to emit".to_string(),
        )),
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| XyzError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}
