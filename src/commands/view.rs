//! # view 命令实现
//!
//! 读取 XYZ / ExtXYZ 轨迹，逐帧渲染三维散点图，可选导出投影坐标 CSV。
//! `render_projections` 同时被 xyz / extxyz 的 `--plot-dir` 复用。
//!
//! ## 依赖关系
//! - 使用 `cli/view.rs` 定义的参数
//! - 使用 `parsers/extxyz.rs`
//! - 使用 `plot/`, `batch/runner.rs`

use crate::batch::{BatchRunner, ProcessResult};
use crate::cli::view::{ImageFormat, PlotArgs, ViewArgs};
use crate::error::{Result, XyzError};
use crate::models::FrameProjection;
use crate::parsers::extxyz::{parse_extxyz_file, to_projections};
use crate::plot::{render_frame, PlotOptions};
use crate::utils::output;

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_PLOT_DIR: &str = "frames";

/// CSV 中的一行
#[derive(Debug, Serialize)]
struct ProjectionRow<'a> {
    frame: usize,
    atom: usize,
    species: &'a str,
    x: f64,
    y: f64,
    z: f64,
}

/// 执行 view 命令
pub fn execute(args: ViewArgs) -> Result<()> {
    output::print_header("Rendering trajectory frames");

    if !args.input.exists() {
        return Err(XyzError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let parsed = parse_extxyz_file(&args.input)?;
    let projections = to_projections(&parsed)?;
    output::print_info(&format!(
        "Loaded {} frame(s), {} atom(s) from '{}'",
        projections.len(),
        projections.iter().map(|p| p.atom_labels.len()).sum::<usize>(),
        args.input.display()
    ));

    let mut plot = args.plot;
    if plot.plot_dir.is_none() && plot.export_csv.is_none() {
        plot.plot_dir = Some(PathBuf::from(DEFAULT_PLOT_DIR));
    }

    render_projections(&projections, &plot)
}

/// 按 `PlotArgs` 渲染选中的帧并导出 CSV
pub fn render_projections(projections: &[FrameProjection], plot: &PlotArgs) -> Result<()> {
    let selected = select_frames(projections, plot.frames.as_deref())?;

    if let Some(csv_path) = &plot.export_csv {
        export_csv(&selected, csv_path)?;
        output::print_success(&format!(
            "Exported {} frame(s) to '{}'",
            selected.len(),
            csv_path.display()
        ));
    }

    let Some(dir) = &plot.plot_dir else {
        return Ok(());
    };

    fs::create_dir_all(dir).map_err(|e| XyzError::FileWriteError {
        path: dir.display().to_string(),
        source: e,
    })?;

    let options = PlotOptions {
        width: plot.width,
        height: plot.height,
        use_svg: plot.format == ImageFormat::Svg,
        ..PlotOptions::default()
    };

    let runner = BatchRunner::new(plot.jobs);
    output::print_info(&format!(
        "Rendering {} frame(s) as {} with {} job(s)",
        selected.len(),
        plot.format,
        runner.jobs()
    ));

    let mut result = runner.run(&selected, "Rendering", |projection| {
        let name = format!("frame_{}.{}", projection.frame_index, plot.format);
        if projection.atom_labels.is_empty() {
            return ProcessResult::Skipped(name);
        }
        match render_frame(projection, &dir.join(&name), options) {
            Ok(()) => ProcessResult::Success(name),
            Err(e) => ProcessResult::Failed(name, e.to_string()),
        }
    })?;

    if !result.skipped.is_empty() {
        result.skipped.sort();
        output::print_info(&format!(
            "Skipped {} empty frame(s): {}",
            result.skipped.len(),
            result.skipped.join(", ")
        ));
    }
    for (item, err) in &result.failures {
        output::print_warning(&format!("{}: {}", item, err));
    }
    if !result.failures.is_empty() {
        return Err(XyzError::PlotError(format!(
            "{} of {} frame(s) failed to render",
            result.failures.len(),
            result.total()
        )));
    }

    output::print_done(&format!(
        "Rendered {} frame(s) into '{}'",
        result.outputs.len(),
        dir.display()
    ));
    Ok(())
}

/// 应用 `--frames` 选择
fn select_frames<'a>(
    projections: &'a [FrameProjection],
    expr: Option<&str>,
) -> Result<Vec<&'a FrameProjection>> {
    let Some(expr) = expr else {
        return Ok(projections.iter().collect());
    };

    let indices = parse_frame_selection(expr)?;
    if indices.is_empty() {
        return Err(XyzError::InvalidRange(expr.to_string()));
    }

    indices
        .into_iter()
        .map(|i| {
            projections.get(i).ok_or_else(|| {
                XyzError::InvalidRange(format!(
                    "frame {} (trajectory has {} frame(s))",
                    i,
                    projections.len()
                ))
            })
        })
        .collect()
}

/// 解析帧选择表达式 (0-based)
///
/// 支持 "0,2,5-9" 这样的逗号分隔列表，结果排序去重
pub fn parse_frame_selection(expr: &str) -> Result<Vec<usize>> {
    let mut items = Vec::new();

    for chunk in expr.split(',') {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }

        let parse = |s: &str| {
            s.trim()
                .parse::<usize>()
                .map_err(|_| XyzError::InvalidRange(chunk.to_string()))
        };

        match chunk.split_once('-') {
            Some((a, b)) => {
                let (a, b) = (parse(a)?, parse(b)?);
                if b < a {
                    return Err(XyzError::InvalidRange(chunk.to_string()));
                }
                items.extend(a..=b);
            }
            None => items.push(parse(chunk)?),
        }
    }

    items.sort_unstable();
    items.dedup();
    Ok(items)
}

/// 导出投影坐标为 CSV
fn export_csv(projections: &[&FrameProjection], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    for projection in projections {
        for (atom, (species, &(x, y, z))) in projection
            .atom_labels
            .iter()
            .zip(&projection.coords)
            .enumerate()
        {
            wtr.serialize(ProjectionRow {
                frame: projection.frame_index,
                atom,
                species: species.as_str(),
                x,
                y,
                z,
            })?;
        }
    }

    wtr.flush().map_err(|e| XyzError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::{build, project};
    use crate::frames::fixtures::water_columns;
    use crate::utils::workspace::Workspace;

    fn csv_only(path: PathBuf, frames: Option<&str>) -> PlotArgs {
        PlotArgs {
            plot_dir: None,
            frames: frames.map(str::to_string),
            format: ImageFormat::Png,
            width: 900,
            height: 800,
            jobs: 1,
            export_csv: Some(path),
        }
    }

    #[test]
    fn test_parse_frame_selection() {
        assert_eq!(parse_frame_selection("0,2,5-7").unwrap(), vec![0, 2, 5, 6, 7]);
        assert_eq!(parse_frame_selection("3, 1, 1-2").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_frame_selection("4").unwrap(), vec![4]);
        assert!(parse_frame_selection("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_frame_selection_errors() {
        assert!(matches!(
            parse_frame_selection("5-2"),
            Err(XyzError::InvalidRange(_))
        ));
        assert!(matches!(
            parse_frame_selection("a"),
            Err(XyzError::InvalidRange(_))
        ));
        assert!(matches!(
            parse_frame_selection("-1"),
            Err(XyzError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_selection_outside_trajectory() {
        let projections = project(&build(water_columns()).unwrap());
        assert_eq!(select_frames(&projections, None).unwrap().len(), 2);
        assert_eq!(select_frames(&projections, Some("1")).unwrap()[0].frame_index, 1);
        assert!(matches!(
            select_frames(&projections, Some("0-2")),
            Err(XyzError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_export_csv() {
        let ws = Workspace::create("dpxyz-test").unwrap();
        let projections = project(&build(water_columns()).unwrap());
        let path = ws.join("frames.csv");

        render_projections(&projections, &csv_only(path.clone(), Some("1"))).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "frame,atom,species,x,y,z");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "1,2,O,-0.24,0.93,0.0");
    }

    #[test]
    fn test_view_reads_plain_xyz() {
        let ws = Workspace::create("dpxyz-test").unwrap();
        let input = ws
            .write("traj.xyz", "     1\n i = 0, E = -1.0\nH 1.0 2.0 3.0\n")
            .unwrap();
        let path = ws.join("out.csv");

        execute(ViewArgs {
            input,
            plot: csv_only(path.clone(), None),
        })
        .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().nth(1), Some("0,0,H,1.0,2.0,3.0"));
    }

    #[test]
    fn test_view_reads_free_text_comment() {
        let ws = Workspace::create("dpxyz-test").unwrap();
        let input = ws
            .write("water.xyz", "3\nwater molecule\nO 0.0 0.0 0.0\nH 0.96 0.0 0.0\nH -0.24 0.93 0.0\n")
            .unwrap();
        let path = ws.join("water.csv");

        execute(ViewArgs {
            input,
            plot: csv_only(path.clone(), None),
        })
        .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert_eq!(text.lines().nth(3), Some("0,2,H,-0.24,0.93,0.0"));
    }
}
