//! # xyz / extxyz 命令实现
//!
//! 读取列式文本 -> 一致性校验 -> 序列化 -> 写出轨迹文件，并可选逐帧出图。
//!
//! ## 功能
//! - 普通多帧 XYZ
//! - ExtXYZ（受力、盒子、任意标签、PBC 模式）
//! - 校验失败时不产生任何输出文件
//!
//! ## 依赖关系
//! - 使用 `cli/generate.rs` 定义的参数
//! - 使用 `parsers/`, `frames/`, `models/`
//! - 使用 `commands/view.rs` 出图

use crate::batch::FileCollector;
use crate::cli::generate::{CoreInputs, ExtxyzArgs, XyzArgs};
use crate::commands::{ensure_writable, view, write_output};
use crate::error::Result;
use crate::frames;
use crate::models::{ColumnSet, FrameProjection, LabelSeries, Outcome, PbcMode, Warning};
use crate::parsers::columns::{read_columns, read_label_series};
use crate::parsers::extxyz::to_extxyz_string;
use crate::parsers::xyz::to_xyz_string;
use crate::utils::output;

use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 生成结果
#[derive(Debug, Clone)]
pub struct Generated {
    pub text: String,
    pub total_atoms: usize,
    pub projections: Vec<FrameProjection>,
}

/// 输入摘要行
#[derive(Debug, Clone, Tabled)]
struct InputRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Frames")]
    frames: String,
}

impl InputRow {
    fn new(field: &str, source: &Path, frames: Option<usize>) -> Self {
        InputRow {
            field: field.to_string(),
            source: source.display().to_string(),
            frames: frames.map_or_else(|| "-".to_string(), |n| n.to_string()),
        }
    }
}

/// 执行 xyz 命令
pub fn execute_xyz(args: XyzArgs) -> Result<()> {
    output::print_header("Generating XYZ trajectory");
    ensure_writable(&args.inputs.output, args.inputs.overwrite)?;

    let mut warnings = Vec::new();
    let mut rows = Vec::new();
    let columns = read_core(&args.inputs, &mut rows, &mut warnings)?;

    print_inputs(rows);
    output::print_warnings(&warnings);

    let generated = render_xyz(columns)?;
    finish(&args.inputs, &generated)?;

    if args.plot.plot_dir.is_some() || args.plot.export_csv.is_some() {
        view::render_projections(&generated.projections, &args.plot)?;
    }
    Ok(())
}

/// 执行 extxyz 命令
pub fn execute_extxyz(args: ExtxyzArgs) -> Result<()> {
    output::print_header(&format!("Generating ExtXYZ trajectory (pbc={})", args.pbc));
    ensure_writable(&args.inputs.output, args.inputs.overwrite)?;

    let mut warnings = Vec::new();
    let mut rows = Vec::new();
    let mut columns = read_core(&args.inputs, &mut rows, &mut warnings)?;

    if let Some(path) = &args.force {
        let forces = read_columns(path)?.drain_into(&mut warnings);
        rows.push(InputRow::new("force", path, Some(forces.len())));
        columns.forces = Some(forces);
    }
    if let Some(path) = &args.box_file {
        let boxes = read_columns(path)?.drain_into(&mut warnings);
        rows.push(InputRow::new("box", path, Some(boxes.len())));
        columns.boxes = Some(boxes);
    }

    for path in label_files(&args)? {
        let series = read_label_series(&path)?.drain_into(&mut warnings);
        rows.push(InputRow::new(
            &format!("label '{}'", series.name),
            &path,
            series.values.as_ref().map(Vec::len),
        ));
        columns.labels.push(series);
    }

    print_inputs(rows);
    output::print_warnings(&warnings);

    let generated = render_extxyz(columns, args.pbc.into())?;
    output::print_warnings(&generated.warnings);
    finish(&args.inputs, &generated.value)?;

    if args.plot.plot_dir.is_some() || args.plot.export_csv.is_some() {
        view::render_projections(&generated.value.projections, &args.plot)?;
    }
    Ok(())
}

/// 列数据 -> 普通 XYZ
pub fn render_xyz(mut columns: ColumnSet) -> Result<Generated> {
    // 普通格式只使用 atom_types / coord / energy
    columns.forces = None;
    columns.boxes = None;
    columns.labels.clear();

    let frames = frames::build(columns)?;
    Ok(Generated {
        text: to_xyz_string(&frames),
        total_atoms: frames.total_atoms(),
        projections: frames::project(&frames),
    })
}

/// 列数据 -> ExtXYZ
pub fn render_extxyz(columns: ColumnSet, pbc: PbcMode) -> Result<Outcome<Generated>> {
    let frames = frames::build(columns)?;
    let Outcome { value, warnings } = to_extxyz_string(&frames, pbc)?;
    Ok(Outcome::new(
        Generated {
            text: value,
            total_atoms: frames.total_atoms(),
            projections: frames::project(&frames),
        },
        warnings,
    ))
}

/// 读取三个必需输入
fn read_core(
    inputs: &CoreInputs,
    rows: &mut Vec<InputRow>,
    warnings: &mut Vec<Warning>,
) -> Result<ColumnSet> {
    let atom_types = read_columns(&inputs.atom_types)?.drain_into(warnings);
    let coordinates = read_columns(&inputs.coord)?.drain_into(warnings);
    let energies = read_columns(&inputs.energy)?.drain_into(warnings);

    rows.push(InputRow::new("atom_types", &inputs.atom_types, Some(atom_types.len())));
    rows.push(InputRow::new("coord", &inputs.coord, Some(coordinates.len())));
    rows.push(InputRow::new("energy", &inputs.energy, Some(energies.len())));

    Ok(ColumnSet {
        atom_types,
        coordinates,
        energies,
        forces: None,
        boxes: None,
        labels: Vec::<LabelSeries>::new(),
    })
}

/// 显式标签文件 + 目录收集的标签文件（去重，保持声明顺序）
fn label_files(args: &ExtxyzArgs) -> Result<Vec<PathBuf>> {
    let mut files = args.labels.clone();

    if let Some(dir) = &args.label_dir {
        let collected = FileCollector::new(dir.clone())
            .with_pattern(&args.label_pattern)?
            .recursive(args.recursive)
            .collect()?;
        for path in collected {
            if !files.contains(&path) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

fn print_inputs(rows: Vec<InputRow>) {
    let table = Table::new(rows).to_string();
    println!("{}\n", table);
}

fn finish(inputs: &CoreInputs, generated: &Generated) -> Result<()> {
    write_output(&inputs.output, &generated.text)?;
    output::print_conversion(
        &inputs.atom_types.display().to_string(),
        &inputs.output.display().to_string(),
    );
    output::print_done(&format!(
        "Wrote {} frame(s), {} atom(s) to '{}'",
        generated.projections.len(),
        generated.total_atoms,
        inputs.output.display()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::generate::PbcOption;
    use crate::cli::view::{ImageFormat, PlotArgs};
    use crate::error::XyzError;
    use crate::frames::fixtures::{full_columns, water_columns};
    use crate::utils::workspace::Workspace;

    fn no_plot() -> PlotArgs {
        PlotArgs {
            plot_dir: None,
            frames: None,
            format: ImageFormat::Png,
            width: 900,
            height: 800,
            jobs: 1,
            export_csv: None,
        }
    }

    fn core(ws: &Workspace, coord: &str) -> CoreInputs {
        CoreInputs {
            atom_types: ws.write("real_atom_types.npy.txt", "H O\nH H O\n").unwrap(),
            coord: ws.write("coord.npy.txt", coord).unwrap(),
            energy: ws.write("energy.npy.txt", "-10.5\n-17.25\n").unwrap(),
            output: ws.join("out.xyz"),
            overwrite: false,
        }
    }

    #[test]
    fn test_render_xyz_two_frames() {
        let generated = render_xyz(water_columns()).unwrap();
        let lines: Vec<&str> = generated.text.lines().collect();
        assert_eq!(lines[0].trim(), "2");
        assert_eq!(lines[1], " i = 0, E = -10.5");
        assert_eq!(lines[2], "H 0.0 0.0 0.0");
        assert_eq!(lines[4].trim(), "3");
        assert_eq!(lines[5], " i = 1, E = -17.25");
        assert_eq!(lines[8], "O -0.24 0.93 0.0");
        assert_eq!(generated.total_atoms, 5);
        assert_eq!(generated.projections.len(), 2);
    }

    #[test]
    fn test_render_xyz_ignores_optional_fields() {
        let mut columns = full_columns();
        // 受力帧数不一致也不影响普通格式
        columns.forces.as_mut().unwrap().pop();
        assert!(render_xyz(columns).is_ok());
    }

    #[test]
    fn test_render_extxyz_reports_warnings() {
        let outcome = render_extxyz(water_columns(), PbcMode::Box).unwrap();
        assert_eq!(outcome.warnings.len(), 2);
        assert!(outcome.value.text.contains(r#"pbc="F F F""#));
    }

    #[test]
    fn test_execute_xyz_writes_file() {
        let ws = Workspace::create("dpxyz-test").unwrap();
        let inputs = core(&ws, "0 0 0 1 0 0\n0 0 0 1 0 0 0 1 0\n");
        let output = inputs.output.clone();

        execute_xyz(XyzArgs {
            inputs,
            plot: no_plot(),
        })
        .unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("     2\n i = 0, E = -10.5\nH 0 0 0\nO 1 0 0\n"));
    }

    #[test]
    fn test_frame_count_mismatch_produces_no_output() {
        let ws = Workspace::create("dpxyz-test").unwrap();
        let inputs = core(&ws, "0 0 0 1 0 0\n0 0 0 1 0 0 0 1 0\n0 0 0\n");
        let output = inputs.output.clone();

        let err = execute_xyz(XyzArgs {
            inputs,
            plot: no_plot(),
        })
        .unwrap_err();

        match err {
            XyzError::ValidationError { violations } => {
                assert!(violations[0].contains("coordinates"));
                assert!(violations[0].contains("2 frame(s)"));
                assert!(violations[0].contains("has 3"));
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(!output.exists());
    }

    #[test]
    fn test_execute_extxyz_with_label_dir() {
        let ws = Workspace::create("dpxyz-test").unwrap();
        let mut inputs = core(&ws, "0 0 0 1 0 0\n0 0 0 1 0 0 0 1 0\n");
        inputs.output = ws.join("out.extxyz");
        let output = inputs.output.clone();

        std::fs::create_dir_all(ws.join("labels")).unwrap();
        std::fs::write(ws.join("labels").join("temperature.txt"), "300\n310\n").unwrap();
        let box_file = ws.write("box.npy.txt", "T T T\nT T F\n").unwrap();

        execute_extxyz(ExtxyzArgs {
            inputs,
            force: None,
            box_file: Some(box_file),
            labels: vec![ws.join("missing_label.txt")],
            label_dir: Some(ws.join("labels")),
            label_pattern: "*.txt".to_string(),
            recursive: false,
            pbc: PbcOption::Box,
            plot: no_plot(),
        })
        .unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        let meta: Vec<&str> = text.lines().filter(|l| l.starts_with("Properties")).collect();
        assert_eq!(
            meta[0],
            r#"Properties=species:S:1:pos:R:3 missing_label=None temperature=300 energy=-10.5 pbc="T T T""#
        );
        assert!(meta[1].ends_with(r#"temperature=310 energy=-17.25 pbc="T T F""#));
    }

    #[test]
    fn test_existing_output_requires_overwrite() {
        let ws = Workspace::create("dpxyz-test").unwrap();
        let inputs = core(&ws, "0 0 0 1 0 0\n0 0 0 1 0 0 0 1 0\n");
        std::fs::write(&inputs.output, "keep me").unwrap();
        let output = inputs.output.clone();

        let err = execute_xyz(XyzArgs {
            inputs,
            plot: no_plot(),
        })
        .unwrap_err();
        assert!(matches!(err, XyzError::OutputExists { .. }));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep me");
    }
}
