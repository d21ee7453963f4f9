//! # ExtXYZ 格式读写
//!
//! ## 格式说明
//! ```text
//! 2
//! Properties=species:S:1:pos:R:3:forces:R:3 temperature=300 energy=-10.5 pbc="T T F"
//! H 0.0 0.0 0.0 0.1 0.2 0.3
//! O 0.96 0.0 0.0 -0.1 -0.2 -0.3
//! ```
//!
//! 写出方向把帧集合渲染为上述文本；读取方向把多帧文件拆回列式文本流
//! (`real_atom_types.npy.txt`, `coord.npy.txt`, `force.npy.txt`,
//! `energy.npy.txt`, `box.npy.txt`, `<label>.txt`)。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs`, `commands/split.rs`, `commands/view.rs` 使用
//! - 使用 `parsers/metadata.rs` 解析注释行
//! - 使用 `models/frame.rs`

use crate::error::{Result, XyzError};
use crate::frames::parse_triple;
use crate::models::{FrameCollection, FrameProjection, Outcome, PbcMode, Warning, DEFAULT_PBC};
use crate::parsers::metadata::{parse_metadata, Metadata, PropertyField};

use std::fs;
use std::path::Path;

pub const SPECIES_FILE: &str = "real_atom_types.npy.txt";
pub const COORD_FILE: &str = "coord.npy.txt";
pub const FORCE_FILE: &str = "force.npy.txt";
pub const ENERGY_FILE: &str = "energy.npy.txt";
pub const BOX_FILE: &str = "box.npy.txt";

const ENERGY_KEY: &str = "energy";
const MISSING_VALUE: &str = "None";

// ─────────────────────────────────────────────────────────────
// 写出
// ─────────────────────────────────────────────────────────────

/// 将帧集合转换为 ExtXYZ 字符串
///
/// 缺失的标签值写为 `None`，`PbcMode::Box` 下缺失的盒子回退为 `F F F`，
/// 二者都记录为警告。携带受力的集合中若某原子缺少受力，返回结构错误。
pub fn to_extxyz_string(frames: &FrameCollection, pbc: PbcMode) -> Result<Outcome<String>> {
    let mut result = String::new();
    let mut warnings = Vec::new();

    let mut properties = String::from("Properties=species:S:1:pos:R:3");
    if frames.has_forces {
        properties.push_str(":forces:R:3");
    }

    for frame in &frames.frames {
        result.push_str(&format!("{}\n", frame.atom_count()));

        let mut line = properties.clone();
        for name in &frames.label_names {
            let value = match frame.labels.get(name) {
                Some(v) if v.is_empty() => MISSING_VALUE.to_string(),
                Some(v) => v.replace(' ', "_"),
                None => {
                    warnings.push(Warning::MissingLabelValue {
                        frame: frame.index,
                        label: name.clone(),
                    });
                    MISSING_VALUE.to_string()
                }
            };
            line.push_str(&format!(" {}={}", name, value));
        }

        line.push_str(&format!(" energy={}", frame.energy));

        let pbc_value = match (pbc, &frame.pbc_box) {
            (PbcMode::Box, Some(tokens)) => tokens.join(" "),
            (PbcMode::Box, None) => {
                warnings.push(Warning::MissingBox { frame: frame.index });
                DEFAULT_PBC.to_string()
            }
            (PbcMode::Fff, _) => DEFAULT_PBC.to_string(),
        };
        line.push_str(&format!(" pbc=\"{}\"", pbc_value));

        result.push_str(&line);
        result.push('\n');

        for (j, atom) in frame.atoms.iter().enumerate() {
            let [x, y, z] = &atom.position;
            result.push_str(&format!("{} {} {} {}", atom.species, x, y, z));

            if frames.has_forces {
                let [fx, fy, fz] = atom.force.as_ref().ok_or_else(|| {
                    XyzError::structural(frame.index, Some(j), "incomplete force data")
                })?;
                result.push_str(&format!(" {} {} {}", fx, fy, fz));
            }
            result.push('\n');
        }
    }

    Ok(Outcome::new(result, warnings))
}

// ─────────────────────────────────────────────────────────────
// 读取
// ─────────────────────────────────────────────────────────────

/// 从 ExtXYZ 文件中读出的一帧（token 原样保留）
#[derive(Debug, Clone, PartialEq)]
pub struct ExtxyzFrame {
    pub index: usize,
    pub species: Vec<String>,
    /// 3 × 原子数
    pub positions: Vec<String>,
    /// 3 × 原子数，或为空（本帧无受力）
    pub forces: Vec<String>,
    /// 注释行中除 Properties / pbc 外的键值
    pub labels: Vec<(String, String)>,
    pub pbc: Option<String>,
}

impl ExtxyzFrame {
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// 每原子列的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AtomLayout {
    species: usize,
    pos: usize,
    forces: Option<usize>,
    /// 未声明 Properties 时，第 5 列之后若存在则视为受力
    implicit_forces: bool,
}

impl AtomLayout {
    const FIXED: AtomLayout = AtomLayout {
        species: 0,
        pos: 1,
        forces: None,
        implicit_forces: true,
    };

    fn from_properties(fields: Option<&[PropertyField]>) -> Self {
        let Some(fields) = fields else {
            return Self::FIXED;
        };

        let mut offset = 0;
        let mut species = None;
        let mut pos = None;
        let mut forces = None;
        for field in fields {
            match field.name.as_str() {
                "species" => species = Some(offset),
                "pos" if field.columns == 3 => pos = Some(offset),
                "forces" if field.columns == 3 => forces = Some(offset),
                _ => {}
            }
            offset += field.columns;
        }

        match (species, pos) {
            (Some(species), Some(pos)) => AtomLayout {
                species,
                pos,
                forces,
                implicit_forces: false,
            },
            _ => Self::FIXED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    AwaitingFrameStart,
    ReadingMetadata,
    ReadingAtoms,
}

/// 正在累积的帧
struct OpenFrame {
    declared_atoms: usize,
    layout: AtomLayout,
    frame: ExtxyzFrame,
}

impl OpenFrame {
    fn new(index: usize, declared_atoms: usize) -> Self {
        OpenFrame {
            declared_atoms,
            layout: AtomLayout::FIXED,
            frame: ExtxyzFrame {
                index,
                species: Vec::new(),
                positions: Vec::new(),
                forces: Vec::new(),
                labels: Vec::new(),
                pbc: None,
            },
        }
    }

    fn is_full(&self) -> bool {
        self.frame.species.len() >= self.declared_atoms
    }

    fn apply_metadata(&mut self, meta: Metadata) {
        self.layout = AtomLayout::from_properties(meta.properties.as_deref());
        self.frame.labels = meta.labels;
        self.frame.pbc = meta.pbc;
    }

    fn push_atom(&mut self, line: &str) -> Result<()> {
        let index = self.frame.index;
        let atom = self.frame.species.len();
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let layout = self.layout;

        let needed = (layout.pos + 3).max(layout.species + 1);
        if tokens.len() < needed {
            return Err(XyzError::structural(
                index,
                Some(atom),
                format!("expected at least {} columns, got {}", needed, tokens.len()),
            ));
        }

        let force_start = match layout.forces {
            Some(start) => Some(start),
            None if layout.implicit_forces && tokens.len() > 4 => Some(4),
            None => None,
        };
        if let Some(start) = force_start {
            if tokens.len() < start + 3 {
                return Err(XyzError::structural(index, Some(atom), "incomplete force data"));
            }
        }

        self.frame.species.push(tokens[layout.species].to_string());
        self.frame
            .positions
            .extend(tokens[layout.pos..layout.pos + 3].iter().map(|t| t.to_string()));
        if let Some(start) = force_start {
            self.frame
                .forces
                .extend(tokens[start..start + 3].iter().map(|t| t.to_string()));
        }
        Ok(())
    }

    fn finish(self) -> Result<ExtxyzFrame> {
        let found = self.frame.species.len();
        if found != self.declared_atoms {
            return Err(XyzError::structural(
                self.frame.index,
                None,
                format!(
                    "declared {} atoms but found {} atom lines",
                    self.declared_atoms, found
                ),
            ));
        }
        // 部分原子带受力的帧视为损坏
        if !self.frame.forces.is_empty() && self.frame.forces.len() != found * 3 {
            return Err(XyzError::structural(
                self.frame.index,
                None,
                format!(
                    "expected {} force values, got {}",
                    found * 3,
                    self.frame.forces.len()
                ),
            ));
        }
        Ok(self.frame)
    }
}

fn is_count_line(line: &str) -> bool {
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}

/// 解析 ExtXYZ 文件
pub fn parse_extxyz_file(path: &Path) -> Result<Vec<ExtxyzFrame>> {
    let content = fs::read_to_string(path).map_err(|e| XyzError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_extxyz_content(&content)
}

/// 从字符串内容解析多帧 ExtXYZ（也接受普通 XYZ）
pub fn parse_extxyz_content(content: &str) -> Result<Vec<ExtxyzFrame>> {
    let mut frames = Vec::new();
    let mut state = ParseState::AwaitingFrameStart;
    let mut open: Option<OpenFrame> = None;

    for raw in content.lines() {
        let line = raw.trim();

        match state {
            ParseState::ReadingMetadata => {
                // 紧跟原子数行的那一行一定是注释行，即使为空
                let meta = parse_metadata(line)
                    .map_err(|e| XyzError::structural(frames.len(), None, e.to_string()))?;
                if let Some(current) = open.as_mut() {
                    current.apply_metadata(meta);
                }
                state = ParseState::ReadingAtoms;
            }
            _ if line.is_empty() => continue,
            ParseState::ReadingAtoms
                if is_count_line(line) && open.as_ref().map_or(true, OpenFrame::is_full) =>
            {
                if let Some(done) = open.take() {
                    frames.push(done.finish()?);
                }
                open = Some(open_frame(frames.len(), line)?);
                state = ParseState::ReadingMetadata;
            }
            ParseState::ReadingAtoms => {
                if let Some(current) = open.as_mut() {
                    if current.is_full() {
                        return Err(XyzError::structural(
                            current.frame.index,
                            None,
                            format!(
                                "more atom lines than the declared {} atoms",
                                current.declared_atoms
                            ),
                        ));
                    }
                    current.push_atom(line)?;
                }
            }
            ParseState::AwaitingFrameStart => {
                if !is_count_line(line) {
                    return Err(XyzError::structural(
                        frames.len(),
                        None,
                        format!("expected an atom count line, found '{}'", line),
                    ));
                }
                open = Some(open_frame(frames.len(), line)?);
                state = ParseState::ReadingMetadata;
            }
        }
    }

    if state == ParseState::ReadingMetadata {
        return Err(XyzError::structural(
            frames.len(),
            None,
            "missing metadata line",
        ));
    }
    if let Some(done) = open.take() {
        frames.push(done.finish()?);
    }

    Ok(frames)
}

fn open_frame(index: usize, line: &str) -> Result<OpenFrame> {
    let count = line.parse::<usize>().map_err(|_| {
        XyzError::structural(index, None, format!("atom count '{}' is too large", line))
    })?;
    Ok(OpenFrame::new(index, count))
}

// ─────────────────────────────────────────────────────────────
// 拆分为列式文本
// ─────────────────────────────────────────────────────────────

/// 一个输出列文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnStream {
    pub file_name: String,
    pub lines: Vec<String>,
}

impl ColumnStream {
    fn new(file_name: impl Into<String>) -> Self {
        ColumnStream {
            file_name: file_name.into(),
            lines: Vec::new(),
        }
    }

    /// 每行一个换行符结尾
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// 拆分选项
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitOptions {
    /// 为缺失的标签 / 盒子补行，使每个文件行数都等于帧数
    pub pad_missing: bool,
}

/// 把解析出的帧拆成列式文本流
///
/// 默认保持与原工具一致的稀疏行为：标签只在出现的帧写行，
/// 盒子只在 PBC 不是 `F F F` 的帧写行。
pub fn split_columns(frames: &[ExtxyzFrame], options: SplitOptions) -> Outcome<Vec<ColumnStream>> {
    let mut species = ColumnStream::new(SPECIES_FILE);
    let mut coords = ColumnStream::new(COORD_FILE);
    let mut forces = ColumnStream::new(FORCE_FILE);
    let mut energy = ColumnStream::new(ENERGY_FILE);
    let mut boxes = ColumnStream::new(BOX_FILE);

    let label_order = discover_labels(frames);
    let mut labels: Vec<ColumnStream> = label_order
        .iter()
        .map(|name| ColumnStream::new(format!("{}.txt", name)))
        .collect();

    let any_box = frames
        .iter()
        .any(|f| f.pbc.as_deref().is_some_and(|p| p != DEFAULT_PBC));

    for frame in frames {
        for (name, stream) in label_order.iter().zip(labels.iter_mut()) {
            match frame.label(name) {
                Some(value) => stream.lines.push(value.to_string()),
                None if options.pad_missing => stream.lines.push(MISSING_VALUE.to_string()),
                None => {}
            }
        }

        energy
            .lines
            .push(frame.label(ENERGY_KEY).unwrap_or_default().to_string());

        match frame.pbc.as_deref() {
            Some(p) if p != DEFAULT_PBC => boxes.lines.push(p.to_string()),
            _ if options.pad_missing && any_box => boxes.lines.push(DEFAULT_PBC.to_string()),
            _ => {}
        }

        species.lines.push(frame.species.join(" "));
        coords.lines.push(frame.positions.join(" "));
        if !frame.forces.is_empty() {
            forces.lines.push(frame.forces.join(" "));
        }
    }

    let mut warnings = Vec::new();
    for stream in &labels {
        if stream.lines.len() < frames.len() {
            warnings.push(Warning::SparseLabel {
                label: stream.file_name.trim_end_matches(".txt").to_string(),
                lines: stream.lines.len(),
                frames: frames.len(),
            });
        }
    }

    let mut streams = vec![species, coords];
    if !forces.lines.is_empty() {
        streams.push(forces);
    }
    streams.push(energy);
    if !boxes.lines.is_empty() {
        streams.push(boxes);
    }
    streams.extend(labels);

    Outcome::new(streams, warnings)
}

/// 按首次出现顺序收集标签名（不含 energy）
fn discover_labels(frames: &[ExtxyzFrame]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for frame in frames {
        for (key, _) in &frame.labels {
            if key != ENERGY_KEY && !names.contains(key) {
                names.push(key.clone());
            }
        }
    }
    names
}

// ─────────────────────────────────────────────────────────────
// 可视化投影
// ─────────────────────────────────────────────────────────────

/// 把解析出的帧直接投影为 (物种, 坐标) 序列
///
/// 只解析物种与坐标；能量、受力、标签都不是必需的，
/// 因此注释行为任意文本的普通 XYZ 也可以可视化。
pub fn to_projections(parsed: &[ExtxyzFrame]) -> Result<Vec<FrameProjection>> {
    parsed
        .iter()
        .map(|p| {
            let coords = (0..p.species.len())
                .map(|j| {
                    let [x, y, z] =
                        parse_triple(p.index, j, &p.positions[j * 3..j * 3 + 3], "coordinate")?;
                    Ok((x.value(), y.value(), z.value()))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(FrameProjection {
                frame_index: p.index,
                atom_labels: p.species.clone(),
                coords,
            })
        })
        .collect()
}
