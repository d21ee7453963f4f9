//! # 轨迹帧数据模型
//!
//! 列式输入在通过一致性校验后被转换为带类型的帧记录，下游的序列化、
//! 投影与绘图都只操作这里的类型，不再反复切分字符串。
//!
//! ## 依赖关系
//! - 被 `frames/`, `parsers/`, `commands/` 使用
//! - 无外部模块依赖

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// 非周期（封闭）边界的默认 PBC 描述符
pub const DEFAULT_PBC: &str = "F F F";

/// ExtXYZ 的 PBC 输出模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PbcMode {
    /// 有盒子数据时输出盒子描述，否则回退到默认值
    Box,
    /// 始终输出 `F F F`
    #[default]
    Fff,
}

/// 数值 token：保留原始文本用于无损输出，同时保存解析后的数值
#[derive(Debug, Clone, PartialEq)]
pub struct Real {
    text: String,
    value: f64,
}

impl Real {
    /// 解析数值 token，非数值返回 `None`
    pub fn parse(token: &str) -> Option<Self> {
        let value = token.parse::<f64>().ok()?;
        Some(Real {
            text: token.to_string(),
            value,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// 单个原子记录
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// 物种标签（元素或自定义类型）
    pub species: String,

    /// 位置 [x, y, z]
    pub position: [Real; 3],

    /// 可选：受力 [fx, fy, fz]
    pub force: Option<[Real; 3]>,
}

impl AtomRecord {
    pub fn coords(&self) -> (f64, f64, f64) {
        (
            self.position[0].value(),
            self.position[1].value(),
            self.position[2].value(),
        )
    }
}

/// 一个轨迹快照
#[derive(Debug, Clone)]
pub struct Frame {
    /// 帧序号（从 0 开始）
    pub index: usize,

    /// 原子列表，顺序即输出顺序
    pub atoms: Vec<AtomRecord>,

    /// 能量
    pub energy: Real,

    /// 可选：PBC / 盒子描述 token
    pub pbc_box: Option<Vec<String>>,

    /// 标签名 -> 本帧取值
    pub labels: HashMap<String, String>,
}

impl Frame {
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }
}

/// 共享帧数的帧集合
#[derive(Debug, Clone, Default)]
pub struct FrameCollection {
    pub frames: Vec<Frame>,

    /// 声明的标签名（按首次声明顺序）
    pub label_names: Vec<String>,

    /// 本次转换是否携带受力
    pub has_forces: bool,
}

impl FrameCollection {
    /// 所有帧的原子总数
    pub fn total_atoms(&self) -> usize {
        self.frames.iter().map(Frame::atom_count).sum()
    }
}

/// 单个标签流；`values == None` 表示标签文件不存在
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSeries {
    pub name: String,
    pub values: Option<Vec<String>>,
}

impl LabelSeries {
    pub fn new(name: impl Into<String>, values: Option<Vec<String>>) -> Self {
        LabelSeries {
            name: name.into(),
            values,
        }
    }
}

/// 读入后、校验前的原始列数据（每行一帧）
#[derive(Debug, Clone, Default)]
pub struct ColumnSet {
    pub atom_types: Vec<Vec<String>>,
    pub coordinates: Vec<Vec<String>>,
    pub energies: Vec<Vec<String>>,
    pub forces: Option<Vec<Vec<String>>>,
    pub boxes: Option<Vec<Vec<String>>>,
    pub labels: Vec<LabelSeries>,
}

/// 可视化用的最小帧结构
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameProjection {
    pub frame_index: usize,
    pub atom_labels: Vec<String>,
    pub coords: Vec<(f64, f64, f64)>,
}
