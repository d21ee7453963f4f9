//! # 警告与结果封装
//!
//! 可选输入缺失等非致命事件不打印，而是作为 `Warning` 随主结果一起返回，
//! 由命令层决定输出或丢弃。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `frames/`, `commands/` 使用

use std::fmt;

/// 非致命警告（MissingOptionalInput 一类）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// 列文件中的空行被跳过（行号从 1 开始）
    BlankLine { path: String, line: usize },

    /// 标签文件不存在
    MissingLabelFile { name: String, path: String },

    /// 某帧缺少某标签的取值，输出 `None`
    MissingLabelValue { frame: usize, label: String },

    /// 请求了 box 模式但没有盒子数据，回退到默认 PBC
    MissingBox { frame: usize },

    /// 拆分时某标签只出现在部分帧，输出文件行数少于帧数
    SparseLabel {
        label: String,
        lines: usize,
        frames: usize,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::BlankLine { path, line } => {
                write!(f, "{}: line {} is blank, skipped", path, line)
            }
            Warning::MissingLabelFile { name, path } => {
                write!(
                    f,
                    "label '{}' file '{}' does not exist, every frame gets None",
                    name, path
                )
            }
            Warning::MissingLabelValue { frame, label } => {
                write!(f, "frame {}: no value for label '{}', wrote None", frame, label)
            }
            Warning::MissingBox { frame } => {
                write!(f, "frame {}: no box data for pbc=box, wrote \"F F F\"", frame)
            }
            Warning::SparseLabel {
                label,
                lines,
                frames,
            } => {
                write!(
                    f,
                    "label '{}' present in {} of {} frame(s), its file is shorter than the frame count",
                    label, lines, frames
                )
            }
        }
    }
}

/// 主结果 + 警告列表
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

impl<T> Outcome<T> {
    pub fn new(value: T, warnings: Vec<Warning>) -> Self {
        Outcome { value, warnings }
    }

    /// 把警告转移到外部列表并取出主结果
    pub fn drain_into(self, sink: &mut Vec<Warning>) -> T {
        sink.extend(self.warnings);
        self.value
    }
}
