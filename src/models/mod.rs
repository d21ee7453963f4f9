//! # 数据模型模块
//!
//! 定义轨迹帧、列数据与警告结果的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `frames/` 和 `commands/` 使用
//! - 子模块: frame, report

pub mod frame;
pub mod report;

pub use frame::{
    AtomRecord, ColumnSet, Frame, FrameCollection, FrameProjection, LabelSeries, PbcMode, Real,
    DEFAULT_PBC,
};
pub use report::{Outcome, Warning};
