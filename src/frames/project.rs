//! # 帧投影
//!
//! 把帧集合转换为可视化需要的最小结构（原子标签 + 三维坐标）。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs`, `commands/view.rs` 使用
//! - 输出供 `plot/` 渲染

use crate::models::{FrameCollection, FrameProjection};

/// 帧集合 -> 每帧的投影
pub fn project(frames: &FrameCollection) -> Vec<FrameProjection> {
    frames
        .frames
        .iter()
        .map(|frame| FrameProjection {
            frame_index: frame.index,
            atom_labels: frame.atoms.iter().map(|a| a.species.clone()).collect(),
            coords: frame.atoms.iter().map(|a| a.coords()).collect(),
        })
        .collect()
}
