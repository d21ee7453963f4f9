//! # 可视化模块
//!
//! 把帧投影渲染为图片。
//!
//! ## 依赖关系
//! - 被 `commands/view.rs` 调用
//! - 子模块: scatter

pub mod scatter;

pub use scatter::{render_frame, PlotOptions};
