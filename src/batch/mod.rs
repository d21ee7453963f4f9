//! # 批量处理模块
//!
//! 提供文件收集与并行批量执行能力。
//!
//! ## 功能
//! - 按目录 / glob 模式收集标签文件
//! - 并行处理（逐帧渲染）
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被各命令模块使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchRunner, ProcessResult};
