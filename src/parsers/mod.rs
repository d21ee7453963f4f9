//! # 解析器模块
//!
//! 列式文本与轨迹文本格式的读写。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: columns, metadata, xyz, extxyz

pub mod columns;
pub mod extxyz;
pub mod metadata;
pub mod xyz;
