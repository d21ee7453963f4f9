//! # 帧处理模块
//!
//! 列数据 -> 校验 -> 带类型的帧集合 -> 可视化投影。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: validate, project, types

pub mod project;
pub mod types;
pub mod validate;

pub use project::project;
pub use validate::validate;

use crate::error::{Result, XyzError};
use crate::models::{AtomRecord, ColumnSet, Frame, FrameCollection, Real};

use std::collections::HashMap;

/// 校验列数据并组装为帧集合
///
/// 校验失败时直接返回 `ValidationError`，不会产生任何部分结果。
pub fn build(columns: ColumnSet) -> Result<FrameCollection> {
    validate(&columns)?;

    let ColumnSet {
        atom_types,
        coordinates,
        energies,
        forces,
        boxes,
        labels,
    } = columns;

    let has_forces = forces.is_some();
    let label_names: Vec<String> = labels.iter().map(|l| l.name.clone()).collect();

    let mut frames = Vec::with_capacity(atom_types.len());
    for (i, (types, coords)) in atom_types.into_iter().zip(coordinates).enumerate() {
        let force_row = forces.as_ref().map(|f| f[i].as_slice());
        let atoms = build_atoms(i, types, &coords, force_row)?;

        let energy_token = energies[i]
            .first()
            .ok_or_else(|| XyzError::structural(i, None, "missing energy value"))?;
        let energy = Real::parse(energy_token).ok_or_else(|| {
            XyzError::structural(i, None, format!("energy '{}' is not a number", energy_token))
        })?;

        let mut frame_labels = HashMap::new();
        for label in &labels {
            if let Some(value) = label.values.as_ref().and_then(|v| v.get(i)) {
                frame_labels.insert(label.name.clone(), value.clone());
            }
        }

        frames.push(Frame {
            index: i,
            atoms,
            energy,
            pbc_box: boxes.as_ref().map(|b| b[i].clone()),
            labels: frame_labels,
        });
    }

    Ok(FrameCollection {
        frames,
        label_names,
        has_forces,
    })
}

/// 把一帧的原子类型与坐标 / 受力 token 组装为原子记录
fn build_atoms(
    frame: usize,
    types: Vec<String>,
    coords: &[String],
    forces: Option<&[String]>,
) -> Result<Vec<AtomRecord>> {
    let expected = types.len() * 3;
    if coords.len() != expected {
        return Err(XyzError::structural(
            frame,
            None,
            format!("expected {} coordinate values, got {}", expected, coords.len()),
        ));
    }
    if let Some(forces) = forces {
        if forces.len() != expected {
            return Err(XyzError::structural(
                frame,
                None,
                format!("expected {} force values, got {}", expected, forces.len()),
            ));
        }
    }

    types
        .into_iter()
        .enumerate()
        .map(|(j, species)| {
            let position = parse_triple(frame, j, &coords[j * 3..j * 3 + 3], "coordinate")?;
            let force = match forces {
                Some(f) => Some(parse_triple(frame, j, &f[j * 3..j * 3 + 3], "force")?),
                None => None,
            };
            Ok(AtomRecord {
                species,
                position,
                force,
            })
        })
        .collect()
}

/// 解析三个数值 token
pub(crate) fn parse_triple(
    frame: usize,
    atom: usize,
    tokens: &[String],
    what: &str,
) -> Result<[Real; 3]> {
    let parse = |k: usize| {
        let token = tokens.get(k).ok_or_else(|| {
            XyzError::structural(frame, Some(atom), format!("incomplete {} data", what))
        })?;
        Real::parse(token).ok_or_else(|| {
            XyzError::structural(
                frame,
                Some(atom),
                format!("{} '{}' is not a number", what, token),
            )
        })
    };
    Ok([parse(0)?, parse(1)?, parse(2)?])
}
