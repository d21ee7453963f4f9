//! # 一致性校验
//!
//! 在序列化之前检查各输入列的帧数是否一致，以及每帧坐标 / 受力长度
//! 是否等于 3 × 原子数。所有检查都会执行，违规项全部收集后一次性报告。
//!
//! ## 依赖关系
//! - 被 `frames/mod.rs` 调用
//! - 使用 `models/frame.rs` 的 ColumnSet

use crate::error::{Result, XyzError};
use crate::models::ColumnSet;

/// 校验列数据，失败时返回包含全部违规描述的 `ValidationError`
pub fn validate(columns: &ColumnSet) -> Result<()> {
    let violations = collect_violations(columns);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(XyzError::ValidationError { violations })
    }
}

/// 收集全部违规描述（不短路）
pub fn collect_violations(columns: &ColumnSet) -> Vec<String> {
    let num_frames = columns.atom_types.len();
    let mut violations = Vec::new();

    let mut check_count = |field: &str, len: usize| {
        if len != num_frames {
            violations.push(format!(
                "frame count mismatch: atom_types has {} frame(s) but {} has {}",
                num_frames, field, len
            ));
        }
    };

    check_count("coordinates", columns.coordinates.len());
    check_count("energies", columns.energies.len());
    if let Some(forces) = &columns.forces {
        check_count("forces", forces.len());
    }
    if let Some(boxes) = &columns.boxes {
        check_count("box", boxes.len());
    }

    for label in &columns.labels {
        if let Some(values) = &label.values {
            if values.len() != num_frames {
                violations.push(format!(
                    "frame count mismatch: label '{}' has {} frame(s) but atom_types has {}",
                    label.name,
                    values.len(),
                    num_frames
                ));
            }
        }
    }

    for (i, (types, coords)) in columns
        .atom_types
        .iter()
        .zip(&columns.coordinates)
        .enumerate()
    {
        let expected = types.len() * 3;
        if coords.len() != expected {
            violations.push(format!(
                "frame {}: expected {} coordinate values, got {}",
                i,
                expected,
                coords.len()
            ));
        }
    }

    if let Some(forces) = &columns.forces {
        for (i, (types, force)) in columns.atom_types.iter().zip(forces).enumerate() {
            let expected = types.len() * 3;
            if force.len() != expected {
                violations.push(format!(
                    "frame {}: expected {} force values, got {}",
                    i,
                    expected,
                    force.len()
                ));
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LabelSeries;

    fn rows(data: &[&str]) -> Vec<Vec<String>> {
        data.iter()
            .map(|l| l.split_whitespace().map(String::from).collect())
            .collect()
    }

    fn two_frame_columns() -> ColumnSet {
        ColumnSet {
            atom_types: rows(&["H O", "H H O"]),
            coordinates: rows(&["0 0 0 1 1 1", "0 0 0 1 1 1 2 2 2"]),
            energies: rows(&["-1.0", "-2.0"]),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_columns_pass() {
        assert!(validate(&two_frame_columns()).is_ok());
    }

    #[test]
    fn test_frame_count_mismatch_names_both_counts() {
        let mut columns = two_frame_columns();
        columns.coordinates.push(vec!["0".into(), "0".into(), "0".into()]);

        let violations = collect_violations(&columns);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("coordinates"));
        assert!(violations[0].contains("2 frame(s)"));
        assert!(violations[0].contains("has 3"));
        assert!(matches!(
            validate(&columns),
            Err(XyzError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_every_mismatched_field_is_reported() {
        let mut columns = two_frame_columns();
        columns.energies.pop();
        columns.forces = Some(rows(&["0 0 0 0 0 0"]));
        columns.boxes = Some(rows(&["T T T", "T T T", "T T T"]));
        columns.labels = vec![
            LabelSeries::new("temp", Some(vec!["300".into()])),
            LabelSeries::new("absent", None),
        ];

        let violations = collect_violations(&columns);
        let joined = violations.join("\n");
        assert!(joined.contains("energies"));
        assert!(joined.contains("forces"));
        assert!(joined.contains("box"));
        assert!(joined.contains("label 'temp'"));
        assert!(!joined.contains("absent"));
    }

    #[test]
    fn test_per_frame_length_mismatch_names_frame() {
        let mut columns = two_frame_columns();
        columns.coordinates[1].pop();
        columns.forces = Some(rows(&["0 0 0 0 0", "0 0 0 0 0 0 0 0 0"]));

        let violations = collect_violations(&columns);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0], "frame 1: expected 9 coordinate values, got 8");
        assert_eq!(violations[1], "frame 0: expected 6 force values, got 5");
    }
}
