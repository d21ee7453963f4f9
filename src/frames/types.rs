//! # 类型映射展开
//!
//! 把整数类型索引翻译成物种名，生成 `real_atom_types` 列。
//!
//! ## 两种输入
//! - 每帧一行的索引矩阵（`1` / `1.0` / `1.000000e+00` 均可）
//! - 每原子一个索引的 `type.raw`，按帧数重复
//!
//! ## 依赖关系
//! - 被 `commands/types.rs` 调用

use crate::error::{Result, XyzError};

/// 解析 type_map：每行一个物种名，行号即索引
///
/// 末尾空行被忽略；中间的空行会让之后的索引错位，因此视为错误。
pub fn parse_type_map(content: &str, source: &str) -> Result<Vec<String>> {
    let lines: Vec<&str> = content.lines().map(str::trim).collect();
    let used = lines.iter().rposition(|l| !l.is_empty()).map_or(0, |i| i + 1);

    lines[..used]
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if name.is_empty() {
                Err(XyzError::ParseError {
                    format: "type_map".to_string(),
                    path: source.to_string(),
                    reason: format!("line {} is blank; type index {} has no species", i + 1, i),
                })
            } else {
                Ok(name.to_string())
            }
        })
        .collect()
}

/// 把索引 token 翻译为物种名
pub fn lookup(type_map: &[String], token: &str, source: &str) -> Result<String> {
    let index = parse_index(token).ok_or_else(|| XyzError::ParseError {
        format: "type index".to_string(),
        path: source.to_string(),
        reason: format!("'{}' is not a non-negative integer", token),
    })?;

    type_map
        .get(index)
        .cloned()
        .ok_or_else(|| XyzError::ParseError {
            format: "type index".to_string(),
            path: source.to_string(),
            reason: format!(
                "index {} out of range for type_map with {} entries",
                index,
                type_map.len()
            ),
        })
}

/// 索引矩阵 -> 物种矩阵（行布局不变）
pub fn map_rows(type_map: &[String], rows: &[Vec<String>], source: &str) -> Result<Vec<Vec<String>>> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|token| lookup(type_map, token, source))
                .collect()
        })
        .collect()
}

/// 每原子类型索引重复 `num_frames` 次
pub fn expand_per_atom(
    type_map: &[String],
    per_atom: &[String],
    num_frames: usize,
    source: &str,
) -> Result<Vec<Vec<String>>> {
    let species: Vec<String> = per_atom
        .iter()
        .map(|token| lookup(type_map, token, source))
        .collect::<Result<_>>()?;
    Ok(vec![species; num_frames])
}

/// 渲染为每行一帧的文本
pub fn render_rows(rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

fn parse_index(token: &str) -> Option<usize> {
    if let Ok(i) = token.parse::<usize>() {
        return Some(i);
    }
    // numpy.savetxt 可能把整数写成浮点形式
    let v = token.parse::<f64>().ok()?;
    if v >= 0.0 && v.fract() == 0.0 && v <= usize::MAX as f64 {
        Some(v as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_map() -> Vec<String> {
        parse_type_map("O\nH\n\n", "type_map.raw").unwrap()
    }

    #[test]
    fn test_parse_type_map_ignores_trailing_blank_lines() {
        assert_eq!(type_map(), vec!["O", "H"]);
        assert!(parse_type_map("\n\n", "type_map.raw").unwrap().is_empty());
    }

    #[test]
    fn test_parse_type_map_rejects_interior_blank_line() {
        match parse_type_map("O\n\nH\n", "type_map.raw") {
            Err(XyzError::ParseError { path, reason, .. }) => {
                assert_eq!(path, "type_map.raw");
                assert!(reason.contains("line 2"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_map_rows_accepts_float_indices() {
        let rows = vec![
            vec!["1".to_string(), "0".to_string()],
            vec!["1.000000e+00".to_string(), "1.0".to_string(), "0".to_string()],
        ];
        let mapped = map_rows(&type_map(), &rows, "real_atom_types.txt").unwrap();
        assert_eq!(mapped[0], vec!["H", "O"]);
        assert_eq!(mapped[1], vec!["H", "H", "O"]);
    }

    #[test]
    fn test_lookup_rejects_bad_indices() {
        assert!(lookup(&type_map(), "2", "t").is_err());
        assert!(lookup(&type_map(), "-1", "t").is_err());
        assert!(lookup(&type_map(), "0.5", "t").is_err());
    }

    #[test]
    fn test_expand_per_atom_repeats_rows() {
        let per_atom = vec!["1".to_string(), "1".to_string(), "0".to_string()];
        let rows = expand_per_atom(&type_map(), &per_atom, 2, "type.raw").unwrap();
        assert_eq!(render_rows(&rows), "H H O\nH H O\n");
    }
}
