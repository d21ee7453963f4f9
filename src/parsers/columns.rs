//! # 列文件读取器
//!
//! 读取每行一帧的空白分隔文本列（atom_types / coord / energy / force / box），
//! 以及每行一个整行取值的标签文件。
//!
//! ## 格式说明
//! ```text
//! H O            <- 第 0 帧
//! H H O          <- 第 1 帧
//! ```
//! 空行被跳过并记录 `Warning::BlankLine`，不会报错。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs`, `commands/types.rs` 使用
//! - 使用 `models/report.rs`

use crate::error::{Result, XyzError};
use crate::models::{LabelSeries, Outcome, Warning};

use std::fs;
use std::path::Path;

/// 读取列文件：每个非空行切分为 token 序列
pub fn read_columns(path: &Path) -> Result<Outcome<Vec<Vec<String>>>> {
    let content = read_text(path)?;
    Ok(parse_columns(&content, &path.display().to_string()))
}

/// 从字符串内容解析列数据
pub fn parse_columns(content: &str, source: &str) -> Outcome<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    let mut warnings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            warnings.push(Warning::BlankLine {
                path: source.to_string(),
                line: idx + 1,
            });
            continue;
        }
        rows.push(line.split_whitespace().map(str::to_string).collect());
    }

    Outcome::new(rows, warnings)
}

/// 读取标签文件
///
/// 文件不存在时返回 `None`（可选标签未提供），存在但不可读时仍然报错。
pub fn read_labels(path: &Path) -> Result<Option<Outcome<Vec<String>>>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = read_text(path)?;
    let source = path.display().to_string();
    let mut values = Vec::new();
    let mut warnings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            warnings.push(Warning::BlankLine {
                path: source.clone(),
                line: idx + 1,
            });
            continue;
        }
        values.push(line.to_string());
    }

    Ok(Some(Outcome::new(values, warnings)))
}

/// 读取标签文件并命名为文件名（去掉扩展名）
pub fn read_label_series(path: &Path) -> Result<Outcome<LabelSeries>> {
    let name = label_name(path);

    match read_labels(path)? {
        Some(outcome) => {
            let Outcome { value, warnings } = outcome;
            Ok(Outcome::new(LabelSeries::new(name, Some(value)), warnings))
        }
        None => {
            let warning = Warning::MissingLabelFile {
                name: name.clone(),
                path: path.display().to_string(),
            };
            Ok(Outcome::new(LabelSeries::new(name, None), vec![warning]))
        }
    }
}

/// 标签名 = 文件名去掉最后一个扩展名
pub fn label_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("label")
        .to_string()
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| XyzError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}
