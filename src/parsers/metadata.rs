//! # ExtXYZ 注释行（元数据行）解析
//!
//! 每帧第二行是 `key=value` 序列：
//! ```text
//! Properties=species:S:1:pos:R:3:forces:R:3 temperature=300 energy=-10.5 pbc="T T F"
//! ```
//! - `Properties` 声明每原子列（名称:类型:列数 三元组）
//! - `pbc` 的引号内容是 PBC 描述符
//! - 其余键值都是本帧标签，值可以带引号
//!
//! 普通 XYZ 的注释行 ` i = 0, E = -10.5` 也能识别，能量记为 `energy` 标签。
//!
//! ## 依赖关系
//! - 被 `parsers/extxyz.rs` 使用
//! - 使用 `regex` 进行 key=value 扫描

use crate::error::{Result, XyzError};

use regex::Regex;
use std::sync::LazyLock;

static KEY_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)=(?:"([^"]*)"|(\S+))"#).unwrap());

static PLAIN_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*i\s*=\s*\d+\s*,\s*E\s*=\s*(\S+)\s*$").unwrap());

/// `Properties` 中声明的一列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyField {
    pub name: String,
    /// S / R / I / L
    pub kind: String,
    pub columns: usize,
}

/// 解析后的元数据行
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub properties: Option<Vec<PropertyField>>,
    /// 除 Properties / pbc 之外的全部键值（按出现顺序）
    pub labels: Vec<(String, String)>,
    pub pbc: Option<String>,
}

/// 解析元数据行
pub fn parse_metadata(line: &str) -> Result<Metadata> {
    if let Some(caps) = PLAIN_COMMENT.captures(line) {
        return Ok(Metadata {
            properties: None,
            labels: vec![("energy".to_string(), caps[1].to_string())],
            pbc: None,
        });
    }

    let mut meta = Metadata::default();

    for caps in KEY_VALUE.captures_iter(line) {
        let key = &caps[1];
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str())
            .unwrap_or_default();

        match key {
            "Properties" => meta.properties = Some(parse_properties(value)?),
            "pbc" => meta.pbc = Some(value.to_string()),
            _ => meta.labels.push((key.to_string(), value.to_string())),
        }
    }

    Ok(meta)
}

/// 解析 `species:S:1:pos:R:3` 形式的列声明
pub fn parse_properties(value: &str) -> Result<Vec<PropertyField>> {
    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() % 3 != 0 {
        return Err(properties_error(value, "expected name:type:columns triples"));
    }

    parts
        .chunks(3)
        .map(|chunk| {
            let columns = chunk[2].parse::<usize>().map_err(|_| {
                properties_error(value, &format!("column count '{}' is not an integer", chunk[2]))
            })?;
            Ok(PropertyField {
                name: chunk[0].to_string(),
                kind: chunk[1].to_string(),
                columns,
            })
        })
        .collect()
}

fn properties_error(value: &str, reason: &str) -> XyzError {
    XyzError::MetadataError {
        key: "Properties".to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
