//! # 统一错误处理模块
//!
//! 定义 dpxyz 的所有错误类型，使用 `thiserror` 派生。
//!
//! 非致命的可选输入缺失不在这里，而是作为 `models::Warning` 随结果返回。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// dpxyz 统一错误类型
#[derive(Error, Debug)]
pub enum XyzError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Output already exists: {path} (use --overwrite to replace it)")]
    OutputExists { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析 / 校验错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} data: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Invalid {key} declaration '{value}': {reason}")]
    MetadataError {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Data consistency validation failed ({} violation(s)):\n{}", .violations.len(), bullet_list(.violations))]
    ValidationError { violations: Vec<String> },

    #[error("Malformed frame {frame}{}: {reason}", atom_suffix(.atom))]
    StructuralError {
        frame: usize,
        atom: Option<usize>,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid range format: {0}")]
    InvalidRange(String),

    // ─────────────────────────────────────────────────────────────
    // 导出 / 绘图错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plot rendering failed: {0}")]
    PlotError(String),
}

impl XyzError {
    /// 构造帧级结构错误
    pub fn structural(frame: usize, atom: Option<usize>, reason: impl Into<String>) -> Self {
        XyzError::StructuralError {
            frame,
            atom,
            reason: reason.into(),
        }
    }
}

fn atom_suffix(atom: &Option<usize>) -> String {
    match atom {
        Some(j) => format!(", atom {}", j),
        None => String::new(),
    }
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|s| format!("  - {}", s))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, XyzError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_violation() {
        let err = XyzError::ValidationError {
            violations: vec!["first".to_string(), "second".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("2 violation(s)"));
        assert!(msg.contains("  - first"));
        assert!(msg.contains("  - second"));
    }

    #[test]
    fn test_structural_error_names_frame_and_atom() {
        let err = XyzError::structural(3, Some(1), "bad token");
        assert_eq!(err.to_string(), "Malformed frame 3, atom 1: bad token");

        let err = XyzError::structural(0, None, "missing metadata line");
        assert_eq!(err.to_string(), "Malformed frame 0: missing metadata line");
    }

    #[test]
    fn test_metadata_error_names_declaration() {
        let err = XyzError::MetadataError {
            key: "Properties".to_string(),
            value: "species:S".to_string(),
            reason: "expected name:type:columns triples".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid Properties declaration 'species:S': expected name:type:columns triples"
        );
    }
}
