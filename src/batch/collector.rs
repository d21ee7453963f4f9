//! # 文件收集器
//!
//! 根据目录和 glob 模式收集标签文件。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - 逗号分隔的多个 glob 模式
//! - 可选递归
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 调用
//! - 使用 `walkdir` 遍历目录, `glob` 匹配文件名

use crate::error::{Result, XyzError};

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    input: PathBuf,
    patterns: Vec<glob::Pattern>,
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器（默认匹配全部文件）
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: Vec::new(),
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|p| {
                glob::Pattern::new(p).map_err(|e| {
                    XyzError::InvalidArgument(format!("Invalid pattern '{}': {}", p, e))
                })
            })
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件（按路径排序，保证标签声明顺序稳定）
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if self.input.is_file() {
            return Ok(vec![self.input.clone()]);
        }

        if !self.input.is_dir() {
            return Err(XyzError::DirectoryNotFound {
                path: self.input.display().to_string(),
            });
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|entry| self.matches_patterns(entry.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        Ok(files)
    }

    /// 检查文件是否匹配任一模式
    fn matches_patterns(&self, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return true;
        }
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };
        self.patterns.iter().any(|p| p.matches(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::workspace::Workspace;

    #[test]
    fn test_collect_matches_and_sorts() {
        let ws = Workspace::create("dpxyz-test").unwrap();
        ws.write("temperature.txt", "300\n").unwrap();
        ws.write("charge.txt", "0\n").unwrap();
        ws.write("notes.md", "x\n").unwrap();
        std::fs::create_dir_all(ws.join("nested")).unwrap();
        std::fs::write(ws.join("nested").join("spin.txt"), "1\n").unwrap();

        let flat = FileCollector::new(ws.path().to_path_buf())
            .with_pattern("*.txt")
            .unwrap()
            .collect()
            .unwrap();
        let names: Vec<_> = flat
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["charge.txt", "temperature.txt"]);

        let deep = FileCollector::new(ws.path().to_path_buf())
            .with_pattern("*.txt, *.md")
            .unwrap()
            .recursive(true)
            .collect()
            .unwrap();
        assert_eq!(deep.len(), 4);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        assert!(FileCollector::new(PathBuf::from("."))
            .with_pattern("[")
            .is_err());
    }

    #[test]
    fn test_missing_directory_is_error() {
        let ws = Workspace::create("dpxyz-test").unwrap();
        let err = FileCollector::new(ws.join("absent")).collect().unwrap_err();
        assert!(matches!(err, XyzError::DirectoryNotFound { .. }));
    }
}
