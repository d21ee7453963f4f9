//! # 临时工作目录
//!
//! 多文件输出先写入临时目录，成功后再整体移动到目标目录。
//! 目录由 `tempfile` 独占创建，`Workspace` drop 时随 `TempDir` 一起删除，
//! 成功、校验失败、内部错误各路径都会清理。
//!
//! ## 依赖关系
//! - 被 `commands/split.rs` 和各模块测试使用
//! - 使用 `tempfile` 创建作用域临时目录

use crate::error::{Result, XyzError};

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 作用域临时目录
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// 在系统临时目录下创建唯一的工作目录
    pub fn create(prefix: &str) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(&format!("{}-", prefix))
            .tempdir()
            .map_err(|e| XyzError::FileWriteError {
                path: std::env::temp_dir().join(prefix).display().to_string(),
                source: e,
            })?;

        Ok(Workspace { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// 工作目录内的文件路径
    pub fn join(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    /// 写入一个文件
    pub fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.join(name);
        fs::write(&path, content).map_err(|e| XyzError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(path)
    }

    /// 把工作目录中的文件移动到目标目录
    pub fn publish(&self, names: &[String], dest_dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dest_dir).map_err(|e| XyzError::FileWriteError {
            path: dest_dir.display().to_string(),
            source: e,
        })?;

        let mut published = Vec::with_capacity(names.len());
        for name in names {
            let from = self.join(name);
            let to = dest_dir.join(name);
            // 跨文件系统时 rename 会失败，退回到复制
            if fs::rename(&from, &to).is_err() {
                fs::copy(&from, &to).map_err(|e| XyzError::FileWriteError {
                    path: to.display().to_string(),
                    source: e,
                })?;
            }
            published.push(to);
        }
        Ok(published)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_removed_on_drop() {
        let path = {
            let ws = Workspace::create("dpxyz-test").unwrap();
            ws.write("a.txt", "hello\n").unwrap();
            assert!(ws.join("a.txt").exists());
            ws.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_workspace_name_carries_prefix() {
        let ws = Workspace::create("dpxyz-split").unwrap();
        let name = ws.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("dpxyz-split-"));
        assert!(fs::read_dir(ws.path()).unwrap().next().is_none());
    }

    #[test]
    fn test_workspaces_are_unique() {
        let a = Workspace::create("dpxyz-test").unwrap();
        let b = Workspace::create("dpxyz-test").unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_publish_moves_files() {
        let ws = Workspace::create("dpxyz-test").unwrap();
        let dest = Workspace::create("dpxyz-dest").unwrap();
        ws.write("coord.npy.txt", "1 2 3\n").unwrap();

        let out = ws
            .publish(&["coord.npy.txt".to_string()], &dest.join("out"))
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(fs::read_to_string(&out[0]).unwrap(), "1 2 3\n");
    }
}
