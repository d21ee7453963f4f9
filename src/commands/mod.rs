//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `frames/`, `models/`, `utils/`
//! - 子模块: generate, split, types, view

pub mod generate;
pub mod split;
pub mod types;
pub mod view;

use crate::cli::Commands;
use crate::error::{Result, XyzError};

use std::fs;
use std::path::Path;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Xyz(args) => generate::execute_xyz(args),
        Commands::Extxyz(args) => generate::execute_extxyz(args),
        Commands::Split(args) => split::execute(args),
        Commands::Types(args) => types::execute(args),
        Commands::View(args) => view::execute(args),
    }
}

/// 目标已存在且未指定 `--overwrite` 时拒绝写入
pub(crate) fn ensure_writable(path: &Path, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        return Err(XyzError::OutputExists {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

/// 先写同目录下的 `.partial` 文件再重命名，失败时不留下半截输出
pub(crate) fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| XyzError::FileWriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let mut partial = path.as_os_str().to_owned();
    partial.push(".partial");
    let partial = Path::new(&partial);

    let discard = |target: &Path, e: std::io::Error| {
        let _ = fs::remove_file(partial);
        XyzError::FileWriteError {
            path: target.display().to_string(),
            source: e,
        }
    };

    fs::write(partial, content).map_err(|e| discard(partial, e))?;
    fs::rename(partial, path).map_err(|e| discard(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::workspace::Workspace;

    #[test]
    fn test_write_output_creates_parent_and_leaves_no_partial() {
        let ws = Workspace::create("dpxyz-test").unwrap();
        let target = ws.join("nested").join("out.xyz");

        write_output(&target, "     1\n").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "     1\n");
        assert!(!ws.join("nested").join("out.xyz.partial").exists());
    }

    #[test]
    fn test_failed_rename_leaves_no_partial() {
        let ws = Workspace::create("dpxyz-test").unwrap();
        // 目标是非空目录，rename 必然失败
        let target = ws.join("out.xyz");
        fs::create_dir_all(target.join("occupied")).unwrap();

        let err = write_output(&target, "     1\n").unwrap_err();
        assert!(matches!(err, XyzError::FileWriteError { .. }));
        assert!(!ws.join("out.xyz.partial").exists());
    }

    #[test]
    fn test_failed_write_leaves_no_partial() {
        let ws = Workspace::create("dpxyz-test").unwrap();
        // `.partial` 路径被目录占据，写入失败
        fs::create_dir_all(ws.join("out.xyz.partial")).unwrap();

        let err = write_output(&ws.join("out.xyz"), "     1\n").unwrap_err();
        assert!(matches!(err, XyzError::FileWriteError { .. }));
        assert!(!ws.join("out.xyz").exists());
    }

    #[test]
    fn test_ensure_writable() {
        let ws = Workspace::create("dpxyz-test").unwrap();
        let target = ws.write("out.xyz", "x").unwrap();

        assert!(matches!(
            ensure_writable(&target, false),
            Err(XyzError::OutputExists { .. })
        ));
        assert!(ensure_writable(&target, true).is_ok());
        assert!(ensure_writable(&ws.join("fresh.xyz"), false).is_ok());
    }
}
