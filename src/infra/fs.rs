//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides the small set of file system operations the report
//! writers need: creating the report directory and writing report files with
//! safe names.
//!
//! 此模块提供报告写入器所需的少量文件系统操作：
//! 创建报告目录以及使用安全的名称写入报告文件。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Replaces every character that is not alphanumeric, `-` or `_` with `_`,
/// so the result is usable as part of a file name on every platform.
pub fn sanitize_file_component(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Creates `dir` and its parents if they do not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory: {}", dir.display()))
}

/// Writes `contents` to `dir/file_name`, creating `dir` first.
///
/// # Returns
/// The path of the written file
pub fn write_report(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, contents)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(path)
}

