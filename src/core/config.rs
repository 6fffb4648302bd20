use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default directory for JUnit XML reports.
pub const DEFAULT_REPORT_DIR: &str = "test-reports";

/// How much the text report prints while tests run.
/// 文本报告在测试运行时打印的详细程度。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Verbosity {
    /// Only the final summary / 仅最终摘要
    Quiet,
    /// One marker character per test / 每个测试一个标记字符
    Dots,
    /// One line per test / 每个测试一行
    #[default]
    Verbose,
}

impl TryFrom<u8> for Verbosity {
    type Error = String;

    fn try_from(level: u8) -> std::result::Result<Self, Self::Error> {
        match level {
            0 => Ok(Verbosity::Quiet),
            1 => Ok(Verbosity::Dots),
            2 => Ok(Verbosity::Verbose),
            other => Err(format!("verbosity must be 0, 1 or 2, got {other}")),
        }
    }
}

impl From<Verbosity> for u8 {
    fn from(verbosity: Verbosity) -> Self {
        match verbosity {
            Verbosity::Quiet => 0,
            Verbosity::Dots => 1,
            Verbosity::Verbose => 2,
        }
    }
}

/// Runner settings, loaded from an optional TOML file and overridden by CLI flags.
///
/// ```toml
/// language = "en"
/// verbosity = 2
/// report_dir = "build/test-reports"
/// ```
///
/// 运行器设置，从可选的 TOML 文件加载，并由命令行参数覆盖。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunnerSettings {
    /// The language for the runner's output messages (e.g., "en", "zh-CN").
    /// When absent, the system locale is used.
    ///
    /// 运行器输出消息的语言（例如 "en", "zh-CN"）。
    /// 如果未指定，则使用系统语言环境。
    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub verbosity: Verbosity,

    /// Where `--xml` writes its reports.
    /// `--xml` 写入报告的位置。
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            language: None,
            verbosity: Verbosity::default(),
            report_dir: default_report_dir(),
        }
    }
}

impl RunnerSettings {
    /// Reads settings from a TOML file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }
}

fn default_report_dir() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_DIR)
}
