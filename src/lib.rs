//! # MPM Unit Tests Library / MPM 单元测试库
//!
//! This library provides the unit test harness of the USRP MPM daemon: test
//! case groups, a registry mapping device families to groups, suite
//! construction for a requested device, and text or JUnit XML reporting.
//!
//! 此库提供 USRP MPM 守护进程的单元测试框架：测试用例组、将设备系列映射到测试组的注册表、
//! 为请求的设备构建测试套件，以及文本或 JUnit XML 报告。
//!
//! ## Modules / 模块
//!
//! - `core` - Test case traits, registry, suite construction and execution
//! - `catalog` - The built-in test groups and the default registry
//! - `infra` - Infrastructure services like file system operations
//! - `reporting` - The text and XML test runners
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 测试用例 trait、注册表、测试套件构建和执行
//! - `catalog` - 内置测试组和默认注册表
//! - `infra` - 基础设施服务，如文件系统操作
//! - `reporting` - 文本和 XML 测试运行器
//! - `cli` - 命令行接口和命令

pub mod catalog;
pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::cli::commands::run::run_tests;
pub use crate::core::{build_suite, DeviceAware, SkipTest, TestCase, TestRegistry, TestResult};

/// Picks the message language.
///
/// `requested` (from `--lang` or the settings file) wins when it is available;
/// otherwise the system locale is used. Full locales (e.g. "zh-CN") are tried
/// before their language part (e.g. "zh"), and "en" is the final fallback.
///
/// 选择消息语言。
/// 如果 `requested`（来自 `--lang` 或设置文件）可用则优先使用；否则使用系统语言环境。
/// 先尝试完整的语言环境（例如 "zh-CN"），再尝试其语言部分（例如 "zh"），最后回退到 "en"。
pub fn resolve_locale(requested: Option<&str>) -> String {
    let available_locales = rust_i18n::available_locales!();
    let candidate = requested
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());

    if available_locales.contains(&candidate.as_str()) {
        return candidate;
    }
    candidate
        .split(['-', '_'])
        .next()
        .filter(|lang_code| available_locales.contains(lang_code))
        .unwrap_or("en")
        .to_string()
}

/// Sets the process-wide message language, see [`resolve_locale`].
pub fn init(requested: Option<&str>) -> String {
    let lang = resolve_locale(requested);
    rust_i18n::set_locale(&lang);
    lang
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
