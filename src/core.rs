//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the harness: test case
//! groups, the device registry, suite construction and sequential execution.
//!
//! 此模块包含测试框架的核心功能：测试用例组、设备注册表、测试套件构建和顺序执行。

pub mod case;
pub mod config;
pub mod execution;
pub mod models;
pub mod registry;
pub mod suite;

// Re-exports
pub use case::{CaseClass, DeviceAware, SkipTest, TestCase, TestMethod};
pub use config::{RunnerSettings, Verbosity};
pub use models::{Outcome, TestRecord, TestResult};
pub use registry::{TestRegistry, ALL_DEVICES};
pub use suite::{build_suite, TestSuite};
