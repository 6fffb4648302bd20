//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the harness,
//! namely file system operations for reports and i18n support.
//!
//! 此模块为测试框架提供基础设施服务，
//! 即报告所需的文件系统操作和国际化支持。

pub mod fs;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
