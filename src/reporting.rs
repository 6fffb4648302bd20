//! # Reporting Module / 报告模块
//!
//! This module holds the interchangeable test runners. Both run a suite and
//! return the accumulated `TestResult`; they differ only in how they report:
//! plain console text, or console text plus JUnit XML files.
//!
//! 此模块包含可互换的测试运行器。两者都运行测试套件并返回累积的 `TestResult`；
//! 它们的区别仅在于报告方式：纯控制台文本，或控制台文本加 JUnit XML 文件。

use anyhow::Result;
use log::debug;

use crate::core::config::RunnerSettings;
use crate::core::models::TestResult;
use crate::core::suite::TestSuite;

pub mod console;
#[cfg(feature = "xml-report")]
pub mod junit;

pub use console::TextTestRunner;
#[cfg(feature = "xml-report")]
pub use junit::XmlTestRunner;

/// A reporting strategy that executes a suite.
///
/// Test failures never make `run` return `Err`; they live in the returned
/// result. `Err` is reserved for the runner itself failing, e.g. being unable
/// to write its report files.
pub trait TestRunner {
    fn run(&mut self, suite: &mut TestSuite) -> Result<TestResult>;
}

/// Picks the XML runner when it was requested and is compiled in, the text
/// runner otherwise.
///
/// 当请求了 XML 运行器且已编译进来时选择它，否则选择文本运行器。
pub fn select_runner(use_xml: bool, settings: &RunnerSettings, locale: &str) -> Box<dyn TestRunner> {
    let text = TextTestRunner::new(settings.verbosity, locale);

    #[cfg(feature = "xml-report")]
    if use_xml {
        return Box::new(XmlTestRunner::new(text, &settings.report_dir, locale));
    }

    if use_xml {
        debug!("XML reporting is not available in this build, falling back to text");
    }
    Box::new(text)
}
