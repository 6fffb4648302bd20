//! # Data Models Module / 数据模型模块
//!
//! This module defines the result data structures produced by a suite run:
//! the outcome of each test and the aggregate result the exit code is derived from.
//!
//! 此模块定义测试套件运行产生的结果数据结构：
//! 每个测试的结果，以及用于推导退出码的汇总结果。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The outcome of a single test.
/// 单个测试的结果。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Outcome {
    /// The test method returned `Ok`.
    /// 测试方法返回了 `Ok`。
    Passed,
    /// An assertion inside the test panicked.
    /// 测试中的断言发生了 panic。
    Failed,
    /// `set_up`, the test or `tear_down` returned an error.
    /// `set_up`、测试或 `tear_down` 返回了错误。
    Errored,
    /// The test reported it cannot run in this environment.
    /// 测试报告它无法在此环境中运行。
    Skipped,
}

impl Outcome {
    /// Short tag used by the verbose text report.
    pub fn tag(&self) -> &'static str {
        match self {
            Outcome::Passed => "ok",
            Outcome::Failed => "FAIL",
            Outcome::Errored => "ERROR",
            Outcome::Skipped => "skipped",
        }
    }

    /// Single-character marker used by the dotted text report.
    pub fn marker(&self) -> char {
        match self {
            Outcome::Passed => '.',
            Outcome::Failed => 'F',
            Outcome::Errored => 'E',
            Outcome::Skipped => 's',
        }
    }

    pub fn is_problem(&self) -> bool {
        matches!(self, Outcome::Failed | Outcome::Errored)
    }
}

/// The recorded result of one test.
/// 一个测试的记录结果。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRecord {
    /// Name of the group the test belongs to / 测试所属的测试组名称
    pub case_name: String,
    /// Name of the test method / 测试方法名称
    pub method_name: String,
    pub outcome: Outcome,
    /// Failure, error or skip message; empty for passes.
    /// 失败、错误或跳过的消息；通过时为空。
    pub message: String,
    pub duration: Duration,
}

impl TestRecord {
    pub fn id(&self) -> String {
        format!("{}.{}", self.case_name, self.method_name)
    }

    /// The `method (Group)` label used in text reports.
    pub fn label(&self) -> String {
        format!("{} ({})", self.method_name, self.case_name)
    }
}

impl fmt::Display for TestRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ... {}", self.label(), self.outcome.tag())
    }
}

/// Accumulated outcomes of one suite run.
///
/// 一次测试套件运行的累积结果。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestResult {
    records: Vec<TestRecord>,
    duration: Duration,
}

impl TestResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: TestRecord) {
        self.records.push(record);
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn records(&self) -> &[TestRecord] {
        &self.records
    }

    /// Wall-clock time of the whole run.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn tests_run(&self) -> usize {
        self.records.len()
    }

    pub fn failures(&self) -> usize {
        self.count(Outcome::Failed)
    }

    pub fn errors(&self) -> usize {
        self.count(Outcome::Errored)
    }

    pub fn skipped(&self) -> usize {
        self.count(Outcome::Skipped)
    }

    /// Failed and errored records, in run order.
    pub fn problems(&self) -> impl Iterator<Item = &TestRecord> {
        self.records.iter().filter(|r| r.outcome.is_problem())
    }

    /// `true` when no test failed or errored. Skips do not count against success.
    /// 当没有测试失败或出错时为 `true`。跳过的测试不影响成功判断。
    pub fn was_successful(&self) -> bool {
        self.failures() == 0 && self.errors() == 0
    }

    fn count(&self, outcome: Outcome) -> usize {
        self.records.iter().filter(|r| r.outcome == outcome).count()
    }
}
