//! # Console Reporting Module / 控制台报告模块
//!
//! This module implements the plain-text runner. While the suite runs it prints
//! one line (or one character) per test; afterwards it prints the details of
//! every failure and error followed by a one-line verdict.
//!
//! 此模块实现纯文本运行器。测试套件运行时，它为每个测试打印一行（或一个字符）；
//! 运行结束后，打印每个失败和错误的详细信息，然后打印一行结论。

use anyhow::Result;
use colored::*;
use std::io::{self, Write};

use crate::core::config::Verbosity;
use crate::core::execution::{execute_suite, ProgressListener};
use crate::core::models::{Outcome, TestRecord, TestResult};
use crate::core::suite::{Test, TestSuite};
use crate::infra::t;
use crate::reporting::TestRunner;

const HEAVY_RULE: &str = "======================================================================";
const LIGHT_RULE: &str = "----------------------------------------------------------------------";

/// Runs a suite and reports to the console in human-readable form.
/// 运行测试套件并以人类可读的形式向控制台报告。
#[derive(Debug, Clone)]
pub struct TextTestRunner {
    verbosity: Verbosity,
    locale: String,
}

impl TextTestRunner {
    pub fn new(verbosity: Verbosity, locale: &str) -> Self {
        Self {
            verbosity,
            locale: locale.to_string(),
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

impl TestRunner for TextTestRunner {
    fn run(&mut self, suite: &mut TestSuite) -> Result<TestResult> {
        let mut progress = ConsoleProgress {
            verbosity: self.verbosity,
        };
        let result = execute_suite(suite, &mut progress);
        if self.verbosity == Verbosity::Dots {
            println!();
        }
        print_summary(&result, &self.locale);
        Ok(result)
    }
}

/// Prints per-test progress as the suite runs.
struct ConsoleProgress {
    verbosity: Verbosity,
}

impl ProgressListener for ConsoleProgress {
    fn start_test(&mut self, test: &dyn Test) {
        if self.verbosity == Verbosity::Verbose {
            print!("{} ({}) ... ", test.method_name(), test.case_name());
            let _ = io::stdout().flush();
        }
    }

    fn stop_test(&mut self, record: &TestRecord) {
        match self.verbosity {
            Verbosity::Quiet => {}
            Verbosity::Dots => {
                print!("{}", colorize(record.outcome, &record.outcome.marker().to_string()));
                let _ = io::stdout().flush();
            }
            Verbosity::Verbose => {
                let tag = match record.outcome {
                    Outcome::Skipped => format!("skipped '{}'", record.message),
                    other => other.tag().to_string(),
                };
                println!("{}", colorize(record.outcome, &tag));
            }
        }
    }
}

fn colorize(outcome: Outcome, text: &str) -> ColoredString {
    match outcome {
        Outcome::Passed => text.green(),
        Outcome::Failed | Outcome::Errored => text.red(),
        Outcome::Skipped => text.yellow(),
    }
}

/// Prints the failure details, the run statistics and the final verdict.
///
/// # Output Format / 输出格式
/// ```text
/// ======================================================================
/// FAIL: test_magic (TestEeprom)
/// ----------------------------------------------------------------------
/// assertion `left == right` failed
/// ----------------------------------------------------------------------
/// Ran 12 tests in 0.004s
///
/// FAILED (failures=1)
/// ```
pub fn print_summary(result: &TestResult, locale: &str) {
    print!("{}", format_problem_details(result));
    println!("{LIGHT_RULE}");
    println!(
        "{}",
        t!(
            "report.ran_tests",
            locale = locale,
            count = result.tests_run(),
            seconds = format!("{:.3}", result.duration().as_secs_f64())
        )
    );
    println!();
    let verdict = format_verdict(result);
    if result.was_successful() {
        println!("{}", verdict.green().bold());
    } else {
        println!("{}", verdict.red().bold());
    }
}

/// Renders one block per failed or errored test, in run order.
/// 为每个失败或出错的测试渲染一个块，按运行顺序排列。
pub fn format_problem_details(result: &TestResult) -> String {
    let mut details = String::new();
    for record in result.problems() {
        details.push_str(HEAVY_RULE);
        details.push('\n');
        details.push_str(&format!("{}: {}\n", record.outcome.tag(), record.label()));
        details.push_str(LIGHT_RULE);
        details.push('\n');
        details.push_str(record.message.trim_end());
        details.push_str("\n\n");
    }
    details
}

/// `OK`, `OK (skipped=N)` or `FAILED (failures=F, errors=E, skipped=S)`.
///
/// Zero counters are left out, the way unittest prints them.
pub fn format_verdict(result: &TestResult) -> String {
    let mut counters = Vec::new();
    if result.failures() > 0 {
        counters.push(format!("failures={}", result.failures()));
    }
    if result.errors() > 0 {
        counters.push(format!("errors={}", result.errors()));
    }
    if result.skipped() > 0 {
        counters.push(format!("skipped={}", result.skipped()));
    }

    let head = if result.was_successful() { "OK" } else { "FAILED" };
    if counters.is_empty() {
        head.to_string()
    } else {
        format!("{} ({})", head, counters.join(", "))
    }
}
