//! # JUnit XML Reporting Module / JUnit XML 报告模块
//!
//! This module implements the structured-report runner. It prints the same
//! console progress as the text runner, then writes one JUnit XML file per
//! test group, `TEST-<Group>-<timestamp>.xml`, into the report directory.
//!
//! 此模块实现结构化报告运行器。它打印与文本运行器相同的控制台进度，
//! 然后为每个测试组写入一个 JUnit XML 文件 `TEST-<Group>-<timestamp>.xml` 到报告目录中。

use anyhow::Result;
use chrono::{DateTime, Local};
use colored::*;
use log::debug;
use maud::html;
use std::path::{Path, PathBuf};

use crate::core::models::{Outcome, TestRecord, TestResult};
use crate::core::suite::TestSuite;
use crate::infra::{fs, t};
use crate::reporting::TestRunner;
use crate::reporting::console::TextTestRunner;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Runs a suite with console progress and writes JUnit XML reports.
/// 以控制台进度运行测试套件并写入 JUnit XML 报告。
#[derive(Debug, Clone)]
pub struct XmlTestRunner {
    text: TextTestRunner,
    report_dir: PathBuf,
    locale: String,
}

impl XmlTestRunner {
    pub fn new(text: TextTestRunner, report_dir: &Path, locale: &str) -> Self {
        Self {
            text,
            report_dir: report_dir.to_path_buf(),
            locale: locale.to_string(),
        }
    }

    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }
}

impl TestRunner for XmlTestRunner {
    fn run(&mut self, suite: &mut TestSuite) -> Result<TestResult> {
        let result = self.text.run(suite)?;
        let written = write_reports(&result, &self.report_dir, Local::now())?;
        println!(
            "\n{}",
            t!(
                "report.xml_written",
                locale = &self.locale,
                count = written.len(),
                path = self.report_dir.display()
            )
            .cyan()
        );
        Ok(result)
    }
}

/// Writes one report per group present in `result`.
///
/// # Returns
/// The paths of the written files, in group order
pub fn write_reports(
    result: &TestResult,
    report_dir: &Path,
    timestamp: DateTime<Local>,
) -> Result<Vec<PathBuf>> {
    let file_stamp = timestamp.format("%Y%m%d%H%M%S").to_string();
    let mut written = Vec::new();

    for (case_name, records) in group_by_case(result.records()) {
        let xml = render_case_report(case_name, &records, &timestamp);
        let file_name = format!(
            "TEST-{}-{}.xml",
            fs::sanitize_file_component(case_name),
            file_stamp
        );
        let path = fs::write_report(report_dir, &file_name, &xml)?;
        debug!("wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Renders the `<testsuite>` document of one group.
///
/// 渲染一个测试组的 `<testsuite>` 文档。
pub fn render_case_report(
    case_name: &str,
    records: &[&TestRecord],
    timestamp: &DateTime<Local>,
) -> String {
    let count = |outcome: Outcome| records.iter().filter(|r| r.outcome == outcome).count();
    let total_secs: f64 = records.iter().map(|r| r.duration.as_secs_f64()).sum();

    let markup = html! {
        testsuite
            name=(case_name)
            tests=(records.len())
            failures=(count(Outcome::Failed))
            errors=(count(Outcome::Errored))
            skipped=(count(Outcome::Skipped))
            time=(format!("{total_secs:.3}"))
            timestamp=(timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()) {
            @for record in records {
                testcase
                    classname=(record.case_name)
                    name=(record.method_name)
                    time=(format!("{:.3}", record.duration.as_secs_f64())) {
                    @match record.outcome {
                        Outcome::Failed => {
                            failure type="AssertionError" message=(first_line(&record.message)) {
                                (record.message)
                            }
                        }
                        Outcome::Errored => {
                            error type="Error" message=(first_line(&record.message)) {
                                (record.message)
                            }
                        }
                        Outcome::Skipped => {
                            skipped type="skip" message=(record.message) {}
                        }
                        Outcome::Passed => {}
                    }
                }
            }
        }
    };

    format!("{XML_DECLARATION}\n{}\n", markup.into_string())
}

/// Groups records by group name, keeping the order in which groups first ran.
fn group_by_case(records: &[TestRecord]) -> Vec<(&str, Vec<&TestRecord>)> {
    let mut groups: Vec<(&str, Vec<&TestRecord>)> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|(name, _)| *name == record.case_name) {
            Some((_, members)) => members.push(record),
            None => groups.push((record.case_name.as_str(), vec![record])),
        }
    }
    groups
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default()
}
