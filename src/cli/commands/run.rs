//! # Run Command Module / 运行命令模块
//!
//! This module implements the default command: build the suite for the
//! requested device, pick a runner and execute the suite.
//!
//! 此模块实现默认命令：为请求的设备构建测试套件，选择运行器并执行测试套件。

use anyhow::Result;
use colored::*;
use log::info;

use crate::core::config::RunnerSettings;
use crate::core::models::TestResult;
use crate::core::registry::TestRegistry;
use crate::core::suite::build_suite;
use crate::infra::t;
use crate::reporting::select_runner;

/// Runs the tests for `device_name` and prints the outcome.
///
/// # Returns
/// `Ok(true)` when every test passed, `Ok(false)` when any failed or errored
pub fn execute(
    registry: &TestRegistry,
    device_name: &str,
    use_xml: bool,
    settings: &RunnerSettings,
    locale: &str,
) -> Result<bool> {
    if device_name.is_empty() {
        println!("{}", t!("run.generic_only", locale = locale).bold());
    } else if registry.contains_device(device_name) {
        println!("{}", t!("run.banner", locale = locale, device = device_name).bold());
    } else {
        println!(
            "{}",
            t!("run.unknown_device", locale = locale, device = device_name).yellow()
        );
    }

    let result = run_tests(registry, device_name, use_xml, settings, locale)?;
    Ok(result.was_successful())
}

/// Builds the suite for `device_name` and executes it with the selected runner.
///
/// Test failures are part of the returned result; `Err` only means the runner
/// itself could not do its job.
///
/// 为 `device_name` 构建测试套件，并使用所选的运行器执行它。
/// 测试失败包含在返回的结果中；`Err` 仅表示运行器本身无法完成工作。
pub fn run_tests(
    registry: &TestRegistry,
    device_name: &str,
    use_xml: bool,
    settings: &RunnerSettings,
    locale: &str,
) -> Result<TestResult> {
    let mut suite = build_suite(registry, device_name);
    info!(
        "running {} test(s) from {} group(s)",
        suite.count_tests(),
        suite.cases().len()
    );

    let mut runner = select_runner(use_xml, settings, locale);
    runner.run(&mut suite)
}
