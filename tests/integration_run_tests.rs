//! # Run Integration Tests / 运行集成测试
//!
//! End-to-end tests of `run_tests`: registry lookup, suite construction,
//! runner selection and the success flag the exit code is derived from.
//!
//! `run_tests` 的端到端测试：注册表查找、测试套件构建、运行器选择以及推导退出码的成功标志。

mod common;

use mpm_unit_tests::catalog::default_registry;
use mpm_unit_tests::cli::{exit_status, process_with_registry, CliArgs};
use mpm_unit_tests::core::config::{RunnerSettings, Verbosity};
use mpm_unit_tests::run_tests;
use tempfile::tempdir;

fn quiet_settings() -> RunnerSettings {
    RunnerSettings {
        verbosity: Verbosity::Quiet,
        ..RunnerSettings::default()
    }
}

#[test]
fn test_generic_run_all_passing() {
    let registry = common::passing_registry();
    let result = run_tests(&registry, "", false, &quiet_settings(), "en").unwrap();
    assert_eq!(result.tests_run(), 2);
    assert!(result.was_successful());
}

#[test]
fn test_device_run_includes_device_groups() {
    let registry = common::passing_registry();
    let result = run_tests(&registry, "x4xx", false, &quiet_settings(), "en").unwrap();
    assert_eq!(result.tests_run(), 3);
    assert!(result.was_successful());
}

#[test]
fn test_failing_generic_group_fails_device_run() {
    let registry = common::failing_registry();
    let result = run_tests(&registry, "x4xx", false, &quiet_settings(), "en").unwrap();
    assert!(!result.was_successful());
    assert_eq!(result.failures(), 1);
    // The x4xx groups still ran.
    assert!(result
        .records()
        .iter()
        .any(|r| r.case_name == "OtherPassingCase"));
}

#[test]
fn test_failing_run_exits_non_zero() {
    let registry = common::failing_registry();
    let args = CliArgs {
        device_name: "x4xx".to_string(),
        verbosity: Some(0),
        lang: Some("en".to_string()),
        ..CliArgs::default()
    };
    let outcome = process_with_registry(&args, &registry);
    assert!(matches!(outcome, Ok(false)));
    assert_eq!(exit_status(&outcome), 1);
}

#[test]
fn test_passing_run_exits_zero() {
    let registry = common::passing_registry();
    let args = CliArgs {
        device_name: "x4xx".to_string(),
        verbosity: Some(0),
        lang: Some("en".to_string()),
        ..CliArgs::default()
    };
    let outcome = process_with_registry(&args, &registry);
    assert!(matches!(outcome, Ok(true)));
    assert_eq!(exit_status(&outcome), 0);
}

#[test]
fn test_harness_error_exits_non_zero() {
    let args = CliArgs {
        config: Some("does-not-exist.toml".into()),
        ..CliArgs::default()
    };
    let outcome = process_with_registry(&args, &common::passing_registry());
    assert!(outcome.is_err());
    assert_eq!(exit_status(&outcome), 1);
}

#[test]
fn test_unknown_device_runs_generic_groups_only() {
    let registry = common::passing_registry();
    let result = run_tests(&registry, "not-a-device", false, &quiet_settings(), "en").unwrap();
    assert_eq!(result.tests_run(), 2);
    assert!(result.was_successful());
}

#[test]
fn test_default_catalogue_passes_in_simulation() {
    let registry = default_registry(true);
    let result = run_tests(&registry, "n3xx", false, &quiet_settings(), "en").unwrap();
    assert!(result.was_successful(), "{:?}", result.problems().collect::<Vec<_>>());
    // The product id check knows n3xx, so nothing is skipped.
    assert_eq!(result.skipped(), 0);
}

#[test]
fn test_default_catalogue_skips_device_check_without_device() {
    let registry = default_registry(true);
    let result = run_tests(&registry, "", false, &quiet_settings(), "en").unwrap();
    assert!(result.was_successful());
    assert_eq!(result.skipped(), 1);
}

#[cfg(feature = "xml-report")]
#[test]
fn test_xml_run_writes_reports() {
    let dir = tempdir().unwrap();
    let settings = RunnerSettings {
        report_dir: dir.path().join("reports"),
        ..quiet_settings()
    };
    let registry = common::failing_registry();
    let result = run_tests(&registry, "", true, &settings, "en").unwrap();
    assert!(!result.was_successful());

    let mut names: Vec<_> = std::fs::read_dir(&settings.report_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names.len(), 2);
    assert!(names[0].starts_with("TEST-FailingCase-"));
    assert!(names[1].starts_with("TEST-PassingCase-"));
}

#[cfg(not(feature = "xml-report"))]
#[test]
fn test_xml_request_falls_back_to_text() {
    let dir = tempdir().unwrap();
    let settings = RunnerSettings {
        report_dir: dir.path().join("reports"),
        ..quiet_settings()
    };
    let registry = common::failing_registry();
    let result = run_tests(&registry, "", true, &settings, "en").unwrap();
    assert!(!result.was_successful());
    assert!(!settings.report_dir.exists());
}

#[cfg(feature = "xml-report")]
#[test]
fn test_unwritable_report_dir_is_a_harness_error() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let settings = RunnerSettings {
        report_dir: blocker.join("reports"),
        ..quiet_settings()
    };
    let registry = common::passing_registry();
    let err = run_tests(&registry, "", true, &settings, "en").unwrap_err();
    assert!(err.to_string().contains("report directory"));
}
