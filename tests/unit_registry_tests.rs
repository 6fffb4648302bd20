//! # Registry Unit Tests / 注册表单元测试
//!
//! Tests for `TestRegistry` construction and lookups, and for the default
//! catalogue registry.
//!
//! `TestRegistry` 构建与查找以及默认目录注册表的测试。

mod common;

use common::{FailingCase, OtherPassingCase, PassingCase};
use mpm_unit_tests::catalog::{self, default_registry};
use mpm_unit_tests::core::case::{CaseClass, TestCase, TestMethod};
use mpm_unit_tests::core::registry::{TestRegistry, ALL_DEVICES};

/// A different group that happens to reuse the name of `PassingCase`.
#[derive(Default)]
struct SameNamedCase;

impl TestCase for SameNamedCase {
    const NAME: &'static str = "PassingCase";

    fn tests() -> Vec<(&'static str, TestMethod<Self>)> {
        vec![("test_other", Self::other)]
    }
}

impl SameNamedCase {
    fn other(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

fn names(classes: impl IntoIterator<Item = CaseClass>) -> Vec<&'static str> {
    classes.into_iter().map(|c| c.name()).collect()
}

#[cfg(test)]
mod registry_tests {
    use super::*;

    #[test]
    fn test_unknown_device_yields_generic_cases() {
        let registry = common::failing_registry();
        let generic = registry.cases_for("");
        assert_eq!(names(registry.cases_for("e3xx")), names(generic.clone()));
        assert_eq!(names(generic), vec!["FailingCase", "PassingCase"]);
    }

    #[test]
    fn test_known_device_yields_union_without_duplicates() {
        let registry = common::failing_registry();
        let cases = registry.cases_for("x4xx");
        // PassingCase is registered both generically and for x4xx.
        assert_eq!(
            names(cases),
            vec!["FailingCase", "OtherPassingCase", "PassingCase"]
        );
    }

    #[test]
    fn test_device_without_specific_cases() {
        let registry = common::failing_registry();
        assert!(registry.contains_device("n3xx"));
        assert_eq!(names(registry.cases_for("n3xx")), names(registry.cases_for("")));
    }

    #[test]
    fn test_all_key_is_not_a_device() {
        let registry = common::failing_registry();
        assert!(!registry.contains_device(ALL_DEVICES));
        assert!(!registry.contains_device(""));
        let devices: Vec<_> = registry.devices().collect();
        assert_eq!(devices, vec!["n3xx", "x4xx"]);
    }

    #[test]
    fn test_get_returns_only_exact_key() {
        let registry = common::failing_registry();
        let x4xx = registry.get("x4xx").expect("x4xx entry");
        assert_eq!(names(x4xx.iter().copied()), vec!["OtherPassingCase", "PassingCase"]);
        assert!(registry.get("e3xx").is_none());
    }

    #[test]
    fn test_empty_registry_still_has_generic_entry() {
        let registry = TestRegistry::builder().build();
        assert!(registry.get(ALL_DEVICES).is_some());
        assert!(registry.cases_for("x4xx").is_empty());
    }

    #[test]
    fn test_case_class_identity_is_the_group_type() {
        assert_eq!(CaseClass::of::<PassingCase>(), CaseClass::of::<PassingCase>());
        assert_ne!(CaseClass::of::<PassingCase>(), CaseClass::of::<FailingCase>());
        assert_ne!(CaseClass::of::<PassingCase>(), CaseClass::of::<SameNamedCase>());
        assert!(CaseClass::of::<OtherPassingCase>() < CaseClass::of::<PassingCase>());
    }

    #[test]
    fn test_same_named_groups_are_not_merged() {
        let registry = TestRegistry::builder()
            .generic::<PassingCase>()
            .case::<SameNamedCase>("x4xx")
            .build();
        let cases = registry.cases_for("x4xx");
        assert_eq!(names(cases.iter().copied()), vec!["PassingCase", "PassingCase"]);
        let tests: usize = cases.iter().map(|c| c.load().len()).sum();
        assert_eq!(tests, 3);
    }
}

#[cfg(test)]
mod catalog_tests {
    use super::*;

    #[test]
    fn test_default_registry_generic_groups() {
        let registry = default_registry(true);
        assert_eq!(
            names(registry.cases_for("")),
            vec!["TestCompatNum", "TestEeprom", "TestMpmUtils", "TestNet"]
        );
    }

    #[test]
    fn test_default_registry_devices() {
        let registry = default_registry(true);
        let devices: Vec<_> = registry.devices().collect();
        assert_eq!(devices, catalog::DEVICES.to_vec());
    }

    #[test]
    fn test_simulated_registry_has_no_hardware_groups() {
        let registry = default_registry(true);
        assert!(registry.get("x4xx").expect("x4xx entry").is_empty());
        assert_eq!(names(registry.cases_for("x4xx")), names(registry.cases_for("")));
    }

    #[cfg(not(feature = "hardware"))]
    #[test]
    fn test_hardware_groups_absent_from_simulated_build() {
        assert!(catalog::SIMULATED);
        assert!(catalog::hardware_cases().is_empty());
        // Asking for real hardware cannot add groups that are not linked in.
        let registry = default_registry(false);
        assert!(registry.get("x4xx").expect("x4xx entry").is_empty());
    }

    #[cfg(feature = "hardware")]
    #[test]
    fn test_hardware_registry_adds_zynq_components_to_x4xx() {
        assert!(!catalog::SIMULATED);
        let registry = default_registry(false);
        assert_eq!(
            names(registry.get("x4xx").expect("x4xx entry").iter().copied()),
            vec!["TestZynqComponents"]
        );
        assert!(registry.get("n3xx").expect("n3xx entry").is_empty());
    }
}
