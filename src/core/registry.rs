//! # Test Registry Module / 测试注册表模块
//!
//! Maps device names to the test case groups that apply to them. The special
//! `__all__` key holds the groups that run for every device.
//!
//! 将设备名称映射到适用于它们的测试用例组。特殊键 `__all__` 包含对每个设备都运行的测试组。

use std::collections::{BTreeMap, BTreeSet};

use crate::core::case::{CaseClass, TestCase};

/// Registry key of the groups that run regardless of the device.
/// 无论设备如何都会运行的测试组的注册表键。
pub const ALL_DEVICES: &str = "__all__";

/// An immutable device-name to test-group mapping.
///
/// Built once through [`RegistryBuilder`]; there is no way to mutate it afterwards.
#[derive(Debug, Clone, Default)]
pub struct TestRegistry {
    entries: BTreeMap<String, BTreeSet<CaseClass>>,
}

impl TestRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Groups registered under exactly `key`, without the generic ones.
    pub fn get(&self, key: &str) -> Option<&BTreeSet<CaseClass>> {
        self.entries.get(key)
    }

    /// Whether `device_name` has its own entry. `__all__` is not a device.
    pub fn contains_device(&self, device_name: &str) -> bool {
        device_name != ALL_DEVICES && self.entries.contains_key(device_name)
    }

    /// Device keys with an entry, `__all__` excluded.
    pub fn devices(&self) -> impl Iterator<Item = &str> {
        self.entries
            .keys()
            .map(String::as_str)
            .filter(|key| *key != ALL_DEVICES)
    }

    /// The generic groups united with the groups registered for `device_name`.
    /// Unknown names contribute nothing.
    ///
    /// 通用测试组与为 `device_name` 注册的测试组的并集。未知名称不贡献任何内容。
    pub fn cases_for(&self, device_name: &str) -> BTreeSet<CaseClass> {
        let empty = BTreeSet::new();
        let generic = self.entries.get(ALL_DEVICES).unwrap_or(&empty);
        let specific = self.entries.get(device_name).unwrap_or(&empty);
        generic.union(specific).copied().collect()
    }
}

/// Collects registry entries before freezing them into a [`TestRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: BTreeMap<String, BTreeSet<CaseClass>>,
}

impl RegistryBuilder {
    /// Registers `C` for every device.
    pub fn generic<C: TestCase>(self) -> Self {
        self.case::<C>(ALL_DEVICES)
    }

    /// Registers `C` under `device_name`.
    pub fn case<C: TestCase>(self, device_name: &str) -> Self {
        self.class(device_name, CaseClass::of::<C>())
    }

    /// Registers an already erased group under `device_name`.
    pub fn class(mut self, device_name: &str, class: CaseClass) -> Self {
        self.entries
            .entry(device_name.to_string())
            .or_default()
            .insert(class);
        self
    }

    /// Declares a device key that has no device-specific groups (yet).
    pub fn device(mut self, device_name: &str) -> Self {
        self.entries.entry(device_name.to_string()).or_default();
        self
    }

    pub fn build(mut self) -> TestRegistry {
        self.entries.entry(ALL_DEVICES.to_string()).or_default();
        TestRegistry {
            entries: self.entries,
        }
    }
}
