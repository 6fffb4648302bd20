//! # Test Case Module / 测试用例模块
//!
//! This module defines what a test case group is: a type grouping related test
//! methods that share `set_up`/`tear_down`, and the optional `DeviceAware`
//! capability through which a group receives the target device name.
//!
//! 此模块定义测试用例组：一个将共享 `set_up`/`tear_down` 的相关测试方法组合在一起的类型，
//! 以及可选的 `DeviceAware` 能力，测试组通过它接收目标设备名称。

use anyhow::Result;
use std::any::TypeId;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::core::suite::{self, CaseSuite};

/// A single test method of a group. It receives a freshly constructed instance.
/// 测试组中的单个测试方法。它接收一个新构造的实例。
pub type TestMethod<C> = fn(&mut C) -> Result<()>;

/// A group of related test methods.
///
/// The loader creates one fresh instance (via `Default`) per test method, so
/// state set up for one method never leaks into another.
///
/// 一组相关的测试方法。
/// 加载器为每个测试方法创建一个新实例（通过 `Default`），因此一个方法的状态不会泄漏到另一个方法。
pub trait TestCase: Default + 'static {
    /// The group name used in reports, e.g. `TestNet`.
    const NAME: &'static str;

    /// All test methods of the group, in declaration order.
    fn tests() -> Vec<(&'static str, TestMethod<Self>)>;

    /// Runs before every test method.
    fn set_up(&mut self) -> Result<()> {
        Ok(())
    }

    /// Runs after every test method whose `set_up` succeeded.
    fn tear_down(&mut self) -> Result<()> {
        Ok(())
    }

    /// Exposes the device-context capability, if the group has one.
    /// 如果测试组具有设备上下文能力，则将其公开。
    fn as_device_aware(&mut self) -> Option<&mut dyn DeviceAware> {
        None
    }
}

/// Capability of groups that configure themselves for a named hardware target.
/// 为指定硬件目标配置自身的测试组所具有的能力。
pub trait DeviceAware {
    fn set_device_name(&mut self, device_name: &str);
}

/// Marker error for a test that decided at runtime it cannot run here.
///
/// Return it through `anyhow`, e.g. `return Err(SkipTest::new("no sysfs").into())`,
/// and the runner records the test as skipped instead of errored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipTest {
    pub reason: String,
}

impl SkipTest {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SkipTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped: {}", self.reason)
    }
}

impl std::error::Error for SkipTest {}

/// A type-erased identifier of a test case group, the unit stored in the registry.
///
/// Two `CaseClass` values are equal when they describe the same group type, which
/// is what makes the union of registry sets free of duplicates. Distinct types
/// sharing a `NAME` stay distinct. Ordering is by name.
///
/// 测试用例组的类型擦除标识符，是注册表中存储的单元。
/// 当两个 `CaseClass` 描述同一个测试组类型时它们相等，这保证了注册表集合的并集没有重复项。
/// 共享同一 `NAME` 的不同类型仍然是不同的。按名称排序。
#[derive(Clone, Copy)]
pub struct CaseClass {
    name: &'static str,
    type_id: TypeId,
    loader: fn() -> CaseSuite,
}

impl CaseClass {
    /// Describes the group `C`.
    pub fn of<C: TestCase>() -> Self {
        Self {
            name: C::NAME,
            type_id: TypeId::of::<C>(),
            loader: suite::load_tests_from_case::<C>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Loads one fresh instance per test method of the group.
    pub fn load(&self) -> CaseSuite {
        (self.loader)()
    }
}

impl fmt::Debug for CaseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CaseClass").field(&self.name).finish()
    }
}

impl PartialEq for CaseClass {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for CaseClass {}

impl Hash for CaseClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl PartialOrd for CaseClass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CaseClass {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(other.name)
            .then_with(|| self.type_id.cmp(&other.type_id))
    }
}
