//! # Test Suite Module / 测试套件模块
//!
//! This module loads test case groups into runnable test instances and
//! assembles them into a single suite for a requested device.
//!
//! 此模块将测试用例组加载为可运行的测试实例，并为请求的设备将它们组装成单个测试套件。

use anyhow::Result;
use log::debug;
use std::fmt;

use crate::core::case::{DeviceAware, TestCase, TestMethod};
use crate::core::registry::TestRegistry;

/// A runnable test: one method bound to its own group instance.
/// 一个可运行的测试：绑定到其自身测试组实例的单个方法。
pub trait Test {
    /// Name of the group the test belongs to.
    fn case_name(&self) -> &'static str;

    /// Name of the test method.
    fn method_name(&self) -> &'static str;

    /// `Group.method`, unique within a suite.
    fn id(&self) -> String {
        format!("{}.{}", self.case_name(), self.method_name())
    }

    fn set_up(&mut self) -> Result<()>;

    fn call(&mut self) -> Result<()>;

    fn tear_down(&mut self) -> Result<()>;

    /// The device-context capability of the underlying instance, if any.
    fn as_device_aware(&mut self) -> Option<&mut dyn DeviceAware>;
}

/// A group instance paired with the method it will run.
struct TestInstance<C: TestCase> {
    case: C,
    method_name: &'static str,
    method: TestMethod<C>,
}

impl<C: TestCase> Test for TestInstance<C> {
    fn case_name(&self) -> &'static str {
        C::NAME
    }

    fn method_name(&self) -> &'static str {
        self.method_name
    }

    fn set_up(&mut self) -> Result<()> {
        self.case.set_up()
    }

    fn call(&mut self) -> Result<()> {
        (self.method)(&mut self.case)
    }

    fn tear_down(&mut self) -> Result<()> {
        self.case.tear_down()
    }

    fn as_device_aware(&mut self) -> Option<&mut dyn DeviceAware> {
        self.case.as_device_aware()
    }
}

/// All loaded tests of one group.
/// 一个测试组的所有已加载测试。
pub struct CaseSuite {
    name: &'static str,
    tests: Vec<Box<dyn Test>>,
}

impl CaseSuite {
    pub fn new(name: &'static str, tests: Vec<Box<dyn Test>>) -> Self {
        Self { name, tests }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn tests(&self) -> &[Box<dyn Test>] {
        &self.tests
    }

    pub fn tests_mut(&mut self) -> &mut [Box<dyn Test>] {
        &mut self.tests
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

impl fmt::Debug for CaseSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let methods: Vec<_> = self.tests.iter().map(|t| t.method_name()).collect();
        f.debug_struct("CaseSuite")
            .field("name", &self.name)
            .field("tests", &methods)
            .finish()
    }
}

/// The master suite: per-group sub-suites concatenated in group-name order.
/// 主测试套件：按测试组名称顺序连接的各组子套件。
#[derive(Debug, Default)]
pub struct TestSuite {
    cases: Vec<CaseSuite>,
}

impl TestSuite {
    pub fn new(cases: Vec<CaseSuite>) -> Self {
        Self { cases }
    }

    pub fn cases(&self) -> &[CaseSuite] {
        &self.cases
    }

    pub fn cases_mut(&mut self) -> &mut [CaseSuite] {
        &mut self.cases
    }

    /// Names of the groups in the suite, in run order.
    pub fn case_names(&self) -> Vec<&'static str> {
        self.cases.iter().map(CaseSuite::name).collect()
    }

    /// Total number of runnable tests across all groups.
    pub fn count_tests(&self) -> usize {
        self.cases.iter().map(CaseSuite::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.count_tests() == 0
    }
}

/// Loads every test method of `C` into its own fresh instance.
///
/// 将 `C` 的每个测试方法加载到其各自的新实例中。
pub fn load_tests_from_case<C: TestCase>() -> CaseSuite {
    let tests = C::tests()
        .into_iter()
        .map(|(method_name, method)| {
            Box::new(TestInstance {
                case: C::default(),
                method_name,
                method,
            }) as Box<dyn Test>
        })
        .collect();
    CaseSuite::new(C::NAME, tests)
}

/// Builds the suite relevant for `device_name`.
///
/// The generic `__all__` groups are always included; groups registered under
/// `device_name` are added on top. An unknown or empty device name only yields
/// the generic groups. Every loaded instance that is `DeviceAware` receives the
/// device name, unless the name is empty.
///
/// 构建与 `device_name` 相关的测试套件。
/// 通用的 `__all__` 测试组总是包含在内；在 `device_name` 下注册的测试组会额外添加。
/// 未知或空的设备名称只会得到通用测试组。每个实现 `DeviceAware` 的已加载实例都会收到设备名称，
/// 除非名称为空。
pub fn build_suite(registry: &TestRegistry, device_name: &str) -> TestSuite {
    if !device_name.is_empty() && !registry.contains_device(device_name) {
        debug!("no device-specific tests registered for '{device_name}'");
    }

    let cases = registry.cases_for(device_name);
    let mut suites = Vec::with_capacity(cases.len());

    for class in cases {
        let mut case_suite = class.load();
        if !device_name.is_empty() {
            for test in case_suite.tests_mut() {
                // Each test owns its instance, so every one is configured separately.
                if let Some(device_aware) = test.as_device_aware() {
                    device_aware.set_device_name(device_name);
                }
            }
        }
        debug!("loaded {} test(s) from {}", case_suite.len(), case_suite.name());
        suites.push(case_suite);
    }

    TestSuite::new(suites)
}
