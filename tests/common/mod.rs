// Shared test groups and helpers for integration tests
#![allow(dead_code)]

use anyhow::{bail, Result};
use lazy_static::lazy_static;
use std::sync::Mutex;
use std::thread::{self, ThreadId};

use mpm_unit_tests::core::case::{DeviceAware, SkipTest, TestCase, TestMethod};
use mpm_unit_tests::core::registry::TestRegistry;

lazy_static! {
    /// Device names seen by `DeviceRecorder` test bodies, with the thread that ran
    /// them; `None` when the name was never set.
    pub static ref RECORDED_DEVICES: Mutex<Vec<(ThreadId, Option<String>)>> = Mutex::new(Vec::new());
    /// Device names seen by `PlainRecorder` test bodies; `None` when unset.
    pub static ref PLAIN_DEVICES: Mutex<Vec<Option<String>>> = Mutex::new(Vec::new());
}

#[derive(Default)]
pub struct PassingCase;

impl TestCase for PassingCase {
    const NAME: &'static str = "PassingCase";

    fn tests() -> Vec<(&'static str, TestMethod<Self>)> {
        vec![("test_one", Self::ok), ("test_two", Self::ok)]
    }
}

impl PassingCase {
    fn ok(&mut self) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct OtherPassingCase;

impl TestCase for OtherPassingCase {
    const NAME: &'static str = "OtherPassingCase";

    fn tests() -> Vec<(&'static str, TestMethod<Self>)> {
        vec![("test_alpha", Self::alpha)]
    }
}

impl OtherPassingCase {
    fn alpha(&mut self) -> Result<()> {
        Ok(())
    }
}

/// One passing test and one failing assertion.
#[derive(Default)]
pub struct FailingCase;

impl TestCase for FailingCase {
    const NAME: &'static str = "FailingCase";

    fn tests() -> Vec<(&'static str, TestMethod<Self>)> {
        vec![("test_fine", Self::fine), ("test_broken", Self::broken)]
    }
}

impl FailingCase {
    fn fine(&mut self) -> Result<()> {
        Ok(())
    }

    fn broken(&mut self) -> Result<()> {
        assert_eq!(1 + 1, 3, "arithmetic is broken");
        Ok(())
    }
}

#[derive(Default)]
pub struct ErroringCase;

impl TestCase for ErroringCase {
    const NAME: &'static str = "ErroringCase";

    fn tests() -> Vec<(&'static str, TestMethod<Self>)> {
        vec![("test_io", Self::io)]
    }
}

impl ErroringCase {
    fn io(&mut self) -> Result<()> {
        bail!("device node missing")
    }
}

#[derive(Default)]
pub struct SkippingCase;

impl TestCase for SkippingCase {
    const NAME: &'static str = "SkippingCase";

    fn tests() -> Vec<(&'static str, TestMethod<Self>)> {
        vec![("test_needs_hw", Self::needs_hw)]
    }
}

impl SkippingCase {
    fn needs_hw(&mut self) -> Result<()> {
        Err(SkipTest::new("no hardware").into())
    }
}

/// `set_up` fails, so the body must never run.
#[derive(Default)]
pub struct BrokenSetUpCase;

impl TestCase for BrokenSetUpCase {
    const NAME: &'static str = "BrokenSetUpCase";

    fn tests() -> Vec<(&'static str, TestMethod<Self>)> {
        vec![("test_unreachable", Self::unreachable)]
    }

    fn set_up(&mut self) -> Result<()> {
        bail!("cannot open device")
    }
}

impl BrokenSetUpCase {
    fn unreachable(&mut self) -> Result<()> {
        panic!("body ran after failed set_up")
    }
}

#[derive(Default)]
pub struct BrokenTearDownCase;

impl TestCase for BrokenTearDownCase {
    const NAME: &'static str = "BrokenTearDownCase";

    fn tests() -> Vec<(&'static str, TestMethod<Self>)> {
        vec![("test_passes", Self::passes)]
    }

    fn tear_down(&mut self) -> Result<()> {
        bail!("cannot release device")
    }
}

impl BrokenTearDownCase {
    fn passes(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Device-aware group recording the name it received.
#[derive(Default)]
pub struct DeviceRecorder {
    pub device_name: Option<String>,
}

impl TestCase for DeviceRecorder {
    const NAME: &'static str = "DeviceRecorder";

    fn tests() -> Vec<(&'static str, TestMethod<Self>)> {
        vec![("test_first", Self::record), ("test_second", Self::record)]
    }

    fn as_device_aware(&mut self) -> Option<&mut dyn DeviceAware> {
        Some(self)
    }
}

impl DeviceAware for DeviceRecorder {
    fn set_device_name(&mut self, device_name: &str) {
        self.device_name = Some(device_name.to_string());
    }
}

impl DeviceRecorder {
    fn record(&mut self) -> Result<()> {
        RECORDED_DEVICES
            .lock()
            .unwrap()
            .push((thread::current().id(), self.device_name.clone()));
        Ok(())
    }
}

/// Same shape as `DeviceRecorder`, without the capability.
#[derive(Default)]
pub struct PlainRecorder {
    pub device_name: Option<String>,
}

impl TestCase for PlainRecorder {
    const NAME: &'static str = "PlainRecorder";

    fn tests() -> Vec<(&'static str, TestMethod<Self>)> {
        vec![("test_record", Self::record)]
    }
}

impl PlainRecorder {
    fn record(&mut self) -> Result<()> {
        PLAIN_DEVICES.lock().unwrap().push(self.device_name.clone());
        Ok(())
    }
}

/// Generic: passing and failing groups. `x4xx`: a passing group and a repeat of a generic one.
pub fn failing_registry() -> TestRegistry {
    TestRegistry::builder()
        .generic::<PassingCase>()
        .generic::<FailingCase>()
        .case::<OtherPassingCase>("x4xx")
        .case::<PassingCase>("x4xx")
        .device("n3xx")
        .build()
}

/// Generic: passing groups only. `x4xx`: one extra passing group.
pub fn passing_registry() -> TestRegistry {
    TestRegistry::builder()
        .generic::<PassingCase>()
        .case::<OtherPassingCase>("x4xx")
        .device("n3xx")
        .build()
}

/// Device names `DeviceRecorder` recorded on the calling thread.
pub fn devices_recorded_here() -> Vec<Option<String>> {
    let here = thread::current().id();
    RECORDED_DEVICES
        .lock()
        .unwrap()
        .iter()
        .filter(|(thread_id, _)| *thread_id == here)
        .map(|(_, name)| name.clone())
        .collect()
}
