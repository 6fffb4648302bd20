//! Zynq programmable-logic checks. Only built for real hardware.

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

use crate::core::case::{DeviceAware, SkipTest, TestCase, TestMethod};

const FPGA_MANAGER: &str = "/sys/class/fpga_manager/fpga0";
const DT_COMPATIBLE: &str = "/proc/device-tree/compatible";

#[derive(Default)]
pub struct TestZynqComponents {
    device_name: Option<String>,
}

impl TestCase for TestZynqComponents {
    const NAME: &'static str = "TestZynqComponents";

    fn tests() -> Vec<(&'static str, TestMethod<Self>)> {
        vec![
            ("test_fpga_manager_state", Self::test_fpga_manager_state),
            ("test_device_tree_compatible", Self::test_device_tree_compatible),
        ]
    }

    fn set_up(&mut self) -> Result<()> {
        if !Path::new(FPGA_MANAGER).exists() {
            return Err(SkipTest::new(format!("{FPGA_MANAGER} not present")).into());
        }
        Ok(())
    }

    fn as_device_aware(&mut self) -> Option<&mut dyn DeviceAware> {
        Some(self)
    }
}

impl DeviceAware for TestZynqComponents {
    fn set_device_name(&mut self, device_name: &str) {
        self.device_name = Some(device_name.to_string());
    }
}

impl TestZynqComponents {
    fn test_fpga_manager_state(&mut self) -> Result<()> {
        let state_path = Path::new(FPGA_MANAGER).join("state");
        let state = fs::read_to_string(&state_path)
            .with_context(|| format!("reading {}", state_path.display()))?;
        assert_eq!(state.trim(), "operating", "FPGA is not configured");
        Ok(())
    }

    fn test_device_tree_compatible(&mut self) -> Result<()> {
        let raw = fs::read(DT_COMPATIBLE).with_context(|| format!("reading {DT_COMPATIBLE}"))?;
        let compatible: Vec<_> = raw
            .split(|b| *b == 0)
            .filter(|entry| !entry.is_empty())
            .map(String::from_utf8_lossy)
            .collect();
        debug!(
            "device tree compatible for {}: {:?}",
            self.device_name.as_deref().unwrap_or("<none>"),
            compatible
        );
        assert!(
            compatible.iter().any(|entry| entry.contains("zynq")),
            "no zynq entry in {compatible:?}"
        );
        Ok(())
    }
}
