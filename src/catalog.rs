//! # Test Catalogue Module / 测试目录模块
//!
//! The built-in test groups and the registry that maps devices to them.
//! Whether the hardware-only groups exist at all is decided at build time by
//! the `hardware` cargo feature.
//!
//! 内置测试组以及将设备映射到它们的注册表。
//! 仅限硬件的测试组是否存在，在构建时由 `hardware` cargo feature 决定。

use log::debug;

use crate::core::case::CaseClass;
use crate::core::registry::TestRegistry;

pub mod compat_num;
#[cfg(feature = "hardware")]
pub mod components;
pub mod eeprom;
pub mod mpm_utils;
pub mod net;

pub use compat_num::TestCompatNum;
#[cfg(feature = "hardware")]
pub use components::TestZynqComponents;
pub use eeprom::TestEeprom;
pub use mpm_utils::TestMpmUtils;
pub use net::TestNet;

/// `true` unless the crate was built with the `hardware` feature.
pub const SIMULATED: bool = !cfg!(feature = "hardware");

/// Device families with an entry in the default registry.
pub const DEVICES: [&str; 2] = ["n3xx", "x4xx"];

/// Builds the default registry.
///
/// The generic groups run for every device. `x4xx` additionally gets the
/// hardware-only groups when `simulated` is `false` and they are linked in.
///
/// 构建默认注册表。
/// 通用测试组对每个设备都运行。当 `simulated` 为 `false` 且仅限硬件的测试组已链接时，
/// `x4xx` 还会获得这些测试组。
pub fn default_registry(simulated: bool) -> TestRegistry {
    let mut builder = TestRegistry::builder()
        .generic::<TestNet>()
        .generic::<TestMpmUtils>()
        .generic::<TestEeprom>()
        .generic::<TestCompatNum>();

    for device in DEVICES {
        builder = builder.device(device);
    }

    if !simulated {
        for class in hardware_cases() {
            debug!("registering hardware group {} for x4xx", class.name());
            builder = builder.class("x4xx", class);
        }
    }

    builder.build()
}

/// Groups that need real hardware.
#[cfg(feature = "hardware")]
pub fn hardware_cases() -> Vec<CaseClass> {
    vec![CaseClass::of::<TestZynqComponents>()]
}

/// Groups that need real hardware. None are linked into simulated builds.
#[cfg(not(feature = "hardware"))]
pub fn hardware_cases() -> Vec<CaseClass> {
    Vec::new()
}
