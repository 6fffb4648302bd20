//! Motherboard EEPROM header checks.
//!
//! Header layout, all integers big endian:
//!
//! | offset | size | field                          |
//! |--------|------|--------------------------------|
//! | 0      | 4    | magic `0xF008AD10`             |
//! | 4      | 4    | format version                 |
//! | 8      | 2    | product id                     |
//! | 10     | 2    | revision                       |
//! | 12     | 8    | serial, NUL padded ASCII       |
//! | 20     | 4    | CRC-32 (IEEE) of bytes 0..20   |

use anyhow::{bail, Result};

use crate::catalog::mpm_utils::to_native_str;
use crate::core::case::{DeviceAware, SkipTest, TestCase, TestMethod};

pub const EEPROM_MAGIC: u32 = 0xF008_AD10;
pub const HEADER_LEN: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EepromHeader {
    pub version: u32,
    pub pid: u16,
    pub rev: u16,
    pub serial: String,
}

impl EepromHeader {
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut blob = [0u8; HEADER_LEN];
        blob[0..4].copy_from_slice(&EEPROM_MAGIC.to_be_bytes());
        blob[4..8].copy_from_slice(&self.version.to_be_bytes());
        blob[8..10].copy_from_slice(&self.pid.to_be_bytes());
        blob[10..12].copy_from_slice(&self.rev.to_be_bytes());
        let serial = self.serial.as_bytes();
        let len = serial.len().min(8);
        blob[12..12 + len].copy_from_slice(&serial[..len]);
        let crc = crc32(&blob[..20]);
        blob[20..24].copy_from_slice(&crc.to_be_bytes());
        blob
    }

    pub fn parse(blob: &[u8]) -> Result<Self> {
        if blob.len() < HEADER_LEN {
            bail!("EEPROM header truncated: {} of {HEADER_LEN} bytes", blob.len());
        }
        let magic = u32::from_be_bytes([blob[0], blob[1], blob[2], blob[3]]);
        if magic != EEPROM_MAGIC {
            bail!("bad EEPROM magic {magic:#010x}");
        }
        let stored_crc = u32::from_be_bytes([blob[20], blob[21], blob[22], blob[23]]);
        let computed_crc = crc32(&blob[..20]);
        if stored_crc != computed_crc {
            bail!("EEPROM CRC mismatch: stored {stored_crc:#010x}, computed {computed_crc:#010x}");
        }
        Ok(Self {
            version: u32::from_be_bytes([blob[4], blob[5], blob[6], blob[7]]),
            pid: u16::from_be_bytes([blob[8], blob[9]]),
            rev: u16::from_be_bytes([blob[10], blob[11]]),
            serial: to_native_str(&blob[12..20]),
        })
    }
}

/// Product id programmed into the EEPROM of each device family.
pub fn product_id(device_name: &str) -> Option<u16> {
    match device_name {
        "n3xx" => Some(0x4242),
        "x4xx" => Some(0x0410),
        _ => None,
    }
}

/// CRC-32 (IEEE 802.3, reflected).
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for byte in data {
        crc ^= u32::from(*byte);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

#[derive(Default)]
pub struct TestEeprom {
    device_name: Option<String>,
}

impl TestCase for TestEeprom {
    const NAME: &'static str = "TestEeprom";

    fn tests() -> Vec<(&'static str, TestMethod<Self>)> {
        vec![
            ("test_crc32", Self::test_crc32),
            ("test_parse_header", Self::test_parse_header),
            ("test_bad_magic", Self::test_bad_magic),
            ("test_truncated", Self::test_truncated),
            ("test_corrupt_crc", Self::test_corrupt_crc),
            ("test_device_product_id", Self::test_device_product_id),
        ]
    }

    fn as_device_aware(&mut self) -> Option<&mut dyn DeviceAware> {
        Some(self)
    }
}

impl DeviceAware for TestEeprom {
    fn set_device_name(&mut self, device_name: &str) {
        self.device_name = Some(device_name.to_string());
    }
}

impl TestEeprom {
    fn sample_header(pid: u16) -> EepromHeader {
        EepromHeader {
            version: 3,
            pid,
            rev: 2,
            serial: "31A4F2C".to_string(),
        }
    }

    fn test_crc32(&mut self) -> Result<()> {
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
        assert_eq!(crc32(b""), 0);
        Ok(())
    }

    fn test_parse_header(&mut self) -> Result<()> {
        let header = Self::sample_header(0x4242);
        let parsed = EepromHeader::parse(&header.to_bytes())?;
        assert_eq!(parsed, header);
        Ok(())
    }

    fn test_bad_magic(&mut self) -> Result<()> {
        let mut blob = Self::sample_header(0x4242).to_bytes();
        blob[0] = 0;
        let err = EepromHeader::parse(&blob).unwrap_err();
        assert!(err.to_string().contains("magic"));
        Ok(())
    }

    fn test_truncated(&mut self) -> Result<()> {
        let blob = Self::sample_header(0x4242).to_bytes();
        assert!(EepromHeader::parse(&blob[..HEADER_LEN - 1]).is_err());
        Ok(())
    }

    fn test_corrupt_crc(&mut self) -> Result<()> {
        let mut blob = Self::sample_header(0x4242).to_bytes();
        blob[13] ^= 0xFF;
        let err = EepromHeader::parse(&blob).unwrap_err();
        assert!(err.to_string().contains("CRC"));
        Ok(())
    }

    fn test_device_product_id(&mut self) -> Result<()> {
        let Some(device_name) = self.device_name.as_deref() else {
            return Err(SkipTest::new("no device name given").into());
        };
        let Some(pid) = product_id(device_name) else {
            return Err(SkipTest::new(format!("no product id known for {device_name}")).into());
        };
        let parsed = EepromHeader::parse(&Self::sample_header(pid).to_bytes())?;
        assert_eq!(product_id(device_name), Some(parsed.pid));
        Ok(())
    }
}
