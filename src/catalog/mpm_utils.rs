//! Helper conversions shared by MPM components: NUL-terminated strings from
//! hardware buffers, hex register values and boolean settings.

use anyhow::{bail, Context, Result};

use crate::core::case::{TestCase, TestMethod};

/// Decodes a NUL-terminated byte buffer, ignoring everything after the first NUL.
pub fn to_native_str(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Parses a register value written as hex, with or without the `0x` prefix.
pub fn parse_hex(value: &str) -> Result<u32> {
    let value = value.trim();
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u32::from_str_radix(digits, 16).with_context(|| format!("'{value}' is not a hex value"))
}

/// Parses the boolean spellings accepted in device arguments.
pub fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("'{other}' is not a boolean"),
    }
}

#[derive(Default)]
pub struct TestMpmUtils;

impl TestCase for TestMpmUtils {
    const NAME: &'static str = "TestMpmUtils";

    fn tests() -> Vec<(&'static str, TestMethod<Self>)> {
        vec![
            ("test_to_native_str", Self::test_to_native_str),
            ("test_parse_hex", Self::test_parse_hex),
            ("test_parse_bool", Self::test_parse_bool),
        ]
    }
}

impl TestMpmUtils {
    fn test_to_native_str(&mut self) -> Result<()> {
        assert_eq!(to_native_str(b"x410\0\0\0\0"), "x410");
        assert_eq!(to_native_str(b"n310"), "n310");
        assert_eq!(to_native_str(b"\0garbage"), "");
        assert_eq!(to_native_str(b""), "");
        Ok(())
    }

    fn test_parse_hex(&mut self) -> Result<()> {
        assert_eq!(parse_hex("0x4242")?, 0x4242);
        assert_eq!(parse_hex("0XdeadBEEF")?, 0xDEAD_BEEF);
        assert_eq!(parse_hex(" 410 ")?, 0x410);
        assert!(parse_hex("0x").is_err());
        assert!(parse_hex("0x1_0000_0000").is_err());
        Ok(())
    }

    fn test_parse_bool(&mut self) -> Result<()> {
        assert!(parse_bool("True")?);
        assert!(parse_bool("1")?);
        assert!(!parse_bool("off")?);
        assert!(parse_bool("maybe").is_err());
        Ok(())
    }
}
