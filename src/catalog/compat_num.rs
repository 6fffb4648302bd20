//! Compat number checks.
//!
//! A compat number is a `major.minor` pair describing an interface revision.
//! A component is compatible when its major matches exactly; an older minor
//! is either an error or only worth a warning, depending on the caller.

use anyhow::{anyhow, bail, Result};
use std::fmt;
use std::str::FromStr;

use crate::core::case::{TestCase, TestMethod};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CompatNumber {
    pub major: u16,
    pub minor: u16,
}

impl CompatNumber {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for CompatNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for CompatNumber {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (major, minor) = s
            .trim()
            .split_once('.')
            .ok_or_else(|| anyhow!("compat number '{s}' is not of the form major.minor"))?;
        Ok(Self {
            major: major.parse()?,
            minor: minor.parse()?,
        })
    }
}

/// How an actual compat number relates to the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compat {
    Exact,
    NewerMinor,
    OlderMinor,
}

/// Checks `actual` against `expected`.
///
/// A major mismatch is always an error. An older minor is an error only when
/// `fail_on_old_minor` is set.
pub fn check_compat(
    expected: CompatNumber,
    actual: CompatNumber,
    fail_on_old_minor: bool,
) -> Result<Compat> {
    if expected.major != actual.major {
        bail!("major compat number mismatch: expected {expected}, got {actual}");
    }
    match actual.minor.cmp(&expected.minor) {
        std::cmp::Ordering::Equal => Ok(Compat::Exact),
        std::cmp::Ordering::Greater => Ok(Compat::NewerMinor),
        std::cmp::Ordering::Less if fail_on_old_minor => {
            bail!("minor compat number too old: expected {expected}, got {actual}")
        }
        std::cmp::Ordering::Less => Ok(Compat::OlderMinor),
    }
}

#[derive(Default)]
pub struct TestCompatNum;

impl TestCase for TestCompatNum {
    const NAME: &'static str = "TestCompatNum";

    fn tests() -> Vec<(&'static str, TestMethod<Self>)> {
        vec![
            ("test_parse", Self::test_parse),
            ("test_exact_match", Self::test_exact_match),
            ("test_major_mismatch", Self::test_major_mismatch),
            ("test_minor_newer", Self::test_minor_newer),
            ("test_minor_older", Self::test_minor_older),
            ("test_ordering", Self::test_ordering),
        ]
    }
}

impl TestCompatNum {
    fn test_parse(&mut self) -> Result<()> {
        let parsed: CompatNumber = "7.2".parse()?;
        assert_eq!(parsed, CompatNumber::new(7, 2));
        assert_eq!(parsed.to_string(), "7.2");
        assert!("7".parse::<CompatNumber>().is_err());
        assert!("a.b".parse::<CompatNumber>().is_err());
        Ok(())
    }

    fn test_exact_match(&mut self) -> Result<()> {
        let compat = check_compat(CompatNumber::new(3, 1), CompatNumber::new(3, 1), true)?;
        assert_eq!(compat, Compat::Exact);
        Ok(())
    }

    fn test_major_mismatch(&mut self) -> Result<()> {
        assert!(check_compat(CompatNumber::new(3, 1), CompatNumber::new(4, 1), false).is_err());
        assert!(check_compat(CompatNumber::new(3, 1), CompatNumber::new(2, 9), false).is_err());
        Ok(())
    }

    fn test_minor_newer(&mut self) -> Result<()> {
        let compat = check_compat(CompatNumber::new(3, 1), CompatNumber::new(3, 5), true)?;
        assert_eq!(compat, Compat::NewerMinor);
        Ok(())
    }

    fn test_minor_older(&mut self) -> Result<()> {
        let expected = CompatNumber::new(3, 4);
        let actual = CompatNumber::new(3, 2);
        assert!(check_compat(expected, actual, true).is_err());
        assert_eq!(check_compat(expected, actual, false)?, Compat::OlderMinor);
        Ok(())
    }

    fn test_ordering(&mut self) -> Result<()> {
        assert!(CompatNumber::new(1, 9) < CompatNumber::new(2, 0));
        assert!(CompatNumber::new(2, 10) > CompatNumber::new(2, 9));
        Ok(())
    }
}
