use colored::*;

use crate::core::registry::TestRegistry;
use crate::core::suite::{build_suite, TestSuite};
use crate::infra::t;

/// Prints the groups and tests a run for `device_name` would execute.
pub fn execute(registry: &TestRegistry, device_name: &str, locale: &str) {
    let suite = build_suite(registry, device_name);
    let device = if device_name.is_empty() {
        t!("list.generic", locale = locale).to_string()
    } else {
        device_name.to_string()
    };
    println!("{}", t!("list.header", locale = locale, device = device).bold());
    print!("{}", format_listing(&suite));
    println!(
        "{}",
        t!(
            "list.total",
            locale = locale,
            tests = suite.count_tests(),
            groups = suite.cases().len()
        )
        .cyan()
    );
}

/// One `Group` line per group followed by its indented test ids.
pub fn format_listing(suite: &TestSuite) -> String {
    let mut listing = String::new();
    for case_suite in suite.cases() {
        listing.push_str(case_suite.name());
        listing.push('\n');
        for test in case_suite.tests() {
            listing.push_str("  ");
            listing.push_str(&test.id());
            listing.push('\n');
        }
    }
    listing
}
