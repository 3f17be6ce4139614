use crate::api::exports::is_safe_export_name;

use googletest::prelude::*;

#[gtest]
fn given_generated_export_name_when_checked_then_accepted() {
    assert_that!(
        is_safe_export_name("ps-session-4-20261018-101500-abcdef123456.json"),
        eq(true)
    );
}

#[gtest]
fn given_foreign_or_traversing_names_when_checked_then_rejected() {
    for name in [
        "config.toml",
        "ps-session-4.txt",
        "ps-session-..json",
        "ps-session-4/../../x.json",
        "ps-session-4\\x.json",
        ".htaccess",
    ] {
        expect_that!(is_safe_export_name(name), eq(false), "{}", name);
    }
}
