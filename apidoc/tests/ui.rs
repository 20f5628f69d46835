//! UI tests for `#[derive(Model)]` using trybuild.
//!
//! These tests verify that the derive:
//! 1. Accepts supported models and generates compilable code (pass tests)
//! 2. Rejects unsupported shapes with a pointed error (fail tests)

#[test]
fn ui_tests() {
    let t = trybuild::TestCases::new();

    t.pass("tests/ui/pass/*.rs");
    t.compile_fail("tests/ui/fail/*.rs");
}
