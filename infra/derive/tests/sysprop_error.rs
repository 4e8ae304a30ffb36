#[test]
fn sysprop_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/sysprop_error_pass.rs");
}
