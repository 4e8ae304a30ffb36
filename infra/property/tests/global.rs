use serial_test::serial;
use sysprop::prelude::*;

#[test]
#[serial]
fn global_handle_is_shared() {
    let first = Properties::global();
    let second = Properties::global();
    assert!(Properties::ptr_eq(first, second));

    assert!(Properties::new().install().is_err());
}

#[test]
#[serial]
fn builder_of_registers_globally() {
    let timeout = PropertyBuilder::<i64>::of()
        .unwrap()
        .name("global.timeout.ms")
        .default_value(1_000)
        .build()
        .unwrap();

    Properties::global().values().set("global.timeout.ms", "250");
    assert_eq!(timeout.value(), 250);

    let stored = Properties::global().get::<i64>("global.timeout.ms").unwrap();
    assert!(SystemProperty::ptr_eq(&timeout, &stored));

    let duplicate = PropertyBuilder::<i64>::of()
        .unwrap()
        .name("global.timeout.ms")
        .default_value(5)
        .build()
        .unwrap_err();
    assert_eq!(duplicate.violation(), Some(Violation::NameExists));
}
