use proptest::prelude::*;
use sysprop::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PropertyEnum)]
enum Level {
    Low,
    Medium,
    #[property(rename = "very-high")]
    High,
}

fn level() -> impl Strategy<Value = Level> {
    prop_oneof![Just(Level::Low), Just(Level::Medium), Just(Level::High)]
}

/// Stores `value`'s canonical raw form and resolves it through a fresh property.
fn resolve_canonical<T: PropertyType>(default: T, value: &T) -> T {
    let props = Properties::new();
    let prop = props.builder::<T>().unwrap().name("p").default_value(default).build().unwrap();
    props.values().set("p", value.to_raw().unwrap());
    prop.value()
}

proptest! {
    #[test]
    fn unset_property_resolves_to_default(default in any::<i64>()) {
        let props = Properties::new();
        let prop = props.builder::<i64>().unwrap().name("n").default_value(default).build().unwrap();

        prop_assert_eq!(prop.value(), default);
        prop_assert_eq!(*prop.initial_value(), default);
    }

    #[test]
    fn canonical_raw_form_resolves_to_same_value(default in any::<i32>(), value in any::<i32>()) {
        let props = Properties::new();
        let prop = props.builder::<i32>().unwrap().name("n").default_value(default).build().unwrap();

        props.values().set("n", value.to_raw().unwrap());
        prop_assert_eq!(prop.value(), value);
    }

    #[test]
    fn resolution_is_idempotent(raw in ".{0,16}") {
        let props = Properties::new();
        let prop = props.builder::<f64>().unwrap().name("x").default_value(1.5).build().unwrap();

        props.values().set("x", raw);
        let first = prop.value();
        let second = prop.value();
        prop_assert!(first == second || (first.is_nan() && second.is_nan()));
    }

    #[test]
    fn bounded_value_never_leaves_range(raw in "-?[0-9]{1,4}") {
        let props = Properties::new();
        let prop = props
            .builder::<i32>()
            .unwrap()
            .name("n")
            .default_value(50)
            .minimum_value(10)
            .maximum_value(100)
            .build()
            .unwrap();

        props.values().set("n", raw);
        let value = prop.value();
        prop_assert!((10..=100).contains(&value));
    }

    #[test]
    fn lists_round_trip(items in proptest::collection::vec("[a-z0-9]{1,8}", 1..6)) {
        let props = Properties::new();
        let prop = props
            .builder::<Vec<String>>()
            .unwrap()
            .name("l")
            .default_value(vec!["x".to_owned()])
            .build()
            .unwrap();

        props.values().set("l", items.to_raw().unwrap());
        prop_assert_eq!(prop.value(), items);
    }

    #[test]
    fn doubles_round_trip(value in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
        prop_assert_eq!(resolve_canonical(1.5_f64, &value), value);
    }

    #[test]
    fn floats_round_trip(value in proptest::num::f32::NORMAL | proptest::num::f32::ZERO) {
        prop_assert_eq!(resolve_canonical(1.5_f32, &value), value);
    }

    #[test]
    fn booleans_round_trip(default in any::<bool>(), value in any::<bool>()) {
        prop_assert_eq!(resolve_canonical(default, &value), value);
    }

    #[test]
    fn strings_round_trip(value in "\\PC{0,32}") {
        prop_assert_eq!(resolve_canonical("fallback".to_owned(), &value), value);
    }

    #[test]
    fn enums_round_trip(default in level(), value in level()) {
        prop_assert_eq!(resolve_canonical(default, &value), value);
    }
}
