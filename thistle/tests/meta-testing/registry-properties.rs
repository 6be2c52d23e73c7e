//! Default registry properties
//!
//! Registered generators come back unchanged, built-in defaults drive
//! properties directly, and missing entries fail with a clear error.

use chrono::{DateTime, Utc};
use num_bigint::BigInt;

use crate::meta_config;
use thistle::*;

#[derive(Debug, Clone, PartialEq)]
struct Meters(u32);

#[derive(Debug, Clone, PartialEq)]
struct Unregistered;

/// Property: a registered generator is returned exactly
pub fn test_register_lookup_round_trip() {
    let gen = Gen::<u32>::from_range(Range::new(0, 10_000))
        .expect("valid range")
        .map(Meters);
    register_default(gen.clone());

    let found = lookup_default::<Meters>().expect("registered");
    assert!(found.ptr_eq(&gen));

    let prop = for_any::<Meters, _>(|&Meters(m)| m <= 10_000).expect("registered");
    match prop.run(&meta_config()) {
        TestResult::Pass { .. } => println!("✓ Registry round trip property passed"),
        result => panic!("Registry round trip property failed: {result}"),
    }
}

/// Looking up a type nobody registered is an error
pub fn test_unregistered_lookup_fails() {
    match lookup_default::<Unregistered>() {
        Err(Error::MissingGenerator { type_name }) => assert!(type_name.contains("Unregistered")),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected a missing generator"),
    }
    assert!(Gen::<Unregistered>::any().is_err());
}

/// Property: built-in defaults generate within their documented bounds
pub fn test_builtin_defaults_drive_properties() {
    let checks = vec![
        for_any::<BigInt, _>(|n| n.bits() <= 100)
            .expect("built in")
            .run(&meta_config()),
        for_any::<DateTime<Utc>, _>(|t| t.timestamp().abs() <= 100 * 365 * 86_400)
            .expect("built in")
            .run(&meta_config()),
        for_any::<Vec<i64>, _>(|xs| xs.len() <= 100)
            .expect("built in")
            .run(&meta_config()),
        for_any_args::<(String, bool, Option<i32>), _>(|(s, _, _)| s.chars().all(|c| c.is_ascii_alphanumeric()))
            .expect("built in")
            .run(&meta_config()),
    ];

    for result in checks {
        match result {
            TestResult::Pass { .. } => println!("✓ Built-in default property passed"),
            result => panic!("Built-in default property failed: {result}"),
        }
    }
}

/// Argument lookups report which argument is missing
pub fn test_argument_errors_name_position() {
    match for_any_args::<(i32, Unregistered, bool), _>(|_| true) {
        Err(error @ Error::MissingArgumentGenerator { .. }) => {
            let message = error.to_string();
            assert!(message.contains("argument 1 of 3"), "{message}");
            assert!(message.contains("Unregistered"), "{message}");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected a missing generator"),
    }
}
