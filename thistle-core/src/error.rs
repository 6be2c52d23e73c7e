//! Error types for Thistle.
//!
//! Only configuration mistakes are errors. A failing property is the normal
//! signal that starts shrinking and is reported through
//! [`TestResult`](crate::property::TestResult) instead.

use thiserror::Error;

/// Main error type for Thistle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The default registry has no generator for a requested type.
    #[error("No generator registered for type {type_name}")]
    MissingGenerator { type_name: &'static str },

    /// A property argument has no default generator.
    #[error(
        "No generator found for argument {index} of {arity} (type {type_name}); \
         register one with register_default or pass a generator explicitly"
    )]
    MissingArgumentGenerator {
        index: usize,
        arity: usize,
        type_name: &'static str,
    },

    /// Two entries passed to a choice generator compare equal.
    #[error("Duplicate values passed to choose: entries {first} and {second} are equal")]
    DuplicateChoice { first: usize, second: usize },

    /// A choice generator was given nothing to choose from.
    #[error("Cannot choose from an empty list")]
    EmptyChoice,

    /// A range generator was given bounds in the wrong order.
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: String, max: String },

    /// Invalid trial configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result type for Thistle operations.
pub type Result<T> = std::result::Result<T, Error>;
