//! Property definitions and the trial driver.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::data::{Config, Random};
use crate::error::{Error, Result};
use crate::gen::Gen;
use crate::registry::{lookup_argument, Defaults};
use crate::shrink::ShrinkSearch;

type Check<T> = Box<dyn Fn(&T) -> std::result::Result<(), String>>;

/// Outcome of running a property.
#[derive(Debug, Clone, PartialEq)]
pub enum TestResult {
    /// Every trial passed.
    Pass { tests_run: usize },
    /// A trial failed; the counterexample has been shrunk.
    Fail {
        /// Minimal failing value, rendered with `Debug`.
        counterexample: String,
        /// The value first found to fail.
        original: String,
        /// Why the minimal value fails.
        failure: String,
        tests_run: usize,
        shrinks_performed: usize,
        /// Seed that reproduces this run through [`Config::with_seed`].
        seed: u64,
        variable_name: Option<String>,
    },
    /// The configuration was rejected before any trial ran.
    Invalid(Error),
}

impl TestResult {
    /// Check if every trial passed.
    pub fn is_pass(&self) -> bool {
        matches!(self, TestResult::Pass { .. })
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestResult::Pass { tests_run } => write!(f, "  ✓ property passed {tests_run} tests."),
            TestResult::Fail {
                counterexample,
                original,
                failure,
                tests_run,
                shrinks_performed,
                seed,
                variable_name,
            } => {
                writeln!(
                    f,
                    "  ✗ property failed after {tests_run} tests and {shrinks_performed} shrinks."
                )?;
                match variable_name {
                    Some(name) => writeln!(f, "      │ forAll 0 = {counterexample} -- {name}")?,
                    None => writeln!(f, "      │ forAll 0 = {counterexample}")?,
                }
                writeln!(f, "    Original: {original}")?;
                writeln!(f, "    Failure: {failure}")?;
                write!(f, "    Seed: {seed}")
            }
            TestResult::Invalid(error) => write!(f, "  ⚐ property not run: {error}"),
        }
    }
}

/// A property that can be tested with generated inputs.
pub struct Property<T> {
    generator: Gen<T>,
    check: Check<T>,
    variable_name: Option<String>,
}

impl<T> Property<T>
where
    T: fmt::Debug + 'static,
{
    /// Create a property from a generator and a check that explains its
    /// failures.
    pub fn new<F>(generator: Gen<T>, check: F) -> Self
    where
        F: Fn(&T) -> std::result::Result<(), String> + 'static,
    {
        Property {
            generator,
            check: Box::new(check),
            variable_name: None,
        }
    }

    /// Create a property that checks a boolean condition.
    pub fn for_all<F>(generator: Gen<T>, condition: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        Property::new(generator, move |input| {
            if condition(input) {
                Ok(())
            } else {
                Err("condition returned false".to_string())
            }
        })
    }

    /// Name the generated variable in failure reports.
    pub fn named(mut self, variable_name: &str) -> Self {
        self.variable_name = Some(variable_name.to_string());
        self
    }

    /// Run the property against `config.test_limit` generated inputs,
    /// shrinking the first failure.
    pub fn run(&self, config: &Config) -> TestResult {
        if let Err(error) = config.validate() {
            return TestResult::Invalid(error);
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = Random::from_seed(seed);

        for trial in 0..config.test_limit {
            let size = config.size_for(trial);
            let mut trial_rng = rng.split();
            let tree = self.generator.generate(&mut trial_rng, size);

            let Some(mut failure) = self.evaluate(&tree.value) else {
                continue;
            };
            debug!(trial, %size, seed, "property failed, shrinking");

            let original = format!("{:?}", tree.value);
            let outcome = ShrinkSearch::new().with_limit(config.shrink_limit).run(
                |value| match self.evaluate(value) {
                    None => true,
                    Some(reason) => {
                        failure = reason;
                        false
                    }
                },
                tree,
            );

            return TestResult::Fail {
                counterexample: format!("{:?}", outcome.minimal.value),
                original,
                failure,
                tests_run: trial + 1,
                shrinks_performed: outcome.shrinks,
                seed,
                variable_name: self.variable_name.clone(),
            };
        }

        TestResult::Pass {
            tests_run: config.test_limit,
        }
    }

    /// Run the property and panic with the report unless it passes.
    pub fn check(&self, config: &Config) {
        let result = self.run(config);
        if !result.is_pass() {
            panic!("{result}");
        }
    }

    /// `None` when the property holds; otherwise why it does not. A panic
    /// counts as a failure.
    fn evaluate(&self, value: &T) -> Option<String> {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.check)(value))) {
            Ok(Ok(())) => None,
            Ok(Err(reason)) => Some(reason),
            Err(payload) => Some(panic_message(&*payload)),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}

/// Create a property from a generator and a check returning `Err` with a
/// reason on failure.
pub fn property<T, F>(generator: Gen<T>, check: F) -> Property<T>
where
    T: fmt::Debug + 'static,
    F: Fn(&T) -> std::result::Result<(), String> + 'static,
{
    Property::new(generator, check)
}

/// Create a property that checks a boolean condition.
pub fn for_all<T, F>(generator: Gen<T>, condition: F) -> Property<T>
where
    T: fmt::Debug + 'static,
    F: Fn(&T) -> bool + 'static,
{
    Property::for_all(generator, condition)
}

/// Create a property that checks a boolean condition with a named variable.
pub fn for_all_named<T, F>(generator: Gen<T>, variable_name: &str, condition: F) -> Property<T>
where
    T: fmt::Debug + 'static,
    F: Fn(&T) -> bool + 'static,
{
    Property::for_all(generator, condition).named(variable_name)
}

/// Create a property over the default generator for `T`.
pub fn for_any<T, F>(condition: F) -> Result<Property<T>>
where
    T: fmt::Debug + 'static,
    F: Fn(&T) -> bool + 'static,
{
    Ok(Property::for_all(lookup_argument::<T>(0, 1)?, condition))
}

/// Create a property over a tuple of arguments, each drawn from its
/// default generator.
pub fn for_any_args<A, F>(condition: F) -> Result<Property<A>>
where
    A: Defaults + fmt::Debug + 'static,
    F: Fn(&A) -> bool + 'static,
{
    Ok(Property::for_all(A::defaults()?, condition))
}
