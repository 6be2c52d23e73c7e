//! Primitive generators: booleans, integers, floats, characters, big
//! integers, timestamps and time spans.

use std::fmt::Display;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use num_bigint::{BigInt, RandBigInt};
use num_traits::{Float, NumCast, PrimInt, Signed, Zero};
use rand::distributions::uniform::SampleUniform;
use rand::Rng;

use super::Gen;
use crate::data::Size;
use crate::error::{Error, Result};
use crate::shrinkable::Shrinkable;

const SECONDS_PER_DAY: usize = 86_400;
/// Timestamps stay within roughly a century of the Unix epoch.
const MAX_OFFSET_SECONDS: i64 = 100 * 365 * 86_400;
/// Time spans stay within roughly a year either way.
const MAX_SPAN_MILLIS: i64 = 365 * 86_400 * 1000;

/// An inclusive range of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
}

impl<T> Range<T> {
    /// Create a new inclusive range.
    pub fn new(min: T, max: T) -> Self {
        Range { min, max }
    }
}

impl<T: PrimInt> Range<T> {
    /// The value shrinking moves toward: zero when the range holds it,
    /// otherwise the bound closest to zero.
    pub fn origin(&self) -> T {
        if self.min > T::zero() {
            self.min
        } else if self.max < T::zero() {
            self.max
        } else {
            T::zero()
        }
    }
}

/// Primitive generators.
impl Gen<bool> {
    /// Generate a random boolean; `true` shrinks to `false`.
    pub fn bool() -> Self {
        Gen::from_choices(vec![false, true])
    }
}

impl<T> Gen<T>
where
    T: PrimInt + SampleUniform + Display + Send + Sync + 'static,
{
    /// Generate an integer in the given range.
    ///
    /// Values are drawn within `size` of the range's origin and shrink
    /// toward it by halving the distance, then by single steps.
    pub fn from_range(range: Range<T>) -> Result<Self> {
        if range.min > range.max {
            return Err(Error::InvalidRange {
                min: range.min.to_string(),
                max: range.max.to_string(),
            });
        }
        Ok(integral(range))
    }

    /// Generate an integer anywhere in the type's range, bounded by size.
    pub fn int() -> Self {
        integral(Range::new(T::min_value(), T::max_value()))
    }
}

impl Gen<i32> {
    /// Generate a positive integer.
    pub fn positive() -> Self {
        integral(Range::new(1, i32::MAX))
    }

    /// Generate a natural number (including zero).
    pub fn natural() -> Self {
        integral(Range::new(0, i32::MAX))
    }
}

fn integral<T>(range: Range<T>) -> Gen<T>
where
    T: PrimInt + SampleUniform + Send + Sync + 'static,
{
    let origin = range.origin();
    Gen::new(move |rng, size| {
        let reach = <T as NumCast>::from(size.get()).unwrap_or_else(T::max_value);
        let low = origin.saturating_sub(reach).max(range.min);
        let high = origin.saturating_add(reach).min(range.max);
        let value = rng.gen_range(low..=high);
        Shrinkable::unfold(value, move |&n: &T| int_towards(origin, n))
    })
}

/// Halve the distance to `origin`, then step one closer.
fn int_towards<T: PrimInt>(origin: T, n: T) -> Vec<T> {
    if n == origin {
        return Vec::new();
    }
    let two = T::one() + T::one();
    let half = origin + (n - origin) / two;
    let step = if n > origin { n - T::one() } else { n + T::one() };
    if half == step {
        vec![half]
    } else {
        vec![half, step]
    }
}

impl<T> Gen<T>
where
    T: Float + SampleUniform + Send + Sync + 'static,
{
    /// Generate a finite float in `[-size, size]`.
    ///
    /// Fractional values shrink to their integer part first, then like
    /// integers toward zero.
    pub fn float() -> Self {
        Gen::simple(
            |rng, size| {
                let bound = <T as NumCast>::from(size.get()).unwrap_or_else(T::max_value);
                if bound.is_zero() {
                    T::zero()
                } else {
                    rng.gen_range(-bound..=bound)
                }
            },
            float_towards_zero,
        )
    }
}

fn float_towards_zero<T: Float>(x: &T) -> Vec<T> {
    let x = *x;
    if x.is_zero() || !x.is_finite() {
        return Vec::new();
    }
    if x.fract() != T::zero() {
        return vec![x.trunc()];
    }
    let two = T::one() + T::one();
    let mut candidates = vec![(x / two).trunc()];
    let step = x - x.signum();
    // Large magnitudes lose the unit step to rounding.
    if step != x && step != candidates[0] {
        candidates.push(step);
    }
    candidates
}

impl Gen<char> {
    /// Generate a lowercase ASCII letter, shrinking toward `'a'`.
    pub fn ascii_lowercase() -> Self {
        Gen::from_choices(('a'..='z').collect())
    }

    /// Generate an ASCII letter, lowercase letters first.
    pub fn ascii_alpha() -> Self {
        Gen::from_choices(('a'..='z').chain('A'..='Z').collect())
    }

    /// Generate an ASCII letter or digit, lowercase letters first.
    pub fn ascii_alphanumeric() -> Self {
        Gen::from_choices(('a'..='z').chain('A'..='Z').chain('0'..='9').collect())
    }
}

impl Gen<BigInt> {
    /// Generate an arbitrary-precision integer of at most `size` bits,
    /// shrinking toward zero.
    pub fn big_int() -> Self {
        Gen::simple(
            |rng, size| {
                let bound = BigInt::from(1) << size.get();
                rng.gen_bigint_range(&(BigInt::from(1) - &bound), &bound)
            },
            big_towards_zero,
        )
    }
}

fn big_towards_zero(n: &BigInt) -> Vec<BigInt> {
    if n.is_zero() {
        return Vec::new();
    }
    let half = n / 2;
    let step = n - n.signum();
    if half == step {
        vec![half]
    } else {
        vec![half, step]
    }
}

impl Gen<DateTime<Utc>> {
    /// Generate a UTC timestamp within `size` days of the Unix epoch,
    /// shrinking toward the epoch.
    pub fn date_time() -> Self {
        integral(Range::new(-MAX_OFFSET_SECONDS, MAX_OFFSET_SECONDS))
            .scale(|size| Size::new(size.get().saturating_mul(SECONDS_PER_DAY)))
            .map(|seconds| DateTime::from_timestamp(seconds, 0).unwrap_or_default())
    }
}

impl Gen<TimeDelta> {
    /// Generate a signed time span within `size` seconds, shrinking toward
    /// zero.
    pub fn time_delta() -> Self {
        integral(Range::new(-MAX_SPAN_MILLIS, MAX_SPAN_MILLIS))
            .scale(|size| Size::new(size.get().saturating_mul(1000)))
            .map(|millis| TimeDelta::try_milliseconds(millis).unwrap_or_default())
    }
}

impl Gen<Duration> {
    /// Generate a non-negative duration within `size` seconds, shrinking
    /// toward zero.
    pub fn duration() -> Self {
        integral(Range::new(0u64, MAX_SPAN_MILLIS as u64))
            .scale(|size| Size::new(size.get().saturating_mul(1000)))
            .map(Duration::from_millis)
    }
}
