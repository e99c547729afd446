//! Adaptive geometric predicates for `f64` coordinates.
//!
//! Every certified predicate evaluates its determinant in plain floating point
//! first and returns immediately when a precomputed relative error bound
//! proves the sign. Otherwise it escalates: the exact determinant of the
//! rounded, translated coordinates (stack buffers), then a first-order
//! correction for the translation roundoff, and finally a fully exact
//! evaluation from the raw inputs. Only the sign of the returned value is
//! meaningful, and only within the range given in the crate docs.

mod coord;
mod incircle;
mod insphere;
mod orient;

use std::fmt;

pub use coord::{Coord, Coord3};
pub use incircle::{incircle, incircle_exact, incircle_fast, try_incircle};
pub use insphere::{insphere, insphere_exact, insphere_fast, try_insphere};
pub use orient::{
    orient2d, orient2d_exact, orient2d_fast, orient3d, orient3d_exact, orient3d_fast,
    try_orient2d, try_orient3d,
};

/// Sign classification of a predicate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryPredicateResult {
    Positive,
    Negative,
    Zero,
}

impl GeometryPredicateResult {
    pub fn from_value(value: f64) -> Self {
        if value > 0.0 {
            GeometryPredicateResult::Positive
        } else if value < 0.0 {
            GeometryPredicateResult::Negative
        } else {
            GeometryPredicateResult::Zero
        }
    }

    pub fn signum(self) -> i32 {
        match self {
            GeometryPredicateResult::Positive => 1,
            GeometryPredicateResult::Negative => -1,
            GeometryPredicateResult::Zero => 0,
        }
    }
}

impl From<f64> for GeometryPredicateResult {
    fn from(value: f64) -> Self {
        GeometryPredicateResult::from_value(value)
    }
}

/// A coordinate passed to a checked predicate was infinite or NaN.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NonFiniteInput {
    /// Position of the offending point in the argument list, starting at 0.
    pub index: usize,
}

impl fmt::Display for NonFiniteInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "point {} has a non-finite coordinate", self.index)
    }
}

impl std::error::Error for NonFiniteInput {}

fn check_finite(finite: &[bool]) -> Result<(), NonFiniteInput> {
    match finite.iter().position(|&is_finite| !is_finite) {
        Some(index) => Err(NonFiniteInput { index }),
        None => Ok(()),
    }
}

#[cfg(test)]
thread_local! {
    static EXACT_FALLBACKS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Marks the hand-off from the staged evaluation to exact arithmetic.
#[inline]
fn note_exact_fallback(predicate: &'static str) {
    tracing::trace!(predicate, "escalating to exact arithmetic");
    #[cfg(test)]
    EXACT_FALLBACKS.with(|count| count.set(count.get() + 1));
}

/// Number of exact fallbacks taken on the current thread.
#[cfg(test)]
fn exact_fallbacks() -> usize {
    EXACT_FALLBACKS.with(|count| count.get())
}

/// Reports whether `det` is certified by `err_bound`.
#[inline(always)]
fn certified(det: f64, err_bound: f64) -> bool {
    det >= err_bound || -det >= err_bound
}
