//! Process-wide floating-point constants and predicate error bounds.
//!
//! The machine epsilon is measured at runtime rather than taken from
//! `f64::EPSILON`, so the bounds track the precision the arithmetic actually
//! delivers. Every other constant is derived from it.

use std::hint::black_box;
use std::sync::OnceLock;

static BOUNDS: OnceLock<ErrorBounds> = OnceLock::new();

/// Relative error coefficients for one predicate.
///
/// `a` certifies the plain floating-point estimate, `b` the estimate of the
/// exact determinant of rounded inputs, and `c` (a second-order term) the
/// tail-corrected estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageBounds {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// Error-bound table shared by every predicate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErrorBounds {
    /// Largest power of two such that `1.0 + epsilon` rounds to `1.0`.
    pub epsilon: f64,
    /// `2^ceil(p / 2) + 1`, used to split a value into two half-width parts.
    pub splitter: f64,
    /// Bound on the error of an estimate taken from an expansion.
    pub result: f64,
    pub orient2d: StageBounds,
    pub orient3d: StageBounds,
    pub incircle: StageBounds,
    pub insphere: StageBounds,
}

impl ErrorBounds {
    /// Derives the full table from a probed epsilon and splitter.
    pub fn from_epsilon(epsilon: f64, splitter: f64) -> Self {
        let e = epsilon;
        let stage = |a: (f64, f64), b: (f64, f64), c: (f64, f64)| StageBounds {
            a: (a.0 + a.1 * e) * e,
            b: (b.0 + b.1 * e) * e,
            c: (c.0 + c.1 * e) * e * e,
        };

        Self {
            epsilon,
            splitter,
            result: (3.0 + 8.0 * e) * e,
            orient2d: stage((3.0, 16.0), (2.0, 12.0), (9.0, 64.0)),
            orient3d: stage((7.0, 56.0), (3.0, 28.0), (26.0, 288.0)),
            incircle: stage((10.0, 96.0), (4.0, 48.0), (44.0, 576.0)),
            insphere: stage((16.0, 224.0), (5.0, 72.0), (71.0, 1408.0)),
        }
    }

    /// Measures the runtime precision and derives the table from it.
    ///
    /// Deterministic: every call on the same platform returns the same table.
    pub fn probe() -> Self {
        let (epsilon, splitter) = probe_epsilon();
        Self::from_epsilon(epsilon, splitter)
    }
}

/// Returns `(epsilon, splitter)` for the arithmetic in use.
///
/// Epsilon is halved until `1.0 + epsilon` is indistinguishable from `1.0`, or
/// until the sum stops changing, which is how extended-precision intermediates
/// show up. Each candidate sum passes through `black_box` so it is stored as a
/// plain `f64` and the loop is not folded at compile time.
pub fn probe_epsilon() -> (f64, f64) {
    let half = 0.5;
    let mut every_other = true;
    let mut epsilon = 1.0_f64;
    let mut splitter = 1.0_f64;
    let mut check = 1.0_f64;

    loop {
        let last_check = check;
        epsilon *= half;
        if every_other {
            splitter *= 2.0;
        }
        every_other = !every_other;
        check = black_box(black_box(1.0_f64) + black_box(epsilon));
        if check == 1.0 || check == last_check {
            break;
        }
    }

    (epsilon, splitter + 1.0)
}

/// Computes the process-wide error-bound table if it is not computed yet, and
/// returns it.
///
/// Safe to call from any number of threads at once: one caller performs the
/// probe, the rest wait for it, and all of them see the same table.
pub fn initialize() -> &'static ErrorBounds {
    BOUNDS.get_or_init(|| {
        let bounds = ErrorBounds::probe();
        tracing::debug!(
            epsilon = bounds.epsilon,
            splitter = bounds.splitter,
            "probed floating-point precision"
        );
        bounds
    })
}

/// Returns the process-wide error-bound table, initializing it on first use.
#[inline(always)]
pub fn bounds() -> &'static ErrorBounds {
    match BOUNDS.get() {
        Some(bounds) => bounds,
        None => initialize(),
    }
}
