//! Exact floating-point expansion arithmetic.
//!
//! An expansion is a sequence of `f64` components, sorted by increasing
//! magnitude and pairwise nonoverlapping, whose exact (infinite precision) sum
//! is the represented value. The slice functions here write their result into
//! a caller-provided buffer and return the number of components written; zero
//! components are eliminated, so a zero result has length zero or is the
//! single component `0.0`.
//!
//! The algorithms are the ones of Shewchuk, *Adaptive Precision Floating-Point
//! Arithmetic and Fast Robust Geometric Predicates* (1997). They require
//! round-to-nearest-even IEEE arithmetic without extended-precision
//! intermediates, which is what Rust's `f64` provides on every supported
//! target.

mod base;
mod ops;

pub use base::Expansion;

use crate::bounds::bounds;
use std::cmp::Ordering;

/// Sum of `a` and `b` as `(rounded, roundoff)`, requiring `|a| >= |b|`.
#[inline(always)]
pub fn fast_two_sum(a: f64, b: f64) -> (f64, f64) {
    debug_assert!(
        a.abs() >= b.abs() || a == 0.0 || b == 0.0,
        "FAST-TWO-SUM requires |a| >= |b| ({} vs {})",
        a,
        b
    );
    let sum = a + b;
    let b_virtual = sum - a;
    let err = b - b_virtual;
    (sum, err)
}

/// Sum of `a` and `b` as `(rounded, roundoff)`; `rounded + roundoff == a + b`
/// exactly.
#[inline(always)]
pub fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let sum = a + b;
    let b_virtual = sum - a;
    let a_virtual = sum - b_virtual;
    let b_roundoff = b - b_virtual;
    let a_roundoff = a - a_virtual;
    let err = a_roundoff + b_roundoff;
    (sum, err)
}

/// Difference `a - b` as `(rounded, roundoff)`.
#[inline(always)]
pub fn two_diff(a: f64, b: f64) -> (f64, f64) {
    let diff = a - b;
    (diff, two_diff_tail(a, b, diff))
}

/// Roundoff of the already computed difference `x = fl(a - b)`.
#[inline(always)]
pub fn two_diff_tail(a: f64, b: f64, x: f64) -> f64 {
    let b_virtual = a - x;
    let a_virtual = x + b_virtual;
    let b_roundoff = b_virtual - b;
    let a_roundoff = a - a_virtual;
    a_roundoff + b_roundoff
}

/// Splits `a` into `(hi, lo)` halves with at most half the mantissa bits each,
/// so that products of halves are exact.
#[inline(always)]
pub fn split(a: f64) -> (f64, f64) {
    split_with(a, bounds().splitter)
}

#[inline(always)]
fn split_with(a: f64, splitter: f64) -> (f64, f64) {
    let c = splitter * a;
    let a_big = c - a;
    let hi = c - a_big;
    let lo = a - hi;
    (hi, lo)
}

/// Product of `a` and `b` as `(rounded, roundoff)`.
#[inline(always)]
pub fn two_product(a: f64, b: f64) -> (f64, f64) {
    two_product_with(a, b, bounds().splitter)
}

/// [`two_product`] with the splitter supplied by the caller.
#[inline(always)]
pub(crate) fn two_product_with(a: f64, b: f64, splitter: f64) -> (f64, f64) {
    let (b_hi, b_lo) = split_with(b, splitter);
    two_product_presplit(a, b, b_hi, b_lo, splitter)
}

#[inline(always)]
fn two_product_presplit(a: f64, b: f64, b_hi: f64, b_lo: f64, splitter: f64) -> (f64, f64) {
    let product = a * b;
    let (a_hi, a_lo) = split_with(a, splitter);
    let err1 = product - a_hi * b_hi;
    let err2 = err1 - a_lo * b_hi;
    let err3 = err2 - a_hi * b_lo;
    (product, a_lo * b_lo - err3)
}

/// Square of `a` as `(rounded, roundoff)`.
#[inline(always)]
pub fn square(a: f64) -> (f64, f64) {
    let product = a * a;
    let (hi, lo) = split(a);
    let err1 = product - hi * hi;
    let err3 = err1 - (hi + hi) * lo;
    (product, lo * lo - err3)
}

/// `(a1 + a0) - b` as a three-component expansion, lowest component first.
#[inline(always)]
pub fn two_one_diff(a1: f64, a0: f64, b: f64) -> [f64; 3] {
    let (i, x0) = two_diff(a0, b);
    let (x2, x1) = two_sum(a1, i);
    [x0, x1, x2]
}

/// `(a1 + a0) - (b1 + b0)` as a four-component expansion, lowest component
/// first.
#[inline(always)]
pub fn two_two_diff(a1: f64, a0: f64, b1: f64, b0: f64) -> [f64; 4] {
    let [x0, lo, hi] = two_one_diff(a1, a0, b0);
    let [x1, x2, x3] = two_one_diff(hi, lo, b1);
    [x0, x1, x2, x3]
}

/// Exact 2x2 minor `a * d - b * c` as a four-component expansion.
#[inline(always)]
pub fn two_by_two(a: f64, d: f64, b: f64, c: f64) -> [f64; 4] {
    two_by_two_with(a, d, b, c, bounds().splitter)
}

/// [`two_by_two`] with the splitter supplied by the caller.
#[inline(always)]
pub(crate) fn two_by_two_with(a: f64, d: f64, b: f64, c: f64, splitter: f64) -> [f64; 4] {
    let (ad1, ad0) = two_product_with(a, d, splitter);
    let (bc1, bc0) = two_product_with(b, c, splitter);
    two_two_diff(ad1, ad0, bc1, bc0)
}

/// Adds the scalar `b` to the expansion `e`, writing the result into `h`.
///
/// `h` must hold at least `e.len() + 1` components.
pub fn grow_expansion_zeroelim(e: &[f64], b: f64, h: &mut [f64]) -> usize {
    debug_assert!(!b.is_nan(), "NaN components are not supported");

    let mut h_len = 0;
    let mut q = b;
    for &enow in e {
        let (sum, err) = two_sum(q, enow);
        if err != 0.0 {
            h[h_len] = err;
            h_len += 1;
        }
        q = sum;
    }
    if q != 0.0 || h_len == 0 {
        h[h_len] = q;
        h_len += 1;
    }
    h_len
}

/// Sums two expansions, writing the result into `h`.
///
/// `h` must hold at least `lhs.len() + rhs.len()` components.
pub fn fast_expansion_sum_zeroelim(lhs: &[f64], rhs: &[f64], h: &mut [f64]) -> usize {
    if lhs.is_empty() {
        h[..rhs.len()].copy_from_slice(rhs);
        return rhs.len();
    } else if rhs.is_empty() {
        h[..lhs.len()].copy_from_slice(lhs);
        return lhs.len();
    }

    let mut enow = lhs[0];
    let mut fnow = rhs[0];
    let mut eindex = 0usize;
    let mut findex = 0usize;
    let mut h_len = 0usize;

    let mut q = if (fnow > enow) == (fnow > -enow) {
        eindex += 1;
        enow
    } else {
        findex += 1;
        fnow
    };

    if eindex < lhs.len() && findex < rhs.len() {
        enow = lhs[eindex];
        fnow = rhs[findex];
        let (qnew, hh) = if (fnow > enow) == (fnow > -enow) {
            eindex += 1;
            fast_two_sum(enow, q)
        } else {
            findex += 1;
            fast_two_sum(fnow, q)
        };
        q = qnew;
        if hh != 0.0 {
            h[h_len] = hh;
            h_len += 1;
        }

        while eindex < lhs.len() && findex < rhs.len() {
            enow = lhs[eindex];
            fnow = rhs[findex];
            let (qnew, hh) = if (fnow > enow) == (fnow > -enow) {
                eindex += 1;
                two_sum(q, enow)
            } else {
                findex += 1;
                two_sum(q, fnow)
            };
            q = qnew;
            if hh != 0.0 {
                h[h_len] = hh;
                h_len += 1;
            }
        }
    }

    for &enow in &lhs[eindex..] {
        let (qnew, hh) = two_sum(q, enow);
        q = qnew;
        if hh != 0.0 {
            h[h_len] = hh;
            h_len += 1;
        }
    }

    for &fnow in &rhs[findex..] {
        let (qnew, hh) = two_sum(q, fnow);
        q = qnew;
        if hh != 0.0 {
            h[h_len] = hh;
            h_len += 1;
        }
    }

    if q != 0.0 || h_len == 0 {
        h[h_len] = q;
        h_len += 1;
    }

    h_len
}

/// Multiplies the expansion `e` by the scalar `b`, writing the result into
/// `h`.
///
/// `h` must hold at least `2 * e.len()` components.
pub fn scale_expansion_zeroelim(e: &[f64], b: f64, h: &mut [f64]) -> usize {
    scale_expansion_with(e, b, bounds().splitter, h)
}

/// [`scale_expansion_zeroelim`] with the splitter supplied by the caller.
pub(crate) fn scale_expansion_with(e: &[f64], b: f64, splitter: f64, h: &mut [f64]) -> usize {
    let Some((&first, rest)) = e.split_first() else {
        return 0;
    };

    let (b_hi, b_lo) = split_with(b, splitter);
    let (mut q, hh) = two_product_presplit(first, b, b_hi, b_lo, splitter);
    let mut h_len = 0;
    if hh != 0.0 {
        h[h_len] = hh;
        h_len += 1;
    }

    for &enow in rest {
        let (product1, product0) = two_product_presplit(enow, b, b_hi, b_lo, splitter);
        let (sum, hh) = two_sum(q, product0);
        if hh != 0.0 {
            h[h_len] = hh;
            h_len += 1;
        }
        let (qnew, hh) = fast_two_sum(product1, sum);
        if hh != 0.0 {
            h[h_len] = hh;
            h_len += 1;
        }
        q = qnew;
    }

    if q != 0.0 || h_len == 0 {
        h[h_len] = q;
        h_len += 1;
    }

    h_len
}

/// Renormalizes `e` into `h` with the same exact value and, usually, fewer
/// components. The largest output component approximates the value to within
/// one ulp.
///
/// `h` must hold at least `e.len()` components.
pub fn compress(e: &[f64], h: &mut [f64]) -> usize {
    let Some((&last, rest)) = e.split_last() else {
        return 0;
    };

    let mut bottom = e.len() - 1;
    let mut q = last;
    for &enow in rest.iter().rev() {
        let (qnew, small) = two_sum(q, enow);
        if small != 0.0 {
            h[bottom] = qnew;
            bottom -= 1;
            q = small;
        } else {
            q = qnew;
        }
    }

    let mut top = 0;
    for index in bottom + 1..e.len() {
        let (qnew, small) = two_sum(h[index], q);
        if small != 0.0 {
            h[top] = small;
            top += 1;
        }
        q = qnew;
    }
    h[top] = q;
    top + 1
}

/// Approximates the value of an expansion by ordinary summation.
#[inline]
pub fn estimate(e: &[f64]) -> f64 {
    e.iter().sum()
}

/// Exact sign of an expansion: the sign of its most significant nonzero
/// component.
#[inline]
pub fn expansion_signum(e: &[f64]) -> i32 {
    match e.iter().rev().find(|&&component| component != 0.0) {
        Some(&component) if component > 0.0 => 1,
        Some(_) => -1,
        None => 0,
    }
}

/// Most significant component of an expansion, or zero when it is empty.
#[inline]
pub fn most_significant(e: &[f64]) -> f64 {
    e.last().copied().unwrap_or(0.0)
}

/// Returns true if the slice is sorted by nondecreasing magnitude.
pub fn is_sorted_by_magnitude(components: &[f64]) -> bool {
    components
        .windows(2)
        .all(|pair| compare_magnitude(pair[0], pair[1]) != Ordering::Greater)
}

/// Returns true if the slice is sorted and no two consecutive components share
/// a bit position.
pub fn is_nonoverlapping_sorted(components: &[f64]) -> bool {
    for pair in components.windows(2) {
        let low = pair[0];
        let high = pair[1];

        if compare_magnitude(low, high) == Ordering::Greater {
            return false;
        }

        if high == 0.0 {
            if low != 0.0 {
                return false;
            }
            continue;
        }

        if low.abs() >= lowest_bit(high) {
            return false;
        }
    }

    true
}

pub(crate) fn compare_magnitude(a: f64, b: f64) -> Ordering {
    match a.abs().partial_cmp(&b.abs()) {
        Some(order) => order,
        None => Ordering::Equal,
    }
}

/// Value of the least significant set bit of a finite, nonzero `value`.
fn lowest_bit(value: f64) -> f64 {
    const FRACTION_MASK: u64 = (1 << 52) - 1;

    let bits = value.abs().to_bits();
    let biased_exponent = (bits >> 52) as i32;
    let (mantissa, exponent) = if biased_exponent == 0 {
        (bits & FRACTION_MASK, -1074)
    } else {
        ((bits & FRACTION_MASK) | (1 << 52), biased_exponent - 1075)
    };
    let position = exponent + mantissa.trailing_zeros() as i32;
    if position >= -1022 {
        f64::from_bits(((position + 1023) as u64) << 52)
    } else {
        f64::from_bits(1 << (position + 1074))
    }
}
