//! In-circle predicate.

use super::{Coord, NonFiniteInput, certified, check_finite, note_exact_fallback};
use crate::bounds::{ErrorBounds, bounds};
use crate::expansion::{
    Expansion, estimate, fast_expansion_sum_zeroelim, scale_expansion_with, two_by_two_with,
    two_diff_tail,
};

/// Location of `d` relative to the circle through `a`, `b`, `c`.
///
/// Returns a positive value if `d` lies inside the circle, a negative value if
/// it lies outside, and exactly zero if the four points are cocircular, under
/// the assumption that `a`, `b`, `c` are in counterclockwise order. The sign
/// is reversed when they are clockwise. Inputs far outside the
/// [safe range](crate#range) may lose the sign.
#[inline]
pub fn incircle(a: &Coord, b: &Coord, c: &Coord, d: &Coord) -> f64 {
    let adx = a.x - d.x;
    let bdx = b.x - d.x;
    let cdx = c.x - d.x;
    let ady = a.y - d.y;
    let bdy = b.y - d.y;
    let cdy = c.y - d.y;

    let bdxcdy = bdx * cdy;
    let cdxbdy = cdx * bdy;
    let alift = adx * adx + ady * ady;

    let cdxady = cdx * ady;
    let adxcdy = adx * cdy;
    let blift = bdx * bdx + bdy * bdy;

    let adxbdy = adx * bdy;
    let bdxady = bdx * ady;
    let clift = cdx * cdx + cdy * cdy;

    let det = alift * (bdxcdy - cdxbdy) + blift * (cdxady - adxcdy) + clift * (adxbdy - bdxady);
    let permanent = (bdxcdy.abs() + cdxbdy.abs()) * alift
        + (cdxady.abs() + adxcdy.abs()) * blift
        + (adxbdy.abs() + bdxady.abs()) * clift;

    let bounds = bounds();
    let err_bound = bounds.incircle.a * permanent;
    if det > err_bound || -det > err_bound {
        return det;
    }
    incircle_adapt(a, b, c, d, permanent, bounds)
}

/// Uncertified in-circle test: the plain floating-point determinant.
#[inline]
pub fn incircle_fast(a: &Coord, b: &Coord, c: &Coord, d: &Coord) -> f64 {
    let adx = a.x - d.x;
    let ady = a.y - d.y;
    let bdx = b.x - d.x;
    let bdy = b.y - d.y;
    let cdx = c.x - d.x;
    let cdy = c.y - d.y;

    let abdet = adx * bdy - bdx * ady;
    let bcdet = bdx * cdy - cdx * bdy;
    let cadet = cdx * ady - adx * cdy;
    let alift = adx * adx + ady * ady;
    let blift = bdx * bdx + bdy * bdy;
    let clift = cdx * cdx + cdy * cdy;

    alift * bcdet + blift * cadet + clift * abdet
}

/// In-circle test computed with exact expansion arithmetic throughout.
pub fn incircle_exact(a: &Coord, b: &Coord, c: &Coord, d: &Coord) -> f64 {
    let adx = Expansion::difference(a.x, d.x);
    let bdx = Expansion::difference(b.x, d.x);
    let cdx = Expansion::difference(c.x, d.x);
    let ady = Expansion::difference(a.y, d.y);
    let bdy = Expansion::difference(b.y, d.y);
    let cdy = Expansion::difference(c.y, d.y);

    let bc = &(&bdx * &cdy) - &(&cdx * &bdy);
    let ca = &(&cdx * &ady) - &(&adx * &cdy);
    let ab = &(&adx * &bdy) - &(&bdx * &ady);

    let alift = &(&adx * &adx) + &(&ady * &ady);
    let blift = &(&bdx * &bdx) + &(&bdy * &bdy);
    let clift = &(&cdx * &cdx) + &(&cdy * &cdy);

    let det = &(&(&alift * &bc) + &(&blift * &ca)) + &(&clift * &ab);
    det.most_significant()
}

/// Checked [`incircle`] that rejects non-finite coordinates.
pub fn try_incircle(a: &Coord, b: &Coord, c: &Coord, d: &Coord) -> Result<f64, NonFiniteInput> {
    check_finite(&[a.is_finite(), b.is_finite(), c.is_finite(), d.is_finite()])?;
    Ok(incircle(a, b, c, d))
}

/// Writes `(x^2 + y^2) * minor` into `h`, returning its length.
fn lifted(minor: &[f64; 4], x: f64, y: f64, splitter: f64, h: &mut [f64; 32]) -> usize {
    let mut xm = [0.0; 8];
    let mut xxm = [0.0; 16];
    let mut ym = [0.0; 8];
    let mut yym = [0.0; 16];

    let xlen = scale_expansion_with(minor, x, splitter, &mut xm);
    let xxlen = scale_expansion_with(&xm[..xlen], x, splitter, &mut xxm);
    let ylen = scale_expansion_with(minor, y, splitter, &mut ym);
    let yylen = scale_expansion_with(&ym[..ylen], y, splitter, &mut yym);
    fast_expansion_sum_zeroelim(&xxm[..xxlen], &yym[..yylen], h)
}

fn incircle_adapt(
    a: &Coord,
    b: &Coord,
    c: &Coord,
    d: &Coord,
    permanent: f64,
    bounds: &ErrorBounds,
) -> f64 {
    if cfg!(feature = "exact-fallback-only") {
        note_exact_fallback("incircle");
        return incircle_exact(a, b, c, d);
    }

    let adx = a.x - d.x;
    let bdx = b.x - d.x;
    let cdx = c.x - d.x;
    let ady = a.y - d.y;
    let bdy = b.y - d.y;
    let cdy = c.y - d.y;

    let splitter = bounds.splitter;
    let bc = two_by_two_with(bdx, cdy, cdx, bdy, splitter);
    let ca = two_by_two_with(cdx, ady, adx, cdy, splitter);
    let ab = two_by_two_with(adx, bdy, bdx, ady, splitter);

    let mut adet = [0.0; 32];
    let mut bdet = [0.0; 32];
    let mut cdet = [0.0; 32];
    let alen = lifted(&bc, adx, ady, splitter, &mut adet);
    let blen = lifted(&ca, bdx, bdy, splitter, &mut bdet);
    let clen = lifted(&ab, cdx, cdy, splitter, &mut cdet);

    let mut abdet = [0.0; 64];
    let ablen = fast_expansion_sum_zeroelim(&adet[..alen], &bdet[..blen], &mut abdet);
    let mut fin = [0.0; 96];
    let finlen = fast_expansion_sum_zeroelim(&abdet[..ablen], &cdet[..clen], &mut fin);

    let mut det = estimate(&fin[..finlen]);
    if certified(det, bounds.incircle.b * permanent) {
        return det;
    }

    let adx_tail = two_diff_tail(a.x, d.x, adx);
    let ady_tail = two_diff_tail(a.y, d.y, ady);
    let bdx_tail = two_diff_tail(b.x, d.x, bdx);
    let bdy_tail = two_diff_tail(b.y, d.y, bdy);
    let cdx_tail = two_diff_tail(c.x, d.x, cdx);
    let cdy_tail = two_diff_tail(c.y, d.y, cdy);

    let tails = [adx_tail, ady_tail, bdx_tail, bdy_tail, cdx_tail, cdy_tail];
    if tails.iter().all(|&tail| tail == 0.0) {
        return det;
    }

    let err_bound = bounds.incircle.c * permanent + bounds.result * det.abs();
    det += ((adx * adx + ady * ady)
        * ((bdx * cdy_tail + cdy * bdx_tail) - (bdy * cdx_tail + cdx * bdy_tail))
        + 2.0 * (adx * adx_tail + ady * ady_tail) * (bdx * cdy - bdy * cdx))
        + ((bdx * bdx + bdy * bdy)
            * ((cdx * ady_tail + ady * cdx_tail) - (cdy * adx_tail + adx * cdy_tail))
            + 2.0 * (bdx * bdx_tail + bdy * bdy_tail) * (cdx * ady - cdy * adx))
        + ((cdx * cdx + cdy * cdy)
            * ((adx * bdy_tail + bdy * adx_tail) - (ady * bdx_tail + bdx * ady_tail))
            + 2.0 * (cdx * cdx_tail + cdy * cdy_tail) * (adx * bdy - ady * bdx));
    if certified(det, err_bound) {
        return det;
    }

    note_exact_fallback("incircle");
    incircle_exact(a, b, c, d)
}
