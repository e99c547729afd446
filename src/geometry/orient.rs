//! Orientation predicates in two and three dimensions.

use super::{Coord, Coord3, NonFiniteInput, certified, check_finite, note_exact_fallback};
use crate::bounds::{ErrorBounds, bounds};
use crate::expansion::{
    Expansion, estimate, fast_expansion_sum_zeroelim, scale_expansion_with, two_by_two_with,
    two_diff_tail,
};

/// Orientation of `c` relative to the directed line from `a` to `b`.
///
/// Returns a positive value if `a`, `b`, `c` are in counterclockwise order, a
/// negative value if they are clockwise, and exactly zero if they are
/// collinear. The value approximates twice the signed area of the triangle;
/// only its sign is guaranteed, and only for inputs in the range described in
/// the [crate docs](crate#range).
#[inline]
pub fn orient2d(a: &Coord, b: &Coord, c: &Coord) -> f64 {
    let det_left = (a.x - c.x) * (b.y - c.y);
    let det_right = (a.y - c.y) * (b.x - c.x);
    let det = det_left - det_right;

    // Terms of opposite sign (or a zero term) cannot cancel.
    let det_sum = if det_left > 0.0 {
        if det_right <= 0.0 {
            return det;
        }
        det_left + det_right
    } else if det_left < 0.0 {
        if det_right >= 0.0 {
            return det;
        }
        -det_left - det_right
    } else {
        return det;
    };

    let bounds = bounds();
    if certified(det, bounds.orient2d.a * det_sum) {
        return det;
    }
    orient2d_adapt(a, b, c, det_sum, bounds)
}

/// Uncertified orientation: the plain floating-point determinant. May have
/// the wrong sign for nearly collinear inputs.
#[inline]
pub fn orient2d_fast(a: &Coord, b: &Coord, c: &Coord) -> f64 {
    (a.x - c.x) * (b.y - c.y) - (a.y - c.y) * (b.x - c.x)
}

/// Orientation computed with exact expansion arithmetic throughout.
pub fn orient2d_exact(a: &Coord, b: &Coord, c: &Coord) -> f64 {
    let acx = Expansion::difference(a.x, c.x);
    let acy = Expansion::difference(a.y, c.y);
    let bcx = Expansion::difference(b.x, c.x);
    let bcy = Expansion::difference(b.y, c.y);

    let det = &(&acx * &bcy) - &(&acy * &bcx);
    det.most_significant()
}

/// Checked [`orient2d`] that rejects non-finite coordinates.
pub fn try_orient2d(a: &Coord, b: &Coord, c: &Coord) -> Result<f64, NonFiniteInput> {
    check_finite(&[a.is_finite(), b.is_finite(), c.is_finite()])?;
    Ok(orient2d(a, b, c))
}

fn orient2d_adapt(a: &Coord, b: &Coord, c: &Coord, det_sum: f64, bounds: &ErrorBounds) -> f64 {
    if cfg!(feature = "exact-fallback-only") {
        note_exact_fallback("orient2d");
        return orient2d_exact(a, b, c);
    }

    let acx = a.x - c.x;
    let bcx = b.x - c.x;
    let acy = a.y - c.y;
    let bcy = b.y - c.y;

    let minor = two_by_two_with(acx, bcy, acy, bcx, bounds.splitter);
    let mut det = estimate(&minor);
    if certified(det, bounds.orient2d.b * det_sum) {
        return det;
    }

    let acx_tail = two_diff_tail(a.x, c.x, acx);
    let bcx_tail = two_diff_tail(b.x, c.x, bcx);
    let acy_tail = two_diff_tail(a.y, c.y, acy);
    let bcy_tail = two_diff_tail(b.y, c.y, bcy);

    if acx_tail == 0.0 && acy_tail == 0.0 && bcx_tail == 0.0 && bcy_tail == 0.0 {
        return det;
    }

    let err_bound = bounds.orient2d.c * det_sum + bounds.result * det.abs();
    det += (acx * bcy_tail + bcy * acx_tail) - (acy * bcx_tail + bcx * acy_tail);
    if certified(det, err_bound) {
        return det;
    }

    note_exact_fallback("orient2d");
    orient2d_exact(a, b, c)
}

/// Orientation of `d` relative to the plane through `a`, `b`, `c`.
///
/// Returns a positive value if `d` lies below the plane, where "below" means
/// that `a`, `b`, `c` appear counterclockwise when viewed from above; a
/// negative value if `d` lies above, and exactly zero if the four points are
/// coplanar. The value approximates six times the signed volume of the
/// tetrahedron. Inputs far outside the [safe range](crate#range) may lose the
/// sign.
#[inline]
pub fn orient3d(a: &Coord3, b: &Coord3, c: &Coord3, d: &Coord3) -> f64 {
    let adx = a.x - d.x;
    let bdx = b.x - d.x;
    let cdx = c.x - d.x;
    let ady = a.y - d.y;
    let bdy = b.y - d.y;
    let cdy = c.y - d.y;
    let adz = a.z - d.z;
    let bdz = b.z - d.z;
    let cdz = c.z - d.z;

    let bdxcdy = bdx * cdy;
    let cdxbdy = cdx * bdy;
    let cdxady = cdx * ady;
    let adxcdy = adx * cdy;
    let adxbdy = adx * bdy;
    let bdxady = bdx * ady;

    let det = adz * (bdxcdy - cdxbdy) + bdz * (cdxady - adxcdy) + cdz * (adxbdy - bdxady);
    let permanent = (bdxcdy.abs() + cdxbdy.abs()) * adz.abs()
        + (cdxady.abs() + adxcdy.abs()) * bdz.abs()
        + (adxbdy.abs() + bdxady.abs()) * cdz.abs();

    let bounds = bounds();
    let err_bound = bounds.orient3d.a * permanent;
    if det > err_bound || -det > err_bound {
        return det;
    }
    orient3d_adapt(a, b, c, d, permanent, bounds)
}

/// Uncertified 3D orientation: the plain floating-point determinant.
#[inline]
pub fn orient3d_fast(a: &Coord3, b: &Coord3, c: &Coord3, d: &Coord3) -> f64 {
    let adx = a.x - d.x;
    let bdx = b.x - d.x;
    let cdx = c.x - d.x;
    let ady = a.y - d.y;
    let bdy = b.y - d.y;
    let cdy = c.y - d.y;
    let adz = a.z - d.z;
    let bdz = b.z - d.z;
    let cdz = c.z - d.z;

    adz * (bdx * cdy - cdx * bdy) + bdz * (cdx * ady - adx * cdy) + cdz * (adx * bdy - bdx * ady)
}

/// 3D orientation computed with exact expansion arithmetic throughout.
pub fn orient3d_exact(a: &Coord3, b: &Coord3, c: &Coord3, d: &Coord3) -> f64 {
    let adx = Expansion::difference(a.x, d.x);
    let bdx = Expansion::difference(b.x, d.x);
    let cdx = Expansion::difference(c.x, d.x);
    let ady = Expansion::difference(a.y, d.y);
    let bdy = Expansion::difference(b.y, d.y);
    let cdy = Expansion::difference(c.y, d.y);
    let adz = Expansion::difference(a.z, d.z);
    let bdz = Expansion::difference(b.z, d.z);
    let cdz = Expansion::difference(c.z, d.z);

    let bc = &(&bdx * &cdy) - &(&cdx * &bdy);
    let ca = &(&cdx * &ady) - &(&adx * &cdy);
    let ab = &(&adx * &bdy) - &(&bdx * &ady);

    let det = &(&(&adz * &bc) + &(&bdz * &ca)) + &(&cdz * &ab);
    det.most_significant()
}

/// Checked [`orient3d`] that rejects non-finite coordinates.
pub fn try_orient3d(
    a: &Coord3,
    b: &Coord3,
    c: &Coord3,
    d: &Coord3,
) -> Result<f64, NonFiniteInput> {
    check_finite(&[a.is_finite(), b.is_finite(), c.is_finite(), d.is_finite()])?;
    Ok(orient3d(a, b, c, d))
}

fn orient3d_adapt(
    a: &Coord3,
    b: &Coord3,
    c: &Coord3,
    d: &Coord3,
    permanent: f64,
    bounds: &ErrorBounds,
) -> f64 {
    if cfg!(feature = "exact-fallback-only") {
        note_exact_fallback("orient3d");
        return orient3d_exact(a, b, c, d);
    }

    let adx = a.x - d.x;
    let bdx = b.x - d.x;
    let cdx = c.x - d.x;
    let ady = a.y - d.y;
    let bdy = b.y - d.y;
    let cdy = c.y - d.y;
    let adz = a.z - d.z;
    let bdz = b.z - d.z;
    let cdz = c.z - d.z;

    let splitter = bounds.splitter;
    let bc = two_by_two_with(bdx, cdy, cdx, bdy, splitter);
    let ca = two_by_two_with(cdx, ady, adx, cdy, splitter);
    let ab = two_by_two_with(adx, bdy, bdx, ady, splitter);

    let mut adet = [0.0; 8];
    let mut bdet = [0.0; 8];
    let mut cdet = [0.0; 8];
    let alen = scale_expansion_with(&bc, adz, splitter, &mut adet);
    let blen = scale_expansion_with(&ca, bdz, splitter, &mut bdet);
    let clen = scale_expansion_with(&ab, cdz, splitter, &mut cdet);

    let mut abdet = [0.0; 16];
    let ablen = fast_expansion_sum_zeroelim(&adet[..alen], &bdet[..blen], &mut abdet);
    let mut fin = [0.0; 24];
    let finlen = fast_expansion_sum_zeroelim(&abdet[..ablen], &cdet[..clen], &mut fin);

    let mut det = estimate(&fin[..finlen]);
    if certified(det, bounds.orient3d.b * permanent) {
        return det;
    }

    let adx_tail = two_diff_tail(a.x, d.x, adx);
    let bdx_tail = two_diff_tail(b.x, d.x, bdx);
    let cdx_tail = two_diff_tail(c.x, d.x, cdx);
    let ady_tail = two_diff_tail(a.y, d.y, ady);
    let bdy_tail = two_diff_tail(b.y, d.y, bdy);
    let cdy_tail = two_diff_tail(c.y, d.y, cdy);
    let adz_tail = two_diff_tail(a.z, d.z, adz);
    let bdz_tail = two_diff_tail(b.z, d.z, bdz);
    let cdz_tail = two_diff_tail(c.z, d.z, cdz);

    let tails = [
        adx_tail, bdx_tail, cdx_tail, ady_tail, bdy_tail, cdy_tail, adz_tail, bdz_tail, cdz_tail,
    ];
    if tails.iter().all(|&tail| tail == 0.0) {
        return det;
    }

    let err_bound = bounds.orient3d.c * permanent + bounds.result * det.abs();
    det += (adz * ((bdx * cdy_tail + cdy * bdx_tail) - (bdy * cdx_tail + cdx * bdy_tail))
        + adz_tail * (bdx * cdy - bdy * cdx))
        + (bdz * ((cdx * ady_tail + ady * cdx_tail) - (cdy * adx_tail + adx * cdy_tail))
            + bdz_tail * (cdx * ady - cdy * adx))
        + (cdz * ((adx * bdy_tail + bdy * adx_tail) - (ady * bdx_tail + bdx * ady_tail))
            + cdz_tail * (adx * bdy - ady * bdx));
    if certified(det, err_bound) {
        return det;
    }

    note_exact_fallback("orient3d");
    orient3d_exact(a, b, c, d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::exact_fallbacks;

    fn sign(value: f64) -> i32 {
        if value > 0.0 {
            1
        } else if value < 0.0 {
            -1
        } else {
            0
        }
    }

    #[test]
    fn orient2d_ccw() {
        let a = Coord::new(0.0, 0.0);
        let b = Coord::new(1.0, 0.0);
        let c = Coord::new(0.0, 1.0);
        assert!(orient2d(&a, &b, &c) > 0.0);
    }

    #[test]
    fn orient2d_cw() {
        let a = Coord::new(0.0, 0.0);
        let b = Coord::new(0.0, 1.0);
        let c = Coord::new(1.0, 0.0);
        assert!(orient2d(&a, &b, &c) < 0.0);
    }

    #[test]
    fn orient2d_collinear() {
        let a = Coord::new(0.0, 0.0);
        let b = Coord::new(1.0, 1.0);
        let c = Coord::new(2.0, 2.0);
        assert_eq!(orient2d(&a, &b, &c), 0.0);
        assert_eq!(orient2d_exact(&a, &b, &c), 0.0);
    }

    #[test]
    fn adaptive_stages_agree_with_exact() {
        // Points on the line y = x, nudged off by single ulps.
        let c = Coord::new(0.5, 0.5);
        let b = Coord::new(24.0, 24.0);
        let mut x = 0.5_f64;
        for step in 0..64 {
            x = f64::from_bits(x.to_bits() + 1 + step % 3);
            let a = Coord::new(x, 0.5 + (x - 0.5) * 1.0000000000000002);
            let adaptive = orient2d(&a, &b, &c);
            let exact = orient2d_exact(&a, &b, &c);
            assert_eq!(sign(adaptive), sign(exact), "step {step}");
        }
    }

    #[test]
    fn orient2d_adapt_stage_b_resolves_exact_differences() {
        // All translations are exact, so stage B must already be exact.
        let a = Coord::new(1.0, 1.0);
        let b = Coord::new(3.0, 3.0 + 2.0 * f64::EPSILON * 2.0);
        let c = Coord::new(2.0, 2.0);
        let det_left = (a.x - c.x) * (b.y - c.y);
        let det_right = (a.y - c.y) * (b.x - c.x);
        let det_sum = det_left.abs() + det_right.abs();
        let value = orient2d_adapt(&a, &b, &c, det_sum, bounds());
        assert_eq!(sign(value), sign(orient2d_exact(&a, &b, &c)));
    }

    #[test]
    fn orient3d_below_plane_is_positive() {
        let a = Coord3::new(0.0, 0.0, 0.0);
        let b = Coord3::new(1.0, 0.0, 0.0);
        let c = Coord3::new(0.0, 1.0, 0.0);
        let below = Coord3::new(0.2, 0.2, -1.0);
        let above = Coord3::new(0.2, 0.2, 1.0);
        assert!(orient3d(&a, &b, &c, &below) > 0.0);
        assert!(orient3d(&a, &b, &c, &above) < 0.0);
        assert!(orient3d_fast(&a, &b, &c, &below) > 0.0);
    }

    #[test]
    fn orient3d_coplanar_is_zero() {
        let a = Coord3::new(0.1, 0.2, 0.3);
        let b = Coord3::new(1.1, 0.2, 0.3);
        let c = Coord3::new(0.1, 1.2, 0.3);
        let d = Coord3::new(7.5, -3.25, 0.3);
        assert_eq!(orient3d(&a, &b, &c, &d), 0.0);
        assert_eq!(orient3d_exact(&a, &b, &c, &d), 0.0);
    }

    #[test]
    fn orient3d_nearly_coplanar_matches_exact() {
        let a = Coord3::new(0.1, 0.2, 0.3);
        let b = Coord3::new(1.1, 0.7, 1.3);
        let c = Coord3::new(0.6, 1.9, 0.3);
        for ulps in 0..32u64 {
            let d = Coord3::new(1.6, 2.4, f64::from_bits(1.3_f64.to_bits() + ulps));
            let adaptive = orient3d(&a, &b, &c, &d);
            let exact = orient3d_exact(&a, &b, &c, &d);
            assert_eq!(sign(adaptive), sign(exact), "ulps {ulps}");
        }
    }

    #[test]
    fn coplanar_points_with_rounded_translations_use_exact_arithmetic() {
        // Every point satisfies z == x exactly, but the differences to the
        // distant `d` round, so no float stage can certify a sign.
        let a = Coord3::new(0.1, 0.2, 0.1);
        let b = Coord3::new(1.7, 0.3, 1.7);
        let c = Coord3::new(0.4, 2.9, 0.4);
        let dx: f64 = 1.0e8 + 0.3;
        let before = exact_fallbacks();
        for (ulps, expected) in [(0u64, 0), (1, -1), (2, -1)] {
            let d = Coord3::new(dx, -dx * 0.5, f64::from_bits(dx.to_bits() + ulps));
            let value = orient3d(&a, &b, &c, &d);
            assert_eq!(sign(value), expected, "ulps {ulps}");
            assert_eq!(value, orient3d_exact(&a, &b, &c, &d), "ulps {ulps}");
        }
        assert_eq!(exact_fallbacks() - before, 3);
    }

    #[test]
    fn certified_inputs_skip_exact_arithmetic() {
        let before = exact_fallbacks();
        let a = Coord3::new(0.0, 0.0, 0.0);
        let b = Coord3::new(1.0, 0.0, 0.0);
        let c = Coord3::new(0.0, 1.0, 0.0);
        assert!(orient3d(&a, &b, &c, &Coord3::new(0.2, 0.2, -1.0)) > 0.0);
        let p = Coord::new(0.0, 0.0);
        let q = Coord::new(1.0, 0.0);
        let r = Coord::new(0.0, 1.0);
        assert!(orient2d(&p, &q, &r) > 0.0);
        assert_eq!(exact_fallbacks(), before);
    }

    #[test]
    fn checked_orient_rejects_nan() {
        let a = Coord::new(0.0, 0.0);
        let b = Coord::new(f64::NAN, 0.0);
        assert_eq!(try_orient2d(&a, &b, &a), Err(NonFiniteInput { index: 1 }));
        let p = Coord3::new(0.0, 0.0, f64::INFINITY);
        let q = Coord3::new(0.0, 0.0, 0.0);
        assert_eq!(try_orient3d(&p, &q, &q, &q), Err(NonFiniteInput { index: 0 }));
        assert_eq!(try_orient3d(&q, &q, &q, &q), Ok(0.0));
    }
}
