//! In-sphere predicate.

use super::{Coord3, NonFiniteInput, certified, check_finite, note_exact_fallback};
use crate::bounds::{ErrorBounds, bounds};
use crate::expansion::{
    Expansion, estimate, fast_expansion_sum_zeroelim, scale_expansion_with, two_by_two_with,
    two_diff_tail,
};

/// Location of `e` relative to the sphere through `a`, `b`, `c`, `d`.
///
/// Returns a positive value if `e` lies inside the sphere, a negative value if
/// it lies outside, and exactly zero if the five points are cospherical. The
/// points `a`, `b`, `c`, `d` must be ordered so that
/// [`orient3d`](super::orient3d) is positive for them; otherwise the sign is
/// reversed. Inputs far outside the [safe range](crate#range) may lose the
/// sign.
#[inline]
pub fn insphere(a: &Coord3, b: &Coord3, c: &Coord3, d: &Coord3, e: &Coord3) -> f64 {
    let aex = a.x - e.x;
    let bex = b.x - e.x;
    let cex = c.x - e.x;
    let dex = d.x - e.x;
    let aey = a.y - e.y;
    let bey = b.y - e.y;
    let cey = c.y - e.y;
    let dey = d.y - e.y;
    let aez = a.z - e.z;
    let bez = b.z - e.z;
    let cez = c.z - e.z;
    let dez = d.z - e.z;

    let aexbey = aex * bey;
    let bexaey = bex * aey;
    let ab = aexbey - bexaey;
    let bexcey = bex * cey;
    let cexbey = cex * bey;
    let bc = bexcey - cexbey;
    let cexdey = cex * dey;
    let dexcey = dex * cey;
    let cd = cexdey - dexcey;
    let dexaey = dex * aey;
    let aexdey = aex * dey;
    let da = dexaey - aexdey;
    let aexcey = aex * cey;
    let cexaey = cex * aey;
    let ac = aexcey - cexaey;
    let bexdey = bex * dey;
    let dexbey = dex * bey;
    let bd = bexdey - dexbey;

    let abc = aez * bc - bez * ac + cez * ab;
    let bcd = bez * cd - cez * bd + dez * bc;
    let cda = cez * da + dez * ac + aez * cd;
    let dab = dez * ab + aez * bd + bez * da;

    let alift = aex * aex + aey * aey + aez * aez;
    let blift = bex * bex + bey * bey + bez * bez;
    let clift = cex * cex + cey * cey + cez * cez;
    let dlift = dex * dex + dey * dey + dez * dez;

    let det = (dlift * abc - clift * dab) + (blift * cda - alift * bcd);

    let aez_plus = aez.abs();
    let bez_plus = bez.abs();
    let cez_plus = cez.abs();
    let dez_plus = dez.abs();
    let ab_plus = aexbey.abs() + bexaey.abs();
    let bc_plus = bexcey.abs() + cexbey.abs();
    let cd_plus = cexdey.abs() + dexcey.abs();
    let da_plus = dexaey.abs() + aexdey.abs();
    let ac_plus = aexcey.abs() + cexaey.abs();
    let bd_plus = bexdey.abs() + dexbey.abs();
    let permanent = (cd_plus * bez_plus + bd_plus * cez_plus + bc_plus * dez_plus) * alift
        + (da_plus * cez_plus + ac_plus * dez_plus + cd_plus * aez_plus) * blift
        + (ab_plus * dez_plus + bd_plus * aez_plus + da_plus * bez_plus) * clift
        + (bc_plus * aez_plus + ac_plus * bez_plus + ab_plus * cez_plus) * dlift;

    let bounds = bounds();
    let err_bound = bounds.insphere.a * permanent;
    if det > err_bound || -det > err_bound {
        return det;
    }
    insphere_adapt(a, b, c, d, e, permanent, bounds)
}

/// Uncertified in-sphere test: the plain floating-point determinant.
#[inline]
pub fn insphere_fast(a: &Coord3, b: &Coord3, c: &Coord3, d: &Coord3, e: &Coord3) -> f64 {
    let aex = a.x - e.x;
    let bex = b.x - e.x;
    let cex = c.x - e.x;
    let dex = d.x - e.x;
    let aey = a.y - e.y;
    let bey = b.y - e.y;
    let cey = c.y - e.y;
    let dey = d.y - e.y;
    let aez = a.z - e.z;
    let bez = b.z - e.z;
    let cez = c.z - e.z;
    let dez = d.z - e.z;

    let ab = aex * bey - bex * aey;
    let bc = bex * cey - cex * bey;
    let cd = cex * dey - dex * cey;
    let da = dex * aey - aex * dey;
    let ac = aex * cey - cex * aey;
    let bd = bex * dey - dex * bey;

    let abc = aez * bc - bez * ac + cez * ab;
    let bcd = bez * cd - cez * bd + dez * bc;
    let cda = cez * da + dez * ac + aez * cd;
    let dab = dez * ab + aez * bd + bez * da;

    let alift = aex * aex + aey * aey + aez * aez;
    let blift = bex * bex + bey * bey + bez * bez;
    let clift = cex * cex + cey * cey + cez * cez;
    let dlift = dex * dex + dey * dey + dez * dez;

    (dlift * abc - clift * dab) + (blift * cda - alift * bcd)
}

/// In-sphere test computed with exact expansion arithmetic throughout.
pub fn insphere_exact(a: &Coord3, b: &Coord3, c: &Coord3, d: &Coord3, e: &Coord3) -> f64 {
    let translate = |p: &Coord3| {
        [
            Expansion::difference(p.x, e.x),
            Expansion::difference(p.y, e.y),
            Expansion::difference(p.z, e.z),
        ]
    };
    let [aex, aey, aez] = translate(a);
    let [bex, bey, bez] = translate(b);
    let [cex, cey, cez] = translate(c);
    let [dex, dey, dez] = translate(d);

    let minor = |px: &Expansion, py: &Expansion, qx: &Expansion, qy: &Expansion| {
        &(px * qy) - &(qx * py)
    };
    let ab = minor(&aex, &aey, &bex, &bey);
    let bc = minor(&bex, &bey, &cex, &cey);
    let cd = minor(&cex, &cey, &dex, &dey);
    let da = minor(&dex, &dey, &aex, &aey);
    let ac = minor(&aex, &aey, &cex, &cey);
    let bd = minor(&bex, &bey, &dex, &dey);

    let abc = &(&(&aez * &bc) - &(&bez * &ac)) + &(&cez * &ab);
    let bcd = &(&(&bez * &cd) - &(&cez * &bd)) + &(&dez * &bc);
    let cda = &(&(&cez * &da) + &(&dez * &ac)) + &(&aez * &cd);
    let dab = &(&(&dez * &ab) + &(&aez * &bd)) + &(&bez * &da);

    let lift = |x: &Expansion, y: &Expansion, z: &Expansion| &(&(x * x) + &(y * y)) + &(z * z);
    let alift = lift(&aex, &aey, &aez);
    let blift = lift(&bex, &bey, &bez);
    let clift = lift(&cex, &cey, &cez);
    let dlift = lift(&dex, &dey, &dez);

    let det = &(&(&dlift * &abc) - &(&clift * &dab)) + &(&(&blift * &cda) - &(&alift * &bcd));
    det.most_significant()
}

/// Checked [`insphere`] that rejects non-finite coordinates.
pub fn try_insphere(
    a: &Coord3,
    b: &Coord3,
    c: &Coord3,
    d: &Coord3,
    e: &Coord3,
) -> Result<f64, NonFiniteInput> {
    check_finite(&[
        a.is_finite(),
        b.is_finite(),
        c.is_finite(),
        d.is_finite(),
        e.is_finite(),
    ])?;
    Ok(insphere(a, b, c, d, e))
}

/// Writes `p * u + q * v + r * w` into `h`, where `u`, `v`, `w` are 2x2 minors.
#[allow(clippy::too_many_arguments)]
fn cofactor_sum(
    u: &[f64; 4],
    p: f64,
    v: &[f64; 4],
    q: f64,
    w: &[f64; 4],
    r: f64,
    splitter: f64,
    h: &mut [f64; 24],
) -> usize {
    let mut pu = [0.0; 8];
    let mut qv = [0.0; 8];
    let mut rw = [0.0; 8];
    let mut partial = [0.0; 16];

    let pulen = scale_expansion_with(u, p, splitter, &mut pu);
    let qvlen = scale_expansion_with(v, q, splitter, &mut qv);
    let rwlen = scale_expansion_with(w, r, splitter, &mut rw);
    let partial_len = fast_expansion_sum_zeroelim(&pu[..pulen], &qv[..qvlen], &mut partial);
    fast_expansion_sum_zeroelim(&rw[..rwlen], &partial[..partial_len], h)
}

/// Writes `(x^2 + y^2 + z^2) * cofactor` into `h`.
fn lifted(cofactor: &[f64], x: f64, y: f64, z: f64, splitter: f64, h: &mut [f64; 288]) -> usize {
    let mut once = [0.0; 48];
    let mut axes = [[0.0; 96]; 3];
    let mut lens = [0usize; 3];
    for ((axis, len), coordinate) in axes.iter_mut().zip(lens.iter_mut()).zip([x, y, z]) {
        let once_len = scale_expansion_with(cofactor, coordinate, splitter, &mut once);
        *len = scale_expansion_with(&once[..once_len], coordinate, splitter, axis);
    }

    let mut xy = [0.0; 192];
    let xylen = fast_expansion_sum_zeroelim(&axes[0][..lens[0]], &axes[1][..lens[1]], &mut xy);
    fast_expansion_sum_zeroelim(&xy[..xylen], &axes[2][..lens[2]], h)
}

fn insphere_adapt(
    a: &Coord3,
    b: &Coord3,
    c: &Coord3,
    d: &Coord3,
    e: &Coord3,
    permanent: f64,
    bounds: &ErrorBounds,
) -> f64 {
    if cfg!(feature = "exact-fallback-only") {
        note_exact_fallback("insphere");
        return insphere_exact(a, b, c, d, e);
    }

    let aex = a.x - e.x;
    let bex = b.x - e.x;
    let cex = c.x - e.x;
    let dex = d.x - e.x;
    let aey = a.y - e.y;
    let bey = b.y - e.y;
    let cey = c.y - e.y;
    let dey = d.y - e.y;
    let aez = a.z - e.z;
    let bez = b.z - e.z;
    let cez = c.z - e.z;
    let dez = d.z - e.z;

    let splitter = bounds.splitter;
    let ab = two_by_two_with(aex, bey, bex, aey, splitter);
    let bc = two_by_two_with(bex, cey, cex, bey, splitter);
    let cd = two_by_two_with(cex, dey, dex, cey, splitter);
    let da = two_by_two_with(dex, aey, aex, dey, splitter);
    let ac = two_by_two_with(aex, cey, cex, aey, splitter);
    let bd = two_by_two_with(bex, dey, dex, bey, splitter);

    // The cofactors of alift and clift enter the determinant negated.
    let mut cofactor = [0.0; 24];
    let mut adet = [0.0; 288];
    let mut bdet = [0.0; 288];
    let mut cdet = [0.0; 288];
    let mut ddet = [0.0; 288];

    let len = cofactor_sum(&cd, -bez, &bd, cez, &bc, -dez, splitter, &mut cofactor);
    let alen = lifted(&cofactor[..len], aex, aey, aez, splitter, &mut adet);
    let len = cofactor_sum(&da, cez, &ac, dez, &cd, aez, splitter, &mut cofactor);
    let blen = lifted(&cofactor[..len], bex, bey, bez, splitter, &mut bdet);
    let len = cofactor_sum(&ab, -dez, &bd, -aez, &da, -bez, splitter, &mut cofactor);
    let clen = lifted(&cofactor[..len], cex, cey, cez, splitter, &mut cdet);
    let len = cofactor_sum(&bc, aez, &ac, -bez, &ab, cez, splitter, &mut cofactor);
    let dlen = lifted(&cofactor[..len], dex, dey, dez, splitter, &mut ddet);

    let mut abdet = [0.0; 576];
    let mut cddet = [0.0; 576];
    let mut fin = [0.0; 1152];
    let ablen = fast_expansion_sum_zeroelim(&adet[..alen], &bdet[..blen], &mut abdet);
    let cdlen = fast_expansion_sum_zeroelim(&cdet[..clen], &ddet[..dlen], &mut cddet);
    let finlen = fast_expansion_sum_zeroelim(&abdet[..ablen], &cddet[..cdlen], &mut fin);

    let mut det = estimate(&fin[..finlen]);
    if certified(det, bounds.insphere.b * permanent) {
        return det;
    }

    let aex_tail = two_diff_tail(a.x, e.x, aex);
    let aey_tail = two_diff_tail(a.y, e.y, aey);
    let aez_tail = two_diff_tail(a.z, e.z, aez);
    let bex_tail = two_diff_tail(b.x, e.x, bex);
    let bey_tail = two_diff_tail(b.y, e.y, bey);
    let bez_tail = two_diff_tail(b.z, e.z, bez);
    let cex_tail = two_diff_tail(c.x, e.x, cex);
    let cey_tail = two_diff_tail(c.y, e.y, cey);
    let cez_tail = two_diff_tail(c.z, e.z, cez);
    let dex_tail = two_diff_tail(d.x, e.x, dex);
    let dey_tail = two_diff_tail(d.y, e.y, dey);
    let dez_tail = two_diff_tail(d.z, e.z, dez);

    let tails = [
        aex_tail, aey_tail, aez_tail, bex_tail, bey_tail, bez_tail, cex_tail, cey_tail, cez_tail,
        dex_tail, dey_tail, dez_tail,
    ];
    if tails.iter().all(|&tail| tail == 0.0) {
        return det;
    }

    // First-order change of each 2x2 minor under the translation tails.
    let ab_eps = (aex * bey_tail + bey * aex_tail) - (aey * bex_tail + bex * aey_tail);
    let bc_eps = (bex * cey_tail + cey * bex_tail) - (bey * cex_tail + cex * bey_tail);
    let cd_eps = (cex * dey_tail + dey * cex_tail) - (cey * dex_tail + dex * cey_tail);
    let da_eps = (dex * aey_tail + aey * dex_tail) - (dey * aex_tail + aex * dey_tail);
    let ac_eps = (aex * cey_tail + cey * aex_tail) - (aey * cex_tail + cex * aey_tail);
    let bd_eps = (bex * dey_tail + dey * bex_tail) - (bey * dex_tail + dex * bey_tail);

    let ab = aex * bey - bex * aey;
    let bc = bex * cey - cex * bey;
    let cd = cex * dey - dex * cey;
    let da = dex * aey - aex * dey;
    let ac = aex * cey - cex * aey;
    let bd = bex * dey - dex * bey;

    let err_bound = bounds.insphere.c * permanent + bounds.result * det.abs();
    det += (((bex * bex + bey * bey + bez * bez)
        * ((cez * da_eps + dez * ac_eps + aez * cd_eps)
            + (cez_tail * da + dez_tail * ac + aez_tail * cd))
        + (dex * dex + dey * dey + dez * dez)
            * ((aez * bc_eps - bez * ac_eps + cez * ab_eps)
                + (aez_tail * bc - bez_tail * ac + cez_tail * ab)))
        - ((aex * aex + aey * aey + aez * aez)
            * ((bez * cd_eps - cez * bd_eps + dez * bc_eps)
                + (bez_tail * cd - cez_tail * bd + dez_tail * bc))
            + (cex * cex + cey * cey + cez * cez)
                * ((dez * ab_eps + aez * bd_eps + bez * da_eps)
                    + (dez_tail * ab + aez_tail * bd + bez_tail * da))))
        + 2.0
            * (((bex * bex_tail + bey * bey_tail + bez * bez_tail)
                * (cez * da + dez * ac + aez * cd)
                + (dex * dex_tail + dey * dey_tail + dez * dez_tail)
                    * (aez * bc - bez * ac + cez * ab))
                - ((aex * aex_tail + aey * aey_tail + aez * aez_tail)
                    * (bez * cd - cez * bd + dez * bc)
                    + (cex * cex_tail + cey * cey_tail + cez * cez_tail)
                        * (dez * ab + aez * bd + bez * da)));
    if certified(det, err_bound) {
        return det;
    }

    note_exact_fallback("insphere");
    insphere_exact(a, b, c, d, e)
}
