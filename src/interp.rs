//! Cartesian resampling of an ADRT-layout tensor, for display/visualization purposes.
use crate::error::Error;
use crate::float::{AdrtConstants, AdrtFloat};
use crate::shape::AdrtShape;
use crate::validate;
use num_traits::ToPrimitive;

/// Resamples `input` (an ADRT-layout tensor) onto a Cartesian `(offset, angle)` grid,
/// producing a `(planes, N, 4N)` output. Offsets span `[-sqrt(2)/2, sqrt(2)/2]`, angles span
/// `[-pi/2, pi/2]`. Cells whose source row falls outside the valid displacement range are
/// zero.
pub fn interp_adrtcart<T: AdrtFloat>(input: &[T], shape: AdrtShape) -> Result<Vec<T>, Error> {
    validate::adrt_layout(input, shape)?;

    let n = shape.n;
    let displacement = shape.displacement();
    let half = T::from_f64(0.5).unwrap();
    let one = T::one();
    let two = T::from_f64(2.0).unwrap();
    let nf = T::from_usize(n).unwrap();
    let nf4 = T::from_usize(4 * n).unwrap();

    let pi = T::pi();
    let pi_2 = T::pi_2();
    let pi_4 = T::pi_4();
    let sqrt2 = T::sqrt2();
    let sqrt2_2 = T::sqrt2_2();

    let dth = pi / nf4;
    let th_left = -pi_2 + half * dth;
    let ds = sqrt2 / nf;
    let s_left = -sqrt2_2 + half * ds;

    let mut output = vec![T::zero(); shape.planes * n * 4 * n];

    for plane in 0..shape.planes {
        for offset in 0..n {
            let j = T::from_usize(n - 1 - offset).unwrap();
            let s = s_left + j * ds;

            for angle in 0..4 * n {
                let i = T::from_usize(4 * n - 1 - angle).unwrap();
                let th = th_left + i * dth;

                let gt = |a: T, b: T| -> T {
                    if a > b {
                        one
                    } else {
                        T::zero()
                    }
                };
                let sgn = two * gt(th, T::zero()) - two * gt(th, pi_4) - two * gt(th, -pi_4) + one;
                let th0 = th.abs() - (th - pi_4).abs() - (th + pi_4).abs() + pi_2;
                let s0 = sgn * s;
                let q = (gt(th, T::zero()) + gt(th, -pi_4) + gt(th, pi_4))
                    .to_usize()
                    .unwrap();

                let ti_f = (th0.tan() * (nf - one)).floor();
                let factor = ((ti_f / nf) * (ti_f / nf) + (one - one / nf) * (one - one / nf)).sqrt();

                let h0 = half + s0 / th0.cos() - half * th0.tan();
                let hi_f = ((one - h0) * nf - half * (sgn + one)).floor();

                let out_idx = (plane * n + offset) * 4 * n + angle;
                if hi_f > T::from_f64(-1.0).unwrap() && hi_f < T::from_usize(2 * n - 1).unwrap() {
                    let ti = ti_f.to_usize().unwrap();
                    let hi = hi_f.to_usize().unwrap();
                    let in_idx = ((plane * 4 + q) * displacement + hi) * n + ti;
                    output[out_idx] = factor * (input[in_idx] / nf);
                } else {
                    output[out_idx] = T::zero();
                }
            }
        }
    }

    Ok(output)
}
