//! The inverse kernel: subtraction butterfly plus a bottom-up cumulative sum per pass, which
//! together invert the forward kernel's summation. Like `bdrt.rs`, it undoes the forward
//! passes by starting from the finest split and walking `sections` back down to one.
use crate::buffer::{read, write, BufferPair, StrideView};
use crate::error::Error;
use crate::float::AdrtFloat;
use crate::iter_range::IterRange;
use crate::shape::{num_iters, AdrtShape, ImageShape};
use crate::validate;

/// Runs IADRT on an ADRT-layout tensor, returning a newly allocated `(planes, 4, N, N)` output
/// (one reconstructed image per quadrant reordering).
pub fn iadrt<T: AdrtFloat>(input: &[T], shape: AdrtShape, iters: IterRange) -> Result<Vec<T>, Error> {
    let mut output = vec![T::zero(); shape.planes * 4 * shape.n * shape.n];
    iadrt_into(input, shape, iters, &mut output)?;
    Ok(output)
}

/// Allocation-free variant of [`iadrt`]: `output` must already be sized to
/// `planes * 4 * n * n`.
pub fn iadrt_into<T: AdrtFloat>(
    input: &[T],
    shape: AdrtShape,
    iters: IterRange,
    output: &mut [T],
) -> Result<(), Error> {
    validate::adrt_layout(input, shape)?;
    let n = shape.n;
    let total = num_iters(n);
    if iters.start != 0 || iters.end != total.saturating_sub(1) {
        log::warn!(
            "iadrt() requires the full pass range [0, {}], got [{}, {}]",
            total.saturating_sub(1),
            iters.start,
            iters.end
        );
        return Err(Error::IterationBounds {
            start: iters.start as i64,
            end: iters.end as i64,
            num_iters: total,
        });
    }
    let expected_len = shape.planes * 4 * n * n;
    if output.len() != expected_len {
        return Err(Error::Shape {
            reason: format!(
                "iadrt_into output length {} does not match expected {}",
                output.len(),
                expected_len
            ),
        });
    }

    let mut pair = BufferPair::try_new(validate::checked_scratch_len(shape.planes, n)?)?;
    init_from_adrt_layout(input, shape, &mut pair.prev);
    run_passes(&mut pair, shape.planes, n, iters)?;
    copy_out(&pair.prev, shape.planes, n, output);
    Ok(())
}

fn init_from_adrt_layout<T: AdrtFloat>(input: &[T], shape: AdrtShape, prev: &mut [T]) {
    let n = shape.n;
    let view = StrideView::for_pass(n, n);
    let displacement = shape.displacement();
    for plane in 0..shape.planes {
        for quadrant in 0..4 {
            for d in 0..displacement {
                for col in 0..n {
                    let idx = ((plane * 4 + quadrant) * displacement + d) * n + col;
                    write(prev, &view, plane, quadrant, d, col, 0, input[idx]);
                }
            }
        }
    }
}

/// Undoes one forward pass given its write equations
/// `curr[x,2j,a] = prev[x,j,2a] + prev[x+a+1,j,2a+1]` and
/// `curr[x,2j+1,a] = prev[x,j,2a] + prev[x+a,j,2a+1]`: subtracting the two isolates a backward
/// difference of `prev[.,j,2a+1]`, which a reverse cumulative sum (shifted by `a`) turns back
/// into that term directly; the other term then falls out of either original equation.
fn run_passes<T: AdrtFloat>(
    pair: &mut BufferPair<T>,
    planes: usize,
    n: usize,
    iters: IterRange,
) -> Result<(), Error> {
    let row_capacity = crate::buffer::row_capacity(n);
    let mut raval = vec![T::zero(); row_capacity];
    let mut diff = vec![T::zero(); row_capacity];
    let mut view = StrideView::for_pass(n, 1usize << (iters.end + 1));
    for pass in (iters.start..=iters.end).rev() {
        log::debug!("iadrt pass {pass} start: sections={}, n={n}", view.sections);
        let prev_view = view.coarser(n);
        for v in pair.curr.iter_mut() {
            *v = T::zero();
        }
        for plane in 0..planes {
            for quadrant in 0..4 {
                for j in 0..prev_view.sections {
                    for a in 0..view.angles_per_section {
                        for x in 0..row_capacity {
                            let rv = read(&pair.prev, &view, plane, quadrant, x, 2 * j, a);
                            let lv = read(&pair.prev, &view, plane, quadrant, x, 2 * j + 1, a);
                            raval[x] = rv;
                            diff[x] = lv - rv;
                        }

                        // Reverse cumulative sum of `diff`, shifted by `a`, recovers
                        // `prev[.,j,2a+1]` at every row.
                        let mut sum = T::zero();
                        for r in (0..row_capacity).rev() {
                            if r >= a {
                                sum += diff[r - a];
                            }
                            write(&mut pair.curr, &prev_view, plane, quadrant, r, j, 2 * a + 1, sum);
                        }

                        for x in 0..row_capacity {
                            let q = if x + a + 1 < row_capacity {
                                read(&pair.curr, &prev_view, plane, quadrant, x + a + 1, j, 2 * a + 1)
                            } else {
                                T::zero()
                            };
                            write(&mut pair.curr, &prev_view, plane, quadrant, x, j, 2 * a, raval[x] - q);
                        }
                    }
                }
            }
        }
        pair.swap();
        log::debug!("iadrt pass {pass} end: sections={}, n={n}", prev_view.sections);
        view = prev_view;
    }
    Ok(())
}

fn copy_out<T: AdrtFloat>(prev: &[T], planes: usize, n: usize, output: &mut [T]) {
    let view = StrideView::for_pass(n, 1);
    for plane in 0..planes {
        for quadrant in 0..4 {
            for row in 0..n {
                for col in 0..n {
                    let value = read(prev, &view, plane, quadrant, row, 0, col);
                    let idx = ((plane * 4 + quadrant) * n + row) * n + col;
                    output[idx] = value;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adrt::adrt;

    #[test]
    fn round_trips_small_image_f64() {
        let n = 8;
        let shape = ImageShape::new(1, n);
        let input: Vec<f64> = (0..shape.len()).map(|i| (i as f64 * 0.37).sin()).collect();

        let fwd = adrt(&input, shape, IterRange::full(num_iters(n))).unwrap();
        let adrt_shape = AdrtShape::new(1, n);
        let recon = iadrt(&fwd, adrt_shape, IterRange::full(num_iters(n))).unwrap();

        // Quadrant 0 of the reconstruction corresponds directly to the original image.
        for x in 0..n {
            for y in 0..n {
                let got = recon[x * n + y];
                let want = input[x * n + y];
                assert!((got - want).abs() < 1e-9, "x={x} y={y} got={got} want={want}");
            }
        }
    }

    #[test]
    fn iadrt_into_rejects_wrong_output_length() {
        let n = 4;
        let shape = AdrtShape::new(1, n);
        let input = vec![0.0f32; shape.len()];
        let mut output = vec![0.0f32; 1];
        let err = iadrt_into(&input, shape, IterRange::full(num_iters(n)), &mut output).unwrap_err();
        assert!(matches!(err, Error::Shape { .. }));
    }

    #[test]
    fn rejects_input_not_fully_formed() {
        let n = 4;
        let shape = AdrtShape::new(1, n);
        let input = vec![0.0f32; shape.len()];
        let err = iadrt(&input, shape, IterRange::new(0, 0, num_iters(n)).unwrap()).unwrap_err();
        assert!(matches!(err, Error::IterationBounds { .. }));
    }

    #[test]
    fn rejects_malformed_adrt_layout() {
        // (4, 6, 4) is invalid for n=4 since 6 != 2*4-1.
        let data = vec![0f32; 4 * 6 * 4];
        let err = iadrt(&data, AdrtShape::new(1, 4), IterRange::full(num_iters(4))).unwrap_err();
        assert!(matches!(err, Error::Shape { .. }));
    }
}
