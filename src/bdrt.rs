//! The back-projection kernel: the scatter-accumulate transpose of the forward kernel's
//! gather, so that `<adrt(x), y> = <x, bdrt(y)>` holds by construction.
use crate::buffer::{BufferPair, StrideView};
use crate::error::Error;
use crate::float::AdrtFloat;
use crate::iter_range::IterRange;
use crate::shape::{num_iters, AdrtShape};
use crate::validate;

/// Runs BDRT on an ADRT-layout gradient tensor, applying passes in reverse order
/// (`iters.end` down to `iters.start`). When `iters.start == 0` the output is the per-quadrant
/// `(planes, 4, N, N)` pre-butterfly gradient; otherwise it is the intermediate ADRT-layout
/// gradient after undoing passes down to `iters.start`.
pub fn bdrt<T: AdrtFloat>(input: &[T], shape: AdrtShape, iters: IterRange) -> Result<Vec<T>, Error> {
    let n = shape.n;
    let output_rows = if iters.start == 0 { n } else { 2 * n - 1 };
    let mut output = vec![T::zero(); shape.planes * 4 * output_rows * n];
    bdrt_into(input, shape, iters, &mut output)?;
    Ok(output)
}

/// Allocation-free variant of [`bdrt`]: `output` must already be sized to
/// `planes * 4 * rows * n`, where `rows` is `n` when `iters.start == 0` (the fully
/// back-projected image) or `2n - 1` otherwise (an intermediate ADRT-layout gradient).
pub fn bdrt_into<T: AdrtFloat>(
    input: &[T],
    shape: AdrtShape,
    iters: IterRange,
    output: &mut [T],
) -> Result<(), Error> {
    validate::adrt_layout(input, shape)?;
    let n = shape.n;
    let total = num_iters(n);
    if iters.end != total.saturating_sub(1) {
        log::warn!("bdrt() requires iter_end == num_iters(N) - 1, got {}", iters.end);
        return Err(Error::IterationBounds {
            start: iters.start as i64,
            end: iters.end as i64,
            num_iters: total,
        });
    }
    let final_sections = 1usize << iters.start;
    let output_rows = if iters.start == 0 { n } else { 2 * n - 1 };
    let expected_len = shape.planes * 4 * output_rows * n;
    if output.len() != expected_len {
        return Err(Error::Shape {
            reason: format!(
                "bdrt_into output length {} does not match expected {}",
                output.len(),
                expected_len
            ),
        });
    }

    let mut pair = BufferPair::try_new(validate::checked_scratch_len(shape.planes, n)?)?;
    init_from_adrt_layout(input, shape, &mut pair.prev);
    run_passes(&mut pair, shape.planes, n, iters)?;
    copy_out(&pair.prev, shape.planes, n, final_sections, output_rows, output);
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
                    crate::buffer::write(prev, &view, plane, quadrant, d, col, 0, input[idx]);
                }
            }
        }
    }
}

fn run_passes<T: AdrtFloat>(
    pair: &mut BufferPair<T>,
    planes: usize,
    n: usize,
    iters: IterRange,
) -> Result<(), Error> {
    let mut view = StrideView::for_pass(n, 1usize << (iters.end + 1));
    for pass in (iters.start..=iters.end).rev() {
        log::debug!("bdrt pass {pass} start: sections={}, n={n}", view.sections);
        let prev_view = view.coarser(n);
        for v in pair.curr.iter_mut() {
            *v = T::zero();
        }
        for plane in 0..planes {
            for quadrant in 0..4 {
                for j in 0..prev_view.sections {
                    for a in 0..view.angles_per_section {
                        for x in 0..view.row_capacity as i64 {
                            let gl = crate::buffer::read(
                                &pair.prev,
                                &view,
                                plane,
                                quadrant,
                                x as usize,
                                2 * j,
                                a,
                            );
                            let gr = crate::buffer::read(
                                &pair.prev,
                                &view,
                                plane,
                                quadrant,
                                x as usize,
                                2 * j + 1,
                                a,
                            );
                            crate::buffer::accumulate(
                                &mut pair.curr,
                                &prev_view,
                                plane,
                                quadrant,
                                x,
                                j,
                                2 * a,
                                gl + gr,
                            );
                            crate::buffer::accumulate(
                                &mut pair.curr,
                                &prev_view,
                                plane,
                                quadrant,
                                x + a as i64 + 1,
                                j,
                                2 * a + 1,
                                gl,
                            );
                            crate::buffer::accumulate(
                                &mut pair.curr,
                                &prev_view,
                                plane,
                                quadrant,
                                x + a as i64,
                                j,
                                2 * a + 1,
                                gr,
                            );
                        }
                    }
                }
            }
        }
        pair.swap();
        log::debug!("bdrt pass {pass} end: sections={}, n={n}", prev_view.sections);
        view = prev_view;
    }
    Ok(())
}

fn copy_out<T: AdrtFloat>(
    prev: &[T],
    planes: usize,
    n: usize,
    sections: usize,
    rows: usize,
    output: &mut [T],
) {
    let view = StrideView::for_pass(n, sections);
    for plane in 0..planes {
        for quadrant in 0..4 {
            for d in 0..rows {
                for col in 0..n {
                    let j = col / view.angles_per_section;
                    let a = col % view.angles_per_section;
                    let idx = ((plane * 4 + quadrant) * rows + d) * n + col;
                    output[idx] = crate::buffer::read(prev, &view, plane, quadrant, d, j, a);
                }
            }
        }
    }
}
