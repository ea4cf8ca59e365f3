//! The forward kernel: `log2(N)` butterfly passes producing the four ADRT quadrants.
use crate::buffer::{checked_read, read, write, BufferPair, StrideView};
use crate::error::Error;
use crate::float::AdrtFloat;
use crate::iter_range::IterRange;
use crate::shape::{num_iters, AdrtShape, ImageShape};
use crate::validate;

/// Runs ADRT on a full `(planes, N, N)` image over `iters`, returning a newly allocated
/// `(planes, 4, 2N-1, N)` output. `iters` must start at `0`; use [`adrt_resume`] to continue
/// from an intermediate ADRT-layout state.
pub fn adrt<T: AdrtFloat>(input: &[T], shape: ImageShape, iters: IterRange) -> Result<Vec<T>, Error> {
    let out_shape = AdrtShape::new(shape.planes, shape.n);
    let mut output = vec![T::zero(); out_shape.len()];
    adrt_into(input, shape, iters, &mut output)?;
    Ok(output)
}

/// Allocation-free variant of [`adrt`]: `output` must already be sized to
/// `AdrtShape::new(shape.planes, shape.n).len()`.
pub fn adrt_into<T: AdrtFloat>(
    input: &[T],
    shape: ImageShape,
    iters: IterRange,
    output: &mut [T],
) -> Result<(), Error> {
    validate::square_power_of_two(input, shape)?;
    let total = num_iters(shape.n);
    if iters.start != 0 {
        log::warn!("adrt() from a full image requires iter_start == 0, got {}", iters.start);
        return Err(Error::IterationBounds {
            start: iters.start as i64,
            end: iters.end as i64,
            num_iters: total,
        });
    }
    let out_shape = AdrtShape::new(shape.planes, shape.n);
    if output.len() != out_shape.len() {
        return Err(Error::Shape {
            reason: format!(
                "adrt_into output length {} does not match expected {}",
                output.len(),
                out_shape.len()
            ),
        });
    }
    let mut pair = BufferPair::try_new(validate::checked_scratch_len(shape.planes, shape.n)?)?;
    init_from_image(input, shape, &mut pair.prev);
    run_passes(&mut pair, shape.planes, shape.n, iters)?;
    copy_out(&pair.prev, shape.planes, shape.n, 1usize << (iters.end + 1), output);
    Ok(())
}

/// Resumes ADRT from an intermediate ADRT-layout state (the output of a prior `adrt`/`adrt_resume`
/// call whose `iters.end` was `shape_iters - 1` for some `shape_iters <= num_iters(N)`), running
/// `iters` of the remaining passes. `input` is interpreted as the state after `iters.start`
/// passes.
pub fn adrt_resume<T: AdrtFloat>(
    input: &[T],
    shape: AdrtShape,
    iters: IterRange,
) -> Result<Vec<T>, Error> {
    validate::adrt_layout(input, shape)?;
    let mut output = vec![T::zero(); shape.len()];
    let mut pair = BufferPair::try_new(validate::checked_scratch_len(shape.planes, shape.n)?)?;
    init_from_adrt_layout(input, shape, iters.start, &mut pair.prev);
    run_passes(&mut pair, shape.planes, shape.n, iters)?;
    copy_out(&pair.prev, shape.planes, shape.n, 1usize << (iters.end + 1), &mut output);
    Ok(output)
}

fn init_from_image<T: AdrtFloat>(input: &[T], shape: ImageShape, prev: &mut [T]) {
    let n = shape.n;
    let view = StrideView::initial(n);
    crate::parallel::for_each_plane_chunk_indexed(prev, view.plane_len(), |plane, chunk| {
        for x in 0..n {
            for y in 0..n {
                let base = plane * n * n;
                let q0 = input[base + x * n + y];
                let q1 = input[base + x * n + (n - 1 - y)];
                let q2 = input[base + y * n + x];
                let q3 = input[base + (n - 1 - y) * n + x];
                write(chunk, &view, 0, 0, x, 0, y, q0);
                write(chunk, &view, 0, 1, x, 0, y, q1);
                write(chunk, &view, 0, 2, x, 0, y, q2);
                write(chunk, &view, 0, 3, x, 0, y, q3);
            }
        }
    });
}

/// The ADRT-layout tensor's `(displacement, angle)` axes line up exactly with the scratch
/// buffer's `(row, section*angles_per_section + angle)` axes at any pass's section count, so
/// resuming is a direct copy with no re-permutation.
fn init_from_adrt_layout<T: AdrtFloat>(
    input: &[T],
    shape: AdrtShape,
    start_pass: u32,
    prev: &mut [T],
) {
    let n = shape.n;
    let sections = 1usize << start_pass;
    let view = StrideView::for_pass(n, sections);
    let displacement = shape.displacement();
    crate::parallel::for_each_plane_chunk_indexed(prev, view.plane_len(), |plane, chunk| {
        for quadrant in 0..4 {
            for d in 0..displacement {
                for col in 0..n {
                    let idx = ((plane * 4 + quadrant) * displacement + d) * n + col;
                    let j = col / view.angles_per_section;
                    let a = col % view.angles_per_section;
                    write(chunk, &view, 0, quadrant, d, j, a, input[idx]);
                }
            }
        }
    });
}

fn run_passes<T: AdrtFloat>(
    pair: &mut BufferPair<T>,
    planes: usize,
    n: usize,
    iters: IterRange,
) -> Result<(), Error> {
    let mut view = StrideView::for_pass(n, 1usize << iters.start);
    for pass in iters.start..=iters.end {
        log::debug!("adrt pass {pass} start: sections={}, n={n}", view.sections);
        let next_view = view.next(n);
        for plane in 0..planes {
            for quadrant in 0..4 {
                for j in 0..view.sections {
                    for a in 0..next_view.angles_per_section {
                        for x in 0..view.row_capacity as i64 {
                            let av = read(&pair.prev, &view, plane, quadrant, x as usize, j, 2 * a);
                            let b_left =
                                checked_read(&pair.prev, &view, plane, quadrant, x + a as i64 + 1, j, 2 * a + 1);
                            let b_right =
                                checked_read(&pair.prev, &view, plane, quadrant, x + a as i64, j, 2 * a + 1);
                            let x = x as usize;
                            write(&mut pair.curr, &next_view, plane, quadrant, x, 2 * j, a, av + b_left);
                            write(&mut pair.curr, &next_view, plane, quadrant, x, 2 * j + 1, a, av + b_right);
                        }
                    }
                }
            }
        }
        pair.swap();
        log::debug!("adrt pass {pass} end: sections={}, n={n}", next_view.sections);
        view = next_view;
    }
    Ok(())
}

fn copy_out<T: AdrtFloat>(prev: &[T], planes: usize, n: usize, sections: usize, output: &mut [T]) {
    let view = StrideView::for_pass(n, sections);
    let displacement = 2 * n - 1;
    for plane in 0..planes {
        for quadrant in 0..4 {
            for d in 0..displacement {
                for col in 0..n {
                    let j = col / view.angles_per_section;
                    let a = col % view.angles_per_section;
                    let idx = ((plane * 4 + quadrant) * displacement + d) * n + col;
                    output[idx] = read(prev, &view, plane, quadrant, d, j, a);
                }
            }
        }
    }
}
