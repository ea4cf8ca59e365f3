//! Shape validation for the three kernels' input/output tensors.
use crate::error::Error;
use crate::shape::{is_pow2, AdrtShape, ImageShape};

/// Validates a square, power-of-two image shape and checks `input` matches it exactly in
/// length. Used by ADRT at `iter_start == 0`.
pub fn square_power_of_two<T>(input: &[T], shape: ImageShape) -> Result<(), Error> {
    if shape.planes == 0 {
        return shape_error(format!(
            "image shape has zero planes: {:?}",
            shape
        ));
    }
    if !is_pow2(shape.n) {
        return shape_error(format!(
            "image side {} is not a positive power of two",
            shape.n
        ));
    }
    if input.len() != shape.len() {
        return shape_error(format!(
            "input length {} does not match shape {:?} (expected {})",
            input.len(),
            shape,
            shape.len()
        ));
    }
    Ok(())
}

/// Validates an ADRT-layout shape (`planes, 4, 2n-1, n`) and checks `input` matches it
/// exactly in length. Used by IADRT, BDRT, and by ADRT when resuming a partial pass range.
pub fn adrt_layout<T>(input: &[T], shape: AdrtShape) -> Result<(), Error> {
    if shape.planes == 0 {
        return shape_error(format!("ADRT shape has zero planes: {:?}", shape));
    }
    if !is_pow2(shape.n) {
        return shape_error(format!(
            "ADRT angle extent {} is not a positive power of two",
            shape.n
        ));
    }
    if input.len() != shape.len() {
        return shape_error(format!(
            "input length {} does not match ADRT shape {:?} (expected {})",
            input.len(),
            shape,
            shape.len()
        ));
    }
    Ok(())
}

fn shape_error(reason: String) -> Result<(), Error> {
    log::warn!("shape validation failed: {reason}");
    Err(Error::Shape { reason })
}

/// Computes `planes * 4 * (2n) * n`, the scratch buffer capacity, checked for overflow.
pub fn checked_scratch_len(planes: usize, n: usize) -> Result<usize, Error> {
    planes
        .checked_mul(4)
        .and_then(|v| v.checked_mul(2 * n))
        .and_then(|v| v.checked_mul(n))
        .ok_or_else(|| {
            let reason = format!(
                "scratch size overflow for planes={planes}, n={n}"
            );
            log::warn!("{reason}");
            Error::Shape { reason }
        })
}
