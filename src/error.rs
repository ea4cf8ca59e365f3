/// Errors returned by the ADRT, IADRT, BDRT, and interpolation entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input element type is not a supported floating-point type.
    ///
    /// The kernels in this crate are generic over [`crate::AdrtFloat`], so this variant can
    /// only be constructed by code at a prospective FFI/binding boundary that dispatches on a
    /// runtime type tag before calling into the generic kernels.
    #[error("unsupported element type: {found}")]
    Type {
        /// Human-readable name of the unsupported type.
        found: &'static str,
    },

    /// A shape invariant was violated: wrong rank, a non-power-of-two side, a displacement
    /// axis not equal to `2N - 1`, a zero-sized axis, a slice/shape length mismatch, or
    /// overflow while computing a buffer size from a shape.
    #[error("invalid shape: {reason}")]
    Shape {
        /// Description of which invariant failed.
        reason: String,
    },

    /// `iter_start`/`iter_end` fell outside `[0, num_iters(n))`, or `iter_start > iter_end`.
    #[error("iteration range [{start}, {end}] is invalid for num_iters = {num_iters}")]
    IterationBounds {
        /// Requested (already sign-resolved) start pass index.
        start: i64,
        /// Requested (already sign-resolved) end pass index.
        end: i64,
        /// `num_iters(n)` for the relevant side length.
        num_iters: u32,
    },

    /// Scratch or output allocation failed.
    #[error("allocation of {requested} elements failed")]
    OutOfMemory {
        /// Number of scalar elements that could not be allocated.
        requested: usize,
    },
}
