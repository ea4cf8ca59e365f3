//! Shape and index arithmetic shared by every kernel.

/// Returns `ceil(log2(shape))` for `shape >= 2`, and `0` for `shape <= 1`.
///
/// Uses `leading_zeros` rather than a loop, the same trick the original C extension reaches
/// for via `__builtin_clz`/`_BitScanReverse` before falling back to a manual loop.
pub fn num_iters(shape: usize) -> u32 {
    if shape <= 1 {
        return 0;
    }
    usize::BITS - (shape - 1).leading_zeros()
}

/// True iff `v > 0` and `v` is a power of two.
pub const fn is_pow2(v: usize) -> bool {
    v > 0 && (v & (v - 1)) == 0
}

/// Integer halving, rounding down.
pub const fn floor_div2(v: usize) -> usize {
    v / 2
}

/// Integer halving, rounding up.
pub const fn ceil_div2(v: usize) -> usize {
    v / 2 + v % 2
}

/// Row-major (C-order) strides for a shape of rank `N`: the last axis has stride 1, and each
/// preceding axis's stride is the product of the trailing dimensions.
pub fn compute_strides<const N: usize>(shape: [usize; N]) -> [usize; N] {
    let mut strides = [0usize; N];
    let mut step = 1usize;
    for i in (0..N).rev() {
        strides[i] = step;
        step *= shape[i];
    }
    strides
}

/// Flattens a multi-index against precomputed strides. Bounds are not checked; callers are
/// expected to have validated `shape` up front (see [`crate::validate`]).
#[inline]
pub fn flatten<const N: usize>(strides: &[usize; N], index: [usize; N]) -> usize {
    let mut acc = 0usize;
    for i in 0..N {
        acc += strides[i] * index[i];
    }
    acc
}

/// The logical shape of an input image: `planes` batches of an `n x n` square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageShape {
    pub planes: usize,
    pub n: usize,
}

impl ImageShape {
    pub fn new(planes: usize, n: usize) -> Self {
        Self { planes, n }
    }

    /// Total element count, i.e. `planes * n * n`.
    pub fn len(&self) -> usize {
        self.planes * self.n * self.n
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The logical shape of an ADRT-layout tensor: `planes` batches of `4` quadrants, each
/// `(2n-1) x n`. Only `n` is stored; the displacement extent `2n - 1` is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdrtShape {
    pub planes: usize,
    pub n: usize,
}

impl AdrtShape {
    pub fn new(planes: usize, n: usize) -> Self {
        Self { planes, n }
    }

    /// The displacement axis extent, `2n - 1`.
    pub fn displacement(&self) -> usize {
        2 * self.n - 1
    }

    /// Total element count, i.e. `planes * 4 * (2n - 1) * n`.
    pub fn len(&self) -> usize {
        self.planes * 4 * self.displacement() * self.n
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_iters_matches_invariants() {
        assert_eq!(num_iters(0), 0);
        assert_eq!(num_iters(1), 0);
        assert_eq!(num_iters(2), 1);
        assert_eq!(num_iters(16), 4);
        assert_eq!(num_iters(17), 5);
        for k in 0..20u32 {
            assert_eq!(num_iters(1usize << k), k);
        }
    }

    #[test]
    fn pow2_detection() {
        assert!(!is_pow2(0));
        assert!(is_pow2(1));
        assert!(is_pow2(2));
        assert!(!is_pow2(3));
        assert!(is_pow2(1024));
        assert!(!is_pow2(1023));
    }

    #[test]
    fn div2_rounding() {
        assert_eq!(floor_div2(5), 2);
        assert_eq!(ceil_div2(5), 3);
        assert_eq!(floor_div2(4), 2);
        assert_eq!(ceil_div2(4), 2);
    }

    #[test]
    fn strides_are_row_major() {
        assert_eq!(compute_strides([4, 3, 2]), [6, 2, 1]);
        assert_eq!(compute_strides([2, 2, 2, 2]), [8, 4, 2, 1]);
    }

    #[test]
    fn adrt_shape_lengths() {
        let shape = AdrtShape::new(2, 8);
        assert_eq!(shape.displacement(), 15);
        assert_eq!(shape.len(), 2 * 4 * 15 * 8);
    }
}
