use num_traits::{Float, FloatConst, FromPrimitive, NumAssign};

/// Floating-point types usable as the ADRT's scalar element type.
///
/// Implemented for `f32` and `f64`; no other type satisfies the bound, which plays the
/// role the host binding layer's dtype dispatch (`NPY_FLOAT32`/`NPY_FLOAT64`) plays in the
/// original C extension, but resolved at compile time instead of at a runtime `match`.
pub trait AdrtFloat:
    Float + FloatConst + FromPrimitive + NumAssign + Default + Clone + Send + Sync + 'static
{
}

impl<T> AdrtFloat for T where
    T: Float + FloatConst + FromPrimitive + NumAssign + Default + Clone + Send + Sync + 'static
{
}

/// Precision-correct constants used by [`crate::interp::interp_adrtcart`].
pub(crate) trait AdrtConstants: AdrtFloat {
    fn pi() -> Self {
        Self::PI()
    }

    fn pi_2() -> Self {
        Self::FRAC_PI_2()
    }

    fn pi_4() -> Self {
        Self::FRAC_PI_4()
    }

    fn sqrt2() -> Self {
        Self::SQRT_2()
    }

    fn sqrt2_2() -> Self {
        Self::from_f64(core::f64::consts::FRAC_1_SQRT_2).unwrap()
    }
}

impl<T: AdrtFloat> AdrtConstants for T {}
