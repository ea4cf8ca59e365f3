//! Approximate Discrete Radon Transform (ADRT), its inverse (IADRT), and its adjoint
//! back-projection (BDRT).
//!
//! All three kernels share the same multi-pass butterfly skeleton: `log2(N)` passes over a
//! ping-ponged scratch buffer, differing only in whether a pass combines by addition
//! (forward), subtraction plus a cumulative sum (inverse), or scatter-accumulation (adjoint).

mod adrt;
mod bdrt;
mod buffer;
mod error;
mod float;
mod iadrt;
mod interp;
mod iter_range;
mod parallel;
mod shape;
mod validate;

pub use crate::adrt::{adrt, adrt_into, adrt_resume};
pub use crate::bdrt::{bdrt, bdrt_into};
pub use crate::error::Error;
pub use crate::float::AdrtFloat;
pub use crate::iadrt::{iadrt, iadrt_into};
pub use crate::interp::interp_adrtcart;
pub use crate::iter_range::IterRange;
pub use crate::shape::{num_iters, AdrtShape, ImageShape};
