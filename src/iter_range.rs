//! The resolved `[iter_start, iter_end]` pass range, and the signed-index convention the
//! original binding layer used at its boundary.
use crate::error::Error;

/// A resolved, inclusive range of pass indices `[start, end]`, both in `[0, num_iters)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterRange {
    pub start: u32,
    pub end: u32,
}

impl IterRange {
    /// The full range `[0, num_iters - 1]` (or the degenerate `[0, 0]` when `num_iters == 0`,
    /// i.e. `n <= 1`).
    pub fn full(num_iters: u32) -> Self {
        Self {
            start: 0,
            end: num_iters.saturating_sub(1),
        }
    }

    /// Constructs and validates an explicit range.
    pub fn new(start: u32, end: u32, num_iters: u32) -> Result<Self, Error> {
        Self::check(start as i64, end as i64, num_iters)?;
        Ok(Self { start, end })
    }

    /// Resolves negative-from-the-end indices the way the original Python-facing layer did,
    /// then validates the result. `-1` is the last valid pass index.
    pub fn from_signed(start: i64, end: i64, num_iters: u32) -> Result<Self, Error> {
        let resolve = |v: i64| -> i64 {
            if v < 0 {
                v + num_iters as i64
            } else {
                v
            }
        };
        let (start, end) = (resolve(start), resolve(end));
        Self::check(start, end, num_iters)?;
        Ok(Self {
            start: start as u32,
            end: end as u32,
        })
    }

    fn check(start: i64, end: i64, num_iters: u32) -> Result<(), Error> {
        let upper = num_iters as i64;
        let valid = start >= 0 && end >= 0 && start < upper.max(1) && end < upper.max(1) && start <= end;
        if !valid {
            log::warn!(
                "iteration range [{start}, {end}] invalid for num_iters = {num_iters}"
            );
            return Err(Error::IterationBounds {
                start,
                end,
                num_iters,
            });
        }
        Ok(())
    }

    /// Number of passes this range covers, inclusive.
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
