//! A `rayon`-or-sequential abstraction over the per-plane loop in each kernel.
//!
//! Mirrors the dual `#[cfg(feature = "parallel")]` / `#[cfg(not(feature = "parallel"))]`
//! trait-impl pattern used by `plonky2_maybe_rayon`: the same call site compiles to either a
//! `rayon` parallel iterator or a plain sequential one depending on the `parallel` feature, with
//! no `dyn` dispatch or runtime branch either way.

#[cfg(feature = "parallel")]
pub use rayon::iter::{IndexedParallelIterator, ParallelIterator};

/// Iterates `items` one plane at a time, in parallel when the `parallel` feature is enabled.
#[cfg(feature = "parallel")]
pub fn for_each_plane<T, F>(items: &mut [T], f: F)
where
    T: Send,
    F: Fn(&mut T) + Send + Sync,
{
    use rayon::iter::IntoParallelIterator;
    items.into_par_iter().for_each(|item| f(item));
}

/// Sequential fallback used when the `parallel` feature is disabled.
#[cfg(not(feature = "parallel"))]
pub fn for_each_plane<T, F>(items: &mut [T], f: F)
where
    F: Fn(&mut T),
{
    for item in items.iter_mut() {
        f(item);
    }
}

/// Splits `buf` into `planes` equal chunks and runs `f` over each, in parallel when the
/// `parallel` feature is enabled.
#[cfg(feature = "parallel")]
pub fn for_each_plane_chunk<T, F>(buf: &mut [T], plane_len: usize, f: F)
where
    T: Send,
    F: Fn(&mut [T]) + Send + Sync,
{
    use rayon::slice::ParallelSliceMut;
    buf.par_chunks_mut(plane_len).for_each(|chunk| f(chunk));
}

#[cfg(not(feature = "parallel"))]
pub fn for_each_plane_chunk<T, F>(buf: &mut [T], plane_len: usize, f: F)
where
    F: Fn(&mut [T]),
{
    for chunk in buf.chunks_mut(plane_len) {
        f(chunk);
    }
}

/// Like [`for_each_plane_chunk`], but `f` also receives the plane index, for kernels that need
/// to cross-reference another buffer (e.g. a read-only input) at the same plane offset.
#[cfg(feature = "parallel")]
pub fn for_each_plane_chunk_indexed<T, F>(buf: &mut [T], plane_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    use rayon::slice::ParallelSliceMut;
    buf.par_chunks_mut(plane_len)
        .enumerate()
        .for_each(|(plane, chunk)| f(plane, chunk));
}

#[cfg(not(feature = "parallel"))]
pub fn for_each_plane_chunk_indexed<T, F>(buf: &mut [T], plane_len: usize, f: F)
where
    F: Fn(usize, &mut [T]),
{
    for (plane, chunk) in buf.chunks_mut(plane_len).enumerate() {
        f(plane, chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_each_plane_chunk_visits_every_plane() {
        let mut buf = vec![0i32; 12];
        for_each_plane_chunk(&mut buf, 4, |chunk| {
            chunk[0] = 1;
        });
        assert_eq!(buf, vec![1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0]);
    }
}
