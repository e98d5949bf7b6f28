//! Whole-frame escape counts, computed off the streaming path.

use fnv::FnvHashMap;
use log::trace;
use rayon::prelude::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};

use crate::{backend::ComplexBackend, escape::escape_time, view::View};

/// Escape count of every pixel of `view`, in the order a render streams them.
///
/// Rows are independent, so the work is spread across the rayon pool.
pub fn escape_grid<B: ComplexBackend + Sync + ?Sized>(backend: &B, view: &View) -> Vec<u32> {
    trace!("begin escape_grid");

    let width = view.window.width as usize;
    let max_iterations = view.max_iterations();
    let mut counts = vec![0; view.window.pixel_count()];
    counts
        .par_iter_mut()
        .enumerate()
        .for_each(|(index, count)| {
            let column = (index % width) as u16;
            let row = (index / width) as u16;
            *count = escape_time(backend, view.point(column, row), max_iterations);
        });

    trace!("end escape_grid");
    counts
}

/// How many pixels escaped at each iteration count.
#[derive(Debug, Default)]
pub struct IterationHistogram {
    max_iterations: u32,
    buckets: FnvHashMap<u32, usize>,
    total: usize,
}

impl IterationHistogram {
    pub fn new(max_iterations: u32, counts: &[u32]) -> Self {
        let mut buckets: FnvHashMap<u32, usize> = FnvHashMap::default();
        for &count in counts {
            debug_assert!(count <= max_iterations);
            *buckets.entry(count).or_insert(0) += 1;
        }
        Self {
            max_iterations,
            buckets,
            total: counts.len(),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, iterations: u32) -> usize {
        self.buckets.get(&iterations).copied().unwrap_or(0)
    }

    /// Pixels that never escaped.
    pub fn interior(&self) -> usize {
        self.count(self.max_iterations)
    }

    pub fn escaped(&self) -> usize {
        self.total - self.interior()
    }

    /// Non-empty buckets in ascending iteration order.
    pub fn buckets(&self) -> Vec<(u32, usize)> {
        let mut buckets: Vec<(u32, usize)> = self.buckets.iter().map(|(&k, &v)| (k, v)).collect();
        buckets.sort();
        buckets
    }
}
