//! Rayon thread pool sizing for the design-speed sweep.

use rayon::ThreadPoolBuilder;

use crate::error::{Error, Result};

/// How many worker threads evaluate design candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerPool {
    /// Number of worker threads. 0 uses the global Rayon pool (all cores).
    pub workers: usize,
}

impl WorkerPool {
    pub fn with_workers(workers: usize) -> Self {
        Self { workers }
    }

    /// Run `f` on a pool of [`workers`](WorkerPool::workers) threads, or on
    /// the global pool when `workers` is 0.
    ///
    /// # Errors
    /// Returns [`Error::WorkerPool`] when the dedicated pool cannot be built.
    pub fn install<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            return Ok(f());
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|err| Error::WorkerPool {
                message: err.to_string(),
            })?;
        Ok(pool.install(f))
    }
}

#[cfg(test)]
mod tests {
    use rayon::prelude::*;

    use super::*;

    #[test]
    fn dedicated_pool_runs_with_requested_threads() {
        let threads = WorkerPool::with_workers(2)
            .install(rayon::current_num_threads)
            .expect("pool builds");
        assert_eq!(threads, 2);
    }

    #[test]
    fn global_pool_keeps_order() {
        let squares: Vec<u64> = WorkerPool::default()
            .install(|| (0..100u64).into_par_iter().map(|x| x * x).collect())
            .expect("global pool");
        assert_eq!(squares[9], 81);
        assert_eq!(squares.len(), 100);
    }
}
