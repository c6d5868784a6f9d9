//! Intra-batch worker fan-out.
//!
//! One batch of records, one bounded rayon pool, one fragmenter shared
//! read-only across workers. The fan-in problem is ordering: workers finish
//! in whatever order the scheduler likes, but output must group by
//! `original_index` reproducibly.
//!
//! Rather than collecting completions through a channel and re-sorting, the
//! pool maps over an indexed parallel iterator and collects per-record
//! vectors; rayon's indexed `collect` writes each result into its input
//! slot, so the fan-in is ordered by construction. The flatten step is then
//! sequential and cheap.
//!
//! ```text
//! records:   [r0, r1, r2, r3]
//!              |   |   |   |      (workers, any completion order)
//! per-record: [f0..] [f1..] [f2..] [f3..]
//!              \___________________/
//!       flatten, r0's fragments first, never interleaved
//! ```
//!
//! A worker that panics poisons nothing: the panic is caught per record,
//! logged, and that record contributes zero fragments.

use std::panic::{catch_unwind, AssertUnwindSafe};

use rayon::prelude::*;

use crate::{FragmentRecord, Fragmenter, Record, Result};

/// Bounded worker pool that fragments one batch of records at a time.
///
/// Generic over [`Fragmenter`] so tests can substitute hostile
/// implementations; production use is
/// `BatchWorkerPool<RecordFragmenter>`.
#[derive(Debug)]
pub struct BatchWorkerPool<F> {
    fragmenter: F,
    threads: rayon::ThreadPool,
}

impl<F: Fragmenter> BatchWorkerPool<F> {
    /// Build a pool with `worker_count` threads.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroWorkers`](crate::Error::ZeroWorkers) for a zero count,
    /// [`Error::ThreadPool`](crate::Error::ThreadPool) if the thread pool
    /// cannot be constructed.
    pub fn new(fragmenter: F, worker_count: usize) -> Result<Self> {
        if worker_count == 0 {
            return Err(crate::Error::ZeroWorkers);
        }
        let threads = rayon::ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .thread_name(|i| format!("splinters-worker-{i}"))
            .build()?;
        Ok(Self {
            fragmenter,
            threads,
        })
    }

    /// The fragmenter driving this pool.
    pub fn fragmenter(&self) -> &F {
        &self.fragmenter
    }

    /// Fragment every record of one batch in parallel.
    ///
    /// Output is ordered by the records' positions in `records` regardless
    /// of worker completion order, and one record's fragments are never
    /// interleaved with another's. `original_index` in the output equals the
    /// record's position in this slice.
    ///
    /// A record whose worker panics yields zero fragments and a warning log;
    /// the rest of the batch is unaffected.
    pub fn process_batch(&self, records: &[Record]) -> Vec<FragmentRecord> {
        let per_record: Vec<Vec<FragmentRecord>> = self.threads.install(|| {
            records
                .par_iter()
                .enumerate()
                .map(|(original_index, record)| {
                    catch_unwind(AssertUnwindSafe(|| {
                        self.fragmenter.fragment_record(original_index, record)
                    }))
                    .unwrap_or_else(|_| {
                        log::warn!(
                            "record {original_index}: fragmentation panicked, \
                             record contributes no fragments"
                        );
                        Vec::new()
                    })
                })
                .collect()
        });
        per_record.into_iter().flatten().collect()
    }
}
