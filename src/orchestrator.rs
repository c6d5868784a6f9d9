//! Batch sequencing and the end-to-end pipeline.
//!
//! The orchestrator is the memory-bounding layer: a record set too large to
//! fan out in one go is walked in fixed-size batches, each batch handed to
//! the worker pool, each batch's output concatenated in batch order. Batches
//! never run concurrently with each other; parallelism lives inside a batch.
//!
//! `original_index` is scoped to a record's own batch, not the whole run.
//! Callers that need a globally unique key must combine the batch number
//! with `original_index`.

use crate::{
    BatchWorkerPool, Error, FragmentRecord, LengthWindow, Record, RecordFragmenter, RecordSource,
    Result, ResultSink,
};

/// Pipeline configuration.
///
/// Defaults: window 30..=250 characters, text field `"text"`, 100 000
/// records per batch, one worker per available core minus one.
///
/// ```rust
/// use splinters::{LengthWindow, PipelineConfig};
///
/// let config = PipelineConfig {
///     window: LengthWindow::new(10, 120)?,
///     batch_size: 5_000,
///     ..PipelineConfig::default()
/// };
/// assert_eq!(config.text_field, "text");
/// # Ok::<(), splinters::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Fragment length bounds, in characters.
    pub window: LengthWindow,
    /// Record field the source text is read from.
    pub text_field: String,
    /// Records per batch. Each batch is held in memory in full.
    pub batch_size: usize,
    /// Worker threads per batch.
    pub worker_count: usize,
}

impl PipelineConfig {
    /// Worker count when none is configured: available cores minus one,
    /// never less than one.
    #[must_use]
    pub fn default_worker_count() -> usize {
        num_cpus::get().saturating_sub(1).max(1)
    }

    fn validate(&self) -> Result<()> {
        // The window validated itself at construction.
        if self.batch_size == 0 {
            return Err(Error::ZeroBatchSize);
        }
        if self.worker_count == 0 {
            return Err(Error::ZeroWorkers);
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window: LengthWindow::default(),
            text_field: "text".to_owned(),
            batch_size: 100_000,
            worker_count: Self::default_worker_count(),
        }
    }
}

/// Drives a full record set through batched parallel fragmentation.
///
/// ## Example
///
/// ```rust
/// use splinters::{BatchOrchestrator, LengthWindow, PipelineConfig, Record};
/// use serde_json::Value;
///
/// let orchestrator = BatchOrchestrator::new(PipelineConfig {
///     window: LengthWindow::new(5, 250)?,
///     worker_count: 2,
///     ..PipelineConfig::default()
/// })?;
///
/// let mut record = Record::new();
/// record.insert("text".into(), Value::from("今天天氣很好。我們出去玩。"));
///
/// let fragments = orchestrator.run(&[record]);
/// assert_eq!(fragments.len(), 2);
/// # Ok::<(), splinters::Error>(())
/// ```
#[derive(Debug)]
pub struct BatchOrchestrator {
    batch_size: usize,
    pool: BatchWorkerPool<RecordFragmenter>,
}

impl BatchOrchestrator {
    /// Validate the configuration and build the worker pool.
    ///
    /// # Errors
    ///
    /// All configuration problems surface here, before any record is
    /// touched: zero batch size, zero workers, or a thread pool that cannot
    /// be built. An invalid window cannot reach this point because
    /// [`LengthWindow::new`] already rejected it.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let fragmenter = RecordFragmenter::new(config.window, config.text_field);
        let pool = BatchWorkerPool::new(fragmenter, config.worker_count)?;
        Ok(Self {
            batch_size: config.batch_size,
            pool,
        })
    }

    /// Fragment an in-memory record set, batch by batch.
    ///
    /// Batches run strictly one after another; batch N's fragments precede
    /// batch N+1's in the result. Within each batch, ordering follows the
    /// worker pool's per-record guarantee.
    #[must_use]
    pub fn run(&self, records: &[Record]) -> Vec<FragmentRecord> {
        let mut fragments = Vec::new();
        for (batch_number, batch) in records.chunks(self.batch_size).enumerate() {
            log::info!("batch {batch_number}: {} records", batch.len());
            let batch_fragments = self.pool.process_batch(batch);
            log::info!(
                "batch {batch_number}: {} fragments",
                batch_fragments.len()
            );
            fragments.extend(batch_fragments);
        }
        fragments
    }

    /// Drain a source, fragment everything, hand the result to a sink.
    ///
    /// Returns the number of fragment records written. Source and sink
    /// failures propagate unchanged; they are the only errors the run loop
    /// itself can produce.
    pub fn run_pipeline<S, K>(&self, source: &mut S, sink: &mut K) -> Result<usize>
    where
        S: RecordSource,
        K: ResultSink,
    {
        let records = source.iterate()?;
        let fragments = self.run(&records);
        let written = fragments.len();
        sink.write(fragments)?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn record_with_text(text: &str) -> Record {
        let mut record = Record::new();
        record.insert("text".to_owned(), Value::from(text));
        record
    }

    fn config(min: usize, max: usize, batch_size: usize) -> PipelineConfig {
        PipelineConfig {
            window: LengthWindow::new(min, max).unwrap(),
            batch_size,
            worker_count: 2,
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_zero_batch_size_is_fatal() {
        let err = BatchOrchestrator::new(config(5, 250, 0)).unwrap_err();
        assert!(matches!(err, Error::ZeroBatchSize));
    }

    #[test]
    fn test_zero_workers_is_fatal() {
        let mut config = config(5, 250, 10);
        config.worker_count = 0;
        assert!(matches!(
            BatchOrchestrator::new(config),
            Err(Error::ZeroWorkers)
        ));
    }

    #[test]
    fn test_batches_concatenate_in_order() {
        // 5 records, batch size 2: batches of 2, 2, 1.
        let records: Vec<Record> = (0..5)
            .map(|i| record_with_text(&format!("第{i}批次測試句子。")))
            .collect();
        let orchestrator = BatchOrchestrator::new(config(5, 250, 2)).unwrap();
        let fragments = orchestrator.run(&records);

        assert_eq!(fragments.len(), 5);
        // original_index restarts inside each batch
        let indices: Vec<usize> = fragments.iter().map(|f| f.meta.original_index).collect();
        assert_eq!(indices, [0, 1, 0, 1, 0]);
        // but the text confirms global batch order survived
        for (i, fragment) in fragments.iter().enumerate() {
            assert_eq!(
                fragment.fields["text"],
                Value::from(format!("第{i}批次測試句子。"))
            );
        }
    }

    #[test]
    fn test_empty_record_set() {
        let orchestrator = BatchOrchestrator::new(config(5, 250, 10)).unwrap();
        assert!(orchestrator.run(&[]).is_empty());
    }

    #[test]
    fn test_default_worker_count_is_positive() {
        assert!(PipelineConfig::default_worker_count() >= 1);
    }
}
