//! # splinters
//!
//! Length-bounded sentence fragmentation for training-corpus construction.
//!
//! ## The Problem
//!
//! Corpus preparation starts with long free-form text records and ends with
//! fragments a downstream consumer will accept: short enough to fit a length
//! budget, long enough to carry meaning, and traceable back to where in the
//! source they came from. Cutting at a fixed width is easy but produces
//! garbage at the edges; cutting only at sentence boundaries respects
//! meaning but ignores the budget. Real sentences are routinely 400+
//! characters in the corpora this crate targets.
//!
//! splinters does both, in two stages:
//!
//! ```text
//! text ── sentence split ──> sentences (。！？；…)
//!              │
//!              ├─ len < min          dropped
//!              ├─ min <= len <= max  emitted as-is
//!              └─ len > max ──> phrase split (，、：；)
//!                                   │
//!                                   ├─ greedy merge into <= max fragments
//!                                   └─ else: fixed-width slices of max chars
//! ```
//!
//! Around that core sits a record pipeline: each input [`Record`] (an open
//! field map) has its text field fragmented, every other field copied
//! through verbatim, and provenance metadata appended — which record, which
//! fragment, which character span. Large record sets run through a
//! [`BatchOrchestrator`]: sequential fixed-size batches, parallel workers
//! inside each batch, output order independent of worker completion order.
//!
//! ## Quick Start
//!
//! ```rust
//! use splinters::{BatchOrchestrator, LengthWindow, PipelineConfig, Record};
//! use serde_json::Value;
//!
//! let orchestrator = BatchOrchestrator::new(PipelineConfig {
//!     window: LengthWindow::new(5, 250)?,
//!     worker_count: 2,
//!     ..PipelineConfig::default()
//! })?;
//!
//! let mut record = Record::new();
//! record.insert("doc_id".into(), Value::from(42));
//! record.insert("text".into(), Value::from("今天天氣很好。我們出去玩。"));
//!
//! let fragments = orchestrator.run(&[record]);
//!
//! assert_eq!(fragments.len(), 2);
//! assert_eq!(fragments[0].fields["text"], Value::from("今天天氣很好。"));
//! assert_eq!(fragments[0].fields["doc_id"], Value::from(42));
//! assert_eq!(fragments[1].meta.fragment_start, 7);
//! # Ok::<(), splinters::Error>(())
//! ```
//!
//! ## What This Is Not
//!
//! The delimiter sets are fixed punctuation, not a sentence-boundary model;
//! there is no language detection, no deduplication, and no streaming mode.
//! Tabular I/O stays outside the crate behind [`RecordSource`] and
//! [`ResultSink`].
//!
//! ## Guarantees
//!
//! - Every emitted fragment is `min..=max` characters long.
//! - Fragment order follows source order: sentences first, phrases within.
//! - Output grouping by `original_index` is stable across runs regardless
//!   of worker scheduling.
//! - One record's failure (even a panic) costs only that record's output.

mod error;
mod fragmenter;
mod orchestrator;
mod pool;
mod record;
mod segmenter;
mod window;

pub use error::{Error, Result};
pub use fragmenter::RecordFragmenter;
pub use orchestrator::{BatchOrchestrator, PipelineConfig};
pub use pool::BatchWorkerPool;
pub use record::{FragmentMeta, FragmentRecord, Record, SOURCE_TYPE};
pub use segmenter::{Segmenter, PHRASE_DELIMITERS, SENTENCE_DELIMITERS};
pub use window::LengthWindow;

/// A record-fragmentation strategy.
///
/// The production implementation is [`RecordFragmenter`]; the trait exists
/// so the worker pool can be exercised against arbitrary implementations:
///
/// ```rust
/// use splinters::{BatchWorkerPool, Fragmenter, FragmentRecord, Record};
///
/// struct Null;
/// impl Fragmenter for Null {
///     fn fragment_record(&self, _: usize, _: &Record) -> Vec<FragmentRecord> {
///         Vec::new()
///     }
/// }
///
/// let pool = BatchWorkerPool::new(Null, 2)?;
/// assert!(pool.process_batch(&[Record::new()]).is_empty());
/// # Ok::<(), splinters::Error>(())
/// ```
pub trait Fragmenter: Send + Sync {
    /// Fragment one record, identified by its position within its batch.
    ///
    /// Must be a pure function of its arguments: the worker pool calls it
    /// from multiple threads and relies on per-record independence.
    fn fragment_record(&self, original_index: usize, record: &Record) -> Vec<FragmentRecord>;
}

/// Yields the records to fragment.
///
/// Stands in for whatever persisted tabular store the deployment reads
/// from. Failures propagate out of the pipeline unchanged, wrapped in
/// [`Error::Source`].
pub trait RecordSource {
    /// Produce the full, finite record sequence.
    fn iterate(&mut self) -> Result<Vec<Record>>;
}

/// Accepts the final flat fragment sequence.
///
/// Failures propagate out of the pipeline unchanged, wrapped in
/// [`Error::Sink`].
pub trait ResultSink {
    /// Persist the fragments.
    fn write(&mut self, fragments: Vec<FragmentRecord>) -> Result<()>;
}
