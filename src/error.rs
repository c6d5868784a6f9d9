//! Error types for splinters.

/// Errors that can occur while configuring or running the pipeline.
///
/// Per-record problems (missing text field, a panicking worker) never appear
/// here: they degrade to zero fragments for that record. Only configuration
/// mistakes and boundary I/O reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Length window bounds must both be > 0.
    #[error("length window bounds must be > 0")]
    EmptyWindow,

    /// Minimum fragment length exceeds the maximum.
    #[error("length window minimum ({min}) exceeds maximum ({max})")]
    WindowMinExceedsMax {
        /// The minimum that was too large.
        min: usize,
        /// The maximum it exceeded.
        max: usize,
    },

    /// Batch size must be > 0.
    #[error("batch size must be > 0")]
    ZeroBatchSize,

    /// Worker count must be > 0.
    #[error("worker count must be > 0")]
    ZeroWorkers,

    /// The rayon thread pool could not be built.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A `RecordSource` failed to produce records.
    #[error("record source error: {0}")]
    Source(Box<dyn std::error::Error + Send + Sync>),

    /// A `ResultSink` failed to accept fragment records.
    #[error("result sink error: {0}")]
    Sink(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap a source-side failure.
    pub fn source(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Source(Box::new(err))
    }

    /// Wrap a sink-side failure.
    pub fn sink(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Sink(Box::new(err))
    }
}

/// Result type for splinters operations.
pub type Result<T> = std::result::Result<T, Error>;
