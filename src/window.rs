//! Fragment length window configuration.
//!
//! ## The Problem
//!
//! Corpus fragments need bounds on both ends:
//!
//! - Too short: a five-character fragment carries no trainable signal
//! - Too long: exceeds what downstream consumers will accept
//! - In between: usable
//!
//! Unlike a single "chunk size" knob, the window is asymmetric in effect.
//! The minimum is a *filter*: anything under it is dropped, accepting data
//! loss. The maximum is a *ceiling*: anything over it is re-split at phrase
//! boundaries or, failing that, sliced at fixed width.
//!
//! ```text
//! min = 30, max = 250
//!
//! len 12    -> dropped
//! len 30    -> kept (inclusive)
//! len 250   -> kept (inclusive)
//! len 400   -> phrase packing / fixed-width slicing
//! ```
//!
//! All lengths are counted in characters (Unicode scalar values), not bytes.
//! The texts this crate targets are CJK-heavy, where byte counts would be
//! roughly 3x the perceived length.

use crate::{Error, Result};

/// Inclusive character-length bounds for emitted fragments.
///
/// # Examples
///
/// ```rust
/// use splinters::LengthWindow;
///
/// let window = LengthWindow::new(30, 250)?;
/// assert_eq!(window.min(), 30);
/// assert_eq!(window.max(), 250);
/// assert!(window.accepts(30));
/// assert!(window.accepts(250));
/// assert!(!window.accepts(29));
/// assert!(!window.accepts(251));
/// # Ok::<(), splinters::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthWindow {
    min: usize,
    max: usize,
}

impl LengthWindow {
    /// Default minimum fragment length, in characters.
    pub const DEFAULT_MIN: usize = 30;

    /// Default maximum fragment length, in characters.
    pub const DEFAULT_MAX: usize = 250;

    /// Create a window with inclusive bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyWindow`] if either bound is zero, and
    /// [`Error::WindowMinExceedsMax`] if `min > max`. Both are fatal
    /// configuration errors; no records are processed under an invalid
    /// window.
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min == 0 || max == 0 {
            return Err(Error::EmptyWindow);
        }
        if min > max {
            return Err(Error::WindowMinExceedsMax { min, max });
        }
        Ok(Self { min, max })
    }

    /// The minimum fragment length, in characters.
    #[must_use]
    pub const fn min(&self) -> usize {
        self.min
    }

    /// The maximum fragment length, in characters.
    #[must_use]
    pub const fn max(&self) -> usize {
        self.max
    }

    /// Whether a fragment of `len` characters falls inside the window.
    #[must_use]
    pub const fn accepts(&self, len: usize) -> bool {
        self.min <= len && len <= self.max
    }

    /// Whether `len` falls short of the minimum.
    #[must_use]
    pub const fn below(&self, len: usize) -> bool {
        len < self.min
    }

    /// Whether `len` exceeds the maximum.
    #[must_use]
    pub const fn above(&self, len: usize) -> bool {
        len > self.max
    }
}

impl Default for LengthWindow {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}
