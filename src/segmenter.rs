//! Two-stage text segmentation.
//!
//! ## How It Works
//!
//! Stage one cuts the text into sentences at sentence-final punctuation.
//! Stage two forces each sentence into the length window:
//!
//! ```text
//! sentence len < min          -> dropped
//! min <= len <= max           -> emitted as-is
//! len > max                   -> phrase packing:
//!
//!   split at 、，：； into phrases of >= min chars
//!   greedily merge phrases while the running total stays <= max
//!   if nothing qualifies, slice the sentence into max-char windows
//! ```
//!
//! The delimiter sets are fixed CJK punctuation, not a linguistic tokenizer:
//!
//! - sentence-final: `。 ！ ？ ； …`
//! - phrase-level:   `， 、 ： ；`
//!
//! "Dr. Smith went to Washington D.C." stays one sentence here only because
//! ASCII periods are not in the set. This is a deliberate trade: the corpora
//! this crate targets are Chinese, where the delimiter heuristic is reliable
//! and a full boundary model would be wasted cost.
//!
//! ## Lossiness
//!
//! The greedy merge discards an accumulated run that cannot be emitted when
//! the next phrase would overflow the window. That loses text. It is kept
//! that way on purpose: changing it changes fragment counts, and downstream
//! reproducibility depends on them.
//!
//! All lengths are characters, not bytes. See [`LengthWindow`].

use crate::LengthWindow;

/// Characters that close a sentence.
pub const SENTENCE_DELIMITERS: [char; 5] = ['。', '！', '？', '；', '…'];

/// Characters that close a phrase inside an over-long sentence.
pub const PHRASE_DELIMITERS: [char; 4] = ['，', '、', '：', '；'];

/// Splits one text into length-bounded fragments.
///
/// Pure and deterministic: no I/O, no shared state, same input always yields
/// the same output.
///
/// ## Example
///
/// ```rust
/// use splinters::{LengthWindow, Segmenter};
///
/// let segmenter = Segmenter::new(LengthWindow::new(5, 250)?);
/// let fragments = segmenter.segment("今天天氣很好。我們出去玩。");
///
/// assert_eq!(fragments, ["今天天氣很好。", "我們出去玩。"]);
/// # Ok::<(), splinters::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Segmenter {
    window: LengthWindow,
}

impl Segmenter {
    /// Create a segmenter for the given length window.
    #[must_use]
    pub fn new(window: LengthWindow) -> Self {
        Self { window }
    }

    /// The configured length window.
    #[must_use]
    pub fn window(&self) -> &LengthWindow {
        &self.window
    }

    /// Split `text` into fragments inside the length window.
    ///
    /// Fragments come back in source order: sentence order first, and within
    /// a packed sentence, phrase order. Sentences shorter than the minimum
    /// are dropped entirely.
    #[must_use]
    pub fn segment(&self, text: &str) -> Vec<String> {
        let mut fragments = Vec::new();
        for sentence in split_sentences(text) {
            let len = char_len(&sentence);
            if self.window.below(len) {
                continue;
            }
            if !self.window.above(len) {
                fragments.push(sentence);
                continue;
            }
            let packed = self.merge_phrases(self.split_phrases(&sentence));
            if packed.is_empty() {
                // No phrase qualified anywhere in the sentence. Last resort:
                // fixed-width windows, undersized tail dropped.
                fragments.extend(self.slice_fixed(&sentence));
            } else {
                fragments.extend(packed);
            }
        }
        fragments
    }

    /// Cut an over-long sentence into phrases of at least `min` characters.
    ///
    /// A phrase buffer closes at a phrase delimiter only once it has reached
    /// the minimum length; until then the delimiter is swallowed and the
    /// buffer keeps growing. The trailing buffer closes under the same rule.
    fn split_phrases(&self, sentence: &str) -> Vec<String> {
        let mut phrases = Vec::new();
        let mut current = String::new();
        for ch in sentence.chars() {
            current.push(ch);
            if PHRASE_DELIMITERS.contains(&ch) {
                let trimmed = current.trim();
                if !trimmed.is_empty() && char_len(trimmed) >= self.window.min() {
                    phrases.push(trimmed.to_owned());
                    current.clear();
                }
            }
        }
        let trimmed = current.trim();
        if !trimmed.is_empty() && char_len(trimmed) >= self.window.min() {
            phrases.push(trimmed.to_owned());
        }
        phrases
    }

    /// Greedily pack phrases into fragments no longer than `max`.
    ///
    /// An accumulator is emitted only while it fits the window. When the next
    /// phrase would overflow an accumulator that does not qualify (still
    /// under the minimum, or itself over the maximum), the accumulator is
    /// discarded and the phrase starts a fresh one. One pass, no backtracking.
    fn merge_phrases(&self, phrases: Vec<String>) -> Vec<String> {
        let mut merged = Vec::new();
        let mut acc = String::new();
        let mut acc_len = 0usize;
        for phrase in phrases {
            let phrase_len = char_len(&phrase);
            if acc_len + phrase_len <= self.window.max() {
                acc.push_str(&phrase);
                acc_len += phrase_len;
            } else {
                if self.window.accepts(acc_len) {
                    merged.push(std::mem::take(&mut acc));
                } else {
                    acc.clear();
                }
                acc = phrase;
                acc_len = phrase_len;
            }
        }
        if self.window.accepts(acc_len) {
            merged.push(acc);
        }
        merged
    }

    /// Slice a sentence into consecutive windows of exactly `max` characters
    /// (last window shorter), keeping only slices that reach the minimum.
    fn slice_fixed(&self, sentence: &str) -> Vec<String> {
        let chars: Vec<char> = sentence.chars().collect();
        chars
            .chunks(self.window.max())
            .filter(|slice| slice.len() >= self.window.min())
            .map(|slice| slice.iter().collect())
            .collect()
    }
}

/// Cut text into trimmed sentences at sentence-final delimiters.
///
/// The delimiter stays attached to its sentence. A non-empty trailing buffer
/// with no closing delimiter still counts as a sentence.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        current.push(ch);
        if SENTENCE_DELIMITERS.contains(&ch) {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_owned());
            }
            current.clear();
        }
    }
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_owned());
    }
    sentences
}

/// Character count, as opposed to `str::len`'s byte count.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
