//! Per-record fragmentation.
//!
//! [`RecordFragmenter`] applies the [`Segmenter`] to one record's text field
//! and materializes a [`FragmentRecord`] per fragment, with provenance
//! offsets back into the source text.
//!
//! ## Offset Lookup
//!
//! The segmenter returns fragment *text*, not positions, because phrase
//! packing trims and re-joins phrases. Offsets are recovered by substring
//! search over the original text. Two details matter:
//!
//! - The search keeps a cursor that only moves forward, so duplicated
//!   fragment text resolves to the next occurrence at or after the previous
//!   fragment instead of snapping back to the first occurrence. A fragment
//!   not found at or after the cursor is retried from the start of the text.
//! - The search can miss outright when packing trimmed whitespace around a
//!   phrase delimiter; the merged fragment then never occurs verbatim in the
//!   source. That fragment gets `fragment_start = -1` (and a warning log),
//!   the conventional not-found sentinel for substring search. Downstream
//!   consumers of offsets must tolerate it.
//!
//! Invalid records are not errors: a missing, non-string, or too-short text
//! field simply yields zero fragments.

use serde_json::Value;

use crate::segmenter::char_len;
use crate::{FragmentMeta, FragmentRecord, Fragmenter, LengthWindow, Record, Segmenter, SOURCE_TYPE};

/// Fragments one record at a time.
///
/// ## Example
///
/// ```rust
/// use splinters::{Fragmenter, LengthWindow, Record, RecordFragmenter};
/// use serde_json::Value;
///
/// let fragmenter = RecordFragmenter::new(LengthWindow::new(5, 250)?, "text");
///
/// let mut record = Record::new();
/// record.insert("id".into(), Value::from(1));
/// record.insert("text".into(), Value::from("今天天氣很好。我們出去玩。"));
///
/// let fragments = fragmenter.fragment_record(0, &record);
/// assert_eq!(fragments.len(), 2);
/// assert_eq!(fragments[0].fields["text"], Value::from("今天天氣很好。"));
/// assert_eq!(fragments[0].fields["id"], Value::from(1));
/// assert_eq!(fragments[1].meta.fragment_start, 7);
/// # Ok::<(), splinters::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RecordFragmenter {
    segmenter: Segmenter,
    text_field: String,
}

impl RecordFragmenter {
    /// Create a fragmenter reading text from `text_field`.
    #[must_use]
    pub fn new(window: LengthWindow, text_field: impl Into<String>) -> Self {
        Self {
            segmenter: Segmenter::new(window),
            text_field: text_field.into(),
        }
    }

    /// The field name the fragmenter reads text from.
    #[must_use]
    pub fn text_field(&self) -> &str {
        &self.text_field
    }

    fn usable_text<'a>(&self, record: &'a Record) -> Option<&'a str> {
        let text = record.get(&self.text_field)?.as_str()?;
        if char_len(text.trim()) < self.segmenter.window().min() {
            return None;
        }
        Some(text)
    }
}

impl Fragmenter for RecordFragmenter {
    /// Fragment one record.
    ///
    /// Returns one [`FragmentRecord`] per fragment, in fragment order, each
    /// carrying every original field with the text field overwritten.
    /// Records with no usable text yield an empty vec, silently.
    fn fragment_record(&self, original_index: usize, record: &Record) -> Vec<FragmentRecord> {
        let Some(text) = self.usable_text(record) else {
            return Vec::new();
        };

        let fragments = self.segmenter.segment(text);
        let original_text_length = char_len(text);

        let mut lookup = OffsetLookup::new(text);
        let mut out = Vec::with_capacity(fragments.len());
        for (fragment_index, fragment) in fragments.into_iter().enumerate() {
            let fragment_length = char_len(&fragment);
            let fragment_start = match lookup.locate(&fragment) {
                Some(start) => start as i64,
                None => {
                    log::warn!(
                        "record {original_index} fragment {fragment_index}: \
                         text not found verbatim in source, offsets set to -1"
                    );
                    -1
                }
            };

            let mut fields = record.clone();
            fields.insert(self.text_field.clone(), Value::from(fragment));
            out.push(FragmentRecord {
                fields,
                meta: FragmentMeta {
                    original_index,
                    fragment_index,
                    original_text_length,
                    fragment_length,
                    source_type: SOURCE_TYPE,
                    fragment_start,
                    fragment_end: fragment_start + fragment_length as i64,
                },
            });
        }
        out
    }
}

/// Forward substring search with a byte cursor over one text.
struct OffsetLookup<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> OffsetLookup<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, cursor: 0 }
    }

    /// Character offset of `fragment` at or after the cursor, falling back
    /// to a first-occurrence scan of the whole text.
    ///
    /// On a hit at or after the cursor the cursor advances past the match, so
    /// repeated fragment text keeps resolving forward. The full-text retry
    /// leaves the cursor alone.
    fn locate(&mut self, fragment: &str) -> Option<usize> {
        if let Some(pos) = self.text[self.cursor..].find(fragment) {
            let byte_start = self.cursor + pos;
            self.cursor = byte_start + fragment.len();
            return Some(char_len(&self.text[..byte_start]));
        }
        self.text
            .find(fragment)
            .map(|byte_start| char_len(&self.text[..byte_start]))
    }
}
