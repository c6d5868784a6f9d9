//! Record and fragment-record types.
//!
//! A [`Record`] is an open, insertion-ordered field map: whatever columns the
//! upstream tabular store carries, we carry. Only the designated text field
//! is interpreted; everything else passes through the pipeline verbatim.
//!
//! A [`FragmentRecord`] is one fragment of one record: the original fields
//! with the text field replaced by the fragment, plus typed provenance
//! metadata ([`FragmentMeta`]) tying the fragment back to its source.

use serde::Serialize;
use serde_json::Value;

/// An input record: ordered mapping from field name to value.
///
/// `serde_json::Map` with the `preserve_order` feature keeps fields in
/// insertion order, so output rows line up column-for-column with input rows.
pub type Record = serde_json::Map<String, Value>;

/// Tag written to the `source_type` metadata field of every fragment.
pub const SOURCE_TYPE: &str = "sentence_fragment";

/// Provenance metadata for one fragment.
///
/// ## Character offsets
///
/// `fragment_start` and `fragment_end` are *character* offsets into the
/// original text, not byte offsets, matching how lengths are counted
/// everywhere in this crate.
///
/// They are signed because the offset lookup can miss: phrase packing trims
/// whitespace around phrase delimiters, so a merged fragment is not always a
/// verbatim substring of its source. In that case `fragment_start` is `-1`
/// and `fragment_end` is `-1 + fragment_length`. See
/// [`RecordFragmenter`](crate::RecordFragmenter) for the lookup rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FragmentMeta {
    /// Index of the source record within its batch.
    pub original_index: usize,
    /// Zero-based position among the fragments of that record.
    pub fragment_index: usize,
    /// Character length of the original text field.
    pub original_text_length: usize,
    /// Character length of this fragment.
    pub fragment_length: usize,
    /// Constant tag, [`SOURCE_TYPE`].
    pub source_type: &'static str,
    /// Character offset where the fragment starts in the original text,
    /// or `-1` when the fragment text was not found verbatim.
    pub fragment_start: i64,
    /// `fragment_start + fragment_length`.
    pub fragment_end: i64,
}

/// One fragment of one record.
///
/// `fields` holds every original field, in original order, with the text
/// field overwritten by the fragment text. `meta` holds the provenance
/// metadata separately, typed; [`FragmentRecord::into_record`] flattens the
/// two into a single row for sinks that want flat tabular output.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentRecord {
    /// Original fields with the text field replaced by the fragment.
    pub fields: Record,
    /// Provenance metadata.
    pub meta: FragmentMeta,
}

impl FragmentRecord {
    /// Flatten `fields` and `meta` into one record.
    ///
    /// Metadata keys are appended after the original fields, in a fixed
    /// order, so every output row has the same column layout.
    #[must_use]
    pub fn into_record(self) -> Record {
        let mut fields = self.fields;
        let meta = self.meta;
        fields.insert(
            "original_index".to_owned(),
            Value::from(meta.original_index as u64),
        );
        fields.insert(
            "fragment_index".to_owned(),
            Value::from(meta.fragment_index as u64),
        );
        fields.insert(
            "original_text_length".to_owned(),
            Value::from(meta.original_text_length as u64),
        );
        fields.insert(
            "fragment_length".to_owned(),
            Value::from(meta.fragment_length as u64),
        );
        fields.insert(
            "source_type".to_owned(),
            Value::from(meta.source_type.to_owned()),
        );
        fields.insert(
            "fragment_start".to_owned(),
            Value::from(meta.fragment_start),
        );
        fields.insert("fragment_end".to_owned(), Value::from(meta.fragment_end));
        fields
    }

    /// The character span of this fragment in the original text, when the
    /// offset lookup succeeded.
    #[must_use]
    pub fn span(&self) -> Option<std::ops::Range<usize>> {
        if self.meta.fragment_start < 0 {
            return None;
        }
        let start = self.meta.fragment_start as usize;
        Some(start..start + self.meta.fragment_length)
    }
}

impl std::fmt::Display for FragmentRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FragmentRecord {{ record: {}, fragment: {}, span: {}..{}, len: {} }}",
            self.meta.original_index,
            self.meta.fragment_index,
            self.meta.fragment_start,
            self.meta.fragment_end,
            self.meta.fragment_length
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FragmentRecord {
        let mut fields = Record::new();
        fields.insert("id".to_owned(), Value::from(7));
        fields.insert("text".to_owned(), Value::from("一個片段"));
        FragmentRecord {
            fields,
            meta: FragmentMeta {
                original_index: 3,
                fragment_index: 1,
                original_text_length: 40,
                fragment_length: 4,
                source_type: SOURCE_TYPE,
                fragment_start: 12,
                fragment_end: 16,
            },
        }
    }

    #[test]
    fn test_flatten_appends_metadata_after_original_fields() {
        let record = sample().into_record();
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "id",
                "text",
                "original_index",
                "fragment_index",
                "original_text_length",
                "fragment_length",
                "source_type",
                "fragment_start",
                "fragment_end",
            ]
        );
        assert_eq!(record["source_type"], Value::from(SOURCE_TYPE));
        assert_eq!(record["fragment_start"], Value::from(12));
    }

    #[test]
    fn test_span_present_when_offsets_found() {
        assert_eq!(sample().span(), Some(12..16));
    }

    #[test]
    fn test_span_absent_when_lookup_missed() {
        let mut fragment = sample();
        fragment.meta.fragment_start = -1;
        fragment.meta.fragment_end = -1 + fragment.meta.fragment_length as i64;
        assert_eq!(fragment.span(), None);
    }
}
