//! Custom label parameter parsing.
//!
//! The raw parameter is a comma separated list of `key` or `key=value`
//! entries. Whitespace around the whole string, around commas and around the
//! first `=` is ignored; empty entries are skipped. Each entry is checked in
//! a fixed order and the first failing check decides the error:
//!
//! 1. whitespace left inside the key or value
//! 2. empty key
//! 3. key or value not matching the label value syntax

use crate::errors::internal::LabelError;
use crate::types::internal::{LabelSet, Labeled};

/// Longest key or value accepted
pub const MAX_LABEL_LENGTH: usize = 63;

/// Parse a raw custom label string into a validated label set
///
/// Entries without `=` produce an empty value. Later duplicates overwrite
/// earlier ones. On the first invalid entry nothing is returned.
pub fn parse_labels(raw: &str) -> Result<LabelSet, LabelError> {
    let mut labels = LabelSet::new();

    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let (key, value) = match entry.split_once('=') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (entry, ""),
        };

        if key.contains(char::is_whitespace) || value.contains(char::is_whitespace) {
            return Err(LabelError::InvalidKeyValueStr);
        }

        if key.is_empty() {
            return Err(LabelError::MissingLabelKey);
        }

        if !is_valid_label_value(key) || !is_valid_label_value(value) {
            return Err(LabelError::InvalidCustomLabel);
        }

        labels.insert(key.to_string(), value.to_string());
    }

    Ok(labels)
}

/// Parse `raw` and merge the result into the target's label map
///
/// The target is left untouched when parsing fails.
pub fn ensure_custom_label<T: Labeled + ?Sized>(
    target: &mut T,
    raw: &str,
) -> Result<LabelSet, LabelError> {
    let labels = parse_labels(raw)?;
    labels.merge_into(target.labels_mut());
    Ok(labels)
}

/// Label value syntax: empty, or up to 63 of `[A-Za-z0-9-_.]` starting and
/// ending with an alphanumeric character
fn is_valid_label_value(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    if value.len() > MAX_LABEL_LENGTH {
        return false;
    }

    let bytes = value.as_bytes();
    let allowed = |b: &u8| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.');

    bytes.iter().all(allowed)
        && bytes[0].is_ascii_alphanumeric()
        && bytes[bytes.len() - 1].is_ascii_alphanumeric()
}
