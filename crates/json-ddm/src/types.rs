//! Core types for the deep-merge engine: the options record and the error
//! enum shared by every merge pass.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// A reorder directive names an anchor that is not present in the merged
    /// collection. Only raised when [`MergeOptions::strict_anchor`] is set;
    /// otherwise the subject is appended to the end instead.
    #[error("ANCHOR_MISSING: `{anchor}` (subject `{subject}`)")]
    AnchorMissing { anchor: String, subject: String },
    /// Recursion went past [`MergeOptions::max_depth`] levels.
    #[error("DEPTH_EXCEEDED: {0}")]
    DepthExceeded(usize),
}

// ── Options ───────────────────────────────────────────────────────────────

/// Control-key vocabulary and behavior switches for a merge.
///
/// The five key names are recognized inside any override object; a literal
/// data key colliding with one of them is written with its leading prefix
/// character doubled (`$$id` for a literal `$id` when the id key is `$id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Names the identity of an array item; also drives key escaping.
    pub id_key: String,
    /// Marks a reorder directive (`"start"`, `"end"`, `"before"`, `"after"`).
    pub position_key: String,
    /// Names the reference element for `"before"`/`"after"` directives.
    pub anchor_key: String,
    /// Marks a delete directive when its value is the string `"delete"`.
    pub patch_key: String,
    /// Marks a typed-value wrapper; its contents replace the merged value.
    pub value_key: String,
    /// Missing anchor: fail the merge when true, append to the end when false.
    pub strict_anchor: bool,
    /// Recursion bound for pathological inputs.
    pub max_depth: usize,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            id_key: "$id".to_owned(),
            position_key: "$position".to_owned(),
            anchor_key: "$anchor".to_owned(),
            patch_key: "$patch".to_owned(),
            value_key: "$value".to_owned(),
            strict_anchor: true,
            max_depth: 128,
        }
    }
}

impl MergeOptions {
    /// The escape prefix: the first character of the id key iff that
    /// character is not alphanumeric. Computed once per merge invocation.
    pub(crate) fn prefix_char(&self) -> Option<char> {
        self.id_key.chars().next().filter(|c| !c.is_alphanumeric())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vocabulary() {
        let opts = MergeOptions::default();
        assert_eq!(opts.id_key, "$id");
        assert_eq!(opts.position_key, "$position");
        assert_eq!(opts.anchor_key, "$anchor");
        assert_eq!(opts.patch_key, "$patch");
        assert_eq!(opts.value_key, "$value");
        assert!(opts.strict_anchor);
        assert_eq!(opts.max_depth, 128);
    }

    #[test]
    fn prefix_char_from_id_key() {
        assert_eq!(MergeOptions::default().prefix_char(), Some('$'));

        let at = MergeOptions {
            id_key: "@id".to_owned(),
            ..MergeOptions::default()
        };
        assert_eq!(at.prefix_char(), Some('@'));
    }

    #[test]
    fn alphanumeric_id_key_has_no_prefix() {
        let opts = MergeOptions {
            id_key: "id".to_owned(),
            ..MergeOptions::default()
        };
        assert_eq!(opts.prefix_char(), None);
    }

    #[test]
    fn empty_id_key_has_no_prefix() {
        let opts = MergeOptions {
            id_key: String::new(),
            ..MergeOptions::default()
        };
        assert_eq!(opts.prefix_char(), None);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: MergeOptions = serde_json::from_str(r#"{"id_key": "@id"}"#).unwrap();
        assert_eq!(opts.id_key, "@id");
        assert_eq!(opts.position_key, "$position");
        assert!(opts.strict_anchor);
    }
}
