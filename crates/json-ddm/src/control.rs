//! Identity, delete-marker, control-strip, and key-unescape helpers.
//!
//! Control keys are metadata at the override level only: they are read,
//! acted on, and removed before anything reaches the merged output. A data
//! key that collides with a control key is written with its leading prefix
//! character doubled, and collapsed back here.

use std::borrow::Cow;

use serde_json::Value;

use crate::types::MergeOptions;

// ── Identity ──────────────────────────────────────────────────────────────

/// The identity of `v`: the string at the id key, iff `v` is an object and
/// that entry is string-valued. Objects without one are anonymous and never
/// match across layers.
pub(crate) fn identity<'v>(opts: &MergeOptions, v: &'v Value) -> Option<&'v str> {
    v.as_object()?.get(&opts.id_key)?.as_str()
}

/// True iff `v` is an object whose patch-key entry is the literal `"delete"`.
pub(crate) fn is_delete_marker(opts: &MergeOptions, v: &Value) -> bool {
    v.as_object()
        .and_then(|m| m.get(&opts.patch_key))
        .and_then(Value::as_str)
        == Some("delete")
}

// ── Control classification ────────────────────────────────────────────────

/// The string-valued position directive on `v`, if any.
pub(crate) fn position_of<'v>(opts: &MergeOptions, v: &'v Value) -> Option<&'v str> {
    v.as_object()?.get(&opts.position_key)?.as_str()
}

/// The string-valued anchor on `v`, if any. Non-string anchors are ignored.
pub(crate) fn anchor_of<'v>(opts: &MergeOptions, v: &'v Value) -> Option<&'v str> {
    v.as_object()?.get(&opts.anchor_key)?.as_str()
}

/// True when an override object carries placement/patch metadata and no
/// value wrapper. Such an override leaves a primitive base value in place:
/// the directives act, the primitive survives.
pub(crate) fn preserves_primitive(opts: &MergeOptions, v: &Value) -> bool {
    let Some(m) = v.as_object() else { return false };
    !m.contains_key(&opts.value_key)
        && (m.contains_key(&opts.position_key)
            || m.contains_key(&opts.anchor_key)
            || m.contains_key(&opts.patch_key))
}

/// True for null and the non-composite variants.
pub(crate) fn is_scalar(v: &Value) -> bool {
    !v.is_object() && !v.is_array()
}

// ── Control stripping ─────────────────────────────────────────────────────

/// Shallow copy of `v` with the named keys removed. Non-objects and objects
/// without any of the keys pass through unchanged (borrowed).
pub(crate) fn strip_controls<'v>(v: &'v Value, keys: &[&str]) -> Cow<'v, Value> {
    let Value::Object(map) = v else {
        return Cow::Borrowed(v);
    };
    if !keys.iter().any(|k| map.contains_key(*k)) {
        return Cow::Borrowed(v);
    }
    let mut out = map.clone();
    for k in keys {
        // shift_remove keeps the order of the surviving entries
        out.shift_remove(*k);
    }
    Cow::Owned(Value::Object(out))
}

/// In-place variant of [`strip_controls`] for owned values.
pub(crate) fn strip_controls_in_place(v: &mut Value, keys: &[&str]) {
    if let Value::Object(map) = v {
        for k in keys {
            map.shift_remove(*k);
        }
    }
}

// ── Key unescaping ────────────────────────────────────────────────────────

/// Collapses one level of doubled prefix on an object key: when the first
/// two characters of `raw` are both the prefix character, the first is
/// removed. Exactly one level per merge, so `$$$id` unescapes to `$$id`.
pub(crate) fn unescape_key<'k>(prefix: Option<char>, raw: &'k str) -> &'k str {
    if let Some(c) = prefix {
        let mut chars = raw.chars();
        if chars.next() == Some(c) && chars.next() == Some(c) {
            return &raw[c.len_utf8()..];
        }
    }
    raw
}

// ── Tests ─────────────────────────────────────────────────────────────────
