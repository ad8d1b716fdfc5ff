//! Merge entry points and the recursive value combinator.
//!
//! The combinator dispatches on the override variant first: null passes
//! through, a value wrapper short-circuits, primitives replace, and
//! composites recurse into the object or array combinator. A composite
//! override facing a base of any other shape merges against an empty
//! counterpart so its control keys are still processed and stripped.

use serde_json::{Map, Value};

use crate::types::{MergeError, MergeOptions};

// ── Public API ────────────────────────────────────────────────────────────

/// Merges one override layer over a base value.
///
/// Either input may be absent. The result is absent iff `overlay` is absent;
/// a null overlay yields null. Inputs are read-only and the result is a
/// freshly owned tree.
///
/// # Errors
///
/// [`MergeError::AnchorMissing`] when a reorder directive names an unknown
/// anchor under strict-anchor options, and [`MergeError::DepthExceeded`]
/// past the configured recursion bound. Errors are fatal to the invocation;
/// no partial result is produced.
pub fn merge(
    base: Option<&Value>,
    overlay: Option<&Value>,
    options: &MergeOptions,
) -> Result<Option<Value>, MergeError> {
    let Some(overlay) = overlay else {
        return Ok(None);
    };
    Engine::new(options).merge_value(base, overlay, 0).map(Some)
}

/// Folds an ordered sequence of layers left-to-right through [`merge`]:
/// the first layer is the base, each following layer overrides the
/// accumulated result. An empty sequence yields an absent result.
pub fn merge_layers<'a, I>(layers: I, options: &MergeOptions) -> Result<Option<Value>, MergeError>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut acc: Option<Value> = None;
    for layer in layers {
        acc = merge(acc.as_ref(), Some(layer), options)?;
    }
    Ok(acc)
}

// ── Engine ────────────────────────────────────────────────────────────────

/// Per-invocation view of the options with the prefix character resolved
/// once up front.
pub(crate) struct Engine<'o> {
    pub(crate) opts: &'o MergeOptions,
    pub(crate) prefix: Option<char>,
}

impl<'o> Engine<'o> {
    pub(crate) fn new(opts: &'o MergeOptions) -> Self {
        Self {
            opts,
            prefix: opts.prefix_char(),
        }
    }

    /// Recursive value combinator.
    pub(crate) fn merge_value(
        &self,
        base: Option<&Value>,
        overlay: &Value,
        depth: usize,
    ) -> Result<Value, MergeError> {
        if depth > self.opts.max_depth {
            return Err(MergeError::DepthExceeded(self.opts.max_depth));
        }
        match overlay {
            Value::Null => Ok(Value::Null),
            Value::Object(over) => {
                // A value wrapper replaces the combined result outright,
                // discarding the base and any sibling control keys.
                if let Some(inner) = over.get(&self.opts.value_key) {
                    return Ok(inner.clone());
                }
                match base {
                    Some(Value::Object(b)) => self.merge_objects(b, over, depth),
                    _ => self.merge_objects(&Map::new(), over, depth),
                }
            }
            Value::Array(over) => match base {
                Some(Value::Array(b)) => self.merge_arrays(b, over, depth),
                _ => self.merge_arrays(&[], over, depth),
            },
            primitive => Ok(primitive.clone()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
