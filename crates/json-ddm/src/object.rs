//! Object combinator: deep-merge by key, deletion, primitive preservation,
//! and the key reorder pass.

use serde_json::{Map, Value};

use crate::control;
use crate::merge::Engine;
use crate::reorder::{reorder, Entry, Move, Position, Subject};
use crate::types::MergeError;

impl Engine<'_> {
    /// Merges override entries into a copy of the base object, in override
    /// insertion order, then applies any recorded key moves.
    pub(crate) fn merge_objects(
        &self,
        base: &Map<String, Value>,
        over: &Map<String, Value>,
        depth: usize,
    ) -> Result<Value, MergeError> {
        let mut result = base.clone();
        let mut moves: Vec<Move> = Vec::new();

        for (raw_key, v) in over {
            let key = control::unescape_key(self.prefix, raw_key);

            if v.is_object() {
                if let Some(pos) = control::position_of(self.opts, v) {
                    moves.push(Move {
                        subject: Subject::Handle(key.to_owned()),
                        position: Position::parse(pos),
                        anchor: control::anchor_of(self.opts, v).map(str::to_owned),
                    });
                }
                if control::is_delete_marker(self.opts, v) {
                    // sibling data in a delete marker is discarded
                    result.shift_remove(key);
                    continue;
                }
            }

            let bv = result.get(key);
            if let Some(bv) = bv {
                // A metadata-only override over a scalar repositions or
                // patches it without touching the value itself.
                if control::is_scalar(bv) && control::preserves_primitive(self.opts, v) {
                    continue;
                }
            }
            // The value key survives the strip so the combinator below can
            // unwrap it.
            let stripped = control::strip_controls(
                v,
                &[
                    &self.opts.position_key,
                    &self.opts.anchor_key,
                    &self.opts.patch_key,
                ],
            );
            let merged = self.merge_value(bv, &stripped, depth + 1)?;
            result.insert(key.to_owned(), merged);
        }

        if moves.is_empty() {
            return Ok(Value::Object(result));
        }

        let mut entries: Vec<Entry<(String, Value)>> = result
            .into_iter()
            .enumerate()
            .map(|(slot, (k, v))| Entry {
                slot,
                handle: Some(k.clone()),
                value: (k, v),
            })
            .collect();
        reorder(&mut entries, &moves, self.opts.strict_anchor)?;
        Ok(Value::Object(entries.into_iter().map(|e| e.value).collect()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
