//! Array combinator: identity alignment, deep merge of matched items,
//! appends, deletion, and the item reorder pass.

use std::collections::HashMap;

use serde_json::Value;

use crate::control;
use crate::merge::Engine;
use crate::reorder::{reorder, Entry, Move, Position, Subject};
use crate::types::MergeError;

/// A base item while the override is being aligned against it. Base items
/// stay borrowed until a merge or delete touches them.
enum Slot<'a> {
    Base(&'a Value),
    Merged(Value),
    Deleted,
}

impl Engine<'_> {
    /// Aligns override items to base items by identity, merges matched
    /// pairs in place, appends the rest, then reorders and strips controls.
    pub(crate) fn merge_arrays(
        &self,
        base: &[Value],
        over: &[Value],
        depth: usize,
    ) -> Result<Value, MergeError> {
        // index base identities; the first occurrence wins
        let mut work: Vec<Slot> = base.iter().map(Slot::Base).collect();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for (i, item) in base.iter().enumerate() {
            if let Some(id) = control::identity(self.opts, item) {
                index.entry(id).or_insert(i);
            }
        }

        // align override items; anonymous items always append
        let mut appends: Vec<Value> = Vec::new();
        for item in over {
            let matched = control::identity(self.opts, item).and_then(|id| index.get(id).copied());
            match matched {
                Some(i) => {
                    if control::is_delete_marker(self.opts, item) {
                        work[i] = Slot::Deleted;
                        continue;
                    }
                    let current = match &work[i] {
                        Slot::Base(v) => Some(*v),
                        Slot::Merged(v) => Some(v),
                        Slot::Deleted => None,
                    };
                    let merged = self.merge_value(current, item, depth + 1)?;
                    work[i] = Slot::Merged(merged);
                }
                None => {
                    if control::is_delete_marker(self.opts, item) {
                        continue;
                    }
                    appends.push(self.merge_value(None, item, depth + 1)?);
                }
            }
        }

        // surviving base slots keep their order; appends follow
        let mut result: Vec<Value> = Vec::with_capacity(work.len() + appends.len());
        for slot in work {
            match slot {
                Slot::Base(v) => result.push(v.clone()),
                Slot::Merged(v) => result.push(v),
                Slot::Deleted => {}
            }
        }
        result.extend(appends);

        // items carrying a position directive become moves, keyed by
        // identity when they have one
        let mut moves: Vec<Move> = Vec::new();
        for (i, item) in result.iter().enumerate() {
            let Some(pos) = control::position_of(self.opts, item) else {
                continue;
            };
            moves.push(Move {
                subject: match control::identity(self.opts, item) {
                    Some(id) => Subject::Handle(id.to_owned()),
                    None => Subject::Slot(i),
                },
                position: Position::parse(pos),
                anchor: control::anchor_of(self.opts, item).map(str::to_owned),
            });
        }
        if !moves.is_empty() {
            let mut entries: Vec<Entry<Value>> = result
                .into_iter()
                .enumerate()
                .map(|(slot, value)| {
                    let handle = control::identity(self.opts, &value).map(str::to_owned);
                    Entry { slot, handle, value }
                })
                .collect();
            reorder(&mut entries, &moves, self.opts.strict_anchor)?;
            result = entries.into_iter().map(|e| e.value).collect();
        }

        for item in &mut result {
            control::strip_controls_in_place(
                item,
                &[
                    &self.opts.position_key,
                    &self.opts.anchor_key,
                    &self.opts.patch_key,
                ],
            );
        }
        Ok(Value::Array(result))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
