//! Shared reorder engine for object keys and array items.
//!
//! Both combinators reduce their collection to a flat sequence of entries,
//! collect the moves recorded while scanning the override, and splice the
//! sequence here. Moves apply in the order they were recorded, so a later
//! layer's directive lands last and wins.

use crate::types::MergeError;

// ── Position vocabulary ───────────────────────────────────────────────────

/// Where a move places its subject. Unknown directive strings degrade to
/// `End` rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Position {
    Start,
    End,
    Before,
    After,
}

impl Position {
    pub(crate) fn parse(s: &str) -> Self {
        match s {
            "start" => Position::Start,
            "end" => Position::End,
            "before" => Position::Before,
            "after" => Position::After,
            _ => Position::End,
        }
    }
}

// ── Moves ─────────────────────────────────────────────────────────────────

/// How a move names the element it relocates.
#[derive(Debug, Clone)]
pub(crate) enum Subject {
    /// Object key or array item identity.
    Handle(String),
    /// Pre-reorder index of an anonymous array item. Such an item can be
    /// moved but cannot be named as an anchor by other moves.
    Slot(usize),
}

/// A recorded reorder request.
#[derive(Debug, Clone)]
pub(crate) struct Move {
    pub subject: Subject,
    pub position: Position,
    pub anchor: Option<String>,
}

/// One element of the sequence under reorder.
pub(crate) struct Entry<T> {
    /// Index in the sequence before any moves were applied.
    pub slot: usize,
    /// Object key or array identity, when the element has one.
    pub handle: Option<String>,
    pub value: T,
}

// ── Engine ────────────────────────────────────────────────────────────────

/// Applies `moves` to `entries` in order. A move whose subject is no longer
/// present is skipped; a `before`/`after` move whose anchor is missing fails
/// when `strict_anchor` is set and appends to the end otherwise.
pub(crate) fn reorder<T>(
    entries: &mut Vec<Entry<T>>,
    moves: &[Move],
    strict_anchor: bool,
) -> Result<(), MergeError> {
    for mv in moves {
        let Some(from) = locate(entries, &mv.subject) else {
            continue;
        };
        let entry = entries.remove(from);
        let target = match mv.position {
            Position::Start => 0,
            Position::End => entries.len(),
            Position::Before | Position::After => match mv.anchor.as_deref() {
                // no anchor named, nothing to resolve: append
                None => entries.len(),
                Some(anchor) => match locate_handle(entries, anchor) {
                    Some(i) if matches!(mv.position, Position::After) => i + 1,
                    Some(i) => i,
                    None if strict_anchor => {
                        return Err(MergeError::AnchorMissing {
                            anchor: anchor.to_owned(),
                            subject: subject_label(&entry),
                        });
                    }
                    None => entries.len(),
                },
            },
        };
        entries.insert(target, entry);
    }
    Ok(())
}

fn locate<T>(entries: &[Entry<T>], subject: &Subject) -> Option<usize> {
    match subject {
        Subject::Handle(h) => locate_handle(entries, h),
        Subject::Slot(n) => entries.iter().position(|e| e.slot == *n),
    }
}

fn locate_handle<T>(entries: &[Entry<T>], handle: &str) -> Option<usize> {
    entries.iter().position(|e| e.handle.as_deref() == Some(handle))
}

fn subject_label<T>(entry: &Entry<T>) -> String {
    match &entry.handle {
        Some(h) => h.clone(),
        None => format!("#{}", entry.slot),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
