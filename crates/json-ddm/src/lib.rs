//! json-ddm — deterministic deep merge for JSON documents.
//!
//! Merges an ordered sequence of JSON layers (a base, then one or more
//! overrides) into a single document. Objects deep-merge by key with
//! insertion order preserved; array items align by a configurable identity
//! key instead of their index; a small control-key vocabulary lets an
//! override delete entries, reorder keys and items relative to named
//! anchors, and replace a merged value with a typed wrapper. Later layers
//! win every conflict.
//!
//! The engine is a pure function over `serde_json::Value` trees: inputs are
//! read-only, the output is freshly owned, and repeated invocations with
//! the same inputs produce equal results.
//!
//! ```
//! use json_ddm::{merge, MergeOptions};
//! use serde_json::json;
//!
//! let base = json!({"theme": {"primary": "#000", "secondary": "#fff"}});
//! let layer = json!({
//!     "theme": {"secondary": {"$value": "#ccc", "$position": "before", "$anchor": "primary"}}
//! });
//! let merged = merge(Some(&base), Some(&layer), &MergeOptions::default())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(merged, json!({"theme": {"secondary": "#ccc", "primary": "#000"}}));
//! ```

pub mod types;

mod array;
mod control;
mod merge;
mod object;
mod reorder;

pub use merge::{merge, merge_layers};
pub use types::{MergeError, MergeOptions};
