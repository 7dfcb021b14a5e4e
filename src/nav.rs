//! Tolerant deep-field access over untyped JSON trees.
//!
//! The InnerTube schema is undocumented and shifts between accounts,
//! locales and feature rollouts, so every field access in this crate goes
//! through [`nav`]: a total traversal that returns `None` for a missing
//! key, an out-of-range index or a non-container intermediate node, and
//! never panics. Call sites pick their own default with the usual
//! `Option` combinators or the typed helpers below.
//!
//! Paths are dot-separated; numeric segments index into arrays:
//!
//! ```text
//! contents.singleColumnBrowseResultsRenderer.tabs.0.tabRenderer
//! ```
//!
//! Whitespace around segments is ignored so long paths can be split over
//! multiple lines at the call site.

use serde_json::Value;

/// Resolves `path` inside `root`, returning `None` as soon as any segment
/// cannot be followed.
#[must_use]
pub fn nav<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut node = root;
    for segment in path.split('.') {
        let segment = segment.trim();
        node = match node {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(node)
}

/// Like [`nav`], but only succeeds when the target is a string.
#[must_use]
pub fn nav_str<'a>(root: &'a Value, path: &str) -> Option<&'a str> {
    nav(root, path)?.as_str()
}

/// String at `path`, or the empty string when absent or not a string.
#[must_use]
pub fn nav_string(root: &Value, path: &str) -> String {
    nav_str(root, path).unwrap_or_default().to_string()
}

/// Unsigned integer at `path`, if present and numeric.
#[must_use]
pub fn nav_u64(root: &Value, path: &str) -> Option<u64> {
    nav(root, path)?.as_u64()
}

/// Array at `path`, if present and actually an array.
#[must_use]
pub fn nav_array<'a>(root: &'a Value, path: &str) -> Option<&'a Vec<Value>> {
    nav(root, path)?.as_array()
}
