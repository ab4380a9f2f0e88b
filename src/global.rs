//! Process-wide default tree
//!
//! Optional convenience for programs whose components register their
//! configuration from scattered places. The tree starts structural and is
//! created on first use. Every call holds one lock for its whole duration.

use crate::error::ConfigError;
use crate::payload::{Binding, Payload};
use crate::tree::Node;
use parking_lot::{const_mutex, Mutex};
use std::path::Path;

static DEFAULT_TREE: Mutex<Option<Node>> = const_mutex(None);

/// Run `f` with exclusive access to the default tree.
pub fn with_tree<R>(f: impl FnOnce(&mut Node) -> R) -> R {
    let mut guard = DEFAULT_TREE.lock();
    f(guard.get_or_insert_with(Node::structural))
}

/// Bind the root payload of the default tree.
pub fn set_root<T: Payload>(binding: Binding<T>) -> Result<(), ConfigError> {
    with_tree(|tree| tree.set_payload(binding))
}

/// Register a child directly under the default tree's root.
pub fn add_child(name: impl Into<String>, child: impl Into<Node>) -> Result<(), ConfigError> {
    with_tree(|tree| tree.add_child(name, child).map(|_| ()))
}

pub fn load_from_bytes(bytes: &[u8]) -> Result<(), ConfigError> {
    with_tree(|tree| tree.load_from_bytes(bytes))
}

pub fn save_to_bytes() -> Result<Vec<u8>, ConfigError> {
    with_tree(|tree| tree.save_to_bytes())
}

pub fn load_file(path: impl AsRef<Path>) -> Result<(), ConfigError> {
    with_tree(|tree| tree.load_file(path))
}

pub fn save_file(path: impl AsRef<Path>) -> Result<(), ConfigError> {
    with_tree(|tree| tree.save_file(path))
}

/// Drop the default tree; the next call starts from an empty one.
pub fn reset() {
    *DEFAULT_TREE.lock() = None;
}
