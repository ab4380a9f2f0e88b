//! Load path: default injection followed by overlay
//!
//! Every registered payload is reset to its defaults before the document is
//! applied, so keys absent from the document end at a known baseline. Each
//! node keeps the document's top-level keys as raw fields; children pick up
//! the raw value stored under their name.
//!
//! Overlay semantics for a payload:
//! - Objects: deep-merge by key (recursive)
//! - Arrays: REPLACE (document wins entirely)
//! - Scalars and null: document wins
//!
//! When that result does not decode, the overlay is retried with
//! [`lenient_merge`]: objects sharing no key are replaced (an enum switching
//! variants) and null leaves keep the current value.

use super::path::{self, ROOT};
use super::Node;
use crate::error::{kind_name, ConfigError};
use serde_json::{Map, Value};
use tracing::{debug, instrument, trace};

/// Deep merge two JSON values, `overlay` taking precedence.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }

        (_, overlay) => overlay,
    }
}

/// Like [`deep_merge`], except that an object sharing no key with its base
/// replaces it and a null never overwrites a non-null value.
pub fn lenient_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map))
            if !base_map.is_empty()
                && !overlay_map.is_empty()
                && overlay_map.keys().all(|key| !base_map.contains_key(key)) =>
        {
            Value::Object(overlay_map)
        }

        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => lenient_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }

        (base, Value::Null) if !base.is_null() => base,

        (_, overlay) => overlay,
    }
}

impl Node {
    /// Populate this node and every registered descendant from `bytes`.
    ///
    /// The document root must be a JSON object. Input that is empty applies
    /// defaults everywhere and succeeds; input holding only whitespace counts
    /// as empty too.
    ///
    /// The whole input is parsed and its root kind checked before defaults are
    /// injected, so a syntax or root-kind error leaves the tree as it was.
    /// Defaults still reach every registered payload before any overlay. A
    /// type mismatch found while overlaying aborts the load with earlier nodes
    /// already updated.
    #[instrument(skip_all, fields(bytes = bytes.len()))]
    pub fn load_from_bytes(&mut self, bytes: &[u8]) -> Result<(), ConfigError> {
        debug!(nodes = self.node_count(), "Loading configuration tree");

        if bytes.iter().all(u8::is_ascii_whitespace) {
            debug!("Empty document, applying defaults only");
            self.reset();
            self.mark_loaded();
            return Ok(());
        }

        let document: Value =
            serde_json::from_slice(bytes).map_err(|e| ConfigError::decode(bytes, ROOT, e))?;
        let Value::Object(document) = document else {
            return Err(ConfigError::RootKind {
                path: ROOT.to_string(),
                found: kind_name(&document),
            });
        };

        self.reset();
        self.merge_object(document, bytes, ROOT)
    }

    /// Reset this subtree to defaults and overlay `value` onto it.
    pub(crate) fn hydrate(&mut self, value: Value, path: &str) -> Result<(), ConfigError> {
        self.reset();
        self.merge_value(value, &[], path)
    }

    fn merge_value(&mut self, value: Value, input: &[u8], path: &str) -> Result<(), ConfigError> {
        match value {
            Value::Object(document) => self.merge_object(document, input, path),
            // null carries no fields
            Value::Null => {
                self.mark_loaded();
                Ok(())
            }
            other => Err(ConfigError::RootKind {
                path: path.to_string(),
                found: kind_name(&other),
            }),
        }
    }

    fn merge_object(
        &mut self,
        document: Map<String, Value>,
        input: &[u8],
        path: &str,
    ) -> Result<(), ConfigError> {
        trace!(path, keys = document.len(), "Merging node");

        if let Some(slot) = &self.payload {
            slot.apply(&document, input, path)?;
        }
        self.raw = document;

        for (name, child) in self.children.iter_mut() {
            match self.raw.get(name) {
                Some(value) => {
                    child.merge_value(value.clone(), input, &path::child(path, name))?
                }
                None => child.mark_loaded(),
            }
        }

        self.loaded = true;
        Ok(())
    }
}
