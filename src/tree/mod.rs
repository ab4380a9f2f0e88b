//! Configuration tree
//!
//! A [`Node`] pairs an optional payload with named children and a cache of
//! raw fields from the last decoded document. Loading fills the whole tree
//! from one JSON object (see [`merge`]); saving writes it back with
//! default-valued fields removed (see [`diff`]).

pub mod diff;
pub mod merge;
pub mod path;

use crate::error::ConfigError;
use crate::payload::{Binding, Payload, Slot};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Element of a configuration tree.
///
/// Children are keyed by the name they were registered under, which is also
/// their key in the JSON document. Registering a name twice under the same
/// parent is an error.
#[derive(Default)]
pub struct Node {
    payload: Option<Box<dyn Slot>>,
    children: BTreeMap<String, Node>,
    raw: Map<String, Value>,
    loaded: bool,
}

impl Node {
    /// Create a node bound to a caller-owned payload.
    pub fn new<T: Payload>(binding: Binding<T>) -> Self {
        Self {
            payload: Some(Box::new(binding)),
            ..Self::default()
        }
    }

    /// Create a payload-less node that only groups children and raw fields.
    pub fn structural() -> Self {
        Self::default()
    }

    /// Register `child` under `name` and return it.
    ///
    /// If this node has already been loaded the child is hydrated right away
    /// from the cached raw value for `name`, or defaulted when there is none.
    /// A failed hydration leaves the child registered.
    pub fn add_child(
        &mut self,
        name: impl Into<String>,
        child: impl Into<Node>,
    ) -> Result<&mut Node, ConfigError> {
        let name = name.into();
        if self.children.contains_key(&name) {
            return Err(ConfigError::DuplicateName {
                path: path::ROOT.to_string(),
                name,
            });
        }

        let loaded = self.loaded;
        let cached = self.raw.get(&name).cloned();
        let child_path = path::child(path::ROOT, &name);
        let child = self.children.entry(name).or_insert(child.into());

        if loaded {
            match cached {
                Some(value) => {
                    debug!(path = %child_path, "Hydrating late child from cached raw field");
                    child.hydrate(value, &child_path)?;
                }
                None => {
                    debug!(path = %child_path, "No cached raw field for late child, using defaults");
                    child.reset();
                    child.mark_loaded();
                }
            }
        }

        Ok(child)
    }

    /// Replace this node's payload.
    ///
    /// On a loaded node the new payload is defaulted and then overlaid with
    /// the cached raw fields, as if it had been registered before the load.
    pub fn set_payload<T: Payload>(&mut self, binding: Binding<T>) -> Result<(), ConfigError> {
        let slot: Box<dyn Slot> = Box::new(binding);
        slot.apply_defaults();
        if self.loaded {
            slot.apply(&self.raw, &[], path::ROOT)?;
        }
        self.payload = Some(slot);
        Ok(())
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.get_mut(name)
    }

    /// Children in name order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Raw fields cached from the last load and save.
    pub fn raw_fields(&self) -> &Map<String, Value> {
        &self.raw
    }

    pub fn raw_field(&self, name: &str) -> Option<&Value> {
        self.raw.get(name)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(Node::node_count).sum::<usize>()
    }

    /// Inject defaults into every payload of the subtree and forget raw fields.
    pub(crate) fn reset(&mut self) {
        if let Some(slot) = &self.payload {
            slot.apply_defaults();
        }
        self.raw.clear();
        for child in self.children.values_mut() {
            child.reset();
        }
    }

    pub(crate) fn mark_loaded(&mut self) {
        self.loaded = true;
        for child in self.children.values_mut() {
            child.mark_loaded();
        }
    }
}

impl<T: Payload> From<Binding<T>> for Node {
    fn from(binding: Binding<T>) -> Self {
        Node::new(binding)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("payload", &self.payload.is_some())
            .field("children", &self.children)
            .field("raw", &self.raw)
            .field("loaded", &self.loaded)
            .finish()
    }
}
