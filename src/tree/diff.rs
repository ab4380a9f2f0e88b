//! Save path: encode, strip defaults, fold into raw fields

use super::path::{self, ROOT};
use super::Node;
use crate::error::ConfigError;
use serde_json::{Map, Value};
use tracing::{debug, instrument, trace};

impl Node {
    /// Serialize this node and its descendants as compact JSON.
    ///
    /// Payload fields equal to a freshly defaulted instance are left out, and
    /// children that end up empty are dropped. Raw fields nothing claims, such
    /// as keys from the loaded document no payload understands, are written
    /// back unchanged.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, ConfigError> {
        let document = self.save_to_value()?;
        serde_json::to_vec(&document).map_err(|source| ConfigError::Encode {
            path: ROOT.to_string(),
            source,
        })
    }

    /// Like [`Node::save_to_bytes`], indented for people to read.
    pub fn save_to_bytes_pretty(&mut self) -> Result<Vec<u8>, ConfigError> {
        let document = self.save_to_value()?;
        serde_json::to_vec_pretty(&document).map_err(|source| ConfigError::Encode {
            path: ROOT.to_string(),
            source,
        })
    }

    /// The document [`Node::save_to_bytes`] would write.
    #[instrument(skip_all)]
    pub fn save_to_value(&mut self) -> Result<Value, ConfigError> {
        debug!(nodes = self.node_count(), "Saving configuration tree");
        self.diff(ROOT).map(Value::Object)
    }

    fn diff(&mut self, path: &str) -> Result<Map<String, Value>, ConfigError> {
        if let Some(slot) = &self.payload {
            let mut fields = slot.encode(path)?;

            match slot.baseline(path)? {
                Some(baseline) => {
                    fields.retain(|key, value| {
                        let is_default = baseline.get(key) == Some(&*value);
                        if is_default {
                            // a field reset to its default must not resurface
                            // from the previous load
                            self.raw.remove(key);
                        }
                        !is_default
                    });
                }
                None => trace!(path, "No fresh instance for payload, saving every field"),
            }

            self.raw.extend(fields);
        }

        for (name, child) in self.children.iter_mut() {
            let document = child.diff(&path::child(path, name))?;
            if document.is_empty() {
                self.raw.remove(name);
            } else {
                self.raw.insert(name.clone(), Value::Object(document));
            }
        }

        Ok(self.raw.clone())
    }
}
