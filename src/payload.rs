//! Payload handles and default injection
//!
//! A payload is a caller-owned value holding one component's configuration
//! fields. The tree never owns it: a node keeps a [`Shared`] handle and reads,
//! overlays and resets the caller's storage through it.

use crate::error::{kind_name, ConfigError};
use crate::tree::merge::{deep_merge, lenient_merge};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Handle to caller-owned payload storage.
pub type Shared<T> = Arc<RwLock<T>>;

/// Wrap a value in a [`Shared`] handle.
pub fn shared<T>(value: T) -> Shared<T> {
    Arc::new(RwLock::new(value))
}

/// Resets a payload's fields to baseline values.
///
/// Called before every overlay and on fresh instances during save, so it must
/// be deterministic and idempotent and must not depend on loaded data.
///
/// Only serialized fields survive an overlay on their own. State kept out of
/// the document with `#[serde(skip)]` is rebuilt from `Default` unless the
/// binding carries it over (see [`Binding::with_carry_over`]), and a
/// `#[serde(skip_serializing)]` field needs `#[serde(default)]` to load.
pub trait Defaults {
    fn set_defaults(&mut self);
}

/// Bounds every payload type satisfies.
pub trait Payload: Serialize + DeserializeOwned + Send + Sync + 'static {}

impl<T> Payload for T where T: Serialize + DeserializeOwned + Send + Sync + 'static {}

type Injector<T> = fn(&mut T);
type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;
type CarryOver<T> = Box<dyn Fn(&T, &mut T) + Send + Sync>;

/// Registration descriptor pairing a payload handle with its capabilities.
///
/// The injector and the fresh-instance factory are captured here, once, so the
/// save path never has to discover them at runtime.
pub struct Binding<T> {
    handle: Shared<T>,
    injector: Option<Injector<T>>,
    fresh: Option<Factory<T>>,
    carry_over: Option<CarryOver<T>>,
}

impl<T: Payload> Binding<T> {
    /// Payload without a Default Injector. Every field is always saved.
    pub fn plain(handle: Shared<T>) -> Self {
        Self {
            handle,
            injector: None,
            fresh: None,
            carry_over: None,
        }
    }

    /// Copy state the document does not hold from the previous value into
    /// each newly decoded one.
    ///
    /// `carry(previous, decoded)` runs on every overlay, after defaults were
    /// injected into `previous` and before `decoded` replaces it.
    pub fn with_carry_over<F>(mut self, carry: F) -> Self
    where
        F: Fn(&T, &mut T) + Send + Sync + 'static,
    {
        self.carry_over = Some(Box::new(carry));
        self
    }

    pub fn handle(&self) -> &Shared<T> {
        &self.handle
    }
}

impl<T: Payload + Defaults> Binding<T> {
    /// Payload with a Default Injector but no way to build a fresh instance.
    ///
    /// Defaults are injected on load; saves fall back to full serialization.
    pub fn injected(handle: Shared<T>) -> Self {
        Self {
            handle,
            injector: Some(T::set_defaults as Injector<T>),
            fresh: None,
            carry_over: None,
        }
    }

    /// Supply the constructor used to build a fresh instance for save diffing.
    ///
    /// The injector runs on the constructed value before it is compared.
    pub fn with_fresh<F>(mut self, fresh: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.injector = Some(T::set_defaults as Injector<T>);
        self.fresh = Some(Box::new(fresh));
        self
    }
}

impl<T: Payload + Defaults + Default> Binding<T> {
    /// Payload with a Default Injector whose fresh instance is `T::default()`.
    pub fn defaulted(handle: Shared<T>) -> Self {
        Self::injected(handle).with_fresh(T::default)
    }
}

/// Type-erased accessors a node uses on its payload.
pub(crate) trait Slot: Send + Sync {
    /// Run the Default Injector, if any.
    fn apply_defaults(&self);

    /// Overlay a decoded object onto the current value in place.
    fn apply(&self, doc: &Map<String, Value>, input: &[u8], path: &str)
        -> Result<(), ConfigError>;

    /// Encode the current value as a key/value map.
    fn encode(&self, path: &str) -> Result<Map<String, Value>, ConfigError>;

    /// Encode a freshly built and defaulted instance, when one can be built.
    fn baseline(&self, path: &str) -> Result<Option<Map<String, Value>>, ConfigError>;
}

impl<T: Payload> Slot for Binding<T> {
    fn apply_defaults(&self) {
        if let Some(inject) = self.injector {
            inject(&mut self.handle.write());
        }
    }

    fn apply(
        &self,
        doc: &Map<String, Value>,
        input: &[u8],
        path: &str,
    ) -> Result<(), ConfigError> {
        let mut guard = self.handle.write();
        let current = serde_json::to_value(&*guard).map_err(|source| ConfigError::Encode {
            path: path.to_string(),
            source,
        })?;
        let overlay = Value::Object(doc.clone());

        // Absent keys keep their current (defaulted) value.
        let merged = deep_merge(current.clone(), overlay.clone());
        let mut decoded: T = match serde_json::from_value(merged) {
            Ok(decoded) => decoded,
            // a switched enum variant or a null on a plain field
            Err(source) => serde_json::from_value(lenient_merge(current, overlay))
                .map_err(|_| ConfigError::decode(input, path, source))?,
        };

        if let Some(carry) = &self.carry_over {
            carry(&guard, &mut decoded);
        }
        *guard = decoded;
        Ok(())
    }

    fn encode(&self, path: &str) -> Result<Map<String, Value>, ConfigError> {
        encode_map(&*self.handle.read(), path)
    }

    fn baseline(&self, path: &str) -> Result<Option<Map<String, Value>>, ConfigError> {
        let (Some(inject), Some(fresh)) = (self.injector, self.fresh.as_ref()) else {
            return Ok(None);
        };

        let mut instance = fresh();
        inject(&mut instance);
        encode_map(&instance, path).map(Some)
    }
}

fn encode_map<T: Serialize>(value: &T, path: &str) -> Result<Map<String, Value>, ConfigError> {
    let value = serde_json::to_value(value).map_err(|source| ConfigError::Encode {
        path: path.to_string(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(ConfigError::RootKind {
            path: path.to_string(),
            found: kind_name(&other),
        }),
    }
}
