//! cfgtree: Decentralized JSON Configuration Trees
//!
//! Components own their configuration types and register them under a name in
//! a shared tree; one JSON document populates every registered payload.
//! Payloads that implement [`Defaults`] start from deterministic baselines on
//! every load, and saving leaves out any field still equal to its default, so
//! configuration files only hold what a user actually changed.
//!
//! ```
//! use cfgtree::{shared, Binding, Defaults, Node};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Default, Serialize, Deserialize)]
//! struct Database {
//!     host: String,
//!     port: u16,
//! }
//!
//! impl Defaults for Database {
//!     fn set_defaults(&mut self) {
//!         self.host = "localhost".to_string();
//!         self.port = 5432;
//!     }
//! }
//!
//! let database = shared(Database::default());
//! let mut root = Node::structural();
//! root.add_child("db", Binding::defaulted(database.clone())).unwrap();
//!
//! root.load_from_bytes(br#"{"db": {"port": 6000}}"#).unwrap();
//! assert_eq!(database.read().host, "localhost");
//! assert_eq!(database.read().port, 6000);
//!
//! database.write().port = 5432;
//! assert_eq!(root.save_to_bytes().unwrap(), b"{}");
//! ```

pub mod error;
pub mod global;
pub mod io;
pub mod logging;
pub mod payload;
pub mod tree;

pub use error::ConfigError;
pub use payload::{shared, Binding, Defaults, Payload, Shared};
pub use tree::Node;
