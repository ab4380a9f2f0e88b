//! Payload types shared by the integration tests

use cfgtree::Defaults;
use serde::{Deserialize, Serialize};

/// Two-field payload whose defaults are easy to tell from loaded values.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Limits {
    pub root: i64,
    pub root_extra: i64,
}

impl Defaults for Limits {
    fn set_defaults(&mut self) {
        self.root = 9999;
        self.root_extra = 1024;
    }
}

impl Limits {
    pub fn new(root: i64, root_extra: i64) -> Self {
        Self { root, root_extra }
    }
}

/// Payload without a Default Injector.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plain {
    pub x: i64,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub host: String,
    pub port: u16,
    #[serde(rename = "Passwd")]
    pub password: String,
    pub pool: Pool,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub max_connections: u32,
    pub idle_timeout_secs: u64,
}

impl Defaults for Database {
    fn set_defaults(&mut self) {
        self.host = "localhost".to_string();
        self.port = 5000;
        self.password = String::new();
        self.pool = Pool {
            max_connections: 16,
            idle_timeout_secs: 300,
        };
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Backend {
    Memory { capacity: u32 },
    Disk { path: String },
}

impl Default for Backend {
    fn default() -> Self {
        Backend::Memory { capacity: 0 }
    }
}

/// Payload with a data-carrying enum and runtime state kept out of the document.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub backend: Backend,
    pub retries: u32,
    #[serde(skip)]
    pub runtime_handle: u64,
}

impl Defaults for Store {
    fn set_defaults(&mut self) {
        self.backend = Backend::Memory { capacity: 64 };
        self.retries = 3;
    }
}
