//! Reader, writer and file wrappers around the load and save primitives

use crate::error::ConfigError;
use crate::tree::Node;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

impl Node {
    /// Read `reader` to the end and load it.
    pub fn load_reader<R: Read>(&mut self, mut reader: R) -> Result<(), ConfigError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.load_from_bytes(&bytes)
    }

    /// Save as compact JSON into `writer`.
    pub fn save_writer<W: Write>(&mut self, mut writer: W) -> Result<(), ConfigError> {
        let bytes = self.save_to_bytes()?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Load the configuration file at `path`.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        debug!(config_path = %path.display(), "Loading configuration file");
        let bytes = fs::read(path)?;
        self.load_from_bytes(&bytes)
    }

    /// Load `path`, or apply defaults everywhere if it does not exist.
    pub fn load_file_or_defaults(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!(
                config_path = %path.display(),
                "Configuration file not found, using defaults"
            );
            return self.load_from_bytes(&[]);
        }
        self.load_file(path)
    }

    /// Save to `path` as indented JSON with a trailing newline.
    ///
    /// Missing parent directories are created.
    pub fn save_file(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let mut bytes = self.save_to_bytes_pretty()?;
        bytes.push(b'\n');

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        debug!(config_path = %path.display(), bytes = bytes.len(), "Writing configuration file");
        fs::write(path, bytes)?;
        Ok(())
    }
}
