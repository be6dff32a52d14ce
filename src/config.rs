//! Codec configuration
//!
//! Limits applied while decoding untrusted member descriptors. Every
//! field has a default, so a partial TOML document is enough.

use crate::error::CodecResult;
use serde::{Deserialize, Serialize};

/// Decode limits for descriptor payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Maximum byte length of a single string (uuid, host, attribute key)
    pub max_string_len: usize,
    /// Maximum number of role ids in one descriptor
    pub max_roles: usize,
    /// Maximum number of attributes in one descriptor
    pub max_attributes: usize,
    /// Maximum byte length of one encoded attribute value
    pub max_object_len: usize,
    /// Maximum list nesting inside one attribute value
    pub max_value_depth: usize,
    /// Maximum number of descriptors in one member list
    pub max_members: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_string_len: 1024 * 1024, // 1MB
            max_roles: 64,
            max_attributes: 4096,
            max_object_len: 16 * 1024 * 1024, // 16MB
            max_value_depth: 32,
            max_members: 65536,
        }
    }
}

impl CodecConfig {
    /// Parse a configuration from a TOML document
    pub fn from_toml_str(content: &str) -> CodecResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> CodecResult<String> {
        toml::to_string_pretty(self).map_err(|e| crate::error::CodecError::Config(e.to_string()))
    }
}
