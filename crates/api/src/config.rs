//! Service configuration, read from the environment at startup.

use std::net::SocketAddr;

use thiserror::Error;

use formwarden_core::PersonId;

pub const BIND_VAR: &str = "FORMWARDEN_BIND";
pub const KNOWN_PERSON_IDS_VAR: &str = "FORMWARDEN_KNOWN_PERSON_IDS";
pub const MAX_UPLOAD_BYTES_VAR: &str = "FORMWARDEN_MAX_UPLOAD_BYTES";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}=`{value}`: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Reference list for the person-existence lookup.
    pub known_person_ids: Vec<PersonId>,
    /// Request body cap for file uploads.
    pub max_upload_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            known_person_ids: (1..=5).map(PersonId::new).collect(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(BIND_VAR) {
            config.bind_addr = value
                .trim()
                .parse()
                .map_err(|e: std::net::AddrParseError| invalid(BIND_VAR, &value, e))?;
        }

        if let Some(value) = lookup(KNOWN_PERSON_IDS_VAR) {
            config.known_person_ids = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| s.parse::<PersonId>())
                .collect::<Result<_, _>>()
                .map_err(|e| invalid(KNOWN_PERSON_IDS_VAR, &value, e))?;
        }

        if let Some(value) = lookup(MAX_UPLOAD_BYTES_VAR) {
            config.max_upload_bytes = value
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| invalid(MAX_UPLOAD_BYTES_VAR, &value, e))?;
        }

        Ok(config)
    }
}

fn invalid(var: &'static str, value: &str, reason: impl core::fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
