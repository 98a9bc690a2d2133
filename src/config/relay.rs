use std::env::{self, VarError};

use anyhow::Context;

pub const CREDENTIAL_VAR: &str = "GEMINI_API_KEY";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";
pub const DEFAULT_PORT: u16 = 3000;

/// Settings for the relay process. The credential is not part of it: it is
/// looked up per request through a [`CredentialSource`](crate::actuators::translate::back::CredentialSource).
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub api_base: Box<str>,
    pub model: Box<str>,
    pub port: u16,
    pub credential_var: Box<str>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            model: DEFAULT_MODEL.into(),
            port: DEFAULT_PORT,
            credential_var: CREDENTIAL_VAR.into(),
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let api_base = optional_var("GEMINI_API_BASE")?.unwrap_or(defaults.api_base);
        let model = optional_var("GEMINI_MODEL")?.unwrap_or(defaults.model);
        let port = match optional_var("PORT")? {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT: {port}"))?,
            None => defaults.port,
        };

        Ok(Self {
            api_base,
            model,
            port,
            credential_var: defaults.credential_var,
        })
    }
}

fn optional_var(name: &str) -> anyhow::Result<Option<Box<str>>> {
    match env::var(name) {
        Ok(value) => {
            let value = value.trim();
            Ok((!value.is_empty()).then(|| value.into()))
        }
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(err).with_context(|| format!("Failed to read {name}")),
    }
}
