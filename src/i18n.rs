// Message catalog lookup
// Flat key -> message map, embedded at build time. Unknown keys fall back
// to the key text so a missing translation never breaks a screen.

use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

/// English catalog shipped with the binary
const EN_CATALOG: &str = include_str!("../locales/en.json");

/// Errors from catalog loading
#[derive(Error, Debug)]
pub enum I18nError {
    /// The catalog text is not a valid flat JSON string map
    #[error("Invalid message catalog: {0}")]
    Catalog(#[from] serde_json::Error),
}

/// Translation function handed to every screen by the composition layer
pub struct Translator {
    messages: HashMap<String, String>,
}

impl Translator {
    /// Parse a catalog from JSON text (flat object of string values)
    pub fn from_catalog(json: &str) -> Result<Self, I18nError> {
        let messages: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self { messages })
    }

    /// Load the embedded English catalog
    pub fn english() -> Result<Self, I18nError> {
        Self::from_catalog(EN_CATALOG)
    }

    /// Look up a message by key
    /// Unknown keys return the key itself
    pub fn t(&self, key: &str) -> String {
        match self.messages.get(key) {
            Some(message) => message.clone(),
            None => {
                warn!(key, "missing message key");
                key.to_string()
            }
        }
    }

    /// Look up a message and fill `$1`, `$2`, ... positional slots
    pub fn t_sub(&self, key: &str, substitutions: &[&str]) -> String {
        let mut message = self.t(key);
        for (i, value) in substitutions.iter().enumerate() {
            message = message.replace(&format!("${}", i + 1), value);
        }
        message
    }
}
