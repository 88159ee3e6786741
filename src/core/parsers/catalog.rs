use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::translate::Translations;

/// JSON message catalog.
///
/// ```json
/// {
///   "messages": { "Users": "Benutzer" },
///   "domains": { "admin": { "Users": "Konten" } }
/// }
/// ```
///
/// Domain lookups fall back to the default table, then to the message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub messages: HashMap<String, String>,
    #[serde(default)]
    pub domains: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {:?}", path))
    }
}

impl Translations for Catalog {
    fn gettext(&self, message: &str) -> String {
        self.messages
            .get(message)
            .map_or(message, String::as_str)
            .to_string()
    }

    fn dgettext(&self, domain: &str, message: &str) -> String {
        match self.domains.get(domain).and_then(|table| table.get(message)) {
            Some(translation) => translation.clone(),
            None => self.gettext(message),
        }
    }
}
