//! Translation lookup providers.

use std::{fmt, sync::Arc};

use crate::core::{
    directives::DEFAULT_DOMAIN,
    error::{I18nError, Result},
};

/// A message catalog that can look up translations.
///
/// Providers without domain support keep the default `dgettext`, which
/// ignores the domain.
pub trait Translations: Send + Sync {
    fn gettext(&self, message: &str) -> String;

    fn dgettext(&self, domain: &str, message: &str) -> String {
        let _ = domain;
        self.gettext(message)
    }
}

/// Returns every message unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTranslations;

impl Translations for NullTranslations {
    fn gettext(&self, message: &str) -> String {
        message.to_string()
    }
}

type GettextFn = dyn Fn(&str) -> String + Send + Sync;

/// The translation function handed to the translator: either a plain
/// function, or a [`Translations`] provider.
#[derive(Clone)]
pub enum Gettext {
    Function(Arc<GettextFn>),
    Translations(Arc<dyn Translations>),
}

impl Default for Gettext {
    fn default() -> Self {
        Gettext::Translations(Arc::new(NullTranslations))
    }
}

impl fmt::Debug for Gettext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gettext::Function(_) => f.write_str("Gettext::Function(..)"),
            Gettext::Translations(_) => f.write_str("Gettext::Translations(..)"),
        }
    }
}

impl Gettext {
    pub fn function(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Gettext::Function(Arc::new(f))
    }

    pub fn translations(translations: impl Translations + 'static) -> Self {
        Gettext::Translations(Arc::new(translations))
    }

    pub fn gettext(&self, message: &str) -> String {
        match self {
            Gettext::Function(f) => f(message),
            Gettext::Translations(t) => t.gettext(message),
        }
    }

    /// Look up `message` in `domain`.
    ///
    /// A plain function has no notion of domains, so this fails with
    /// [`I18nError::DomainUnsupported`] for function-based lookups.
    pub fn dgettext(&self, domain: &str, message: &str) -> Result<String> {
        match self {
            Gettext::Function(_) => Err(I18nError::DomainUnsupported {
                domain: domain.to_string(),
            }),
            Gettext::Translations(t) => Ok(t.dgettext(domain, message)),
        }
    }

    /// Look up `message` in the active domain, if any.
    ///
    /// [`DEFAULT_DOMAIN`] selects the plain lookup.
    pub fn lookup(&self, domain: Option<&str>, message: &str) -> Result<String> {
        match domain {
            Some(domain) if domain != DEFAULT_DOMAIN => self.dgettext(domain, message),
            _ => Ok(self.gettext(message)),
        }
    }
}
