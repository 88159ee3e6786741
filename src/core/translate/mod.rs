//! Stream translation.
//!
//! - `gettext`: translation providers
//! - `translator`: translates free text and attributes of a stream
//! - `expand`: executes `msg`, `domain` and `comment` directives

pub mod expand;
pub mod gettext;
pub mod translator;

pub use expand::{Expansion, expand};
pub use gettext::{Gettext, NullTranslations, Translations};
pub use translator::{Translation, Translator};

#[cfg(test)]
mod tests;
