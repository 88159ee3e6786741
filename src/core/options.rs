//! Selection rules shared by the translator and the extractor.

use std::collections::HashSet;

use crate::core::stream::{Attrs, QName, XHTML_NAMESPACE};

/// Attribute names whose literal values are localized by default.
pub const DEFAULT_INCLUDE_ATTRS: [&str; 7] =
    ["abbr", "alt", "label", "prompt", "standby", "summary", "title"];

/// Tags whose subtrees are never localized by default, in both the bare and
/// the XHTML-namespaced form.
pub fn default_ignore_tags() -> Vec<String> {
    ["script", "style"]
        .iter()
        .flat_map(|tag| [tag.to_string(), format!("{{{}}}{}", XHTML_NAMESPACE, tag)])
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub ignore_tags: HashSet<QName>,
    pub include_attrs: HashSet<String>,
    /// When false only explicit function calls and `msg` regions are
    /// considered; free text and literal attributes are left alone.
    pub extract_text: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            ignore_tags: default_ignore_tags().iter().map(|t| QName::new(t)).collect(),
            include_attrs: DEFAULT_INCLUDE_ATTRS.iter().map(|a| a.to_string()).collect(),
            extract_text: true,
        }
    }
}

impl Options {
    /// Whether an element opens a skip scope: its tag is ignored, or it
    /// declares a literal `xml:lang` (content already in its own language).
    pub fn skips(&self, tag: &QName, attrs: &Attrs) -> bool {
        self.ignore_tags.contains(tag) || attrs.get_text(&QName::xml_lang()).is_some()
    }

    /// Whether a literal attribute value is localizable.
    ///
    /// Only un-namespaced attributes match the include set.
    pub fn includes_attr(&self, name: &QName) -> bool {
        name.namespace().is_none() && self.include_attrs.contains(name.local())
    }
}
