//! Markup event stream data model.
//!
//! A stream is a flat sequence of [`Event`]s produced by a template
//! compiler: element open/close, text, embedded expressions, and `Sub`
//! events that wrap a nested substream together with the directives
//! attached to it. Streams round-trip through JSON so they can be stored
//! as `*.stream.json` files.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{code::Code, directives::Directive};

/// Namespace URI of the `xml:` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Namespace URI of the i18n directives.
pub const I18N_NAMESPACE: &str = "http://genshi.edgewall.org/i18n";

/// Namespace URI of XHTML.
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Qualified element or attribute name.
///
/// Written as `{namespace}local` when namespaced, or as a bare local name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct QName {
    namespace: Option<String>,
    local: String,
}

impl QName {
    /// Parse a `{namespace}local` or bare `local` name.
    ///
    /// The opening brace is optional, so `http://ns}local` is also accepted.
    pub fn new(qname: &str) -> Self {
        let qname = qname.strip_prefix('{').unwrap_or(qname);
        match qname.split_once('}') {
            Some((namespace, local)) => Self::namespaced(namespace, local),
            None => Self {
                namespace: None,
                local: qname.to_string(),
            },
        }
    }

    pub fn namespaced(namespace: &str, local: &str) -> Self {
        Self {
            namespace: Some(namespace.to_string()),
            local: local.to_string(),
        }
    }

    /// The `xml:lang` attribute name.
    pub fn xml_lang() -> Self {
        Self::namespaced(XML_NAMESPACE, "lang")
    }

    /// A name in the i18n directive namespace.
    pub fn i18n(local: &str) -> Self {
        Self::namespaced(I18N_NAMESPACE, local)
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn local(&self) -> &str {
        &self.local
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{{{}}}{}", namespace, self.local),
            None => f.write_str(&self.local),
        }
    }
}

impl From<&str> for QName {
    fn from(qname: &str) -> Self {
        Self::new(qname)
    }
}

impl From<String> for QName {
    fn from(qname: String) -> Self {
        Self::new(&qname)
    }
}

impl From<QName> for String {
    fn from(qname: QName) -> Self {
        qname.to_string()
    }
}

/// Source position of an event.
///
/// `Pos::default()` (line 0) marks events synthesized during translation,
/// which have no place in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pos {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default)]
    pub line: usize,
    #[serde(default)]
    pub column: usize,
}

impl Pos {
    pub fn at_line(line: usize) -> Self {
        Self {
            filename: None,
            line,
            column: 0,
        }
    }
}

/// Attribute value: literal text, or a substream when the value embeds
/// expressions (`title="Hello ${name}"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Text(String),
    Stream(Vec<Event>),
}

impl AttrValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(text) => Some(text),
            AttrValue::Stream(_) => None,
        }
    }
}

/// Ordered attribute list of a start tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attrs(Vec<(QName, AttrValue)>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &QName) -> Option<&AttrValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Literal text of an attribute, `None` if absent or expression-valued.
    pub fn get_text(&self, name: &QName) -> Option<&str> {
        self.get(name).and_then(AttrValue::as_text)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(QName, AttrValue)> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (QName, AttrValue)> {
        self.0.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(QName, AttrValue)> for Attrs {
    fn from_iter<T: IntoIterator<Item = (QName, AttrValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Attrs {
    type Item = (QName, AttrValue);
    type IntoIter = std::vec::IntoIter<(QName, AttrValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A single markup stream event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    Start {
        tag: QName,
        #[serde(default, skip_serializing_if = "Attrs::is_empty")]
        attrs: Attrs,
        #[serde(default)]
        pos: Pos,
    },
    End {
        tag: QName,
        #[serde(default)]
        pos: Pos,
    },
    Text {
        text: String,
        #[serde(default)]
        pos: Pos,
    },
    /// Embedded expression, evaluated by the template engine at render time.
    Expr {
        code: Code,
        #[serde(default)]
        pos: Pos,
    },
    /// Embedded code block.
    Exec {
        code: Code,
        #[serde(default)]
        pos: Pos,
    },
    /// Substream with the directives that apply to it, in evaluation order.
    Sub {
        directives: Vec<Directive>,
        stream: Vec<Event>,
        #[serde(default)]
        pos: Pos,
    },
    StartNs {
        #[serde(default)]
        prefix: String,
        uri: String,
        #[serde(default)]
        pos: Pos,
    },
    EndNs {
        #[serde(default)]
        prefix: String,
        #[serde(default)]
        pos: Pos,
    },
    Comment {
        text: String,
        #[serde(default)]
        pos: Pos,
    },
    Pi {
        target: String,
        #[serde(default)]
        data: String,
        #[serde(default)]
        pos: Pos,
    },
    Doctype {
        name: String,
        #[serde(default)]
        pos: Pos,
    },
}

impl Event {
    pub fn start(tag: impl Into<QName>, attrs: Attrs, pos: Pos) -> Self {
        Event::Start {
            tag: tag.into(),
            attrs,
            pos,
        }
    }

    pub fn end(tag: impl Into<QName>, pos: Pos) -> Self {
        Event::End {
            tag: tag.into(),
            pos,
        }
    }

    pub fn text(text: impl Into<String>, pos: Pos) -> Self {
        Event::Text {
            text: text.into(),
            pos,
        }
    }

    pub fn pos(&self) -> &Pos {
        match self {
            Event::Start { pos, .. }
            | Event::End { pos, .. }
            | Event::Text { pos, .. }
            | Event::Expr { pos, .. }
            | Event::Exec { pos, .. }
            | Event::Sub { pos, .. }
            | Event::StartNs { pos, .. }
            | Event::EndNs { pos, .. }
            | Event::Comment { pos, .. }
            | Event::Pi { pos, .. }
            | Event::Doctype { pos, .. } => pos,
        }
    }

    pub fn pos_mut(&mut self) -> &mut Pos {
        match self {
            Event::Start { pos, .. }
            | Event::End { pos, .. }
            | Event::Text { pos, .. }
            | Event::Expr { pos, .. }
            | Event::Exec { pos, .. }
            | Event::Sub { pos, .. }
            | Event::StartNs { pos, .. }
            | Event::EndNs { pos, .. }
            | Event::Comment { pos, .. }
            | Event::Pi { pos, .. }
            | Event::Doctype { pos, .. } => pos,
        }
    }

    pub fn line(&self) -> usize {
        self.pos().line
    }
}
