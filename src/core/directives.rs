//! Template directives attached to `Sub` events.
//!
//! Only the i18n directives are interpreted here. Every other directive
//! (loops, conditionals, attribute rewriting) belongs to the template engine
//! and is carried through untouched as [`Directive::Foreign`].

use serde::{Deserialize, Serialize};

use crate::core::{
    code::Code,
    error::{I18nError, Result},
};

/// Domain name used by an empty `i18n:domain` value.
pub const DEFAULT_DOMAIN: &str = "__DEFAULT__";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDirective", into = "RawDirective")]
pub enum Directive {
    /// `i18n:comment` - a note for translators.
    Comment(String),
    /// `i18n:domain` - translate the region from another catalog.
    Domain(String),
    /// `i18n:msg` - the region is one message; expressions inside bind to
    /// these parameter names in order.
    Msg { params: Vec<String> },
    /// `i18n:choose` - plural message; `numeral` selects the form.
    Choose { numeral: Code, params: Vec<String> },
    /// `i18n:singular` inside a `choose`.
    Singular,
    /// `i18n:plural` inside a `choose`.
    Plural,
    /// Any directive owned by the template engine.
    Foreign { name: String, value: String },
}

impl Directive {
    /// Build a directive from its attribute name and raw value.
    ///
    /// i18n directives may be named with or without the `i18n:` prefix.
    pub fn attach(name: &str, value: &str) -> Result<Self> {
        let local = name.strip_prefix("i18n:").unwrap_or(name);
        let directive = match local {
            "comment" => Directive::Comment(value.to_string()),
            "domain" => {
                let domain = value.trim();
                Directive::Domain(if domain.is_empty() {
                    DEFAULT_DOMAIN.to_string()
                } else {
                    domain.to_string()
                })
            }
            "msg" => Directive::Msg {
                params: parse_params(value),
            },
            "choose" => {
                let (numeral, params) = value.split_once(';').unwrap_or((value, ""));
                let numeral = numeral.trim();
                if numeral.is_empty() {
                    return Err(I18nError::InvalidDirective {
                        name: name.to_string(),
                        reason: "a numeral expression is required".to_string(),
                    });
                }
                Directive::Choose {
                    numeral: Code::parse(numeral)?,
                    params: parse_params(params),
                }
            }
            "singular" => Directive::Singular,
            "plural" => Directive::Plural,
            _ => Directive::Foreign {
                name: name.to_string(),
                value: value.to_string(),
            },
        };
        Ok(directive)
    }

    /// Directive name as written in templates.
    pub fn name(&self) -> &str {
        match self {
            Directive::Comment(_) => "i18n:comment",
            Directive::Domain(_) => "i18n:domain",
            Directive::Msg { .. } => "i18n:msg",
            Directive::Choose { .. } => "i18n:choose",
            Directive::Singular => "i18n:singular",
            Directive::Plural => "i18n:plural",
            Directive::Foreign { name, .. } => name,
        }
    }

    /// Whether the directive produces its own extraction entry, so text
    /// inside its region must not be extracted or translated on its own.
    pub fn is_message(&self) -> bool {
        matches!(self, Directive::Msg { .. } | Directive::Choose { .. })
    }

    /// Whether the directive is interpreted by this crate.
    pub fn is_i18n(&self) -> bool {
        !matches!(self, Directive::Foreign { .. })
    }
}

/// Split a comma-separated parameter list, dropping blank names.
pub fn parse_params(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Serialized form of a directive: `{"name": "i18n:msg", "value": "a, b"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawDirective {
    name: String,
    #[serde(default)]
    value: String,
}

impl TryFrom<RawDirective> for Directive {
    type Error = I18nError;

    fn try_from(raw: RawDirective) -> Result<Self> {
        Directive::attach(&raw.name, &raw.value)
    }
}

impl From<Directive> for RawDirective {
    fn from(directive: Directive) -> Self {
        let name = directive.name().to_string();
        let value = match directive {
            Directive::Comment(comment) => comment,
            Directive::Domain(domain) => domain,
            Directive::Msg { params } => params.join(", "),
            Directive::Choose { numeral, params } => {
                format!("{}; {}", numeral.source(), params.join(", "))
            }
            Directive::Singular | Directive::Plural => String::new(),
            Directive::Foreign { value, .. } => value,
        };
        RawDirective { name, value }
    }
}
