//! Embedded expressions carried by `Expr` and `Exec` events.
//!
//! The engine never evaluates these. It only needs two things from them:
//! replaying the exact value that was captured, and walking the syntax tree
//! to find calls to translation functions. Sources are parsed once with swc
//! as an ECMAScript script, so both single expressions (`_("Hello")`) and
//! statement blocks are accepted.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use swc_common::{FileName, GLOBALS, Globals, SourceMap};
use swc_ecma_ast::Script;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax};

use crate::core::error::{I18nError, Result};

/// A parsed embedded expression or code block.
///
/// Cloning shares the parsed tree. Equality compares the source text, since
/// two events carrying the same source are interchangeable for replay.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code {
    source: String,
    script: Arc<Script>,
}

impl Code {
    /// Parse embedded code.
    ///
    /// Sources that are not valid statements on their own (an object literal
    /// like `{a: 1, b: 2}`) are retried as a parenthesized expression.
    pub fn parse(source: &str) -> Result<Self> {
        let script = match parse_script(source) {
            Ok(script) => script,
            Err(reason) => parse_script(&format!("({})", source)).map_err(|_| {
                I18nError::InvalidCode {
                    code: source.to_string(),
                    reason,
                }
            })?,
        };

        Ok(Self {
            source: source.to_string(),
            script: Arc::new(script),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed syntax tree, for visitors.
    pub fn script(&self) -> &Script {
        &self.script
    }
}

fn parse_script(source: &str) -> std::result::Result<Script, String> {
    GLOBALS.set(&Globals::new(), || {
        let source_map = SourceMap::default();
        let source_file = source_map.new_source_file(FileName::Anon.into(), source.to_string());

        let syntax = Syntax::Es(EsSyntax::default());
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        parser.parse_script().map_err(|e| format!("{:?}", e.kind()))
    })
}

impl PartialEq for Code {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Code {}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Code").field(&self.source).finish()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl TryFrom<String> for Code {
    type Error = I18nError;

    fn try_from(source: String) -> Result<Self> {
        Self::parse(&source)
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.source
    }
}
