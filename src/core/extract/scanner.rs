//! Finds gettext-style calls inside embedded expressions.

use log::debug;
use swc_ecma_ast::{CallExpr, Callee, Expr, ExprOrSpread, Lit};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::{code::Code, extract::Message};

/// Function names treated as translation calls by default.
pub const GETTEXT_FUNCTIONS: [&str; 7] = [
    "_",
    "gettext",
    "ngettext",
    "dgettext",
    "dngettext",
    "ugettext",
    "ungettext",
];

/// Collect `(function, message)` for every call to one of `functions` in
/// `code`, in source order.
///
/// Each argument slot is its literal text, or `None` when the argument is
/// not a plain string. A call with exactly one argument yields
/// [`Message::Single`]; any other arity yields [`Message::Multiple`] so the
/// argument positions are kept.
pub fn scan(code: &Code, functions: &[String]) -> Vec<(String, Message)> {
    let mut scanner = CallScanner {
        functions,
        found: Vec::new(),
    };
    code.script().visit_with(&mut scanner);
    scanner.found
}

struct CallScanner<'a> {
    functions: &'a [String],
    found: Vec<(String, Message)>,
}

impl Visit for CallScanner<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Callee::Expr(callee) = &node.callee
            && let Expr::Ident(ident) = &**callee
            && self.functions.iter().any(|f| f == ident.sym.as_str())
        {
            let mut slots: Vec<Option<String>> = node.args.iter().map(literal_text).collect();
            let message = if slots.len() == 1 {
                Message::Single(slots.remove(0))
            } else {
                Message::Multiple(slots)
            };
            debug!("found call to `{}`: {}", ident.sym, message);
            self.found.push((ident.sym.to_string(), message));
            // Arguments of a matched call are not searched further.
            return;
        }

        node.visit_children_with(self);
    }
}

/// Text of a string argument; spreads and computed values are unknown.
fn literal_text(arg: &ExprOrSpread) -> Option<String> {
    if arg.spread.is_some() {
        return None;
    }
    match &*arg.expr {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(String::from),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|quasi| quasi.cooked.as_ref())
            .and_then(|cooked| cooked.as_str())
            .map(String::from),
        _ => None,
    }
}
