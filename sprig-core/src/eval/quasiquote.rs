// sprig-core - Quasiquote expansion
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Rewrites a quasiquoted template into `cons`/`concat`/`quote` calls.
//!
//! The rewritten form is handed back to the evaluator, so unquoted parts
//! evaluate under the ordinary rules afterwards.

use sprig_parser::SprigVal;

use crate::error::{Error, Result};

/// Expand the body of a `(quasiquote form)`.
///
/// ```text
/// `x          => (quote x)
/// `~x         => x
/// `(~@xs . r) => (concat xs `r)
/// `(h . r)    => (cons `h `r)
/// ```
pub fn quasiquote(ast: &SprigVal) -> Result<SprigVal> {
    let Some(items) = ast.as_seq().filter(|items| !items.is_empty()) else {
        return Ok(SprigVal::list([SprigVal::symbol("quote"), ast.clone()]));
    };

    let head = &items[0];
    if head.is_symbol_named("unquote") {
        return items.get(1).cloned().ok_or_else(|| Error::ArityMismatch.into());
    }

    let rest = SprigVal::list(items.iter().skip(1).cloned());

    if let Some(spliced) = splice_target(head)? {
        return Ok(SprigVal::list([
            SprigVal::symbol("concat"),
            spliced,
            quasiquote(&rest)?,
        ]));
    }

    Ok(SprigVal::list([
        SprigVal::symbol("cons"),
        quasiquote(head)?,
        quasiquote(&rest)?,
    ]))
}

/// The expression inside `(splice-unquote expr)`, if `form` is one.
fn splice_target(form: &SprigVal) -> Result<Option<SprigVal>> {
    match form.as_seq() {
        Some(items) if items.front().is_some_and(|h| h.is_symbol_named("splice-unquote")) => items
            .get(1)
            .cloned()
            .map(Some)
            .ok_or_else(|| Error::ArityMismatch.into()),
        _ => Ok(None),
    }
}
