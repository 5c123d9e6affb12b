// sprig-core - Special forms
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Special forms: def, defn, defmacro, fn, if, let, do, quote, macroexpand.
//!
//! Each form receives the whole call form (head included). Forms whose
//! result is in tail position return a [`Step::TailCall`] so the evaluator
//! loops instead of recursing.

use im::Vector;
use sprig_parser::{SprigVal, Symbol};

use super::apply::make_closure;
use super::{Step, eval, macroexpand};
use crate::env::Env;
use crate::error::{Error, Result};

// ============================================================================
// Definitions
// ============================================================================

/// (def name expr)
pub(crate) fn eval_def(items: &Vector<SprigVal>, env: &Env) -> Result<SprigVal> {
    if items.len() != 3 {
        return Err(Error::ArityMismatch.into());
    }
    let name = expect_symbol(&items[1])?;
    let val = eval(&items[2], env)?;
    env.define(name, val.clone());
    Ok(val)
}

/// (defn name [params] body...) and (defmacro name [params] body...)
pub(crate) fn eval_defn(items: &Vector<SprigVal>, env: &Env, is_macro: bool) -> Result<SprigVal> {
    if items.len() < 4 {
        return Err(Error::ArityMismatch.into());
    }
    let name = expect_symbol(&items[1])?;
    let (params, rest) = parse_params(&items[2])?;
    let body = implicit_do(items.iter().skip(3).cloned().collect());
    let func = make_closure(Some(name.name()), params, rest, body, env, is_macro);
    env.define(name, func.clone());
    Ok(func)
}

/// (fn [params] body...)
pub(crate) fn eval_fn(items: &Vector<SprigVal>, env: &Env) -> Result<SprigVal> {
    if items.len() < 3 {
        return Err(Error::ArityMismatch.into());
    }
    let (params, rest) = parse_params(&items[1])?;
    let body = implicit_do(items.iter().skip(2).cloned().collect());
    Ok(make_closure(None, params, rest, body, env, false))
}

/// Split a parameter list into positional parameters and the rest
/// parameter following `&`.
pub(crate) fn parse_params(form: &SprigVal) -> Result<(Vec<Symbol>, Option<Symbol>)> {
    let items = form.as_seq().ok_or(Error::ExpectedBindingList)?;
    let mut params = Vec::with_capacity(items.len());
    let mut iter = items.iter();

    while let Some(item) = iter.next() {
        let sym = expect_symbol(item)?;
        if sym.is_rest_marker() {
            // Exactly one symbol after &
            let rest = match (iter.next(), iter.next()) {
                (Some(SprigVal::Symbol(rest, _)), None) if !rest.is_rest_marker() => rest.clone(),
                _ => return Err(Error::ExpectedBindingList.into()),
            };
            return Ok((params, Some(rest)));
        }
        params.push(sym);
    }
    Ok((params, None))
}

// ============================================================================
// Control flow
// ============================================================================

/// (if test then else?)
pub(crate) fn eval_if(items: &Vector<SprigVal>, env: &Env) -> Result<Step> {
    if items.len() != 3 && items.len() != 4 {
        return Err(Error::ArityMismatch.into());
    }
    let branch = if eval(&items[1], env)?.is_truthy() {
        items[2].clone()
    } else {
        items.get(3).cloned().unwrap_or(SprigVal::NIL)
    };
    Ok(Step::TailCall(branch, env.clone()))
}

/// (do forms...)
pub(crate) fn eval_do(items: &Vector<SprigVal>, env: &Env) -> Result<Step> {
    let Some(last) = items.back().filter(|_| items.len() > 1) else {
        return Ok(Step::Return(SprigVal::NIL));
    };
    for form in items.iter().skip(1).take(items.len() - 2) {
        eval(form, env)?;
    }
    Ok(Step::TailCall(last.clone(), env.clone()))
}

/// (let [name expr ...] body...)
pub(crate) fn eval_let(items: &Vector<SprigVal>, env: &Env) -> Result<Step> {
    if items.len() < 2 {
        return Err(Error::ArityMismatch.into());
    }
    let bindings = items[1].as_seq().ok_or(Error::ExpectedBindingList)?;
    if bindings.len() % 2 != 0 {
        return Err(Error::ExpectedBindingList.into());
    }

    let let_env = env.child();
    let mut iter = bindings.iter();
    while let (Some(target), Some(expr)) = (iter.next(), iter.next()) {
        let name = expect_symbol(target)?;
        // Each binding sees the ones before it
        let val = eval(expr, &let_env)?;
        let_env.define(name, val);
    }

    let body = implicit_do(items.iter().skip(2).cloned().collect());
    Ok(Step::TailCall(body, let_env))
}

// ============================================================================
// Quoting
// ============================================================================

/// (quote form)
pub(crate) fn eval_quote(items: &Vector<SprigVal>) -> Result<SprigVal> {
    if items.len() != 2 {
        return Err(Error::ArityMismatch.into());
    }
    Ok(items[1].clone())
}

/// (macroexpand form)
pub(crate) fn eval_macroexpand(items: &Vector<SprigVal>, env: &Env) -> Result<SprigVal> {
    if items.len() < 2 {
        return Err(Error::ArityMismatch.into());
    }
    macroexpand(&items[1], env)
}

// ============================================================================
// Helpers
// ============================================================================

/// Body forms as a single expression: nil, the form itself, or `(do ...)`.
pub(crate) fn implicit_do(mut forms: Vec<SprigVal>) -> SprigVal {
    match forms.len() {
        0 => SprigVal::NIL,
        1 => forms.remove(0),
        _ => SprigVal::list(std::iter::once(SprigVal::symbol("do")).chain(forms)),
    }
}

fn expect_symbol(val: &SprigVal) -> Result<Symbol> {
    val.as_symbol()
        .cloned()
        .ok_or_else(|| Error::SymbolExpected.into())
}
