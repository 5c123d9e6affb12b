// sprig-core - Type predicates and constructors
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Type predicates: nil?, true?, false?, symbol?, keyword?, string?,
//! number?, fn?, macro?, plus not and the symbol/keyword constructors.

use sprig_parser::SprigVal;

use crate::error::{Error, Result, check_arity};

fn predicate(args: &[SprigVal], test: impl Fn(&SprigVal) -> bool) -> Result<SprigVal> {
    check_arity(args, 1)?;
    Ok(SprigVal::bool(test(&args[0])))
}

/// (nil? x)
pub(crate) fn builtin_nil_p(args: &[SprigVal]) -> Result<SprigVal> {
    predicate(args, SprigVal::is_nil)
}

/// (true? x)
pub(crate) fn builtin_true_p(args: &[SprigVal]) -> Result<SprigVal> {
    predicate(args, |v| matches!(v, SprigVal::Bool(true, _)))
}

/// (false? x)
pub(crate) fn builtin_false_p(args: &[SprigVal]) -> Result<SprigVal> {
    predicate(args, |v| matches!(v, SprigVal::Bool(false, _)))
}

/// (symbol? x)
pub(crate) fn builtin_symbol_p(args: &[SprigVal]) -> Result<SprigVal> {
    predicate(args, |v| matches!(v, SprigVal::Symbol(..)))
}

/// (keyword? x)
pub(crate) fn builtin_keyword_p(args: &[SprigVal]) -> Result<SprigVal> {
    predicate(args, |v| matches!(v, SprigVal::Keyword(_, _)))
}

/// (string? x)
pub(crate) fn builtin_string_p(args: &[SprigVal]) -> Result<SprigVal> {
    predicate(args, |v| matches!(v, SprigVal::String(..)))
}

/// (number? x)
pub(crate) fn builtin_number_p(args: &[SprigVal]) -> Result<SprigVal> {
    predicate(args, |v| matches!(v, SprigVal::Number(_, _)))
}

/// (fn? x) - True for functions that are not macros
pub(crate) fn builtin_fn_p(args: &[SprigVal]) -> Result<SprigVal> {
    predicate(args, |v| v.as_function().is_some_and(|f| !f.is_macro))
}

/// (macro? x)
pub(crate) fn builtin_macro_p(args: &[SprigVal]) -> Result<SprigVal> {
    predicate(args, |v| v.as_function().is_some_and(|f| f.is_macro))
}

/// (not x)
pub(crate) fn builtin_not(args: &[SprigVal]) -> Result<SprigVal> {
    predicate(args, |v| !v.is_truthy())
}

/// (symbol name) - Symbol from a string
pub(crate) fn builtin_symbol(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    match &args[0] {
        SprigVal::String(name, _) => Ok(SprigVal::symbol(name)),
        SprigVal::Symbol(..) => Ok(args[0].clone()),
        _ => Err(Error::InvalidOperation.into()),
    }
}

/// (keyword name) - Keyword from a string; keywords pass through
pub(crate) fn builtin_keyword(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    match &args[0] {
        SprigVal::String(name, _) => Ok(SprigVal::keyword(name)),
        SprigVal::Keyword(_, _) => Ok(args[0].clone()),
        _ => Err(Error::InvalidOperation.into()),
    }
}
