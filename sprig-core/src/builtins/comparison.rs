// sprig-core - Comparison built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Comparison operations: =, <, <=, >, >=

use std::cmp::Ordering;

use sprig_parser::SprigVal;

use crate::error::{Error, Result, check_arity};

/// (= a b) - Structural equality
pub(crate) fn builtin_eq(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 2)?;
    Ok(SprigVal::bool(args[0] == args[1]))
}

/// Order two values. Numbers order against numbers and strings against
/// strings; booleans cannot be ordered; any other pairing is unordered.
fn compare(args: &[SprigVal]) -> Result<Option<Ordering>> {
    check_arity(args, 2)?;
    match (&args[0], &args[1]) {
        (SprigVal::Number(a, _), SprigVal::Number(b, _)) => Ok(Some(a.cmp(b))),
        (SprigVal::String(a, _), SprigVal::String(b, _)) => Ok(Some(a.cmp(b))),
        (SprigVal::Bool(_, _), SprigVal::Bool(_, _)) => Err(Error::InvalidOperation.into()),
        _ => Ok(None),
    }
}

fn ordered(args: &[SprigVal], accept: impl Fn(Ordering) -> bool) -> Result<SprigVal> {
    Ok(SprigVal::bool(compare(args)?.is_some_and(accept)))
}

/// (< a b)
pub(crate) fn builtin_lt(args: &[SprigVal]) -> Result<SprigVal> {
    ordered(args, Ordering::is_lt)
}

/// (<= a b)
pub(crate) fn builtin_le(args: &[SprigVal]) -> Result<SprigVal> {
    ordered(args, Ordering::is_le)
}

/// (> a b)
pub(crate) fn builtin_gt(args: &[SprigVal]) -> Result<SprigVal> {
    ordered(args, Ordering::is_gt)
}

/// (>= a b)
pub(crate) fn builtin_ge(args: &[SprigVal]) -> Result<SprigVal> {
    ordered(args, Ordering::is_ge)
}
