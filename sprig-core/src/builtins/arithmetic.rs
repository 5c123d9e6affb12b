// sprig-core - Arithmetic built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Arithmetic operations: +, -, *, /
//!
//! ## Integer Overflow Behaviour
//!
//! Numbers are 64-bit signed integers. All operations are checked: overflow
//! fails with `IntegerOverflow` and division by zero with `DivideByZero`.
//! Each operator folds left over its arguments.

use sprig_parser::SprigVal;

use crate::error::{Error, Exception, Result, check_arity_at_least};

use super::expect_number;

/// Fold `op` left over the numeric arguments, starting from `init`.
fn fold(
    init: i64,
    args: &[SprigVal],
    op: impl Fn(i64, i64) -> std::result::Result<i64, Exception>,
) -> Result<SprigVal> {
    let mut acc = init;
    for arg in args {
        acc = op(acc, expect_number(arg)?)?;
    }
    Ok(SprigVal::number(acc))
}

fn overflow() -> Exception {
    Error::IntegerOverflow.into()
}

/// (+ x ...) - Sum, 0 with no arguments
pub(crate) fn builtin_add(args: &[SprigVal]) -> Result<SprigVal> {
    fold(0, args, |a, b| a.checked_add(b).ok_or_else(overflow))
}

/// (* x ...) - Product, 1 with no arguments
pub(crate) fn builtin_mul(args: &[SprigVal]) -> Result<SprigVal> {
    fold(1, args, |a, b| a.checked_mul(b).ok_or_else(overflow))
}

/// (- x y ...) - Subtract the rest from the first; (- x) negates
pub(crate) fn builtin_sub(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity_at_least(args, 1)?;
    let first = expect_number(&args[0])?;
    if args.len() == 1 {
        return first.checked_neg().map(SprigVal::number).ok_or_else(overflow);
    }
    fold(first, &args[1..], |a, b| a.checked_sub(b).ok_or_else(overflow))
}

/// (/ x y ...) - Divide the first by the rest, truncating
pub(crate) fn builtin_div(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity_at_least(args, 1)?;
    let first = expect_number(&args[0])?;
    fold(first, &args[1..], |a, b| {
        if b == 0 {
            return Err(Error::DivideByZero.into());
        }
        a.checked_div(b).ok_or_else(overflow)
    })
}
