// sprig-core - Sequence built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Sequence operations over lists and vectors: list, vector, count, cons,
//! concat, nth, first, rest, conj, seq and the sequence predicates.

use im::Vector;
use sprig_parser::SprigVal;

use crate::error::{Error, Result, check_arity, check_arity_at_least};

use super::{expect_number, seq_items};

// ============================================================================
// Construction and Predicates
// ============================================================================

/// (list & items)
pub(crate) fn builtin_list(args: &[SprigVal]) -> Result<SprigVal> {
    Ok(SprigVal::list(args.iter().cloned()))
}

/// (vector & items)
pub(crate) fn builtin_vector(args: &[SprigVal]) -> Result<SprigVal> {
    Ok(SprigVal::vector(args.iter().cloned()))
}

/// (list? x)
pub(crate) fn builtin_list_p(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    Ok(SprigVal::bool(matches!(args[0], SprigVal::List(..))))
}

/// (vector? x)
pub(crate) fn builtin_vector_p(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    Ok(SprigVal::bool(matches!(args[0], SprigVal::Vector(..))))
}

/// (sequential? x) - True for lists and vectors
pub(crate) fn builtin_sequential_p(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    Ok(SprigVal::bool(args[0].as_seq().is_some()))
}

/// (empty? coll)
pub(crate) fn builtin_empty_p(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    let empty = match &args[0] {
        SprigVal::Nil(_) => true,
        SprigVal::List(items, _) | SprigVal::Vector(items, _) => items.is_empty(),
        SprigVal::HashMap(map, _) => map.is_empty(),
        SprigVal::String(s, _) => s.is_empty(),
        _ => return Err(Error::InvalidOperation.into()),
    };
    Ok(SprigVal::bool(empty))
}

/// (count coll) - Elements, map entries or string characters; nil is 0
pub(crate) fn builtin_count(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    let count = match &args[0] {
        SprigVal::Nil(_) => 0,
        SprigVal::List(items, _) | SprigVal::Vector(items, _) => items.len(),
        SprigVal::HashMap(map, _) => map.len(),
        SprigVal::String(s, _) => s.chars().count(),
        _ => return Err(Error::InvalidOperation.into()),
    };
    let count = i64::try_from(count).map_err(|_| Error::IntegerOverflow)?;
    Ok(SprigVal::number(count))
}

// ============================================================================
// Combination
// ============================================================================

/// (cons x seq) - Always a list
pub(crate) fn builtin_cons(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 2)?;
    let mut items = seq_items(&args[1])?;
    items.push_front(args[0].clone());
    Ok(SprigVal::List(items, None))
}

/// (concat & seqs) - Always a list
pub(crate) fn builtin_concat(args: &[SprigVal]) -> Result<SprigVal> {
    let mut result = Vector::new();
    for arg in args {
        result.append(seq_items(arg)?);
    }
    Ok(SprigVal::List(result, None))
}

/// (conj coll & items) - Prepends to a list, appends to a vector
pub(crate) fn builtin_conj(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity_at_least(args, 1)?;
    match &args[0] {
        SprigVal::List(items, meta) => {
            let mut items = items.clone();
            for item in &args[1..] {
                items.push_front(item.clone());
            }
            Ok(SprigVal::List(items, meta.clone()))
        }
        SprigVal::Vector(items, meta) => {
            let mut items = items.clone();
            items.extend(args[1..].iter().cloned());
            Ok(SprigVal::Vector(items, meta.clone()))
        }
        _ => Err(Error::InvalidOperation.into()),
    }
}

// ============================================================================
// Access
// ============================================================================

/// (nth seq index)
pub(crate) fn builtin_nth(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 2)?;
    let items = args[0].as_seq().ok_or(Error::InvalidOperation)?;
    let index = expect_number(&args[1])?;
    usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i))
        .cloned()
        .ok_or_else(|| Error::IndexOutOfRange.into())
}

/// (first seq) - nil for nil or an empty sequence
pub(crate) fn builtin_first(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    Ok(seq_items(&args[0])?.front().cloned().unwrap_or(SprigVal::NIL))
}

/// (rest seq) - Always a list, () for nil
pub(crate) fn builtin_rest(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    let items = seq_items(&args[0])?;
    Ok(SprigVal::list(items.into_iter().skip(1)))
}

/// (seq coll) - A list of the elements, or nil when empty
pub(crate) fn builtin_seq(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    match &args[0] {
        SprigVal::Nil(_) => Ok(SprigVal::NIL),
        SprigVal::List(items, _) | SprigVal::Vector(items, _) if items.is_empty() => {
            Ok(SprigVal::NIL)
        }
        SprigVal::List(..) => Ok(args[0].clone()),
        SprigVal::Vector(items, _) => Ok(SprigVal::List(items.clone(), None)),
        SprigVal::String(s, _) if s.is_empty() => Ok(SprigVal::NIL),
        SprigVal::String(s, _) => Ok(SprigVal::list(
            s.chars().map(|c| SprigVal::string(c.to_string())),
        )),
        _ => Err(Error::InvalidOperation.into()),
    }
}
