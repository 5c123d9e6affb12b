// sprig-core - Higher-order built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Higher-order functions: apply, map

use sprig_parser::SprigVal;

use crate::error::{Error, Result, check_arity, check_arity_at_least};
use crate::eval::apply;

use super::seq_items;

/// (apply f x y ... coll) - Call f with the middle arguments followed by
/// the elements of coll
pub(crate) fn builtin_apply(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity_at_least(args, 2)?;
    let Some((last, middle)) = args[1..].split_last() else {
        return Err(Error::ArityMismatch.into());
    };
    let mut call_args: Vec<SprigVal> = middle.to_vec();
    call_args.extend(seq_items(last)?);
    apply(&args[0], &call_args)
}

/// (map f coll) - List of (f x) for each element
pub(crate) fn builtin_map(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 2)?;
    let results = seq_items(&args[1])?
        .iter()
        .map(|item| apply(&args[0], std::slice::from_ref(item)))
        .collect::<Result<Vec<_>>>()?;
    Ok(SprigVal::list(results))
}
