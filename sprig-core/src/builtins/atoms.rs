// sprig-core - Atom built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Atom operations: atom, atom?, deref, reset!, swap!

use sprig_parser::{SprigAtom, SprigVal};

use crate::error::{Error, Result, check_arity, check_arity_at_least};
use crate::eval::apply;

fn expect_atom(val: &SprigVal) -> Result<&SprigAtom> {
    match val {
        SprigVal::Atom(atom, _) => Ok(atom),
        _ => Err(Error::InvalidOperation.into()),
    }
}

// ============================================================================
// Atom Creation and Predicate
// ============================================================================

/// (atom x) - Create an atom with initial value x
pub(crate) fn builtin_atom(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    Ok(SprigVal::atom(args[0].clone()))
}

/// (atom? x) - Returns true if x is an atom
pub(crate) fn builtin_atom_p(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    Ok(SprigVal::bool(matches!(args[0], SprigVal::Atom(..))))
}

// ============================================================================
// Basic Operations
// ============================================================================

/// (deref atom) - Current value, also written @atom
pub(crate) fn builtin_deref(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    Ok(expect_atom(&args[0])?.deref())
}

/// (reset! atom newval) - Set atom value, returns newval
pub(crate) fn builtin_reset(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 2)?;
    Ok(expect_atom(&args[0])?.reset(args[1].clone()))
}

/// (swap! atom f & args) - Set the value to (f current args...)
pub(crate) fn builtin_swap(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity_at_least(args, 2)?;
    let atom = expect_atom(&args[0])?;

    let mut call_args = Vec::with_capacity(args.len() - 1);
    call_args.push(atom.deref());
    call_args.extend(args[2..].iter().cloned());

    // The cell is not borrowed while f runs, so f may touch the atom
    let new_val = apply(&args[1], &call_args)?;
    Ok(atom.reset(new_val))
}
