// sprig-core - Built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Built-in functions for Sprig.
//!
//! Every builtin takes evaluated arguments. Wrong argument counts fail with
//! `ArityMismatch` and wrong argument types with `InvalidOperation`.

mod arithmetic;
mod atoms;
mod collections;
mod comparison;
mod exceptions;
mod higher_order;
mod io;
mod metadata;
mod predicates;
mod sequences;

use im::Vector;
use sprig_parser::{SprigVal, Symbol};

use crate::env::Env;
use crate::error::{Error, Result};
use crate::eval::make_native_fn;

use arithmetic::{builtin_add, builtin_div, builtin_mul, builtin_sub};
use atoms::{builtin_atom, builtin_atom_p, builtin_deref, builtin_reset, builtin_swap};
use collections::{
    builtin_assoc, builtin_contains_p, builtin_dissoc, builtin_get, builtin_hash_map,
    builtin_keys, builtin_map_p, builtin_vals,
};
use comparison::{builtin_eq, builtin_ge, builtin_gt, builtin_le, builtin_lt};
use exceptions::builtin_throw;
use higher_order::{builtin_apply, builtin_map};
use io::{
    builtin_pr_str, builtin_println, builtin_prn, builtin_read_string, builtin_readline,
    builtin_slurp, builtin_str, builtin_time_ms,
};
use metadata::{builtin_meta, builtin_with_meta};
use predicates::{
    builtin_false_p, builtin_fn_p, builtin_keyword, builtin_keyword_p, builtin_macro_p,
    builtin_nil_p, builtin_not, builtin_number_p, builtin_string_p, builtin_symbol,
    builtin_symbol_p, builtin_true_p,
};
use sequences::{
    builtin_concat, builtin_conj, builtin_cons, builtin_count, builtin_empty_p, builtin_first,
    builtin_list, builtin_list_p, builtin_nth, builtin_rest, builtin_seq, builtin_sequential_p,
    builtin_vector, builtin_vector_p,
};

/// Register all built-in functions in the given environment.
pub fn register_builtins(env: &Env) {
    // Arithmetic
    env.define_native("+", builtin_add);
    env.define_native("-", builtin_sub);
    env.define_native("*", builtin_mul);
    env.define_native("/", builtin_div);

    // Comparison
    env.define_native("=", builtin_eq);
    env.define_native("<", builtin_lt);
    env.define_native("<=", builtin_le);
    env.define_native(">", builtin_gt);
    env.define_native(">=", builtin_ge);

    // Output and input
    env.define_native("pr-str", builtin_pr_str);
    env.define_native("str", builtin_str);
    env.define_native("prn", builtin_prn);
    env.define_native("println", builtin_println);
    env.define_native("read-string", builtin_read_string);
    env.define_native("slurp", builtin_slurp);
    env.define_native("readline", builtin_readline);
    env.define_native("time-ms", builtin_time_ms);

    // Sequences
    env.define_native("list", builtin_list);
    env.define_native("list?", builtin_list_p);
    env.define_native("vector", builtin_vector);
    env.define_native("vector?", builtin_vector_p);
    env.define_native("sequential?", builtin_sequential_p);
    env.define_native("empty?", builtin_empty_p);
    env.define_native("count", builtin_count);
    env.define_native("cons", builtin_cons);
    env.define_native("concat", builtin_concat);
    env.define_native("nth", builtin_nth);
    env.define_native("first", builtin_first);
    env.define_native("rest", builtin_rest);
    env.define_native("conj", builtin_conj);
    env.define_native("seq", builtin_seq);

    // Hash maps
    env.define_native("hash-map", builtin_hash_map);
    env.define_native("map?", builtin_map_p);
    env.define_native("assoc", builtin_assoc);
    env.define_native("dissoc", builtin_dissoc);
    env.define_native("get", builtin_get);
    env.define_native("contains?", builtin_contains_p);
    env.define_native("keys", builtin_keys);
    env.define_native("vals", builtin_vals);

    // Atoms
    env.define_native("atom", builtin_atom);
    env.define_native("atom?", builtin_atom_p);
    env.define_native("deref", builtin_deref);
    env.define_native("reset!", builtin_reset);
    env.define_native("swap!", builtin_swap);

    // Predicates and constructors
    env.define_native("nil?", builtin_nil_p);
    env.define_native("true?", builtin_true_p);
    env.define_native("false?", builtin_false_p);
    env.define_native("symbol", builtin_symbol);
    env.define_native("symbol?", builtin_symbol_p);
    env.define_native("keyword", builtin_keyword);
    env.define_native("keyword?", builtin_keyword_p);
    env.define_native("string?", builtin_string_p);
    env.define_native("number?", builtin_number_p);
    env.define_native("fn?", builtin_fn_p);
    env.define_native("macro?", builtin_macro_p);
    env.define_native("not", builtin_not);

    // Higher-order
    env.define_native("apply", builtin_apply);
    env.define_native("map", builtin_map);

    // Metadata
    env.define_native("meta", builtin_meta);
    env.define_native("with-meta", builtin_with_meta);

    // Errors
    env.define_native("throw", builtin_throw);
}

/// Extension trait for Env to add native function definition.
pub(crate) trait EnvExt {
    fn define_native(&self, name: &'static str, func: fn(&[SprigVal]) -> Result<SprigVal>);
}

impl EnvExt for Env {
    fn define_native(&self, name: &'static str, func: fn(&[SprigVal]) -> Result<SprigVal>) {
        self.define(Symbol::new(name), make_native_fn(name, func));
    }
}

// ============================================================================
// Shared Helpers
// ============================================================================

pub(crate) fn expect_number(val: &SprigVal) -> Result<i64> {
    match val {
        SprigVal::Number(n, _) => Ok(*n),
        _ => Err(Error::InvalidOperation.into()),
    }
}

/// Elements of a list or vector; nil counts as empty.
pub(crate) fn seq_items(val: &SprigVal) -> Result<Vector<SprigVal>> {
    match val {
        SprigVal::List(items, _) | SprigVal::Vector(items, _) => Ok(items.clone()),
        SprigVal::Nil(_) => Ok(Vector::new()),
        _ => Err(Error::InvalidOperation.into()),
    }
}
