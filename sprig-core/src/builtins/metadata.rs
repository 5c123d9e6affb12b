// sprig-core - Metadata built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Metadata operations: meta, with-meta

use sprig_parser::SprigVal;

use crate::error::{Result, check_arity};

/// (meta obj) - Returns the metadata of obj, or nil
pub(crate) fn builtin_meta(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    Ok(args[0]
        .meta()
        .map(|m| (**m).clone())
        .unwrap_or(SprigVal::NIL))
}

/// (with-meta obj m) - Returns obj with metadata m
pub(crate) fn builtin_with_meta(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 2)?;
    Ok(args[0].with_meta(args[1].clone()))
}
