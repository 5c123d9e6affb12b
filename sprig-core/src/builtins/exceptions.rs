// sprig-core - Exception built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use sprig_parser::SprigVal;

use crate::error::{Exception, Result, check_arity};

/// (throw x) - Raise x as a user exception
pub(crate) fn builtin_throw(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    Err(Exception::Raised(args[0].clone()))
}
