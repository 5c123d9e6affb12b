// sprig-core - Error types for the Sprig evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for Sprig evaluation.
//!
//! Evaluation has three outcomes: a value, an interpreter [`Error`], or a
//! user value raised by `throw`. The two failure kinds travel together as
//! an [`Exception`] so `?` unwinds both through the evaluator, while `try`
//! can still tell them apart.

use std::fmt;

use sprig_parser::{ReadError, SprigVal, pr_str};

/// Result type for Sprig evaluation.
pub type Result<T> = std::result::Result<T, Exception>;

/// Interpreter errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Reader failure (from `read-string` or the top-level reader)
    Read(ReadError),
    /// Wrong number of arguments to a function or special form
    ArityMismatch,
    /// Operation applied to values of the wrong type
    InvalidOperation,
    /// Unresolved symbol reference
    SymbolNotFound(String),
    /// A symbol was required
    SymbolExpected,
    /// A parameter or binding list was malformed
    ExpectedBindingList,
    /// `nth` past the end of a sequence
    IndexOutOfRange,
    /// Integer division by zero
    DivideByZero,
    /// Integer arithmetic overflowed 64 bits
    IntegerOverflow,
    /// Host I/O failure
    Io(String),
    /// Non-tail recursion went deeper than the configured limit, or used up
    /// the native stack budget
    DepthExceeded(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(e) => write!(f, "{}", e),
            Error::ArityMismatch => write!(f, "Wrong number of arguments"),
            Error::InvalidOperation => write!(f, "Can't apply function to arguments"),
            Error::SymbolNotFound(name) => write!(f, "'{}' not found", name),
            Error::SymbolExpected => write!(f, "Symbol expected"),
            Error::ExpectedBindingList => write!(f, "Expected list of bindings"),
            Error::IndexOutOfRange => write!(f, "Index out of range"),
            Error::DivideByZero => write!(f, "Divide by zero"),
            Error::IntegerOverflow => write!(f, "Integer overflow"),
            Error::Io(msg) => write!(f, "{}", msg),
            Error::DepthExceeded(max) => {
                write!(f, "Stack overflow: maximum recursion depth ({}) exceeded", max)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ReadError> for Error {
    fn from(e: ReadError) -> Self {
        Error::Read(e)
    }
}

/// A failed evaluation: an interpreter error or a raised user value.
#[derive(Debug, Clone, PartialEq)]
pub enum Exception {
    Error(Error),
    Raised(SprigVal),
}

impl Exception {
    /// The value a `catch` clause binds: the raised payload verbatim, or the
    /// error message as a string.
    pub fn into_value(self) -> SprigVal {
        match self {
            Exception::Raised(val) => val,
            Exception::Error(e) => SprigVal::string(e.to_string()),
        }
    }

    /// The interpreter error, if this is one.
    pub fn as_error(&self) -> Option<&Error> {
        match self {
            Exception::Error(e) => Some(e),
            Exception::Raised(_) => None,
        }
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exception::Error(e) => write!(f, "{}", e),
            Exception::Raised(val) => write!(f, "{}", pr_str(val, false)),
        }
    }
}

impl std::error::Error for Exception {}

impl From<Error> for Exception {
    fn from(e: Error) -> Self {
        Exception::Error(e)
    }
}

impl From<ReadError> for Exception {
    fn from(e: ReadError) -> Self {
        Exception::Error(Error::Read(e))
    }
}

/// Fail with `ArityMismatch` unless exactly `expected` arguments were given.
pub fn check_arity(args: &[SprigVal], expected: usize) -> Result<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(Error::ArityMismatch.into())
    }
}

/// Fail with `ArityMismatch` unless at least `min` arguments were given.
pub fn check_arity_at_least(args: &[SprigVal], min: usize) -> Result<()> {
    if args.len() >= min {
        Ok(())
    } else {
        Err(Error::ArityMismatch.into())
    }
}
