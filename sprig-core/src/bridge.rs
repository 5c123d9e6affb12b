// sprig-core - Host-dispatch bridge
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The boundary behind the `objc` special form.
//!
//! The evaluator resolves and marshals an `objc` call, then hands it to the
//! [`HostBridge`] stored on the root environment. The interpreter itself
//! never depends on what the bridge does with it; [`NullBridge`] answers
//! every message with nil.

use std::fmt;

use sprig_parser::{Keyword, SprigVal, Symbol};
use tracing::debug;

use crate::error::Result;

/// The receiver of a host message.
#[derive(Debug, Clone, PartialEq)]
pub enum HostTarget {
    /// An unresolved symbol, taken as the name of a host class
    Class(Symbol),
    /// An evaluated value
    Value(SprigVal),
}

impl fmt::Display for HostTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostTarget::Class(sym) => write!(f, "{}", sym),
            HostTarget::Value(val) => write!(f, "{}", val),
        }
    }
}

/// One marshalled argument: the first argument is unkeyed, the rest are
/// keyword-labelled.
#[derive(Debug, Clone, PartialEq)]
pub struct HostArg {
    pub key: Option<Keyword>,
    pub value: SprigVal,
}

/// Dispatches messages to an external object system.
pub trait HostBridge {
    /// Send `message` to `target` with the marshalled arguments.
    ///
    /// Implementations fail with `InvalidOperation` when the host rejects
    /// the call.
    fn send(&self, message: &Symbol, target: &HostTarget, args: &[HostArg]) -> Result<SprigVal>;
}

/// The default bridge: logs the message and returns nil.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBridge;

impl HostBridge for NullBridge {
    fn send(&self, message: &Symbol, target: &HostTarget, args: &[HostArg]) -> Result<SprigVal> {
        debug!(
            message = message.name(),
            target = %target,
            args = args.len(),
            "no host bridge installed, returning nil"
        );
        Ok(SprigVal::NIL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_bridge_returns_nil() {
        let result = NullBridge.send(
            &Symbol::new("length"),
            &HostTarget::Class(Symbol::new("NSString")),
            &[HostArg {
                key: None,
                value: SprigVal::number(1),
            }],
        );
        assert_eq!(result, Ok(SprigVal::NIL));
    }

    #[test]
    fn test_target_display() {
        assert_eq!(HostTarget::Class(Symbol::new("NSArray")).to_string(), "NSArray");
        assert_eq!(
            HostTarget::Value(SprigVal::string("s")).to_string(),
            "\"s\""
        );
    }
}
