// sprig-core - Host dispatch special form
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! `(objc message target args...)`, the form `(.message target args...)`
//! reads as. Resolves and marshals the call, then defers to the root
//! environment's [`HostBridge`](crate::bridge::HostBridge).

use im::Vector;
use sprig_parser::SprigVal;
use tracing::debug;

use super::eval;
use crate::bridge::{HostArg, HostTarget};
use crate::env::Env;
use crate::error::{Error, Result};

pub(crate) fn eval_objc(items: &Vector<SprigVal>, env: &Env) -> Result<SprigVal> {
    if items.len() < 3 {
        return Err(Error::ArityMismatch.into());
    }

    // An unbound message symbol stands for itself
    let message = match &items[1] {
        SprigVal::Symbol(sym, _) => env.find(sym).unwrap_or_else(|| items[1].clone()),
        other => eval(other, env)?,
    };
    let message = message.as_symbol().cloned().ok_or(Error::SymbolExpected)?;

    let target = resolve_target(&items[2], env)?;
    let args = marshal_args(items.iter().skip(3), env)?;

    debug!(message = message.name(), target = %target, args = args.len(), "host dispatch");
    env.bridge().send(&message, &target, &args)
}

/// An unbound symbol target names a host class; anything else is evaluated.
fn resolve_target(form: &SprigVal, env: &Env) -> Result<HostTarget> {
    match form {
        SprigVal::Symbol(sym, _) if !env.is_defined(sym) => Ok(HostTarget::Class(sym.clone())),
        other => Ok(HostTarget::Value(eval(other, env)?)),
    }
}

/// Evaluate the arguments: the first is unkeyed, the rest alternate
/// keyword and value.
fn marshal_args<'a>(
    forms: impl Iterator<Item = &'a SprigVal>,
    env: &Env,
) -> Result<Vec<HostArg>> {
    let values = forms.map(|f| eval(f, env)).collect::<Result<Vec<_>>>()?;
    let Some((first, keyed)) = values.split_first() else {
        return Ok(Vec::new());
    };
    if keyed.len() % 2 != 0 {
        return Err(Error::InvalidOperation.into());
    }

    let mut args = Vec::with_capacity(1 + keyed.len() / 2);
    args.push(HostArg {
        key: None,
        value: first.clone(),
    });
    for pair in keyed.chunks_exact(2) {
        let SprigVal::Keyword(key, _) = &pair[0] else {
            return Err(Error::InvalidOperation.into());
        };
        args.push(HostArg {
            key: Some(key.clone()),
            value: pair[1].clone(),
        });
    }
    Ok(args)
}

