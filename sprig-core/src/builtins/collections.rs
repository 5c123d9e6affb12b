// sprig-core - Hash map built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Hash map operations: hash-map, map?, assoc, dissoc, get, contains?,
//! keys, vals.
//!
//! Lookups on anything that is not a map are lenient: `get` gives nil,
//! `contains?` false, and `keys`/`vals` nil.

use sprig_parser::{SprigMap, SprigVal};

use crate::error::{Error, Result, check_arity, check_arity_at_least};

/// Pair up alternating keys and values.
fn pairs(args: &[SprigVal]) -> Result<impl Iterator<Item = (SprigVal, SprigVal)> + '_> {
    if args.len() % 2 != 0 {
        return Err(Error::ArityMismatch.into());
    }
    Ok(args
        .chunks_exact(2)
        .map(|kv| (kv[0].clone(), kv[1].clone())))
}

/// (hash-map k v ...)
pub(crate) fn builtin_hash_map(args: &[SprigVal]) -> Result<SprigVal> {
    Ok(SprigVal::HashMap(SprigMap::from_pairs(pairs(args)?), None))
}

/// (map? x)
pub(crate) fn builtin_map_p(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    Ok(SprigVal::bool(matches!(args[0], SprigVal::HashMap(..))))
}

/// (assoc map k v ...) - Existing keys move to the end
pub(crate) fn builtin_assoc(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity_at_least(args, 1)?;
    let SprigVal::HashMap(map, meta) = &args[0] else {
        return Err(Error::InvalidOperation.into());
    };
    let mut map = map.clone();
    for (k, v) in pairs(&args[1..])? {
        map.insert(k, v);
    }
    Ok(SprigVal::HashMap(map, meta.clone()))
}

/// (dissoc map k ...)
pub(crate) fn builtin_dissoc(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity_at_least(args, 1)?;
    let SprigVal::HashMap(map, meta) = &args[0] else {
        return Err(Error::InvalidOperation.into());
    };
    let mut map = map.clone();
    for key in &args[1..] {
        map.remove(key);
    }
    Ok(SprigVal::HashMap(map, meta.clone()))
}

/// (get map key)
pub(crate) fn builtin_get(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 2)?;
    Ok(match &args[0] {
        SprigVal::HashMap(map, _) => map.get(&args[1]).cloned().unwrap_or(SprigVal::NIL),
        _ => SprigVal::NIL,
    })
}

/// (contains? map key)
pub(crate) fn builtin_contains_p(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 2)?;
    Ok(SprigVal::bool(match &args[0] {
        SprigVal::HashMap(map, _) => map.contains_key(&args[1]),
        _ => false,
    }))
}

/// (keys map) - Keys in insertion order
pub(crate) fn builtin_keys(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    Ok(match &args[0] {
        SprigVal::HashMap(map, _) => SprigVal::list(map.keys().cloned()),
        _ => SprigVal::NIL,
    })
}

/// (vals map) - Values in insertion order
pub(crate) fn builtin_vals(args: &[SprigVal]) -> Result<SprigVal> {
    check_arity(args, 1)?;
    Ok(match &args[0] {
        SprigVal::HashMap(map, _) => SprigVal::list(map.vals().cloned()),
        _ => SprigVal::NIL,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(name: &str) -> SprigVal {
        SprigVal::keyword(name)
    }

    fn abmap() -> SprigVal {
        builtin_hash_map(&[kw("a"), SprigVal::number(1), kw("b"), SprigVal::number(2)]).unwrap()
    }

    #[test]
    fn test_hash_map_odd_arity() {
        assert_eq!(
            builtin_hash_map(&[kw("a")]),
            Err(Error::ArityMismatch.into())
        );
    }

    #[test]
    fn test_assoc_moves_existing_key_to_end() {
        let result = builtin_assoc(&[
            abmap(),
            kw("a"),
            SprigVal::number(3),
            kw("c"),
            SprigVal::number(1),
        ])
        .unwrap();
        assert_eq!(result.to_string(), "{:b 2 :a 3 :c 1}");
    }

    #[test]
    fn test_dissoc() {
        let result = builtin_dissoc(&[abmap(), kw("a"), kw("missing")]).unwrap();
        assert_eq!(result.to_string(), "{:b 2}");
    }

    #[test]
    fn test_lenient_lookups() {
        let not_a_map = SprigVal::number(1);
        assert_eq!(builtin_get(&[not_a_map.clone(), kw("a")]), Ok(SprigVal::NIL));
        assert_eq!(
            builtin_contains_p(&[not_a_map.clone(), kw("a")]),
            Ok(SprigVal::bool(false))
        );
        assert_eq!(builtin_keys(&[not_a_map.clone()]), Ok(SprigVal::NIL));
        assert_eq!(builtin_vals(&[not_a_map]), Ok(SprigVal::NIL));
        assert_eq!(builtin_get(&[abmap(), kw("z")]), Ok(SprigVal::NIL));
    }

    #[test]
    fn test_keys_and_vals() {
        assert_eq!(builtin_keys(&[abmap()]).unwrap().to_string(), "(:a :b)");
        assert_eq!(builtin_vals(&[abmap()]).unwrap().to_string(), "(1 2)");
        assert_eq!(
            builtin_keys(&[SprigVal::hash_map(vec![])]),
            Ok(SprigVal::empty_list())
        );
    }
}
