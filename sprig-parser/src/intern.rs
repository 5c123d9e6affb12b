// sprig-parser - String interning for identifiers
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Global string interner shared by [`Symbol`](crate::Symbol) and
//! [`Keyword`](crate::Keyword).
//!
//! Interned names are never deallocated. Memory grows with the number of
//! distinct identifiers a program mentions, which for `gensym`-heavy macro
//! code is still modest.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

static INTERNER: OnceLock<Mutex<HashSet<Arc<str>>>> = OnceLock::new();

/// Return the canonical shared allocation for `name`.
///
/// Two calls with equal strings return pointers to the same allocation, so
/// callers may compare and hash by address.
pub(crate) fn intern(name: &str) -> Arc<str> {
    let mut table = INTERNER
        .get_or_init(|| Mutex::new(HashSet::new()))
        .lock()
        // The table is never left half-updated, so a poisoned lock is still usable
        .unwrap_or_else(PoisonError::into_inner);

    if let Some(existing) = table.get(name) {
        return Arc::clone(existing);
    }
    let interned: Arc<str> = Arc::from(name);
    table.insert(Arc::clone(&interned));
    interned
}
