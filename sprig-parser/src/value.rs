// sprig-parser - Value types for Sprig
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Core value type for Sprig.
//!
//! `SprigVal` is the closed set of runtime values shared by the reader,
//! evaluator and printer. Values are immutable apart from atoms, and use
//! reference counting for sharing.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use im::Vector;

use crate::keyword::Keyword;
use crate::symbol::Symbol;

/// Metadata slot: any value, or none.
pub type Meta = Option<Rc<SprigVal>>;

/// The core value type for Sprig.
///
/// Every variant carries a [`Meta`] field. Metadata does not affect
/// equality.
#[derive(Clone)]
pub enum SprigVal {
    /// The nil value
    Nil(Meta),
    /// Boolean true or false
    Bool(bool, Meta),
    /// 64-bit signed integer
    Number(i64, Meta),
    /// Immutable string
    String(Rc<str>, Meta),
    /// Identifier, resolved through the environment when evaluated
    Symbol(Symbol, Meta),
    /// Self-evaluating identifier
    Keyword(Keyword, Meta),
    /// Ordered sequence, the shape of every call form
    List(Vector<SprigVal>, Meta),
    /// Indexed sequence, equal to a list with the same elements
    Vector(Vector<SprigVal>, Meta),
    /// Insertion-ordered association
    HashMap(SprigMap, Meta),
    /// Mutable single-slot box, compared by identity
    Atom(SprigAtom, Meta),
    /// Native primitive or user closure, compared by identity
    Function(Rc<SprigFn>, Meta),
}

// ============================================================================
// Maps
// ============================================================================

/// Insertion-ordered map of key/value entries.
///
/// Keys are unique under [`SprigVal`] equality. Equality between maps is
/// independent of entry order.
#[derive(Clone, Default)]
pub struct SprigMap {
    entries: Vector<(SprigVal, SprigVal)>,
}

impl SprigMap {
    /// Create an empty map.
    pub fn new() -> Self {
        SprigMap::default()
    }

    /// Build a map from (key, value) pairs with `assoc` semantics: a repeated
    /// key keeps its last value, at the position of its last occurrence.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (SprigVal, SprigVal)>) -> Self {
        let mut map = SprigMap::new();
        for (k, v) in pairs {
            map.insert(k, v);
        }
        map
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the value for a key.
    pub fn get(&self, key: &SprigVal) -> Option<&SprigVal> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// True if the key is present (even when bound to nil).
    pub fn contains_key(&self, key: &SprigVal) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Add or replace an entry in place. An existing key is removed first and
    /// the new entry is appended.
    pub fn insert(&mut self, key: SprigVal, value: SprigVal) {
        self.remove(&key);
        self.entries.push_back((key, value));
    }

    /// Remove an entry in place, if present.
    pub fn remove(&mut self, key: &SprigVal) {
        if let Some(pos) = self.entries.iter().position(|(k, _)| k == key) {
            self.entries.remove(pos);
        }
    }

    /// Return a new map with the entry added.
    #[must_use]
    pub fn assoc(&self, key: SprigVal, value: SprigVal) -> Self {
        let mut map = self.clone();
        map.insert(key, value);
        map
    }

    /// Return a new map without the entry.
    #[must_use]
    pub fn dissoc(&self, key: &SprigVal) -> Self {
        let mut map = self.clone();
        map.remove(key);
        map
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(SprigVal, SprigVal)> {
        self.entries.iter()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &SprigVal> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Values in insertion order.
    pub fn vals(&self) -> impl Iterator<Item = &SprigVal> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl PartialEq for SprigMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| ov == v))
    }
}

impl fmt::Debug for SprigMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

// ============================================================================
// Atoms
// ============================================================================

/// A mutable reference cell.
///
/// Cloning an atom shares the cell: clones are the same atom.
#[derive(Clone)]
pub struct SprigAtom {
    value: Rc<RefCell<SprigVal>>,
}

impl SprigAtom {
    /// Create a new atom with an initial value.
    pub fn new(value: SprigVal) -> Self {
        SprigAtom {
            value: Rc::new(RefCell::new(value)),
        }
    }

    /// Get the current value.
    pub fn deref(&self) -> SprigVal {
        self.value.borrow().clone()
    }

    /// Replace the value, returning the new value.
    pub fn reset(&self, new_val: SprigVal) -> SprigVal {
        *self.value.borrow_mut() = new_val.clone();
        new_val
    }

    /// True if both handles refer to the same cell.
    pub fn same_cell(&self, other: &SprigAtom) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for SprigAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Atom({:p})", Rc::as_ptr(&self.value))
    }
}

// ============================================================================
// Functions
// ============================================================================

/// A callable value: native primitive or user closure.
pub struct SprigFn {
    /// Name for display, absent for anonymous `fn`
    pub name: Option<Rc<str>>,
    /// Set for functions defined with `defmacro`
    pub is_macro: bool,
    pub kind: FnKind,
}

/// The two kinds of callables.
pub enum FnKind {
    Native(SprigNativeFn),
    Closure(Closure),
}

/// A user closure: parameters, body and captured environment.
pub struct Closure {
    /// Positional parameters (the `&` marker is not included)
    pub params: Vec<Symbol>,
    /// Parameter bound to the list of remaining arguments, if any
    pub rest_param: Option<Symbol>,
    /// Body expression, evaluated in tail position
    pub body: SprigVal,
    /// Captured environment (type-erased to avoid a dependency on the core crate)
    pub env: Rc<dyn Any>,
}

/// A native function. The implementation is type-erased; the core crate
/// knows its concrete signature.
#[derive(Clone)]
pub struct SprigNativeFn {
    func: Rc<dyn Any>,
}

impl SprigNativeFn {
    /// Wrap a type-erased implementation.
    pub fn new(func: Rc<dyn Any>) -> Self {
        SprigNativeFn { func }
    }

    /// Get the inner function reference.
    pub fn func(&self) -> &Rc<dyn Any> {
        &self.func
    }
}

impl SprigFn {
    /// Create a native function.
    pub fn native(name: &str, func: SprigNativeFn) -> Self {
        SprigFn {
            name: Some(Rc::from(name)),
            is_macro: false,
            kind: FnKind::Native(func),
        }
    }

    /// Create a closure.
    pub fn closure(name: Option<&str>, closure: Closure, is_macro: bool) -> Self {
        SprigFn {
            name: name.map(Rc::from),
            is_macro,
            kind: FnKind::Closure(closure),
        }
    }

    /// Get the name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get the closure, if this is a user function.
    pub fn as_closure(&self) -> Option<&Closure> {
        match &self.kind {
            FnKind::Closure(c) => Some(c),
            FnKind::Native(_) => None,
        }
    }
}

impl fmt::Debug for SprigFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match (&self.kind, self.is_macro) {
            (_, true) => "macro",
            (FnKind::Native(_), false) => "native",
            (FnKind::Closure(_), false) => "closure",
        };
        write!(f, "SprigFn({} {:?})", kind, self.name)
    }
}

// ============================================================================
// Constructors and accessors
// ============================================================================

impl SprigVal {
    /// `nil` without metadata.
    pub const NIL: SprigVal = SprigVal::Nil(None);

    pub fn nil() -> Self {
        SprigVal::NIL
    }

    pub fn bool(b: bool) -> Self {
        SprigVal::Bool(b, None)
    }

    pub fn number(n: i64) -> Self {
        SprigVal::Number(n, None)
    }

    pub fn string(s: impl Into<Rc<str>>) -> Self {
        SprigVal::String(s.into(), None)
    }

    pub fn symbol(name: &str) -> Self {
        SprigVal::Symbol(Symbol::new(name), None)
    }

    pub fn keyword(name: &str) -> Self {
        SprigVal::Keyword(Keyword::new(name), None)
    }

    pub fn list(items: impl IntoIterator<Item = SprigVal>) -> Self {
        SprigVal::List(items.into_iter().collect(), None)
    }

    pub fn vector(items: impl IntoIterator<Item = SprigVal>) -> Self {
        SprigVal::Vector(items.into_iter().collect(), None)
    }

    pub fn hash_map(pairs: impl IntoIterator<Item = (SprigVal, SprigVal)>) -> Self {
        SprigVal::HashMap(SprigMap::from_pairs(pairs), None)
    }

    pub fn atom(value: SprigVal) -> Self {
        SprigVal::Atom(SprigAtom::new(value), None)
    }

    pub fn function(f: SprigFn) -> Self {
        SprigVal::Function(Rc::new(f), None)
    }

    /// The empty list.
    pub fn empty_list() -> Self {
        SprigVal::List(Vector::new(), None)
    }

    /// Only `nil` and `false` are falsey.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, SprigVal::Nil(_) | SprigVal::Bool(false, _))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, SprigVal::Nil(_))
    }

    /// Elements of a list or vector.
    pub fn as_seq(&self) -> Option<&Vector<SprigVal>> {
        match self {
            SprigVal::List(items, _) | SprigVal::Vector(items, _) => Some(items),
            _ => None,
        }
    }

    /// A non-empty list or vector.
    pub fn is_pair(&self) -> bool {
        self.as_seq().is_some_and(|items| !items.is_empty())
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            SprigVal::Symbol(sym, _) => Some(sym),
            _ => None,
        }
    }

    /// True if this is the symbol with the given name.
    pub fn is_symbol_named(&self, name: &str) -> bool {
        self.as_symbol().is_some_and(|s| s.name() == name)
    }

    pub fn as_function(&self) -> Option<&Rc<SprigFn>> {
        match self {
            SprigVal::Function(f, _) => Some(f),
            _ => None,
        }
    }

    /// Type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            SprigVal::Nil(_) => "nil",
            SprigVal::Bool(..) => "boolean",
            SprigVal::Number(..) => "number",
            SprigVal::String(..) => "string",
            SprigVal::Symbol(..) => "symbol",
            SprigVal::Keyword(..) => "keyword",
            SprigVal::List(..) => "list",
            SprigVal::Vector(..) => "vector",
            SprigVal::HashMap(..) => "hash-map",
            SprigVal::Atom(..) => "atom",
            SprigVal::Function(f, _) if f.is_macro => "macro",
            SprigVal::Function(..) => "function",
        }
    }

    /// Get the metadata attached to this value, if any.
    pub fn meta(&self) -> Option<&Rc<SprigVal>> {
        match self {
            SprigVal::Nil(meta)
            | SprigVal::Bool(_, meta)
            | SprigVal::Number(_, meta)
            | SprigVal::Keyword(_, meta)
            | SprigVal::String(_, meta)
            | SprigVal::Symbol(_, meta)
            | SprigVal::List(_, meta)
            | SprigVal::Vector(_, meta)
            | SprigVal::HashMap(_, meta)
            | SprigVal::Atom(_, meta)
            | SprigVal::Function(_, meta) => meta.as_ref(),
        }
    }

    /// Return a new value sharing this value's content, with the metadata
    /// slot replaced. An atom copy still shares the original cell.
    pub fn with_meta(&self, meta: SprigVal) -> SprigVal {
        let meta = Some(Rc::new(meta));
        match self {
            SprigVal::Nil(_) => SprigVal::Nil(meta),
            SprigVal::Bool(b, _) => SprigVal::Bool(*b, meta),
            SprigVal::Number(n, _) => SprigVal::Number(*n, meta),
            SprigVal::Keyword(kw, _) => SprigVal::Keyword(kw.clone(), meta),
            SprigVal::String(s, _) => SprigVal::String(s.clone(), meta),
            SprigVal::Symbol(sym, _) => SprigVal::Symbol(sym.clone(), meta),
            SprigVal::List(items, _) => SprigVal::List(items.clone(), meta),
            SprigVal::Vector(items, _) => SprigVal::Vector(items.clone(), meta),
            SprigVal::HashMap(map, _) => SprigVal::HashMap(map.clone(), meta),
            SprigVal::Atom(atom, _) => SprigVal::Atom(atom.clone(), meta),
            SprigVal::Function(f, _) => SprigVal::Function(f.clone(), meta),
        }
    }
}

impl From<i64> for SprigVal {
    fn from(n: i64) -> Self {
        SprigVal::number(n)
    }
}

impl From<bool> for SprigVal {
    fn from(b: bool) -> Self {
        SprigVal::bool(b)
    }
}

impl From<&str> for SprigVal {
    fn from(s: &str) -> Self {
        SprigVal::string(s)
    }
}

// ============================================================================
// Equality
// ============================================================================

impl PartialEq for SprigVal {
    fn eq(&self, other: &Self) -> bool {
        // Metadata is ignored: (= [1 2] (with-meta [1 2] {:a 1})) => true
        match (self, other) {
            (SprigVal::Nil(_), SprigVal::Nil(_)) => true,
            (SprigVal::Bool(a, _), SprigVal::Bool(b, _)) => a == b,
            (SprigVal::Number(a, _), SprigVal::Number(b, _)) => a == b,
            (SprigVal::String(a, _), SprigVal::String(b, _)) => a == b,
            (SprigVal::Symbol(a, _), SprigVal::Symbol(b, _)) => a == b,
            (SprigVal::Keyword(a, _), SprigVal::Keyword(b, _)) => a == b,
            // Lists and vectors compare element-wise across the two kinds
            (
                SprigVal::List(a, _) | SprigVal::Vector(a, _),
                SprigVal::List(b, _) | SprigVal::Vector(b, _),
            ) => a == b,
            (SprigVal::HashMap(a, _), SprigVal::HashMap(b, _)) => a == b,
            (SprigVal::Atom(a, _), SprigVal::Atom(b, _)) => a.same_cell(b),
            (SprigVal::Function(a, _), SprigVal::Function(b, _)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for SprigVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn nums(ns: &[i64]) -> Vec<SprigVal> {
        ns.iter().copied().map(SprigVal::number).collect()
    }

    #[test]
    fn test_truthiness() {
        assert!(!SprigVal::nil().is_truthy());
        assert!(!SprigVal::bool(false).is_truthy());
        assert!(SprigVal::bool(true).is_truthy());
        assert!(SprigVal::number(0).is_truthy());
        assert!(SprigVal::string("").is_truthy());
        assert!(SprigVal::empty_list().is_truthy());
    }

    #[test]
    fn test_list_vector_cross_equality() {
        assert_eq!(SprigVal::list(nums(&[1, 2])), SprigVal::vector(nums(&[1, 2])));
        assert_ne!(SprigVal::list(nums(&[1, 2])), SprigVal::vector(nums(&[2, 1])));
        assert_eq!(SprigVal::empty_list(), SprigVal::vector(vec![]));
    }

    #[test]
    fn test_no_other_cross_type_equality() {
        assert_ne!(SprigVal::vector(vec![]), SprigVal::string(""));
        assert_ne!(SprigVal::hash_map(vec![]), SprigVal::vector(vec![]));
        assert_ne!(SprigVal::symbol("a"), SprigVal::keyword("a"));
        assert_ne!(SprigVal::nil(), SprigVal::bool(false));
        assert_ne!(SprigVal::string("a"), SprigVal::symbol("a"));
    }

    #[test]
    fn test_map_equality_ignores_order() {
        let a = SprigVal::hash_map(vec![
            (SprigVal::keyword("a"), SprigVal::number(11)),
            (SprigVal::keyword("b"), SprigVal::number(22)),
        ]);
        let b = SprigVal::hash_map(vec![
            (SprigVal::keyword("b"), SprigVal::number(22)),
            (SprigVal::keyword("a"), SprigVal::number(11)),
        ]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_map_insert_moves_key_to_end() {
        let mut map = SprigMap::from_pairs(vec![
            (SprigVal::keyword("a"), SprigVal::number(1)),
            (SprigVal::keyword("b"), SprigVal::number(2)),
        ]);
        map.insert(SprigVal::keyword("a"), SprigVal::number(3));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec![SprigVal::keyword("b"), SprigVal::keyword("a")]);
        assert_eq!(map.get(&SprigVal::keyword("a")), Some(&SprigVal::number(3)));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_map_nil_value_is_present() {
        let map = SprigMap::from_pairs(vec![(SprigVal::keyword("k"), SprigVal::nil())]);
        assert!(map.contains_key(&SprigVal::keyword("k")));
        assert_eq!(map.get(&SprigVal::keyword("k")), Some(&SprigVal::NIL));
    }

    #[test]
    fn test_atom_identity() {
        let a = SprigVal::atom(SprigVal::number(1));
        let b = SprigVal::atom(SprigVal::number(1));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_metadata_ignored_by_equality() {
        let v = SprigVal::vector(nums(&[1, 2]));
        let with = v.with_meta(SprigVal::keyword("m"));
        assert_eq!(v, with);
        assert!(v.meta().is_none());
        assert_eq!(with.meta().map(|m| (**m).clone()), Some(SprigVal::keyword("m")));
    }

    #[test]
    fn test_metadata_on_atom_shares_cell() {
        let a = SprigVal::atom(SprigVal::number(1));
        let tagged = a.with_meta(SprigVal::string("tag"));
        if let (SprigVal::Atom(x, _), SprigVal::Atom(y, _)) = (&a, &tagged) {
            y.reset(SprigVal::number(2));
            assert_eq!(x.deref(), SprigVal::number(2));
        } else {
            panic!("expected atoms");
        }
    }

    #[test]
    fn test_immediates_carry_metadata() {
        let tag = SprigVal::keyword("tag");
        for val in [
            SprigVal::nil(),
            SprigVal::bool(true),
            SprigVal::number(1),
            SprigVal::keyword("k"),
        ] {
            let tagged = val.with_meta(tag.clone());
            assert_eq!(tagged, val);
            assert_eq!(tagged.type_name(), val.type_name());
            assert_eq!(tagged.meta().map(|m| (**m).clone()), Some(tag.clone()));
            assert!(val.meta().is_none());
        }
        assert!(!SprigVal::nil().with_meta(tag.clone()).is_truthy());
        assert!(SprigVal::nil().with_meta(tag).is_nil());
    }

    #[test]
    fn test_type_name() {
        assert_eq!(SprigVal::nil().type_name(), "nil");
        assert_eq!(SprigVal::number(1).type_name(), "number");
        assert_eq!(SprigVal::hash_map(vec![]).type_name(), "hash-map");
    }
}
