// sprig-core - Collection integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for Sprig lists, vectors and hash maps.
//!
//! Tests for: list, vector, cons, concat, conj, nth, first, rest, seq,
//! count, empty?, hash-map, assoc, dissoc, get, contains?, keys, vals,
//! and equality across collection kinds

mod common;

use common::{SprigVal, eval_all, eval_str, eval_str_with_env, new_env, pr_str};

fn printed(s: &str) -> String {
    pr_str(&eval_str(s).unwrap(), true)
}

// =============================================================================
// Lists and vectors
// =============================================================================

#[test]
fn test_list_and_vector_constructors() {
    assert_eq!(printed("(list 1 2 3)"), "(1 2 3)");
    assert_eq!(printed("(vector 1 2 3)"), "[1 2 3]");
    assert_eq!(printed("[1 (+ 1 1) 3]"), "[1 2 3]");
    assert_eq!(printed("(list)"), "()");
}

#[test]
fn test_list_vector_equality() {
    assert_eval!("(= [1 2 3] (list 1 2 3))", SprigVal::bool(true));
    assert_eval!("(= [] (list))", SprigVal::bool(true));
    assert_eval!("(= [1 2] [1 2 3])", SprigVal::bool(false));
    assert_eval!("(= [[1] 2] (list (list 1) 2))", SprigVal::bool(true));
}

#[test]
fn test_cons_and_concat_return_lists() {
    assert_eq!(printed("(cons 1 [2 3])"), "(1 2 3)");
    assert_eq!(printed("(cons [1] (list))"), "([1])");
    assert_eq!(printed("(concat [1 2] (list 3) [])"), "(1 2 3)");
    assert_eq!(printed("(concat)"), "()");
}

#[test]
fn test_conj() {
    assert_eq!(printed("(conj (list 1 2) 3 4)"), "(4 3 1 2)");
    assert_eq!(printed("(conj [1 2] 3 4)"), "[1 2 3 4]");
}

#[test]
fn test_first_rest_on_empty() {
    assert_eval!("(first nil)", SprigVal::NIL);
    assert_eval!("(first [])", SprigVal::NIL);
    assert_eq!(printed("(rest nil)"), "()");
    assert_eq!(printed("(rest [1 2 3])"), "(2 3)");
}

#[test]
fn test_nth_out_of_range_keeps_binding() {
    let env = new_env();
    eval_all("(def x (list 1 2 3))", &env).unwrap();
    assert_eq!(
        eval_str_with_env("(nth x 1)", &env),
        Ok(SprigVal::number(2))
    );
    assert_eq!(
        eval_str_with_env("(nth x 3)", &env),
        Err("Index out of range".to_string())
    );
    assert_eq!(
        eval_str_with_env("(nth x -1)", &env),
        Err("Index out of range".to_string())
    );
    assert_eq!(printed_in("x", &env), "(1 2 3)");
}

fn printed_in(s: &str, env: &common::Env) -> String {
    pr_str(&eval_str_with_env(s, env).unwrap(), true)
}

#[test]
fn test_seq() {
    assert_eq!(printed("(seq [1 2])"), "(1 2)");
    assert_eq!(printed("(seq \"ab\")"), "(\"a\" \"b\")");
    assert_eval!("(seq [])", SprigVal::NIL);
    assert_eval!("(seq \"\")", SprigVal::NIL);
    assert_eval!("(seq nil)", SprigVal::NIL);
}

#[test]
fn test_count_and_empty() {
    assert_eval!("(count [1 2 3])", SprigVal::number(3));
    assert_eval!("(count nil)", SprigVal::number(0));
    assert_eval!("(count {:a 1 :b 2})", SprigVal::number(2));
    assert_eval!("(empty? (list))", SprigVal::bool(true));
    assert_eval!("(empty? [1])", SprigVal::bool(false));
    assert_eval_err_contains!("(count 5)", "Can't apply function to arguments");
}

#[test]
fn test_sequence_predicates() {
    assert_eval!("(list? (list 1))", SprigVal::bool(true));
    assert_eval!("(list? [1])", SprigVal::bool(false));
    assert_eval!("(vector? [1])", SprigVal::bool(true));
    assert_eval!("(sequential? [1])", SprigVal::bool(true));
    assert_eval!("(sequential? {:a 1})", SprigVal::bool(false));
}

// =============================================================================
// Hash maps
// =============================================================================

#[test]
fn test_map_literal_and_hash_map() {
    assert_eq!(printed("{:a (+ 1 1)}"), "{:a 2}");
    assert_eq!(printed("(hash-map :a 1 \"b\" 2)"), "{:a 1 \"b\" 2}");
    assert_eval_err_contains!("(hash-map :a)", "Wrong number of arguments");
}

#[test]
fn test_map_equality_ignores_order() {
    assert_eval!("(= {:a 1 :b 2} {:b 2 :a 1})", SprigVal::bool(true));
    assert_eval!("(= {:a 1} {:a 2})", SprigVal::bool(false));
    assert_eval!("(= {:a 1} {:a 1 :b 2})", SprigVal::bool(false));
}

#[test]
fn test_assoc_moves_key_to_end() {
    assert_eq!(
        printed("(assoc {:a 1 :b 2 :c 1} :a 3 :c 1)"),
        "{:b 2 :a 3 :c 1}"
    );
}

#[test]
fn test_dissoc() {
    assert_eq!(printed("(dissoc {:cde 345 :fgh 456} :cde)"), "{:fgh 456}");
    assert_eq!(printed("(dissoc {:a 1} :missing)"), "{:a 1}");
    assert_eval_err_contains!("(dissoc [1 2] 0)", "Can't apply function to arguments");
}

#[test]
fn test_get_and_contains() {
    assert_eval!("(get {:a 1} :a)", SprigVal::number(1));
    assert_eval!("(get {:a 1} :b)", SprigVal::NIL);
    assert_eval!("(get nil :a)", SprigVal::NIL);
    assert_eval!("(contains? {:a nil} :a)", SprigVal::bool(true));
    assert_eval!("(contains? {:a 1} :b)", SprigVal::bool(false));
}

#[test]
fn test_keys_and_vals_follow_insertion_order() {
    assert_eq!(printed("(keys {:x 1 :y 2})"), "(:x :y)");
    assert_eq!(printed("(vals {:x 1 :y 2})"), "(1 2)");
}

#[test]
fn test_collections_are_persistent() {
    let env = new_env();
    eval_all("(def m {:a 1}) (def v [1]) (assoc m :b 2) (conj v 2)", &env).unwrap();
    assert_eq!(printed_in("m", &env), "{:a 1}");
    assert_eq!(printed_in("v", &env), "[1]");
}

#[test]
fn test_equality_does_not_cross_other_kinds() {
    assert_eval!("(= [] \"\")", SprigVal::bool(false));
    assert_eval!("(= {} [])", SprigVal::bool(false));
    assert_eval!("(= :a \"a\")", SprigVal::bool(false));
    assert_eval!("(= 'a \"a\")", SprigVal::bool(false));
    assert_eval!(
        "(= {:a 11 :b 22} (hash-map :b 22 :a 11))",
        SprigVal::bool(true)
    );
}

#[test]
fn test_dissoc_then_get() {
    let env = new_env();
    eval_all("(def m (dissoc {:a 1 :b 2 :c 3} :a :c))", &env).unwrap();
    assert_eq!(eval_str_with_env("(get m :a)", &env), Ok(SprigVal::NIL));
    assert_eq!(eval_str_with_env("(get m :b)", &env), Ok(SprigVal::number(2)));
    assert_eq!(eval_str_with_env("(count m)", &env), Ok(SprigVal::number(1)));
}
