// sprig-core - Special form integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for Sprig special forms.
//!
//! Tests for: def, defn, fn, if, do, let, quote, quasiquote

mod common;

use common::{SprigVal, eval_all, eval_str, eval_str_with_env, new_env};

// =============================================================================
// def / defn
// =============================================================================

#[test]
fn test_def_returns_value() {
    assert_eval!("(def x 10)", SprigVal::number(10));
}

#[test]
fn test_def_binds_in_env() {
    let env = new_env();
    eval_str_with_env("(def x (+ 1 2))", &env).unwrap();
    assert_eq!(eval_str_with_env("x", &env), Ok(SprigVal::number(3)));
}

#[test]
fn test_def_redefines() {
    let env = new_env();
    assert_eq!(eval_all("(def x 1) (def x 2) x", &env), Ok(SprigVal::number(2)));
}

#[test]
fn test_def_requires_symbol() {
    assert_eval_err_contains!("(def 1 2)", "Symbol expected");
    assert_eval_err_contains!("(def x)", "Wrong number of arguments");
}

#[test]
fn test_failed_def_leaves_env_untouched() {
    let env = new_env();
    assert!(eval_str_with_env("(def y (undefined-fn))", &env).is_err());
    assert_eq!(
        eval_str_with_env("y", &env),
        Err("'y' not found".to_string())
    );
}

#[test]
fn test_defn() {
    let env = new_env();
    let result = eval_all("(defn inc [x] (+ x 1)) (inc 41)", &env);
    assert_eq!(result, Ok(SprigVal::number(42)));
}

#[test]
fn test_defn_multi_form_body() {
    let env = new_env();
    let result = eval_all(
        "(def log (atom 0)) (defn f [x] (reset! log x) (* x 2)) (list (f 4) @log)",
        &env,
    )
    .unwrap();
    assert_eq!(
        result,
        SprigVal::list([SprigVal::number(8), SprigVal::number(4)])
    );
}

// =============================================================================
// fn
// =============================================================================

#[test]
fn test_fn_immediate_call() {
    assert_eval!("((fn [a b] (+ a b)) 2 3)", SprigVal::number(5));
}

#[test]
fn test_fn_closes_over_env() {
    let env = new_env();
    let result = eval_all(
        "(defn adder [n] (fn [x] (+ x n))) (def add5 (adder 5)) (add5 10)",
        &env,
    );
    assert_eq!(result, Ok(SprigVal::number(15)));
}

#[test]
fn test_fn_variadic() {
    let env = new_env();
    eval_all("(defn f [& xs] (count xs))", &env).unwrap();
    assert_eq!(eval_str_with_env("(f)", &env), Ok(SprigVal::number(0)));
    assert_eq!(eval_str_with_env("(f 1 2 3)", &env), Ok(SprigVal::number(3)));
    assert_eq!(
        eval_str_with_env("((fn [a & more] more) 1 2 3)", &env),
        Ok(SprigVal::list([SprigVal::number(2), SprigVal::number(3)]))
    );
}

#[test]
fn test_fn_arity_errors() {
    assert_eval_err_contains!("((fn [a b] a) 1)", "Wrong number of arguments");
    assert_eval_err_contains!("((fn [a] a) 1 2)", "Wrong number of arguments");
}

#[test]
fn test_fn_bad_params() {
    assert_eval_err_contains!("(fn [1] 1)", "Symbol expected");
    assert_eval_err_contains!("(fn x 1)", "Expected list of bindings");
    assert_eval_err_contains!("(fn [& a b] 1)", "Expected list of bindings");
}

#[test]
fn test_fn_params_as_list() {
    assert_eval!("((fn (a b) (- a b)) 5 3)", SprigVal::number(2));
}

#[test]
fn test_apply_non_function() {
    assert_eval_err_contains!("(1 2 3)", "Can't apply function to arguments");
}

// =============================================================================
// if / do
// =============================================================================

#[test]
fn test_if() {
    assert_eval!("(if true 1 2)", SprigVal::number(1));
    assert_eval!("(if false 1 2)", SprigVal::number(2));
    assert_eval!("(if nil 1 2)", SprigVal::number(2));
    assert_eval!("(if 0 1 2)", SprigVal::number(1));
    assert_eval!("(if \"\" 1 2)", SprigVal::number(1));
    assert_eval!("(if (list) 1 2)", SprigVal::number(1));
}

#[test]
fn test_if_without_else() {
    assert_eval!("(if false 1)", SprigVal::NIL);
}

#[test]
fn test_if_arity() {
    assert_eval_err_contains!("(if true)", "Wrong number of arguments");
    assert_eval_err_contains!("(if true 1 2 3)", "Wrong number of arguments");
}

#[test]
fn test_if_only_evaluates_taken_branch() {
    assert_eval!("(if true 1 (undefined-fn))", SprigVal::number(1));
}

#[test]
fn test_do() {
    assert_eval!("(do)", SprigVal::NIL);
    assert_eval!("(do 1 2 3)", SprigVal::number(3));
    let env = new_env();
    assert_eq!(
        eval_all("(do (def a 1) (def b 2)) (+ a b)", &env),
        Ok(SprigVal::number(3))
    );
}

// =============================================================================
// let
// =============================================================================

#[test]
fn test_let_sequential_bindings() {
    assert_eval!("(let [a 1 b (+ a 1)] b)", SprigVal::number(2));
    assert_eval!("(let (a 2 b 3) (* a b))", SprigVal::number(6));
}

#[test]
fn test_let_shadows_without_leaking() {
    let env = new_env();
    assert_eq!(
        eval_all("(def a 1) (let [a 2] a)", &env),
        Ok(SprigVal::number(2))
    );
    assert_eq!(eval_str_with_env("a", &env), Ok(SprigVal::number(1)));
}

#[test]
fn test_let_empty() {
    assert_eval!("(let [] 5)", SprigVal::number(5));
    assert_eval!("(let [])", SprigVal::NIL);
}

#[test]
fn test_let_bad_bindings() {
    assert_eval_err_contains!("(let [a] a)", "Expected list of bindings");
    assert_eval_err_contains!("(let [1 2] 1)", "Symbol expected");
    assert_eval_err_contains!("(let 5 1)", "Expected list of bindings");
}

// =============================================================================
// quote / quasiquote
// =============================================================================

#[test]
fn test_quote() {
    assert_eval!("'a", SprigVal::symbol("a"));
    assert_eval!(
        "'(1 b)",
        SprigVal::list([SprigVal::number(1), SprigVal::symbol("b")])
    );
    assert_eval_err_contains!("(quote)", "Wrong number of arguments");
}

#[test]
fn test_quasiquote_unquote() {
    let env = new_env();
    let result = eval_all("(def b 2) `(a ~b c)", &env).unwrap();
    assert_eq!(
        result,
        SprigVal::list([
            SprigVal::symbol("a"),
            SprigVal::number(2),
            SprigVal::symbol("c"),
        ])
    );
}

#[test]
fn test_quasiquote_splice() {
    let env = new_env();
    let result = eval_all("(def xs (list 2 3)) `(1 ~@xs 4)", &env).unwrap();
    assert_eq!(
        result,
        SprigVal::list([1, 2, 3, 4].map(SprigVal::number))
    );
}

#[test]
fn test_quasiquote_nested_unquote() {
    let env = new_env();
    let result = eval_all("(def x 7) `(a (b ~x))", &env).unwrap();
    assert_eq!(
        result,
        SprigVal::list([
            SprigVal::symbol("a"),
            SprigVal::list([SprigVal::symbol("b"), SprigVal::number(7)]),
        ])
    );
}

#[test]
fn test_quasiquote_atom() {
    assert_eval!("`x", SprigVal::symbol("x"));
    assert_eval!("`()", SprigVal::empty_list());
}

#[test]
fn test_quasiquote_reader_form() {
    let form = common::read_str("`(1 ~a 3)").unwrap();
    assert_eq!(
        common::pr_str(&form, true),
        "(quasiquote (1 (unquote a) 3))"
    );
    let env = new_env();
    assert_eq!(
        eval_all("(def a 2) `(1 ~a 3)", &env),
        Ok(SprigVal::list([1, 2, 3].map(SprigVal::number)))
    );
}

#[test]
fn test_arithmetic_nests_as_left_fold() {
    assert_eval!("(/ (- (+ 5 (* 2 3)) 3) 4)", SprigVal::number(2));
    assert_eval!("(* -3 6)", SprigVal::number(-18));
    assert_eval!("(- 10 1 2 3)", SprigVal::number(4));
}

#[test]
fn test_let_example_from_bindings() {
    assert_eval!(
        "(let [p (+ 2 3) q (+ 2 p)] (+ p q))",
        SprigVal::number(12)
    );
}
