use super::{
    LINE, atom, case, clause, integer, local_call, match_expr, op, render, render_in, tuple, var,
    with_context,
};
use crate::abstract_code::clauses::{ClauseKind, convert_clause};
use crate::abstract_code::scope::Scope;
use crate::abstract_code::convert_body;
use crate::term::Term;

fn if_expr(clauses: Vec<Term>) -> Term {
    Term::tuple(vec![Term::atom("if"), Term::integer(LINE), Term::list(clauses)])
}

fn receive(clauses: Vec<Term>) -> Term {
    Term::tuple(vec![Term::atom("receive"), Term::integer(LINE), Term::list(clauses)])
}

fn receive_after(clauses: Vec<Term>, timeout: Term, after: Vec<Term>) -> Term {
    Term::tuple(vec![
        Term::atom("receive"),
        Term::integer(LINE),
        Term::list(clauses),
        timeout,
        Term::list(after),
    ])
}

fn block(body: Vec<Term>) -> Term {
    Term::tuple(vec![Term::atom("block"), Term::integer(LINE), Term::list(body)])
}

#[test]
fn case_clauses_bind_new_names_and_export_them() {
    let term = case(
        var("X"),
        vec![
            clause(vec![tuple(vec![atom("ok"), var("V")])], vec![], vec![var("V")]),
            clause(vec![var("_")], vec![], vec![atom("none")]),
        ],
    );
    let converted = render_in(&term, &Scope::binding("x"));

    assert_eq!(
        converted.macro_string,
        "case x do\n  {:ok, v} -> v\n  _ -> :none\nend"
    );
    assert_eq!(converted.declared_scope, Scope::binding("v"));
}

#[test]
fn case_patterns_pin_names_bound_outside() {
    let term = case(
        var("Y"),
        vec![clause(vec![tuple(vec![atom("ok"), var("X")])], vec![], vec![atom("same")])],
    );
    let converted = render_in(&term, &Scope::new(["x", "y"], false));

    assert_eq!(converted.macro_string, "case y do\n  {:ok, ^x} -> :same\nend");
}

#[test]
fn names_repeated_in_one_case_pattern_are_not_pinned() {
    let term = case(
        var("P"),
        vec![clause(vec![tuple(vec![var("A"), var("A")])], vec![], vec![var("A")])],
    );
    let converted = render_in(&term, &Scope::binding("p"));

    assert_eq!(converted.macro_string, "case p do\n  {a, a} -> a\nend");
}

#[test]
fn guards_join_tests_with_and_and_alternatives_with_when() {
    let head = clause(
        vec![var("X")],
        vec![
            vec![
                local_call("is_integer", vec![var("X")]),
                op(">", var("X"), integer(0)),
            ],
            vec![local_call("is_atom", vec![var("X")])],
        ],
        vec![var("X")],
    );

    let converted = with_context(|ctx| convert_clause(&head, &Scope::empty(), ClauseKind::Function, ctx))
        .0
        .expect("clause term");

    assert_eq!(
        converted.head_with_guard(),
        "x when is_integer(x) and (x > 0) when is_atom(x)"
    );
}

#[test]
fn if_becomes_cond() {
    let term = if_expr(vec![
        clause(vec![], vec![vec![op(">", var("X"), integer(0))]], vec![atom("positive")]),
        clause(vec![], vec![vec![atom("true")]], vec![atom("other")]),
    ]);

    assert_eq!(
        render_in(&term, &Scope::binding("x")).macro_string,
        "cond do\n  x > 0 -> :positive\n  true -> :other\nend"
    );
}

#[test]
fn if_alternatives_become_or() {
    let term = if_expr(vec![clause(
        vec![],
        vec![
            vec![atom("false"), atom("true")],
            vec![atom("true")],
        ],
        vec![atom("ok")],
    )]);

    assert_eq!(render(&term), "cond do\n  (false and true) or true -> :ok\nend");
}

#[test]
fn receive_with_after() {
    let term = receive_after(
        vec![clause(vec![tuple(vec![atom("msg"), var("M")])], vec![], vec![var("M")])],
        integer(1000),
        vec![atom("timeout")],
    );

    assert_eq!(
        render(&term),
        "receive do\n  {:msg, m} -> m\nafter\n  1000 -> :timeout\nend"
    );
}

#[test]
fn receive_without_after() {
    let term = receive(vec![clause(vec![atom("stop")], vec![], vec![atom("ok")])]);
    assert_eq!(render(&term), "receive do\n  :stop -> :ok\nend");
}

#[test]
fn multi_line_arm_bodies_are_indented() {
    let term = case(
        var("X"),
        vec![clause(
            vec![var("_")],
            vec![],
            vec![match_expr(var("A"), integer(1)), var("A")],
        )],
    );

    assert_eq!(
        render_in(&term, &Scope::binding("x")).macro_string,
        "case x do\n  _ ->\n    a = 1\n    a\nend"
    );
}

#[test]
fn blocks_with_several_expressions_are_parenthesised() {
    let term = block(vec![match_expr(var("A"), integer(1)), var("A")]);
    assert_eq!(render(&term), "(\n  a = 1\n  a\n)");

    assert_eq!(render(&block(vec![integer(1)])), "1");
}

#[test]
fn body_expressions_thread_bindings() {
    let body = [
        match_expr(var("A"), integer(1)),
        match_expr(var("A"), integer(2)),
        var("A"),
    ];
    let converted = with_context(|ctx| convert_body(&body, &Scope::empty(), ctx)).0;

    // The second match is a match against the existing binding, not a rebinding
    assert_eq!(converted.macro_string, "a = 1\n^a = 2\na");
    assert_eq!(converted.declared_scope, Scope::binding("a"));
}

#[test]
fn matches_inside_patterns_do_not_pin() {
    // f(X = {A, B}) as a function head
    let head = clause(
        vec![match_expr(var("X"), tuple(vec![var("A"), var("B")]))],
        vec![],
        vec![var("X")],
    );

    let converted = with_context(|ctx| convert_clause(&head, &Scope::empty(), ClauseKind::Function, ctx))
        .0
        .expect("clause term");

    assert_eq!(converted.head, "x = {a, b}");
    assert_eq!(converted.declared_scope.sorted_names(), vec!["a", "b", "x"]);
}

#[test]
fn clauses_with_other_tags_are_not_clauses() {
    let converted =
        with_context(|ctx| convert_clause(&atom("x"), &Scope::empty(), ClauseKind::Case, ctx)).0;
    assert!(converted.is_none());
}
