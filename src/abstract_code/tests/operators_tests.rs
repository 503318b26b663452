use super::{LINE, atom, integer, op, render, render_in, unary, var, with_context};
use crate::abstract_code::operators::{OperatorRendering, binary_operator, render_binary};
use crate::abstract_code::scope::Scope;
use crate::abstract_code::convert;
use crate::term::Term;

#[test]
fn comparison_operators_use_elixir_spelling() {
    assert_eq!(render(&op("=:=", integer(1), integer(1))), "1 === 1");
    assert_eq!(render(&op("=/=", integer(1), integer(2))), "1 !== 2");
    assert_eq!(render(&op("/=", integer(1), integer(2))), "1 != 2");
    assert_eq!(render(&op("=<", integer(1), integer(2))), "1 <= 2");
    assert_eq!(render(&op("andalso", atom("true"), atom("false"))), "true and false");
}

#[test]
fn integer_and_bitwise_operators_become_calls() {
    assert_eq!(render(&op("div", integer(7), integer(2))), "div(7, 2)");
    assert_eq!(render(&op("rem", integer(7), integer(2))), "rem(7, 2)");
    assert_eq!(render(&op("band", integer(6), integer(3))), "Bitwise.band(6, 3)");
    assert_eq!(render(&unary("bnot", integer(1))), "Bitwise.bnot(1)");
}

#[test]
fn send_is_a_call() {
    let term = op("!", var("Pid"), atom("ping"));
    assert_eq!(render_in(&term, &Scope::binding("pid")).macro_string, "send(pid, :ping)");
}

#[test]
fn nested_infix_operands_are_parenthesised() {
    let term = op("*", op("+", integer(1), integer(2)), integer(3));
    assert_eq!(render(&term), "(1 + 2) * 3");

    let call_operand = op("+", op("div", integer(4), integer(2)), integer(1));
    assert_eq!(render(&call_operand), "div(4, 2) + 1");
}

#[test]
fn prefix_operators() {
    assert_eq!(render(&unary("-", var("X"))), "-x");
    assert_eq!(render(&unary("not", atom("true"))), "not true");
}

#[test]
fn nested_prefix_operators_keep_their_sign() {
    let double_negation = unary("-", unary("-", var("X")));
    assert_eq!(render_in(&double_negation, &Scope::binding("x")).macro_string, "-(-x)");

    assert_eq!(render(&unary("-", integer(-1))), "-(-1)");
    assert_eq!(render(&unary("+", integer(-1))), "+(-1)");
    assert_eq!(render(&unary("-", op("+", integer(1), integer(2)))), "-(1 + 2)");
    assert_eq!(render(&unary("not", unary("not", atom("true")))), "not (not true)");
}

#[test]
fn unknown_operators_fall_back_to_the_erlang_module() {
    assert_eq!(render_binary("@@", "a", "b"), ":erlang.\"@@\"(a, b)");
    assert_eq!(binary_operator("++"), Some(OperatorRendering::Infix("++")));
    assert_eq!(binary_operator("@@"), None);
}

#[test]
fn non_atom_operators_are_sentinels() {
    let term = Term::tuple(vec![
        Term::atom("op"),
        Term::integer(LINE),
        Term::integer(0),
        integer(1),
        integer(2),
    ]);
    assert_eq!(render(&term), "1 unknown_operator 2");
}

#[test]
fn operands_thread_bindings() {
    let term = op("+", var("X"), var("X"));
    let (converted, warnings) = with_context(|ctx| convert(&term, &Scope::empty(), ctx));

    assert_eq!(converted.macro_string, "x + x");
    assert_eq!(converted.declared_scope, Scope::binding("x"));
    assert!(warnings.is_empty());
}
