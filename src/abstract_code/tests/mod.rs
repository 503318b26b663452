//! Converter tests. Terms are built with the helpers below, all annotated with line 1.

mod clauses_tests;
mod forms_tests;
mod operators_tests;
mod var_tests;

use crate::abstract_code::scope::Scope;
use crate::abstract_code::{RenderContext, ScopedMacroString, convert};
use crate::abstract_code::types;
use crate::render_messages::render_warnings::RenderWarning;
use crate::settings::RenderConfig;
use crate::term::Term;
use std::cell::RefCell;

pub const LINE: i64 = 1;

fn tagged(tag: &str, mut payload: Vec<Term>) -> Term {
    let mut elements = vec![Term::atom(tag), Term::integer(LINE)];
    elements.append(&mut payload);
    Term::tuple(elements)
}

pub fn var(name: &str) -> Term {
    tagged("var", vec![Term::atom(name)])
}

pub fn atom(value: &str) -> Term {
    tagged("atom", vec![Term::atom(value)])
}

pub fn integer(value: i64) -> Term {
    tagged("integer", vec![Term::integer(value)])
}

pub fn string(value: &str) -> Term {
    tagged("string", vec![Term::string(value)])
}

pub fn nil() -> Term {
    tagged("nil", vec![])
}

pub fn cons(head: Term, tail: Term) -> Term {
    tagged("cons", vec![head, tail])
}

/// A proper list expression.
pub fn list(elements: Vec<Term>) -> Term {
    elements
        .into_iter()
        .rev()
        .fold(nil(), |tail, head| cons(head, tail))
}

pub fn tuple(elements: Vec<Term>) -> Term {
    tagged("tuple", vec![Term::list(elements)])
}

pub fn op(operator: &str, left: Term, right: Term) -> Term {
    tagged("op", vec![Term::atom(operator), left, right])
}

pub fn unary(operator: &str, operand: Term) -> Term {
    tagged("op", vec![Term::atom(operator), operand])
}

pub fn match_expr(pattern: Term, expression: Term) -> Term {
    tagged("match", vec![pattern, expression])
}

pub fn local_call(name: &str, arguments: Vec<Term>) -> Term {
    tagged("call", vec![atom(name), Term::list(arguments)])
}

pub fn remote_call(module: &str, name: &str, arguments: Vec<Term>) -> Term {
    let remote = tagged("remote", vec![atom(module), atom(name)]);
    tagged("call", vec![remote, Term::list(arguments)])
}

/// `{clause, 1, Patterns, [Guards], Body}` with one guard alternative per inner vec.
pub fn clause(patterns: Vec<Term>, guards: Vec<Vec<Term>>, body: Vec<Term>) -> Term {
    let guards = guards.into_iter().map(Term::list).collect();
    tagged(
        "clause",
        vec![Term::list(patterns), Term::list(guards), Term::list(body)],
    )
}

pub fn case(expression: Term, clauses: Vec<Term>) -> Term {
    tagged("case", vec![expression, Term::list(clauses)])
}

pub fn fun(clauses: Vec<Term>) -> Term {
    tagged(
        "fun",
        vec![Term::tuple(vec![Term::atom("clauses"), Term::list(clauses)])],
    )
}

pub fn function(name: &str, arity: i64, clauses: Vec<Term>) -> Term {
    tagged(
        "function",
        vec![Term::atom(name), Term::integer(arity), Term::list(clauses)],
    )
}

pub fn attribute(name: &str, value: Term) -> Term {
    tagged("attribute", vec![Term::atom(name), value])
}

pub fn builtin_type(subtype: &str, arguments: Vec<Term>) -> Term {
    tagged("type", vec![Term::atom(subtype), Term::list(arguments)])
}

/// `{type, 1, fun, [{type, 1, product, Params}, Return]}`
pub fn fun_type(parameters: Vec<Term>, return_type: Term) -> Term {
    builtin_type("fun", vec![builtin_type("product", parameters), return_type])
}

pub fn user_type(name: &str, arguments: Vec<Term>) -> Term {
    tagged("user_type", vec![Term::atom(name), Term::list(arguments)])
}

pub fn remote_type(module: &str, name: &str, arguments: Vec<Term>) -> Term {
    tagged(
        "remote_type",
        vec![Term::list(vec![atom(module), atom(name), Term::list(arguments)])],
    )
}

/// Runs `render` with a fresh context and returns what it produced plus any warnings.
pub fn with_context<T>(render: impl FnOnce(&RenderContext) -> T) -> (T, Vec<RenderWarning>) {
    let config = RenderConfig::default();
    let warnings = RefCell::new(Vec::new());
    let ctx = RenderContext::new(&config, &warnings);

    let output = render(&ctx);
    (output, warnings.into_inner())
}

pub fn render_in(term: &Term, scope: &Scope) -> ScopedMacroString {
    with_context(|ctx| convert(term, scope, ctx)).0
}

/// An expression in an empty scope.
pub fn render(term: &Term) -> String {
    render_in(term, &Scope::empty()).macro_string
}

pub fn render_type(term: &Term) -> String {
    with_context(|ctx| types::convert(term, ctx)).0
}
