//! `{op, Anno, Operator, Left, Right}` and `{op, Anno, Operator, Operand}`.
//!
//! Erlang operators either have a direct infix counterpart or become a call.

use crate::abstract_code::scope::Scope;
use crate::abstract_code::{MacroString, RenderContext, ScopedMacroString, convert, if_tag};
use crate::settings::{UNKNOWN_ABSTRACT_CODE, UNKNOWN_OPERATOR};
use crate::term::Term;
use crate::term::term_schema::{BINARY_OP, UNARY_OP};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorRendering {
    Infix(&'static str),
    Prefix(&'static str),
    Call(&'static str),
}

pub fn binary_operator(operator: &str) -> Option<OperatorRendering> {
    use OperatorRendering::*;

    let rendering = match operator {
        "+" => Infix("+"),
        "-" => Infix("-"),
        "*" => Infix("*"),
        "/" => Infix("/"),
        "==" => Infix("=="),
        "/=" => Infix("!="),
        "=:=" => Infix("==="),
        "=/=" => Infix("!=="),
        "<" => Infix("<"),
        ">" => Infix(">"),
        "=<" => Infix("<="),
        ">=" => Infix(">="),
        "++" => Infix("++"),
        "--" => Infix("--"),
        "andalso" | "and" => Infix("and"),
        "orelse" | "or" => Infix("or"),
        "div" => Call("div"),
        "rem" => Call("rem"),
        "!" => Call("send"),
        "xor" => Call(":erlang.xor"),
        "band" => Call("Bitwise.band"),
        "bor" => Call("Bitwise.bor"),
        "bxor" => Call("Bitwise.bxor"),
        "bsl" => Call("Bitwise.bsl"),
        "bsr" => Call("Bitwise.bsr"),
        _ => return None,
    };

    Some(rendering)
}

pub fn unary_operator(operator: &str) -> Option<OperatorRendering> {
    use OperatorRendering::*;

    let rendering = match operator {
        "-" => Prefix("-"),
        "+" => Prefix("+"),
        "not" => Prefix("not "),
        "bnot" => Call("Bitwise.bnot"),
        _ => return None,
    };

    Some(rendering)
}

pub fn try_convert_binary(term: &Term, scope: &Scope, ctx: &RenderContext) -> Option<ScopedMacroString> {
    if_tag(term, &BINARY_OP, |op| {
        let (Some(operator), Some(left), Some(right)) =
            (op.field("operator"), op.field("left"), op.field("right"))
        else {
            return ScopedMacroString::unscoped(UNKNOWN_ABSTRACT_CODE);
        };

        let left_converted = convert(left, scope, ctx);
        let right_converted = convert(right, &scope.thread(&left_converted.declared_scope), ctx);
        let declared_scope = left_converted
            .declared_scope
            .union(&right_converted.declared_scope);

        let left_text = parenthesize_operand(left, left_converted.macro_string);
        let right_text = parenthesize_operand(right, right_converted.macro_string);

        let macro_string = match operator.as_atom() {
            Some(name) => render_binary(name, &left_text, &right_text),
            None => format!("{left_text} {UNKNOWN_OPERATOR} {right_text}"),
        };

        ScopedMacroString::new(macro_string, declared_scope)
    })
}

pub fn render_binary(operator: &str, left: &str, right: &str) -> MacroString {
    match binary_operator(operator) {
        Some(OperatorRendering::Infix(infix)) => format!("{left} {infix} {right}"),
        Some(OperatorRendering::Call(function)) => format!("{function}({left}, {right})"),
        Some(OperatorRendering::Prefix(_)) | None => {
            // Every Erlang operator is also a function in the erlang module
            format!(":erlang.\"{operator}\"({left}, {right})")
        }
    }
}

pub fn try_convert_unary(term: &Term, scope: &Scope, ctx: &RenderContext) -> Option<ScopedMacroString> {
    if_tag(term, &UNARY_OP, |op| {
        let (Some(operator), Some(operand)) = (op.field("operator"), op.field("operand")) else {
            return ScopedMacroString::unscoped(UNKNOWN_ABSTRACT_CODE);
        };

        let converted = convert(operand, scope, ctx);
        let operand_text = parenthesize_prefix_operand(operand, converted.macro_string);

        let macro_string = match operator.as_atom() {
            Some(name) => render_unary(name, &operand_text),
            None => format!("{UNKNOWN_OPERATOR} {operand_text}"),
        };

        ScopedMacroString::new(macro_string, converted.declared_scope)
    })
}

pub fn render_unary(operator: &str, operand: &str) -> MacroString {
    match unary_operator(operator) {
        Some(OperatorRendering::Prefix(prefix)) => format!("{prefix}{operand}"),
        Some(OperatorRendering::Call(function)) => format!("{function}({operand})"),
        Some(OperatorRendering::Infix(_)) | None => format!(":erlang.\"{operator}\"({operand})"),
    }
}

/// Nested infix operators keep their grouping explicit.
fn parenthesize_operand(operand: &Term, macro_string: MacroString) -> MacroString {
    let is_infix = BINARY_OP
        .matches(operand)
        .and_then(|op| op.field("operator")?.as_atom())
        .and_then(binary_operator)
        .is_some_and(|rendering| matches!(rendering, OperatorRendering::Infix(_)));

    if is_infix {
        format!("({macro_string})")
    } else {
        macro_string
    }
}

/// `--x` and `+-1` would read as different operators, so a signed operand is wrapped too.
fn parenthesize_prefix_operand(operand: &Term, macro_string: MacroString) -> MacroString {
    let is_prefix = UNARY_OP
        .matches(operand)
        .and_then(|op| op.field("operator")?.as_atom())
        .and_then(unary_operator)
        .is_some_and(|rendering| matches!(rendering, OperatorRendering::Prefix(_)));

    if is_prefix || macro_string.starts_with(['-', '+']) {
        format!("({macro_string})")
    } else {
        parenthesize_operand(operand, macro_string)
    }
}
