//! User, remote and annotated types, plus the literal and variable terms that appear inside types.

use crate::abstract_code::calls::module_to_macro_string;
use crate::abstract_code::literals::{self, function_name_to_macro_string};
use crate::abstract_code::operators::{render_binary, render_unary};
use crate::abstract_code::types::{convert, convert_comma_separated};
use crate::abstract_code::var::normalize_name;
use crate::abstract_code::{MacroString, RenderContext, if_tag};
use crate::settings::{UNKNOWN_NAME, UNKNOWN_OPERATOR, UNKNOWN_TYPE};
use crate::term::Term;
use crate::term::term_schema::{ANN_TYPE, ATOM, BINARY_OP, REMOTE_TYPE, UNARY_OP, USER_TYPE, VAR};

/// `{user_type, Anno, Name, Arguments}`, a type declared in the same module.
pub fn try_convert_user_type(term: &Term, ctx: &RenderContext) -> Option<MacroString> {
    if_tag(term, &USER_TYPE, |user_type| {
        let (Some(name), Some(arguments)) = (
            user_type.field("name").and_then(Term::as_atom),
            user_type.list_field("arguments"),
        ) else {
            return String::from(UNKNOWN_TYPE);
        };

        format!(
            "{}({})",
            function_name_to_macro_string(name),
            convert_comma_separated(arguments, ctx)
        )
    })
}

/// `{remote_type, Anno, [Module, Name, Arguments]}`, e.g. `String.t()`.
pub fn try_convert_remote_type(term: &Term, ctx: &RenderContext) -> Option<MacroString> {
    if_tag(term, &REMOTE_TYPE, |remote| {
        let Some([module, name, arguments]) = remote.list_field("arguments") else {
            return String::from(UNKNOWN_TYPE);
        };

        let (Some(module), Some(name), Some(arguments)) =
            (atom_value(module), atom_value(name), arguments.as_list())
        else {
            return String::from(UNKNOWN_TYPE);
        };

        format!(
            "{}.{}({})",
            module_to_macro_string(module),
            function_name_to_macro_string(name),
            convert_comma_separated(arguments, ctx)
        )
    })
}

/// `{ann_type, Anno, [Var, Type]}`, the `Name :: Type` form in parameter lists.
pub fn try_convert_ann_type(term: &Term, ctx: &RenderContext) -> Option<MacroString> {
    if_tag(term, &ANN_TYPE, |annotated| match annotated.list_field("arguments") {
        Some([var, annotated_type]) => {
            format!("{} :: {}", convert(var, ctx), convert(annotated_type, ctx))
        }
        _ => String::from(UNKNOWN_TYPE),
    })
}

/// Type variables never bind in a scope, they are just lower cased.
pub fn try_convert_var(term: &Term, _: &RenderContext) -> Option<MacroString> {
    if_tag(term, &VAR, |var| match var.field("name").and_then(Term::as_atom) {
        Some(name) => normalize_name(name),
        None => String::from(UNKNOWN_NAME),
    })
}

pub fn try_convert_atom(term: &Term, _: &RenderContext) -> Option<MacroString> {
    literals::convert_atom(term)
}

pub fn try_convert_integer(term: &Term, _: &RenderContext) -> Option<MacroString> {
    literals::convert_integer(term)
}

/// Singleton integer types can be written as constant expressions, `-1` or `1 bsl 8`.
pub fn try_convert_unary_op(term: &Term, ctx: &RenderContext) -> Option<MacroString> {
    if_tag(term, &UNARY_OP, |op| {
        let (Some(operator), Some(operand)) = (op.field("operator"), op.field("operand")) else {
            return String::from(UNKNOWN_TYPE);
        };

        let operand = convert(operand, ctx);
        match operator.as_atom() {
            Some(operator) => render_unary(operator, &operand),
            None => format!("{UNKNOWN_OPERATOR} {operand}"),
        }
    })
}

pub fn try_convert_binary_op(term: &Term, ctx: &RenderContext) -> Option<MacroString> {
    if_tag(term, &BINARY_OP, |op| {
        let (Some(operator), Some(left), Some(right)) =
            (op.field("operator"), op.field("left"), op.field("right"))
        else {
            return String::from(UNKNOWN_TYPE);
        };

        let (left, right) = (convert(left, ctx), convert(right, ctx));
        match operator.as_atom() {
            Some(operator) => render_binary(operator, &left, &right),
            None => format!("{left} {UNKNOWN_OPERATOR} {right}"),
        }
    })
}

fn atom_value(term: &Term) -> Option<&str> {
    ATOM.matches(term)?.field("value")?.as_atom()
}
