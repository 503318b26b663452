//! Function types, `{type, Anno, fun, ParameterReturn}`.
//!
//! The same signature renders two ways. Inside another type it is the anonymous
//! `(params -> return)`. Under a spec it is spliced with the function's name as
//! `name(params) :: return`.

use crate::abstract_code::types::parameter_return;
use crate::abstract_code::types::if_subtype;
use crate::abstract_code::{MacroString, RenderContext};
use crate::settings::UNKNOWN_PARAMETER_RETURN;
use crate::term::Term;
use crate::term::term_schema::TaggedTerm;

const SUBTYPE: &str = "fun";

pub fn try_convert(type_term: &Term, ctx: &RenderContext) -> Option<MacroString> {
    if_subtype(type_term, SUBTYPE, |fun| to_macro_string(&fun, None, ctx))
}

pub fn try_convert_named(
    type_term: &Term,
    name_macro_string: &str,
    ctx: &RenderContext,
) -> Option<MacroString> {
    if_subtype(type_term, SUBTYPE, |fun| {
        to_macro_string(&fun, Some(name_macro_string), ctx)
    })
}

fn to_macro_string(fun: &TaggedTerm, name_macro_string: Option<&str>, ctx: &RenderContext) -> MacroString {
    match fun.field("arguments") {
        Some(Term::List(parameter_return)) => {
            parameter_return::to_macro_string(parameter_return, name_macro_string, ctx)
        }
        _ => String::from(UNKNOWN_PARAMETER_RETURN),
    }
}
