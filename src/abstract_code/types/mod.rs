//! # Types
//!
//! Type terms from specs and type declarations. Types bind nothing, so these converters
//! take no scope and return plain text.
//!
//! Most builtin types are `{type, Anno, Subtype, Arguments}`, which is why the
//! builtin converters guard on the subtype atom as well as the tag.

pub mod builtin_types;
pub mod fun_type;
pub mod named_types;
pub mod parameter_return;

use crate::abstract_code::{MacroString, RenderContext};
use crate::render_messages::render_warnings::{RenderWarning, WarningKind};
use crate::settings::UNKNOWN_TYPE;
use crate::term::Term;
use crate::term::term_schema::{TYPE, TaggedTerm, describe};
use crate::term_log;

pub type TypeConverter = fn(&Term, &RenderContext) -> Option<MacroString>;

// `builtin_types::try_convert_generic` accepts any subtype, so it comes after the specific ones
const TYPE_CONVERTERS: &[TypeConverter] = &[
    fun_type::try_convert,
    builtin_types::try_convert_product,
    builtin_types::try_convert_union,
    builtin_types::try_convert_tuple,
    builtin_types::try_convert_list,
    builtin_types::try_convert_nonempty_list,
    builtin_types::try_convert_nil,
    builtin_types::try_convert_map,
    builtin_types::try_convert_range,
    builtin_types::try_convert_binary,
    builtin_types::try_convert_generic,
    named_types::try_convert_user_type,
    named_types::try_convert_remote_type,
    named_types::try_convert_ann_type,
    named_types::try_convert_var,
    named_types::try_convert_atom,
    named_types::try_convert_integer,
    named_types::try_convert_unary_op,
    named_types::try_convert_binary_op,
];

/// `{type, Anno, Subtype, Arguments}` with a specific subtype.
pub fn if_subtype<'a, T>(
    term: &'a Term,
    subtype: &str,
    convert: impl FnOnce(TaggedTerm<'a>) -> T,
) -> Option<T> {
    let tagged = TYPE.matches(term)?;

    if tagged.field("subtype")?.as_atom()? != subtype {
        return None;
    }

    Some(convert(tagged))
}

pub fn try_convert(term: &Term, ctx: &RenderContext) -> Option<MacroString> {
    TYPE_CONVERTERS
        .iter()
        .find_map(|convert| convert(term, ctx))
}

/// Dispatch, falling back to sentinel text and a warning for unsupported types.
pub fn convert(term: &Term, ctx: &RenderContext) -> MacroString {
    match try_convert(term, ctx) {
        Some(macro_string) => macro_string,
        None => {
            term_log!(Yellow "No type converter for ", term.to_string());

            ctx.warn(RenderWarning::new(
                format!("`{}` is not a supported type", describe(term)),
                term.line(),
                WarningKind::UnsupportedType,
            ));

            String::from(UNKNOWN_TYPE)
        }
    }
}

pub fn convert_comma_separated(terms: &[Term], ctx: &RenderContext) -> MacroString {
    terms
        .iter()
        .map(|term| convert(term, ctx))
        .collect::<Vec<_>>()
        .join(", ")
}
