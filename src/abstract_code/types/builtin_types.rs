//! Builtin types: `{type, Anno, Subtype, Arguments}`.
//!
//! `Arguments` is a list for most types and the atom `any` for the unconstrained
//! `tuple()` and `map()`.

use crate::abstract_code::types::{convert, convert_comma_separated, if_subtype};
use crate::abstract_code::{MacroString, RenderContext};
use crate::settings::UNKNOWN_TYPE;
use crate::term::Term;
use crate::term::term_schema::{TYPE, TaggedTerm};

pub fn try_convert_product(term: &Term, ctx: &RenderContext) -> Option<MacroString> {
    if_subtype(term, "product", |product| {
        with_arguments(&product, |types| convert_comma_separated(types, ctx))
    })
}

pub fn try_convert_union(term: &Term, ctx: &RenderContext) -> Option<MacroString> {
    if_subtype(term, "union", |union| {
        with_arguments(&union, |types| {
            types
                .iter()
                .map(|member| convert(member, ctx))
                .collect::<Vec<_>>()
                .join(" | ")
        })
    })
}

pub fn try_convert_tuple(term: &Term, ctx: &RenderContext) -> Option<MacroString> {
    if_subtype(term, "tuple", |tuple| match tuple.field("arguments") {
        Some(Term::List(elements)) => format!("{{{}}}", convert_comma_separated(elements, ctx)),
        _ => String::from("tuple()"),
    })
}

pub fn try_convert_list(term: &Term, ctx: &RenderContext) -> Option<MacroString> {
    if_subtype(term, "list", |list| match list.list_field("arguments") {
        Some([element]) => format!("[{}]", convert(element, ctx)),
        _ => String::from("list()"),
    })
}

pub fn try_convert_nonempty_list(term: &Term, ctx: &RenderContext) -> Option<MacroString> {
    if_subtype(term, "nonempty_list", |list| match list.list_field("arguments") {
        Some([element]) => format!("[{}, ...]", convert(element, ctx)),
        _ => String::from("nonempty_list()"),
    })
}

pub fn try_convert_nil(term: &Term, _: &RenderContext) -> Option<MacroString> {
    if_subtype(term, "nil", |_| String::from("[]"))
}

pub fn try_convert_map(term: &Term, ctx: &RenderContext) -> Option<MacroString> {
    if_subtype(term, "map", |map| match map.field("arguments") {
        Some(Term::List(fields)) => {
            let fields = fields
                .iter()
                .map(|field| map_field_to_macro_string(field, ctx))
                .collect::<Vec<_>>();

            format!("%{{{}}}", fields.join(", "))
        }
        _ => String::from("map()"),
    })
}

/// `=>` fields may be absent, `:=` fields must be present.
fn map_field_to_macro_string(field: &Term, ctx: &RenderContext) -> MacroString {
    let Some(tagged) = TYPE.matches(field) else {
        return convert(field, ctx);
    };

    let wrapper = match tagged.field("subtype").and_then(Term::as_atom) {
        Some("map_field_assoc") => "optional",
        Some("map_field_exact") => "required",
        _ => return convert(field, ctx),
    };

    match tagged.list_field("arguments") {
        Some([key, value]) => format!(
            "{wrapper}({}) => {}",
            convert(key, ctx),
            convert(value, ctx)
        ),
        _ => String::from(UNKNOWN_TYPE),
    }
}

pub fn try_convert_range(term: &Term, ctx: &RenderContext) -> Option<MacroString> {
    if_subtype(term, "range", |range| match range.list_field("arguments") {
        Some([low, high]) => format!("{}..{}", convert(low, ctx), convert(high, ctx)),
        _ => String::from(UNKNOWN_TYPE),
    })
}

/// `<<_::Size, _::_*Unit>>`, with zero sizes left out.
pub fn try_convert_binary(term: &Term, ctx: &RenderContext) -> Option<MacroString> {
    if_subtype(term, "binary", |binary| {
        let Some([size, unit]) = binary.list_field("arguments") else {
            return String::from(UNKNOWN_TYPE);
        };

        let mut segments = Vec::with_capacity(2);

        if !is_zero(size) {
            segments.push(format!("_::{}", convert(size, ctx)));
        }
        if !is_zero(unit) {
            segments.push(format!("_::_*{}", convert(unit, ctx)));
        }

        format!("<<{}>>", segments.join(", "))
    })
}

fn is_zero(term: &Term) -> bool {
    term.element(2).and_then(Term::as_integer) == Some(0)
}

/// Any other builtin renders as a call, `atom()` or `nonempty_list(t)`.
pub fn try_convert_generic(term: &Term, ctx: &RenderContext) -> Option<MacroString> {
    let tagged = TYPE.matches(term)?;
    let name = tagged.field("subtype")?.as_atom()?;

    let arguments = match tagged.field("arguments") {
        Some(Term::List(arguments)) => convert_comma_separated(arguments, ctx),
        _ => String::new(),
    };

    Some(format!("{}({arguments})", builtin_name(name)))
}

/// Erlang strings are charlists.
fn builtin_name(name: &str) -> &str {
    match name {
        "string" => "charlist",
        "nonempty_string" => "nonempty_charlist",
        _ => name,
    }
}

fn with_arguments(tagged: &TaggedTerm, convert_arguments: impl FnOnce(&[Term]) -> MacroString) -> MacroString {
    match tagged.list_field("arguments") {
        Some(arguments) => convert_arguments(arguments),
        None => String::from(UNKNOWN_TYPE),
    }
}
