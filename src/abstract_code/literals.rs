//! Atomic literals: atoms, integers, floats, characters and strings.
//!
//! None of these bind anything, so they all return an empty declared scope.

use crate::abstract_code::scope::Scope;
use crate::abstract_code::{MacroString, RenderContext, ScopedMacroString, if_tag};
use crate::settings::{ELIXIR_ALIAS_PREFIX, UNKNOWN_ABSTRACT_CODE, UNKNOWN_STRING};
use crate::term::term_schema::{ATOM, CHAR, FLOAT, INTEGER, STRING, TaggedTerm};
use crate::term::{Number, Term};

pub fn try_convert_atom(term: &Term, _: &Scope, _: &RenderContext) -> Option<ScopedMacroString> {
    convert_atom(term).map(ScopedMacroString::unscoped)
}

/// `{atom, Anno, Value}` without scope, shared with the type converters.
pub fn convert_atom(term: &Term) -> Option<MacroString> {
    if_tag(term, &ATOM, |atom| match atom.field("value").and_then(Term::as_atom) {
        Some(value) => atom_to_macro_string(value),
        None => String::from(UNKNOWN_ABSTRACT_CODE),
    })
}

pub fn try_convert_integer(term: &Term, _: &Scope, _: &RenderContext) -> Option<ScopedMacroString> {
    convert_integer(term).map(ScopedMacroString::unscoped)
}

/// `{integer, Anno, Value}`, also used in types.
pub fn convert_integer(term: &Term) -> Option<MacroString> {
    if_tag(term, &INTEGER, |integer| number_field(&integer))
}

pub fn try_convert_float(term: &Term, _: &Scope, _: &RenderContext) -> Option<ScopedMacroString> {
    if_tag(term, &FLOAT, |float| {
        ScopedMacroString::unscoped(number_field(&float))
    })
}

pub fn try_convert_char(term: &Term, _: &Scope, _: &RenderContext) -> Option<ScopedMacroString> {
    if_tag(term, &CHAR, |char_term| {
        let macro_string = match char_term.field("value").and_then(Term::as_integer) {
            Some(code) => char_to_macro_string(code),
            None => String::from(UNKNOWN_ABSTRACT_CODE),
        };

        ScopedMacroString::unscoped(macro_string)
    })
}

pub fn try_convert_string(term: &Term, _: &Scope, _: &RenderContext) -> Option<ScopedMacroString> {
    if_tag(term, &STRING, |string| {
        let macro_string = match string.field("value").and_then(Term::as_char_list) {
            Some(chars) => format!("~c\"{}\"", escape_string(&chars)),
            None => String::from(UNKNOWN_STRING),
        };

        ScopedMacroString::unscoped(macro_string)
    })
}

fn number_field(tagged: &TaggedTerm) -> MacroString {
    match tagged.field("value") {
        Some(Term::Number(number)) => number_to_macro_string(number),
        _ => String::from(UNKNOWN_ABSTRACT_CODE),
    }
}

pub fn number_to_macro_string(number: &Number) -> MacroString {
    match number {
        Number::Integer(value) => value.to_string(),
        Number::BigInteger(digits) => digits.clone(),
        Number::Float(value) => {
            // Debug keeps the fraction ("1.0"), but exponents need one too ("1.0e-7")
            let text = format!("{value:?}");
            match text.find('e') {
                Some(index) if !text[..index].contains('.') => {
                    format!("{}.0{}", &text[..index], &text[index..])
                }
                _ => text,
            }
        }
    }
}

/// Atom literal as it is written in source.
///
/// `true`, `false` and `nil` are bare, `'Elixir.Foo'` is the alias `Foo`, anything that is
/// not a plain identifier gets quoted.
pub fn atom_to_macro_string(atom: &str) -> MacroString {
    match atom {
        "true" | "false" | "nil" => atom.to_owned(),
        _ => match atom.strip_prefix(ELIXIR_ALIAS_PREFIX) {
            Some(alias) if is_alias(alias) => alias.to_owned(),
            _ if is_identifier(atom) => format!(":{atom}"),
            _ => format!(":\"{}\"", escape_string(atom)),
        },
    }
}

/// Function names are bare when they can be, `unquote(:"...")` otherwise.
pub fn function_name_to_macro_string(name: &str) -> MacroString {
    if is_identifier(name) {
        name.to_owned()
    } else {
        format!("unquote(:\"{}\")", escape_string(name))
    }
}

/// `[a-z_][a-zA-Z0-9_@]*[?!]?`
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars().peekable();

    match chars.next() {
        Some(first) if first.is_ascii_lowercase() || first == '_' => {}
        _ => return false,
    }

    while let Some(c) = chars.next() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '@' {
            continue;
        }

        return (c == '?' || c == '!') && chars.peek().is_none();
    }

    true
}

/// Dot separated segments that each start upper case.
fn is_alias(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(first) if first.is_ascii_uppercase())
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

fn char_to_macro_string(code: i64) -> MacroString {
    let Some(c) = u32::try_from(code).ok().and_then(char::from_u32) else {
        return code.to_string();
    };

    match c {
        '\n' => String::from("?\\n"),
        '\t' => String::from("?\\t"),
        ' ' => String::from("?\\s"),
        '\\' => String::from("?\\\\"),
        _ if c.is_control() => code.to_string(),
        _ => format!("?{c}"),
    }
}

/// Escapes text for a double-quoted literal. `~c"..."` and `:"..."` both interpolate,
/// so `#{` is escaped as well.
pub fn escape_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '#' if chars.peek() == Some(&'{') => escaped.push_str("\\#"),
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }

    escaped
}
