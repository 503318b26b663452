//! Lists, tuples and maps, in both expressions and patterns.

use crate::abstract_code::scope::Scope;
use crate::abstract_code::{
    RenderContext, ScopedMacroString, convert, convert_comma_separated, if_tag, thread_sequence,
};
use crate::settings::UNKNOWN_ABSTRACT_CODE;
use crate::term::Term;
use crate::term::term_schema::{
    CONS, MAP, MAP_FIELD_ASSOC, MAP_FIELD_EXACT, MAP_UPDATE, NIL, TUPLE, TaggedTerm,
};

pub fn try_convert_nil(term: &Term, _: &Scope, _: &RenderContext) -> Option<ScopedMacroString> {
    if_tag(term, &NIL, |_| ScopedMacroString::unscoped("[]"))
}

/// `{cons, Anno, Head, Tail}` chains are flattened, `[a, b]` for proper lists
/// and `[a, b | t]` when the last tail is anything but `nil`.
pub fn try_convert_cons(term: &Term, scope: &Scope, ctx: &RenderContext) -> Option<ScopedMacroString> {
    if_tag(term, &CONS, |_| {
        let (elements, tail) = flatten_cons(term);
        let (macro_strings, mut declared_scope) =
            thread_sequence(elements, scope, |element, lookup_scope| {
                convert(element, lookup_scope, ctx)
            });

        let mut macro_string = format!("[{}", macro_strings.join(", "));

        if let Some(tail) = tail {
            let converted = convert(tail, &scope.thread(&declared_scope), ctx);
            declared_scope = declared_scope.union(&converted.declared_scope);
            macro_string.push_str(" | ");
            macro_string.push_str(&converted.macro_string);
        }

        macro_string.push(']');

        ScopedMacroString::new(macro_string, declared_scope)
    })
}

/// Heads of the cons chain, and the improper tail if there is one.
fn flatten_cons(term: &Term) -> (Vec<&Term>, Option<&Term>) {
    let mut elements = Vec::new();
    let mut current = term;

    loop {
        match CONS.matches(current) {
            Some(cons) => match (cons.field("head"), cons.field("tail")) {
                (Some(head), Some(tail)) => {
                    elements.push(head);
                    current = tail;
                }
                _ => return (elements, None),
            },
            None if NIL.matches(current).is_some() => return (elements, None),
            None => return (elements, Some(current)),
        }
    }
}

pub fn try_convert_tuple(term: &Term, scope: &Scope, ctx: &RenderContext) -> Option<ScopedMacroString> {
    if_tag(term, &TUPLE, |tuple| match tuple.list_field("elements") {
        Some(elements) => {
            let converted = convert_comma_separated(elements, scope, ctx);
            ScopedMacroString::new(
                format!("{{{}}}", converted.macro_string),
                converted.declared_scope,
            )
        }
        None => ScopedMacroString::unscoped(UNKNOWN_ABSTRACT_CODE),
    })
}

pub fn try_convert_map(term: &Term, scope: &Scope, ctx: &RenderContext) -> Option<ScopedMacroString> {
    if_tag(term, &MAP, |map| {
        let associations = convert_associations(&map, scope, ctx);
        ScopedMacroString::new(
            format!("%{{{}}}", associations.macro_string),
            associations.declared_scope,
        )
    })
}

/// `{map, Anno, Map, Associations}` is `%{map | k => v}`
pub fn try_convert_map_update(
    term: &Term,
    scope: &Scope,
    ctx: &RenderContext,
) -> Option<ScopedMacroString> {
    if_tag(term, &MAP_UPDATE, |map_update| {
        let map = match map_update.field("map") {
            Some(map) => convert(map, scope, ctx),
            None => ScopedMacroString::unscoped(UNKNOWN_ABSTRACT_CODE),
        };

        let after_map = scope.thread(&map.declared_scope);
        let associations = convert_associations(&map_update, &after_map, ctx);

        ScopedMacroString::new(
            format!("%{{{} | {}}}", map.macro_string, associations.macro_string),
            map.declared_scope.union(&associations.declared_scope),
        )
    })
}

fn convert_associations(
    map: &TaggedTerm,
    scope: &Scope,
    ctx: &RenderContext,
) -> ScopedMacroString {
    let Some(associations) = map.list_field("associations") else {
        return ScopedMacroString::unscoped(UNKNOWN_ABSTRACT_CODE);
    };

    let (macro_strings, declared_scope) =
        thread_sequence(associations, scope, |association, lookup_scope| {
            convert_association(association, lookup_scope, ctx)
        });

    ScopedMacroString::new(macro_strings.join(", "), declared_scope)
}

/// `map_field_assoc` (`=>`) and `map_field_exact` (`:=`) both render as `k => v`.
fn convert_association(term: &Term, scope: &Scope, ctx: &RenderContext) -> ScopedMacroString {
    let Some(association) = MAP_FIELD_ASSOC
        .matches(term)
        .or_else(|| MAP_FIELD_EXACT.matches(term))
    else {
        return convert(term, scope, ctx);
    };

    match (association.field("key"), association.field("value")) {
        (Some(key), Some(value)) => {
            let key = convert(key, scope, ctx);
            let value = convert(value, &scope.thread(&key.declared_scope), ctx);

            ScopedMacroString::new(
                format!("{} => {}", key.macro_string, value.macro_string),
                key.declared_scope.union(&value.declared_scope),
            )
        }
        _ => ScopedMacroString::unscoped(UNKNOWN_ABSTRACT_CODE),
    }
}
