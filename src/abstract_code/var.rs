//! Variables: `{var, Anno, Name}`.
//!
//! The same term shape means three different things depending on the scope it is converted
//! in. The first occurrence binds the name, later occurrences reference it, and references
//! inside a pinning pattern get the pin marker so they match against the outer value
//! instead of rebinding.

use crate::abstract_code::scope::Scope;
use crate::abstract_code::{ScopedMacroString, if_tag};
use crate::scope_log;
use crate::settings::{IGNORE_NAME, PIN_MARKER, UNKNOWN_NAME};
use crate::term::Term;
use crate::term::term_schema::VAR;

pub fn convert_tagged(term: &Term, scope: &Scope) -> Option<ScopedMacroString> {
    if_tag(term, &VAR, |var| match var.field("name") {
        Some(name) => convert_name(name, scope),
        None => ScopedMacroString::unscoped(UNKNOWN_NAME),
    })
}

/// Renders a raw name payload. Anything other than an atom degrades to a sentinel.
pub fn convert_name(name: &Term, scope: &Scope) -> ScopedMacroString {
    match name.as_atom() {
        Some(atom) => convert_atom_name(atom, scope),
        None => ScopedMacroString::unscoped(UNKNOWN_NAME),
    }
}

fn convert_atom_name(atom: &str, scope: &Scope) -> ScopedMacroString {
    let var_name = normalize_name(atom);

    if var_name == IGNORE_NAME {
        return ScopedMacroString::unscoped(var_name);
    }

    if scope.contains(&var_name) {
        scope_log!("reference ", var_name.clone(), " in ", scope.to_string());

        let macro_string = if scope.is_pinning() {
            format!("{PIN_MARKER}{var_name}")
        } else {
            var_name
        };

        return ScopedMacroString::unscoped(macro_string);
    }

    scope_log!("binding ", var_name.clone());

    let declared_scope = Scope::binding(var_name.as_str());
    ScopedMacroString::new(var_name, declared_scope)
}

/// Variables are capitalised in the compiled form and lower case in source.
pub fn normalize_name(atom: &str) -> String {
    let mut chars = atom.chars();

    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
