use super::{atom, clause, render_in, var, with_context};
use crate::abstract_code::clauses::{ClauseKind, convert_clause};
use crate::abstract_code::scope::Scope;
use crate::abstract_code::var::{convert_name, convert_tagged, normalize_name};
use crate::abstract_code::{ScopedMacroString, convert_sequence};
use crate::term::Term;
use proptest::prelude::*;

fn convert_var(name: &str, scope: &Scope) -> ScopedMacroString {
    convert_tagged(&var(name), scope).expect("var term")
}

#[test]
fn unbound_name_is_a_binding() {
    let converted = convert_var("Count", &Scope::empty());

    assert_eq!(converted.macro_string, "count");
    assert_eq!(converted.declared_scope, Scope::binding("count"));
}

#[test]
fn bound_name_is_a_plain_reference() {
    let converted = convert_var("Count", &Scope::new(["count"], false));

    assert_eq!(converted.macro_string, "count");
    assert!(converted.declared_scope.is_empty());
}

#[test]
fn bound_name_in_a_pinning_scope_is_pinned() {
    let converted = convert_var("Count", &Scope::new(["count"], true));

    assert_eq!(converted.macro_string, "^count");
    assert!(converted.declared_scope.is_empty());
}

#[test]
fn ignore_name_never_binds_or_pins() {
    for scope in [
        Scope::empty(),
        Scope::new(["_"], false),
        Scope::new(["_"], true),
    ] {
        let converted = convert_var("_", &scope);
        assert_eq!(converted.macro_string, "_");
        assert!(converted.declared_scope.is_empty());
    }
}

#[test]
fn only_the_first_character_is_lowered() {
    assert_eq!(convert_var("Foo", &Scope::empty()).macro_string, "foo");
    assert_eq!(convert_var("foo", &Scope::empty()).macro_string, "foo");
    assert_eq!(convert_var("FooBar", &Scope::empty()).macro_string, "fooBar");
    assert_eq!(convert_var("_Acc", &Scope::empty()).macro_string, "_Acc");
    assert_eq!(normalize_name("Ärger"), "ärger");
}

#[test]
fn non_atom_names_are_unknown() {
    let converted = convert_name(&Term::integer(7), &Scope::new(["x"], true));

    assert_eq!(converted.macro_string, "unknown_name");
    assert!(converted.declared_scope.is_empty());

    let string_name = Term::tuple(vec![Term::atom("var"), Term::integer(1), Term::string("X")]);
    assert_eq!(
        convert_tagged(&string_name, &Scope::empty()).map(|c| c.macro_string),
        Some(String::from("unknown_name"))
    );
}

#[test]
fn other_tags_are_not_variables() {
    assert_eq!(convert_tagged(&atom("x"), &Scope::empty()), None);
    assert_eq!(convert_tagged(&Term::atom("var"), &Scope::empty()), None);

    let wrong_arity = Term::tuple(vec![Term::atom("var"), Term::integer(1)]);
    assert_eq!(convert_tagged(&wrong_arity, &Scope::empty()), None);
}

#[test]
fn repeated_clause_parameters_bind_once() {
    let patterns = [var("X"), var("X")];
    let (macro_strings, declared) = with_context(|ctx| {
        convert_sequence(&patterns, &Scope::empty(), &ctx.pattern())
    })
    .0;

    assert_eq!(macro_strings, vec!["x", "x"]);
    assert_eq!(declared, Scope::binding("x"));

    // The second occurrence declares nothing new
    let second = render_in(&patterns[1], &Scope::binding("x"));
    assert!(second.declared_scope.is_empty());
}

#[test]
fn function_clause_heads_start_from_an_empty_scope() {
    let head = clause(vec![var("X"), var("X")], vec![], vec![var("X")]);
    let outer = Scope::new(["x"], true);

    let converted = with_context(|ctx| convert_clause(&head, &outer, ClauseKind::Function, ctx))
        .0
        .expect("clause term");

    assert_eq!(converted.head, "x, x");
    assert_eq!(converted.body, "x");
    assert_eq!(converted.declared_scope, Scope::binding("x"));
}

proptest! {
    #[test]
    fn binding_then_reference(name in "[A-Z][a-zA-Z0-9_]{0,8}", pinning in any::<bool>()) {
        let binding = convert_var(&name, &Scope::empty().with_pinning(pinning));
        let lowered = normalize_name(&name);

        prop_assert_eq!(&binding.macro_string, &lowered);
        prop_assert!(binding.declared_scope.contains(&lowered));
        prop_assert_eq!(binding.declared_scope.len(), 1);

        let scope = binding.declared_scope.with_pinning(pinning);
        let reference = convert_var(&name, &scope);
        let expected = if pinning { format!("^{lowered}") } else { lowered };

        prop_assert_eq!(reference.macro_string, expected);
        prop_assert!(reference.declared_scope.is_empty());
    }

    #[test]
    fn unrelated_bound_names_do_not_change_a_binding(
        name in "[A-Z][a-z]{1,6}",
        others in prop::collection::vec("[a-z]{1,6}", 0..4),
    ) {
        let lowered = normalize_name(&name);
        prop_assume!(!others.contains(&lowered));

        let converted = convert_var(&name, &Scope::new(others, true));
        prop_assert_eq!(converted.macro_string, lowered.clone());
        prop_assert_eq!(converted.declared_scope, Scope::binding(lowered));
    }
}
