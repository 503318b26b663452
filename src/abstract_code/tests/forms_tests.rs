use super::{
    LINE, atom, attribute, builtin_type, clause, cons, fun_type, function, integer, local_call,
    nil, op, user_type, var, with_context,
};
use crate::abstract_code::RenderContext;
use crate::abstract_code::forms::{ModuleAttributes, convert_form};
use crate::render_messages::render_warnings::WarningKind;
use crate::settings::RenderConfig;
use crate::term::Term;
use std::cell::RefCell;

fn export(functions: &[(&str, i64)]) -> Term {
    let exports = functions
        .iter()
        .map(|(name, arity)| Term::tuple(vec![Term::atom(*name), Term::integer(*arity)]))
        .collect();
    attribute("export", Term::list(exports))
}

fn module_with_exports(functions: &[(&str, i64)]) -> ModuleAttributes {
    ModuleAttributes::collect(&[attribute("module", Term::atom("demo")), export(functions)])
}

fn render_form(form: &Term, module: &ModuleAttributes) -> Option<String> {
    with_context(|ctx| convert_form(form, module, ctx)).0
}

#[test]
fn collect_reads_name_and_exports() {
    let module = module_with_exports(&[("start", 0), ("add", 2)]);

    assert_eq!(module.name.as_deref(), Some("demo"));
    assert!(module.is_exported("add", 2));
    assert!(!module.is_exported("add", 3));
    assert!(!module.is_exported("helper", 1));
}

#[test]
fn export_all_exports_everything() {
    let module = ModuleAttributes::collect(&[attribute(
        "compile",
        Term::list(vec![Term::atom("export_all")]),
    )]);
    assert!(module.is_exported("anything", 4));
}

#[test]
fn exported_functions_use_def_and_others_defp() {
    let module = module_with_exports(&[("add", 2)]);
    let add = function(
        "add",
        2,
        vec![clause(vec![var("A"), var("B")], vec![], vec![op("+", var("A"), var("B"))])],
    );
    let helper = function("helper", 0, vec![clause(vec![], vec![], vec![atom("ok")])]);

    assert_eq!(
        render_form(&add, &module).as_deref(),
        Some("def add(a, b) do\n  a + b\nend")
    );
    assert_eq!(
        render_form(&helper, &module).as_deref(),
        Some("defp helper() do\n  :ok\nend")
    );
}

#[test]
fn every_clause_is_its_own_definition_with_a_fresh_scope() {
    let module = module_with_exports(&[("len", 1)]);
    let len = function(
        "len",
        1,
        vec![
            clause(vec![nil()], vec![], vec![integer(0)]),
            clause(
                vec![cons(var("_"), var("T"))],
                vec![vec![local_call("is_list", vec![var("T")])]],
                vec![op("+", integer(1), local_call("len", vec![var("T")]))],
            ),
        ],
    );

    assert_eq!(
        render_form(&len, &module).as_deref(),
        Some(
            "def len([]) do\n  0\nend\n\n\
             def len([_ | t]) when is_list(t) do\n  1 + len(t)\nend"
        )
    );
}

#[test]
fn specs_render_one_line_per_signature() {
    let module = ModuleAttributes::default();
    let signature = fun_type(
        vec![builtin_type("integer", vec![]), builtin_type("integer", vec![])],
        builtin_type("integer", vec![]),
    );
    let spec = attribute(
        "spec",
        Term::tuple(vec![
            Term::tuple(vec![Term::atom("add"), Term::integer(2)]),
            Term::list(vec![signature.clone(), signature]),
        ]),
    );

    assert_eq!(
        render_form(&spec, &module).as_deref(),
        Some(
            "@spec add(integer(), integer()) :: integer()\n\
             @spec add(integer(), integer()) :: integer()"
        )
    );
}

#[test]
fn callbacks_with_module_qualified_keys() {
    let callback = attribute(
        "callback",
        Term::tuple(vec![
            Term::tuple(vec![Term::atom("demo"), Term::atom("init"), Term::integer(1)]),
            Term::list(vec![fun_type(vec![builtin_type("term", vec![])], atom("ok"))]),
        ]),
    );

    assert_eq!(
        render_form(&callback, &ModuleAttributes::default()).as_deref(),
        Some("@callback init(term()) :: :ok")
    );
}

#[test]
fn type_declarations() {
    let declaration = attribute(
        "type",
        Term::tuple(vec![
            Term::atom("pair"),
            builtin_type("tuple", vec![var("A"), var("A")]),
            Term::list(vec![var("A")]),
        ]),
    );
    assert_eq!(
        render_form(&declaration, &ModuleAttributes::default()).as_deref(),
        Some("@type pair(a) :: {a, a}")
    );

    let opaque = attribute(
        "opaque",
        Term::tuple(vec![Term::atom("state"), user_type("pair", vec![atom("x")]), Term::list(vec![])]),
    );
    assert_eq!(
        render_form(&opaque, &ModuleAttributes::default()).as_deref(),
        Some("@opaque state() :: pair(:x)")
    );
}

#[test]
fn bookkeeping_forms_render_nothing() {
    let module = ModuleAttributes::default();
    let file = attribute(
        "file",
        Term::tuple(vec![Term::string("demo.erl"), Term::integer(1)]),
    );
    let eof = Term::tuple(vec![Term::atom("eof"), Term::integer(LINE)]);

    let (rendered, warnings) = with_context(|ctx| {
        [file, eof, export(&[("a", 0)])]
            .iter()
            .map(|form| convert_form(form, &module, ctx))
            .collect::<Vec<_>>()
    });

    assert_eq!(rendered, vec![None, None, None]);
    assert!(warnings.is_empty());
}

#[test]
fn unknown_attributes_warn() {
    let record = attribute("record", Term::tuple(vec![Term::atom("state"), Term::list(vec![])]));
    let (rendered, warnings) =
        with_context(|ctx| convert_form(&record, &ModuleAttributes::default(), ctx));

    assert_eq!(rendered, None);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].warning_kind, WarningKind::UnsupportedAttribute);
}

#[test]
fn unknown_forms_render_the_sentinel() {
    let error_form = Term::tuple(vec![Term::atom("error"), Term::atom("bad")]);
    let (rendered, warnings) =
        with_context(|ctx| convert_form(&error_form, &ModuleAttributes::default(), ctx));

    assert_eq!(rendered.as_deref(), Some("unknown_abstract_code"));
    assert_eq!(warnings[0].warning_kind, WarningKind::UnsupportedForm);
}

#[test]
fn behaviours_render_as_module_attributes() {
    let behaviour = attribute("behaviour", Term::atom("gen_server"));
    assert_eq!(
        render_form(&behaviour, &ModuleAttributes::default()).as_deref(),
        Some("@behaviour :gen_server")
    );
}

#[test]
fn line_comments_are_optional() {
    let config = RenderConfig {
        emit_line_comments: true,
        ..RenderConfig::default()
    };
    let warnings = RefCell::new(Vec::new());
    let ctx = RenderContext::new(&config, &warnings);

    let helper = function("helper", 0, vec![clause(vec![], vec![], vec![atom("ok")])]);
    let rendered = convert_form(&helper, &ModuleAttributes::default(), &ctx);

    assert_eq!(
        rendered.as_deref(),
        Some("# line 1\ndefp helper() do\n  :ok\nend")
    );
}
