//! # Forms
//!
//! Top-level forms: functions and module attributes. Each form is rendered on its own,
//! starting from an empty scope, so forms can be rendered in any order or in parallel.
//! The few module-wide facts they need (name, exports) are collected up front.

use crate::abstract_code::calls::module_to_macro_string;
use crate::abstract_code::clauses::{ClauseKind, convert_clause};
use crate::abstract_code::literals::function_name_to_macro_string;
use crate::abstract_code::scope::Scope;
use crate::abstract_code::types::{self, fun_type, parameter_return};
use crate::abstract_code::{MacroString, RenderContext, if_tag};
use crate::render_messages::render_warnings::{RenderWarning, WarningKind};
use crate::settings::{
    UNKNOWN_ABSTRACT_CODE, UNKNOWN_CLAUSES, UNKNOWN_FUNCTION_NAME, UNKNOWN_PARAMETER_RETURN,
    UNKNOWN_TYPE,
};
use crate::term::Term;
use crate::term::term_schema::{ATTRIBUTE, EOF, FUNCTION, describe};
use crate::term_log;
use rustc_hash::FxHashSet;

/// Attributes that are consumed by the module wrapper or carry nothing worth rendering.
const SILENT_ATTRIBUTES: &[&str] = &["module", "export", "export_type", "file", "compile"];

/// Module-wide facts that individual forms depend on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleAttributes {
    pub name: Option<String>,
    exports: FxHashSet<(String, i64)>,
    export_all: bool,
}

impl ModuleAttributes {
    pub fn collect(forms: &[Term]) -> ModuleAttributes {
        let mut attributes = ModuleAttributes::default();

        for form in forms {
            let Some(attribute) = ATTRIBUTE.matches(form) else {
                continue;
            };
            let (Some(name), Some(value)) = (
                attribute.field("name").and_then(Term::as_atom),
                attribute.field("value"),
            ) else {
                continue;
            };

            match name {
                "module" => attributes.name = value.as_atom().map(str::to_owned),
                "export" => {
                    for export in value.as_list().unwrap_or_default() {
                        if let Some([function, arity]) = export.as_tuple()
                            && let (Some(function), Some(arity)) =
                                (function.as_atom(), arity.as_integer())
                        {
                            attributes.exports.insert((function.to_owned(), arity));
                        }
                    }
                }
                "compile" => {
                    let is_export_all = |option: &Term| option.as_atom() == Some("export_all");
                    attributes.export_all |= match value.as_list() {
                        Some(options) => options.iter().any(is_export_all),
                        None => is_export_all(value),
                    };
                }
                _ => {}
            }
        }

        attributes
    }

    pub fn is_exported(&self, name: &str, arity: i64) -> bool {
        self.export_all || self.exports.contains(&(name.to_owned(), arity))
    }
}

/// The result of one form converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedForm {
    Text(MacroString),

    /// Recognised, but produces no source of its own
    Skipped,
}

pub type FormConverter = fn(&Term, &ModuleAttributes, &RenderContext) -> Option<RenderedForm>;

const FORM_CONVERTERS: &[FormConverter] = &[
    try_convert_function,
    try_convert_attribute,
    try_convert_eof,
];

/// Render one top-level form. `None` for forms that produce no text.
pub fn convert_form(form: &Term, module: &ModuleAttributes, ctx: &RenderContext) -> Option<MacroString> {
    let rendered = FORM_CONVERTERS
        .iter()
        .find_map(|convert| convert(form, module, ctx))
        .unwrap_or_else(|| {
            term_log!(Yellow "No form converter for ", form.to_string());

            ctx.warn(RenderWarning::new(
                format!("`{}` is not a supported top-level form", describe(form)),
                form.line(),
                WarningKind::UnsupportedForm,
            ));

            RenderedForm::Text(String::from(UNKNOWN_ABSTRACT_CODE))
        });

    match rendered {
        RenderedForm::Skipped => None,
        RenderedForm::Text(text) => Some(with_line_comment(form, text, ctx)),
    }
}

fn with_line_comment(form: &Term, text: MacroString, ctx: &RenderContext) -> MacroString {
    match form.line() {
        Some(line) if ctx.config.emit_line_comments => format!("# line {line}\n{text}"),
        _ => text,
    }
}

/// `{function, Anno, Name, Arity, Clauses}`, one `def` per clause.
pub fn try_convert_function(
    form: &Term,
    module: &ModuleAttributes,
    ctx: &RenderContext,
) -> Option<RenderedForm> {
    if_tag(form, &FUNCTION, |function| {
        let name = function.field("name").and_then(Term::as_atom);
        let arity = function.field("arity").and_then(Term::as_integer);
        let Some(clauses) = function.list_field("clauses") else {
            return RenderedForm::Text(String::from(UNKNOWN_CLAUSES));
        };

        let keyword = match (name, arity) {
            (Some(name), Some(arity)) if module.is_exported(name, arity) => "def",
            _ => "defp",
        };
        let name = match name {
            Some(name) => function_name_to_macro_string(name),
            None => String::from(UNKNOWN_FUNCTION_NAME),
        };

        let definitions = clauses
            .iter()
            .map(|clause| {
                // Every clause of a named function starts from nothing
                match convert_clause(clause, &Scope::empty(), ClauseKind::Function, ctx) {
                    Some(converted) => {
                        let head = format!("{keyword} {name}({})", converted.head);
                        let head = match &converted.guard {
                            Some(guard) => format!("{head} when {guard}"),
                            None => head,
                        };

                        format!("{head} do\n{}\nend", ctx.indent(&converted.body))
                    }
                    None => String::from(UNKNOWN_CLAUSES),
                }
            })
            .collect::<Vec<_>>();

        RenderedForm::Text(definitions.join("\n\n"))
    })
}

/// `{eof, Anno}`
pub fn try_convert_eof(form: &Term, _: &ModuleAttributes, _: &RenderContext) -> Option<RenderedForm> {
    if_tag(form, &EOF, |_| RenderedForm::Skipped)
}

/// `{attribute, Anno, Name, Value}`
pub fn try_convert_attribute(
    form: &Term,
    _: &ModuleAttributes,
    ctx: &RenderContext,
) -> Option<RenderedForm> {
    if_tag(form, &ATTRIBUTE, |attribute| {
        let (Some(name), Some(value)) = (
            attribute.field("name").and_then(Term::as_atom),
            attribute.field("value"),
        ) else {
            return RenderedForm::Text(String::from(UNKNOWN_ABSTRACT_CODE));
        };

        match name {
            _ if SILENT_ATTRIBUTES.contains(&name) => RenderedForm::Skipped,
            "spec" | "callback" => RenderedForm::Text(convert_spec(name, value, ctx)),
            "type" | "opaque" => RenderedForm::Text(convert_type_declaration(name, value, ctx)),
            "behaviour" | "behavior" => match value.as_atom() {
                Some(behaviour) => RenderedForm::Text(format!(
                    "@behaviour {}",
                    module_to_macro_string(behaviour)
                )),
                None => RenderedForm::Text(String::from(UNKNOWN_ABSTRACT_CODE)),
            },
            _ => {
                ctx.warn(RenderWarning::new(
                    format!("The `-{name}` attribute is not rendered"),
                    form.line(),
                    WarningKind::UnsupportedAttribute,
                ));

                RenderedForm::Skipped
            }
        }
    })
}

/// `{{Name, Arity} | {Module, Name, Arity}, [FunType]}`, one line per signature.
fn convert_spec(attribute: &str, value: &Term, ctx: &RenderContext) -> MacroString {
    let (Some(function), Some(signatures)) = (
        value.element(0).and_then(spec_function_name),
        value.element(1).and_then(Term::as_list),
    ) else {
        return format!("@{attribute} {UNKNOWN_PARAMETER_RETURN}");
    };

    let name = function_name_to_macro_string(function);

    signatures
        .iter()
        .map(|signature| {
            let signature = fun_type::try_convert_named(signature, &name, ctx)
                .or_else(|| parameter_return::bounded_to_macro_string(signature, &name, ctx))
                .unwrap_or_else(|| types::convert(signature, ctx));

            format!("@{attribute} {signature}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The function name of a spec key, which may or may not name its module.
fn spec_function_name(key: &Term) -> Option<&str> {
    match key.as_tuple()? {
        [name, _arity] | [_, name, _arity] => name.as_atom(),
        _ => None,
    }
}

/// `{Name, Type, [Var]}`
fn convert_type_declaration(attribute: &str, value: &Term, ctx: &RenderContext) -> MacroString {
    let Some([name, definition, parameters]) = value.as_tuple() else {
        return format!("@{attribute} {UNKNOWN_TYPE}");
    };

    let name = match name.as_atom() {
        Some(name) => function_name_to_macro_string(name),
        None => String::from(UNKNOWN_TYPE),
    };
    let parameters = match parameters.as_list() {
        Some(parameters) => types::convert_comma_separated(parameters, ctx),
        None => String::from(UNKNOWN_TYPE),
    };

    format!(
        "@{attribute} {name}({parameters}) :: {}",
        types::convert(definition, ctx)
    )
}
