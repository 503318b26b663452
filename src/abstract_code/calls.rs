//! Calls and function references.

use crate::abstract_code::clauses::convert_fn_clauses;
use crate::abstract_code::literals::{
    atom_to_macro_string, escape_string, function_name_to_macro_string, is_identifier,
};
use crate::abstract_code::scope::Scope;
use crate::abstract_code::{
    MacroString, RenderContext, ScopedMacroString, convert, convert_comma_separated, if_tag,
};
use crate::settings::{UNKNOWN_ABSTRACT_CODE, UNKNOWN_CLAUSES};
use crate::term::Term;
use crate::term::term_schema::{ATOM, CALL, FUN, INTEGER, REMOTE};

/// `{call, Anno, Function, Arguments}`
pub fn try_convert_call(term: &Term, scope: &Scope, ctx: &RenderContext) -> Option<ScopedMacroString> {
    if_tag(term, &CALL, |call| {
        let (Some(function), Some(arguments)) = (call.field("function"), call.list_field("arguments"))
        else {
            return ScopedMacroString::unscoped(UNKNOWN_ABSTRACT_CODE);
        };

        // Local call to a named function
        if let Some(name) = atom_value(function) {
            let arguments = convert_comma_separated(arguments, scope, ctx);
            return ScopedMacroString::new(
                format!("{}({})", function_name_to_macro_string(name), arguments.macro_string),
                arguments.declared_scope,
            );
        }

        if let Some(remote) = REMOTE.matches(function) {
            let (Some(module), Some(name)) = (remote.field("module"), remote.field("function"))
            else {
                return ScopedMacroString::unscoped(UNKNOWN_ABSTRACT_CODE);
            };

            return match (atom_value(module), atom_value(name)) {
                (Some(module), Some(name)) => {
                    let arguments = convert_comma_separated(arguments, scope, ctx);
                    ScopedMacroString::new(
                        format!(
                            "{}.{}({})",
                            module_to_macro_string(module),
                            remote_function_name(name),
                            arguments.macro_string
                        ),
                        arguments.declared_scope,
                    )
                }
                _ => convert_dynamic_remote_call(module, name, arguments, scope, ctx),
            };
        }

        // Anything else evaluates to a fun
        let function = convert(function, scope, ctx);
        let arguments =
            convert_comma_separated(arguments, &scope.thread(&function.declared_scope), ctx);

        ScopedMacroString::new(
            format!("{}.({})", function.macro_string, arguments.macro_string),
            function.declared_scope.union(&arguments.declared_scope),
        )
    })
}

/// `M:F(Args)` where the module or function is only known at runtime.
fn convert_dynamic_remote_call(
    module: &Term,
    name: &Term,
    arguments: &[Term],
    scope: &Scope,
    ctx: &RenderContext,
) -> ScopedMacroString {
    let module = convert(module, scope, ctx);
    let after_module = scope.thread(&module.declared_scope);
    let name = convert(name, &after_module, ctx);
    let after_name = after_module.thread(&name.declared_scope);
    let arguments = convert_comma_separated(arguments, &after_name, ctx);

    ScopedMacroString::new(
        format!(
            "apply({}, {}, [{}])",
            module.macro_string, name.macro_string, arguments.macro_string
        ),
        module
            .declared_scope
            .union(&name.declared_scope)
            .union(&arguments.declared_scope),
    )
}

/// `{'fun', Anno, Payload}`: function captures and anonymous functions.
pub fn try_convert_fun(term: &Term, scope: &Scope, ctx: &RenderContext) -> Option<ScopedMacroString> {
    if_tag(term, &FUN, |fun| {
        let Some(payload) = fun.field("payload") else {
            return ScopedMacroString::unscoped(UNKNOWN_ABSTRACT_CODE);
        };

        match (payload.tag(), payload.as_tuple()) {
            (Some("clauses"), Some([_, clauses])) => match clauses.as_list() {
                Some(clauses) => convert_fn_clauses(clauses, scope, ctx),
                None => ScopedMacroString::unscoped(UNKNOWN_CLAUSES),
            },

            (Some("function"), Some([_, name, arity])) => {
                match (atom_value(name), integer_value(arity)) {
                    (Some(name), Some(arity)) => ScopedMacroString::unscoped(format!(
                        "&{}/{arity}",
                        function_name_to_macro_string(name)
                    )),
                    _ => ScopedMacroString::unscoped(UNKNOWN_ABSTRACT_CODE),
                }
            }

            (Some("function"), Some([_, module, name, arity])) => {
                match (atom_value(module), atom_value(name), integer_value(arity)) {
                    (Some(module), Some(name), Some(arity)) => ScopedMacroString::unscoped(format!(
                        "&{}.{}/{arity}",
                        module_to_macro_string(module),
                        remote_function_name(name)
                    )),
                    _ => convert_dynamic_capture(module, name, arity, scope, ctx),
                }
            }

            _ => ScopedMacroString::unscoped(UNKNOWN_ABSTRACT_CODE),
        }
    })
}

fn convert_dynamic_capture(
    module: &Term,
    name: &Term,
    arity: &Term,
    scope: &Scope,
    ctx: &RenderContext,
) -> ScopedMacroString {
    let parts = [module, name, arity].map(|part| convert_capture_part(part, scope, ctx));

    ScopedMacroString::unscoped(format!(
        "Function.capture({}, {}, {})",
        parts[0], parts[1], parts[2]
    ))
}

fn convert_capture_part(part: &Term, scope: &Scope, ctx: &RenderContext) -> MacroString {
    match part {
        Term::Atom(atom) => atom_to_macro_string(atom),
        Term::Number(_) => part.to_string(),
        _ => convert(part, scope, ctx).macro_string,
    }
}

/// Capture and call payloads hold either a bare atom or an `{atom, Anno, Value}` term.
fn atom_value(term: &Term) -> Option<&str> {
    term.as_atom()
        .or_else(|| ATOM.matches(term)?.field("value")?.as_atom())
}

fn integer_value(term: &Term) -> Option<i64> {
    term.as_integer()
        .or_else(|| INTEGER.matches(term)?.field("value")?.as_integer())
}

/// `'Elixir.Enum'` is `Enum`, `lists` is `:lists`.
pub fn module_to_macro_string(module: &str) -> MacroString {
    atom_to_macro_string(module)
}

fn remote_function_name(name: &str) -> MacroString {
    if is_identifier(name) {
        name.to_owned()
    } else {
        format!("\"{}\"", escape_string(name))
    }
}
