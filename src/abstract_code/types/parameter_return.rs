//! The `[Parameters, Return]` payload of a function type.

use crate::abstract_code::types::{convert, convert_comma_separated, fun_type, if_subtype};
use crate::abstract_code::{MacroString, RenderContext};
use crate::settings::UNKNOWN_PARAMETER_RETURN;
use crate::term::Term;
use crate::term::term_schema::TYPE_ANY_ARGUMENTS;

const ANY_PARAMETERS: &str = "...";

/// Named signatures are `name(params) :: return`, anonymous ones `(params -> return)`.
///
/// `fun()` has no payload at all, which is only meaningful anonymously.
pub fn to_macro_string(
    parameter_return: &[Term],
    name_macro_string: Option<&str>,
    ctx: &RenderContext,
) -> MacroString {
    match (parameter_return, name_macro_string) {
        ([], None) => String::from("fun()"),
        ([parameters, return_type], name) => {
            let parameters = parameters_to_macro_string(parameters, ctx);
            let return_type = convert(return_type, ctx);

            match name {
                Some(name) => format!("{name}({parameters}) :: {return_type}"),
                None if parameters.is_empty() => format!("(-> {return_type})"),
                None => format!("({parameters} -> {return_type})"),
            }
        }
        _ => String::from(UNKNOWN_PARAMETER_RETURN),
    }
}

fn parameters_to_macro_string(parameters: &Term, ctx: &RenderContext) -> MacroString {
    if let Some(product) = if_subtype(parameters, "product", |product| {
        match product.list_field("arguments") {
            Some(types) => convert_comma_separated(types, ctx),
            None => String::from(UNKNOWN_PARAMETER_RETURN),
        }
    }) {
        return product;
    }

    // `fun((...) -> T)`
    let is_any = TYPE_ANY_ARGUMENTS
        .matches(parameters)
        .and_then(|any| any.field("subtype")?.as_atom())
        == Some("any");

    if is_any {
        String::from(ANY_PARAMETERS)
    } else {
        convert(parameters, ctx)
    }
}

/// `{type, Anno, bounded_fun, [Fun, Constraints]}` under a spec: `name(x) :: x when x: t`.
pub fn bounded_to_macro_string(
    bounded_fun: &Term,
    name_macro_string: &str,
    ctx: &RenderContext,
) -> Option<MacroString> {
    if_subtype(bounded_fun, "bounded_fun", |bounded| {
        let Some([fun, constraints]) = bounded.list_field("arguments") else {
            return String::from(UNKNOWN_PARAMETER_RETURN);
        };

        let signature = fun_type::try_convert_named(fun, name_macro_string, ctx)
            .unwrap_or_else(|| String::from(UNKNOWN_PARAMETER_RETURN));

        let constraints = constraints
            .as_list()
            .unwrap_or_default()
            .iter()
            .map(|constraint| constraint_to_macro_string(constraint, ctx))
            .collect::<Vec<_>>();

        if constraints.is_empty() {
            signature
        } else {
            format!("{signature} when {}", constraints.join(", "))
        }
    })
}

/// `{type, Anno, constraint, [{atom, _, is_subtype}, [Var, Type]]}`
fn constraint_to_macro_string(constraint: &Term, ctx: &RenderContext) -> MacroString {
    if_subtype(constraint, "constraint", |constraint| {
        match constraint.list_field("arguments") {
            Some([_, bound]) => match bound.as_list() {
                Some([var, bound_type]) => {
                    format!("{}: {}", convert(var, ctx), convert(bound_type, ctx))
                }
                _ => String::from(UNKNOWN_PARAMETER_RETURN),
            },
            _ => String::from(UNKNOWN_PARAMETER_RETURN),
        }
    })
    .unwrap_or_else(|| convert(constraint, ctx))
}
