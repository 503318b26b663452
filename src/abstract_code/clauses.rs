//! Clauses and the constructs built from them: `case`, `if`, `receive`, `fun`, blocks and
//! matches.
//!
//! This is where scope boundaries live. Each clause kind decides which names its patterns
//! can see and whether references in them are pinned:
//!
//! | clause of        | patterns look up        | pinning | body sees          |
//! |------------------|-------------------------|---------|--------------------|
//! | named function   | nothing (fresh scope)   | no      | head bindings      |
//! | `fun`            | nothing (heads shadow)  | no      | outer + head       |
//! | `case`/`receive` | outer scope             | yes     | outer + head       |

use crate::abstract_code::operators::{OperatorRendering, binary_operator};
use crate::abstract_code::scope::Scope;
use crate::abstract_code::{
    MacroString, RenderContext, ScopedMacroString, convert, convert_body, convert_sequence,
    if_tag,
};
use crate::scope_log;
use crate::settings::{UNKNOWN_ABSTRACT_CODE, UNKNOWN_CLAUSES};
use crate::term::Term;
use crate::term::term_schema::{BINARY_OP, BLOCK, CASE, CLAUSE, IF, MATCH, RECEIVE, RECEIVE_AFTER};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    Function,
    Fn,
    Case,
}

/// The parts of one `{clause, Anno, Patterns, Guards, Body}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedClause {
    /// Comma separated patterns
    pub head: MacroString,
    pub guard: Option<MacroString>,
    pub body: MacroString,

    /// Names bound by the head and the body
    pub declared_scope: Scope,
}

impl ConvertedClause {
    /// `head when guard`
    pub fn head_with_guard(&self) -> MacroString {
        match &self.guard {
            Some(guard) => format!("{} when {guard}", self.head),
            None => self.head.clone(),
        }
    }
}

pub fn convert_clause(
    term: &Term,
    outer: &Scope,
    kind: ClauseKind,
    ctx: &RenderContext,
) -> Option<ConvertedClause> {
    if_tag(term, &CLAUSE, |clause| {
        let patterns = clause.list_field("patterns").unwrap_or_default();
        let guards = clause.list_field("guards").unwrap_or_default();
        let body = clause.list_field("body").unwrap_or_default();

        let pattern_scope = match kind {
            ClauseKind::Function | ClauseKind::Fn => Scope::empty(),
            ClauseKind::Case => outer.with_pinning(true),
        };

        let (head_macro_strings, head_scope) =
            convert_sequence(patterns, &pattern_scope, &ctx.pattern());

        let body_scope = match kind {
            ClauseKind::Function => head_scope.clone(),
            ClauseKind::Fn | ClauseKind::Case => outer.with_pinning(false).union(&head_scope),
        };

        scope_log!("clause body scope ", body_scope.to_string());

        let expression_ctx = ctx.expression();
        let guard = convert_guards(guards, &body_scope, &expression_ctx);
        let converted_body = convert_body(body, &body_scope, &expression_ctx);

        ConvertedClause {
            head: head_macro_strings.join(", "),
            guard,
            body: converted_body.macro_string,
            declared_scope: head_scope.union(&converted_body.declared_scope),
        }
    })
}

/// A guard with the number of tests it was joined from.
struct GuardAlternative {
    macro_string: MacroString,
    tests: usize,
}

/// Guard sequences `[[G]]`: one alternative per inner list, its tests joined with `and`.
fn convert_guard_alternatives(
    guards: &[Term],
    scope: &Scope,
    ctx: &RenderContext,
) -> Vec<GuardAlternative> {
    guards
        .iter()
        .map(|guard| match guard.as_list() {
            Some(tests) => {
                let grouped = tests.len() > 1;
                let macro_string = tests
                    .iter()
                    .map(|test| {
                        let macro_string = convert(test, scope, ctx).macro_string;
                        if grouped && is_infix(test) {
                            format!("({macro_string})")
                        } else {
                            macro_string
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" and ");

                GuardAlternative {
                    macro_string,
                    tests: tests.len(),
                }
            }
            None => GuardAlternative {
                macro_string: convert(guard, scope, ctx).macro_string,
                tests: 1,
            },
        })
        .collect()
}

/// `when a when b` after a clause head.
fn convert_guards(guards: &[Term], scope: &Scope, ctx: &RenderContext) -> Option<MacroString> {
    if guards.is_empty() {
        return None;
    }

    let alternatives = convert_guard_alternatives(guards, scope, ctx);

    Some(
        alternatives
            .into_iter()
            .map(|alternative| alternative.macro_string)
            .collect::<Vec<_>>()
            .join(" when "),
    )
}

/// A single condition, as `cond` needs: `(a and b) or c`.
fn convert_condition(guards: &[Term], scope: &Scope, ctx: &RenderContext) -> MacroString {
    let alternatives = convert_guard_alternatives(guards, scope, ctx);

    match alternatives.as_slice() {
        [] => String::from("true"),
        [single] => single.macro_string.clone(),
        _ => alternatives
            .iter()
            .map(|alternative| {
                if alternative.tests > 1 {
                    format!("({})", alternative.macro_string)
                } else {
                    alternative.macro_string.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" or "),
    }
}

fn is_infix(term: &Term) -> bool {
    BINARY_OP
        .matches(term)
        .and_then(|op| op.field("operator")?.as_atom())
        .and_then(binary_operator)
        .is_some_and(|rendering| matches!(rendering, OperatorRendering::Infix(_)))
}

/// `head -> body`, or the body on its own indented lines when it spans more than one.
fn render_arm(head: &str, body: &str, ctx: &RenderContext) -> MacroString {
    // Zero-arity fn heads are empty
    let arrow = if head.is_empty() {
        String::from("->")
    } else {
        format!("{head} ->")
    };

    if body.contains('\n') {
        format!("{arrow}\n{}", ctx.indent(body))
    } else {
        format!("{arrow} {body}")
    }
}

/// `do ... end` block of arms.
fn render_arms(opening: &str, arms: &[MacroString], ctx: &RenderContext) -> MacroString {
    format!("{opening} do\n{}\nend", ctx.indent(&arms.join("\n")))
}

fn convert_clauses(
    clauses: &[Term],
    outer: &Scope,
    kind: ClauseKind,
    ctx: &RenderContext,
) -> (Vec<MacroString>, Scope) {
    let mut arms = Vec::with_capacity(clauses.len());
    let mut declared_scope = Scope::empty();

    for clause in clauses {
        match convert_clause(clause, outer, kind, ctx) {
            Some(converted) => {
                arms.push(render_arm(&converted.head_with_guard(), &converted.body, ctx));
                declared_scope = declared_scope.union(&converted.declared_scope);
            }
            None => arms.push(String::from(UNKNOWN_CLAUSES)),
        }
    }

    (arms, declared_scope)
}

/// Anonymous function clauses. Bindings never escape a `fn`.
pub fn convert_fn_clauses(clauses: &[Term], scope: &Scope, ctx: &RenderContext) -> ScopedMacroString {
    let (arms, _) = convert_clauses(clauses, scope, ClauseKind::Fn, ctx);

    let macro_string = match arms.as_slice() {
        [arm] if !arm.contains('\n') => format!("fn {arm} end"),
        _ => format!("fn\n{}\nend", ctx.indent(&arms.join("\n"))),
    };

    ScopedMacroString::unscoped(macro_string)
}

/// `{'case', Anno, Expression, Clauses}`
pub fn try_convert_case(term: &Term, scope: &Scope, ctx: &RenderContext) -> Option<ScopedMacroString> {
    if_tag(term, &CASE, |case| {
        let (Some(expression), Some(clauses)) =
            (case.field("expression"), case.list_field("clauses"))
        else {
            return ScopedMacroString::unscoped(UNKNOWN_ABSTRACT_CODE);
        };

        let expression = convert(expression, scope, ctx);
        let outer = scope.thread(&expression.declared_scope);
        let (arms, clauses_scope) = convert_clauses(clauses, &outer, ClauseKind::Case, ctx);

        ScopedMacroString::new(
            render_arms(&format!("case {}", expression.macro_string), &arms, ctx),
            expression.declared_scope.union(&clauses_scope),
        )
    })
}

/// `{'if', Anno, Clauses}` has only guards, which is `cond`.
pub fn try_convert_if(term: &Term, scope: &Scope, ctx: &RenderContext) -> Option<ScopedMacroString> {
    if_tag(term, &IF, |if_term| {
        let Some(clauses) = if_term.list_field("clauses") else {
            return ScopedMacroString::unscoped(UNKNOWN_ABSTRACT_CODE);
        };

        let mut arms = Vec::with_capacity(clauses.len());
        let mut declared_scope = Scope::empty();

        for clause in clauses {
            let converted = if_tag(clause, &CLAUSE, |clause| {
                let guards = clause.list_field("guards").unwrap_or_default();
                let body = clause.list_field("body").unwrap_or_default();

                let condition = convert_condition(guards, scope, ctx);
                let body = convert_body(body, scope, ctx);

                (render_arm(&condition, &body.macro_string, ctx), body.declared_scope)
            });

            match converted {
                Some((arm, body_scope)) => {
                    arms.push(arm);
                    declared_scope = declared_scope.union(&body_scope);
                }
                None => arms.push(String::from(UNKNOWN_CLAUSES)),
            }
        }

        ScopedMacroString::new(render_arms("cond", &arms, ctx), declared_scope)
    })
}

/// `{'receive', Anno, Clauses}`
pub fn try_convert_receive(term: &Term, scope: &Scope, ctx: &RenderContext) -> Option<ScopedMacroString> {
    if_tag(term, &RECEIVE, |receive| {
        let Some(clauses) = receive.list_field("clauses") else {
            return ScopedMacroString::unscoped(UNKNOWN_ABSTRACT_CODE);
        };

        let (arms, declared_scope) = convert_clauses(clauses, scope, ClauseKind::Case, ctx);
        ScopedMacroString::new(render_arms("receive", &arms, ctx), declared_scope)
    })
}

/// `{'receive', Anno, Clauses, Timeout, AfterBody}`
pub fn try_convert_receive_after(
    term: &Term,
    scope: &Scope,
    ctx: &RenderContext,
) -> Option<ScopedMacroString> {
    if_tag(term, &RECEIVE_AFTER, |receive| {
        let (Some(clauses), Some(timeout), Some(after)) = (
            receive.list_field("clauses"),
            receive.field("timeout"),
            receive.list_field("after"),
        ) else {
            return ScopedMacroString::unscoped(UNKNOWN_ABSTRACT_CODE);
        };

        let (arms, clauses_scope) = convert_clauses(clauses, scope, ClauseKind::Case, ctx);
        let timeout = convert(timeout, scope, ctx);
        let after_body = convert_body(after, &scope.thread(&timeout.declared_scope), ctx);

        let mut macro_string = String::from("receive do\n");
        if !arms.is_empty() {
            macro_string.push_str(&ctx.indent(&arms.join("\n")));
            macro_string.push('\n');
        }
        macro_string.push_str("after\n");
        macro_string.push_str(&ctx.indent(&render_arm(
            &timeout.macro_string,
            &after_body.macro_string,
            ctx,
        )));
        macro_string.push_str("\nend");

        ScopedMacroString::new(
            macro_string,
            clauses_scope
                .union(&timeout.declared_scope)
                .union(&after_body.declared_scope),
        )
    })
}

/// `{block, Anno, Body}`
pub fn try_convert_block(term: &Term, scope: &Scope, ctx: &RenderContext) -> Option<ScopedMacroString> {
    if_tag(term, &BLOCK, |block| {
        let Some(body) = block.list_field("body") else {
            return ScopedMacroString::unscoped(UNKNOWN_ABSTRACT_CODE);
        };

        let converted = convert_body(body, scope, ctx);

        if body.len() == 1 {
            return converted;
        }

        ScopedMacroString::new(
            format!("(\n{}\n)", ctx.indent(&converted.macro_string)),
            converted.declared_scope,
        )
    })
}

/// `{match, Anno, Pattern, Expression}` is `pattern = expression`.
///
/// The expression is evaluated first. In expression position the pattern then becomes a
/// pinning pattern over everything bound so far. Inside another pattern both sides are
/// patterns of the same scope.
pub fn try_convert_match(term: &Term, scope: &Scope, ctx: &RenderContext) -> Option<ScopedMacroString> {
    if_tag(term, &MATCH, |match_term| {
        let (Some(pattern), Some(expression)) =
            (match_term.field("pattern"), match_term.field("expression"))
        else {
            return ScopedMacroString::unscoped(UNKNOWN_ABSTRACT_CODE);
        };

        let expression = convert(expression, scope, ctx);

        let pattern = if ctx.in_pattern {
            convert(pattern, &scope.thread(&expression.declared_scope), ctx)
        } else {
            let pattern_scope = scope.union(&expression.declared_scope).with_pinning(true);
            convert(pattern, &pattern_scope, &ctx.pattern())
        };

        ScopedMacroString::new(
            format!("{} = {}", pattern.macro_string, expression.macro_string),
            expression.declared_scope.union(&pattern.declared_scope),
        )
    })
}
