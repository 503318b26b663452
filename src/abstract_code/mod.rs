//! # Abstract code rendering
//!
//! One converter per abstract-code construct. Each converter:
//! - guards on tag and arity through the layout table in [`crate::term::term_schema`]
//! - reads its payload by field name
//! - delegates sub-terms back through the dispatchers in this module
//! - returns the scope its term declared, so the caller can thread it into the next sibling
//! - renders fixed sentinel text for payloads of the wrong kind
//!
//! A converter returning `None` means "not my construct". Only the dispatchers' callers
//! decide what to do when nothing matches.

pub mod calls;
pub mod clauses;
pub mod collections;
pub mod forms;
pub mod literals;
pub mod operators;
pub mod scope;
pub mod types;
pub mod var;

use crate::render_messages::render_warnings::{RenderWarning, WarningKind};
use crate::settings::{RenderConfig, UNKNOWN_ABSTRACT_CODE};
use crate::term::Term;
use crate::term::term_schema::{ConstructShape, TaggedTerm, describe, lookup};
use crate::{scope_log, term_log};
use scope::Scope;
use std::cell::RefCell;

/// Text produced for one term.
pub type MacroString = String;

/// A rendering together with the names it bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedMacroString {
    pub macro_string: MacroString,
    pub declared_scope: Scope,
}

impl ScopedMacroString {
    pub fn new(macro_string: impl Into<MacroString>, declared_scope: Scope) -> Self {
        ScopedMacroString {
            macro_string: macro_string.into(),
            declared_scope,
        }
    }

    /// A rendering that binds nothing.
    pub fn unscoped(macro_string: impl Into<MacroString>) -> Self {
        ScopedMacroString::new(macro_string, Scope::empty())
    }
}

/// Per-form rendering state.
///
/// Everything here is read-only apart from the warning buffer, which belongs to the single
/// form being rendered and is never shared between threads.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub config: &'a RenderConfig,
    warnings: &'a RefCell<Vec<RenderWarning>>,

    /// Converting the head of a clause or the left side of a match
    pub in_pattern: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a RenderConfig, warnings: &'a RefCell<Vec<RenderWarning>>) -> Self {
        RenderContext {
            config,
            warnings,
            in_pattern: false,
        }
    }

    pub fn pattern(&self) -> RenderContext<'a> {
        RenderContext {
            in_pattern: true,
            ..*self
        }
    }

    pub fn expression(&self) -> RenderContext<'a> {
        RenderContext {
            in_pattern: false,
            ..*self
        }
    }

    pub fn warn(&self, warning: RenderWarning) {
        self.warnings.borrow_mut().push(warning);
    }

    pub fn indent(&self, text: &str) -> String {
        self.config.indent(text)
    }
}

/// The tag and arity guard shared by every converter.
pub fn if_tag<'a, T>(
    term: &'a Term,
    shape: &'static ConstructShape,
    convert: impl FnOnce(TaggedTerm<'a>) -> T,
) -> Option<T> {
    shape.matches(term).map(convert)
}

pub type ExpressionConverter = fn(&Term, &Scope, &RenderContext) -> Option<ScopedMacroString>;

// Tried in order, the first converter whose guard accepts the term wins
const EXPRESSION_CONVERTERS: &[ExpressionConverter] = &[
    convert_var,
    literals::try_convert_atom,
    literals::try_convert_integer,
    literals::try_convert_float,
    literals::try_convert_char,
    literals::try_convert_string,
    collections::try_convert_nil,
    collections::try_convert_cons,
    collections::try_convert_tuple,
    collections::try_convert_map,
    collections::try_convert_map_update,
    clauses::try_convert_match,
    operators::try_convert_binary,
    operators::try_convert_unary,
    calls::try_convert_call,
    calls::try_convert_fun,
    clauses::try_convert_case,
    clauses::try_convert_if,
    clauses::try_convert_receive,
    clauses::try_convert_receive_after,
    clauses::try_convert_block,
];

fn convert_var(term: &Term, scope: &Scope, _: &RenderContext) -> Option<ScopedMacroString> {
    var::convert_tagged(term, scope)
}

/// Dispatch an expression or pattern term. `None` when no converter knows the shape.
pub fn try_convert(term: &Term, scope: &Scope, ctx: &RenderContext) -> Option<ScopedMacroString> {
    EXPRESSION_CONVERTERS
        .iter()
        .find_map(|convert| convert(term, scope, ctx))
}

/// Dispatch, falling back to sentinel text and a warning for unsupported constructs.
pub fn convert(term: &Term, scope: &Scope, ctx: &RenderContext) -> ScopedMacroString {
    match try_convert(term, scope, ctx) {
        Some(converted) => converted,
        None => {
            term_log!(Yellow "No expression converter for ", term.to_string());

            let msg = match lookup(term) {
                Some(shape) => format!(
                    "`{}/{}` cannot appear in an expression or pattern",
                    shape.tag,
                    shape.arity()
                ),
                None => format!("`{}` is not supported yet", describe(term)),
            };
            ctx.warn(RenderWarning::new(
                msg,
                term.line(),
                WarningKind::UnsupportedExpression,
            ));

            ScopedMacroString::unscoped(UNKNOWN_ABSTRACT_CODE)
        }
    }
}

/// Converts siblings left to right, threading each sibling's bindings into the next.
/// Returns every rendering plus all names declared by the sequence.
pub fn thread_sequence<'t, I, F>(
    terms: I,
    scope: &Scope,
    mut convert_one: F,
) -> (Vec<MacroString>, Scope)
where
    I: IntoIterator<Item = &'t Term>,
    F: FnMut(&'t Term, &Scope) -> ScopedMacroString,
{
    let mut lookup_scope = scope.clone();
    let mut declared_scope = Scope::empty();
    let mut macro_strings = Vec::new();

    for term in terms {
        let converted = convert_one(term, &lookup_scope);
        lookup_scope = lookup_scope.thread(&converted.declared_scope);
        declared_scope = declared_scope.union(&converted.declared_scope);
        macro_strings.push(converted.macro_string);
    }

    scope_log!("sequence declared ", declared_scope.to_string());

    (macro_strings, declared_scope)
}

pub fn convert_sequence(
    terms: &[Term],
    scope: &Scope,
    ctx: &RenderContext,
) -> (Vec<MacroString>, Scope) {
    thread_sequence(terms, scope, |term, lookup_scope| {
        convert(term, lookup_scope, ctx)
    })
}

/// A comma separated sequence, e.g. call arguments or tuple elements.
pub fn convert_comma_separated(
    terms: &[Term],
    scope: &Scope,
    ctx: &RenderContext,
) -> ScopedMacroString {
    let (macro_strings, declared_scope) = convert_sequence(terms, scope, ctx);
    ScopedMacroString::new(macro_strings.join(", "), declared_scope)
}

/// Expressions of a body, one per line.
pub fn convert_body(body: &[Term], scope: &Scope, ctx: &RenderContext) -> ScopedMacroString {
    let (macro_strings, declared_scope) = convert_sequence(body, scope, ctx);
    ScopedMacroString::new(macro_strings.join("\n"), declared_scope)
}

#[cfg(test)]
mod tests;
