//! Layout table for abstract-code tuples.
//!
//! Every construct the renderer understands is described once here: its tag atom and the
//! names of its positions. Converters guard with [`ConstructShape::matches`] and then read
//! payload by field name, so a change in the compiler's layout is one entry in this file.

use crate::term::Term;

#[derive(Debug, PartialEq, Eq)]
pub struct ConstructShape {
    pub tag: &'static str,
    /// Position names, including the tag and annotation slots.
    pub fields: &'static [&'static str],
}

impl ConstructShape {
    pub const fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Tag and arity guard. `None` for any term that is not exactly this construct.
    pub fn matches<'a>(&'static self, term: &'a Term) -> Option<TaggedTerm<'a>> {
        let elements = term.as_tuple()?;

        if elements.len() != self.arity() || elements.first()?.as_atom()? != self.tag {
            return None;
        }

        Some(TaggedTerm {
            shape: self,
            term,
            elements,
        })
    }

    fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|name| *name == field)
    }
}

/// A term that already passed the guard for `shape`.
#[derive(Debug, Clone, Copy)]
pub struct TaggedTerm<'a> {
    pub shape: &'static ConstructShape,
    pub term: &'a Term,
    elements: &'a [Term],
}

impl<'a> TaggedTerm<'a> {
    /// Payload by field name. `None` only if the name is not part of the shape.
    pub fn field(&self, name: &str) -> Option<&'a Term> {
        self.elements.get(self.shape.position(name)?)
    }

    /// Payload that is expected to be a list of sub-terms.
    pub fn list_field(&self, name: &str) -> Option<&'a [Term]> {
        self.field(name)?.as_list()
    }

    pub fn line(&self) -> Option<i64> {
        self.term.line()
    }
}

macro_rules! shape {
    ($name:ident, $tag:literal, [$($field:literal),*]) => {
        pub static $name: ConstructShape = ConstructShape {
            tag: $tag,
            fields: &["tag", "anno", $($field),*],
        };
    };
}

// Expressions and patterns
shape!(VAR, "var", ["name"]);
shape!(ATOM, "atom", ["value"]);
shape!(INTEGER, "integer", ["value"]);
shape!(FLOAT, "float", ["value"]);
shape!(CHAR, "char", ["value"]);
shape!(STRING, "string", ["value"]);
shape!(NIL, "nil", []);
shape!(CONS, "cons", ["head", "tail"]);
shape!(TUPLE, "tuple", ["elements"]);
shape!(MAP, "map", ["associations"]);
shape!(MAP_UPDATE, "map", ["map", "associations"]);
shape!(MAP_FIELD_ASSOC, "map_field_assoc", ["key", "value"]);
shape!(MAP_FIELD_EXACT, "map_field_exact", ["key", "value"]);
shape!(MATCH, "match", ["pattern", "expression"]);
shape!(BINARY_OP, "op", ["operator", "left", "right"]);
shape!(UNARY_OP, "op", ["operator", "operand"]);
shape!(CALL, "call", ["function", "arguments"]);
shape!(REMOTE, "remote", ["module", "function"]);
shape!(FUN, "fun", ["payload"]);
shape!(CASE, "case", ["expression", "clauses"]);
shape!(IF, "if", ["clauses"]);
shape!(RECEIVE, "receive", ["clauses"]);
shape!(RECEIVE_AFTER, "receive", ["clauses", "timeout", "after"]);
shape!(BLOCK, "block", ["body"]);
shape!(CLAUSE, "clause", ["patterns", "guards", "body"]);

// Forms
shape!(FUNCTION, "function", ["name", "arity", "clauses"]);
shape!(ATTRIBUTE, "attribute", ["name", "value"]);
shape!(EOF, "eof", []);

// Types
shape!(TYPE, "type", ["subtype", "arguments"]);
shape!(TYPE_ANY_ARGUMENTS, "type", ["subtype"]);
shape!(USER_TYPE, "user_type", ["name", "arguments"]);
shape!(REMOTE_TYPE, "remote_type", ["arguments"]);
shape!(ANN_TYPE, "ann_type", ["arguments"]);

/// Every known shape, for reporting terms that reached the wrong converter family.
pub static SCHEMA: &[&ConstructShape] = &[
    &VAR,
    &ATOM,
    &INTEGER,
    &FLOAT,
    &CHAR,
    &STRING,
    &NIL,
    &CONS,
    &TUPLE,
    &MAP,
    &MAP_UPDATE,
    &MAP_FIELD_ASSOC,
    &MAP_FIELD_EXACT,
    &MATCH,
    &BINARY_OP,
    &UNARY_OP,
    &CALL,
    &REMOTE,
    &FUN,
    &CASE,
    &IF,
    &RECEIVE,
    &RECEIVE_AFTER,
    &BLOCK,
    &CLAUSE,
    &FUNCTION,
    &ATTRIBUTE,
    &EOF,
    &TYPE,
    &TYPE_ANY_ARGUMENTS,
    &USER_TYPE,
    &REMOTE_TYPE,
    &ANN_TYPE,
];

pub fn lookup(term: &Term) -> Option<&'static ConstructShape> {
    let tag = term.tag()?;
    let arity = term.arity()?;

    SCHEMA
        .iter()
        .copied()
        .find(|shape| shape.tag == tag && shape.arity() == arity)
}

/// `tag/arity` for messages, or the raw term when it is not tagged at all.
pub fn describe(term: &Term) -> String {
    match (term.tag(), term.arity()) {
        (Some(tag), Some(arity)) => format!("{tag}/{arity}"),
        _ => term.to_string(),
    }
}
