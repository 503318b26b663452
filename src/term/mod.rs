//! # Term
//!
//! The generic object model that decoded debug info arrives in.
//! Terms are produced by an external decoder, so nothing here knows about abstract code.
//! Converters only ever see these shapes and have to check them before reading positions.

pub mod debug_info;
pub mod term_schema;

use serde::{Deserialize, Deserializer};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A decoded term from the compiler's debug metadata.
///
/// Read externally tagged, so `{var, 1, 'X'}` is
/// `{"tuple": [{"atom": "var"}, {"number": 1}, {"atom": "X"}]}` in JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    Atom(String),
    Tuple(Vec<Term>),
    List(Vec<Term>),
    Number(Number),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),

    /// Integers outside `i64`, kept as their exact decimal digits
    BigInteger(String),
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Number, D::Error> {
        let number = serde_json::Number::deserialize(deserializer)?;

        if let Some(value) = number.as_i64() {
            return Ok(Number::Integer(value));
        }

        match number.as_f64() {
            Some(value) if number.is_f64() => Ok(Number::Float(value)),
            _ => Ok(Number::BigInteger(number.to_string())),
        }
    }
}

impl Term {
    pub fn atom(name: impl Into<String>) -> Term {
        Term::Atom(name.into())
    }

    pub fn tuple(elements: Vec<Term>) -> Term {
        Term::Tuple(elements)
    }

    pub fn list(elements: Vec<Term>) -> Term {
        Term::List(elements)
    }

    pub fn integer(value: i64) -> Term {
        Term::Number(Number::Integer(value))
    }

    pub fn float(value: f64) -> Term {
        Term::Number(Number::Float(value))
    }

    pub fn string(value: impl Into<String>) -> Term {
        Term::String(value.into())
    }

    #[inline]
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Term::Atom(name) => Some(name),
            _ => None,
        }
    }

    #[inline]
    pub fn as_tuple(&self) -> Option<&[Term]> {
        match self {
            Term::Tuple(elements) => Some(elements),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Term]> {
        match self {
            Term::List(elements) => Some(elements),
            _ => None,
        }
    }

    #[inline]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Term::Number(Number::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    /// The first element of a tuple when it is an atom.
    pub fn tag(&self) -> Option<&str> {
        self.as_tuple()?.first()?.as_atom()
    }

    pub fn arity(&self) -> Option<usize> {
        self.as_tuple().map(<[Term]>::len)
    }

    /// Positional access into a tuple.
    pub fn element(&self, index: usize) -> Option<&Term> {
        self.as_tuple()?.get(index)
    }

    /// Anno is either a bare line or `{Line, Column}`.
    pub fn line(&self) -> Option<i64> {
        match self.element(1)? {
            Term::Number(Number::Integer(line)) => Some(*line),
            Term::Tuple(location) => location.first()?.as_integer(),
            _ => None,
        }
    }

    /// Erlang strings are lists of code points, the decoder may hand back either form.
    pub fn as_char_list(&self) -> Option<String> {
        match self {
            Term::String(value) => Some(value.to_owned()),
            Term::List(elements) => elements
                .iter()
                .map(|element| {
                    element
                        .as_integer()
                        .and_then(|code| u32::try_from(code).ok())
                        .and_then(char::from_u32)
                })
                .collect(),
            _ => None,
        }
    }
}

/// Erlang-ish notation, used when reporting terms back to the user.
impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Term::Atom(name) => write!(f, "{name}"),
            Term::Tuple(elements) => {
                write!(f, "{{")?;
                write_elements(f, elements)?;
                write!(f, "}}")
            }
            Term::List(elements) => {
                write!(f, "[")?;
                write_elements(f, elements)?;
                write!(f, "]")
            }
            Term::Number(Number::Integer(value)) => write!(f, "{value}"),
            Term::Number(Number::Float(value)) => write!(f, "{value:?}"),
            Term::Number(Number::BigInteger(digits)) => write!(f, "{digits}"),
            Term::String(value) => write!(f, "{value:?}"),
        }
    }
}

fn write_elements(f: &mut Formatter<'_>, elements: &[Term]) -> FmtResult {
    for (index, element) in elements.iter().enumerate() {
        if index > 0 {
            write!(f, ",")?;
        }
        write!(f, "{element}")?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/term_tests.rs"]
mod tests;
