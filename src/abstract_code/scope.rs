use rustc_hash::FxHashSet;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

/// Variable names already bound along the current path through a clause.
///
/// Scopes are values: converting a term never changes the scope it was given, it hands back a
/// new scope holding only the names it declared. The bound set is shared between clones, so
/// threading a scope through siblings only allocates when a binding is actually added.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    bound_names: Arc<FxHashSet<String>>,

    /// References to bound names render with a pin marker
    pinning: bool,
}

impl Scope {
    /// No bound names, not pinning. The identity for declared scopes.
    pub fn empty() -> Self {
        Scope::default()
    }

    pub fn new<I, S>(names: I, pinning: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Scope {
            bound_names: Arc::new(names.into_iter().map(Into::into).collect()),
            pinning,
        }
    }

    /// A declared scope holding exactly one new binding.
    pub fn binding(name: impl Into<String>) -> Self {
        Scope::new([name], false)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.bound_names.contains(name)
    }

    #[inline]
    pub fn is_pinning(&self) -> bool {
        self.pinning
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bound_names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bound_names.len()
    }

    pub fn with_pinning(&self, pinning: bool) -> Scope {
        Scope {
            bound_names: Arc::clone(&self.bound_names),
            pinning,
        }
    }

    /// All names from both scopes. Pinning is taken from `self`.
    pub fn union(&self, other: &Scope) -> Scope {
        if other.bound_names.is_subset(&self.bound_names) {
            return self.clone();
        }
        if self.bound_names.is_subset(&other.bound_names) {
            return other.with_pinning(self.pinning);
        }

        let mut bound_names = (*self.bound_names).clone();
        bound_names.extend(other.bound_names.iter().cloned());

        Scope {
            bound_names: Arc::new(bound_names),
            pinning: self.pinning,
        }
    }

    /// The scope the next sibling is converted with, after one sibling declared `declared`.
    ///
    /// Outside patterns every new binding is visible to the following siblings. Inside a
    /// pinning pattern, only names bound before the pattern count as references; a name that
    /// repeats within the same pattern stays a plain binding.
    pub fn thread(&self, declared: &Scope) -> Scope {
        if self.pinning {
            self.clone()
        } else {
            self.union(declared)
        }
    }

    /// Sorted, for stable output in logs and tests.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bound_names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl PartialEq for Scope {
    fn eq(&self, other: &Self) -> bool {
        self.pinning == other.pinning && self.bound_names == other.bound_names
    }
}

impl Eq for Scope {}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let pin = if self.pinning { "^" } else { "" };
        write!(f, "{pin}{{{}}}", self.sorted_names().join(", "))
    }
}

#[cfg(test)]
#[path = "tests/scope_tests.rs"]
mod tests;
