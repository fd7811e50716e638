use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

use super::form::Form;

/// A single named assumption in a policy: `name : formula`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub formula: Form,
}

impl Declaration {
    pub fn new(name: impl Into<String>, formula: Form) -> Self {
        Self {
            name: name.into(),
            formula,
        }
    }

    pub fn to_concrete_string(&self) -> String {
        format!("{} : {}", self.name, self.formula.to_concrete_string())
    }
}

/// An ordered sequence of [`Declaration`]s — the premises available to a
/// proof (spec §3 "Policy").
///
/// A newtype over `Vec<Declaration>` rather than a bare type alias:
/// the checker needs inherent methods on it (context extension, lookup
/// by name, `parse`/display), and Rust's orphan rules forbid inherent
/// `impl` blocks on `Vec<T>` itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy(pub Vec<Declaration>);

impl Policy {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self(declarations)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// The formula of the first declaration with this name, scanning in
    /// order (spec §4.3 "hyp" rule).
    pub fn lookup(&self, name: &str) -> Option<&Form> {
        self.0.iter().find(|d| d.name == name).map(|d| &d.formula)
    }

    /// Returns a new policy with `declaration` appended. Used by the
    /// checker's `Let`/`LetWrap` rules, which must extend the context
    /// visibly only to their own recursive subcall — an append-and-clone
    /// is the simplest way to guarantee the caller's view is untouched
    /// (spec §5, §9).
    pub fn extended_with(&self, declaration: Declaration) -> Policy {
        let mut extended = self.0.clone();
        extended.push(declaration);
        Policy(extended)
    }

    pub fn to_concrete_string(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        self.0
            .iter()
            .map(|d| format!("{};", d.to_concrete_string()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Deref for Policy {
    type Target = Vec<Declaration>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Policy {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<Declaration> for Policy {
    fn from_iter<T: IntoIterator<Item = Declaration>>(iter: T) -> Self {
        Policy(iter.into_iter().collect())
    }
}
