use serde::{Deserialize, Serialize};

/// A first-order term: either a bindable variable or a rigid constant.
///
/// Surface syntax distinguishes the two by the case of the identifier's
/// first letter (uppercase is a variable, lowercase a constant), but that
/// distinction is made once by the parser — downstream code only ever
/// sees the variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(String),
    Constant(String),
}

impl Term {
    pub fn variable(id: impl Into<String>) -> Self {
        Term::Variable(id.into())
    }

    pub fn constant(name: impl Into<String>) -> Self {
        Term::Constant(name.into())
    }

    /// The identifier, regardless of variant.
    pub fn id(&self) -> &str {
        match self {
            Term::Variable(id) => id,
            Term::Constant(id) => id,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// Concrete surface syntax for this term: just its identifier.
    pub fn to_concrete_string(&self) -> String {
        self.id().to_string()
    }
}
