use serde::{Deserialize, Serialize};

use super::term::Term;

/// A PCA formula.
///
/// `Affirms` is never produced by the parser and never legal in a policy
/// declaration or a claimed formula — it exists purely as the checker's
/// internal "currently focused on proving the content of a says
/// assumption" mode marker (spec §3, §9). It is still a constructor of
/// this same sum type (rather than a separate type) so that every
/// recursive function over `Form` is forced to dispatch on it
/// exhaustively, matching rule order in the checker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Form {
    Atom(String, Vec<Term>),
    Implies(Box<Form>, Box<Form>),
    Says(Term, Box<Form>),
    Forall(String, Box<Form>),
    Affirms(Term, Box<Form>),
}

impl Form {
    pub fn atom(predicate: impl Into<String>, terms: Vec<Term>) -> Self {
        Form::Atom(predicate.into(), terms)
    }

    pub fn implies(premise: Form, conclusion: Form) -> Self {
        Form::Implies(Box::new(premise), Box::new(conclusion))
    }

    pub fn says(agent: Term, formula: Form) -> Self {
        Form::Says(agent, Box::new(formula))
    }

    pub fn forall(variable: impl Into<String>, formula: Form) -> Self {
        Form::Forall(variable.into(), Box::new(formula))
    }

    pub fn affirms(agent: Term, formula: Form) -> Self {
        Form::Affirms(agent, Box::new(formula))
    }

    /// True if this formula (at any depth) contains the internal
    /// `Affirms` marker. Used to reject it wherever the spec requires
    /// user-facing formulas to be Affirms-free (policy declarations,
    /// claimed formulas).
    pub fn contains_affirms(&self) -> bool {
        match self {
            Form::Atom(_, _) => false,
            Form::Implies(p, q) => p.contains_affirms() || q.contains_affirms(),
            Form::Says(_, body) => body.contains_affirms(),
            Form::Forall(_, body) => body.contains_affirms(),
            Form::Affirms(_, _) => true,
        }
    }

    /// Concrete surface syntax (spec §6). Parenthesizes every compound
    /// operand so the result always reparses to the same tree — this
    /// checker has no use for a pretty-printer that drops parens based
    /// on precedence, since its only consumer is round-tripping through
    /// tests and the CLI's echo of the parsed judgment.
    pub fn to_concrete_string(&self) -> String {
        match self {
            Form::Atom(predicate, terms) => {
                let args = terms
                    .iter()
                    .map(Term::to_concrete_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}({})", predicate, args)
            }
            Form::Implies(premise, conclusion) => format!(
                "({} -> {})",
                premise.to_concrete_string(),
                conclusion.to_concrete_string()
            ),
            Form::Says(agent, body) => {
                format!("({} says {})", agent.to_concrete_string(), body.to_concrete_string())
            }
            Form::Forall(variable, body) => {
                format!("(!{}. {})", variable, body.to_concrete_string())
            }
            Form::Affirms(agent, body) => {
                format!("({} affirms {})", agent.to_concrete_string(), body.to_concrete_string())
            }
        }
    }
}
