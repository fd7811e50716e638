use std::collections::HashMap;

use crate::models::{Form, Term};

/// Structural equality on terms (spec §4.1): same variant, same identifier.
/// `Term` already derives `PartialEq` matching exactly that, so this is a
/// documented wrapper rather than hand-written recursion that could drift
/// from the derive.
pub fn eq_term(s: &Term, t: &Term) -> bool {
    s == t
}

/// Structural, alpha-*insensitive* equality on formulas (spec §4.1):
/// `Forall` compares bound names too, so `!X. p(X)` and `!Y. p(Y)` are
/// unequal. Do not "fix" this to be alpha-aware — the checker's rules are
/// built assuming exact syntactic identity, and alpha-equivalence here
/// would silently accept inputs the decision procedure is supposed to
/// reject.
pub fn eq_form(p: &Form, q: &Form) -> bool {
    p == q
}

fn subst_term(x: &str, t: &Term, term: &Term) -> Term {
    match term {
        Term::Variable(y) if y == x => t.clone(),
        Term::Variable(_) | Term::Constant(_) => term.clone(),
    }
}

/// `P[t/x]`: every free occurrence of variable `x` in `P` replaced by
/// term `t` (spec §4.1). No alpha-renaming is performed to avoid capture —
/// that is a documented, deliberate omission (spec §9 "Open question:
/// capture-avoidance in substitution"), not an oversight.
pub fn subst_form(x: &str, t: &Term, form: &Form) -> Form {
    match form {
        Form::Atom(predicate, terms) => Form::Atom(
            predicate.clone(),
            terms.iter().map(|term| subst_term(x, t, term)).collect(),
        ),
        Form::Implies(premise, conclusion) => {
            Form::implies(subst_form(x, t, premise), subst_form(x, t, conclusion))
        }
        Form::Says(agent, body) => Form::says(subst_term(x, t, agent), subst_form(x, t, body)),
        Form::Forall(bound, body) => {
            if bound.as_str() == x {
                form.clone()
            } else {
                Form::forall(bound.clone(), subst_form(x, t, body))
            }
        }
        Form::Affirms(agent, body) => {
            Form::affirms(subst_term(x, t, agent), subst_form(x, t, body))
        }
    }
}

/// Produces variables whose identifier is uniquely derived from a base
/// name, scoped to a single verification call (spec §4.1, §5): two
/// generators must never share a counter, so this holds its own state
/// rather than reaching for a global/static counter.
#[derive(Debug, Default)]
pub struct FreshVarGen {
    counters: HashMap<String, u64>,
}

impl FreshVarGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a variable named `{base}{n}` where `n` is the next unused
    /// suffix for `base` within this generator's lifetime.
    pub fn fresh(&mut self, base: &str) -> Term {
        let counter = self.counters.entry(base.to_string()).or_insert(0);
        *counter += 1;
        Term::Variable(format!("{base}{counter}"))
    }
}
