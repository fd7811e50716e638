use std::collections::HashSet;

use crate::error::{InternalError, PcaError, WellFormednessError};
use crate::models::{Form, Policy, Term};

/// Validates a policy before any proof is examined (spec §4.2). Checks,
/// in a single pass: unique declaration names, no free variables under an
/// atom or `says`, and no quantifier shadowing within any one
/// declaration's formula.
///
/// An `Affirms` formula reaching a policy declaration is an internal
/// error, not a well-formedness failure (spec §9) — it can only happen if
/// a caller builds a `Policy` value by hand rather than through the
/// parser.
pub fn check_policy(policy: &Policy) -> Result<(), PcaError> {
    let mut seen = HashSet::new();
    for decl in policy.iter() {
        if !seen.insert(decl.name.clone()) {
            return Err(WellFormednessError::DuplicateVariable(decl.name.clone()).into());
        }
        check_formula_wf(&decl.formula, &HashSet::new())?;
    }
    Ok(())
}

fn check_formula_wf(form: &Form, bound: &HashSet<String>) -> Result<(), PcaError> {
    match form {
        Form::Atom(_, terms) => {
            for term in terms {
                check_term_bound(term, bound)?;
            }
            Ok(())
        }
        Form::Says(agent, body) => {
            check_term_bound(agent, bound)?;
            check_formula_wf(body, bound)
        }
        Form::Implies(premise, conclusion) => {
            check_formula_wf(premise, bound)?;
            check_formula_wf(conclusion, bound)
        }
        Form::Forall(variable, body) => {
            if bound.contains(variable) {
                return Err(WellFormednessError::ShadowedVariable(variable.clone()).into());
            }
            let mut extended = bound.clone();
            extended.insert(variable.clone());
            check_formula_wf(body, &extended)
        }
        Form::Affirms(_, _) => Err(InternalError::AffirmsInUserInput(
            "Affirms appeared in a policy declaration".to_string(),
        )
        .into()),
    }
}

fn check_term_bound(term: &Term, bound: &HashSet<String>) -> Result<(), PcaError> {
    if let Term::Variable(id) = term {
        if !bound.contains(id) {
            return Err(WellFormednessError::UnboundVariable(id.clone()).into());
        }
    }
    Ok(())
}
