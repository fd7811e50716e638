//! The six law-like properties from spec §8, as property tests rather
//! than mechanical round-trip grids.

mod ast_strategy;

use ast_strategy::{arb_form, arb_proof, arb_term, arb_var_id};
use pca_core::{eq_form, subst_form, Declaration, Form, Policy, Proof, Term};
use proptest::prelude::*;

fn form_free_vars(form: &Form, bound: &mut Vec<String>, out: &mut Vec<String>) {
    match form {
        Form::Atom(_, terms) => {
            for t in terms {
                if let Term::Variable(id) = t {
                    if !bound.contains(id) {
                        out.push(id.clone());
                    }
                }
            }
        }
        Form::Implies(p, q) => {
            form_free_vars(p, bound, out);
            form_free_vars(q, bound, out);
        }
        Form::Says(agent, body) => {
            if let Term::Variable(id) = agent {
                if !bound.contains(id) {
                    out.push(id.clone());
                }
            }
            form_free_vars(body, bound, out);
        }
        Form::Forall(x, body) => {
            bound.push(x.clone());
            form_free_vars(body, bound, out);
            bound.pop();
        }
        Form::Affirms(agent, body) => {
            if let Term::Variable(id) = agent {
                if !bound.contains(id) {
                    out.push(id.clone());
                }
            }
            form_free_vars(body, bound, out);
        }
    }
}

fn free_vars(form: &Form) -> Vec<String> {
    let mut out = Vec::new();
    form_free_vars(form, &mut Vec::new(), &mut out);
    out.sort();
    out.dedup();
    out
}

/// Universally closes `body` over its own free variables, producing a
/// formula guaranteed well-formed on its own (every free variable now has
/// an enclosing `Forall`). `free_vars` is deduplicated first, since
/// wrapping the same name in two nested `Forall`s would itself be a
/// shadowed-variable policy, not a well-formed one.
fn close_over_free_vars(body: Form) -> Form {
    let free = free_vars(&body);
    free.into_iter().fold(body, |acc, v| Form::forall(v, acc))
}

proptest! {
    /// Substitution identity: for all variables `x` not free in `P`,
    /// `subst_form(x, t, P) = P`.
    #[test]
    fn substitution_identity(p in arb_form(4, 16), t in arb_term()) {
        let fresh = "ZZZNotFree";
        prop_assume!(!free_vars(&p).iter().any(|v| v == fresh));
        let substituted = subst_form(fresh, &t, &p);
        prop_assert!(eq_form(&substituted, &p));
    }

    /// Substitution under binder: `subst_form(X, t, Forall(X, P)) = Forall(X, P)`.
    #[test]
    fn substitution_under_own_binder(x in arb_var_id(), p in arb_form(3, 12), t in arb_term()) {
        let bound_form = Form::forall(x.clone(), p);
        let substituted = subst_form(&x, &t, &bound_form);
        prop_assert!(eq_form(&substituted, &bound_form));
    }

    /// Equality reflexivity: for all well-formed `P`, `eq_form(P, P)` holds.
    #[test]
    fn equality_reflexivity(p in arb_form(4, 16)) {
        prop_assert!(eq_form(&p, &p));
    }

    /// Well-formedness idempotence: `check_policy(Γ)` succeeding implies a
    /// second, independent run on the same `Γ` also succeeds. The
    /// generated body is universally closed over its own free variables
    /// first, so it is well-formed by construction and the property
    /// isn't vacuous.
    #[test]
    fn well_formedness_idempotence(body in arb_form(3, 10)) {
        let policy = Policy::new(vec![Declaration::new("h", close_over_free_vars(body))]);
        let first = pca_core::check_policy(&policy);
        prop_assert!(first.is_ok());
        let second = pca_core::check_policy(&policy);
        prop_assert!(second.is_ok());
    }

    /// Policy extension monotonicity: if `verify(Γ, M, P)` succeeds and
    /// `Γ'` extends `Γ` by appending a declaration with a fresh name,
    /// then `verify(Γ', M, P)` still succeeds.
    #[test]
    fn policy_extension_monotonicity(extra_name in "[a-z][a-z0-9]{3,6}") {
        let policy = Policy::new(vec![
            Declaration::new("h1", Form::atom("p", vec![])),
            Declaration::new("h2", Form::implies(Form::atom("p", vec![]), Form::atom("q", vec![]))),
        ]);
        let proof = Proof::app(Proof::pvar("h2"), Proof::pvar("h1"));
        let goal = Form::atom("q", vec![]);
        prop_assert!(pca_core::verify(&policy, &proof, &goal).is_ok());

        prop_assume!(policy.lookup(&extra_name).is_none());
        let extended = policy.extended_with(Declaration::new(extra_name, Form::atom("r", vec![])));
        prop_assert!(pca_core::verify(&extended, &proof, &goal).is_ok());
    }

    /// Determinism: `verify` is a pure function of its inputs — repeated
    /// calls on the same policy/proof/goal yield the same verdict.
    #[test]
    fn verify_is_deterministic(names in prop::collection::vec("[a-z][a-z0-9]{0,2}", 1..4)) {
        let policy = Policy::new(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| Declaration::new(name.clone(), Form::atom(format!("p{i}"), vec![])))
                .collect(),
        );
        let proof_strategy = arb_proof(names.clone(), 3, 8);
        let mut runner = proptest::test_runner::TestRunner::default();
        let proof = proof_strategy.new_tree(&mut runner).unwrap().current();
        let goal = Form::atom("p0", vec![]);

        let first = pca_core::verify(&policy, &proof, &goal);
        let second = pca_core::verify(&policy, &proof, &goal);
        prop_assert_eq!(first, second);
    }
}
