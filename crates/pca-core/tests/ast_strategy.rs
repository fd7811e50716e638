//! Property-based testing strategies for [`pca_core::Term`],
//! [`pca_core::Form`] and [`pca_core::Proof`], modeled on the sibling
//! reference repo in this retrieval pack that already builds arbitrary
//! term/formula strategies this way for its own AST.

use pca_core::{Form, Proof, Term};
use proptest::prelude::*;

pub fn arb_var_id() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z0-9]{0,2}".prop_map(|s| s)
}

pub fn arb_const_id() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,2}".prop_map(|s| s)
}

pub fn arb_predicate() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,2}".prop_map(|s| s)
}

pub fn arb_variable() -> impl Strategy<Value = Term> {
    arb_var_id().prop_map(Term::Variable)
}

pub fn arb_constant() -> impl Strategy<Value = Term> {
    arb_const_id().prop_map(Term::Constant)
}

pub fn arb_term() -> impl Strategy<Value = Term> {
    prop_oneof![arb_variable(), arb_constant()]
}

/// Arbitrary `Form` values, bounded by `max_depth`/`max_size` the way the
/// sibling strategy bounds its own recursive AST. `Affirms` is
/// deliberately excluded — it is an internal marker that never appears in
/// user-supplied formulas (spec §3, §9), so a strategy meant to generate
/// policy/claimed-formula input should never produce it.
pub fn arb_form(max_depth: u32, max_size: u32) -> impl Strategy<Value = Form> {
    let leaf = (arb_predicate(), prop::collection::vec(arb_term(), 0..3))
        .prop_map(|(predicate, terms)| Form::atom(predicate, terms));
    leaf.prop_recursive(max_depth, max_size, max_size, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(p, q)| Form::implies(p, q)),
            (arb_term(), inner.clone()).prop_map(|(a, p)| Form::says(a, p)),
            (arb_var_id(), inner).prop_map(|(x, p)| Form::forall(x, p)),
        ]
    })
}

/// Arbitrary `Proof` values over a fixed pool of assumption names, so
/// generated proofs at least reference plausible `Pvar`s.
pub fn arb_proof(names: Vec<String>, max_depth: u32, max_size: u32) -> impl Strategy<Value = Proof> {
    let leaf = prop::sample::select(names).prop_map(Proof::pvar);
    leaf.prop_recursive(max_depth, max_size, max_size, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(m1, m2)| Proof::app(m1, m2)),
            (inner.clone(), arb_term()).prop_map(|(m, t)| Proof::inst(m, t)),
            (inner.clone(), arb_term()).prop_map(|(m, a)| Proof::wrap(m, a)),
        ]
    })
}
