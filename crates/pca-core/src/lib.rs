//! Proof checker for a Proof-Carrying Authorization (PCA) logic: given a
//! policy and a proof term together with a claimed formula, mechanically
//! decides whether the term derives the formula under the policy.
//!
//! [`models`] holds the closed syntax algebra (terms, formulas, proof
//! terms, policies) plus the parser and printer. [`services`] holds the
//! substitution/equality helpers, the policy well-formedness checker, and
//! the bidirectional proof checker. [`verify`] is the single entry point
//! a caller needs.

pub mod error;
pub mod models;
pub mod services;

pub use error::{InternalError, PcaError, VerificationError, WellFormednessError};
pub use models::{Declaration, Form, ParseError, Parser, Policy, Proof, Term};
pub use services::{check, check_policy, eq_form, eq_term, subst_form, synth, verify, FreshVarGen};
