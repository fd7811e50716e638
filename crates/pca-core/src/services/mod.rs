pub mod checker;
pub mod policy_wf;
pub mod subst;

pub use checker::{check, synth, verify};
pub use policy_wf::check_policy;
pub use subst::{eq_form, eq_term, subst_form, FreshVarGen};
