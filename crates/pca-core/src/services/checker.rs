use crate::error::{InternalError, PcaError, VerificationError};
use crate::models::{Declaration, Form, Policy, Proof};
use crate::services::policy_wf::check_policy;
use crate::services::subst::{eq_form, eq_term, subst_form};

/// Synthesis judgment `Γ ⊢ M ⇒ P` (spec §4.3). Only the four proof forms
/// with a synthesizable type dispatch here (`Pvar`, `App`, `Inst`); every
/// other proof form — including the three checking-only forms `Wrap`,
/// `LetWrap`, `Let` — falls through to `CannotSynthesize`.
pub fn synth(policy: &Policy, proof: &Proof) -> Result<Form, PcaError> {
    match proof {
        Proof::Pvar(name) => policy
            .lookup(name)
            .cloned()
            .ok_or_else(|| VerificationError::UndefinedProofVariable(name.clone()).into()),

        Proof::App(m1, m2) => match synth(policy, m1)? {
            Form::Implies(premise, conclusion) => {
                check(policy, m2, &premise)?;
                Ok(*conclusion)
            }
            _ => Err(VerificationError::ApplicationNotImplication.into()),
        },

        Proof::Inst(m, t) => match synth(policy, m)? {
            Form::Forall(variable, body) => Ok(subst_form(&variable, t, &body)),
            _ => Err(VerificationError::InstanceNotUniversal.into()),
        },

        Proof::Wrap(_, _) | Proof::LetWrap(_, _, _, _) | Proof::Let(_, _, _) => {
            Err(VerificationError::CannotSynthesize.into())
        }
    }
}

/// Checking judgment `Γ ⊢ M ⇐ P` (spec §4.3). The six rules below are
/// tried in the literal order the spec mandates — saysE, cut, aff, saysR,
/// the no-aff `LetWrap` guard, then the synthesis switch — and that order
/// is load-bearing (spec §9 "Rule-order sensitivity"): rules 1 and 3 both
/// match on `P = Affirms`, and rule 1 additionally requires `M = LetWrap`,
/// so a checker that tried rule 3 first would never reach rule 1's `says`
/// elimination.
pub fn check(policy: &Policy, proof: &Proof, goal: &Form) -> Result<(), PcaError> {
    // Rule 1 — saysE: `LetWrap` checked against an `Affirms` goal.
    if let (Proof::LetWrap(v, _agent, m0, n), Form::Affirms(_, _)) = (proof, goal) {
        return match synth(policy, m0)? {
            Form::Says(_synthesized_agent, body) => {
                // The affirming agent carried by `goal` is deliberately not
                // matched against `_synthesized_agent` here (spec §9, §4.3
                // note): agent identity is enforced later, by rule 6's
                // syntactic equality on the underlying `says` formula.
                let extended = policy.extended_with(Declaration::new(v.clone(), *body));
                check(&extended, n, goal)
            }
            _ => Err(VerificationError::LetWrapNotSays.into()),
        };
    }

    // Rule 2 — cut: `Let` binds the synthesized type of its head to `v`.
    if let Proof::Let(v, m0, n) = proof {
        let synthesized = synth(policy, m0)?;
        let extended = policy.extended_with(Declaration::new(v.clone(), synthesized));
        return check(&extended, n, goal);
    }

    // Rule 3 — aff: a pending affirmation may be discharged by proving the
    // underlying formula directly.
    if let Form::Affirms(_agent, body) = goal {
        return check(policy, proof, body);
    }

    // Rule 4 — saysR: `Wrap` introduces `says` by checking its content
    // against the focused affirmation.
    if let Proof::Wrap(m0, agent) = proof {
        return match goal {
            Form::Says(claimed_agent, body) => {
                if !eq_term(claimed_agent, agent) {
                    return Err(VerificationError::AgentMismatch.into());
                }
                check(policy, m0, &Form::affirms(agent.clone(), (**body).clone()))
            }
            _ => Err(VerificationError::WrapNotSays.into()),
        };
    }

    // Rule 5 — `LetWrap` reaching here means `goal` was not `Affirms`:
    // `LetWrap` is only legal while the checker is focused on an
    // affirmation goal.
    if matches!(proof, Proof::LetWrap(_, _, _, _)) {
        return Err(VerificationError::LetWithoutAffirmation.into());
    }

    // Rule 6 — switch: fall back to synthesis and compare by equality.
    let synthesized = synth(policy, proof)?;
    if eq_form(&synthesized, goal) {
        Ok(())
    } else {
        Err(VerificationError::TypeMismatch.into())
    }
}

/// Entry point (spec §4.3 "Entry point `verify`"): validates the policy,
/// rejects a claimed formula that smuggles in the internal `Affirms`
/// marker, then runs the checking judgment. Either step may fail; success
/// is a plain `Ok(())`.
pub fn verify(policy: &Policy, proof: &Proof, claimed: &Form) -> Result<(), PcaError> {
    check_policy(policy)?;
    if claimed.contains_affirms() {
        return Err(InternalError::AffirmsInUserInput(
            "claimed formula contains internal Affirms".to_string(),
        )
        .into());
    }
    check(policy, proof, claimed)
}
