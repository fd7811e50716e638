use serde::{Deserialize, Serialize};

use super::term::Term;

/// A proof term of the PCA proof-term calculus (spec §3).
///
/// These six variants are exhaustive: every recursive function over
/// `Proof` (`synth`, `check`, the parser, the printer) must handle all
/// six, with an explicit "I cannot synthesize/print this" fallback where
/// the calculus itself doesn't define a case, rather than a silent
/// catch-all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Proof {
    /// Reference to a named policy assumption.
    Pvar(String),
    /// Implication elimination: `M1 M2`.
    App(Box<Proof>, Box<Proof>),
    /// Universal elimination: `M [t]`.
    Inst(Box<Proof>, Term),
    /// `says` introduction at agent `a`: `{M}_a`.
    Wrap(Box<Proof>, Term),
    /// `says` elimination: `let {v}_a = M in N`.
    LetWrap(String, Term, Box<Proof>, Box<Proof>),
    /// Cut: `let v = M in N`.
    Let(String, Box<Proof>, Box<Proof>),
}

impl Proof {
    pub fn pvar(name: impl Into<String>) -> Self {
        Proof::Pvar(name.into())
    }

    pub fn app(m1: Proof, m2: Proof) -> Self {
        Proof::App(Box::new(m1), Box::new(m2))
    }

    pub fn inst(m: Proof, t: Term) -> Self {
        Proof::Inst(Box::new(m), t)
    }

    pub fn wrap(m: Proof, a: Term) -> Self {
        Proof::Wrap(Box::new(m), a)
    }

    pub fn let_wrap(v: impl Into<String>, a: Term, m: Proof, n: Proof) -> Self {
        Proof::LetWrap(v.into(), a, Box::new(m), Box::new(n))
    }

    pub fn let_(v: impl Into<String>, m: Proof, n: Proof) -> Self {
        Proof::Let(v.into(), Box::new(m), Box::new(n))
    }

    /// Concrete surface syntax (spec §6).
    pub fn to_concrete_string(&self) -> String {
        match self {
            Proof::Pvar(name) => name.clone(),
            Proof::App(m1, m2) => {
                format!("({} {})", m1.to_concrete_string(), m2.to_concrete_string())
            }
            Proof::Inst(m, t) => format!("({} [{}])", m.to_concrete_string(), t.to_concrete_string()),
            Proof::Wrap(m, a) => format!("{{ {} }}_{}", m.to_concrete_string(), a.to_concrete_string()),
            Proof::LetWrap(v, a, m, n) => format!(
                "let {{{}}}_{} = {} in ({})",
                v,
                a.to_concrete_string(),
                m.to_concrete_string(),
                n.to_concrete_string()
            ),
            Proof::Let(v, m, n) => {
                format!("let {} = {} in ({})", v, m.to_concrete_string(), n.to_concrete_string())
            }
        }
    }
}
