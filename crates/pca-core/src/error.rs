use std::fmt;

/// Failures raised by [`crate::services::policy_wf::check_policy`] (spec §4.2, §7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WellFormednessError {
    /// Two declarations in the initial policy share a name.
    DuplicateVariable(String),
    /// A variable occurs under an `Atom` or as a `Says` agent without an
    /// enclosing `Forall` binding it.
    UnboundVariable(String),
    /// A `Forall` binds an identifier already bound by an enclosing `Forall`.
    ShadowedVariable(String),
}

impl fmt::Display for WellFormednessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WellFormednessError::DuplicateVariable(name) => {
                write!(f, "duplicate variable: '{}' is declared more than once", name)
            }
            WellFormednessError::UnboundVariable(name) => {
                write!(f, "unbound variable: '{}' is not bound by an enclosing quantifier", name)
            }
            WellFormednessError::ShadowedVariable(name) => {
                write!(f, "shadowed variable: '{}' is already bound by an enclosing quantifier", name)
            }
        }
    }
}

impl std::error::Error for WellFormednessError {}

/// Failures raised by the bidirectional checker (spec §4.3, §7). Each
/// variant names exactly the rule whose premise failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    UndefinedProofVariable(String),
    ApplicationNotImplication,
    InstanceNotUniversal,
    LetWrapNotSays,
    WrapNotSays,
    AgentMismatch,
    LetWithoutAffirmation,
    TypeMismatch,
    CannotSynthesize,
}

impl fmt::Display for VerificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationError::UndefinedProofVariable(name) => {
                write!(f, "undefined proof variable: '{}'", name)
            }
            VerificationError::ApplicationNotImplication => {
                write!(f, "application's first term must synthesize to implication")
            }
            VerificationError::InstanceNotUniversal => {
                write!(f, "instance's term must synthesize to universal")
            }
            VerificationError::LetWrapNotSays => {
                write!(f, "let wrap's first term must synthesize to says")
            }
            VerificationError::WrapNotSays => write!(f, "wrap must check against says type"),
            VerificationError::AgentMismatch => write!(f, "agent mismatch"),
            VerificationError::LetWithoutAffirmation => write!(f, "let without affirmations"),
            VerificationError::TypeMismatch => write!(f, "type mismatch"),
            VerificationError::CannotSynthesize => {
                write!(f, "cannot synthesize type for this proof form")
            }
        }
    }
}

impl std::error::Error for VerificationError {}

/// An invariant the core itself is supposed to maintain was broken —
/// programmer error, not user error (spec §7, §9).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalError {
    AffirmsInUserInput(String),
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternalError::AffirmsInUserInput(where_) => {
                write!(f, "internal error: Affirms formula reached user-facing position ({})", where_)
            }
        }
    }
}

impl std::error::Error for InternalError {}

/// The crate's single error boundary. Distinguishes the two failure kinds
/// spec §7 names, plus the internal-error kind spec §9 calls for, so a
/// caller (the CLI) can map each to the exit code spec §6 prescribes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PcaError {
    WellFormedness(WellFormednessError),
    Verification(VerificationError),
    Internal(InternalError),
}

impl PcaError {
    /// Exit code per spec §6: success is 0 (not represented here),
    /// verification failure is 2, everything else (including
    /// well-formedness and internal errors) is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            PcaError::Verification(_) => 2,
            PcaError::WellFormedness(_) | PcaError::Internal(_) => 1,
        }
    }
}

impl fmt::Display for PcaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PcaError::WellFormedness(e) => write!(f, "{}", e),
            PcaError::Verification(e) => write!(f, "{}", e),
            PcaError::Internal(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PcaError {}

impl From<WellFormednessError> for PcaError {
    fn from(e: WellFormednessError) -> Self {
        PcaError::WellFormedness(e)
    }
}

impl From<VerificationError> for PcaError {
    fn from(e: VerificationError) -> Self {
        PcaError::Verification(e)
    }
}

impl From<InternalError> for PcaError {
    fn from(e: InternalError) -> Self {
        PcaError::Internal(e)
    }
}
