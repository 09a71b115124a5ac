use serde_json::Value as Json;

/// Whose responsibility a rejected credential request is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed offer state, unreachable store or missing capabilities. The
    /// issuer operator must fix these.
    Configuration,
    /// The wallet sent a request or proof that does not satisfy the protocol.
    Request,
}

/// Reasons a credential request is rejected.
///
/// Every variant maps to exactly one stable code, see [IssuanceError::code].
#[derive(Debug, thiserror::Error)]
pub enum IssuanceError {
    /// No offer state for the issuer state, or its grants are malformed.
    #[error("no usable grant context for issuer state")]
    MissingGrantContext,

    /// No proof verification capability was passed or configured.
    #[error("no proof verifier is available")]
    VerifierUnavailable,

    /// The verification capability rejected the proof.
    #[error("proof could not be verified: {0}")]
    ProofVerification(#[source] anyhow::Error),

    #[error("proof 'typ' must be \"{expected}\", found {found:?}")]
    TypMismatch {
        expected: &'static str,
        found: Option<String>,
    },

    #[error("proof 'alg' '{0}' is not supported")]
    AlgNotSupported(String),

    /// Zero or several of `kid`, `jwk` and `x5c` were present.
    #[error("proof header must contain exactly one of 'kid', 'jwk' or 'x5c', found {0}")]
    AmbiguousKeyMaterial(usize),

    #[error("proof 'iss' claim is required for the authorization code flow")]
    MissingIssuerClaim,

    #[error("proof 'iss' claim is not allowed for the pre-authorized code flow")]
    UnexpectedIssuerClaim,

    #[error("proof 'iss' claim '{0}' does not match the client id")]
    IssuerNotClientId(String),

    #[error("proof 'aud' claim {found:?} does not match credential issuer '{expected}'")]
    AudienceMismatch {
        expected: String,
        found: Option<Json>,
    },

    #[error("proof 'iat' claim is missing")]
    MissingIssuedAt,

    #[error("proof 'nonce' claim is missing")]
    MissingNonce,

    #[error("credential format {0} is not supported by this issuer")]
    UnsupportedFormat(String),

    /// No credential issuance capability was passed or configured.
    #[error("no credential issuer callback is configured")]
    IssuerNotConfigured,

    #[error("offer state store failed: {0}")]
    StateStore(#[source] anyhow::Error),

    #[error("credential issuance failed: {0}")]
    Issuance(#[source] anyhow::Error),
}

impl IssuanceError {
    /// The fixed error code identifying which check failed.
    pub fn code(&self) -> &'static str {
        match self {
            IssuanceError::MissingGrantContext => "missing_grant_context",
            IssuanceError::VerifierUnavailable => "verifier_unavailable",
            IssuanceError::ProofVerification(_) => "proof_verification_failed",
            IssuanceError::TypMismatch { .. } => "typ_mismatch",
            IssuanceError::AlgNotSupported(_) => "alg_not_supported",
            IssuanceError::AmbiguousKeyMaterial(_) => "ambiguous_key_material",
            IssuanceError::MissingIssuerClaim => "missing_issuer_claim",
            IssuanceError::UnexpectedIssuerClaim => "unexpected_issuer_claim",
            IssuanceError::IssuerNotClientId(_) => "issuer_not_client_id",
            IssuanceError::AudienceMismatch { .. } => "audience_mismatch",
            IssuanceError::MissingIssuedAt => "missing_issued_at",
            IssuanceError::MissingNonce => "missing_nonce",
            IssuanceError::UnsupportedFormat(_) => "unsupported_format",
            IssuanceError::IssuerNotConfigured => "issuer_not_configured",
            IssuanceError::StateStore(_) => "state_store_failed",
            IssuanceError::Issuance(_) => "issuance_failed",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            IssuanceError::MissingGrantContext
            | IssuanceError::VerifierUnavailable
            | IssuanceError::IssuerNotConfigured
            | IssuanceError::StateStore(_)
            | IssuanceError::Issuance(_) => ErrorCategory::Configuration,
            _ => ErrorCategory::Request,
        }
    }
}
