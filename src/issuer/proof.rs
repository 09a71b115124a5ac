use serde_json::Value as Json;
use tracing::debug;

use crate::{
    config::SupportedAlgorithms,
    core::{
        error::IssuanceError,
        proof::{ProofClaims, ProofHeader, PROOF_JWT_TYP},
        request::CredentialRequest,
    },
};

use super::{proof_verifier::ProofVerifier, state::GrantContext};

/// Validate the proof of possession attached to a credential request.
///
/// Only requests for a single `jwt` or `jwt_vc` credential are checked; any
/// other request passes through untouched.
pub async fn validate_proof(
    request: &CredentialRequest,
    context: &GrantContext,
    credential_issuer: &str,
    algorithms: &SupportedAlgorithms,
    verifier: Option<&(dyn ProofVerifier + Send + Sync)>,
) -> Result<(), IssuanceError> {
    if !request.format.requires_jwt_proof() {
        debug!("skipping proof validation for format {}", request.format);
        return Ok(());
    }

    let Some(verifier) = verifier else {
        return Err(IssuanceError::VerifierUnavailable);
    };

    let jwt = verifier
        .verify(&request.proof.jwt)
        .await
        .map_err(IssuanceError::ProofVerification)?;

    check_header(&jwt.header, algorithms)?;
    check_claims(&jwt.payload, context, credential_issuer)
}

/// Checks on the JOSE header of a verified proof.
pub fn check_header(
    header: &ProofHeader,
    algorithms: &SupportedAlgorithms,
) -> Result<(), IssuanceError> {
    if header.typ.as_deref() != Some(PROOF_JWT_TYP) {
        return Err(IssuanceError::TypMismatch {
            expected: PROOF_JWT_TYP,
            found: header.typ.clone(),
        });
    }

    if !algorithms.supports(&header.alg) {
        return Err(IssuanceError::AlgNotSupported(header.alg.clone()));
    }

    match header.key_material_count() {
        1 => Ok(()),
        n => Err(IssuanceError::AmbiguousKeyMaterial(n)),
    }
}

/// Checks on the claims of a verified proof, in order, stopping at the first
/// failure. Empty `iss` and `nonce` strings count as absent.
pub fn check_claims(
    claims: &ProofClaims,
    context: &GrantContext,
    credential_issuer: &str,
) -> Result<(), IssuanceError> {
    match non_empty(&claims.iss) {
        None if context.grant.has_authorization_code() => {
            return Err(IssuanceError::MissingIssuerClaim)
        }
        Some(_) if context.grant.has_pre_authorized_code() => {
            return Err(IssuanceError::UnexpectedIssuerClaim)
        }
        Some(iss) if context.client_id.as_deref() != Some(iss) => {
            return Err(IssuanceError::IssuerNotClientId(iss.to_owned()))
        }
        _ => {}
    }

    if credential_issuer.is_empty()
        || claims.aud.as_ref().and_then(Json::as_str) != Some(credential_issuer)
    {
        return Err(IssuanceError::AudienceMismatch {
            expected: credential_issuer.to_owned(),
            found: claims.aud.clone(),
        });
    }

    if claims.iat.is_none() {
        return Err(IssuanceError::MissingIssuedAt);
    }

    if non_empty(&claims.nonce).is_none() {
        return Err(IssuanceError::MissingNonce);
    }

    Ok(())
}

fn non_empty(claim: &Option<String>) -> Option<&str> {
    claim.as_deref().filter(|v| !v.is_empty())
}
