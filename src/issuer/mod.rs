use std::{fmt, sync::Arc};

use anyhow::{bail, Result};
use tracing::{debug, instrument, warn};

use crate::{
    config::{Config, SupportedAlgorithms},
    core::{
        error::IssuanceError,
        metadata::IssuerMetadata,
        request::{CredentialRequest, CredentialResponse},
    },
};

use credential_issuer::{CredentialIssuer, IssueRequest};
use proof_verifier::ProofVerifier;
use state::{resolve_grant_context, OfferStateStore};

pub mod credential_issuer;
pub mod proof;
pub mod proof_verifier;
pub mod state;

/// Progress of a single credential request through the issuer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    GrantsResolved,
    ProofValidated,
    FormatMatched,
    Issued,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Stage::Start => "start",
            Stage::GrantsResolved => "grants_resolved",
            Stage::ProofValidated => "proof_validated",
            Stage::FormatMatched => "format_matched",
            Stage::Issued => "issued",
        };
        f.write_str(stage)
    }
}

/// An OpenID4VCI credential issuer.
///
/// Holds no per-request state, so one instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Issuer {
    metadata: Arc<IssuerMetadata>,
    algorithms: SupportedAlgorithms,
    state_store: Arc<dyn OfferStateStore + Send + Sync>,
    proof_verifier: Option<Arc<dyn ProofVerifier + Send + Sync>>,
    credential_issuer: Option<Arc<dyn CredentialIssuer + Send + Sync>>,
}

impl Issuer {
    /// Build a new issuer.
    pub fn builder() -> IssuerBuilder {
        IssuerBuilder::default()
    }

    pub fn metadata(&self) -> &IssuerMetadata {
        &self.metadata
    }

    /// Validate a credential request made under `issuer_state` and issue the
    /// credential.
    ///
    /// `proof_verifier` and `credential_issuer` take precedence over the ones
    /// configured on the issuer.
    ///
    /// ## Errors
    /// The first failed check, see [IssuanceError::code].
    #[instrument(
        level = "debug",
        skip(self, request, issuer_state, proof_verifier, credential_issuer),
        fields(format = %request.format)
    )]
    pub async fn issue_credential_from_issue_request(
        &self,
        request: CredentialRequest,
        issuer_state: &str,
        proof_verifier: Option<&(dyn ProofVerifier + Send + Sync)>,
        credential_issuer: Option<&(dyn CredentialIssuer + Send + Sync)>,
    ) -> Result<CredentialResponse, IssuanceError> {
        let mut stage = Stage::Start;
        let result = self
            .run(
                &mut stage,
                request,
                issuer_state,
                proof_verifier,
                credential_issuer,
            )
            .await;

        if let Err(e) = &result {
            warn!("credential request rejected after stage {stage}: {}", e.code());
        }
        result
    }

    async fn run(
        &self,
        stage: &mut Stage,
        request: CredentialRequest,
        issuer_state: &str,
        proof_verifier: Option<&(dyn ProofVerifier + Send + Sync)>,
        credential_issuer: Option<&(dyn CredentialIssuer + Send + Sync)>,
    ) -> Result<CredentialResponse, IssuanceError> {
        let context = resolve_grant_context(self.state_store.as_ref(), issuer_state).await?;
        advance(stage, Stage::GrantsResolved);

        let proof_verifier = proof_verifier.or(self.proof_verifier.as_deref());
        proof::validate_proof(
            &request,
            &context,
            &self.metadata.credential_issuer,
            &self.algorithms,
            proof_verifier,
        )
        .await?;
        advance(stage, Stage::ProofValidated);

        let supported = self.metadata.supported_formats();
        if !request.format.matches_any(supported.as_slice()) {
            return Err(IssuanceError::UnsupportedFormat(request.format.to_string()));
        }
        advance(stage, Stage::FormatMatched);

        let Some(credential_issuer) = credential_issuer.or(self.credential_issuer.as_deref())
        else {
            return Err(IssuanceError::IssuerNotConfigured);
        };

        let format = request.format.clone();
        let credential = credential_issuer
            .issue(IssueRequest {
                credential_request: Some(request),
                credential: None,
            })
            .await
            .map_err(IssuanceError::Issuance)?;
        advance(stage, Stage::Issued);

        Ok(CredentialResponse { credential, format })
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    debug!("{stage} -> {next}");
    *stage = next;
}

/// Builder struct for [Issuer].
#[derive(Debug, Clone, Default)]
pub struct IssuerBuilder {
    metadata: Option<IssuerMetadata>,
    algorithms: SupportedAlgorithms,
    state_store: Option<Arc<dyn OfferStateStore + Send + Sync>>,
    proof_verifier: Option<Arc<dyn ProofVerifier + Send + Sync>>,
    credential_issuer: Option<Arc<dyn CredentialIssuer + Send + Sync>>,
}

impl IssuerBuilder {
    /// Build the issuer.
    pub fn build(self) -> Result<Issuer> {
        let Self {
            metadata,
            algorithms,
            state_store,
            proof_verifier,
            credential_issuer,
        } = self;

        let Some(metadata) = metadata else {
            bail!("issuer metadata is required, see `with_metadata`")
        };

        let Some(state_store) = state_store else {
            bail!("offer state store is required, see `with_state_store`")
        };

        Ok(Issuer {
            metadata: Arc::new(metadata),
            algorithms,
            state_store,
            proof_verifier,
            credential_issuer,
        })
    }

    /// Take the metadata and supported algorithms from a [Config].
    pub fn with_config(self, config: Config) -> Self {
        self.with_metadata(config.issuer_metadata)
            .with_algorithms(config.proof_signing_alg_values_supported)
    }

    /// Set the [IssuerMetadata] the [Issuer] advertises.
    pub fn with_metadata(mut self, metadata: IssuerMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Set the algorithms accepted for proofs. Defaults to
    /// [SupportedAlgorithms::default].
    pub fn with_algorithms(mut self, algorithms: SupportedAlgorithms) -> Self {
        self.algorithms = algorithms;
        self
    }

    /// Set the [OfferStateStore] that credential offers are looked up in.
    pub fn with_state_store(
        mut self,
        state_store: Arc<dyn OfferStateStore + Send + Sync>,
    ) -> Self {
        self.state_store = Some(state_store);
        self
    }

    /// Set the default [ProofVerifier].
    pub fn with_proof_verifier(
        mut self,
        proof_verifier: Arc<dyn ProofVerifier + Send + Sync>,
    ) -> Self {
        self.proof_verifier = Some(proof_verifier);
        self
    }

    /// Set the default [CredentialIssuer].
    pub fn with_credential_issuer(
        mut self,
        credential_issuer: Arc<dyn CredentialIssuer + Send + Sync>,
    ) -> Self {
        self.credential_issuer = Some(credential_issuer);
        self
    }
}

#[cfg(test)]
mod test {
    use crate::{core::metadata::CredentialSupported, issuer::state::MemoryStore};

    use super::*;

    #[test]
    fn builder_requires_metadata_and_store() {
        assert!(Issuer::builder()
            .with_state_store(Arc::new(MemoryStore::default()))
            .build()
            .is_err());
        assert!(Issuer::builder()
            .with_metadata(IssuerMetadata::new("https://issuer.example.com"))
            .build()
            .is_err());
    }

    #[test]
    fn builder_from_config() {
        let config: Config = serde_json::from_value(serde_json::json!({
            "issuer_metadata": {
                "credential_issuer": "https://issuer.example.com",
                "credentials_supported": [{ "format": "jwt_vc" }]
            },
            "proof_signing_alg_values_supported": ["ES256"]
        }))
        .unwrap();

        let issuer = Issuer::builder()
            .with_config(config)
            .with_state_store(Arc::new(MemoryStore::default()))
            .build()
            .unwrap();

        assert_eq!(
            issuer.metadata().credentials_supported,
            vec![CredentialSupported::new("jwt_vc")]
        );
        assert!(issuer.algorithms.supports("ES256"));
        assert!(!issuer.algorithms.supports("EdDSA"));
    }

    #[test]
    fn stage_names() {
        assert_eq!(Stage::Start.to_string(), "start");
        assert_eq!(Stage::ProofValidated.to_string(), "proof_validated");
    }
}
