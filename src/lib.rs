//! This library provides the credential endpoint validation logic of an
//! [OpenID4VCI] credential issuer.
//!
//! [OpenID4VCI]: <https://openid.net/specs/openid-4-verifiable-credential-issuance-1_0.html>
//!
//! # Usage
//!
//! An [`Issuer`] is assembled from the issuer's metadata, a store of the
//! credential offers it has made, and optionally default proof verification
//! and credential issuance callbacks:
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use openid4vci_issuance::issuer::{
//!     proof_verifier::JwkProofVerifier, state::MemoryStore, Issuer,
//! };
//!
//! let issuer = Issuer::builder()
//!     .with_config(config)
//!     .with_state_store(Arc::new(MemoryStore::default()))
//!     .with_proof_verifier(Arc::new(JwkProofVerifier))
//!     .with_credential_issuer(Arc::new(my_credential_signer))
//!     .build()?;
//!
//! // `issuer_state` identifies the credential offer the wallet is redeeming.
//! let response = issuer
//!     .issue_credential_from_issue_request(credential_request, &issuer_state, None, None)
//!     .await?;
//! ```
//!
//! The behavior can be customized by implementing the [`OfferStateStore`],
//! [`ProofVerifier`] and [`CredentialIssuer`] traits.
//!
//! [`Issuer`]: crate::issuer::Issuer
//! [`OfferStateStore`]: crate::issuer::state::OfferStateStore
//! [`ProofVerifier`]: crate::issuer::proof_verifier::ProofVerifier
//! [`CredentialIssuer`]: crate::issuer::credential_issuer::CredentialIssuer
//!
//! # Credential Request Processing
//!
//! 1. *Grant resolution*: the offer made under the issuer state is looked up and its
//!    grants (authorization code, pre-authorized code, or both) are checked.
//! 2. *Proof validation*: for `jwt` and `jwt_vc` requests, the proof JWT is verified
//!    by a [`ProofVerifier`] and its header and claims are checked against the grant
//!    and the issuer identifier.
//! 3. *Format matching*: at least one requested format must be advertised in the
//!    issuer's `credentials_supported`.
//! 4. *Issuance*: the [`CredentialIssuer`] produces the credential, which is returned
//!    together with the requested format.
//!
//! Any failed check rejects the request with an [`IssuanceError`] carrying a stable
//! error code.
//!
//! [`IssuanceError`]: crate::core::error::IssuanceError

pub mod config;
pub mod core;
pub mod issuer;
pub mod utils;
