use std::fmt::Debug;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value as Json;

use crate::core::request::CredentialRequest;

/// Input handed to a [CredentialIssuer].
#[derive(Debug, Clone, Default)]
pub struct IssueRequest {
    /// The validated credential request.
    pub credential_request: Option<CredentialRequest>,
    /// A credential prepared ahead of time, to be signed or wrapped.
    pub credential: Option<Json>,
}

/// Produces the credential artifact for a validated request.
///
/// The returned value is passed to the wallet untouched.
#[async_trait]
pub trait CredentialIssuer: Debug {
    async fn issue(&self, request: IssueRequest) -> Result<Json>;
}
