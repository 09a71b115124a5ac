use std::{collections::BTreeMap, fmt::Debug, sync::Arc};

use anyhow::{bail, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::core::{
    error::IssuanceError,
    offer::{CredentialOfferState, Grant},
};

/// Storage interface for credential offer state, keyed by issuer state.
///
/// Implementations must be safe to call from concurrent requests.
#[async_trait]
pub trait OfferStateStore: Debug {
    /// Get the offer made under `issuer_state`, or `None` if there is none.
    async fn get(&self, issuer_state: &str) -> Result<Option<CredentialOfferState>>;
}

/// The client and grant that authorized a credential offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantContext {
    pub client_id: Option<String>,
    pub grant: Grant,
}

/// Look up the grant context of the offer made under `issuer_state`.
pub async fn resolve_grant_context(
    store: &(dyn OfferStateStore + Send + Sync),
    issuer_state: &str,
) -> Result<GrantContext, IssuanceError> {
    let Some(state) = store
        .get(issuer_state)
        .await
        .map_err(IssuanceError::StateStore)?
    else {
        debug!("no credential offer found for issuer state");
        return Err(IssuanceError::MissingGrantContext);
    };

    if !state.grants.is_well_formed() {
        debug!(
            authorization_code = state.grants.has_authorization_code(),
            pre_authorized_code = state.grants.has_pre_authorized_code(),
            "credential offer grants are malformed"
        );
        return Err(IssuanceError::MissingGrantContext);
    }

    Ok(GrantContext {
        client_id: state.client_id,
        grant: state.grants,
    })
}

/// A local in-memory store. Not for production use!
///
/// # Warning
/// This in-memory store should only be used for test purposes, it will not work for a distributed
/// deployment.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    store: Arc<Mutex<BTreeMap<String, CredentialOfferState>>>,
}

impl MemoryStore {
    /// Store a credential offer under `issuer_state`, replacing any previous one.
    pub async fn put(&self, issuer_state: impl Into<String>, state: CredentialOfferState) {
        self.store.lock().await.insert(issuer_state.into(), state);
    }

    /// Remove the credential offer stored under `issuer_state`.
    pub async fn remove(&self, issuer_state: &str) -> Result<CredentialOfferState> {
        if let Some(state) = self.store.lock().await.remove(issuer_state) {
            return Ok(state);
        }

        bail!("credential offer not found")
    }
}

#[async_trait]
impl OfferStateStore for MemoryStore {
    async fn get(&self, issuer_state: &str) -> Result<Option<CredentialOfferState>> {
        Ok(self.store.lock().await.get(issuer_state).cloned())
    }
}
