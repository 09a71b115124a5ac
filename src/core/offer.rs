use std::fmt;

use serde::{Deserialize, Serialize};

/// The issuer-held record of a credential offer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialOfferState {
    /// The client the offer was made to, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub grants: Grant,
}

/// Grants under which a credential offer may be redeemed.
///
/// Both branches may be offered at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Grant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<AuthorizationCodeGrant>,

    #[serde(
        rename = "urn:ietf:params:oauth:grant-type:pre-authorized_code",
        skip_serializing_if = "Option::is_none"
    )]
    pub pre_authorized_code: Option<PreAuthorizedCodeGrant>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorizationCodeGrant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_state: Option<String>,
}

/// The pre-authorized code is a bearer secret, so `Debug` redacts it.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreAuthorizedCodeGrant {
    #[serde(
        rename = "pre-authorized_code",
        skip_serializing_if = "Option::is_none"
    )]
    pub pre_authorized_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_pin_required: Option<bool>,
}

impl fmt::Debug for PreAuthorizedCodeGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreAuthorizedCodeGrant")
            .field(
                "pre_authorized_code",
                &self.pre_authorized_code.as_ref().map(|_| "<redacted>"),
            )
            .field("user_pin_required", &self.user_pin_required)
            .finish()
    }
}

impl Grant {
    pub fn authorization_code(issuer_state: impl Into<String>) -> Self {
        Self {
            authorization_code: Some(AuthorizationCodeGrant {
                issuer_state: Some(issuer_state.into()),
            }),
            pre_authorized_code: None,
        }
    }

    pub fn pre_authorized_code(code: impl Into<String>) -> Self {
        Self {
            authorization_code: None,
            pre_authorized_code: Some(PreAuthorizedCodeGrant {
                pre_authorized_code: Some(code.into()),
                user_pin_required: None,
            }),
        }
    }

    /// Offer both flows at once.
    pub fn with_pre_authorized_code(mut self, code: impl Into<String>) -> Self {
        self.pre_authorized_code = Some(PreAuthorizedCodeGrant {
            pre_authorized_code: Some(code.into()),
            user_pin_required: None,
        });
        self
    }

    pub fn has_authorization_code(&self) -> bool {
        self.authorization_code.is_some()
    }

    pub fn has_pre_authorized_code(&self) -> bool {
        self.pre_authorized_code.is_some()
    }

    /// A grant is well formed when at least one branch is offered and every
    /// offered branch carries its identifying value.
    pub fn is_well_formed(&self) -> bool {
        let authorization_code = self
            .authorization_code
            .as_ref()
            .map(|g| populated(&g.issuer_state));
        let pre_authorized_code = self
            .pre_authorized_code
            .as_ref()
            .map(|g| populated(&g.pre_authorized_code));

        match (authorization_code, pre_authorized_code) {
            (None, None) => false,
            (a, p) => a.unwrap_or(true) && p.unwrap_or(true),
        }
    }
}

fn populated(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}
