use core::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::NonEmptyVec;

pub const FORMAT_JWT: &str = "jwt";
pub const FORMAT_JWT_VC: &str = "jwt_vc";
pub const FORMAT_JWT_VC_JSON: &str = "jwt_vc_json";
pub const FORMAT_JWT_VC_JSON_LD: &str = "jwt_vc_json-ld";
pub const FORMAT_LDP_VC: &str = "ldp_vc";
pub const FORMAT_MSO_MDOC: &str = "mso_mdoc";

/// Formats whose credential requests carry a JWT proof of possession that
/// must be validated before issuance.
const PROOF_BOUND_FORMATS: [&str; 2] = [FORMAT_JWT, FORMAT_JWT_VC];

/// The `format` member of a credential request.
///
/// Wallets may send a single format identifier or a list of them. Identifiers
/// are kept as sent: no case folding or other normalization is applied.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CredentialFormat {
    One(String),
    Many(NonEmptyVec<String>),
}

impl CredentialFormat {
    /// Iterate over the requested format identifiers, in request order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let formats: &[String] = match self {
            CredentialFormat::One(format) => std::slice::from_ref(format),
            CredentialFormat::Many(formats) => formats,
        };
        formats.iter().map(String::as_str)
    }

    /// Returns `true` if at least one requested format is equal to at least one
    /// of the `supported` formats.
    pub fn matches_any<S: AsRef<str>>(&self, supported: &[S]) -> bool {
        self.iter()
            .any(|requested| supported.iter().any(|s| s.as_ref() == requested))
    }

    /// Returns `true` if the request must carry a validated JWT proof.
    ///
    /// Only a single `jwt` or `jwt_vc` format triggers validation. A list of
    /// formats never does, even when it contains one of those values.
    pub fn requires_jwt_proof(&self) -> bool {
        match self {
            CredentialFormat::One(format) => PROOF_BOUND_FORMATS.contains(&format.as_str()),
            CredentialFormat::Many(_) => false,
        }
    }
}

impl From<&str> for CredentialFormat {
    fn from(s: &str) -> Self {
        CredentialFormat::One(s.to_owned())
    }
}

impl From<String> for CredentialFormat {
    fn from(s: String) -> Self {
        CredentialFormat::One(s)
    }
}

impl From<NonEmptyVec<String>> for CredentialFormat {
    fn from(formats: NonEmptyVec<String>) -> Self {
        CredentialFormat::Many(formats)
    }
}

impl fmt::Display for CredentialFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialFormat::One(format) => f.write_str(format),
            CredentialFormat::Many(formats) => write!(f, "[{}]", formats.join(", ")),
        }
    }
}
