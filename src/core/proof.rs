use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// The only `typ` accepted for a credential request proof.
pub const PROOF_JWT_TYP: &str = "openid4vci-proof+jwt";

/// A proof JWT whose signature has been checked by a
/// [ProofVerifier](crate::issuer::proof_verifier::ProofVerifier).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Jwt {
    pub header: ProofHeader,
    pub payload: ProofClaims,
}

/// JOSE header of a proof JWT.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProofHeader {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,

    pub alg: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwk: Option<Json>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub x5c: Option<Vec<String>>,
}

impl ProofHeader {
    /// How many of `kid`, `jwk` and `x5c` are set.
    pub fn key_material_count(&self) -> usize {
        [
            self.kid.is_some(),
            self.jwk.is_some(),
            self.x5c.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}

/// Claims of a proof JWT.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProofClaims {
    /// Client id of the wallet, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// A string or a list of strings; only a single string naming the
    /// credential issuer is accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<Json>,

    /// NumericDate, possibly fractional. Only its presence is checked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<Json>,

    /// `c_nonce` previously provided by the issuer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}
