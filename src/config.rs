use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::core::metadata::IssuerMetadata;

/// Static configuration of an [Issuer](crate::issuer::Issuer).
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub issuer_metadata: IssuerMetadata,
    #[serde(default)]
    pub proof_signing_alg_values_supported: SupportedAlgorithms,
}

/// JWS algorithms accepted in the `alg` header of a proof.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SupportedAlgorithms(Vec<String>);

impl SupportedAlgorithms {
    pub fn new<I, S>(algs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(algs.into_iter().map(Into::into).collect())
    }

    pub fn supports(&self, alg: &str) -> bool {
        self.0.iter().any(|a| a == alg)
    }
}

impl Default for SupportedAlgorithms {
    fn default() -> Self {
        Self::new(["ES256", "ES256K", "EdDSA"])
    }
}

impl Deref for SupportedAlgorithms {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn algorithms_default() {
        let config: Config = serde_json::from_value(json!({
            "issuer_metadata": {
                "credential_issuer": "https://issuer.example.com",
                "credentials_supported": [{ "format": "jwt_vc" }]
            }
        }))
        .unwrap();

        let algs = &config.proof_signing_alg_values_supported;
        assert!(algs.supports("ES256"));
        assert!(algs.supports("EdDSA"));
        assert!(!algs.supports("none"));
        assert!(!algs.supports("es256"));
    }

    #[test]
    fn algorithms_override() {
        let config: Config = serde_json::from_value(json!({
            "issuer_metadata": { "credential_issuer": "https://issuer.example.com" },
            "proof_signing_alg_values_supported": ["PS256"]
        }))
        .unwrap();

        assert_eq!(config.proof_signing_alg_values_supported.len(), 1);
        assert!(!config.proof_signing_alg_values_supported.supports("ES256"));
    }
}
