use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

/// Credential Issuer Metadata, as advertised by the issuer.
///
/// Only the members this library relies on are typed. Everything else is
/// preserved as-is so the metadata can be round-tripped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IssuerMetadata {
    /// The issuer identifier. Proofs must name it as their audience.
    pub credential_issuer: String,

    /// Supported credentials, in order of preference.
    #[serde(default)]
    pub credentials_supported: Vec<CredentialSupported>,

    #[serde(flatten)]
    pub other: Map<String, Json>,
}

/// A single entry of `credentials_supported`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CredentialSupported {
    pub format: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cryptographic_binding_methods_supported: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cryptographic_suites_supported: Option<Vec<String>>,

    #[serde(flatten)]
    pub other: Map<String, Json>,
}

impl IssuerMetadata {
    pub fn new(credential_issuer: impl Into<String>) -> Self {
        Self {
            credential_issuer: credential_issuer.into(),
            credentials_supported: Vec::new(),
            other: Map::new(),
        }
    }

    pub fn with_credential_supported(mut self, supported: CredentialSupported) -> Self {
        self.credentials_supported.push(supported);
        self
    }

    /// The format identifier of every supported credential, in advertised order.
    pub fn supported_formats(&self) -> Vec<&str> {
        self.credentials_supported
            .iter()
            .map(|c| c.format.as_str())
            .collect()
    }
}

impl CredentialSupported {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            id: None,
            cryptographic_binding_methods_supported: None,
            cryptographic_suites_supported: None,
            other: Map::new(),
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_issuer_metadata() {
        let metadata: IssuerMetadata = serde_json::from_value(json!({
            "credential_issuer": "https://issuer.example.com",
            "credential_endpoint": "https://issuer.example.com/credential",
            "credentials_supported": [
                {
                    "format": "jwt_vc_json",
                    "id": "UniversityDegree_JWT",
                    "types": ["VerifiableCredential", "UniversityDegreeCredential"],
                    "cryptographic_binding_methods_supported": ["did:key"],
                    "cryptographic_suites_supported": ["ES256K"]
                },
                {
                    "format": "ldp_vc",
                    "types": ["VerifiableCredential"]
                }
            ]
        }))
        .unwrap();

        assert_eq!(metadata.credential_issuer, "https://issuer.example.com");
        assert_eq!(metadata.supported_formats(), vec!["jwt_vc_json", "ldp_vc"]);
        assert!(metadata.other.contains_key("credential_endpoint"));
        assert!(metadata.credentials_supported[0].other.contains_key("types"));
    }

    #[test]
    fn build_issuer_metadata() {
        let metadata = IssuerMetadata::new("https://issuer.example.com")
            .with_credential_supported(CredentialSupported::new("jwt_vc"));
        assert_eq!(
            serde_json::to_value(&metadata).unwrap(),
            json!({
                "credential_issuer": "https://issuer.example.com",
                "credentials_supported": [{ "format": "jwt_vc" }]
            })
        );
    }
}
