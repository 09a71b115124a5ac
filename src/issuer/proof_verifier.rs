use std::fmt::Debug;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use base64::prelude::*;
use ssi::{
    dids::{DIDKey, DIDResolver, VerificationMethodDIDResolver},
    jwk::JWKResolver,
    verification_methods::{
        AnyJwkMethod, GenericVerificationMethod, InvalidVerificationMethod,
        MaybeJwkVerificationMethod, VerificationMethodSet,
    },
    JWK,
};
use tracing::debug;

use crate::core::proof::{Jwt, ProofClaims, ProofHeader};

/// Checks the signature of a proof JWT and decodes it.
///
/// The issuer trusts the decoded header and claims returned here, so an
/// implementation must only return `Ok` for a correctly signed proof.
#[async_trait]
pub trait ProofVerifier: Debug {
    async fn verify(&self, jwt: &str) -> Result<Jwt>;
}

/// Verifies proofs against the public key carried in their `jwk` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwkProofVerifier;

#[async_trait]
impl ProofVerifier for JwkProofVerifier {
    async fn verify(&self, jwt: &str) -> Result<Jwt> {
        let header = decode_header(jwt)?;

        let Some(jwk) = &header.jwk else {
            bail!("'jwk' was missing from jwt headers")
        };
        let jwk: JWK =
            serde_json::from_value(jwk.clone()).context("'jwk' header is not a valid JWK")?;

        let payload: ProofClaims = ssi::claims::jwt::decode_verify(jwt, &jwk)
            .context("proof signature could not be verified")?;

        Ok(Jwt { header, payload })
    }
}

/// Verifies proofs whose `kid` header is a `did:key` verification method.
#[derive(Debug, Clone, Copy, Default)]
pub struct DidKeyProofVerifier;

#[async_trait]
impl ProofVerifier for DidKeyProofVerifier {
    async fn verify(&self, jwt: &str) -> Result<Jwt> {
        let resolver: VerificationMethodDIDResolver<DIDKey, AnyJwkMethod> =
            VerificationMethodDIDResolver::new(DIDKey);

        verify_with_resolver(jwt, &resolver).await
    }
}

/// Verify a proof whose `kid` header is a DID URL, using the key the DID
/// document publishes for it.
pub async fn verify_with_resolver<M>(
    jwt: &str,
    resolver: &VerificationMethodDIDResolver<impl DIDResolver, M>,
) -> Result<Jwt>
where
    M: MaybeJwkVerificationMethod
        + VerificationMethodSet
        + TryFrom<GenericVerificationMethod, Error = InvalidVerificationMethod>,
{
    let header = decode_header(jwt)?;

    let Some(kid) = &header.kid else {
        bail!("'kid' was missing from jwt headers")
    };
    if !kid.starts_with("did:") || !kid.contains('#') {
        bail!("expected a DID verification method in 'kid' header, received '{kid}'")
    }

    let jwk = resolver
        .fetch_public_jwk(Some(kid))
        .await
        .context("unable to fetch JWK from 'kid' header")?;
    debug!("resolved proof key from '{kid}'");

    let payload: ProofClaims = ssi::claims::jwt::decode_verify(jwt, &jwk)
        .context("proof signature could not be verified")?;

    Ok(Jwt { header, payload })
}

/// Decode the JOSE header of a compact JWS without checking its signature.
pub fn decode_header(jwt: &str) -> Result<ProofHeader> {
    let (header_b64, _, _) = ssi::claims::jws::split_jws(jwt)?;

    let header_json_bytes = BASE64_URL_SAFE_NO_PAD
        .decode(header_b64)
        .context("jwt headers were not valid base64url")?;

    serde_json::from_slice(&header_json_bytes).context("jwt headers were not valid json")
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    fn encode(value: serde_json::Value) -> String {
        BASE64_URL_SAFE_NO_PAD.encode(serde_json::to_vec(&value).unwrap())
    }

    #[test]
    fn decode_proof_header() {
        let jwt = format!(
            "{}.{}.c2ln",
            encode(json!({
                "typ": "openid4vci-proof+jwt",
                "alg": "ES256",
                "kid": "did:example:ebfeb1f712ebc6f1c276e12ec21#keys-1"
            })),
            encode(json!({ "nonce": "tZignsnFbp" }))
        );

        let header = decode_header(&jwt).unwrap();
        assert_eq!(header.typ.as_deref(), Some("openid4vci-proof+jwt"));
        assert_eq!(header.alg, "ES256");
        assert_eq!(header.key_material_count(), 1);
    }

    #[test]
    fn reject_undecodable_header() {
        assert!(decode_header("not-a-jwt").is_err());
        assert!(decode_header("!!!.e30.c2ln").is_err());
        assert!(decode_header(&format!("{}.e30.c2ln", encode(json!({ "typ": "JWT" })))).is_err());
    }

    #[tokio::test]
    async fn jwk_verifier_requires_jwk_header() {
        let jwt = format!(
            "{}.{}.c2ln",
            encode(json!({ "typ": "openid4vci-proof+jwt", "alg": "ES256", "kid": "k1" })),
            encode(json!({}))
        );
        let err = JwkProofVerifier.verify(&jwt).await.unwrap_err();
        assert!(err.to_string().contains("'jwk'"));
    }

    #[tokio::test]
    async fn did_verifier_requires_did_kid() {
        let jwt = format!(
            "{}.{}.c2ln",
            encode(json!({ "typ": "openid4vci-proof+jwt", "alg": "ES256", "kid": "k1" })),
            encode(json!({}))
        );
        let err = DidKeyProofVerifier.verify(&jwt).await.unwrap_err();
        assert!(err.to_string().contains("DID verification method"));
    }
}
