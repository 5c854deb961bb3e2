use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::models::Role;

type HmacSha256 = Hmac<Sha256>;

/// The only algorithm [`HmacTokenCodec`] signs with or accepts.
const ALGORITHM: &str = "HS256";

/// Payload carried inside a session token. Timestamps are seconds since the
/// Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    typ: String,
    alg: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token must have three dot-separated segments")]
    Malformed,
    #[error("invalid base64url encoding in token {0}")]
    InvalidBase64(&'static str),
    #[error("invalid token {0}: {1}")]
    InvalidJson(&'static str, String),
    #[error("unsupported token algorithm {0}")]
    UnsupportedAlgorithm(String),
    #[error("token signature does not match")]
    BadSignature,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Issues and checks session tokens. The auth gate only relies on this trait,
/// so the signing scheme can change without touching session handling.
pub trait TokenVerifier {
    fn issue(&self, claims: &Claims) -> Result<String, TokenError>;

    /// Check the token's integrity and return its claims. Expiry is not
    /// checked here; that needs a clock and belongs to the caller.
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}

/// `header.payload.signature` tokens, each segment base64url without padding,
/// signed with HMAC-SHA256 over `header.payload`.
pub struct HmacTokenCodec {
    secret: Vec<u8>,
}

impl HmacTokenCodec {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn mac(&self, signing_input: &str) -> Result<HmacSha256, TokenError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| TokenError::Signing(e.to_string()))?;
        mac.update(signing_input.as_bytes());
        Ok(mac)
    }
}

impl TokenVerifier for HmacTokenCodec {
    fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header {
            typ: "JWT".to_string(),
            alg: ALGORITHM.to_string(),
        };
        let header = serde_json::to_vec(&header).map_err(|e| TokenError::Signing(e.to_string()))?;
        let payload =
            serde_json::to_vec(claims).map_err(|e| TokenError::Signing(e.to_string()))?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload)
        );
        let signature = self.mac(&signing_input)?.finalize().into_bytes();
        Ok(format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(signature)))
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let parts: Vec<&str> = token.trim().split('.').collect();
        let [header, payload, signature] = parts.as_slice() else {
            return Err(TokenError::Malformed);
        };

        let header: Header = decode_segment(header, "header")?;
        if header.alg != ALGORITHM {
            return Err(TokenError::UnsupportedAlgorithm(header.alg));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::InvalidBase64("signature"))?;
        let signing_input = format!("{}.{}", parts[0], parts[1]);
        self.mac(&signing_input)?
            .verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        decode_segment(payload, "payload")
    }
}

fn decode_segment<T: for<'de> Deserialize<'de>>(
    segment: &str,
    name: &'static str,
) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::InvalidBase64(name))?;
    serde_json::from_slice(&bytes).map_err(|e| TokenError::InvalidJson(name, e.to_string()))
}
