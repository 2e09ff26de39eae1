//! RS256 token signing and verification.

use crate::claims::JwtClaims;
use crate::error::AuthError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Options applied when verifying a token.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Clock skew tolerance in seconds for `exp`.
    pub leeway: u64,
    /// Required issuer, if any.
    pub issuer: Option<String>,
    /// Accepted audiences, if any. Audience is not checked when unset.
    pub audience: Option<Vec<String>>,
    /// Whether `exp` is enforced.
    pub validate_exp: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            leeway: 60,
            issuer: None,
            audience: None,
            validate_exp: true,
        }
    }
}

impl ValidationConfig {
    #[must_use]
    pub fn with_leeway(leeway: u64) -> Self {
        Self {
            leeway,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.issuer = Some(iss.into());
        self
    }

    #[must_use]
    pub fn audience(mut self, aud: Vec<impl Into<String>>) -> Self {
        self.audience = Some(aud.into_iter().map(Into::into).collect());
        self
    }
}

/// Sign claims with an RSA private key (PEM).
///
/// parstock only verifies tokens in production; signing exists for tests and
/// local tooling.
pub fn encode_token(claims: &JwtClaims, private_key_pem: &[u8]) -> Result<String, AuthError> {
    let key = EncodingKey::from_rsa_pem(private_key_pem)
        .map_err(|e| AuthError::InvalidKey(format!("Invalid private key: {e}")))?;

    encode(&Header::new(Algorithm::RS256), claims, &key)
        .map_err(|e| AuthError::InvalidToken(format!("Encoding failed: {e}")))
}

/// Verify a token with the default [`ValidationConfig`].
pub fn decode_token(token: &str, public_key_pem: &[u8]) -> Result<JwtClaims, AuthError> {
    decode_token_with_config(token, public_key_pem, &ValidationConfig::default())
}

/// Verify a token and return its claims.
///
/// # Errors
///
/// - `AuthError::TokenExpired` if `exp` is past (beyond leeway)
/// - `AuthError::InvalidSignature` if the signature does not verify
/// - `AuthError::InvalidAlgorithm` for anything but RS256
/// - `AuthError::InvalidKey` if the public key cannot be parsed
/// - `AuthError::InvalidToken` for everything else
pub fn decode_token_with_config(
    token: &str,
    public_key_pem: &[u8],
    config: &ValidationConfig,
) -> Result<JwtClaims, AuthError> {
    let key = DecodingKey::from_rsa_pem(public_key_pem)
        .map_err(|e| AuthError::InvalidKey(format!("Invalid public key: {e}")))?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.algorithms = vec![Algorithm::RS256];
    validation.leeway = config.leeway;
    validation.validate_exp = config.validate_exp;

    if let Some(ref iss) = config.issuer {
        validation.set_issuer(&[iss]);
    }
    match config.audience {
        Some(ref aud) => validation.set_audience(aud),
        None => validation.validate_aud = false,
    }

    decode::<JwtClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(map_jwt_error)
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidAlgorithm => AuthError::InvalidAlgorithm,
        ErrorKind::InvalidToken => AuthError::InvalidToken("Malformed token".to_string()),
        ErrorKind::Base64(_) => AuthError::InvalidToken("Invalid base64 encoding".to_string()),
        ErrorKind::Json(_) => AuthError::InvalidToken("Invalid JSON in claims".to_string()),
        ErrorKind::MissingRequiredClaim(claim) => AuthError::MissingClaim(claim.to_string()),
        ErrorKind::InvalidIssuer => AuthError::InvalidToken("Unexpected issuer".to_string()),
        ErrorKind::InvalidAudience => AuthError::InvalidToken("Unexpected audience".to_string()),
        _ => AuthError::InvalidToken(format!("Token validation failed: {err}")),
    }
}
