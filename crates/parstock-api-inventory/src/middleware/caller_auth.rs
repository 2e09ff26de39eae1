//! Caller resolution middleware.
//!
//! Reads the Bearer token from the Authorization header, verifies it with the
//! configured [`JwtVerifier`] and inserts a [`Caller`] into the request
//! extensions. Missing or invalid tokens resolve to [`Caller::Guest`]; whether
//! a guest may proceed is decided by the operation, so session resolution
//! can answer `authenticated: false` instead of failing.

use std::sync::Arc;

use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use parstock_auth::{decode_token_with_config, AuthError, Caller, JwtClaims, ValidationConfig};

use crate::error::ApiInventoryError;

/// Public key and validation rules for bearer tokens.
#[derive(Clone)]
pub struct JwtVerifier {
    public_key_pem: Arc<[u8]>,
    config: ValidationConfig,
}

impl JwtVerifier {
    pub fn new(public_key_pem: impl AsRef<[u8]>, config: ValidationConfig) -> Self {
        Self {
            public_key_pem: Arc::from(public_key_pem.as_ref()),
            config,
        }
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<JwtClaims, AuthError> {
        decode_token_with_config(token, &self.public_key_pem, &self.config)
    }

    /// Resolve the caller behind an optional Authorization header value.
    pub fn resolve(&self, authorization: Option<&str>) -> Result<Caller, AuthError> {
        let Some(token) = authorization
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
        else {
            return Ok(Caller::Guest);
        };

        match self.verify(token) {
            Ok(claims) => Ok(Caller::from_claims(&claims)),
            Err(e) if e.is_configuration_error() => Err(e),
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    expired = e.is_expired(),
                    "Bearer token rejected, continuing as guest"
                );
                Ok(Caller::Guest)
            }
        }
    }
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Insert the resolved [`Caller`] into the request extensions.
pub async fn caller_auth_middleware(
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiInventoryError> {
    let verifier = request
        .extensions()
        .get::<JwtVerifier>()
        .cloned()
        .ok_or_else(|| {
            tracing::error!("JWT verifier not configured");
            ApiInventoryError::Internal("JWT verifier not configured".to_string())
        })?;

    let authorization = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let caller = verifier.resolve(authorization).map_err(|e| {
        tracing::error!(error = %e, "JWT verification misconfigured");
        ApiInventoryError::Internal(e.to_string())
    })?;

    request.extensions_mut().insert(caller);
    Ok(next.run(request).await)
}
