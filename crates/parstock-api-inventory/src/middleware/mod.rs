//! Middleware for the inventory API.

pub mod caller_auth;

pub use caller_auth::{caller_auth_middleware, JwtVerifier};
