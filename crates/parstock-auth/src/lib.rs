//! JWT verification and caller identity for parstock.
//!
//! parstock does not issue identities; an external identity provider signs
//! RS256 tokens and this crate verifies them and turns the claims into a
//! [`Caller`]: an owner, a cleaner, or a guest.
//!
//! # Example
//!
//! ```rust,ignore
//! use parstock_auth::{decode_token, Caller};
//!
//! let claims = decode_token(&token, public_key_pem)?;
//! match Caller::from_claims(&claims) {
//!     Caller::Owner(owner_id) => println!("owner {owner_id}"),
//!     Caller::Cleaner(cleaner_id) => println!("cleaner {cleaner_id}"),
//!     Caller::Guest => println!("guest"),
//! }
//! ```

mod caller;
mod claims;
mod error;
mod jwt;

pub use caller::Caller;
pub use claims::{JwtClaims, JwtClaimsBuilder, Role};
pub use error::AuthError;
pub use jwt::{decode_token, decode_token_with_config, encode_token, ValidationConfig};
