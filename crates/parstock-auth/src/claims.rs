//! JWT claims structure with standard and parstock-specific claims.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account roles recognised by parstock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Property manager; owns properties, warehouse stock and cleaners.
    Owner,
    /// Cleaner; counts stock on behalf of the owner that manages them.
    Cleaner,
}

impl Role {
    /// Returns the claim value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Cleaner => "cleaner",
        }
    }

    /// Parses a claim value. Unknown values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "owner" => Some(Role::Owner),
            "cleaner" => Some(Role::Cleaner),
            _ => None,
        }
    }
}

/// JWT claims containing standard and custom claims.
///
/// # Standard Claims (RFC 7519)
///
/// - `sub`: Subject (owner account id or cleaner id, depending on `role`)
/// - `iss`, `aud`, `exp`, `iat`, `jti`
///
/// # Custom Claims
///
/// - `role`: `owner` or `cleaner`; anything else is treated as a guest
///
/// # Example
///
/// ```rust
/// use parstock_auth::{JwtClaims, Role};
///
/// let claims = JwtClaims::builder()
///     .subject("0b7c4a1e-6a44-4f6e-9d3c-2a6f1e9b8c01")
///     .issuer("identity")
///     .role(Role::Owner)
///     .expires_in_secs(3600)
///     .build();
///
/// assert_eq!(claims.role(), Some(Role::Owner));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JwtClaims {
    /// Subject - the account id.
    pub sub: String,

    /// Issuer - who created the token.
    pub iss: String,

    /// Audience - intended recipients.
    #[serde(default)]
    pub aud: Vec<String>,

    /// Expiration time as Unix timestamp.
    pub exp: i64,

    /// Issued at as Unix timestamp.
    pub iat: i64,

    /// JWT ID - unique identifier for this token.
    pub jti: String,

    /// Account role (raw claim value).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Display name of the account, when the identity provider includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl JwtClaims {
    /// Create a new builder for constructing JWT claims.
    #[must_use]
    pub fn builder() -> JwtClaimsBuilder {
        JwtClaimsBuilder::default()
    }

    /// Get the parsed role, if recognised.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::parse)
    }

    /// Get the subject as a UUID, if it is one.
    #[must_use]
    pub fn subject_uuid(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// Builder for constructing JWT claims.
#[derive(Debug, Default)]
pub struct JwtClaimsBuilder {
    sub: Option<String>,
    iss: Option<String>,
    aud: Vec<String>,
    exp: Option<i64>,
    iat: Option<i64>,
    jti: Option<String>,
    role: Option<String>,
    name: Option<String>,
}

impl JwtClaimsBuilder {
    /// Set the subject (account id).
    #[must_use]
    pub fn subject(mut self, sub: impl Into<String>) -> Self {
        self.sub = Some(sub.into());
        self
    }

    /// Set the issuer.
    #[must_use]
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.iss = Some(iss.into());
        self
    }

    /// Set the audience.
    #[must_use]
    pub fn audience(mut self, aud: Vec<impl Into<String>>) -> Self {
        self.aud = aud.into_iter().map(Into::into).collect();
        self
    }

    /// Set expiration time as Unix timestamp.
    #[must_use]
    pub fn expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set expiration time as seconds from now.
    #[must_use]
    pub fn expires_in_secs(mut self, secs: i64) -> Self {
        self.exp = Some(Utc::now().timestamp() + secs);
        self
    }

    /// Set expiration time using a Duration.
    #[must_use]
    pub fn expires_in(mut self, duration: Duration) -> Self {
        self.exp = Some((Utc::now() + duration).timestamp());
        self
    }

    /// Set the JWT ID.
    #[must_use]
    pub fn jwt_id(mut self, jti: impl Into<String>) -> Self {
        self.jti = Some(jti.into());
        self
    }

    /// Set a recognised role.
    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role.as_str().to_string());
        self
    }

    /// Set a raw role claim value, recognised or not.
    #[must_use]
    pub fn raw_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Build the claims. Missing times default to now / one hour from now.
    #[must_use]
    pub fn build(self) -> JwtClaims {
        let now = Utc::now().timestamp();
        JwtClaims {
            sub: self.sub.unwrap_or_default(),
            iss: self.iss.unwrap_or_default(),
            aud: self.aud,
            exp: self.exp.unwrap_or(now + 3600),
            iat: self.iat.unwrap_or(now),
            jti: self.jti.unwrap_or_else(|| Uuid::new_v4().to_string()),
            role: self.role,
            name: self.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_builder_basic() {
        let claims = JwtClaims::builder()
            .subject("user-123")
            .issuer("identity")
            .build();

        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.iss, "identity");
        assert!(!claims.jti.is_empty());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_claims_role_parsing() {
        let owner = JwtClaims::builder().role(Role::Owner).build();
        assert_eq!(owner.role(), Some(Role::Owner));

        let cleaner = JwtClaims::builder().role(Role::Cleaner).build();
        assert_eq!(cleaner.role(), Some(Role::Cleaner));

        let unknown = JwtClaims::builder().raw_role("superuser").build();
        assert_eq!(unknown.role(), None);

        let none = JwtClaims::builder().build();
        assert_eq!(none.role(), None);
    }

    #[test]
    fn test_claims_expiration() {
        let now = Utc::now().timestamp();
        let fixed = JwtClaims::builder().expiration(now - 10).build();
        assert_eq!(fixed.exp, now - 10);

        let valid = JwtClaims::builder().expires_in_secs(60).build();
        assert!(valid.exp > now);
    }

    #[test]
    fn test_subject_uuid() {
        let id = Uuid::new_v4();
        let claims = JwtClaims::builder().subject(id.to_string()).build();
        assert_eq!(claims.subject_uuid(), Some(id));

        let claims = JwtClaims::builder().subject("not-a-uuid").build();
        assert_eq!(claims.subject_uuid(), None);
    }

    #[test]
    fn test_claims_serialization_skips_missing_role() {
        let claims = JwtClaims::builder().subject("s").build();
        let json = serde_json::to_string(&claims).unwrap();
        assert!(!json.contains("\"role\""));

        let claims = JwtClaims::builder().subject("s").role(Role::Cleaner).build();
        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("\"role\":\"cleaner\""));
    }
}
