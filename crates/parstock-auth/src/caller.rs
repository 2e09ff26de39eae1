//! Caller identity resolution.
//!
//! Maps verified claims onto the three kinds of callers parstock knows about.
//! A claim set that does not carry a recognised role and a UUID subject is a
//! guest; guests are never rejected here, the handlers decide what a guest
//! may do.

use crate::claims::{JwtClaims, Role};
use parstock_core::{CleanerId, OwnerId, OwnerScoped, ParstockError, Result};

/// The resolved identity of an API caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    /// A property manager account.
    Owner(OwnerId),
    /// A cleaner account. Whether the cleaner is active is checked against
    /// the cleaner record, not the token.
    Cleaner(CleanerId),
    /// No usable identity.
    Guest,
}

impl Caller {
    /// Resolve a caller from verified claims.
    #[must_use]
    pub fn from_claims(claims: &JwtClaims) -> Self {
        let Some(subject) = claims.subject_uuid() else {
            return Caller::Guest;
        };
        match claims.role() {
            Some(Role::Owner) => Caller::Owner(OwnerId::from_uuid(subject)),
            Some(Role::Cleaner) => Caller::Cleaner(CleanerId::from_uuid(subject)),
            None => Caller::Guest,
        }
    }

    /// Returns true for guests.
    #[must_use]
    pub fn is_guest(&self) -> bool {
        matches!(self, Caller::Guest)
    }

    /// Require an authenticated owner.
    pub fn require_owner(&self) -> Result<OwnerId> {
        match self {
            Caller::Owner(owner_id) => Ok(*owner_id),
            Caller::Cleaner(_) => Err(ParstockError::Unauthorized {
                message: Some("Owner account required".to_string()),
            }),
            Caller::Guest => Err(ParstockError::Unauthorized { message: None }),
        }
    }

    /// Require an owner caller that owns `record`.
    pub fn ensure_owns<T: OwnerScoped>(&self, record: &T) -> Result<OwnerId> {
        let owner_id = self.require_owner()?;
        if !record.is_owned_by(owner_id) {
            return Err(ParstockError::OwnerMismatch {
                expected: record.owner_id(),
                actual: owner_id,
            });
        }
        Ok(owner_id)
    }

    /// Require any authenticated caller.
    pub fn require_authenticated(&self) -> Result<()> {
        if self.is_guest() {
            return Err(ParstockError::Unauthorized { message: None });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_owner_claims_resolve_to_owner() {
        let id = Uuid::new_v4();
        let claims = JwtClaims::builder()
            .subject(id.to_string())
            .role(Role::Owner)
            .build();
        assert_eq!(
            Caller::from_claims(&claims),
            Caller::Owner(OwnerId::from_uuid(id))
        );
    }

    #[test]
    fn test_cleaner_claims_resolve_to_cleaner() {
        let id = Uuid::new_v4();
        let claims = JwtClaims::builder()
            .subject(id.to_string())
            .role(Role::Cleaner)
            .build();
        assert_eq!(
            Caller::from_claims(&claims),
            Caller::Cleaner(CleanerId::from_uuid(id))
        );
    }

    #[test]
    fn test_unknown_role_or_subject_is_guest() {
        let claims = JwtClaims::builder()
            .subject(Uuid::new_v4().to_string())
            .raw_role("admin")
            .build();
        assert_eq!(Caller::from_claims(&claims), Caller::Guest);

        let claims = JwtClaims::builder()
            .subject("owner-1")
            .role(Role::Owner)
            .build();
        assert_eq!(Caller::from_claims(&claims), Caller::Guest);
    }

    #[test]
    fn test_require_owner() {
        let owner = OwnerId::new();
        assert_eq!(Caller::Owner(owner).require_owner().unwrap(), owner);
        assert!(matches!(
            Caller::Cleaner(CleanerId::new()).require_owner(),
            Err(ParstockError::Unauthorized { message: Some(_) })
        ));
        assert!(matches!(
            Caller::Guest.require_owner(),
            Err(ParstockError::Unauthorized { message: None })
        ));
    }

    struct Record(OwnerId);

    impl OwnerScoped for Record {
        fn owner_id(&self) -> OwnerId {
            self.0
        }
    }

    #[test]
    fn test_ensure_owns() {
        let owner = OwnerId::new();
        let record = Record(owner);
        assert_eq!(Caller::Owner(owner).ensure_owns(&record).unwrap(), owner);

        let stranger = OwnerId::new();
        assert!(matches!(
            Caller::Owner(stranger).ensure_owns(&record),
            Err(ParstockError::OwnerMismatch { expected, actual })
                if expected == owner && actual == stranger
        ));
        assert!(Caller::Guest.ensure_owns(&record).is_err());
    }

    #[test]
    fn test_require_authenticated() {
        assert!(Caller::Owner(OwnerId::new()).require_authenticated().is_ok());
        assert!(Caller::Cleaner(CleanerId::new())
            .require_authenticated()
            .is_ok());
        assert!(Caller::Guest.require_authenticated().is_err());
    }
}
