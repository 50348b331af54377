//! Identity handed to the core by the external authentication layer.
//!
//! OAuth, cookies and session handling live outside this crate. Whatever
//! performs them only has to produce an [`OwnerIdentity`]: an opaque user id
//! plus the email address used for quota exemption.

use super::{UserId, ValidationError};

/// The authenticated caller, as seen by the document core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerIdentity {
    /// Opaque id every document is scoped by.
    pub id: UserId,

    /// Email from the identity provider's claims.
    pub email: String,
}

impl OwnerIdentity {
    /// Builds an identity, rejecting a missing id or email.
    ///
    /// Either being absent is an authentication-configuration fault, not a
    /// document error.
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Result<Self, ValidationError> {
        let id = UserId::new(id)?;
        let email = email.into();
        if email.trim().is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        Ok(Self {
            id,
            email: email.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_identity_from_id_and_email() {
        let owner = OwnerIdentity::new("gh-42", "dev@example.com").unwrap();
        assert_eq!(owner.id.as_str(), "gh-42");
        assert_eq!(owner.email, "dev@example.com");
    }

    #[test]
    fn trims_email() {
        let owner = OwnerIdentity::new("gh-42", "  dev@example.com ").unwrap();
        assert_eq!(owner.email, "dev@example.com");
    }

    #[test]
    fn rejects_missing_email() {
        let err = OwnerIdentity::new("gh-42", " ").unwrap_err();
        assert_eq!(err.field(), "email");
    }

    #[test]
    fn rejects_missing_id() {
        let err = OwnerIdentity::new("", "dev@example.com").unwrap_err();
        assert_eq!(err.field(), "user_id");
    }
}
