//! Ownership trait for user-owned resources.
//!
//! Documents are private to their owner. A resource owned by somebody else
//! must look exactly like a resource that does not exist, so the check here
//! yields a plain boolean and callers map a miss onto their own
//! "not found" error instead of a distinct "forbidden".

use super::UserId;

/// Trait for aggregates that have a single owner.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> &UserId;

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }
}
