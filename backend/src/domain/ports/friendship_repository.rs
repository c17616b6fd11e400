//! Port for directed friendship edges.

use async_trait::async_trait;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by friendship repository adapters.
    pub enum FriendshipRepositoryError for "friendship repository"
}

/// Outcome of inserting a friendship edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddFriendOutcome {
    Added,
    /// The edge already exists; nothing was written.
    AlreadyFriends,
    /// The adding user does not exist. Checked before the friend.
    UserMissing,
    FriendMissing,
}

/// Port for the `friends` table.
///
/// An edge `(a, b)` means `a` added `b`. The reverse edge is independent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FriendshipRepository: Send + Sync {
    async fn add(
        &self,
        user_id: UserId,
        friend_id: UserId,
    ) -> Result<AddFriendOutcome, FriendshipRepositoryError>;

    /// Usernames of everyone `user_id` added, or `None` for an unknown user.
    async fn added_by(
        &self,
        user_id: UserId,
    ) -> Result<Option<Vec<String>>, FriendshipRepositoryError>;

    /// Usernames of everyone who added `user_id`, or `None` for an unknown
    /// user.
    async fn adding(
        &self,
        user_id: UserId,
    ) -> Result<Option<Vec<String>>, FriendshipRepositoryError>;
}
