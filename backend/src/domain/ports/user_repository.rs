//! Port for user accounts and the reviews and play history they own.

use async_trait::async_trait;

use crate::domain::{AccountSettings, PlaySession, ResultLimit, ReviewSummary, UserId, UserSettings};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError for "user repository"
}

/// Outcome of folding a play session into the history table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayRecordOutcome {
    Recorded,
    UserMissing,
    GameMissing,
}

/// Port for reading and writing user accounts.
///
/// Listing operations return `None` when the user does not exist so callers
/// can tell an unknown user apart from one without reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return its generated identifier.
    async fn create(&self, settings: &AccountSettings) -> Result<UserId, UserRepositoryError>;

    /// Username and privacy flag of a user, if present.
    async fn settings(&self, user_id: UserId) -> Result<Option<UserSettings>, UserRepositoryError>;

    /// Overwrite username and privacy flag. Returns `false` when no such user
    /// exists.
    async fn update_settings(
        &self,
        user_id: UserId,
        settings: &AccountSettings,
    ) -> Result<bool, UserRepositoryError>;

    /// Most recently updated reviews by the user, newest first.
    async fn recent_reviews(
        &self,
        user_id: UserId,
        limit: ResultLimit,
    ) -> Result<Option<Vec<ReviewSummary>>, UserRepositoryError>;

    /// Highest scored reviews by the user, best first.
    async fn top_reviews(
        &self,
        user_id: UserId,
        limit: ResultLimit,
    ) -> Result<Option<Vec<ReviewSummary>>, UserRepositoryError>;

    /// Add a session to the user's history for the game, creating the row
    /// on first play.
    async fn record_play(
        &self,
        session: &PlaySession,
    ) -> Result<PlayRecordOutcome, UserRepositoryError>;
}
