//! Port supplying recommendation candidates.

use async_trait::async_trait;

use crate::domain::{RecommendationCandidate, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recommendation repository adapters.
    pub enum RecommendationRepositoryError for "recommendation repository"
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    /// Unreviewed games sharing a genre with one of the user's reviews
    /// scoring at least
    /// [`LIKED_SCORE_THRESHOLD`](crate::domain::LIKED_SCORE_THRESHOLD), with
    /// the scores other users gave them.
    ///
    /// Returns `None` when the user does not exist.
    async fn candidates(
        &self,
        user_id: UserId,
    ) -> Result<Option<Vec<RecommendationCandidate>>, RecommendationRepositoryError>;
}
