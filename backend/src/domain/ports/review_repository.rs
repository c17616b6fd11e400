//! Port for reviews, their aspect ratings and comments.

use async_trait::async_trait;

use crate::domain::{
    Comment, CommentId, NewComment, NewOptionalReview, NewReview, OptionalReviewId, Review,
    ReviewDeletion, ReviewEdit, ReviewId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by review repository adapters.
    pub enum ReviewRepositoryError for "review repository"
}

/// Outcome of inserting a review with its aspect ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateReviewOutcome {
    Created(ReviewId),
    UserMissing,
    GameMissing,
}

/// Outcome of attaching a comment to a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddCommentOutcome {
    Added(CommentId),
    ReviewMissing,
    UserMissing,
}

/// Port for the `reviews`, `optional_reviews` and `comments` tables.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert the review and every aspect rating in one transaction.
    async fn create(&self, review: &NewReview)
    -> Result<CreateReviewOutcome, ReviewRepositoryError>;

    async fn find(&self, review_id: ReviewId) -> Result<Option<Review>, ReviewRepositoryError>;

    /// Replace score, text and visibility. Returns `false` for an unknown
    /// review.
    async fn update(
        &self,
        review_id: ReviewId,
        edit: &ReviewEdit,
    ) -> Result<bool, ReviewRepositoryError>;

    /// Attach an aspect rating. Returns `None` for an unknown review.
    async fn add_optional(
        &self,
        review_id: ReviewId,
        optional: &NewOptionalReview,
    ) -> Result<Option<OptionalReviewId>, ReviewRepositoryError>;

    async fn add_comment(
        &self,
        review_id: ReviewId,
        comment: &NewComment,
    ) -> Result<AddCommentOutcome, ReviewRepositoryError>;

    /// Comments oldest first, or `None` for an unknown review.
    async fn comments(
        &self,
        review_id: ReviewId,
    ) -> Result<Option<Vec<Comment>>, ReviewRepositoryError>;

    /// Remove the aspect ratings of a review, then the review itself, in a
    /// single transaction.
    ///
    /// Deleting a missing review is not an error; the returned
    /// [`ReviewDeletion`] reports that nothing was removed.
    async fn delete_with_optional_reviews(
        &self,
        review_id: ReviewId,
    ) -> Result<ReviewDeletion, ReviewRepositoryError>;
}
