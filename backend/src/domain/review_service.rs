//! Review, aspect rating and comment use-cases.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::{AddCommentOutcome, CreateReviewOutcome, ReviewRepository};
use crate::domain::service_support::{map_review_repository_error, user_not_found};
use crate::domain::{
    Comment, CommentId, Error, NewComment, NewOptionalReview, NewReview, OptionalReviewId, Review,
    ReviewEdit, ReviewId,
};

fn review_not_found(review_id: ReviewId) -> Error {
    Error::not_found(format!("review {review_id} not found"))
}

/// Service behind the `/review` endpoints.
#[derive(Clone)]
pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
}

impl ReviewService {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    /// Store a review with its aspect ratings.
    pub async fn create_review(&self, review: NewReview) -> Result<ReviewId, Error> {
        let outcome = self
            .reviews
            .create(&review)
            .await
            .map_err(map_review_repository_error)?;
        match outcome {
            CreateReviewOutcome::Created(review_id) => {
                info!(
                    review_id = %review_id,
                    optional_reviews = review.optional_reviews.len(),
                    "review created"
                );
                Ok(review_id)
            }
            CreateReviewOutcome::UserMissing => Err(user_not_found(review.user_id)),
            CreateReviewOutcome::GameMissing => Err(Error::not_found(format!(
                "game {} not found",
                review.game_id
            ))),
        }
    }

    pub async fn review(&self, review_id: ReviewId) -> Result<Review, Error> {
        self.reviews
            .find(review_id)
            .await
            .map_err(map_review_repository_error)?
            .ok_or_else(|| review_not_found(review_id))
    }

    pub async fn edit_review(&self, review_id: ReviewId, edit: ReviewEdit) -> Result<(), Error> {
        let updated = self
            .reviews
            .update(review_id, &edit)
            .await
            .map_err(map_review_repository_error)?;
        if !updated {
            return Err(review_not_found(review_id));
        }
        info!(review_id = %review_id, "review updated");
        Ok(())
    }

    pub async fn add_optional_review(
        &self,
        review_id: ReviewId,
        optional: NewOptionalReview,
    ) -> Result<OptionalReviewId, Error> {
        self.reviews
            .add_optional(review_id, &optional)
            .await
            .map_err(map_review_repository_error)?
            .ok_or_else(|| review_not_found(review_id))
    }

    pub async fn add_comment(
        &self,
        review_id: ReviewId,
        comment: NewComment,
    ) -> Result<CommentId, Error> {
        let outcome = self
            .reviews
            .add_comment(review_id, &comment)
            .await
            .map_err(map_review_repository_error)?;
        match outcome {
            AddCommentOutcome::Added(comment_id) => Ok(comment_id),
            AddCommentOutcome::ReviewMissing => Err(review_not_found(review_id)),
            AddCommentOutcome::UserMissing => Err(user_not_found(comment.user_id)),
        }
    }

    /// Comments on a review, oldest first.
    pub async fn comments(&self, review_id: ReviewId) -> Result<Vec<Comment>, Error> {
        self.reviews
            .comments(review_id)
            .await
            .map_err(map_review_repository_error)?
            .ok_or_else(|| review_not_found(review_id))
    }
}
