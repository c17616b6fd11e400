//! Moderation use-cases.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::ReviewRepository;
use crate::domain::service_support::map_review_repository_error;
use crate::domain::{Error, ReviewDeletion, ReviewId};

/// Service behind the `/admin` endpoints.
#[derive(Clone)]
pub struct AdminService {
    reviews: Arc<dyn ReviewRepository>,
}

impl AdminService {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    /// Delete a review after its aspect ratings.
    ///
    /// A missing review is reported through [`ReviewDeletion::review_deleted`]
    /// rather than as an error.
    pub async fn delete_review(&self, review_id: ReviewId) -> Result<ReviewDeletion, Error> {
        let deletion = self
            .reviews
            .delete_with_optional_reviews(review_id)
            .await
            .map_err(map_review_repository_error)?;
        info!(
            review_id = %review_id,
            deleted = deletion.review_deleted,
            optional_reviews = deletion.optional_reviews_deleted,
            "admin review delete"
        );
        Ok(deletion)
    }
}
