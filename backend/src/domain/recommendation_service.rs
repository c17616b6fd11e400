//! Game recommendation use-case.

use std::sync::Arc;

use crate::domain::ports::RecommendationRepository;
use crate::domain::service_support::{map_recommendation_repository_error, user_not_found};
use crate::domain::{Error, Recommendation, ResultLimit, UserId, rank_candidates};

#[derive(Clone)]
pub struct RecommendationService {
    recommendations: Arc<dyn RecommendationRepository>,
}

impl RecommendationService {
    pub fn new(recommendations: Arc<dyn RecommendationRepository>) -> Self {
        Self { recommendations }
    }

    pub async fn recommend(
        &self,
        user_id: UserId,
        limit: ResultLimit,
    ) -> Result<Vec<Recommendation>, Error> {
        let candidates = self
            .recommendations
            .candidates(user_id)
            .await
            .map_err(map_recommendation_repository_error)?
            .ok_or_else(|| user_not_found(user_id))?;
        Ok(rank_candidates(candidates, limit))
    }
}
