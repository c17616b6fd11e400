//! Moderation handlers.
//!
//! ```text
//! DELETE /admin/delete?review_id=12
//! ```

use actix_web::{delete, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ReviewId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteReviewQuery {
    pub review_id: i32,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DeleteReviewResponse {
    /// `true` only when a review row was removed.
    pub success: bool,
}

/// Delete a review and its aspect ratings.
#[utoipa::path(
    delete,
    path = "/admin/delete",
    params(DeleteReviewQuery),
    responses(
        (status = 200, description = "Delete attempted", body = DeleteReviewResponse),
        (status = 422, description = "Missing or malformed review_id", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "deleteReview"
)]
#[delete("/admin/delete")]
pub async fn delete_review(
    state: web::Data<HttpState>,
    query: web::Query<DeleteReviewQuery>,
) -> ApiResult<web::Json<DeleteReviewResponse>> {
    let deletion = state
        .admin
        .delete_review(ReviewId::new(query.review_id))
        .await?;
    Ok(web::Json(DeleteReviewResponse {
        success: deletion.review_deleted,
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(delete_review);
}
