//! Friends feed handler.
//!
//! ```text
//! GET /feed/{user_id}?limit=10
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{FeedEntry, ResultLimit, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::reviews::OptionalReviewBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{LimitQuery, parse_limit};

/// One friend's review as shown in the feed.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct FeedEntryBody {
    pub game_title: String,
    /// Author of the review.
    pub username: String,
    pub score: i32,
    /// Review text.
    pub description: String,
    pub optional_reviews: Vec<OptionalReviewBody>,
}

impl From<FeedEntry> for FeedEntryBody {
    fn from(value: FeedEntry) -> Self {
        Self {
            game_title: value.game_title,
            username: value.username,
            score: value.score,
            description: value.description,
            optional_reviews: value
                .optional_reviews
                .into_iter()
                .map(OptionalReviewBody::from)
                .collect(),
        }
    }
}

/// Reviews from the last 30 days by users the viewer added.
#[utoipa::path(
    get,
    path = "/feed/{user_id}",
    params(("user_id" = i32, Path, description = "Viewer"), LimitQuery),
    responses(
        (status = 200, description = "Feed entries", body = [FeedEntryBody]),
        (status = 404, description = "Viewer does not exist", body = ErrorSchema),
        (status = 422, description = "Limit out of range", body = ErrorSchema)
    ),
    tags = ["feed"],
    operation_id = "getFeed"
)]
#[get("/feed/{user_id}")]
pub async fn feed(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    query: web::Query<LimitQuery>,
) -> ApiResult<web::Json<Vec<FeedEntryBody>>> {
    let limit = parse_limit(query.limit, ResultLimit::FEED)?;
    let entries = state
        .feed
        .feed(UserId::new(path.into_inner()), limit)
        .await?;
    Ok(web::Json(entries.into_iter().map(FeedEntryBody::from).collect()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(feed);
}
