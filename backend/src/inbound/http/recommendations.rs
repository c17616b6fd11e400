//! Game recommendation handler.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Recommendation, ResultLimit, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{LimitQuery, parse_limit};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RecommendationBody {
    pub game_id: i32,
    pub title: String,
    pub genre: String,
    /// Mean score other users gave the game; absent when unreviewed.
    pub average_score: Option<f64>,
}

impl From<Recommendation> for RecommendationBody {
    fn from(value: Recommendation) -> Self {
        Self {
            game_id: value.game.id.get(),
            title: value.game.title,
            genre: value.game.genre,
            average_score: value.average_score,
        }
    }
}

/// Unreviewed games in genres the user rated 7 or higher, best rated first.
#[utoipa::path(
    get,
    path = "/recommendations/{user_id}",
    params(("user_id" = i32, Path), LimitQuery),
    responses(
        (status = 200, description = "Recommended games", body = [RecommendationBody]),
        (status = 404, description = "User does not exist", body = ErrorSchema),
        (status = 422, description = "Limit out of range", body = ErrorSchema)
    ),
    tags = ["recommendations"],
    operation_id = "getRecommendations"
)]
#[get("/recommendations/{user_id}")]
pub async fn recommendations(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    query: web::Query<LimitQuery>,
) -> ApiResult<web::Json<Vec<RecommendationBody>>> {
    let limit = parse_limit(query.limit, ResultLimit::RECOMMENDATIONS)?;
    let ranked = state
        .recommendations
        .recommend(UserId::new(path.into_inner()), limit)
        .await?;
    Ok(web::Json(
        ranked.into_iter().map(RecommendationBody::from).collect(),
    ))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(recommendations);
}
