//! Review, aspect rating and comment API handlers.
//!
//! ```text
//! POST  /review/create               {"user_id":1,"game_id":2,"score":8,...}
//! GET   /review/{review_id}
//! PATCH /review/{review_id}          {"score":9,"text":"...","published":true}
//! POST  /review/{review_id}/optional {"aspect":"story","score":7}
//! POST  /review/{review_id}/comment  {"user_id":3,"text":"agreed"}
//! GET   /review/{review_id}/comments
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Aspect, Comment, CommentText, GameId, NewComment, NewOptionalReview, NewReview,
    OptionalReview, Review, ReviewEdit, ReviewId, ReviewText, ReviewValidationError, Score,
    UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, indexed_review_validation_error, review_validation_error,
};

const SCORE: FieldName = FieldName::new("score");
const TEXT: FieldName = FieldName::new("text");
const ASPECT: FieldName = FieldName::new("aspect");
const OPTIONAL_REVIEWS: FieldName = FieldName::new("optional_reviews");

/// One aspect rating, e.g. `{"aspect":"graphics","score":9}`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct OptionalReviewBody {
    #[schema(example = "graphics")]
    pub aspect: String,
    /// 1 to 10.
    pub score: i32,
}

impl From<OptionalReview> for OptionalReviewBody {
    fn from(value: OptionalReview) -> Self {
        Self {
            aspect: value.aspect,
            score: value.score,
        }
    }
}

impl OptionalReviewBody {
    fn into_domain(self) -> Result<NewOptionalReview, ReviewValidationError> {
        Ok(NewOptionalReview {
            aspect: Aspect::new(self.aspect)?,
            score: Score::new(self.score)?,
        })
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateReviewRequest {
    pub user_id: i32,
    pub game_id: i32,
    /// 1 to 10.
    pub score: i32,
    /// At most 500 characters.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub optional_reviews: Vec<OptionalReviewBody>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateReviewResponse {
    pub review_id: i32,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct EditReviewRequest {
    pub score: i32,
    #[serde(default)]
    pub text: String,
    pub published: bool,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ReviewBody {
    pub review_id: i32,
    pub user_id: i32,
    pub game_id: i32,
    pub score: i32,
    pub text: String,
    pub published: bool,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
    pub optional_reviews: Vec<OptionalReviewBody>,
}

impl From<Review> for ReviewBody {
    fn from(value: Review) -> Self {
        Self {
            review_id: value.id.get(),
            user_id: value.user_id.get(),
            game_id: value.game_id.get(),
            score: value.score,
            text: value.text,
            published: value.published,
            updated_at: value.updated_at,
            optional_reviews: value
                .optional_reviews
                .into_iter()
                .map(OptionalReviewBody::from)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateOptionalReviewResponse {
    pub optional_review_id: i32,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateCommentRequest {
    pub user_id: i32,
    /// 1 to 500 characters.
    pub text: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateCommentResponse {
    pub comment_id: i32,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CommentBody {
    pub comment_id: i32,
    pub review_id: i32,
    pub user_id: i32,
    pub text: String,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentBody {
    fn from(value: Comment) -> Self {
        Self {
            comment_id: value.id.get(),
            review_id: value.review_id.get(),
            user_id: value.user_id.get(),
            text: value.text,
            updated_at: value.updated_at,
        }
    }
}

fn parse_score(raw: i32) -> ApiResult<Score> {
    Score::new(raw).map_err(|err| review_validation_error(SCORE, &err))
}

fn parse_text(raw: String) -> ApiResult<ReviewText> {
    ReviewText::new(raw).map_err(|err| review_validation_error(TEXT, &err))
}

fn parse_optional_reviews(raw: Vec<OptionalReviewBody>) -> ApiResult<Vec<NewOptionalReview>> {
    raw.into_iter()
        .enumerate()
        .map(|(index, body)| {
            body.into_domain()
                .map_err(|err| indexed_review_validation_error(OPTIONAL_REVIEWS, index, &err))
        })
        .collect()
}

/// Store a review together with its aspect ratings.
#[utoipa::path(
    post,
    path = "/review/create",
    request_body = CreateReviewRequest,
    responses(
        (status = 200, description = "Review created", body = CreateReviewResponse),
        (status = 404, description = "User or game does not exist", body = ErrorSchema),
        (status = 422, description = "Invalid review", body = ErrorSchema)
    ),
    tags = ["review"],
    operation_id = "createReview"
)]
#[post("/review/create")]
pub async fn create_review(
    state: web::Data<HttpState>,
    payload: web::Json<CreateReviewRequest>,
) -> ApiResult<web::Json<CreateReviewResponse>> {
    let CreateReviewRequest {
        user_id,
        game_id,
        score,
        text,
        published,
        optional_reviews,
    } = payload.into_inner();
    let review = NewReview {
        user_id: UserId::new(user_id),
        game_id: GameId::new(game_id),
        score: parse_score(score)?,
        text: parse_text(text)?,
        published,
        optional_reviews: parse_optional_reviews(optional_reviews)?,
    };
    let review_id = state.reviews.create_review(review).await?;
    Ok(web::Json(CreateReviewResponse {
        review_id: review_id.get(),
    }))
}

#[utoipa::path(
    get,
    path = "/review/{review_id}",
    params(("review_id" = i32, Path)),
    responses(
        (status = 200, description = "Review with aspect ratings", body = ReviewBody),
        (status = 404, description = "Review does not exist", body = ErrorSchema)
    ),
    tags = ["review"],
    operation_id = "getReview"
)]
#[get("/review/{review_id}")]
pub async fn get_review(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<ReviewBody>> {
    let review = state.reviews.review(ReviewId::new(path.into_inner())).await?;
    Ok(web::Json(review.into()))
}

/// Replace score, text and publication flag.
#[utoipa::path(
    patch,
    path = "/review/{review_id}",
    params(("review_id" = i32, Path)),
    request_body = EditReviewRequest,
    responses(
        (status = 204, description = "Review updated"),
        (status = 404, description = "Review does not exist", body = ErrorSchema),
        (status = 422, description = "Invalid review", body = ErrorSchema)
    ),
    tags = ["review"],
    operation_id = "editReview"
)]
#[patch("/review/{review_id}")]
pub async fn edit_review(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<EditReviewRequest>,
) -> ApiResult<HttpResponse> {
    let EditReviewRequest {
        score,
        text,
        published,
    } = payload.into_inner();
    let edit = ReviewEdit {
        score: parse_score(score)?,
        text: parse_text(text)?,
        published,
    };
    state
        .reviews
        .edit_review(ReviewId::new(path.into_inner()), edit)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/review/{review_id}/optional",
    params(("review_id" = i32, Path)),
    request_body = OptionalReviewBody,
    responses(
        (status = 200, description = "Aspect rating added", body = CreateOptionalReviewResponse),
        (status = 404, description = "Review does not exist", body = ErrorSchema),
        (status = 422, description = "Invalid aspect rating", body = ErrorSchema)
    ),
    tags = ["review"],
    operation_id = "addOptionalReview"
)]
#[post("/review/{review_id}/optional")]
pub async fn add_optional_review(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<OptionalReviewBody>,
) -> ApiResult<web::Json<CreateOptionalReviewResponse>> {
    let OptionalReviewBody { aspect, score } = payload.into_inner();
    let aspect = Aspect::new(aspect).map_err(|err| review_validation_error(ASPECT, &err))?;
    let optional = NewOptionalReview {
        aspect,
        score: parse_score(score)?,
    };
    let optional_review_id = state
        .reviews
        .add_optional_review(ReviewId::new(path.into_inner()), optional)
        .await?;
    Ok(web::Json(CreateOptionalReviewResponse {
        optional_review_id: optional_review_id.get(),
    }))
}

#[utoipa::path(
    post,
    path = "/review/{review_id}/comment",
    params(("review_id" = i32, Path)),
    request_body = CreateCommentRequest,
    responses(
        (status = 200, description = "Comment added", body = CreateCommentResponse),
        (status = 404, description = "Review or user does not exist", body = ErrorSchema),
        (status = 422, description = "Invalid comment", body = ErrorSchema)
    ),
    tags = ["review"],
    operation_id = "addComment"
)]
#[post("/review/{review_id}/comment")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<CreateCommentRequest>,
) -> ApiResult<web::Json<CreateCommentResponse>> {
    let CreateCommentRequest { user_id, text } = payload.into_inner();
    let text = CommentText::new(text).map_err(|err| review_validation_error(TEXT, &err))?;
    let comment_id = state
        .reviews
        .add_comment(
            ReviewId::new(path.into_inner()),
            NewComment {
                user_id: UserId::new(user_id),
                text,
            },
        )
        .await?;
    Ok(web::Json(CreateCommentResponse {
        comment_id: comment_id.get(),
    }))
}

/// Comments on a review, oldest first.
#[utoipa::path(
    get,
    path = "/review/{review_id}/comments",
    params(("review_id" = i32, Path)),
    responses(
        (status = 200, description = "Comments", body = [CommentBody]),
        (status = 404, description = "Review does not exist", body = ErrorSchema)
    ),
    tags = ["review"],
    operation_id = "listComments"
)]
#[get("/review/{review_id}/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Vec<CommentBody>>> {
    let comments = state
        .reviews
        .comments(ReviewId::new(path.into_inner()))
        .await?;
    Ok(web::Json(comments.into_iter().map(CommentBody::from).collect()))
}

/// Register every `/review` handler.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_review)
        .service(get_review)
        .service(edit_review)
        .service(add_optional_review)
        .service(add_comment)
        .service(list_comments);
}
