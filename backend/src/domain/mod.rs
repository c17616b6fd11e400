//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed entities shared by the HTTP and
//! persistence adapters, the repository ports those adapters implement, and
//! the services that turn repository outcomes into domain errors.
//!
//! Public surface:
//! - Error, ErrorCode: API error payload and stable identifiers.
//! - Typed ids (`UserId`, `GameId`, ...) and validated request values.
//! - One service per endpoint family (`UserService`, `FeedService`, ...).

pub mod error;
pub mod feed;
pub mod game;
pub mod ids;
pub mod limit;
pub mod play;
pub mod ports;
pub mod recommendation;
pub mod review;
pub mod trace_id;
pub mod user;

mod admin_service;
mod feed_service;
mod game_service;
mod recommendation_service;
mod review_service;
mod service_support;
mod user_service;

pub use self::admin_service::AdminService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feed::{FEED_WINDOW_DAYS, FeedEntry, feed_window_start};
pub use self::feed_service::FeedService;
pub use self::game::{
    Game, GameDetails, GameTitle, GameValidationError, Genre, GenreName, NewGame,
};
pub use self::game_service::GameService;
pub use self::ids::{CommentId, GameId, GenreId, OptionalReviewId, ReviewId, UserId};
pub use self::limit::{LimitOutOfRange, MAX_RESULT_LIMIT, ResultLimit};
pub use self::play::{PlaySession, PlayValidationError, TimePlayed};
pub use self::recommendation::{
    LIKED_SCORE_THRESHOLD, Recommendation, RecommendationCandidate, rank_candidates,
};
pub use self::recommendation_service::RecommendationService;
pub use self::review::{
    Aspect, Comment, CommentText, NewComment, NewOptionalReview, NewReview, OptionalReview,
    Review, ReviewDeletion, ReviewEdit, ReviewSummary, ReviewText, ReviewValidationError, Score,
};
pub use self::review_service::ReviewService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{AccountSettings, UserSettings, UserValidationError, Username};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use gamer_society::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
