//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP handler, the request and response bodies
//! they exchange, the shared error envelope ([`ErrorSchema`],
//! [`ErrorCodeSchema`]) and the `access_token` header scheme. Swagger UI
//! serves it in debug builds and `cargo run --bin openapi-dump` exports it.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::admin::DeleteReviewResponse;
use crate::inbound::http::feed::FeedEntryBody;
use crate::inbound::http::games::{
    CreateGameRequest, CreateGameResponse, CreateGenreRequest, CreateGenreResponse, GameBody,
    GameDetailsBody, GenreBody,
};
use crate::inbound::http::recommendations::RecommendationBody;
use crate::inbound::http::reviews::{
    CommentBody, CreateCommentRequest, CreateCommentResponse, CreateOptionalReviewResponse,
    CreateReviewRequest, CreateReviewResponse, EditReviewRequest, OptionalReviewBody, ReviewBody,
};
use crate::inbound::http::root::WelcomeBody;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{
    AddFriendRequest, CreateUserRequest, CreateUserResponse, GamePlayedRequest,
    ReviewSummaryBody, SettingBody,
};
use crate::middleware::API_KEY_HEADER;

/// Name of the security scheme referenced by gated operations.
pub const API_KEY_SCHEME: &str = "ApiKeyHeader";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            API_KEY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                API_KEY_HEADER,
                "Shared API key configured on the server.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Gamer Society API",
        description = "Users, friendships, game reviews, a friends feed and recommendations."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("ApiKeyHeader" = [])),
    paths(
        crate::inbound::http::root::root,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::add_friend,
        crate::inbound::http::users::my_friends,
        crate::inbound::http::users::friended_me,
        crate::inbound::http::users::settings,
        crate::inbound::http::users::edit_settings,
        crate::inbound::http::users::history,
        crate::inbound::http::users::favorite,
        crate::inbound::http::users::games_played,
        crate::inbound::http::games::create_genre,
        crate::inbound::http::games::list_genres,
        crate::inbound::http::games::create_game,
        crate::inbound::http::games::list_games,
        crate::inbound::http::games::get_game,
        crate::inbound::http::reviews::create_review,
        crate::inbound::http::reviews::get_review,
        crate::inbound::http::reviews::edit_review,
        crate::inbound::http::reviews::add_optional_review,
        crate::inbound::http::reviews::add_comment,
        crate::inbound::http::reviews::list_comments,
        crate::inbound::http::feed::feed,
        crate::inbound::http::recommendations::recommendations,
        crate::inbound::http::admin::delete_review,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        WelcomeBody,
        CreateUserRequest,
        CreateUserResponse,
        AddFriendRequest,
        SettingBody,
        ReviewSummaryBody,
        GamePlayedRequest,
        CreateGenreRequest,
        CreateGenreResponse,
        GenreBody,
        CreateGameRequest,
        CreateGameResponse,
        GameBody,
        GameDetailsBody,
        CreateReviewRequest,
        CreateReviewResponse,
        EditReviewRequest,
        OptionalReviewBody,
        ReviewBody,
        CreateOptionalReviewResponse,
        CreateCommentRequest,
        CreateCommentResponse,
        CommentBody,
        FeedEntryBody,
        RecommendationBody,
        DeleteReviewResponse,
    )),
    tags(
        (name = "root", description = "Welcome message"),
        (name = "health", description = "Endpoints for health checks"),
        (name = "user", description = "Accounts, friendships and play history"),
        (name = "games", description = "Genres and the game catalogue"),
        (name = "review", description = "Reviews, aspect ratings and comments"),
        (name = "feed", description = "Recent reviews by friends"),
        (name = "recommendations", description = "Games suggested from liked genres"),
        (name = "admin", description = "Moderation")
    )
)]
pub struct ApiDoc;
