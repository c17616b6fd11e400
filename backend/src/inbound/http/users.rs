//! User, friendship and play-history API handlers.
//!
//! ```text
//! POST  /user/create                 {"username":"ada","private":false}
//! POST  /user/{user_id}/add          {"friend_id":7}
//! GET   /user/{user_id}/my_friends
//! GET   /user/{user_id}/friended_me
//! GET   /user/{user_id}/settings
//! PATCH /user/{user_id}/settings/edit {"name":"ada","privacy_value":true}
//! GET   /user/{user_id}/history?limit=10
//! GET   /user/{user_id}/favorite
//! POST  /user/{user_id}/games_played {"game_id":3,"time_played":1.5}
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AccountSettings, GameId, ResultLimit, ReviewSummary, TimePlayed, UserId, UserSettings,
    Username,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, LimitQuery, parse_limit, play_validation_error, user_validation_error,
};

const USERNAME: FieldName = FieldName::new("username");
const SETTINGS_NAME: FieldName = FieldName::new("name");
const TIME_PLAYED: FieldName = FieldName::new("time_played");

/// Request body for `POST /user/create`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    /// Between 3 and 50 characters.
    #[schema(example = "ada")]
    pub username: String,
    /// `true` hides the account.
    pub private: bool,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateUserResponse {
    pub user_id: i32,
}

/// Request body for `POST /user/{user_id}/add`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AddFriendRequest {
    pub friend_id: i32,
}

/// Account settings as read and written by the settings endpoints.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SettingBody {
    /// Username.
    pub name: String,
    /// `true` for a private account.
    pub privacy_value: bool,
}

impl From<UserSettings> for SettingBody {
    fn from(value: UserSettings) -> Self {
        Self {
            name: value.username,
            privacy_value: value.is_private,
        }
    }
}

/// Review projection returned by the history and favourites listings.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ReviewSummaryBody {
    pub user_id: i32,
    pub game_id: i32,
    pub score: i32,
    pub text: String,
}

impl From<ReviewSummary> for ReviewSummaryBody {
    fn from(value: ReviewSummary) -> Self {
        Self {
            user_id: value.user_id.get(),
            game_id: value.game_id.get(),
            score: value.score,
            text: value.text,
        }
    }
}

/// Request body for `POST /user/{user_id}/games_played`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct GamePlayedRequest {
    pub game_id: i32,
    /// Hours played in this session; must be finite and not negative.
    #[schema(example = 1.5)]
    pub time_played: f64,
}

fn summaries(rows: Vec<ReviewSummary>) -> Vec<ReviewSummaryBody> {
    rows.into_iter().map(ReviewSummaryBody::from).collect()
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/user/create",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = CreateUserResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorSchema),
        (status = 422, description = "Invalid username", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "createUser"
)]
#[post("/user/create")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<web::Json<CreateUserResponse>> {
    let CreateUserRequest { username, private } = payload.into_inner();
    let username = Username::new(username).map_err(|err| user_validation_error(USERNAME, &err))?;
    let user_id = state
        .users
        .create_user(AccountSettings::new(username, private))
        .await?;
    Ok(web::Json(CreateUserResponse {
        user_id: user_id.get(),
    }))
}

/// Record that the user added `friend_id` as a friend.
#[utoipa::path(
    post,
    path = "/user/{user_id}/add",
    params(("user_id" = i32, Path, description = "Adding user")),
    request_body = AddFriendRequest,
    responses(
        (status = 204, description = "Friend added"),
        (status = 404, description = "Either user does not exist", body = ErrorSchema),
        (status = 409, description = "Friend already added", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "addFriend"
)]
#[post("/user/{user_id}/add")]
pub async fn add_friend(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<AddFriendRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = UserId::new(path.into_inner());
    let friend_id = UserId::new(payload.friend_id);
    state.users.add_friend(user_id, friend_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Usernames of everyone the user added.
#[utoipa::path(
    get,
    path = "/user/{user_id}/my_friends",
    params(("user_id" = i32, Path)),
    responses(
        (status = 200, description = "Usernames", body = [String]),
        (status = 404, description = "User does not exist", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "listMyFriends"
)]
#[get("/user/{user_id}/my_friends")]
pub async fn my_friends(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Vec<String>>> {
    let names = state
        .users
        .friends_added_by(UserId::new(path.into_inner()))
        .await?;
    Ok(web::Json(names))
}

/// Usernames of everyone who added the user.
#[utoipa::path(
    get,
    path = "/user/{user_id}/friended_me",
    params(("user_id" = i32, Path)),
    responses(
        (status = 200, description = "Usernames", body = [String]),
        (status = 404, description = "User does not exist", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "listFriendedMe"
)]
#[get("/user/{user_id}/friended_me")]
pub async fn friended_me(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Vec<String>>> {
    let names = state
        .users
        .friends_adding(UserId::new(path.into_inner()))
        .await?;
    Ok(web::Json(names))
}

/// Username and privacy flag as a list with zero or one entry.
#[utoipa::path(
    get,
    path = "/user/{user_id}/settings",
    params(("user_id" = i32, Path)),
    responses(
        (status = 200, description = "Settings; empty for an unknown user", body = [SettingBody])
    ),
    tags = ["user"],
    operation_id = "getSettings"
)]
#[get("/user/{user_id}/settings")]
pub async fn settings(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Vec<SettingBody>>> {
    let settings = state.users.settings(UserId::new(path.into_inner())).await?;
    Ok(web::Json(settings.into_iter().map(SettingBody::from).collect()))
}

/// Overwrite username and privacy flag.
#[utoipa::path(
    patch,
    path = "/user/{user_id}/settings/edit",
    params(("user_id" = i32, Path)),
    request_body = SettingBody,
    responses(
        (status = 204, description = "Settings updated"),
        (status = 404, description = "User does not exist", body = ErrorSchema),
        (status = 422, description = "Invalid username", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "editSettings"
)]
#[patch("/user/{user_id}/settings/edit")]
pub async fn edit_settings(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<SettingBody>,
) -> ApiResult<HttpResponse> {
    let SettingBody {
        name,
        privacy_value,
    } = payload.into_inner();
    let username =
        Username::new(name).map_err(|err| user_validation_error(SETTINGS_NAME, &err))?;
    state
        .users
        .edit_settings(
            UserId::new(path.into_inner()),
            AccountSettings::new(username, privacy_value),
        )
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// The user's reviews, most recently updated first.
#[utoipa::path(
    get,
    path = "/user/{user_id}/history",
    params(("user_id" = i32, Path), LimitQuery),
    responses(
        (status = 200, description = "Reviews", body = [ReviewSummaryBody]),
        (status = 404, description = "User does not exist", body = ErrorSchema),
        (status = 422, description = "Limit out of range", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "getHistory"
)]
#[get("/user/{user_id}/history")]
pub async fn history(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    query: web::Query<LimitQuery>,
) -> ApiResult<web::Json<Vec<ReviewSummaryBody>>> {
    let limit = parse_limit(query.limit, ResultLimit::HISTORY)?;
    let rows = state
        .users
        .history(UserId::new(path.into_inner()), limit)
        .await?;
    Ok(web::Json(summaries(rows)))
}

/// The user's five best-scored reviews.
#[utoipa::path(
    get,
    path = "/user/{user_id}/favorite",
    params(("user_id" = i32, Path)),
    responses(
        (status = 200, description = "Top reviews", body = [ReviewSummaryBody]),
        (status = 404, description = "User does not exist", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "getFavorites"
)]
#[get("/user/{user_id}/favorite")]
pub async fn favorite(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Vec<ReviewSummaryBody>>> {
    let rows = state.users.favourites(UserId::new(path.into_inner())).await?;
    Ok(web::Json(summaries(rows)))
}

/// Add a play session to the user's history for a game.
#[utoipa::path(
    post,
    path = "/user/{user_id}/games_played",
    params(("user_id" = i32, Path)),
    request_body = GamePlayedRequest,
    responses(
        (status = 204, description = "Play recorded"),
        (status = 404, description = "User or game does not exist", body = ErrorSchema),
        (status = 422, description = "Invalid play time", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "recordGamePlayed"
)]
#[post("/user/{user_id}/games_played")]
pub async fn games_played(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<GamePlayedRequest>,
) -> ApiResult<HttpResponse> {
    let GamePlayedRequest {
        game_id,
        time_played,
    } = payload.into_inner();
    let time_played =
        TimePlayed::new(time_played).map_err(|err| play_validation_error(TIME_PLAYED, &err))?;
    state
        .users
        .record_play(UserId::new(path.into_inner()), GameId::new(game_id), time_played)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register every `/user` handler.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_user)
        .service(add_friend)
        .service(my_friends)
        .service(friended_me)
        .service(settings)
        .service(edit_settings)
        .service(history)
        .service(favorite)
        .service(games_played);
}
