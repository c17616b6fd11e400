//! Game catalogue API handlers.
//!
//! ```text
//! POST /games/genres {"genre":"Roguelike"}
//! GET  /games/genres
//! POST /games/create {"title":"Hades","genre_id":1}
//! GET  /games?genre_id=1&limit=20
//! GET  /games/{game_id}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Game, GameDetails, GameId, GameTitle, Genre, GenreId, GenreName, NewGame, ResultLimit};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, game_validation_error, parse_limit};

const GENRE: FieldName = FieldName::new("genre");
const TITLE: FieldName = FieldName::new("title");

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateGenreRequest {
    /// Between 1 and 50 characters.
    #[schema(example = "Roguelike")]
    pub genre: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateGenreResponse {
    pub genre_id: i32,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct GenreBody {
    pub genre_id: i32,
    pub genre: String,
}

impl From<Genre> for GenreBody {
    fn from(value: Genre) -> Self {
        Self {
            genre_id: value.id.get(),
            genre: value.name,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateGameRequest {
    /// Between 1 and 100 characters.
    #[schema(example = "Hades")]
    pub title: String,
    pub genre_id: i32,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateGameResponse {
    pub game_id: i32,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct GameBody {
    pub game_id: i32,
    pub title: String,
    pub genre_id: i32,
    pub genre: String,
}

impl From<Game> for GameBody {
    fn from(value: Game) -> Self {
        Self {
            game_id: value.id.get(),
            title: value.title,
            genre_id: value.genre_id.get(),
            genre: value.genre,
        }
    }
}

/// Game with its review statistics.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct GameDetailsBody {
    #[serde(flatten)]
    pub game: GameBody,
    /// Mean score across every review; absent when nobody reviewed it.
    pub average_score: Option<f64>,
    pub review_count: usize,
}

impl From<GameDetails> for GameDetailsBody {
    fn from(value: GameDetails) -> Self {
        Self {
            game: value.game.into(),
            average_score: value.average_score,
            review_count: value.review_count,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GamesQuery {
    /// Only games of this genre.
    pub genre_id: Option<i32>,
    /// Maximum number of games, 1 to 100. Defaults to 20.
    pub limit: Option<i64>,
}

#[utoipa::path(
    post,
    path = "/games/genres",
    request_body = CreateGenreRequest,
    responses(
        (status = 200, description = "Genre created", body = CreateGenreResponse),
        (status = 422, description = "Invalid genre name", body = ErrorSchema)
    ),
    tags = ["games"],
    operation_id = "createGenre"
)]
#[post("/games/genres")]
pub async fn create_genre(
    state: web::Data<HttpState>,
    payload: web::Json<CreateGenreRequest>,
) -> ApiResult<web::Json<CreateGenreResponse>> {
    let name = GenreName::new(payload.into_inner().genre)
        .map_err(|err| game_validation_error(GENRE, &err))?;
    let genre_id = state.games.create_genre(name).await?;
    Ok(web::Json(CreateGenreResponse {
        genre_id: genre_id.get(),
    }))
}

/// All genres ordered by name.
#[utoipa::path(
    get,
    path = "/games/genres",
    responses((status = 200, description = "Genres", body = [GenreBody])),
    tags = ["games"],
    operation_id = "listGenres"
)]
#[get("/games/genres")]
pub async fn list_genres(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<GenreBody>>> {
    let genres = state.games.genres().await?;
    Ok(web::Json(genres.into_iter().map(GenreBody::from).collect()))
}

#[utoipa::path(
    post,
    path = "/games/create",
    request_body = CreateGameRequest,
    responses(
        (status = 200, description = "Game created", body = CreateGameResponse),
        (status = 404, description = "Genre does not exist", body = ErrorSchema),
        (status = 422, description = "Invalid title", body = ErrorSchema)
    ),
    tags = ["games"],
    operation_id = "createGame"
)]
#[post("/games/create")]
pub async fn create_game(
    state: web::Data<HttpState>,
    payload: web::Json<CreateGameRequest>,
) -> ApiResult<web::Json<CreateGameResponse>> {
    let CreateGameRequest { title, genre_id } = payload.into_inner();
    let title = GameTitle::new(title).map_err(|err| game_validation_error(TITLE, &err))?;
    let game_id = state
        .games
        .create_game(NewGame {
            title,
            genre_id: GenreId::new(genre_id),
        })
        .await?;
    Ok(web::Json(CreateGameResponse {
        game_id: game_id.get(),
    }))
}

/// Games ordered by title.
#[utoipa::path(
    get,
    path = "/games",
    params(GamesQuery),
    responses(
        (status = 200, description = "Games", body = [GameBody]),
        (status = 422, description = "Limit out of range", body = ErrorSchema)
    ),
    tags = ["games"],
    operation_id = "listGames"
)]
#[get("/games")]
pub async fn list_games(
    state: web::Data<HttpState>,
    query: web::Query<GamesQuery>,
) -> ApiResult<web::Json<Vec<GameBody>>> {
    let GamesQuery { genre_id, limit } = query.into_inner();
    let limit = parse_limit(limit, ResultLimit::GAMES)?;
    let games = state.games.games(genre_id.map(GenreId::new), limit).await?;
    Ok(web::Json(games.into_iter().map(GameBody::from).collect()))
}

#[utoipa::path(
    get,
    path = "/games/{game_id}",
    params(("game_id" = i32, Path)),
    responses(
        (status = 200, description = "Game with review statistics", body = GameDetailsBody),
        (status = 404, description = "Game does not exist", body = ErrorSchema)
    ),
    tags = ["games"],
    operation_id = "getGame"
)]
#[get("/games/{game_id}")]
pub async fn get_game(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<GameDetailsBody>> {
    let details = state.games.game(GameId::new(path.into_inner())).await?;
    Ok(web::Json(details.into()))
}

/// Register every `/games` handler. Literal segments go before
/// `/games/{game_id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_genre)
        .service(list_genres)
        .service(create_game)
        .service(list_games)
        .service(get_game);
}
