//! Game catalogue use-cases.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::GameRepository;
use crate::domain::service_support::map_game_repository_error;
use crate::domain::{
    Error, Game, GameDetails, GameId, Genre, GenreId, GenreName, NewGame, ResultLimit,
};

/// Service behind the `/games` endpoints.
#[derive(Clone)]
pub struct GameService {
    games: Arc<dyn GameRepository>,
}

impl GameService {
    pub fn new(games: Arc<dyn GameRepository>) -> Self {
        Self { games }
    }

    pub async fn create_genre(&self, name: GenreName) -> Result<GenreId, Error> {
        let genre_id = self
            .games
            .create_genre(&name)
            .await
            .map_err(map_game_repository_error)?;
        info!(genre_id = %genre_id, "genre created");
        Ok(genre_id)
    }

    pub async fn genres(&self) -> Result<Vec<Genre>, Error> {
        self.games
            .list_genres()
            .await
            .map_err(map_game_repository_error)
    }

    /// Add a game to an existing genre.
    pub async fn create_game(&self, game: NewGame) -> Result<GameId, Error> {
        let game_id = self
            .games
            .create_game(&game)
            .await
            .map_err(map_game_repository_error)?
            .ok_or_else(|| Error::not_found(format!("genre {} not found", game.genre_id)))?;
        info!(game_id = %game_id, "game created");
        Ok(game_id)
    }

    pub async fn game(&self, game_id: GameId) -> Result<GameDetails, Error> {
        self.games
            .find_game(game_id)
            .await
            .map_err(map_game_repository_error)?
            .ok_or_else(|| Error::not_found(format!("game {game_id} not found")))
    }

    pub async fn games(
        &self,
        genre_id: Option<GenreId>,
        limit: ResultLimit,
    ) -> Result<Vec<Game>, Error> {
        self.games
            .list_games(genre_id, limit)
            .await
            .map_err(map_game_repository_error)
    }
}
