//! Port for the game catalogue.

use async_trait::async_trait;

use crate::domain::{Game, GameDetails, GameId, Genre, GenreId, GenreName, NewGame, ResultLimit};

use super::define_port_error;

define_port_error! {
    /// Errors raised by game repository adapters.
    pub enum GameRepositoryError for "game repository"
}

/// Port for games and genres.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn create_genre(&self, name: &GenreName) -> Result<GenreId, GameRepositoryError>;

    /// All genres ordered by name.
    async fn list_genres(&self) -> Result<Vec<Genre>, GameRepositoryError>;

    /// Insert a game. Returns `None` when the referenced genre is missing.
    async fn create_game(&self, game: &NewGame) -> Result<Option<GameId>, GameRepositoryError>;

    /// Game with review statistics across all of its reviews.
    async fn find_game(&self, game_id: GameId)
    -> Result<Option<GameDetails>, GameRepositoryError>;

    /// Games ordered by title, optionally restricted to one genre.
    async fn list_games(
        &self,
        genre_id: Option<GenreId>,
        limit: ResultLimit,
    ) -> Result<Vec<Game>, GameRepositoryError>;
}
