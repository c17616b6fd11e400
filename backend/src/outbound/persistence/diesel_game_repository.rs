//! PostgreSQL-backed `GameRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{GameRepository, GameRepositoryError};
use crate::domain::{
    Game, GameDetails, GameId, Genre, GenreId, GenreName, NewGame, ResultLimit,
};

use super::diesel_error_mapping::{genre_exists, port_error_mappers};
use super::models::{GameWithGenreRow, GenreRow, NewGameRow, NewGenreRow};
use super::pool::DbPool;
use super::schema::{games, genres, reviews};

port_error_mappers!(GameRepositoryError);

/// Diesel-backed implementation of the [`GameRepository`] port.
#[derive(Clone)]
pub struct DieselGameRepository {
    pool: DbPool,
}

impl DieselGameRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn row_to_game(row: GameWithGenreRow) -> Game {
    Game {
        id: GameId::new(row.id),
        title: row.game,
        genre_id: GenreId::new(row.genre_id),
        genre: row.genre,
    }
}

#[async_trait]
impl GameRepository for DieselGameRepository {
    async fn create_genre(&self, name: &GenreName) -> Result<GenreId, GameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewGenreRow {
            genre: name.as_str(),
        };

        let id: i32 = conn
            .transaction(|conn| {
                async move {
                    diesel::insert_into(genres::table)
                        .values(&row)
                        .returning(genres::id)
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(GenreId::new(id))
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, GameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<GenreRow> = conn
            .transaction(|conn| {
                async move {
                    genres::table
                        .order_by((genres::genre, genres::id))
                        .select(GenreRow::as_select())
                        .load(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|row| Genre {
                id: GenreId::new(row.id),
                name: row.genre,
            })
            .collect())
    }

    async fn create_game(&self, game: &NewGame) -> Result<Option<GameId>, GameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewGameRow {
            game: game.title.as_str(),
            genre_id: game.genre_id.get(),
        };

        let id: Option<i32> = conn
            .transaction(|conn| {
                async move {
                    if !genre_exists(conn, row.genre_id).await? {
                        return Ok(None);
                    }
                    let id = diesel::insert_into(games::table)
                        .values(&row)
                        .returning(games::id)
                        .get_result(conn)
                        .await?;
                    Ok(Some(id))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(id.map(GameId::new))
    }

    async fn find_game(
        &self,
        game_id: GameId,
    ) -> Result<Option<GameDetails>, GameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let found: Option<(GameWithGenreRow, Vec<i32>)> = conn
            .transaction(|conn| {
                async move {
                    let row: Option<GameWithGenreRow> = games::table
                        .inner_join(genres::table)
                        .filter(games::id.eq(game_id.get()))
                        .select((games::id, games::game, games::genre_id, genres::genre))
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(row) = row else {
                        return Ok(None);
                    };
                    let scores: Vec<i32> = reviews::table
                        .filter(reviews::game_id.eq(game_id.get()))
                        .select(reviews::score)
                        .load(conn)
                        .await?;
                    Ok(Some((row, scores)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(found.map(|(row, scores)| GameDetails::from_scores(row_to_game(row), &scores)))
    }

    async fn list_games(
        &self,
        genre_id: Option<GenreId>,
        limit: ResultLimit,
    ) -> Result<Vec<Game>, GameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<GameWithGenreRow> = conn
            .transaction(|conn| {
                async move {
                    let mut query = games::table
                        .inner_join(genres::table)
                        .select((games::id, games::game, games::genre_id, genres::genre))
                        .order_by((games::game, games::id))
                        .limit(limit.as_i64())
                        .into_boxed();
                    if let Some(genre_id) = genre_id {
                        query = query.filter(games::genre_id.eq(genre_id.get()));
                    }
                    query.load(conn).await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_game).collect())
    }
}
