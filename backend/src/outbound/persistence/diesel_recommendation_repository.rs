//! PostgreSQL-backed `RecommendationRepository` implementation using Diesel
//! ORM.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{RecommendationRepository, RecommendationRepositoryError};
use crate::domain::{LIKED_SCORE_THRESHOLD, RecommendationCandidate, UserId};

use super::diesel_error_mapping::{port_error_mappers, user_exists};
use super::diesel_game_repository::row_to_game;
use super::models::GameWithGenreRow;
use super::pool::DbPool;
use super::schema::{games, genres, reviews};

port_error_mappers!(RecommendationRepositoryError);

/// Diesel-backed implementation of the [`RecommendationRepository`] port.
#[derive(Clone)]
pub struct DieselRecommendationRepository {
    pool: DbPool,
}

impl DieselRecommendationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

type CandidateRows = (Vec<GameWithGenreRow>, Vec<(i32, i32)>);

#[async_trait]
impl RecommendationRepository for DieselRecommendationRepository {
    async fn candidates(
        &self,
        user_id: UserId,
    ) -> Result<Option<Vec<RecommendationCandidate>>, RecommendationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let found: Option<CandidateRows> = conn
            .transaction(|conn| {
                async move {
                    if !user_exists(conn, user_id.get()).await? {
                        return Ok(None);
                    }
                    let liked_genres: Vec<i32> = reviews::table
                        .inner_join(games::table)
                        .filter(reviews::user_id.eq(user_id.get()))
                        .filter(reviews::score.ge(LIKED_SCORE_THRESHOLD))
                        .select(games::genre_id)
                        .distinct()
                        .load(conn)
                        .await?;
                    if liked_genres.is_empty() {
                        return Ok(Some((Vec::new(), Vec::new())));
                    }
                    let reviewed: Vec<i32> = reviews::table
                        .filter(reviews::user_id.eq(user_id.get()))
                        .select(reviews::game_id)
                        .load(conn)
                        .await?;
                    let games: Vec<GameWithGenreRow> = games::table
                        .inner_join(genres::table)
                        .filter(games::genre_id.eq_any(&liked_genres))
                        .filter(games::id.ne_all(&reviewed))
                        .select((games::id, games::game, games::genre_id, genres::genre))
                        .load(conn)
                        .await?;
                    let game_ids: Vec<i32> = games.iter().map(|game| game.id).collect();
                    let peer_scores: Vec<(i32, i32)> = reviews::table
                        .filter(reviews::game_id.eq_any(&game_ids))
                        .filter(reviews::user_id.ne(user_id.get()))
                        .select((reviews::game_id, reviews::score))
                        .load(conn)
                        .await?;
                    Ok(Some((games, peer_scores)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(found.map(|(games, peer_scores)| {
            let mut scores_by_game: HashMap<i32, Vec<i32>> = HashMap::new();
            for (game_id, score) in peer_scores {
                scores_by_game.entry(game_id).or_default().push(score);
            }
            games
                .into_iter()
                .map(|row| RecommendationCandidate {
                    peer_scores: scores_by_game.remove(&row.id).unwrap_or_default(),
                    game: row_to_game(row),
                })
                .collect()
        }))
    }
}
