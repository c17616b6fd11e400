//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{PlayRecordOutcome, UserRepository, UserRepositoryError};
use crate::domain::{
    AccountSettings, GameId, PlaySession, ResultLimit, ReviewSummary, UserId, UserSettings,
};

use super::diesel_error_mapping::{game_exists, port_error_mappers, user_exists};
use super::models::{NewHistoryRow, NewUserRow, ReviewRow, UserSettingsUpdate};
use super::pool::DbPool;
use super::schema::{history, reviews, users};

port_error_mappers!(UserRepositoryError);

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_summary(row: ReviewRow) -> ReviewSummary {
    ReviewSummary {
        user_id: UserId::new(row.user_id),
        game_id: GameId::new(row.game_id),
        score: row.score,
        text: row.text,
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, settings: &AccountSettings) -> Result<UserId, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            username: settings.username.as_str(),
            account_is_private: settings.is_private,
        };

        let id: i32 = conn
            .transaction(|conn| {
                async move {
                    diesel::insert_into(users::table)
                        .values(&row)
                        .returning(users::id)
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(UserId::new(id))
    }

    async fn settings(&self, user_id: UserId) -> Result<Option<UserSettings>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(String, bool)> = conn
            .transaction(|conn| {
                async move {
                    users::table
                        .find(user_id.get())
                        .select((users::username, users::account_is_private))
                        .first(conn)
                        .await
                        .optional()
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(row.map(|(username, is_private)| UserSettings {
            username,
            is_private,
        }))
    }

    async fn update_settings(
        &self,
        user_id: UserId,
        settings: &AccountSettings,
    ) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let update = UserSettingsUpdate {
            username: settings.username.as_str(),
            account_is_private: settings.is_private,
        };

        let updated: usize = conn
            .transaction(|conn| {
                async move {
                    diesel::update(users::table.find(user_id.get()))
                        .set(&update)
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn recent_reviews(
        &self,
        user_id: UserId,
        limit: ResultLimit,
    ) -> Result<Option<Vec<ReviewSummary>>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = conn
            .transaction(|conn| {
                async move {
                    if !user_exists(conn, user_id.get()).await? {
                        return Ok(None);
                    }
                    let rows: Vec<ReviewRow> = reviews::table
                        .filter(reviews::user_id.eq(user_id.get()))
                        .order_by((reviews::updated_at.desc(), reviews::id.desc()))
                        .limit(limit.as_i64())
                        .select(ReviewRow::as_select())
                        .load(conn)
                        .await?;
                    Ok(Some(rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.map(|rows| rows.into_iter().map(row_to_summary).collect()))
    }

    async fn top_reviews(
        &self,
        user_id: UserId,
        limit: ResultLimit,
    ) -> Result<Option<Vec<ReviewSummary>>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = conn
            .transaction(|conn| {
                async move {
                    if !user_exists(conn, user_id.get()).await? {
                        return Ok(None);
                    }
                    // Ties on score are broken arbitrarily by PostgreSQL.
                    let rows: Vec<ReviewRow> = reviews::table
                        .filter(reviews::user_id.eq(user_id.get()))
                        .order_by(reviews::score.desc())
                        .limit(limit.as_i64())
                        .select(ReviewRow::as_select())
                        .load(conn)
                        .await?;
                    Ok(Some(rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.map(|rows| rows.into_iter().map(row_to_summary).collect()))
    }

    async fn record_play(
        &self,
        session: &PlaySession,
    ) -> Result<PlayRecordOutcome, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewHistoryRow {
            user_id: session.user_id.get(),
            game_id: session.game_id.get(),
            time_played: session.time_played.hours(),
            last_played: session.played_at,
        };

        conn.transaction(|conn| {
            async move {
                if !user_exists(conn, row.user_id).await? {
                    return Ok(PlayRecordOutcome::UserMissing);
                }
                if !game_exists(conn, row.game_id).await? {
                    return Ok(PlayRecordOutcome::GameMissing);
                }
                diesel::insert_into(history::table)
                    .values(&row)
                    .on_conflict((history::user_id, history::game_id))
                    .do_update()
                    .set((
                        history::time_played
                            .eq(history::time_played + excluded(history::time_played)),
                        history::last_played.eq(excluded(history::last_played)),
                    ))
                    .execute(conn)
                    .await?;
                Ok(PlayRecordOutcome::Recorded)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
