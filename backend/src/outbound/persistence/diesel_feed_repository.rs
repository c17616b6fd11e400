//! PostgreSQL-backed `FeedRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{FeedRepository, FeedRepositoryError};
use crate::domain::{FeedEntry, ResultLimit, ReviewId, UserId};

use super::diesel_error_mapping::{port_error_mappers, user_exists};
use super::diesel_review_repository::row_to_optional_review;
use super::models::{FeedReviewRow, OptionalReviewRow};
use super::pool::DbPool;
use super::schema::{friends, games, optional_reviews, reviews, users};

port_error_mappers!(FeedRepositoryError);

/// Diesel-backed implementation of the [`FeedRepository`] port.
#[derive(Clone)]
pub struct DieselFeedRepository {
    pool: DbPool,
}

impl DieselFeedRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedRepository for DieselFeedRepository {
    async fn friends_feed(
        &self,
        viewer: UserId,
        updated_after: DateTime<Utc>,
        limit: ResultLimit,
    ) -> Result<Option<Vec<FeedEntry>>, FeedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                if !user_exists(conn, viewer.get()).await? {
                    return Ok(None);
                }
                let added = friends::table
                    .filter(friends::user_adding_id.eq(viewer.get()))
                    .select(friends::user_added_id);
                let rows: Vec<FeedReviewRow> = reviews::table
                    .inner_join(games::table)
                    .inner_join(users::table)
                    .filter(reviews::user_id.eq_any(added))
                    .filter(reviews::updated_at.gt(updated_after))
                    .select((
                        reviews::id,
                        games::game,
                        users::username,
                        reviews::score,
                        reviews::text,
                    ))
                    .limit(limit.as_i64())
                    .load(conn)
                    .await?;

                // One child query per review, inside the same transaction.
                let mut entries = Vec::with_capacity(rows.len());
                for row in rows {
                    let children: Vec<OptionalReviewRow> = optional_reviews::table
                        .filter(optional_reviews::review_id.eq(row.review_id))
                        .order_by(optional_reviews::id)
                        .select(OptionalReviewRow::as_select())
                        .load(conn)
                        .await?;
                    entries.push(FeedEntry {
                        review_id: ReviewId::new(row.review_id),
                        game_title: row.game_title,
                        username: row.username,
                        score: row.score,
                        description: row.text,
                        optional_reviews: children.into_iter().map(row_to_optional_review).collect(),
                    });
                }
                Ok(Some(entries))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
