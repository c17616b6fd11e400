//! PostgreSQL-backed `FriendshipRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::UserId;
use crate::domain::ports::{AddFriendOutcome, FriendshipRepository, FriendshipRepositoryError};

use super::diesel_error_mapping::{port_error_mappers, user_exists};
use super::models::NewFriendRow;
use super::pool::DbPool;
use super::schema::{friends, users};

port_error_mappers!(FriendshipRepositoryError);

/// Diesel-backed implementation of the [`FriendshipRepository`] port.
#[derive(Clone)]
pub struct DieselFriendshipRepository {
    pool: DbPool,
}

impl DieselFriendshipRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FriendshipRepository for DieselFriendshipRepository {
    async fn add(
        &self,
        user_id: UserId,
        friend_id: UserId,
    ) -> Result<AddFriendOutcome, FriendshipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewFriendRow {
            user_adding_id: user_id.get(),
            user_added_id: friend_id.get(),
        };

        conn.transaction(|conn| {
            async move {
                if !user_exists(conn, row.user_adding_id).await? {
                    return Ok(AddFriendOutcome::UserMissing);
                }
                if !user_exists(conn, row.user_added_id).await? {
                    return Ok(AddFriendOutcome::FriendMissing);
                }
                // The composite primary key makes a repeated edge a no-op.
                let inserted = diesel::insert_into(friends::table)
                    .values(&row)
                    .on_conflict_do_nothing()
                    .execute(conn)
                    .await?;
                Ok(if inserted == 0 {
                    AddFriendOutcome::AlreadyFriends
                } else {
                    AddFriendOutcome::Added
                })
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn added_by(
        &self,
        user_id: UserId,
    ) -> Result<Option<Vec<String>>, FriendshipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                if !user_exists(conn, user_id.get()).await? {
                    return Ok(None);
                }
                let names: Vec<String> = friends::table
                    .inner_join(users::table.on(users::id.eq(friends::user_added_id)))
                    .filter(friends::user_adding_id.eq(user_id.get()))
                    .order_by(users::username)
                    .select(users::username)
                    .load(conn)
                    .await?;
                Ok(Some(names))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn adding(
        &self,
        user_id: UserId,
    ) -> Result<Option<Vec<String>>, FriendshipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                if !user_exists(conn, user_id.get()).await? {
                    return Ok(None);
                }
                let names: Vec<String> = friends::table
                    .inner_join(users::table.on(users::id.eq(friends::user_adding_id)))
                    .filter(friends::user_added_id.eq(user_id.get()))
                    .order_by(users::username)
                    .select(users::username)
                    .load(conn)
                    .await?;
                Ok(Some(names))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
