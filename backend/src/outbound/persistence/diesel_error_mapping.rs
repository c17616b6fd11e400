//! Shared Diesel error mapping and existence probes for repositories.
//!
//! Every repository port exposes the same `Connection`/`Query` pair, so the
//! mapping is written once against constructor functions.

use diesel::dsl::exists;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use super::pool::PoolError;
use super::schema::{games, genres, reviews, users};

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.into_message())
}

/// Map Diesel errors into query/connection constructors.
///
/// A closed connection is a connection failure; everything else is a query
/// failure. Messages are generic; details go to the debug log only.
pub(crate) fn map_basic_diesel_error<E, Q, C>(
    error: diesel::result::Error,
    query: Q,
    connection: C,
) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// Generate the `map_pool_error`/`map_diesel_error` pair for a port error.
macro_rules! port_error_mappers {
    ($error:ty) => {
        fn map_pool_error(error: $crate::outbound::persistence::pool::PoolError) -> $error {
            $crate::outbound::persistence::diesel_error_mapping::map_basic_pool_error(
                error,
                <$error>::connection,
            )
        }

        fn map_diesel_error(error: diesel::result::Error) -> $error {
            $crate::outbound::persistence::diesel_error_mapping::map_basic_diesel_error(
                error,
                <$error>::query,
                <$error>::connection,
            )
        }
    };
}

pub(crate) use port_error_mappers;

pub(crate) async fn user_exists<C>(conn: &mut C, user_id: i32) -> QueryResult<bool>
where
    C: AsyncConnection<Backend = Pg> + Send,
{
    diesel::select(exists(users::table.filter(users::id.eq(user_id))))
        .get_result(conn)
        .await
}

pub(crate) async fn game_exists<C>(conn: &mut C, game_id: i32) -> QueryResult<bool>
where
    C: AsyncConnection<Backend = Pg> + Send,
{
    diesel::select(exists(games::table.filter(games::id.eq(game_id))))
        .get_result(conn)
        .await
}

pub(crate) async fn genre_exists<C>(conn: &mut C, genre_id: i32) -> QueryResult<bool>
where
    C: AsyncConnection<Backend = Pg> + Send,
{
    diesel::select(exists(genres::table.filter(genres::id.eq(genre_id))))
        .get_result(conn)
        .await
}

pub(crate) async fn review_exists<C>(conn: &mut C, review_id: i32) -> QueryResult<bool>
where
    C: AsyncConnection<Backend = Pg> + Send,
{
    diesel::select(exists(reviews::table.filter(reviews::id.eq(review_id))))
        .get_result(conn)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::UserRepositoryError;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    port_error_mappers!(UserRepositoryError);

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, UserRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn closed_connections_become_connection_errors() {
        let err = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        ));
        assert_eq!(
            err,
            UserRepositoryError::connection("database connection error")
        );
    }

    #[rstest]
    fn other_failures_become_query_errors() {
        assert_eq!(
            map_diesel_error(DieselError::NotFound),
            UserRepositoryError::query("record not found")
        );
        assert_eq!(
            map_diesel_error(DieselError::RollbackTransaction),
            UserRepositoryError::query("database error")
        );
    }
}
