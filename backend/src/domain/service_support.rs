//! Translation of repository port failures into domain errors.
//!
//! Connection failures mean the pool could not hand out a connection and
//! surface as `service_unavailable`; everything else is an internal fault.

use crate::domain::Error;
use crate::domain::ports::{
    FeedRepositoryError, FriendshipRepositoryError, GameRepositoryError,
    RecommendationRepositoryError, ReviewRepositoryError, UserRepositoryError,
};

macro_rules! map_port_error {
    ($fn_name:ident, $error:ident, $label:literal) => {
        pub(crate) fn $fn_name(error: $error) -> Error {
            match error {
                $error::Connection { message } => {
                    Error::service_unavailable(format!(concat!($label, " unavailable: {}"), message))
                }
                $error::Query { message } => {
                    Error::internal(format!(concat!($label, " error: {}"), message))
                }
            }
        }
    };
}

map_port_error!(map_user_repository_error, UserRepositoryError, "user repository");
map_port_error!(
    map_friendship_repository_error,
    FriendshipRepositoryError,
    "friendship repository"
);
map_port_error!(map_game_repository_error, GameRepositoryError, "game repository");
map_port_error!(map_review_repository_error, ReviewRepositoryError, "review repository");
map_port_error!(map_feed_repository_error, FeedRepositoryError, "feed repository");
map_port_error!(
    map_recommendation_repository_error,
    RecommendationRepositoryError,
    "recommendation repository"
);

/// Build the not-found error for a missing user.
pub(crate) fn user_not_found(user_id: impl std::fmt::Display) -> Error {
    Error::not_found(format!("user {user_id} not found"))
}
