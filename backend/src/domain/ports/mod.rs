//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Each repository trait exposes strongly typed errors so adapters map their
//! failures into predictable variants. Services translate those variants into
//! the domain [`Error`](crate::domain::Error).

mod macros;
pub(crate) use macros::define_port_error;

mod feed_repository;
mod friendship_repository;
mod game_repository;
mod recommendation_repository;
mod review_repository;
mod user_repository;

#[cfg(test)]
pub use feed_repository::MockFeedRepository;
pub use feed_repository::{FeedRepository, FeedRepositoryError};
#[cfg(test)]
pub use friendship_repository::MockFriendshipRepository;
pub use friendship_repository::{AddFriendOutcome, FriendshipRepository, FriendshipRepositoryError};
#[cfg(test)]
pub use game_repository::MockGameRepository;
pub use game_repository::{GameRepository, GameRepositoryError};
#[cfg(test)]
pub use recommendation_repository::MockRecommendationRepository;
pub use recommendation_repository::{RecommendationRepository, RecommendationRepositoryError};
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{
    AddCommentOutcome, CreateReviewOutcome, ReviewRepository, ReviewRepositoryError,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{PlayRecordOutcome, UserRepository, UserRepositoryError};
