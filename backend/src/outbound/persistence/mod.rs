//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL through `diesel-async` and `bb8` pooling.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and
//!   domain types. Validation and error policy live in the domain.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **One transaction per call**: each repository method checks out a
//!   connection, runs its statements in a transaction and releases the
//!   connection when the guard drops.
//!
//! # Example
//!
//! ```no_run
//! use gamer_society::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), gamer_society::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/society")).await?;
//! let users = DieselUserRepository::new(pool);
//! # Ok(())
//! # }
//! ```

pub(crate) mod diesel_error_mapping;
mod diesel_feed_repository;
mod diesel_friendship_repository;
mod diesel_game_repository;
mod diesel_recommendation_repository;
mod diesel_review_repository;
mod diesel_user_repository;
mod migrations;
mod models;
pub(crate) mod pool;
mod schema;

pub use diesel_feed_repository::DieselFeedRepository;
pub use diesel_friendship_repository::DieselFriendshipRepository;
pub use diesel_game_repository::DieselGameRepository;
pub use diesel_recommendation_repository::DieselRecommendationRepository;
pub use diesel_review_repository::DieselReviewRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
