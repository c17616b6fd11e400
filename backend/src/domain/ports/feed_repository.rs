//! Port for assembling a viewer's social feed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{FeedEntry, ResultLimit, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by feed repository adapters.
    pub enum FeedRepositoryError for "feed repository"
}

/// Port for reading reviews written by the people a viewer added.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedRepository: Send + Sync {
    /// Reviews authored by users `viewer` added and updated strictly after
    /// `updated_after`, each with its aspect ratings.
    ///
    /// Returns `None` when the viewer does not exist. Order is unspecified.
    async fn friends_feed(
        &self,
        viewer: UserId,
        updated_after: DateTime<Utc>,
        limit: ResultLimit,
    ) -> Result<Option<Vec<FeedEntry>>, FeedRepositoryError>;
}
