//! Social feed use-case.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::FeedRepository;
use crate::domain::service_support::{map_feed_repository_error, user_not_found};
use crate::domain::{Error, FeedEntry, ResultLimit, UserId, feed_window_start};

/// Service behind `/feed`.
///
/// The window is anchored on the injected clock so tests can pin "now".
#[derive(Clone)]
pub struct FeedService {
    feed: Arc<dyn FeedRepository>,
    clock: Arc<dyn Clock>,
}

impl FeedService {
    pub fn new(feed: Arc<dyn FeedRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { feed, clock }
    }

    /// Recent reviews by the users `viewer` added.
    pub async fn feed(&self, viewer: UserId, limit: ResultLimit) -> Result<Vec<FeedEntry>, Error> {
        let updated_after = feed_window_start(self.clock.utc());
        self.feed
            .friends_feed(viewer, updated_after, limit)
            .await
            .map_err(map_feed_repository_error)?
            .ok_or_else(|| user_not_found(viewer))
    }
}
