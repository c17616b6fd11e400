//! Social feed entries.

use chrono::{DateTime, Duration, Utc};

use super::{OptionalReview, ReviewId};

/// Trailing window, in days, of reviews shown on the feed.
pub const FEED_WINDOW_DAYS: i64 = 30;

/// Earliest `updated_at` still visible on a feed rendered at `now`.
///
/// A review qualifies when it was updated strictly after this instant.
pub fn feed_window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(FEED_WINDOW_DAYS)
}

/// A friend's review as rendered on the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub review_id: ReviewId,
    pub game_title: String,
    pub username: String,
    pub score: i32,
    pub description: String,
    pub optional_reviews: Vec<OptionalReview>,
}
