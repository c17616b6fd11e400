//! Row caps for listing endpoints.

/// Largest caller-supplied limit accepted by any listing.
pub const MAX_RESULT_LIMIT: u32 = 100;

/// Rejected limit values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("limit must be between 1 and {MAX_RESULT_LIMIT}, got {0}")]
pub struct LimitOutOfRange(pub i64);

/// Upper bound on the number of rows a listing returns.
///
/// # Examples
/// ```
/// use gamer_society::domain::ResultLimit;
///
/// let limit = ResultLimit::or_default(None, ResultLimit::HISTORY).expect("default");
/// assert_eq!(limit.get(), 10);
/// assert!(ResultLimit::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultLimit(u32);

impl ResultLimit {
    /// Default play-history length.
    pub const HISTORY: Self = Self(10);
    /// Default feed length.
    pub const FEED: Self = Self(10);
    /// Fixed favourites length.
    pub const FAVOURITES: Self = Self(5);
    /// Default number of recommendations.
    pub const RECOMMENDATIONS: Self = Self(5);
    /// Default page of games.
    pub const GAMES: Self = Self(20);

    pub fn new(value: i64) -> Result<Self, LimitOutOfRange> {
        u32::try_from(value)
            .ok()
            .filter(|limit| (1..=MAX_RESULT_LIMIT).contains(limit))
            .map(Self)
            .ok_or(LimitOutOfRange(value))
    }

    /// Validate an optional query parameter, falling back to `default`.
    pub fn or_default(value: Option<i64>, default: Self) -> Result<Self, LimitOutOfRange> {
        value.map_or(Ok(default), Self::new)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Limit as the `i64` Diesel expects for `LIMIT`.
    pub fn as_i64(self) -> i64 {
        i64::from(self.0)
    }

    /// Limit as a slice length for in-memory truncation.
    pub fn as_usize(self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }
}
