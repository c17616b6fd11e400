//! Play-time tracking.
//!
//! Every (user, game) pair owns one history row. Recording another session
//! adds to the accumulated hours and moves `last_played` forward.

use chrono::{DateTime, Utc};

use super::{GameId, UserId};

/// Rejected play-time values.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum PlayValidationError {
    #[error("time played must be a finite number, got {0}")]
    NotFinite(f64),
    #[error("time played must not be negative, got {0}")]
    Negative(f64),
}

/// Hours spent in a single session.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimePlayed(f64);

impl TimePlayed {
    pub fn new(hours: f64) -> Result<Self, PlayValidationError> {
        if !hours.is_finite() {
            return Err(PlayValidationError::NotFinite(hours));
        }
        if hours < 0.0 {
            return Err(PlayValidationError::Negative(hours));
        }
        Ok(Self(hours))
    }

    pub fn hours(self) -> f64 {
        self.0
    }
}

/// One play session to fold into a user's history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaySession {
    pub user_id: UserId,
    pub game_id: GameId,
    pub time_played: TimePlayed,
    pub played_at: DateTime<Utc>,
}
