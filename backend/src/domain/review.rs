//! Reviews, their optional aspect ratings and comments.

use chrono::{DateTime, Utc};

use super::{CommentId, GameId, ReviewId, UserId};

/// Lowest accepted score for reviews and aspects.
pub const SCORE_MIN: i32 = 1;
/// Highest accepted score for reviews and aspects.
pub const SCORE_MAX: i32 = 10;
/// Maximum review body length in characters.
pub const REVIEW_TEXT_MAX: usize = 500;
/// Maximum aspect name length in characters.
pub const ASPECT_MAX: usize = 50;
/// Maximum comment length in characters.
pub const COMMENT_TEXT_MAX: usize = 500;

/// Validation failures for review payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewValidationError {
    #[error("score must be between {SCORE_MIN} and {SCORE_MAX}, got {0}")]
    ScoreOutOfRange(i32),
    #[error("review text must be at most {REVIEW_TEXT_MAX} characters")]
    TextTooLong,
    #[error("aspect must not be blank")]
    BlankAspect,
    #[error("aspect must be at most {ASPECT_MAX} characters")]
    AspectTooLong,
    #[error("comment must not be blank")]
    BlankComment,
    #[error("comment must be at most {COMMENT_TEXT_MAX} characters")]
    CommentTooLong,
}

/// Score on the 1 to 10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score(i32);

impl Score {
    pub fn new(value: i32) -> Result<Self, ReviewValidationError> {
        if (SCORE_MIN..=SCORE_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ReviewValidationError::ScoreOutOfRange(value))
        }
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

/// Free-form review body. May be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewText(String);

impl ReviewText {
    pub fn new(text: impl Into<String>) -> Result<Self, ReviewValidationError> {
        let text = text.into();
        if text.chars().count() > REVIEW_TEXT_MAX {
            return Err(ReviewValidationError::TextTooLong);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Name of a reviewed aspect such as "story" or "soundtrack".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aspect(String);

impl Aspect {
    pub fn new(aspect: impl Into<String>) -> Result<Self, ReviewValidationError> {
        let aspect = aspect.into();
        if aspect.trim().is_empty() {
            return Err(ReviewValidationError::BlankAspect);
        }
        if aspect.chars().count() > ASPECT_MAX {
            return Err(ReviewValidationError::AspectTooLong);
        }
        Ok(Self(aspect))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Comment body attached to a review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentText(String);

impl CommentText {
    pub fn new(text: impl Into<String>) -> Result<Self, ReviewValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ReviewValidationError::BlankComment);
        }
        if text.chars().count() > COMMENT_TEXT_MAX {
            return Err(ReviewValidationError::CommentTooLong);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Validated aspect rating awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOptionalReview {
    pub aspect: Aspect,
    pub score: Score,
}

/// Validated review awaiting insertion together with its aspect ratings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub user_id: UserId,
    pub game_id: GameId,
    pub score: Score,
    pub text: ReviewText,
    pub published: bool,
    pub optional_reviews: Vec<NewOptionalReview>,
}

/// Replacement values for an existing review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEdit {
    pub score: Score,
    pub text: ReviewText,
    pub published: bool,
}

/// Stored aspect rating.
///
/// Values read back from storage are not revalidated; the 1 to 10 bound
/// applies at request time only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalReview {
    pub aspect: String,
    pub score: i32,
}

/// Compact review projection used by the history and favourites listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSummary {
    pub user_id: UserId,
    pub game_id: GameId,
    pub score: i32,
    pub text: String,
}

/// Full review with its aspect ratings.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub game_id: GameId,
    pub score: i32,
    pub text: String,
    pub published: bool,
    pub updated_at: DateTime<Utc>,
    pub optional_reviews: Vec<OptionalReview>,
}

/// Validated comment awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub user_id: UserId,
    pub text: CommentText,
}

/// Stored comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub review_id: ReviewId,
    pub user_id: UserId,
    pub text: String,
    pub updated_at: DateTime<Utc>,
}

/// Result of the two-step admin delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReviewDeletion {
    /// Whether the parent review row existed and was removed.
    pub review_deleted: bool,
    /// Number of aspect rows removed before the parent.
    pub optional_reviews_deleted: usize,
}
