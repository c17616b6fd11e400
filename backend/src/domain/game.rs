//! Games and the genres they belong to.

use std::fmt;

use super::{GameId, GenreId};

/// Maximum genre name length in characters.
pub const GENRE_NAME_MAX: usize = 50;
/// Maximum game title length in characters.
pub const GAME_TITLE_MAX: usize = 100;

/// Validation failures for catalogue payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameValidationError {
    BlankGenre,
    GenreTooLong { max: usize },
    BlankTitle,
    TitleTooLong { max: usize },
}

impl fmt::Display for GameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankGenre => write!(f, "genre must not be blank"),
            Self::GenreTooLong { max } => write!(f, "genre must be at most {max} characters"),
            Self::BlankTitle => write!(f, "title must not be blank"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
        }
    }
}

impl std::error::Error for GameValidationError {}

fn bounded(
    raw: String,
    max: usize,
    blank: GameValidationError,
    too_long: GameValidationError,
) -> Result<String, GameValidationError> {
    if raw.trim().is_empty() {
        return Err(blank);
    }
    if raw.chars().count() > max {
        return Err(too_long);
    }
    Ok(raw)
}

/// Genre label such as "Roguelike".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreName(String);

impl GenreName {
    pub fn new(name: impl Into<String>) -> Result<Self, GameValidationError> {
        bounded(
            name.into(),
            GENRE_NAME_MAX,
            GameValidationError::BlankGenre,
            GameValidationError::GenreTooLong {
                max: GENRE_NAME_MAX,
            },
        )
        .map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Game title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameTitle(String);

impl GameTitle {
    pub fn new(title: impl Into<String>) -> Result<Self, GameValidationError> {
        bounded(
            title.into(),
            GAME_TITLE_MAX,
            GameValidationError::BlankTitle,
            GameValidationError::TitleTooLong {
                max: GAME_TITLE_MAX,
            },
        )
        .map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Stored genre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// Validated game awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub title: GameTitle,
    pub genre_id: GenreId,
}

/// Stored game joined with its genre name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: GameId,
    pub title: String,
    pub genre_id: GenreId,
    pub genre: String,
}

/// Game with aggregate review statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct GameDetails {
    pub game: Game,
    /// Mean of every review score, or `None` when nobody reviewed the game.
    pub average_score: Option<f64>,
    pub review_count: usize,
}

impl GameDetails {
    /// Build details from the raw review scores of a game.
    pub fn from_scores(game: Game, scores: &[i32]) -> Self {
        Self {
            game,
            average_score: mean(scores),
            review_count: scores.len(),
        }
    }
}

/// Arithmetic mean of integer scores.
pub(crate) fn mean(scores: &[i32]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let total: f64 = scores.iter().copied().map(f64::from).sum();
    let count = u32::try_from(scores.len()).ok()?;
    Some(total / f64::from(count))
}
