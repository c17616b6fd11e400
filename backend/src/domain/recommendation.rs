//! Game recommendations derived from a user's well-rated genres.
//!
//! Storage supplies the candidate set: games in a genre the user rated 7 or
//! higher that the user has not reviewed, each with the scores other users
//! gave it. Ranking happens here so it can be tested without a database.

use std::cmp::Ordering;

use super::{Game, ResultLimit, game::mean};

/// Review score from which a genre counts as liked.
pub const LIKED_SCORE_THRESHOLD: i32 = 7;

/// Unranked game eligible for recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationCandidate {
    pub game: Game,
    /// Scores from reviews written by other users.
    pub peer_scores: Vec<i32>,
}

/// Ranked recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub game: Game,
    pub average_score: Option<f64>,
}

/// Order candidates by peer average (best first, unrated last), then by
/// title, and keep the first `limit`.
pub fn rank_candidates(
    candidates: Vec<RecommendationCandidate>,
    limit: ResultLimit,
) -> Vec<Recommendation> {
    let mut ranked: Vec<Recommendation> = candidates
        .into_iter()
        .map(|candidate| Recommendation {
            average_score: mean(&candidate.peer_scores),
            game: candidate.game,
        })
        .collect();
    ranked.sort_by(|left, right| {
        compare_averages(left.average_score, right.average_score)
            .then_with(|| left.game.title.cmp(&right.game.title))
    });
    ranked.truncate(limit.as_usize());
    ranked
}

fn compare_averages(left: Option<f64>, right: Option<f64>) -> Ordering {
    match (left, right) {
        (Some(l), Some(r)) => r.total_cmp(&l),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
