//! Test doubles shared by unit tests in `src/`.
//!
//! [`InMemoryStore`] implements every repository port over plain
//! collections so handler tests can drive whole request flows without
//! PostgreSQL. Its semantics follow the Diesel adapters: listing calls
//! return `None` for unknown users, the history upsert accumulates hours,
//! and the admin delete removes aspect ratings before the parent.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{
    AddCommentOutcome, AddFriendOutcome, CreateReviewOutcome, FeedRepository,
    FeedRepositoryError, FriendshipRepository, FriendshipRepositoryError, GameRepository,
    GameRepositoryError, PlayRecordOutcome, RecommendationRepository,
    RecommendationRepositoryError, ReviewRepository, ReviewRepositoryError, UserRepository,
    UserRepositoryError,
};
use crate::domain::{
    AccountSettings, Comment, CommentId, FeedEntry, Game, GameDetails, GameId, Genre, GenreId,
    GenreName, LIKED_SCORE_THRESHOLD, NewComment, NewGame, NewOptionalReview, NewReview,
    OptionalReview, OptionalReviewId, PlaySession, RecommendationCandidate, ResultLimit, Review,
    ReviewDeletion, ReviewEdit, ReviewId, ReviewSummary, UserId, UserSettings,
};

/// Instant every fixture clock reports.
pub fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl FixtureClock {
    pub fn at(utc_now: DateTime<Utc>) -> Self {
        Self { utc_now }
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock::at(fixture_now()))
}

#[derive(Debug, Clone)]
struct StoredUser {
    username: String,
    is_private: bool,
}

#[derive(Debug, Clone)]
struct StoredGame {
    title: String,
    genre_id: i32,
}

#[derive(Debug, Clone)]
struct StoredReview {
    user_id: i32,
    game_id: i32,
    score: i32,
    text: String,
    published: bool,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct StoredOptional {
    review_id: i32,
    aspect: String,
    score: i32,
}

#[derive(Debug, Clone)]
struct StoredComment {
    review_id: i32,
    user_id: i32,
    text: String,
    updated_at: DateTime<Utc>,
}

/// Accumulated hours and last play time for one (user, game) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryRow {
    pub time_played: f64,
    pub last_played: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    next_id: i32,
    users: BTreeMap<i32, StoredUser>,
    friends: BTreeSet<(i32, i32)>,
    genres: BTreeMap<i32, String>,
    games: BTreeMap<i32, StoredGame>,
    reviews: BTreeMap<i32, StoredReview>,
    optional_reviews: Vec<StoredOptional>,
    comments: BTreeMap<i32, StoredComment>,
    history: BTreeMap<(i32, i32), HistoryRow>,
}

impl Tables {
    fn allocate(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn game(&self, id: i32) -> Option<Game> {
        let game = self.games.get(&id)?;
        Some(Game {
            id: GameId::new(id),
            title: game.title.clone(),
            genre_id: GenreId::new(game.genre_id),
            genre: self.genres.get(&game.genre_id).cloned().unwrap_or_default(),
        })
    }

    fn optional_reviews_of(&self, review_id: i32) -> Vec<OptionalReview> {
        self.optional_reviews
            .iter()
            .filter(|row| row.review_id == review_id)
            .map(|row| OptionalReview {
                aspect: row.aspect.clone(),
                score: row.score,
            })
            .collect()
    }

    fn summaries_of(&self, user_id: i32) -> Vec<(&StoredReview, ReviewSummary)> {
        self.reviews
            .values()
            .filter(|review| review.user_id == user_id)
            .map(|review| {
                (
                    review,
                    ReviewSummary {
                        user_id: UserId::new(review.user_id),
                        game_id: GameId::new(review.game_id),
                        score: review.score,
                        text: review.text.clone(),
                    },
                )
            })
            .collect()
    }
}

/// In-memory implementation of every repository port.
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    now: DateTime<Utc>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::at(fixture_now())
    }
}

impl InMemoryStore {
    /// Store whose writes are stamped with `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            now,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("in-memory store lock")
    }

    pub fn seed_user(&self, username: &str) -> UserId {
        let mut tables = self.lock();
        let id = tables.allocate();
        tables.users.insert(
            id,
            StoredUser {
                username: username.to_owned(),
                is_private: false,
            },
        );
        UserId::new(id)
    }

    pub fn seed_friendship(&self, user: UserId, friend: UserId) {
        self.lock().friends.insert((user.get(), friend.get()));
    }

    pub fn seed_genre(&self, name: &str) -> GenreId {
        let mut tables = self.lock();
        let id = tables.allocate();
        tables.genres.insert(id, name.to_owned());
        GenreId::new(id)
    }

    pub fn seed_game(&self, title: &str, genre_id: GenreId) -> GameId {
        let mut tables = self.lock();
        let id = tables.allocate();
        tables.games.insert(
            id,
            StoredGame {
                title: title.to_owned(),
                genre_id: genre_id.get(),
            },
        );
        GameId::new(id)
    }

    pub fn seed_review(&self, user_id: UserId, game_id: GameId, score: i32) -> ReviewId {
        let now = self.now;
        let mut tables = self.lock();
        let id = tables.allocate();
        tables.reviews.insert(
            id,
            StoredReview {
                user_id: user_id.get(),
                game_id: game_id.get(),
                score,
                text: format!("review {id}"),
                published: true,
                updated_at: now,
            },
        );
        ReviewId::new(id)
    }

    pub fn seed_optional_review(&self, review_id: ReviewId, aspect: &str, score: i32) {
        let mut tables = self.lock();
        tables.optional_reviews.push(StoredOptional {
            review_id: review_id.get(),
            aspect: aspect.to_owned(),
            score,
        });
    }

    /// Move a review's `updated_at`, as a later edit would.
    pub fn set_review_updated_at(&self, review_id: ReviewId, updated_at: DateTime<Utc>) {
        if let Some(review) = self.lock().reviews.get_mut(&review_id.get()) {
            review.updated_at = updated_at;
        }
    }

    pub fn has_review(&self, review_id: ReviewId) -> bool {
        self.lock().reviews.contains_key(&review_id.get())
    }

    pub fn optional_review_count(&self, review_id: ReviewId) -> usize {
        self.lock().optional_reviews_of(review_id.get()).len()
    }

    pub fn history_row(&self, user_id: UserId, game_id: GameId) -> Option<HistoryRow> {
        self.lock()
            .history
            .get(&(user_id.get(), game_id.get()))
            .copied()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, settings: &AccountSettings) -> Result<UserId, UserRepositoryError> {
        let mut tables = self.lock();
        let id = tables.allocate();
        tables.users.insert(
            id,
            StoredUser {
                username: settings.username.as_str().to_owned(),
                is_private: settings.is_private,
            },
        );
        Ok(UserId::new(id))
    }

    async fn settings(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserSettings>, UserRepositoryError> {
        Ok(self
            .lock()
            .users
            .get(&user_id.get())
            .map(|user| UserSettings {
                username: user.username.clone(),
                is_private: user.is_private,
            }))
    }

    async fn update_settings(
        &self,
        user_id: UserId,
        settings: &AccountSettings,
    ) -> Result<bool, UserRepositoryError> {
        let mut tables = self.lock();
        let Some(user) = tables.users.get_mut(&user_id.get()) else {
            return Ok(false);
        };
        user.username = settings.username.as_str().to_owned();
        user.is_private = settings.is_private;
        Ok(true)
    }

    async fn recent_reviews(
        &self,
        user_id: UserId,
        limit: ResultLimit,
    ) -> Result<Option<Vec<ReviewSummary>>, UserRepositoryError> {
        let tables = self.lock();
        if !tables.users.contains_key(&user_id.get()) {
            return Ok(None);
        }
        let mut rows = tables.summaries_of(user_id.get());
        rows.sort_by(|(left, _), (right, _)| right.updated_at.cmp(&left.updated_at));
        Ok(Some(
            rows.into_iter()
                .take(limit.as_usize())
                .map(|(_, summary)| summary)
                .collect(),
        ))
    }

    async fn top_reviews(
        &self,
        user_id: UserId,
        limit: ResultLimit,
    ) -> Result<Option<Vec<ReviewSummary>>, UserRepositoryError> {
        let tables = self.lock();
        if !tables.users.contains_key(&user_id.get()) {
            return Ok(None);
        }
        let mut rows = tables.summaries_of(user_id.get());
        rows.sort_by(|(_, left), (_, right)| right.score.cmp(&left.score));
        Ok(Some(
            rows.into_iter()
                .take(limit.as_usize())
                .map(|(_, summary)| summary)
                .collect(),
        ))
    }

    async fn record_play(
        &self,
        session: &PlaySession,
    ) -> Result<PlayRecordOutcome, UserRepositoryError> {
        let mut tables = self.lock();
        if !tables.users.contains_key(&session.user_id.get()) {
            return Ok(PlayRecordOutcome::UserMissing);
        }
        if !tables.games.contains_key(&session.game_id.get()) {
            return Ok(PlayRecordOutcome::GameMissing);
        }
        let row = tables
            .history
            .entry((session.user_id.get(), session.game_id.get()))
            .or_insert(HistoryRow {
                time_played: 0.0,
                last_played: session.played_at,
            });
        row.time_played += session.time_played.hours();
        row.last_played = session.played_at;
        Ok(PlayRecordOutcome::Recorded)
    }
}

#[async_trait]
impl FriendshipRepository for InMemoryStore {
    async fn add(
        &self,
        user_id: UserId,
        friend_id: UserId,
    ) -> Result<AddFriendOutcome, FriendshipRepositoryError> {
        let mut tables = self.lock();
        if !tables.users.contains_key(&user_id.get()) {
            return Ok(AddFriendOutcome::UserMissing);
        }
        if !tables.users.contains_key(&friend_id.get()) {
            return Ok(AddFriendOutcome::FriendMissing);
        }
        if tables.friends.insert((user_id.get(), friend_id.get())) {
            Ok(AddFriendOutcome::Added)
        } else {
            Ok(AddFriendOutcome::AlreadyFriends)
        }
    }

    async fn added_by(
        &self,
        user_id: UserId,
    ) -> Result<Option<Vec<String>>, FriendshipRepositoryError> {
        let tables = self.lock();
        if !tables.users.contains_key(&user_id.get()) {
            return Ok(None);
        }
        let mut names: Vec<String> = tables
            .friends
            .iter()
            .filter(|(adding, _)| *adding == user_id.get())
            .filter_map(|(_, added)| tables.users.get(added))
            .map(|user| user.username.clone())
            .collect();
        names.sort();
        Ok(Some(names))
    }

    async fn adding(
        &self,
        user_id: UserId,
    ) -> Result<Option<Vec<String>>, FriendshipRepositoryError> {
        let tables = self.lock();
        if !tables.users.contains_key(&user_id.get()) {
            return Ok(None);
        }
        let mut names: Vec<String> = tables
            .friends
            .iter()
            .filter(|(_, added)| *added == user_id.get())
            .filter_map(|(adding, _)| tables.users.get(adding))
            .map(|user| user.username.clone())
            .collect();
        names.sort();
        Ok(Some(names))
    }
}

#[async_trait]
impl GameRepository for InMemoryStore {
    async fn create_genre(&self, name: &GenreName) -> Result<GenreId, GameRepositoryError> {
        let mut tables = self.lock();
        let id = tables.allocate();
        tables.genres.insert(id, name.as_str().to_owned());
        Ok(GenreId::new(id))
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, GameRepositoryError> {
        let mut genres: Vec<Genre> = self
            .lock()
            .genres
            .iter()
            .map(|(id, name)| Genre {
                id: GenreId::new(*id),
                name: name.clone(),
            })
            .collect();
        genres.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(genres)
    }

    async fn create_game(&self, game: &NewGame) -> Result<Option<GameId>, GameRepositoryError> {
        let mut tables = self.lock();
        if !tables.genres.contains_key(&game.genre_id.get()) {
            return Ok(None);
        }
        let id = tables.allocate();
        tables.games.insert(
            id,
            StoredGame {
                title: game.title.as_str().to_owned(),
                genre_id: game.genre_id.get(),
            },
        );
        Ok(Some(GameId::new(id)))
    }

    async fn find_game(
        &self,
        game_id: GameId,
    ) -> Result<Option<GameDetails>, GameRepositoryError> {
        let tables = self.lock();
        let Some(game) = tables.game(game_id.get()) else {
            return Ok(None);
        };
        let scores: Vec<i32> = tables
            .reviews
            .values()
            .filter(|review| review.game_id == game_id.get())
            .map(|review| review.score)
            .collect();
        Ok(Some(GameDetails::from_scores(game, &scores)))
    }

    async fn list_games(
        &self,
        genre_id: Option<GenreId>,
        limit: ResultLimit,
    ) -> Result<Vec<Game>, GameRepositoryError> {
        let tables = self.lock();
        let mut games: Vec<Game> = tables
            .games
            .keys()
            .filter_map(|id| tables.game(*id))
            .filter(|game| genre_id.is_none_or(|genre| game.genre_id == genre))
            .collect();
        games.sort_by(|left, right| left.title.cmp(&right.title));
        games.truncate(limit.as_usize());
        Ok(games)
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn create(
        &self,
        review: &NewReview,
    ) -> Result<CreateReviewOutcome, ReviewRepositoryError> {
        let now = self.now;
        let mut tables = self.lock();
        if !tables.users.contains_key(&review.user_id.get()) {
            return Ok(CreateReviewOutcome::UserMissing);
        }
        if !tables.games.contains_key(&review.game_id.get()) {
            return Ok(CreateReviewOutcome::GameMissing);
        }
        let id = tables.allocate();
        tables.reviews.insert(
            id,
            StoredReview {
                user_id: review.user_id.get(),
                game_id: review.game_id.get(),
                score: review.score.get(),
                text: review.text.as_str().to_owned(),
                published: review.published,
                updated_at: now,
            },
        );
        for optional in &review.optional_reviews {
            tables.optional_reviews.push(StoredOptional {
                review_id: id,
                aspect: optional.aspect.as_str().to_owned(),
                score: optional.score.get(),
            });
        }
        Ok(CreateReviewOutcome::Created(ReviewId::new(id)))
    }

    async fn find(&self, review_id: ReviewId) -> Result<Option<Review>, ReviewRepositoryError> {
        let tables = self.lock();
        Ok(tables.reviews.get(&review_id.get()).map(|review| Review {
            id: review_id,
            user_id: UserId::new(review.user_id),
            game_id: GameId::new(review.game_id),
            score: review.score,
            text: review.text.clone(),
            published: review.published,
            updated_at: review.updated_at,
            optional_reviews: tables.optional_reviews_of(review_id.get()),
        }))
    }

    async fn update(
        &self,
        review_id: ReviewId,
        edit: &ReviewEdit,
    ) -> Result<bool, ReviewRepositoryError> {
        let now = self.now;
        let mut tables = self.lock();
        let Some(review) = tables.reviews.get_mut(&review_id.get()) else {
            return Ok(false);
        };
        review.score = edit.score.get();
        review.text = edit.text.as_str().to_owned();
        review.published = edit.published;
        review.updated_at = now;
        Ok(true)
    }

    async fn add_optional(
        &self,
        review_id: ReviewId,
        optional: &NewOptionalReview,
    ) -> Result<Option<OptionalReviewId>, ReviewRepositoryError> {
        let mut tables = self.lock();
        if !tables.reviews.contains_key(&review_id.get()) {
            return Ok(None);
        }
        let id = tables.allocate();
        tables.optional_reviews.push(StoredOptional {
            review_id: review_id.get(),
            aspect: optional.aspect.as_str().to_owned(),
            score: optional.score.get(),
        });
        Ok(Some(OptionalReviewId::new(id)))
    }

    async fn add_comment(
        &self,
        review_id: ReviewId,
        comment: &NewComment,
    ) -> Result<AddCommentOutcome, ReviewRepositoryError> {
        let now = self.now;
        let mut tables = self.lock();
        if !tables.reviews.contains_key(&review_id.get()) {
            return Ok(AddCommentOutcome::ReviewMissing);
        }
        if !tables.users.contains_key(&comment.user_id.get()) {
            return Ok(AddCommentOutcome::UserMissing);
        }
        let id = tables.allocate();
        tables.comments.insert(
            id,
            StoredComment {
                review_id: review_id.get(),
                user_id: comment.user_id.get(),
                text: comment.text.as_str().to_owned(),
                updated_at: now,
            },
        );
        Ok(AddCommentOutcome::Added(CommentId::new(id)))
    }

    async fn comments(
        &self,
        review_id: ReviewId,
    ) -> Result<Option<Vec<Comment>>, ReviewRepositoryError> {
        let tables = self.lock();
        if !tables.reviews.contains_key(&review_id.get()) {
            return Ok(None);
        }
        Ok(Some(
            tables
                .comments
                .iter()
                .filter(|(_, comment)| comment.review_id == review_id.get())
                .map(|(id, comment)| Comment {
                    id: CommentId::new(*id),
                    review_id,
                    user_id: UserId::new(comment.user_id),
                    text: comment.text.clone(),
                    updated_at: comment.updated_at,
                })
                .collect(),
        ))
    }

    async fn delete_with_optional_reviews(
        &self,
        review_id: ReviewId,
    ) -> Result<ReviewDeletion, ReviewRepositoryError> {
        let mut tables = self.lock();
        let before = tables.optional_reviews.len();
        tables
            .optional_reviews
            .retain(|row| row.review_id != review_id.get());
        let optional_reviews_deleted = before - tables.optional_reviews.len();
        let review_deleted = tables.reviews.remove(&review_id.get()).is_some();
        tables
            .comments
            .retain(|_, comment| comment.review_id != review_id.get());
        Ok(ReviewDeletion {
            review_deleted,
            optional_reviews_deleted,
        })
    }
}

#[async_trait]
impl FeedRepository for InMemoryStore {
    async fn friends_feed(
        &self,
        viewer: UserId,
        updated_after: DateTime<Utc>,
        limit: ResultLimit,
    ) -> Result<Option<Vec<FeedEntry>>, FeedRepositoryError> {
        let tables = self.lock();
        if !tables.users.contains_key(&viewer.get()) {
            return Ok(None);
        }
        let entries = tables
            .reviews
            .iter()
            .filter(|(_, review)| tables.friends.contains(&(viewer.get(), review.user_id)))
            .filter(|(_, review)| review.updated_at > updated_after)
            .take(limit.as_usize())
            .map(|(id, review)| FeedEntry {
                review_id: ReviewId::new(*id),
                game_title: tables
                    .games
                    .get(&review.game_id)
                    .map(|game| game.title.clone())
                    .unwrap_or_default(),
                username: tables
                    .users
                    .get(&review.user_id)
                    .map(|user| user.username.clone())
                    .unwrap_or_default(),
                score: review.score,
                description: review.text.clone(),
                optional_reviews: tables.optional_reviews_of(*id),
            })
            .collect();
        Ok(Some(entries))
    }
}

#[async_trait]
impl RecommendationRepository for InMemoryStore {
    async fn candidates(
        &self,
        user_id: UserId,
    ) -> Result<Option<Vec<RecommendationCandidate>>, RecommendationRepositoryError> {
        let tables = self.lock();
        if !tables.users.contains_key(&user_id.get()) {
            return Ok(None);
        }
        let own: Vec<&StoredReview> = tables
            .reviews
            .values()
            .filter(|review| review.user_id == user_id.get())
            .collect();
        let reviewed: BTreeSet<i32> = own.iter().map(|review| review.game_id).collect();
        let liked_genres: BTreeSet<i32> = own
            .iter()
            .filter(|review| review.score >= LIKED_SCORE_THRESHOLD)
            .filter_map(|review| tables.games.get(&review.game_id))
            .map(|game| game.genre_id)
            .collect();

        let mut peer_scores: HashMap<i32, Vec<i32>> = HashMap::new();
        for review in tables.reviews.values() {
            peer_scores
                .entry(review.game_id)
                .or_default()
                .push(review.score);
        }

        Ok(Some(
            tables
                .games
                .iter()
                .filter(|(id, game)| {
                    liked_genres.contains(&game.genre_id) && !reviewed.contains(id)
                })
                .filter_map(|(id, _)| tables.game(*id))
                .map(|game| RecommendationCandidate {
                    peer_scores: peer_scores.remove(&game.id.get()).unwrap_or_default(),
                    game,
                })
                .collect(),
        ))
    }
}
