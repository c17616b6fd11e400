//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{comments, friends, games, genres, history, optional_reviews, reviews, users};

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub account_is_private: bool,
}

/// Changeset applied by the settings edit.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserSettingsUpdate<'a> {
    pub username: &'a str,
    pub account_is_private: bool,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = friends)]
pub(crate) struct NewFriendRow {
    pub user_adding_id: i32,
    pub user_added_id: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = genres)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GenreRow {
    pub id: i32,
    pub genre: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = genres)]
pub(crate) struct NewGenreRow<'a> {
    pub genre: &'a str,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = games)]
pub(crate) struct NewGameRow<'a> {
    pub game: &'a str,
    pub genre_id: i32,
}

/// Game joined with its genre name.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct GameWithGenreRow {
    pub id: i32,
    pub game: String,
    pub genre_id: i32,
    pub genre: String,
}

/// Row struct for reading from the reviews table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewRow {
    pub id: i32,
    pub score: i32,
    pub text: String,
    pub published: bool,
    pub user_id: i32,
    pub game_id: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reviews)]
pub(crate) struct NewReviewRow<'a> {
    pub score: i32,
    pub text: &'a str,
    pub published: bool,
    pub user_id: i32,
    pub game_id: i32,
}

/// Changeset for a review edit. `updated_at` is left to the trigger.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = reviews)]
pub(crate) struct ReviewUpdate<'a> {
    pub score: i32,
    pub text: &'a str,
    pub published: bool,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = optional_reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OptionalReviewRow {
    pub review_name: String,
    pub optional_rating: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = optional_reviews)]
pub(crate) struct NewOptionalReviewRow<'a> {
    pub review_name: &'a str,
    pub optional_rating: i32,
    pub review_id: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = history)]
pub(crate) struct NewHistoryRow {
    pub user_id: i32,
    pub game_id: i32,
    pub time_played: f64,
    pub last_played: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub comment_id: i32,
    pub review_id: i32,
    pub user_id: i32,
    pub text: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub review_id: i32,
    pub user_id: i32,
    pub text: &'a str,
}

/// Feed row before its aspect ratings are attached.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct FeedReviewRow {
    pub review_id: i32,
    pub game_title: String,
    pub username: String,
    pub score: i32,
    pub text: String,
}
