//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a
//! migration changes a table, regenerate with `diesel print-schema` or edit
//! by hand.

diesel::table! {
    /// Registered players.
    users (id) {
        id -> Int4,
        username -> Varchar,
        /// Hides the account from other players when set.
        account_is_private -> Bool,
    }
}

diesel::table! {
    /// Directed friendship edges: `user_adding_id` added `user_added_id`.
    friends (user_adding_id, user_added_id) {
        user_adding_id -> Int4,
        user_added_id -> Int4,
    }
}

diesel::table! {
    genres (id) {
        id -> Int4,
        genre -> Varchar,
    }
}

diesel::table! {
    games (id) {
        id -> Int4,
        /// Title of the game.
        game -> Varchar,
        genre_id -> Int4,
    }
}

diesel::table! {
    reviews (id) {
        id -> Int4,
        score -> Int4,
        text -> Text,
        published -> Bool,
        user_id -> Int4,
        game_id -> Int4,
        /// Refreshed by the `diesel_manage_updated_at` trigger.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-aspect ratings attached to a review.
    optional_reviews (id) {
        id -> Int4,
        review_name -> Varchar,
        optional_rating -> Int4,
        review_id -> Int4,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Accumulated play time per user and game.
    history (user_id, game_id) {
        user_id -> Int4,
        game_id -> Int4,
        time_played -> Float8,
        last_played -> Timestamptz,
    }
}

diesel::table! {
    comments (comment_id) {
        comment_id -> Int4,
        review_id -> Int4,
        user_id -> Int4,
        text -> Text,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Named integer settings per user.
    settings (id, user_id) {
        id -> Int4,
        user_id -> Int4,
        name -> Varchar,
        value -> Int4,
    }
}

diesel::joinable!(games -> genres (genre_id));
diesel::joinable!(reviews -> games (game_id));
diesel::joinable!(reviews -> users (user_id));
diesel::joinable!(optional_reviews -> reviews (review_id));
diesel::joinable!(comments -> reviews (review_id));
diesel::joinable!(history -> games (game_id));
diesel::joinable!(settings -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    comments,
    friends,
    games,
    genres,
    history,
    optional_reviews,
    reviews,
    settings,
    users,
);
