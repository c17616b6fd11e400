//! Integer identifiers for persisted entities.
//!
//! Each table uses a serial primary key. Wrapping them in distinct newtypes
//! keeps a `GameId` from being passed where a `UserId` is expected.

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw database identifier.
            #[must_use]
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// Raw identifier as stored in PostgreSQL.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a row in `users`.
    UserId
);
define_id!(
    /// Identifier of a row in `games`.
    GameId
);
define_id!(
    /// Identifier of a row in `genres`.
    GenreId
);
define_id!(
    /// Identifier of a row in `reviews`.
    ReviewId
);
define_id!(
    /// Identifier of a row in `optional_reviews`.
    OptionalReviewId
);
define_id!(
    /// Identifier of a row in `comments`.
    CommentId
);
