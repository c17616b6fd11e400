//! User account, friendship and activity use-cases.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    AddFriendOutcome, FriendshipRepository, PlayRecordOutcome, UserRepository,
};
use crate::domain::service_support::{
    map_friendship_repository_error, map_user_repository_error, user_not_found,
};
use crate::domain::{
    AccountSettings, Error, GameId, PlaySession, ResultLimit, ReviewSummary, TimePlayed, UserId,
    UserSettings,
};

/// Service behind the `/user` endpoints.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    friendships: Arc<dyn FriendshipRepository>,
    clock: Arc<dyn Clock>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        friendships: Arc<dyn FriendshipRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            friendships,
            clock,
        }
    }

    /// Register a user and return the generated id.
    pub async fn create_user(&self, settings: AccountSettings) -> Result<UserId, Error> {
        let user_id = self
            .users
            .create(&settings)
            .await
            .map_err(map_user_repository_error)?;
        info!(user_id = %user_id, "user created");
        Ok(user_id)
    }

    /// Record that `user_id` added `friend_id`.
    ///
    /// The adding user is checked first, so a request naming two unknown
    /// users reports the adder.
    pub async fn add_friend(&self, user_id: UserId, friend_id: UserId) -> Result<(), Error> {
        let outcome = self
            .friendships
            .add(user_id, friend_id)
            .await
            .map_err(map_friendship_repository_error)?;
        match outcome {
            AddFriendOutcome::Added => {
                info!(user_id = %user_id, friend_id = %friend_id, "friend added");
                Ok(())
            }
            AddFriendOutcome::AlreadyFriends => Err(Error::conflict(format!(
                "user {user_id} already added user {friend_id}"
            ))),
            AddFriendOutcome::UserMissing => Err(user_not_found(user_id)),
            AddFriendOutcome::FriendMissing => {
                Err(Error::not_found(format!("friend {friend_id} not found")))
            }
        }
    }

    /// Usernames the user has added.
    pub async fn friends_added_by(&self, user_id: UserId) -> Result<Vec<String>, Error> {
        self.friendships
            .added_by(user_id)
            .await
            .map_err(map_friendship_repository_error)?
            .ok_or_else(|| user_not_found(user_id))
    }

    /// Usernames of users who added this user.
    pub async fn friends_adding(&self, user_id: UserId) -> Result<Vec<String>, Error> {
        self.friendships
            .adding(user_id)
            .await
            .map_err(map_friendship_repository_error)?
            .ok_or_else(|| user_not_found(user_id))
    }

    /// Settings as a list holding zero or one entry.
    ///
    /// An unknown user yields an empty list rather than an error.
    pub async fn settings(&self, user_id: UserId) -> Result<Vec<UserSettings>, Error> {
        let settings = self
            .users
            .settings(user_id)
            .await
            .map_err(map_user_repository_error)?;
        Ok(settings.into_iter().collect())
    }

    pub async fn edit_settings(
        &self,
        user_id: UserId,
        settings: AccountSettings,
    ) -> Result<(), Error> {
        let updated = self
            .users
            .update_settings(user_id, &settings)
            .await
            .map_err(map_user_repository_error)?;
        if !updated {
            return Err(user_not_found(user_id));
        }
        info!(user_id = %user_id, "user settings updated");
        Ok(())
    }

    /// The user's reviews, most recently updated first.
    pub async fn history(
        &self,
        user_id: UserId,
        limit: ResultLimit,
    ) -> Result<Vec<ReviewSummary>, Error> {
        self.users
            .recent_reviews(user_id, limit)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| user_not_found(user_id))
    }

    /// The user's five best-scored reviews.
    pub async fn favourites(&self, user_id: UserId) -> Result<Vec<ReviewSummary>, Error> {
        self.users
            .top_reviews(user_id, ResultLimit::FAVOURITES)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| user_not_found(user_id))
    }

    /// Fold a play session into the user's history, stamped with the
    /// current time.
    pub async fn record_play(
        &self,
        user_id: UserId,
        game_id: GameId,
        time_played: TimePlayed,
    ) -> Result<(), Error> {
        let session = PlaySession {
            user_id,
            game_id,
            time_played,
            played_at: self.clock.utc(),
        };
        let outcome = self
            .users
            .record_play(&session)
            .await
            .map_err(map_user_repository_error)?;
        match outcome {
            PlayRecordOutcome::Recorded => {
                info!(user_id = %user_id, game_id = %game_id, "play recorded");
                Ok(())
            }
            PlayRecordOutcome::UserMissing => Err(user_not_found(user_id)),
            PlayRecordOutcome::GameMissing => {
                Err(Error::not_found(format!("game {game_id} not found")))
            }
        }
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
