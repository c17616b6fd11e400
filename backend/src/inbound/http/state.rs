//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    FeedRepository, FriendshipRepository, GameRepository, RecommendationRepository,
    ReviewRepository, UserRepository,
};
use crate::domain::{
    AdminService, FeedService, GameService, RecommendationService, ReviewService, UserService,
};

/// Parameter object bundling one adapter per repository port.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UserRepository>,
    pub friendships: Arc<dyn FriendshipRepository>,
    pub games: Arc<dyn GameRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub feed: Arc<dyn FeedRepository>,
    pub recommendations: Arc<dyn RecommendationRepository>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: UserService,
    pub games: GameService,
    pub reviews: ReviewService,
    pub feed: FeedService,
    pub recommendations: RecommendationService,
    pub admin: AdminService,
}

impl HttpState {
    /// Wire every service over the given ports.
    ///
    /// The clock stamps play sessions and anchors the feed window.
    pub fn new(ports: HttpStatePorts, clock: Arc<dyn Clock>) -> Self {
        let HttpStatePorts {
            users,
            friendships,
            games,
            reviews,
            feed,
            recommendations,
        } = ports;
        Self {
            users: UserService::new(users, friendships, Arc::clone(&clock)),
            games: GameService::new(games),
            admin: AdminService::new(Arc::clone(&reviews)),
            reviews: ReviewService::new(reviews),
            feed: FeedService::new(feed, clock),
            recommendations: RecommendationService::new(recommendations),
        }
    }
}
