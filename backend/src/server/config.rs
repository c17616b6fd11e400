//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use gamer_society::middleware::ApiKey;
use gamer_society::outbound::persistence::DbPool;
use mockable::{Clock, DefaultClock};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) api_key: ApiKey,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) allowed_origins: Vec<String>,
    pub(crate) clock: Arc<dyn Clock>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(api_key: ApiKey, bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            api_key,
            bind_addr,
            db_pool,
            allowed_origins: Vec::new(),
            clock: Arc::new(DefaultClock),
        }
    }

    /// Origins allowed to call the API from a browser. Empty means none.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }
}
