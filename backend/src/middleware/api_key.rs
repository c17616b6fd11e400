//! Shared-secret gate for the HTTP API.
//!
//! Every gated request must carry the configured key in the `access_token`
//! header. Requests without it are answered with 401 before any handler
//! runs. CORS preflights pass through untouched.
//!
//! Only the SHA-256 digest of the key is kept in memory, wiped on drop.

use std::fmt;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::Error as DomainError;

/// Request header carrying the shared key.
pub const API_KEY_HEADER: &str = "access_token";

/// Length of the logged fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Rejected key material.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiKeyError {
    #[error("API key must not be empty")]
    Empty,
}

/// The configured shared secret.
///
/// # Examples
/// ```
/// use gamer_society::middleware::ApiKey;
///
/// let key = ApiKey::new("s3cret").expect("non-empty key");
/// assert!(key.matches("s3cret"));
/// assert!(!key.matches("guess"));
/// assert_eq!(key.fingerprint().len(), 16);
/// ```
#[derive(Clone)]
pub struct ApiKey {
    digest: Zeroizing<[u8; 32]>,
}

/// Byte-wise comparison that never exits early.
fn digests_equal(left: &[u8; 32], right: &[u8; 32]) -> bool {
    left.iter()
        .zip(right.iter())
        .fold(0_u8, |diff, (l, r)| diff | (l ^ r))
        == 0
}

fn digest(value: &[u8]) -> [u8; 32] {
    Sha256::digest(value).into()
}

impl ApiKey {
    pub fn new(secret: impl Into<String>) -> Result<Self, ApiKeyError> {
        let secret = Zeroizing::new(secret.into());
        if secret.trim().is_empty() {
            return Err(ApiKeyError::Empty);
        }
        Ok(Self {
            digest: Zeroizing::new(digest(secret.as_bytes())),
        })
    }

    /// Compare a presented value against the key.
    ///
    /// Both sides are hashed and every digest byte is visited.
    pub fn matches(&self, presented: &str) -> bool {
        digests_equal(&digest(presented.as_bytes()), &self.digest)
    }

    /// Truncated hex digest for logs, safe to print.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        self.digest
            .get(..FINGERPRINT_BYTES)
            .map(hex::encode)
            .unwrap_or_default()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

/// Middleware enforcing the `access_token` header.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use gamer_society::middleware::{ApiKey, ApiKeyGuard};
///
/// let key = ApiKey::new("s3cret").expect("non-empty key");
/// let app = App::new().service(web::scope("").wrap(ApiKeyGuard::new(key)));
/// ```
#[derive(Clone)]
pub struct ApiKeyGuard {
    key: Arc<ApiKey>,
}

impl ApiKeyGuard {
    pub fn new(key: ApiKey) -> Self {
        Self { key: Arc::new(key) }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyMiddleware {
            service,
            key: Arc::clone(&self.key),
        }))
    }
}

/// Service wrapper produced by [`ApiKeyGuard`].
pub struct ApiKeyMiddleware<S> {
    service: S,
    key: Arc<ApiKey>,
}

impl<S> ApiKeyMiddleware<S> {
    fn authorised(&self, req: &ServiceRequest) -> bool {
        if req.method() == Method::OPTIONS {
            return true;
        }
        req.headers()
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|presented| self.key.matches(presented))
    }
}

impl<S, B> Service<ServiceRequest> for ApiKeyMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if self.authorised(&req) {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        // Built inside the future so the error captures the trace id.
        Box::pin(async move {
            let header_present = req.headers().contains_key(API_KEY_HEADER);
            warn!(
                path = req.path(),
                header_present, "rejected request without a valid API key"
            );
            let error = DomainError::unauthorized("missing or invalid API key");
            Ok(req.error_response(error).map_into_right_body())
        })
    }
}
