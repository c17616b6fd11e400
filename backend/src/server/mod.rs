//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use mockable::Clock;
use tracing::info;

use gamer_society::Trace;
#[cfg(debug_assertions)]
use gamer_society::doc::ApiDoc;
use gamer_society::inbound::http::health::HealthState;
use gamer_society::inbound::http::state::{HttpState, HttpStatePorts};
use gamer_society::inbound::http::{configure_api, configure_extractors, configure_public};
use gamer_society::middleware::{API_KEY_HEADER, ApiKeyGuard};
use gamer_society::outbound::persistence::{
    DbPool, DieselFeedRepository, DieselFriendshipRepository, DieselGameRepository,
    DieselRecommendationRepository, DieselReviewRepository, DieselUserRepository,
};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

const CORS_MAX_AGE_SECS: usize = 3600;

fn build_http_state(pool: &DbPool, clock: Arc<dyn Clock>) -> web::Data<HttpState> {
    let ports = HttpStatePorts {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        friendships: Arc::new(DieselFriendshipRepository::new(pool.clone())),
        games: Arc::new(DieselGameRepository::new(pool.clone())),
        reviews: Arc::new(DieselReviewRepository::new(pool.clone())),
        feed: Arc::new(DieselFeedRepository::new(pool.clone())),
        recommendations: Arc::new(DieselRecommendationRepository::new(pool.clone())),
    };
    web::Data::new(HttpState::new(ports, clock))
}

fn build_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins.iter().fold(
        Cors::default()
            .allowed_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allowed_headers([
                header::CONTENT_TYPE,
                header::HeaderName::from_static(API_KEY_HEADER),
            ])
            .max_age(CORS_MAX_AGE_SECS),
        |cors, origin| cors.allowed_origin(origin),
    )
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    guard: ApiKeyGuard,
    allowed_origins: Arc<[String]>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        guard,
        allowed_origins,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(build_cors(&allowed_origins))
        .wrap(Trace)
        .configure(configure_extractors)
        .configure(configure_public);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    // Empty prefix: every route not registered above goes through the guard.
    app.service(web::scope("").wrap(guard).configure(configure_api))
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        api_key,
        bind_addr,
        db_pool,
        allowed_origins,
        clock,
    } = config;

    info!(api_key_fingerprint = %api_key.fingerprint(), %bind_addr, "starting HTTP server");

    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: build_http_state(&db_pool, clock),
        guard: ApiKeyGuard::new(api_key),
        allowed_origins: allowed_origins.into(),
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
