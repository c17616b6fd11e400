//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test as actix_test, web};
use serde_json::Value;

use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::test_support::{InMemoryStore, fixture_clock};

/// Build handler state where every port is served by the same store.
pub fn state_over(store: &Arc<InMemoryStore>) -> web::Data<HttpState> {
    let ports = HttpStatePorts {
        users: store.clone(),
        friendships: store.clone(),
        games: store.clone(),
        reviews: store.clone(),
        feed: store.clone(),
        recommendations: store.clone(),
    };
    web::Data::new(HttpState::new(ports, fixture_clock()))
}

/// Send a request and decode the JSON response alongside its status.
pub async fn call_json<S, B>(
    app: &S,
    request: actix_test::TestRequest,
) -> (actix_web::http::StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON response body")
    };
    (status, value)
}
