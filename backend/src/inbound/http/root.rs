//! Welcome endpoint served without an API key.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const WELCOME_MESSAGE: &str = "Socialize in the Society for Gamers";

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct WelcomeBody {
    #[schema(example = "Socialize in the Society for Gamers")]
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/",
    tags = ["root"],
    security([]),
    responses((status = 200, description = "Welcome message", body = WelcomeBody)),
    operation_id = "root"
)]
#[get("/")]
pub async fn root() -> web::Json<WelcomeBody> {
    web::Json(WelcomeBody {
        message: WELCOME_MESSAGE.to_owned(),
    })
}
