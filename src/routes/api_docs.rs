use actix_web::{web, HttpResponse};
use utoipa::{openapi::server::Server, OpenApi};

use crate::{
    domain::{User, UserPayload},
    routes::ErrorResponse,
    startup::ApplicationBaseUrl,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users CRUD API",
        description = "Create, read, update and soft-delete users."
    ),
    paths(
        crate::routes::create_user,
        crate::routes::get_users,
        crate::routes::get_user_by_id,
        crate::routes::update_user,
        crate::routes::delete_user,
    ),
    components(schemas(User, UserPayload, ErrorResponse)),
    tags((name = "users", description = "User management"))
)]
pub struct ApiDoc;

/// The OpenAPI document with `base_url` advertised as the server.
pub fn api_description(base_url: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(base_url)]);
    doc
}

pub async fn openapi_json(base_url: web::Data<ApplicationBaseUrl>) -> HttpResponse {
    HttpResponse::Ok().json(api_description(&base_url.0))
}
