use actix_web::{web, HttpResponse};

use super::{find_user, ErrorResponse, UserError};
use crate::{domain::User, store::UserStore};

/// Get all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All users that have not been deleted", body = [User]),
    )
)]
#[tracing::instrument(name = "Listing users", skip(store))]
pub async fn get_users(store: web::Data<UserStore>) -> Result<HttpResponse, UserError> {
    let users = store.find_all().await?;
    Ok(HttpResponse::Ok().json(users))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "No such user", body = ErrorResponse),
    )
)]
#[tracing::instrument(name = "Fetching a user", skip(id, store), fields(user_id = %id))]
pub async fn get_user_by_id(
    id: web::Path<String>,
    store: web::Data<UserStore>,
) -> Result<HttpResponse, UserError> {
    let user = find_user(&store, &id).await?;
    Ok(HttpResponse::Ok().json(user))
}
