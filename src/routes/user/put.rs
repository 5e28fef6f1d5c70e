use actix_web::{web, HttpResponse};

use super::{find_user, ErrorResponse, UserError};
use crate::{
    domain::{User, UserPayload},
    store::UserStore,
};

/// Update a user
///
/// The id is resolved before the body is looked at, so an unknown id is
/// always a 404 regardless of what was sent.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "The updated user", body = User),
        (status = 400, description = "Body is not a valid user", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse),
        (status = 409, description = "User changed between load and save", body = ErrorResponse),
    )
)]
#[tracing::instrument(name = "Updating a user", skip(id, body, store), fields(user_id = %id))]
pub async fn update_user(
    id: web::Path<String>,
    body: web::Bytes,
    store: web::Data<UserStore>,
) -> Result<HttpResponse, UserError> {
    let user = find_user(&store, &id).await?;
    let user = overwrite_user(&store, user, &body).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Lay the body over `loaded` and save it.
///
/// Fails with `ConflictError` when the row changed after `loaded` was read.
async fn overwrite_user(
    store: &UserStore,
    mut loaded: User,
    body: &[u8],
) -> Result<User, UserError> {
    let payload = UserPayload::parse(body).map_err(UserError::ValidationError)?;
    payload.apply_to(&mut loaded);
    Ok(store.save(&loaded).await?)
}
