use actix_web::{web, HttpResponse};

use super::{find_user, ErrorResponse, UserError};
use crate::store::UserStore;

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User marked as deleted"),
        (status = 404, description = "No such user", body = ErrorResponse),
    )
)]
#[tracing::instrument(name = "Deleting a user", skip(id, store), fields(user_id = %id))]
pub async fn delete_user(
    id: web::Path<String>,
    store: web::Data<UserStore>,
) -> Result<HttpResponse, UserError> {
    let user = find_user(&store, &id).await?;
    store.soft_delete(&user).await?;
    Ok(HttpResponse::NoContent().finish())
}
