use actix_web::{web, HttpResponse};

use super::{ErrorResponse, UserError};
use crate::{
    domain::{User, UserPayload},
    store::UserStore,
};

/// Create a user
///
/// Fields missing from the body are stored as empty strings.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = UserPayload,
    responses(
        (status = 200, description = "The stored user, including generated fields", body = User),
        (status = 400, description = "Body is not a valid user", body = ErrorResponse),
    )
)]
#[tracing::instrument(name = "Creating a user", skip(body, store))]
pub async fn create_user(
    body: web::Bytes,
    store: web::Data<UserStore>,
) -> Result<HttpResponse, UserError> {
    let payload = UserPayload::parse(&body).map_err(UserError::ValidationError)?;
    let user = store.insert(payload.into_new_user()).await?;
    tracing::info!(user_id = user.id, "User created");
    Ok(HttpResponse::Ok().json(user))
}
