mod delete;
mod error;
mod get;
mod post;
mod put;

pub use delete::*;
pub use error::*;
pub use get::*;
pub use post::*;
pub use put::*;

use crate::{domain::User, store::UserStore};

/// Load a live user for the `{id}` path segment.
///
/// A store failure here is reported as a miss, same as an unknown or
/// malformed id. The cause is still logged.
async fn find_user(store: &UserStore, id: &str) -> Result<User, UserError> {
    match store.find_by_id(id).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(UserError::NotFoundError),
        Err(e) => {
            tracing::warn!(error = %e, "User lookup failed, reporting as not found");
            Err(UserError::NotFoundError)
        }
    }
}
