mod api_docs;
mod user;

pub use api_docs::*;
pub use user::*;
