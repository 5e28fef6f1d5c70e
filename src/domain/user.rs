use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Store-assigned primary key.
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Present only once the record has been soft-deleted.
    #[serde(
        rename = "deleted_at",
        default,
        skip_serializing_if = "Lifecycle::is_active"
    )]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub lifecycle: Lifecycle,
    pub name: String,
    pub email: String,
    /// Optimistic concurrency token, never exposed over the API.
    #[serde(skip)]
    pub version: i64,
}

/// Whether a record is live or soft-deleted.
///
/// On the wire this is the optional `deleted_at` timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "Option<DateTime<Utc>>",
    into = "Option<DateTime<Utc>>"
)]
pub enum Lifecycle {
    #[default]
    Active,
    Deleted {
        at: DateTime<Utc>,
    },
}

impl Lifecycle {
    pub fn is_active(&self) -> bool {
        matches!(self, Lifecycle::Active)
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Lifecycle::Active => None,
            Lifecycle::Deleted { at } => Some(*at),
        }
    }
}

impl From<Option<DateTime<Utc>>> for Lifecycle {
    fn from(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(at) => Lifecycle::Deleted { at },
            None => Lifecycle::Active,
        }
    }
}

impl From<Lifecycle> for Option<DateTime<Utc>> {
    fn from(lifecycle: Lifecycle) -> Self {
        lifecycle.deleted_at()
    }
}

/// Fields a client may set on a user.
///
/// `id` and the timestamps are type-checked but their values are ignored;
/// the store assigns them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct UserPayload {
    #[serde(default, rename = "id")]
    _id: Option<u64>,
    #[serde(default, rename = "created_at")]
    _created_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "updated_at")]
    _updated_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "deleted_at")]
    _deleted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// The values handed to the store when inserting a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl UserPayload {
    /// A JSON `null` body is treated like `{}`.
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        let payload: Option<Self> = serde_json::from_slice(body)?;
        Ok(payload.unwrap_or_default())
    }

    /// Missing fields become empty strings.
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
        }
    }

    /// Overwrite the fields present in the payload, leaving the rest alone.
    pub fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
    }
}
