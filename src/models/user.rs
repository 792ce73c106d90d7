use serde::{Deserialize, Serialize};
use validator::Validate;

/// A registered account, as handed to us by the external system of record.
///
/// `id` and `created_at` are assigned outside this crate and are never rewritten here.
/// `created_at` is kept as opaque text; only a [`DateFormatter`](crate::presenter::DateFormatter)
/// ever looks inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Positive identifier owned by the persistence layer.
    pub id: u32,
    /// Display name, expected to be 3 to 50 characters long.
    pub username: String,
    /// Contact address, expected to have a `local@domain.tld` shape.
    pub email: String,
    /// Creation timestamp text, usually RFC 3339.
    pub created_at: String,
    /// Whether the account is active. Records that omit it are treated as active.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl User {
    /// The display state driven by `is_active`.
    pub fn status(&self) -> UserStatus {
        UserStatus::from(self.is_active)
    }
}

/// The two mutually exclusive account states a card can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    /// Human-facing text ("Active" / "Inactive").
    pub fn label(self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
        }
    }

    /// Machine-facing name, also used as a style class ("active" / "inactive").
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

impl From<bool> for UserStatus {
    fn from(is_active: bool) -> Self {
        if is_active {
            UserStatus::Active
        } else {
            UserStatus::Inactive
        }
    }
}

/// Fields required to submit a new user. Contains validation rules for both of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,
    #[validate(regex(path = "crate::validation::EMAIL_REGEX", message = "Invalid email format"))]
    pub email: String,
}

impl CreateUserRequest {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}

impl From<&User> for CreateUserRequest {
    fn from(user: &User) -> Self {
        Self::new(user.username.clone(), user.email.clone())
    }
}

/// Partial update; `None` means "leave unchanged".
///
/// There are no rules of its own here. Merge it with [`UpdateUserRequest::apply_to`]
/// and validate the merged record instead (see
/// [`validate_merged_update`](crate::validation::validate_merged_update)).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.is_active.is_none()
    }

    /// Returns `user` with every present field replaced. `id` and `created_at` are kept.
    pub fn apply_to(&self, user: &User) -> User {
        User {
            id: user.id,
            username: self.username.clone().unwrap_or_else(|| user.username.clone()),
            email: self.email.clone().unwrap_or_else(|| user.email.clone()),
            created_at: user.created_at.clone(),
            is_active: self.is_active.unwrap_or(user.is_active),
        }
    }
}
