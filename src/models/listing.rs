use chrono::{DateTime, FixedOffset};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{User, UserStatus};
use crate::presenter::date::parse_timestamp;

/// Represents filter parameters when listing users.
///
/// Date bounds and `created_at` accept the shapes [`parse_timestamp`] reads: RFC 3339,
/// naive `YYYY-MM-DDTHH:MM:SS`, or a bare `YYYY-MM-DD`; naive values count as UTC.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilter {
    /// Keep only users in this state.
    pub status: Option<UserStatus>,
    /// Case-insensitive substring to look for in username or email.
    pub search: Option<String>,
    /// Exclusive lower bound on `created_at`.
    pub created_after: Option<String>,
    /// Exclusive upper bound on `created_at`.
    pub created_before: Option<String>,
}

impl UserFilter {
    /// Checks that the date bounds, if present, are readable timestamps.
    pub fn validate(&self) -> Result<(), AppError> {
        for bound in [&self.created_after, &self.created_before].into_iter().flatten() {
            if parse_timestamp(bound).is_none() {
                return Err(AppError::BadRequest(format!("Invalid date bound '{}'", bound)));
            }
        }
        Ok(())
    }

    pub fn matches(&self, user: &User) -> bool {
        if let Some(status) = self.status {
            if user.status() != status {
                return false;
            }
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !user.username.to_lowercase().contains(&needle)
                && !user.email.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        if self.created_after.is_none() && self.created_before.is_none() {
            return true;
        }

        let created = match parse_timestamp(&user.created_at) {
            Some(created) => created,
            None => {
                warn!("user {} has unparsable created_at {:?}", user.id, user.created_at);
                return false;
            }
        };

        bound_holds(self.created_after.as_deref(), |after| created > after)
            && bound_holds(self.created_before.as_deref(), |before| created < before)
    }

    /// Keeps the matching users, preserving input order.
    pub fn apply(&self, users: &[User]) -> Vec<User> {
        users.iter().filter(|user| self.matches(user)).cloned().collect()
    }
}

// An unparsable bound never matches; `UserFilter::validate` is where it gets reported.
fn bound_holds(bound: Option<&str>, check: impl Fn(DateTime<FixedOffset>) -> bool) -> bool {
    match bound {
        None => true,
        Some(raw) => parse_timestamp(raw).map(check).unwrap_or(false),
    }
}

/// One page of users together with the size of the full result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
    /// Number of users before pagination.
    pub total: usize,
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
}

impl UserListResponse {
    /// Slices `users` into the requested 1-based page. Page 0 is read as page 1.
    pub fn paginate(users: Vec<User>, page: usize, page_size: usize) -> Self {
        let page = page.max(1);
        let total = users.len();
        let start = (page - 1).saturating_mul(page_size);

        let users = users.into_iter().skip(start).take(page_size).collect();

        Self {
            users,
            total,
            page,
            page_size,
        }
    }
}
