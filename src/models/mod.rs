pub mod listing;
pub mod user;

pub use listing::{UserFilter, UserListResponse};
pub use user::{CreateUserRequest, UpdateUserRequest, User, UserStatus};
