#![doc = "The `userkit` library crate."]
#![doc = ""]
#![doc = "This crate contains the user domain models, the format checks applied to new and"]
#![doc = "updated user records, and the user card presenter with its display tree."]
#![doc = "It is used by the `userkit` binary (`main.rs`) and can be embedded by any host."]

pub mod config;
pub mod error;
pub mod models;
pub mod presenter;
pub mod validation;

pub use crate::error::AppError;
pub use crate::models::{CreateUserRequest, UpdateUserRequest, User, UserStatus};
pub use crate::presenter::UserCard;
pub use crate::validation::{validate_email, validate_user, validate_username};
