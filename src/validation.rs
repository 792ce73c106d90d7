//! Format checks for candidate user records.
//!
//! Everything here is a pure function of its input. Failures come back as a list of
//! messages for a form to display, never as an `Err`. Uniqueness of usernames or
//! emails is the persistence layer's job and is not checked here.

use log::{debug, trace};
use regex::Regex;
use validator::Validate;

use crate::models::{CreateUserRequest, UpdateUserRequest, User};

/// Inclusive bounds on a username's length, counted in characters.
pub const USERNAME_MIN_CHARS: u64 = 3;
pub const USERNAME_MAX_CHARS: u64 = 50;

pub const USERNAME_LENGTH_MESSAGE: &str = "Username must be between 3 and 50 characters";
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email format";

// ECMAScript's `\s`: differs from Rust's Unicode `\s` on U+FEFF (included) and U+0085 (not).
const NOT_JS_SPACE_OR_AT: &str =
    r"[^\t\n\x0B\x0C\r \u{A0}\u{1680}\u{2000}-\u{200A}\u{2028}\u{2029}\u{202F}\u{205F}\u{3000}\u{FEFF}@]";

lazy_static::lazy_static! {
    // Shape check only: something@something.something, no whitespace, one '@'.
    // Accepts things like "a@b..c"; downstream relies on exactly this leniency.
    pub(crate) static ref EMAIL_REGEX: Regex = Regex::new(&format!(
        "^{c}+@{c}+\\.{c}+$",
        c = NOT_JS_SPACE_OR_AT
    ))
    .unwrap();
}

/// True iff `username` is 3 to 50 characters long. No trimming, no charset rules.
pub fn validate_username(username: &str) -> bool {
    validator::validate_length(
        username,
        Some(USERNAME_MIN_CHARS),
        Some(USERNAME_MAX_CHARS),
        None,
    )
}

/// True iff the whole of `email` matches `^[^\s@]+@[^\s@]+\.[^\s@]+$`, with `\s`
/// meaning the ECMAScript whitespace set.
pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Runs both field checks and returns the messages for the ones that failed.
///
/// The username message always comes before the email message. An empty vec means
/// the request is acceptable.
pub fn validate_user(request: &CreateUserRequest) -> Vec<String> {
    let mut errors = Vec::new();

    if let Err(failures) = request.validate() {
        let fields = failures.field_errors();
        if fields.contains_key("username") {
            errors.push(USERNAME_LENGTH_MESSAGE.to_string());
        }
        if fields.contains_key("email") {
            errors.push(INVALID_EMAIL_MESSAGE.to_string());
        }
    }

    if errors.is_empty() {
        trace!("user request for {:?} passed validation", request.username);
    } else {
        debug!("user request rejected with {} error(s)", errors.len());
    }
    errors
}

/// Merges `update` into `user` and validates the merged username and email.
///
/// `is_active` has no format rules, so an update touching only it always passes
/// as long as the stored record does.
pub fn validate_merged_update(user: &User, update: &UpdateUserRequest) -> Vec<String> {
    let merged = update.apply_to(user);
    validate_user(&CreateUserRequest::from(&merged))
}
