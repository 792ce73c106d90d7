//! Rendering of a single user as a card-shaped display tree.

pub mod card;
pub mod date;
pub mod tree;

pub use card::UserCard;
pub use date::{ChronoDateFormatter, DateFormatter, DEFAULT_DATE_FORMAT};
pub use tree::{Action, Button, Element, Node, Tag};
