use log::{debug, trace};

use crate::models::User;
use crate::presenter::date::{ChronoDateFormatter, DateFormatter};
use crate::presenter::tree::{Action, Button, Element, Node, Tag};

type EditNotifier<'a> = Box<dyn Fn(&User) + 'a>;
type DeleteNotifier<'a> = Box<dyn Fn(u32) + 'a>;

/// Read-only card for a single user, with optional edit/delete controls.
///
/// The card never edits or deletes anything itself. Activating a control only
/// reports the intent to whichever notifier was registered for it.
///
/// ```
/// use std::cell::Cell;
/// use userkit::models::User;
/// use userkit::presenter::{Action, UserCard};
///
/// let user = User {
///     id: 42,
///     username: "alice".into(),
///     email: "alice@example.com".into(),
///     created_at: "2024-01-05T10:30:00Z".into(),
///     is_active: true,
/// };
/// let deleted = Cell::new(None);
/// let card = UserCard::new(&user).on_delete(|id| deleted.set(Some(id)));
///
/// let tree = card.render();
/// card.activate(tree.button(Action::Delete).unwrap());
/// assert_eq!(deleted.get(), Some(42));
/// ```
pub struct UserCard<'a> {
    user: &'a User,
    on_edit: Option<EditNotifier<'a>>,
    on_delete: Option<DeleteNotifier<'a>>,
    show_actions: bool,
    formatter: Option<&'a dyn DateFormatter>,
}

impl<'a> UserCard<'a> {
    pub fn new(user: &'a User) -> Self {
        Self {
            user,
            on_edit: None,
            on_delete: None,
            show_actions: true,
            formatter: None,
        }
    }

    /// Called with the whole record when the edit control is activated.
    pub fn on_edit(mut self, notifier: impl Fn(&User) + 'a) -> Self {
        self.on_edit = Some(Box::new(notifier));
        self
    }

    /// Called with the user's id (only) when the delete control is activated.
    pub fn on_delete(mut self, notifier: impl Fn(u32) + 'a) -> Self {
        self.on_delete = Some(Box::new(notifier));
        self
    }

    /// Whether the action region is rendered at all. Defaults to `true`.
    pub fn show_actions(mut self, show: bool) -> Self {
        self.show_actions = show;
        self
    }

    /// Formatter for the "Joined" line. Defaults to [`ChronoDateFormatter::default`].
    pub fn date_formatter(mut self, formatter: &'a dyn DateFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn render(&self) -> Node {
        let user = self.user;
        let status = user.status();
        trace!("rendering card for user {}", user.id);

        let joined = match self.formatter {
            Some(formatter) => formatter.format_date(&user.created_at),
            None => ChronoDateFormatter::default().format_date(&user.created_at),
        };

        let header = Element::new(Tag::Div, "user-header")
            .child(Element::new(Tag::H3, "user-name").text(user.username.as_str()))
            .child(
                Element::new(Tag::Span, format!("status {}", status.as_str())).text(status.label()),
            );

        let details = Element::new(Tag::Div, "user-details")
            .child(Element::new(Tag::P, "user-email").text(user.email.as_str()))
            .child(Element::new(Tag::P, "user-created").text(format!("Joined: {}", joined)));

        let mut card = Element::new(Tag::Div, "user-card").child(header).child(details);
        if self.show_actions {
            card = card.child(self.action_region());
        }
        card.into()
    }

    fn action_region(&self) -> Element {
        let username = &self.user.username;
        Element::new(Tag::Div, "user-actions")
            .child(Button::new(
                Action::Edit,
                "btn-edit",
                format!("{} {}", Action::Edit.label(), username),
            ))
            .child(Button::new(
                Action::Delete,
                "btn-delete",
                format!("{} {}", Action::Delete.label(), username),
            ))
    }

    /// Reports the control's intent upward.
    ///
    /// Edit passes the full record, delete passes only the id. Without a matching
    /// notifier, or when this card hides its actions, nothing happens.
    pub fn activate(&self, button: &Button) {
        if !self.show_actions {
            return;
        }

        match button.action() {
            Action::Edit => {
                if let Some(notify) = &self.on_edit {
                    debug!("edit requested for user {}", self.user.id);
                    notify(self.user);
                }
            }
            Action::Delete => {
                if let Some(notify) = &self.on_delete {
                    debug!("delete requested for user {}", self.user.id);
                    notify(self.user.id);
                }
            }
        }
    }
}
