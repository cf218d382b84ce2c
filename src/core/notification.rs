//! # Notifications
//!
//! The banner shown after a send attempt. One tagged value instead of a pair
//! of flags, so success and failure can never be up at the same time.
//!
//! ```text
//! Hidden ──DeliveryFinished──▶ Success{id} / Failure{id}
//!   ▲                                  │
//!   └──── Dismiss  |  Expired(id) ─────┘
//! ```
//!
//! Every banner carries an `id`. Auto-dismiss timers report the `id` they
//! were scheduled for, and only the banner with that `id` is hidden.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notification {
    #[default]
    Hidden,
    Success { id: u64 },
    Failure { id: u64 },
}

impl Notification {
    pub const SUCCESS_TEXT: &'static str = "Email sent successfully!";
    pub const FAILURE_TEXT: &'static str = "Failed to send email. Please try again later.";

    pub fn is_visible(&self) -> bool {
        !matches!(self, Notification::Hidden)
    }

    pub fn id(&self) -> Option<u64> {
        match self {
            Notification::Hidden => None,
            Notification::Success { id } | Notification::Failure { id } => Some(*id),
        }
    }

    pub fn text(&self) -> Option<&'static str> {
        match self {
            Notification::Hidden => None,
            Notification::Success { .. } => Some(Self::SUCCESS_TEXT),
            Notification::Failure { .. } => Some(Self::FAILURE_TEXT),
        }
    }

    /// Hide the banner if it is still the one the timer was set for.
    /// Returns whether anything changed.
    pub fn expire(&mut self, id: u64) -> bool {
        if self.id() == Some(id) {
            *self = Notification::Hidden;
            true
        } else {
            false
        }
    }
}
