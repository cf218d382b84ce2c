//! # Actions
//!
//! Everything that can happen to the form becomes an `Action`.
//! User presses Enter on the message? That's `Action::Submit`.
//! EmailJS answers? That's `Action::DeliveryFinished(outcome)`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` describing any I/O the
//! adapter must perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable without a terminal or a network.

use log::{debug, info};
use std::time::Duration;

use crate::core::form::FormSnapshot;
use crate::core::notification::Notification;
use crate::core::state::App;
use crate::delivery::DeliveryOutcome;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Send the current form contents.
    Submit,
    /// The delivery task resolved.
    DeliveryFinished(DeliveryOutcome),
    /// User closed the banner.
    DismissNotification,
    /// An auto-dismiss timer fired for the banner with this id.
    NotificationExpired(u64),
    Quit,
}

/// I/O requested by `update()`, carried out by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Hand these fields to the delivery provider.
    SpawnDelivery(FormSnapshot),
    /// Send `NotificationExpired(id)` back after `after`.
    ScheduleDismiss { id: u64, after: Duration },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit => {
            if app.loading {
                debug!("Submit ignored: a send is already in flight");
                return Effect::None;
            }
            app.loading = true;
            app.status_message = "Sending...".to_string();
            info!("Submitting contact form");
            Effect::SpawnDelivery(app.form.snapshot())
        }
        Action::DeliveryFinished(outcome) => {
            app.loading = false;
            let id = app.next_notification_id;
            app.next_notification_id += 1;
            app.notification = match outcome {
                DeliveryOutcome::Delivered => {
                    app.form.reset();
                    app.status_message = "Message sent".to_string();
                    Notification::Success { id }
                }
                DeliveryOutcome::Failed => {
                    app.status_message = "Message not sent".to_string();
                    Notification::Failure { id }
                }
            };
            info!("Delivery finished: {:?} (notification id={})", outcome, id);
            Effect::ScheduleDismiss {
                id,
                after: app.notice_duration,
            }
        }
        Action::DismissNotification => {
            app.notification = Notification::Hidden;
            Effect::None
        }
        Action::NotificationExpired(id) => {
            if app.notification.expire(id) {
                debug!("Notification {} auto-dismissed", id);
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
