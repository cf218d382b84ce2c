//! # Application State
//!
//! Core business state for Missive. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── delivery: Arc<dyn DeliveryProvider>  // where forms go
//! ├── credentials: Credentials             // service/template/public key
//! ├── form: ContactForm                    // the four field values
//! ├── loading: bool                        // a send is in flight
//! ├── notification: Notification          // banner: hidden/success/failure
//! ├── next_notification_id: u64           // stamps each banner
//! ├── status_message: String              // status line text
//! ├── notice_duration: Duration           // banner auto-dismiss delay
//! ├── delivery_timeout: Duration          // deadline for one send
//! └── page: PageCopy                      // title/description/heading
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::core::config::{
    DEFAULT_DELIVERY_TIMEOUT_SECS, DEFAULT_NOTICE_DURATION_MS, PageCopy, ResolvedConfig,
};
use crate::core::form::ContactForm;
use crate::core::notification::Notification;
use crate::delivery::{Credentials, DeliveryProvider};
use std::sync::Arc;
use std::time::Duration;

pub struct App {
    pub delivery: Arc<dyn DeliveryProvider>,
    pub credentials: Credentials,
    pub form: ContactForm,
    pub loading: bool,
    pub notification: Notification,
    pub next_notification_id: u64,
    pub status_message: String,
    pub notice_duration: Duration,
    pub delivery_timeout: Duration,
    pub page: PageCopy,
}

impl App {
    pub fn new(delivery: Arc<dyn DeliveryProvider>, credentials: Credentials) -> Self {
        Self {
            delivery,
            credentials,
            form: ContactForm::new(),
            loading: false,
            notification: Notification::Hidden,
            next_notification_id: 0,
            status_message: String::new(),
            notice_duration: Duration::from_millis(DEFAULT_NOTICE_DURATION_MS),
            delivery_timeout: Duration::from_secs(DEFAULT_DELIVERY_TIMEOUT_SECS),
            page: PageCopy::default(),
        }
    }

    pub fn from_config(
        delivery: Arc<dyn DeliveryProvider>,
        credentials: Credentials,
        config: &ResolvedConfig,
    ) -> Self {
        Self {
            notice_duration: config.notice_duration,
            delivery_timeout: config.delivery_timeout,
            page: config.page.clone(),
            ..Self::new(delivery, credentials)
        }
    }

    /// Label for the submit control.
    pub fn submit_label(&self) -> &'static str {
        if self.loading { "Sending..." } else { "Send" }
    }
}
