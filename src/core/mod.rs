//! # Core Application Logic
//!
//! This module contains Missive's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                    ┌───────────┴─────────────┐
//!                    ▼                         ▼
//!             ┌────────────┐            ┌────────────┐
//!             │    TUI     │            │  Delivery  │
//!             │  Adapter   │            │ (EmailJS)  │
//!             │ (ratatui)  │            │            │
//!             └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`form`]: Field values and native-style validation
//! - [`notification`]: The success/failure banner state
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod form;
pub mod notification;
pub mod state;
