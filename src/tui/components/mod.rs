//! # TUI Components
//!
//! Everything drawn on screen is one of these.
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! Receive all data as struct fields and keep nothing between frames:
//! - `Header`: page title and description
//! - `Banner`: success/failure toast at the bottom of the screen
//!
//! ## Stateful Components (Event-Driven)
//!
//! Split into a persistent state (lives in `TuiState`) and a transient
//! wrapper built each frame with the current values as props:
//! - `TextField`: one labeled input with its own cursor and scrolling
//! - `FormView`: the card holding the four fields and the send control
//!
//! Field values are never stored here. They belong to `App::form` in core
//! and are lent to the components for one render or one event.
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── header.rs       (Title + description)
//! ├── banner.rs       (Send result toast)
//! ├── form_view.rs    (Contact card)
//! └── text_field/     (Single input, cursor, wrapping)
//! ```

mod banner;
mod form_view;
mod header;
pub mod text_field;

pub use banner::Banner;
pub use form_view::{FormEvent, FormView, FormViewState};
pub use header::Header;
