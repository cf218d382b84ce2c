use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components in this architecture follow the React pattern:
/// - They receive data via props (struct fields).
/// - They may hold internal state (cursor positions, focus).
/// - They render to a `Frame` within a given `Rect`.
///
/// # Mutability
///
/// The `render` method takes `&mut self` to allow components to:
/// 1. Update internal caches (e.g. last rendered width).
/// 2. Manage presentation state (e.g. scroll offsets) during rendering.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that handles terminal events against data it does not own.
///
/// The edited values live in core state (`App::form`), so the handler is
/// given mutable access to them for the duration of one event.
pub trait EventHandler {
    /// The data this component edits.
    type Model: ?Sized;
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(
        &mut self,
        event: &super::event::TuiEvent,
        model: &mut Self::Model,
    ) -> Option<Self::Event>;
}
