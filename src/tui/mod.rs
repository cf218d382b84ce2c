//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the form,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! ```text
//! key ──▶ FormViewState ──FormEvent::Submit──▶ validate ──▶ update(Submit)
//!                                                               │
//!             ┌────────────── Effect::SpawnDelivery ◀───────────┘
//!             ▼
//!       tokio task: deliver() ──Action::DeliveryFinished──▶ mpsc ──▶ update()
//!                                                                     │
//!       tokio task: sleep(notice) ◀── Effect::ScheduleDismiss ◀───────┘
//!             └──Action::NotificationExpired(id)──▶ mpsc ──▶ update()
//! ```
//!
//! ## Redraw Strategy
//!
//! Draws only after an event or a background action. The poll timeout drops
//! to ~100ms while a send is in flight or a banner is up so results and
//! expiries show promptly, and sits at 500ms otherwise.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::Provider;
use crate::core::action::{Action, Effect, update};
use crate::core::config::{ConfigError, ResolvedConfig};
use crate::core::form::FormSnapshot;
use crate::core::state::App;
use crate::delivery::{
    Credentials, DeliveryOutcome, DeliveryProvider, DeliveryRequest, DryRunProvider,
    EmailJsProvider, deliver,
};
use crate::tui::component::EventHandler;
use crate::tui::components::{FormEvent, FormViewState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ACTIVE_POLL: Duration = Duration::from_millis(100);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub form_view: FormViewState,
    /// Why the last submit was refused, shown until the next edit.
    pub validation_hint: Option<String>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            form_view: FormViewState::new(),
            validation_hint: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Hide);
    }
}

/// Build the delivery provider and the credentials it will be handed.
///
/// EmailJS refuses to start without a full set of credentials. The dry run
/// takes whatever is configured and fills the gaps with placeholders.
pub fn build_provider(
    config: &ResolvedConfig,
) -> Result<(Arc<dyn DeliveryProvider>, Credentials), ConfigError> {
    match config.provider {
        Provider::EmailJs => {
            let credentials = config.credentials()?;
            let provider = EmailJsProvider::new(Some(config.emailjs_base_url.clone()));
            Ok((Arc::new(provider), credentials))
        }
        Provider::DryRun => {
            let credentials = config.credentials().unwrap_or_else(|_| Credentials {
                service_id: "dry-run".to_string(),
                template_id: "dry-run".to_string(),
                public_key: "dry-run".to_string(),
                private_key: None,
            });
            Ok((Arc::new(DryRunProvider), credentials))
        }
    }
}

pub fn run(
    provider: Arc<dyn DeliveryProvider>,
    credentials: Credentials,
    config: &ResolvedConfig,
) -> std::io::Result<()> {
    let mut app = App::from_config(provider, credentials, config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new()
        .inspect_err(|e| warn!("Failed to enable terminal modes: {}", e))
        .ok();

    let result = event_loop(&mut terminal, &mut app, &mut tui);

    drop(terminal_mode_guard);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
) -> std::io::Result<()> {
    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, app, tui))?;
            needs_redraw = false;
        }

        let timeout = if app.loading || app.notification.is_visible() {
            ACTIVE_POLL
        } else {
            IDLE_POLL
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let effect = handle_event(app, tui, event);
            if apply_effect(effect, app, &tx) {
                return Ok(());
            }
        }

        // Handle background task actions (delivery results, banner expiry)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(app, action);
            if apply_effect(effect, app, &tx) {
                return Ok(());
            }
        }
    }
}

/// Route one terminal event. Returns the effect for the adapter to carry out.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    match event {
        TuiEvent::Resize => Effect::None,
        TuiEvent::ForceQuit => update(app, Action::Quit),
        // Esc closes the banner first, quits otherwise
        TuiEvent::Escape if app.notification.is_visible() => {
            update(app, Action::DismissNotification)
        }
        TuiEvent::Escape => update(app, Action::Quit),
        event => match tui.form_view.handle_event(&event, &mut app.form) {
            Some(FormEvent::Submit) => submit(app, tui),
            Some(FormEvent::Edited) => {
                tui.validation_hint = None;
                Effect::None
            }
            None => Effect::None,
        },
    }
}

/// Check the fields the way a browser would before handing off to core.
fn submit(app: &mut App, tui: &mut TuiState) -> Effect {
    if !app.loading
        && let Err(e) = app.form.validate()
    {
        debug!("Submit blocked: {:?}", e);
        tui.form_view.focus_field(e.field());
        tui.validation_hint = Some(e.to_string());
        return Effect::None;
    }
    tui.validation_hint = None;
    update(app, Action::Submit)
}

/// Carry out an effect. Returns true when the app should exit.
fn apply_effect(effect: Effect, app: &App, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::SpawnDelivery(fields) => {
            spawn_delivery(app, fields, tx.clone());
            false
        }
        Effect::ScheduleDismiss { id, after } => {
            schedule_dismiss(id, after, tx.clone());
            false
        }
        Effect::Quit => true,
    }
}

fn spawn_delivery(app: &App, fields: FormSnapshot, tx: mpsc::Sender<Action>) {
    info!("Spawning delivery via {}", app.delivery.name());

    let provider = app.delivery.clone();
    let credentials = app.credentials.clone();
    let timeout = app.delivery_timeout;

    tokio::spawn(async move {
        let request = DeliveryRequest {
            credentials: &credentials,
            fields: &fields,
        };
        let outcome = DeliveryOutcome::from(deliver(provider.as_ref(), request, timeout).await);
        if tx.send(Action::DeliveryFinished(outcome)).is_err() {
            warn!("Failed to send delivery outcome: receiver dropped");
        }
    });
}

fn schedule_dismiss(id: u64, after: Duration, tx: mpsc::Sender<Action>) {
    debug!("Banner {} expires in {}ms", id, after.as_millis());
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        // The loop may be gone by now; nothing left to dismiss then
        let _ = tx.send(Action::NotificationExpired(id));
    });
}
