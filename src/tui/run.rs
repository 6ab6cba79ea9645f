//! TUI effects boundary: event loop, terminal lifecycle, input mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, layout, view) to the real terminal via crossterm and
//! ratatui. Kept minimal: all intelligence lives in the pure layers.
//!
//! Architecture: producers feed a single mpsc channel.
//! - Input reader thread: forwards crossterm key, mouse and resize events
//! - Ticker and scheme watcher: owned by `Subscriptions`
//! The event loop handles one event to completion, redraws, then
//! reconciles subscriptions against the new state.

use std::io;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Position;
use ratatui::Terminal;
use tracing::{debug, info};

use crate::platform::{ColorSchemeSource, SystemColorScheme};
use crate::random::{draw_number, RandomSource, ThreadRngSource};
use crate::types::{RunConfig, THEME_OPTIONS};

use super::layout::{Regions, Target};
use super::state::{Action, App, AppEvent, Effect, MenuItem, Transition};
use super::subscriptions::{OutsideClickWatcher, Subscriptions};
use super::update::{on_tick, update};
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('p') => Some(Action::TogglePlay),
        KeyCode::Char('g') | KeyCode::Char('r') => Some(Action::GenerateNow),
        KeyCode::Char('m') | KeyCode::Tab => Some(Action::ToggleMenu),
        KeyCode::Char('h') => Some(Action::ToggleGauge),
        KeyCode::Esc => Some(Action::CloseMenu),

        // Menu navigation
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MenuUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MenuDown),
        KeyCode::Enter => Some(Action::MenuActivate),

        // Theme by position
        KeyCode::Char(c @ '1'..='5') => {
            let index = (c as u8 - b'1') as usize;
            THEME_OPTIONS.get(index).map(|o| Action::SelectTheme(o.key))
        }

        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

// ============================================================================
// POINTER MAPPING
// ============================================================================

/// Map a pointer-down to the actions it triggers, in order.
///
/// The outside-click watcher runs first and sees every button, so a press
/// on another control while the menu is open closes the menu and then
/// operates the control. Controls only respond to the left button.
pub fn pointer_actions(
    mouse: &MouseEvent,
    regions: &Regions,
    outside: &OutsideClickWatcher,
) -> Vec<Action> {
    let MouseEventKind::Down(button) = mouse.kind else {
        return Vec::new();
    };
    let pos = Position::new(mouse.column, mouse.row);

    let mut actions = Vec::new();
    if outside.is_outside(pos) {
        actions.push(Action::CloseMenu);
    }
    if button != MouseButton::Left {
        return actions;
    }
    match regions.hit(pos) {
        Target::PlayPause => actions.push(Action::TogglePlay),
        Target::Generate => actions.push(Action::GenerateNow),
        Target::MenuButton => actions.push(Action::ToggleMenu),
        Target::MenuItem(MenuItem::ToggleGauge) => actions.push(Action::ToggleGauge),
        Target::MenuItem(MenuItem::Theme(theme)) => actions.push(Action::SelectTheme(theme)),
        Target::MenuBody | Target::Outside => {}
    }
    actions
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode with mouse capture.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards them to the channel.
fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let forwarded = match event::read() {
                Ok(Event::Key(key)) => AppEvent::Key(key),
                Ok(Event::Mouse(mouse)) => AppEvent::Mouse(mouse),
                Ok(Event::Resize(..)) => AppEvent::Resize,
                Ok(_) => continue, // focus, paste
                Err(_) => break,
            };
            if tx.send(forwarded).is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the TUI until the user quits.
///
/// Sets up the terminal, draws the first number, and runs the event loop.
/// Every subscription is cancelled before the terminal is restored.
pub fn run(config: RunConfig) -> io::Result<()> {
    let source: Arc<dyn ColorSchemeSource> = Arc::new(SystemColorScheme);
    let mut rng = ThreadRngSource;

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_input_reader(tx.clone());

    let mut app = App::new(draw_number(&mut rng), &config, source.scheme());
    let mut subs = Subscriptions::new(tx, &config, Arc::clone(&source));
    info!(
        number = app.state.number,
        theme = app.state.theme.key(),
        running = app.state.is_running,
        "session started"
    );

    let result = event_loop(&mut terminal, &mut app, &mut subs, &rx, source.as_ref(), &mut rng);

    subs.cancel_all();
    restore_terminal()?;
    info!("session ended");
    result
}

/// Draw, reconcile, wait for one event, handle it. Repeat.
fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    subs: &mut Subscriptions,
    rx: &Receiver<AppEvent>,
    source: &dyn ColorSchemeSource,
    rng: &mut dyn RandomSource,
) -> io::Result<()> {
    loop {
        let mut regions = Regions::default();
        terminal.draw(|frame| regions = render(app, frame))?;
        subs.reconcile(&app.state, &regions, app.scheme);

        if app.should_quit {
            break;
        }

        // Block on next event from any producer
        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => break, // all senders dropped
        };

        match event {
            AppEvent::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = map_key(key) {
                    dispatch(app, &action, source, rng);
                }
            }
            AppEvent::Mouse(mouse) => {
                for action in pointer_actions(&mouse, &regions, subs.outside()) {
                    dispatch(app, &action, source, rng);
                }
            }
            AppEvent::Resize => {} // redrawn at the top of the loop
            AppEvent::Tick { token } => {
                if subs.is_live_tick(token) {
                    app.state = on_tick(app.state, draw_number(rng));
                } else {
                    debug!(token, "stale tick ignored");
                }
            }
            AppEvent::SchemeChanged { token, scheme } => {
                if subs.is_live_scheme(token) {
                    let changed = app.set_scheme(scheme);
                    debug!(?scheme, changed, "system color scheme changed");
                } else {
                    debug!(token, "stale scheme change ignored");
                }
            }
        }
    }
    Ok(())
}

// ============================================================================
// TRANSITION HANDLING
// ============================================================================

/// Apply one action to the app.
pub fn dispatch(
    app: &mut App,
    action: &Action,
    source: &dyn ColorSchemeSource,
    rng: &mut dyn RandomSource,
) {
    debug!(?action, "dispatch");
    match update(app.state, action) {
        Transition::State(next) => app.replace_state(next, source),
        Transition::Quit => app.should_quit = true,
        Transition::Effect(effect) => handle_effect(effect, app, rng),
    }
}

/// Handle a side effect requested by a pure transition.
fn handle_effect(effect: Effect, app: &mut App, rng: &mut dyn RandomSource) {
    match effect {
        Effect::Draw => app.state.set_number(draw_number(rng)),
    }
}

// ============================================================================
// TESTS
// ============================================================================
