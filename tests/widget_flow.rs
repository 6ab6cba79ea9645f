//! End-to-end flows through the public API, without a real terminal.
//!
//! Mirrors what the event loop does: dispatch actions, reconcile
//! subscriptions, and apply only live subscription events.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use ratatui::backend::TestBackend;
use ratatui::layout::{Position, Rect};
use ratatui::Terminal;

use number_gauge::platform::ColorSchemeSource;
use number_gauge::random::RandomSource;
use number_gauge::tui::layout::{compute_layout, Regions};
use number_gauge::tui::run::{dispatch, pointer_actions};
use number_gauge::tui::state::{Action, App, AppEvent};
use number_gauge::tui::subscriptions::Subscriptions;
use number_gauge::tui::update::on_tick;
use number_gauge::tui::view::render;
use number_gauge::types::{ColorScheme, ResolvedTheme, RunConfig, Theme};

struct Switch(AtomicBool);

impl ColorSchemeSource for Switch {
    fn prefers_dark(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

struct Constant(f64);

impl RandomSource for Constant {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

fn fast_config(theme: Theme) -> RunConfig {
    RunConfig {
        interval: Duration::from_millis(10),
        scheme_poll: Duration::from_millis(10),
        initial_theme: theme,
        ..RunConfig::default()
    }
}

fn area() -> Rect {
    Rect::new(0, 0, 80, 24)
}

fn regions(app: &App) -> Regions {
    compute_layout(area(), &app.state)
}

fn next_tick(rx: &mpsc::Receiver<AppEvent>) -> u64 {
    loop {
        match rx.recv_timeout(Duration::from_secs(2)) {
            Ok(AppEvent::Tick { token }) => return token,
            Ok(_) => continue,
            Err(e) => panic!("no tick: {:?}", e),
        }
    }
}

#[test]
fn pausing_stops_automatic_changes_and_resuming_restarts_them() {
    let source = Arc::new(Switch(AtomicBool::new(false)));
    let config = fast_config(Theme::Dark);
    let (tx, rx) = mpsc::channel();
    let mut app = App::new(10, &config, ColorScheme::Light);
    let mut subs = Subscriptions::new(tx, &config, source.clone());
    subs.reconcile(&app.state, &regions(&app), app.scheme);

    // A live tick changes the number.
    let token = next_tick(&rx);
    assert!(subs.is_live_tick(token));
    app.state = on_tick(app.state, 77);
    assert_eq!(app.state.number, 77);

    // Pause: the ticker is cancelled and its token goes stale.
    dispatch(&mut app, &Action::TogglePlay, source.as_ref(), &mut Constant(0.0));
    subs.reconcile(&app.state, &regions(&app), app.scheme);
    assert!(!app.state.is_running);
    assert!(!subs.is_live_tick(token));
    assert_eq!(subs.ticker_token(), None);

    // Resume: a fresh ticker with a fresh token.
    dispatch(&mut app, &Action::TogglePlay, source.as_ref(), &mut Constant(0.0));
    subs.reconcile(&app.state, &regions(&app), app.scheme);
    let resumed = subs.ticker_token().expect("ticker restarted");
    assert_ne!(resumed, token);
    loop {
        let t = next_tick(&rx);
        if subs.is_live_tick(t) {
            break;
        }
    }

    subs.cancel_all();
}

#[test]
fn generate_now_leaves_ticker_schedule_alone() {
    let source = Arc::new(Switch(AtomicBool::new(false)));
    let config = fast_config(Theme::Dark);
    let (tx, _rx) = mpsc::channel();
    let mut app = App::new(10, &config, ColorScheme::Light);
    let mut subs = Subscriptions::new(tx, &config, source.clone());
    subs.reconcile(&app.state, &regions(&app), app.scheme);
    let before = subs.ticker_token();

    dispatch(&mut app, &Action::GenerateNow, source.as_ref(), &mut Constant(0.5));
    subs.reconcile(&app.state, &regions(&app), app.scheme);

    assert_eq!(app.state.number, 50);
    assert!(app.state.is_running);
    assert_eq!(subs.ticker_token(), before);
}

#[test]
fn system_theme_tracks_preference_until_another_theme_is_chosen() {
    let source = Arc::new(Switch(AtomicBool::new(false)));
    let config = fast_config(Theme::System);
    let (tx, rx) = mpsc::channel();
    let mut app = App::new(10, &config, source.scheme());
    app.state.is_running = false;
    let mut subs = Subscriptions::new(tx, &config, source.clone());
    subs.reconcile(&app.state, &regions(&app), app.scheme);
    assert_eq!(app.scope.marker(), Some(ResolvedTheme::Light));

    // OS flips to dark: the watcher reports it and the marker follows.
    source.0.store(true, Ordering::SeqCst);
    let (token, scheme) = loop {
        match rx.recv_timeout(Duration::from_secs(2)) {
            Ok(AppEvent::SchemeChanged { token, scheme }) => break (token, scheme),
            Ok(_) => continue,
            Err(e) => panic!("no scheme change: {:?}", e),
        }
    };
    assert!(subs.is_live_scheme(token));
    app.set_scheme(scheme);
    assert_eq!(app.scope.marker(), Some(ResolvedTheme::Dark));

    // Choosing High Contrast stops the watcher; old events go stale.
    dispatch(
        &mut app,
        &Action::SelectTheme(Theme::HighContrast),
        source.as_ref(),
        &mut Constant(0.0),
    );
    subs.reconcile(&app.state, &regions(&app), app.scheme);
    assert_eq!(subs.scheme_token(), None);
    assert!(!subs.is_live_scheme(token));
    assert_eq!(app.scope.marker(), Some(ResolvedTheme::HighContrast));
}

#[test]
fn outside_click_closes_menu_but_inside_click_does_not() {
    let source = Arc::new(Switch(AtomicBool::new(false)));
    let config = fast_config(Theme::Dark);
    let (tx, _rx) = mpsc::channel();
    let mut app = App::new(10, &config, ColorScheme::Light);
    app.state.is_running = false;
    let mut subs = Subscriptions::new(tx, &config, source.clone());

    dispatch(&mut app, &Action::ToggleMenu, source.as_ref(), &mut Constant(0.0));
    let open = regions(&app);
    subs.reconcile(&app.state, &open, app.scheme);
    assert!(subs.outside().is_armed());

    // Inside: the divider row belongs to the menu and has no action.
    let divider = open.divider.unwrap();
    let inside = crossterm_down(Position::new(divider.x + divider.width / 2, divider.y));
    for action in pointer_actions(&inside, &open, subs.outside()) {
        dispatch(&mut app, &action, source.as_ref(), &mut Constant(0.0));
    }
    assert!(app.state.menu.is_open());

    // Outside: top-left corner of the screen.
    let outside = crossterm_down(Position::new(0, 0));
    for action in pointer_actions(&outside, &open, subs.outside()) {
        dispatch(&mut app, &action, source.as_ref(), &mut Constant(0.0));
    }
    assert!(!app.state.menu.is_open());

    subs.reconcile(&app.state, &regions(&app), app.scheme);
    assert!(!subs.outside().is_armed());
}

#[test]
fn gauge_toggle_from_menu_hides_gauge_and_keeps_everything_else() {
    let source = Arc::new(Switch(AtomicBool::new(false)));
    let config = fast_config(Theme::Light);
    let mut app = App::new(64, &config, ColorScheme::Light);
    dispatch(&mut app, &Action::ToggleMenu, source.as_ref(), &mut Constant(0.0));
    dispatch(&mut app, &Action::MenuActivate, source.as_ref(), &mut Constant(0.0));

    assert!(!app.state.show_gauge);
    assert!(!app.state.menu.is_open());
    assert_eq!(app.state.number, 64);
    assert!(app.state.is_running);
    assert_eq!(app.state.theme, Theme::Light);

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|frame| {
        render(&app, frame);
    })
    .unwrap();
    let text: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol().to_string())
        .collect();
    assert!(!text.contains("64%"));
}

fn crossterm_down(pos: Position) -> crossterm::event::MouseEvent {
    crossterm::event::MouseEvent {
        kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
        column: pos.x,
        row: pos.y,
        modifiers: crossterm::event::KeyModifiers::NONE,
    }
}
