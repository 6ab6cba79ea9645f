//! Subscriptions: the ticker, the OS scheme watcher, the outside-click watcher.
//!
//! Each is a handle whose lifetime is its subscription. Dropping a
//! handle cancels it at once. `Subscriptions::reconcile` keeps exactly
//! one handle alive per condition:
//! - one `Ticker` iff the widget is running
//! - one `SchemeWatcher` iff the theme is `System`
//! - the outside-click watcher armed iff the menu is open
//!
//! Thread-backed subscriptions stamp their events with a token. A token
//! is never reused, so events queued by a cancelled subscription are
//! recognisably stale.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use ratatui::layout::Position;
use tracing::debug;

use crate::platform::ColorSchemeSource;
use crate::types::{ColorScheme, RunConfig, Theme};

use super::layout::{MenuRegion, Regions};
use super::state::{AppEvent, DisplayState};

// ============================================================================
// PERIODIC WORKER
// ============================================================================

/// A thread that calls `on_fire` every `interval` until dropped.
///
/// The thread waits on a stop channel instead of sleeping, so dropping
/// the handle wakes it immediately. A joining worker blocks the dropper
/// until the thread has exited, including any `on_fire` still running.
/// A detached worker only signals the stop; the thread ends on its own
/// once its current `on_fire` returns.
#[derive(Debug)]
struct Periodic {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
    join_on_drop: bool,
}

impl Periodic {
    /// `on_fire` returns false to end the loop (receiver gone).
    fn spawn(interval: Duration, on_fire: impl FnMut() -> bool + Send + 'static) -> Self {
        Self::start(interval, on_fire, true)
    }

    /// Like `spawn`, but dropping does not wait for the thread.
    fn spawn_detached(interval: Duration, on_fire: impl FnMut() -> bool + Send + 'static) -> Self {
        Self::start(interval, on_fire, false)
    }

    fn start(
        interval: Duration,
        mut on_fire: impl FnMut() -> bool + Send + 'static,
        join_on_drop: bool,
    ) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    if !on_fire() {
                        break;
                    }
                }
                // explicit stop or handle dropped
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });
        Periodic {
            stop: Some(stop_tx),
            handle: Some(handle),
            join_on_drop,
        }
    }

    fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }
}

impl Drop for Periodic {
    fn drop(&mut self) {
        self.stop.take();
        let handle = self.handle.take();
        if self.join_on_drop {
            if let Some(handle) = handle {
                let _ = handle.join();
            }
        }
    }
}

// ============================================================================
// TICKER
// ============================================================================

/// Sends `AppEvent::Tick { token }` every interval.
#[derive(Debug)]
pub struct Ticker {
    token: u64,
    worker: Periodic,
}

impl Ticker {
    pub fn start(token: u64, interval: Duration, tx: Sender<AppEvent>) -> Self {
        debug!(token, ?interval, "ticker started");
        let worker = Periodic::spawn(interval, move || tx.send(AppEvent::Tick { token }).is_ok());
        Ticker { token, worker }
    }

    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        debug!(token = self.token, "ticker cancelled");
    }
}

// ============================================================================
// SCHEME WATCHER
// ============================================================================

/// Polls a `ColorSchemeSource` and sends `AppEvent::SchemeChanged` when
/// the answer differs from the previous one.
///
/// A poll can block on a helper process (`gsettings`, `defaults`), so the
/// worker is detached: dropping never waits for it. A change it reports
/// after cancellation carries a dead token and is ignored.
#[derive(Debug)]
pub struct SchemeWatcher {
    token: u64,
    _worker: Periodic,
}

impl SchemeWatcher {
    /// `initial` is the scheme already applied; only changes from it are sent.
    pub fn start(
        token: u64,
        poll: Duration,
        source: Arc<dyn ColorSchemeSource>,
        initial: ColorScheme,
        tx: Sender<AppEvent>,
    ) -> Self {
        debug!(token, ?poll, "scheme watcher started");
        let mut last = initial;
        let worker = Periodic::spawn_detached(poll, move || {
            let scheme = source.scheme();
            if scheme == last {
                return true;
            }
            last = scheme;
            tx.send(AppEvent::SchemeChanged { token, scheme }).is_ok()
        });
        SchemeWatcher {
            token,
            _worker: worker,
        }
    }

    pub fn token(&self) -> u64 {
        self.token
    }
}

impl Drop for SchemeWatcher {
    fn drop(&mut self) {
        debug!(token = self.token, "scheme watcher cancelled");
    }
}

// ============================================================================
// OUTSIDE-CLICK WATCHER
// ============================================================================

/// Reports pointer-downs outside the menu region while armed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OutsideClickWatcher {
    region: Option<MenuRegion>,
}

impl OutsideClickWatcher {
    pub fn arm(&mut self, region: MenuRegion) {
        self.region = Some(region);
    }

    pub fn disarm(&mut self) {
        self.region = None;
    }

    pub fn is_armed(&self) -> bool {
        self.region.is_some()
    }

    /// True when armed and `pos` is outside the region.
    pub fn is_outside(&self, pos: Position) -> bool {
        self.region.is_some_and(|region| !region.contains(pos))
    }
}

// ============================================================================
// RECONCILIATION
// ============================================================================

/// Owns every live subscription of the event loop.
pub struct Subscriptions {
    tx: Sender<AppEvent>,
    interval: Duration,
    scheme_poll: Duration,
    source: Arc<dyn ColorSchemeSource>,
    next_token: u64,
    ticker: Option<Ticker>,
    scheme: Option<SchemeWatcher>,
    outside: OutsideClickWatcher,
}

impl Subscriptions {
    pub fn new(tx: Sender<AppEvent>, config: &RunConfig, source: Arc<dyn ColorSchemeSource>) -> Self {
        Subscriptions {
            tx,
            interval: config.interval,
            scheme_poll: config.scheme_poll,
            source,
            next_token: 1,
            ticker: None,
            scheme: None,
            outside: OutsideClickWatcher::default(),
        }
    }

    fn fresh_token(&mut self) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        token
    }

    /// Bring subscriptions in line with `state`. Idempotent.
    ///
    /// `applied` is the scheme the app currently resolves `System` with;
    /// a new watcher only reports changes from it.
    pub fn reconcile(&mut self, state: &DisplayState, regions: &Regions, applied: ColorScheme) {
        match (state.is_running, self.ticker.is_some()) {
            (true, false) => {
                let token = self.fresh_token();
                self.ticker = Some(Ticker::start(token, self.interval, self.tx.clone()));
            }
            (false, true) => self.ticker = None,
            _ => {}
        }

        match (state.theme == Theme::System, self.scheme.is_some()) {
            (true, false) => {
                let token = self.fresh_token();
                self.scheme = Some(SchemeWatcher::start(
                    token,
                    self.scheme_poll,
                    Arc::clone(&self.source),
                    applied,
                    self.tx.clone(),
                ));
            }
            (false, true) => self.scheme = None,
            _ => {}
        }

        match regions.menu_region() {
            Some(region) if state.menu.is_open() => self.outside.arm(region),
            _ => self.outside.disarm(),
        }
    }

    /// Drop every subscription (teardown).
    pub fn cancel_all(&mut self) {
        self.ticker = None;
        self.scheme = None;
        self.outside.disarm();
    }

    pub fn ticker_token(&self) -> Option<u64> {
        self.ticker.as_ref().map(Ticker::token)
    }

    pub fn scheme_token(&self) -> Option<u64> {
        self.scheme.as_ref().map(SchemeWatcher::token)
    }

    pub fn is_live_tick(&self, token: u64) -> bool {
        self.ticker_token() == Some(token)
    }

    pub fn is_live_scheme(&self, token: u64) -> bool {
        self.scheme_token() == Some(token)
    }

    pub fn outside(&self) -> &OutsideClickWatcher {
        &self.outside
    }
}

// ============================================================================
// TESTS
// ============================================================================
