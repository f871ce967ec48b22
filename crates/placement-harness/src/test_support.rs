//! Scripted [`Host`] for exercising the harness without a real environment.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{
    Error, Result,
    geom::{Screen, WindowBounds},
    host::{Host, WindowId},
};

/// Value with an optional scripted replacement that activates once the entry
/// has been queried a given number of times.
#[derive(Debug, Default)]
struct Delayed<T> {
    /// Value currently reported.
    current: Option<T>,
    /// Replacement value and the 1-based query count it activates at.
    pending: Option<(T, usize)>,
    /// Queries answered so far.
    queries: usize,
}

impl<T: Clone> Delayed<T> {
    /// Record one query, promoting the pending value when due.
    fn answer(&mut self) -> Option<T> {
        self.queries += 1;
        if self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| self.queries >= *at)
            && let Some((value, _)) = self.pending.take()
        {
            self.current = Some(value);
        }
        self.current.clone()
    }
}

/// Scriptable host: fixed screen list, per-window assignments and bounds
/// that can change after a set number of queries, and failure toggles for
/// the driver-backed operations. Records every call for inspection.
pub struct MockHost {
    /// Whether screen enumeration is reported as present.
    supported: AtomicBool,
    /// Whether more than one screen is reported as attached.
    extended: AtomicBool,
    /// Force `grant_permission` to fail.
    fail_grant: AtomicBool,
    /// Force `dispatch_click` to fail.
    fail_click: AtomicBool,
    /// Screens returned by enumeration.
    screens: Mutex<Vec<Screen>>,
    /// Per-window current-screen answers.
    assignments: Mutex<HashMap<WindowId, Delayed<Screen>>>,
    /// Per-window bounds answers.
    bounds: Mutex<HashMap<WindowId, Delayed<WindowBounds>>>,
    /// Names of host calls in invocation order.
    calls: Mutex<Vec<String>>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHost {
    /// Create a supported, extended host with no screens scripted yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            supported: AtomicBool::new(true),
            extended: AtomicBool::new(true),
            fail_grant: AtomicBool::new(false),
            fail_click: AtomicBool::new(false),
            screens: Mutex::new(Vec::new()),
            assignments: Mutex::new(HashMap::new()),
            bounds: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Report the screen-enumeration capability as absent.
    pub fn set_unsupported(&self) {
        self.supported.store(false, Ordering::SeqCst);
    }

    /// Report a single-screen desktop.
    pub fn set_single_screen(&self) {
        self.extended.store(false, Ordering::SeqCst);
    }

    /// Make `grant_permission` fail when `fail` is set.
    pub fn set_fail_grant(&self, fail: bool) {
        self.fail_grant.store(fail, Ordering::SeqCst);
    }

    /// Make `dispatch_click` fail when `fail` is set.
    pub fn set_fail_click(&self, fail: bool) {
        self.fail_click.store(fail, Ordering::SeqCst);
    }

    /// Replace the enumerated screen list.
    pub fn set_screens(&self, screens: Vec<Screen>) {
        *self.screens.lock() = screens;
    }

    /// Assign `window` to `screen` immediately.
    pub fn set_current_screen(&self, window: WindowId, screen: Screen) {
        let mut assignments = self.assignments.lock();
        let entry = assignments.entry(window).or_default();
        entry.current = Some(screen);
        entry.pending = None;
    }

    /// Assign `window` to `screen` starting with the `at`-th query (1-based);
    /// earlier queries keep reporting the previous assignment.
    pub fn set_current_screen_after(&self, window: WindowId, screen: Screen, at: usize) {
        self.assignments.lock().entry(window).or_default().pending = Some((screen, at));
    }

    /// Report `bounds` for `window` immediately.
    pub fn set_window_bounds(&self, window: WindowId, new_bounds: WindowBounds) {
        let mut bounds = self.bounds.lock();
        let entry = bounds.entry(window).or_default();
        entry.current = Some(new_bounds);
        entry.pending = None;
    }

    /// Report `bounds` for `window` starting with the `at`-th query (1-based).
    pub fn set_window_bounds_after(&self, window: WindowId, new_bounds: WindowBounds, at: usize) {
        self.bounds.lock().entry(window).or_default().pending = Some((new_bounds, at));
    }

    /// Host calls recorded so far, in invocation order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Record one host call.
    fn note(&self, name: &str) {
        self.calls.lock().push(name.to_string());
    }
}

#[async_trait]
impl Host for MockHost {
    fn screen_enumeration_supported(&self) -> bool {
        self.supported.load(Ordering::SeqCst)
    }

    fn is_extended(&self) -> bool {
        self.extended.load(Ordering::SeqCst)
    }

    async fn screens(&self) -> Vec<Screen> {
        self.note("screens");
        self.screens.lock().clone()
    }

    async fn current_screen(&self, window: WindowId) -> Option<Screen> {
        self.note("current_screen");
        self.assignments.lock().entry(window).or_default().answer()
    }

    async fn window_bounds(&self, window: WindowId) -> Option<WindowBounds> {
        self.note("window_bounds");
        self.bounds.lock().entry(window).or_default().answer()
    }

    async fn grant_permission(&self) -> Result<()> {
        self.note("grant_permission");
        if self.fail_grant.load(Ordering::SeqCst) {
            return Err(Error::Automation("no permission driver attached".into()));
        }
        Ok(())
    }

    async fn dispatch_click(&self, label: &str) -> Result<()> {
        self.note(&format!("dispatch_click:{label}"));
        if self.fail_click.load(Ordering::SeqCst) {
            return Err(Error::Automation("no click driver attached".into()));
        }
        Ok(())
    }

    async fn await_click(&self, label: &str) {
        self.note(&format!("await_click:{label}"));
    }
}
