//! Capability trait over the environment hosting the test page.
//!
//! Production hosts wrap the browser's screen-enumeration and test-driver
//! surfaces; tests use the scripted [`crate::test_support::MockHost`]. The
//! harness only ever talks to the host through this trait, so everything it
//! needs from the outside world is injected at construction.

use async_trait::async_trait;

use crate::{
    Result,
    geom::{Screen, WindowBounds},
};

/// Identifier a host uses to name one of its windows.
pub type WindowId = u32;

/// Host-provided multi-screen window-placement surface.
#[async_trait]
pub trait Host: Send + Sync {
    /// True when the screen-enumeration capability is present at all.
    fn screen_enumeration_supported(&self) -> bool;

    /// True when more than one screen is attached to the desktop.
    fn is_extended(&self) -> bool;

    /// Enumerate the attached screens.
    async fn screens(&self) -> Vec<Screen>;

    /// Screen the host currently assigns `window` to, if known.
    async fn current_screen(&self, window: WindowId) -> Option<Screen>;

    /// Outer bounds the host currently reports for `window`, if known.
    async fn window_bounds(&self, window: WindowId) -> Option<WindowBounds>;

    /// Ask the automation driver to grant the window-management permission.
    ///
    /// Fails when no driver is attached; the harness decides whether that is
    /// fatal based on its [`crate::AutomationMode`].
    async fn grant_permission(&self) -> Result<()>;

    /// Ask the automation driver to click the rendered button `label`.
    async fn dispatch_click(&self, label: &str) -> Result<()>;

    /// Wait until a click on `label` is observed, driver-delivered or manual.
    async fn await_click(&self, label: &str);
}
