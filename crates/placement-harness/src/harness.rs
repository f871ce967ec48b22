//! Orchestration over the host: permission setup, click synchronization,
//! and the two-phase screen-assignment assertion.

use std::{sync::Arc, time::Duration};

use tokio::time::sleep;

use crate::{
    Error, Result,
    geom::{self, DEFAULT_TOLERANCE, Screen},
    host::{Host, WindowId},
    log::EventLog,
    poll::{self, PollConfig},
};

/// Whether an automation driver is expected to answer grant/click requests.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AutomationMode {
    /// A driver is attached; its failures are test failures.
    Enabled,
    /// Interactive run without a driver; driver failures are logged and
    /// swallowed, and a human answers the rendered prompts instead.
    Manual,
}

/// Tunables for one harness instance.
#[derive(Clone, Copy, Debug)]
pub struct HarnessConfig {
    /// Driver expectation for grant and click requests.
    pub automation: AutomationMode,
    /// Pacing and budget applied to every poll the harness runs.
    pub poll: PollConfig,
    /// Pixel slack for the bounds assertion.
    pub tolerance: f64,
    /// Pause before re-reading the current screen during setup; some hosts
    /// report a stale assignment immediately after enumeration.
    pub settle_delay: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            automation: AutomationMode::Enabled,
            poll: PollConfig::default(),
            tolerance: DEFAULT_TOLERANCE,
            settle_delay: Duration::from_secs(1),
        }
    }
}

/// Test-page helper bundle: host capability, log sink, and config.
pub struct Harness {
    /// Environment the helpers exercise.
    host: Arc<dyn Host>,
    /// Sink for ordered human-readable entries.
    log: Arc<dyn EventLog>,
    /// Behavioural tunables.
    config: HarnessConfig,
}

impl Harness {
    /// Build a harness over `host`, appending log entries to `log`.
    #[must_use]
    pub fn new(host: Arc<dyn Host>, log: Arc<dyn EventLog>, config: HarnessConfig) -> Self {
        Self { host, log, config }
    }

    /// Configuration this harness runs with.
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Verify the capability, obtain the permission, and enumerate screens.
    ///
    /// Fails with [`Error::Unsupported`] when the host cannot enumerate
    /// screens at all. A failed permission grant is fatal only under
    /// [`AutomationMode::Enabled`]; manual runs log it and carry on, leaving
    /// the grant to the human driving the page. Returns the screen list.
    pub async fn set_up_window_management(&self, window: WindowId) -> Result<Vec<Screen>> {
        if !self.host.screen_enumeration_supported() {
            return Err(Error::Unsupported("screen enumeration API not present"));
        }
        if !self.host.is_extended() {
            self.log
                .append("WARNING: use multiple screens for full test coverage");
        }

        if let Err(err) = self.host.grant_permission().await {
            match self.config.automation {
                AutomationMode::Enabled => return Err(err),
                AutomationMode::Manual => {
                    self.log.append(&format!("permission grant skipped: {err}"));
                }
            }
        }

        self.button_click("Request screen details").await?;

        let screens = self.host.screens().await;
        if screens.is_empty() {
            return Err(Error::Unsupported("host reported no screens"));
        }

        // Some hosts settle the current-screen answer only shortly after
        // enumeration; log it, wait, and log it again.
        self.log_current_screen(window).await;
        sleep(self.config.settle_delay).await;
        self.log_current_screen(window).await;

        Ok(screens)
    }

    /// Render a button entry, request an automated click, and wait for it.
    ///
    /// A driver failure is fatal under [`AutomationMode::Enabled`]; manual
    /// runs log it and wait for the human click instead.
    pub async fn button_click(&self, label: &str) -> Result<()> {
        self.log.append(&format!("button: {label}"));
        if let Err(err) = self.host.dispatch_click(label).await {
            match self.config.automation {
                AutomationMode::Enabled => return Err(err),
                AutomationMode::Manual => {
                    self.log.append(&format!("automated click skipped: {err}"));
                }
            }
        }
        self.host.await_click(label).await;
        Ok(())
    }

    /// Assert that `window` is assigned to `screen` and its bounds lie on it.
    ///
    /// Two sequential poll-then-assert phases: first the host's reported
    /// current screen must equal `screen` (by label and rectangle), then the
    /// window's outer bounds must lie within the screen's rectangle expanded
    /// by the configured tolerance. The bounds phase only starts once the
    /// assignment phase has resolved. Either phase failing at its deadline
    /// yields [`Error::Assertion`] with formatted expected/actual values.
    pub async fn assert_window_on_screen(&self, window: WindowId, screen: &Screen) -> Result<()> {
        self.log
            .append(&format!("assert window {window} on screen {screen}"));

        {
            let host = Arc::clone(&self.host);
            let expected = screen.clone();
            poll::poll_until(&self.config.poll, move || {
                let host = Arc::clone(&host);
                let expected = expected.clone();
                async move { host.current_screen(window).await.as_ref() == Some(&expected) }
            })
            .await;
        }
        let assigned = self.host.current_screen(window).await;
        if assigned.as_ref() != Some(screen) {
            return Err(Error::Assertion {
                check: "current screen",
                expected: screen.to_string(),
                actual: assigned.map_or_else(|| "<no screen>".to_string(), |s| s.to_string()),
            });
        }

        {
            let host = Arc::clone(&self.host);
            let rect = screen.rect;
            let tolerance = self.config.tolerance;
            poll::poll_until(&self.config.poll, move || {
                let host = Arc::clone(&host);
                async move {
                    host.window_bounds(window)
                        .await
                        .is_some_and(|b| geom::is_window_on_screen(&b, &rect, tolerance))
                }
            })
            .await;
        }
        let bounds = self.host.window_bounds(window).await;
        let on_screen = bounds
            .as_ref()
            .is_some_and(|b| geom::is_window_on_screen(b, &screen.rect, self.config.tolerance));
        if !on_screen {
            return Err(Error::Assertion {
                check: "window bounds on screen",
                expected: screen.to_string(),
                actual: bounds.map_or_else(|| "<no bounds>".to_string(), |b| b.to_string()),
            });
        }

        self.log
            .append(&format!("window {window} on screen {screen}"));
        Ok(())
    }

    /// Append the window's reported bounds and current screen to the log.
    async fn log_current_screen(&self, window: WindowId) {
        let bounds = self.host.window_bounds(window).await;
        let screen = self.host.current_screen(window).await;
        let bounds = bounds.map_or_else(|| "<no bounds>".to_string(), |b| b.to_string());
        let screen = screen.map_or_else(|| "<no screen>".to_string(), |s| s.to_string());
        self.log
            .append(&format!("Window {bounds} on screen {screen}"));
    }
}
