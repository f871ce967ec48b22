//! End-to-end harness flows over a scripted host.

use std::{sync::Arc, time::Duration};

use placement_harness::{
    AutomationMode, Error, EventLog, Harness, HarnessConfig, Host, MemoryLog, PollConfig, Rect,
    Screen, WindowBounds, test_support::MockHost,
};

/// The window under test.
const WINDOW: u32 = 1;

/// Route harness tracing to the test writer when `RUST_LOG` is set.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// 1920x1080 screen at `left`, labelled `label`.
fn screen(label: &str, left: f64) -> Screen {
    Screen::new(label, Rect::new(left, 0.0, 1920.0, 1080.0))
}

/// Tight polling so failure cases resolve quickly.
fn cfg_fast() -> HarnessConfig {
    HarnessConfig {
        automation: AutomationMode::Enabled,
        poll: PollConfig::new(Duration::from_millis(5), Duration::from_millis(200)),
        tolerance: 100.0,
        settle_delay: Duration::from_millis(10),
    }
}

/// Host with a primary and secondary screen and the window on the primary.
fn two_screen_host() -> Arc<MockHost> {
    let host = Arc::new(MockHost::new());
    host.set_screens(vec![screen("primary", 0.0), screen("secondary", 1920.0)]);
    host.set_current_screen(WINDOW, screen("primary", 0.0));
    host.set_window_bounds(WINDOW, WindowBounds::new(100.0, 100.0, 800.0, 600.0));
    host
}

/// Harness over the mock with entries kept in `log`.
fn harness(host: &Arc<MockHost>, log: &Arc<MemoryLog>, config: HarnessConfig) -> Harness {
    Harness::new(
        Arc::clone(host) as Arc<dyn Host>,
        Arc::clone(log) as Arc<dyn EventLog>,
        config,
    )
}

#[tokio::test(start_paused = true)]
async fn setup_returns_screens_and_logs_assignment() {
    init_tracing();
    let host = two_screen_host();
    let log = Arc::new(MemoryLog::new());
    let harness = harness(&host, &log, cfg_fast());

    let screens = harness.set_up_window_management(WINDOW).await.unwrap();
    assert_eq!(screens.len(), 2);

    let entries = log.entries();
    assert!(entries.iter().any(|e| e.contains("Request screen details")));
    // Current screen is logged before and after the settle delay.
    let assignment_lines = entries
        .iter()
        .filter(|e| e.contains("on screen 'primary'"))
        .count();
    assert_eq!(assignment_lines, 2);

    let calls = host.calls();
    assert!(calls.contains(&"grant_permission".to_string()));
    assert!(calls.contains(&"await_click:Request screen details".to_string()));
}

#[tokio::test]
async fn setup_fails_without_screen_enumeration() {
    let host = two_screen_host();
    host.set_unsupported();
    let log = Arc::new(MemoryLog::new());
    let harness = harness(&host, &log, cfg_fast());

    let err = harness.set_up_window_management(WINDOW).await.unwrap_err();
    assert!(matches!(err, Error::Unsupported(_)));
}

#[tokio::test(start_paused = true)]
async fn setup_warns_on_single_screen() {
    let host = two_screen_host();
    host.set_single_screen();
    let log = Arc::new(MemoryLog::new());
    let harness = harness(&host, &log, cfg_fast());

    harness.set_up_window_management(WINDOW).await.unwrap();
    assert!(log.entries().iter().any(|e| e.starts_with("WARNING")));
}

#[tokio::test(start_paused = true)]
async fn manual_mode_swallows_grant_failure() {
    let host = two_screen_host();
    host.set_fail_grant(true);
    let log = Arc::new(MemoryLog::new());
    let config = HarnessConfig {
        automation: AutomationMode::Manual,
        ..cfg_fast()
    };
    let harness = harness(&host, &log, config);

    harness.set_up_window_management(WINDOW).await.unwrap();
    assert!(
        log.entries()
            .iter()
            .any(|e| e.contains("permission grant skipped"))
    );
}

#[tokio::test]
async fn enabled_mode_propagates_grant_failure() {
    let host = two_screen_host();
    host.set_fail_grant(true);
    let log = Arc::new(MemoryLog::new());
    let harness = harness(&host, &log, cfg_fast());

    let err = harness.set_up_window_management(WINDOW).await.unwrap_err();
    assert!(matches!(err, Error::Automation(_)));
}

#[tokio::test(start_paused = true)]
async fn manual_mode_swallows_click_dispatch_failure() {
    let host = two_screen_host();
    host.set_fail_click(true);
    let log = Arc::new(MemoryLog::new());
    let config = HarnessConfig {
        automation: AutomationMode::Manual,
        ..cfg_fast()
    };
    let harness = harness(&host, &log, config);

    harness.button_click("Request screen details").await.unwrap();
    assert!(
        log.entries()
            .iter()
            .any(|e| e.contains("automated click skipped"))
    );
    // The manual click is still awaited.
    assert!(
        host.calls()
            .contains(&"await_click:Request screen details".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn assert_passes_after_delayed_assignment_and_bounds() {
    init_tracing();
    let host = two_screen_host();
    let target = screen("secondary", 1920.0);
    // The host reports the old screen for two queries, then the new one;
    // bounds follow three queries later.
    host.set_current_screen_after(WINDOW, target.clone(), 3);
    host.set_window_bounds_after(WINDOW, WindowBounds::new(2000.0, 50.0, 800.0, 600.0), 4);
    let log = Arc::new(MemoryLog::new());
    let harness = harness(&host, &log, cfg_fast());

    harness
        .assert_window_on_screen(WINDOW, &target)
        .await
        .unwrap();
    assert!(
        log.entries()
            .iter()
            .any(|e| e.contains("window 1 on screen 'secondary'"))
    );
}

#[tokio::test(start_paused = true)]
async fn assignment_timeout_reports_expected_and_actual() {
    let host = two_screen_host();
    let target = screen("secondary", 1920.0);
    let log = Arc::new(MemoryLog::new());
    let harness = harness(&host, &log, cfg_fast());

    let err = harness
        .assert_window_on_screen(WINDOW, &target)
        .await
        .unwrap_err();
    match err {
        Error::Assertion {
            check,
            expected,
            actual,
        } => {
            assert_eq!(check, "current screen");
            assert!(expected.contains("'secondary'"));
            assert!(actual.contains("'primary'"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(start_paused = true)]
async fn bounds_timeout_reports_stale_bounds() {
    let host = two_screen_host();
    let target = screen("secondary", 1920.0);
    // Assignment flips immediately; the bounds never leave the primary.
    host.set_current_screen(WINDOW, target.clone());
    let log = Arc::new(MemoryLog::new());
    let harness = harness(&host, &log, cfg_fast());

    let err = harness
        .assert_window_on_screen(WINDOW, &target)
        .await
        .unwrap_err();
    match err {
        Error::Assertion {
            check,
            expected,
            actual,
        } => {
            assert_eq!(check, "window bounds on screen");
            assert!(expected.contains("'secondary'"));
            assert_eq!(actual, "(100,100 800x600)");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(start_paused = true)]
async fn bounds_phase_starts_only_after_assignment_resolves() {
    let host = two_screen_host();
    let target = screen("secondary", 1920.0);
    host.set_current_screen_after(WINDOW, target.clone(), 5);
    host.set_window_bounds(WINDOW, WindowBounds::new(1950.0, 0.0, 800.0, 600.0));
    let log = Arc::new(MemoryLog::new());
    let harness = harness(&host, &log, cfg_fast());

    harness
        .assert_window_on_screen(WINDOW, &target)
        .await
        .unwrap();

    // Every bounds query happens after the last assignment query that was
    // part of phase one's polling.
    let calls = host.calls();
    let first_bounds = calls
        .iter()
        .position(|c| c == "window_bounds")
        .expect("bounds queried");
    let assignment_queries = calls[..first_bounds]
        .iter()
        .filter(|c| *c == "current_screen")
        .count();
    assert!(assignment_queries >= 5, "phase one resolved too early");
}

#[tokio::test(start_paused = true)]
async fn window_with_tolerated_overhang_passes() {
    let host = two_screen_host();
    let target = screen("secondary", 1920.0);
    host.set_current_screen(WINDOW, target.clone());
    // 80px past the left edge of the secondary screen, inside the default
    // 100px tolerance.
    host.set_window_bounds(WINDOW, WindowBounds::new(1840.0, 0.0, 800.0, 600.0));
    let log = Arc::new(MemoryLog::new());
    let harness = harness(&host, &log, cfg_fast());

    harness
        .assert_window_on_screen(WINDOW, &target)
        .await
        .unwrap();
}
