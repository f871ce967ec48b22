//! Async helpers for driving multi-screen window-placement conformance
//! tests against a host-provided capability surface.
//!
//! The crate is glue between a test page and its host. It verifies the
//! screen-enumeration capability, obtains the window-management permission,
//! synchronizes on driver or manual clicks, polls until a window lands on an
//! expected screen, asserts the window's outer bounds against that screen's
//! rectangle within a tolerance, and appends ordered human-readable entries
//! to an injected log along the way.
//!
//! The two leaf primitives are [`poll`] (a deadline-bounded condition
//! poller over the tokio clock) and [`is_window_on_screen`] (a pure bounds
//! containment predicate). [`Harness`] sequences them over a [`Host`].

mod error;
pub mod geom;
mod harness;
pub mod host;
pub mod log;
pub mod poll;
pub mod test_support;

pub use error::{Error, Result};
pub use geom::{DEFAULT_TOLERANCE, Rect, Screen, WindowBounds, is_window_on_screen};
pub use harness::{AutomationMode, Harness, HarnessConfig};
pub use host::{Host, WindowId};
pub use log::{EventLog, MemoryLog, TraceLog};
pub use poll::{PollConfig, poll, poll_until};
