//! Drives the dashboard: owns its state, runs the progress timer and the
//! scrape request, and publishes a fresh view after every change.

pub mod runtime;
pub mod timer;

pub use runtime::{RuntimeEvent, RuntimeHandle, ScrapeRuntime};
pub use timer::ProgressTimer;
