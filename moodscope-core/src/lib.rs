pub mod categories;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod error_utils;
pub mod estimate;
pub mod filter;
pub mod progress;
pub mod types;
pub mod view;

pub use config::AppConfig;
pub use dashboard::{Dashboard, Effect, Notice, NoticeKind, RunId, RunPhase, Section, UserAction};
pub use dataset::Dataset;
pub use error::*;
pub use error_utils::*;
pub use filter::{FilterEngine, FilterState, Selector};
pub use types::*;
pub use view::{render, DashboardView};
