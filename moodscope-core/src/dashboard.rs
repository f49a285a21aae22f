//! Dashboard state and the synchronous update functions that drive it.
//!
//! Every user interaction and every asynchronous completion goes through a
//! method on [`Dashboard`]. Methods mutate state and hand back the side effects
//! the caller has to perform (timers, requests); nothing in here blocks or
//! spawns.

use crate::dataset::Dataset;
use crate::error::CoreError;
use crate::error_utils::ErrorExt;
use crate::estimate::{estimate_seconds, estimated_time};
use crate::filter::{FilterEngine, Selector};
use crate::progress::{FakeProgress, HIDE_DELAY, TICK_INTERVAL};
use crate::types::ScrapeRequest;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const MISSING_INPUT_MESSAGE: &str = "Please fill in both subreddits and number of posts.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(u64);

impl RunId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

/// Side effects requested by a dashboard update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    StartProgressTimer { run: RunId, period: Duration },
    CancelProgressTimer,
    SubmitScrape { run: RunId, request: ScrapeRequest },
    HideProgressAfter { run: RunId, delay: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Dashboard,
    Analytics,
    Reports,
    Settings,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Dashboard,
        Section::Analytics,
        Section::Reports,
        Section::Settings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Analytics => "Analytics",
            Section::Reports => "Reports",
            Section::Settings => "Settings",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    SubredditsInput(String),
    PostsInput(String),
    SelectSubreddit(Selector),
    SelectEmotion(Selector),
    SelectNiche(Selector),
    Run,
    Clear,
    UsePreviousData,
    SelectSection(Section),
    DismissNotice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Validation,
    ScrapeFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    Idle,
    Running,
    /// Backend answered; progress sits at 100 until the hide delay passes.
    Completed,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct ScrapeInputs {
    pub subreddits: String,
    pub num_posts: String,
}

impl ScrapeInputs {
    pub fn is_complete(&self) -> bool {
        !self.subreddits.is_empty() && !self.num_posts.is_empty()
    }

    pub fn estimated_seconds(&self) -> u64 {
        estimate_seconds(&self.subreddits, &self.num_posts)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunState {
    phase: RunPhase,
    current: Option<RunId>,
    fake: Option<FakeProgress>,
    progress: f64,
    progress_visible: bool,
    using_previous_data: bool,
}

impl RunState {
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn current(&self) -> Option<RunId> {
        self.current
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress
    }

    pub fn progress_visible(&self) -> bool {
        self.progress_visible
    }

    pub fn using_previous_data(&self) -> bool {
        self.using_previous_data
    }

    fn is_current(&self, run: RunId) -> bool {
        self.current == Some(run)
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Dataset,
    filters: FilterEngine,
    filters_enabled: bool,
    inputs: ScrapeInputs,
    run: RunState,
    section: Section,
    notice: Option<Notice>,
    next_run: u64,
}

impl Dashboard {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            filters: FilterEngine::new(),
            filters_enabled: false,
            inputs: ScrapeInputs::default(),
            run: RunState::default(),
            section: Section::default(),
            notice: None,
            next_run: 1,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filters(&self) -> &FilterEngine {
        &self.filters
    }

    pub fn filters_enabled(&self) -> bool {
        self.filters_enabled
    }

    pub fn inputs(&self) -> &ScrapeInputs {
        &self.inputs
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn apply(&mut self, action: UserAction) -> Vec<Effect> {
        match action {
            UserAction::SubredditsInput(value) => {
                self.inputs.subreddits = value;
                self.log_input_change("subreddits");
                Vec::new()
            }
            UserAction::PostsInput(value) => {
                self.inputs.num_posts = value;
                self.log_input_change("numPosts");
                Vec::new()
            }
            UserAction::SelectSubreddit(selector) => {
                if self.filter_interaction_allowed() {
                    self.filters.select_subreddit(selector);
                }
                Vec::new()
            }
            UserAction::SelectEmotion(selector) => {
                if self.filter_interaction_allowed() {
                    self.filters.select_emotion(selector);
                }
                Vec::new()
            }
            UserAction::SelectNiche(selector) => {
                if self.filter_interaction_allowed() {
                    self.filters.select_niche(selector);
                }
                Vec::new()
            }
            UserAction::Run => match self.start_run() {
                Ok(effects) => effects,
                Err(error) => {
                    error.log_warn();
                    self.notice = Some(Notice {
                        kind: NoticeKind::Validation,
                        message: error.user_friendly_message(),
                    });
                    Vec::new()
                }
            },
            UserAction::Clear => self.clear(),
            UserAction::UsePreviousData => {
                self.use_previous_data();
                Vec::new()
            }
            UserAction::SelectSection(section) => {
                self.section = section;
                info!("Switched to section: {}", section.label());
                Vec::new()
            }
            UserAction::DismissNotice => {
                self.notice = None;
                Vec::new()
            }
        }
    }

    /// Starts a run from the current inputs.
    ///
    /// Missing input is an error and leaves state untouched. Starting while a
    /// run is in flight is a no-op.
    pub fn start_run(&mut self) -> Result<Vec<Effect>, CoreError> {
        if !self.inputs.is_complete() {
            return Err(CoreError::InvalidInput {
                message: MISSING_INPUT_MESSAGE.to_string(),
            });
        }
        if self.run.is_running() {
            debug!("Run already in progress, ignoring start");
            return Ok(Vec::new());
        }

        let run = RunId(self.next_run);
        self.next_run += 1;

        let estimated = self.inputs.estimated_seconds();
        info!(
            "Starting {} for subreddits='{}' posts='{}' (estimated {})",
            run,
            self.inputs.subreddits,
            self.inputs.num_posts,
            estimated_time(&self.inputs.subreddits, &self.inputs.num_posts)
        );

        self.run = RunState {
            phase: RunPhase::Running,
            current: Some(run),
            fake: Some(FakeProgress::new(estimated)),
            progress: 0.0,
            progress_visible: true,
            using_previous_data: false,
        };
        self.filters_enabled = false;
        self.notice = None;

        Ok(vec![
            Effect::StartProgressTimer {
                run,
                period: TICK_INTERVAL,
            },
            Effect::SubmitScrape {
                run,
                request: ScrapeRequest::new(&self.inputs.subreddits, &self.inputs.num_posts),
            },
        ])
    }

    /// Advances fake progress. Returns false for ticks that no longer belong
    /// to a running run.
    pub fn tick(&mut self, run: RunId) -> bool {
        if !self.run.is_running() || !self.run.is_current(run) {
            debug!("Dropping stale tick for {}", run);
            return false;
        }
        if let Some(fake) = self.run.fake.as_mut() {
            self.run.progress = fake.advance();
            debug!("{} progress {:.1}%", run, self.run.progress);
        }
        true
    }

    /// Records the backend outcome of `run`.
    pub fn settle(&mut self, run: RunId, outcome: Result<(), CoreError>) -> Vec<Effect> {
        if !self.run.is_running() || !self.run.is_current(run) {
            warn!("Ignoring outcome of {} that is no longer active", run);
            return Vec::new();
        }
        self.run.fake = None;

        match outcome {
            Ok(()) => {
                info!("{} completed", run);
                self.run.phase = RunPhase::Completed;
                self.run.progress = 100.0;
                self.filters_enabled = true;
                vec![
                    Effect::CancelProgressTimer,
                    Effect::HideProgressAfter {
                        run,
                        delay: HIDE_DELAY,
                    },
                ]
            }
            Err(error) => {
                self.run.phase = RunPhase::Failed;
                self.run.progress = 0.0;
                self.notice = Some(Notice {
                    kind: NoticeKind::ScrapeFailed,
                    message: format!("Failed to scrape data: {}", error),
                });
                vec![Effect::CancelProgressTimer]
            }
        }
    }

    /// Hides the progress bar of a completed run once its display delay is
    /// over. Returns false if something else happened in the meantime.
    pub fn hide_progress(&mut self, run: RunId) -> bool {
        if self.run.phase != RunPhase::Completed || !self.run.is_current(run) {
            debug!("Skipping progress hide for {}", run);
            return false;
        }
        self.run.progress_visible = false;
        self.run.progress = 0.0;
        true
    }

    pub fn clear(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.run.is_running() {
            info!("Clearing while {:?} is running", self.run.current);
            effects.push(Effect::CancelProgressTimer);
        }

        self.run = RunState::default();
        self.filters_enabled = false;
        self.inputs = ScrapeInputs::default();
        self.filters.reset();
        self.notice = None;
        effects
    }

    pub fn use_previous_data(&mut self) {
        self.run.using_previous_data = true;
        self.filters_enabled = true;
        info!("Using previous data - filters enabled");
    }

    fn filter_interaction_allowed(&self) -> bool {
        if !self.filters_enabled {
            debug!("Filters are disabled, ignoring selection");
        }
        self.filters_enabled
    }

    fn log_input_change(&self, field: &str) {
        debug!(
            "Input changed: {} (estimate {})",
            field,
            estimated_time(&self.inputs.subreddits, &self.inputs.num_posts)
        );
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(Dataset::sample())
    }
}
