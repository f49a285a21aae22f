use crate::categories::categories;
use crate::dashboard::{Dashboard, Notice, RunPhase, Section};
use crate::estimate::estimated_time_label;
use crate::filter::Selector;
use crate::types::CommentRecord;

pub const EMPTY_RESULTS_MESSAGE: &str = "No comments found matching your filters.";

#[derive(Debug, Clone, PartialEq)]
pub struct CommentRow {
    pub id: u32,
    pub author: String,
    pub subreddit: String,
    pub comment: String,
    pub votes: i32,
    pub emotion: String,
    pub timestamp: String,
}

impl From<&CommentRecord> for CommentRow {
    fn from(record: &CommentRecord) -> Self {
        Self {
            id: record.id,
            author: format!("u/{}", record.author),
            subreddit: format!("r/{}", record.subreddit),
            comment: record.comment.clone(),
            votes: record.votes,
            emotion: record.emotion.badge(),
            timestamp: record.timestamp.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOption {
    pub selector: Selector,
    pub label: String,
    pub active: bool,
}

impl FilterOption {
    fn new(selector: Selector, label: impl Into<String>, current: &Selector) -> Self {
        Self {
            active: selector == *current,
            selector,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunButton {
    pub label: &'static str,
    pub enabled: bool,
}

/// Everything a frontend needs to draw the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub rows: Vec<CommentRow>,
    /// Set instead of rows when no comment passes the filters.
    pub empty_message: Option<&'static str>,
    pub visible_count: usize,
    pub total_count: usize,
    pub subreddit_options: Vec<FilterOption>,
    pub emotion_options: Vec<FilterOption>,
    pub niche_options: Vec<FilterOption>,
    pub filters_enabled: bool,
    /// `None` while the progress bar is hidden.
    pub progress: Option<f64>,
    pub run_button: RunButton,
    pub previous_data_label: &'static str,
    pub estimated_time: String,
    pub subreddits_input: String,
    pub posts_input: String,
    pub sections: Vec<(Section, bool)>,
    pub notice: Option<Notice>,
}

pub fn render(dashboard: &Dashboard) -> DashboardView {
    let filter_state = dashboard.filters().state();
    let visible = dashboard.filters().visible(dashboard.dataset().records());
    let rows: Vec<CommentRow> = visible.into_iter().map(CommentRow::from).collect();

    let mut subreddit_options = vec![FilterOption::new(
        Selector::All,
        "All",
        &filter_state.subreddit,
    )];
    subreddit_options.extend(dashboard.dataset().subreddits().into_iter().map(|name| {
        FilterOption::new(
            Selector::value(name),
            format!("r/{}", name),
            &filter_state.subreddit,
        )
    }));

    let mut emotion_options = vec![FilterOption::new(
        Selector::All,
        "All",
        &filter_state.emotion,
    )];
    emotion_options.extend(categories().map(|category| {
        FilterOption::new(
            Selector::value(category),
            capitalize_first(category),
            &filter_state.emotion,
        )
    }));

    let niche_options = dashboard
        .filters()
        .niche_options()
        .iter()
        .map(|option| FilterOption::new(option.selector(), option.label.clone(), &filter_state.niche))
        .collect();

    let run = dashboard.run();
    let progress = run
        .progress_visible()
        .then(|| run.progress_percent().clamp(0.0, 100.0));
    let run_button = if run.phase() == RunPhase::Running {
        RunButton {
            label: "Scraping...",
            enabled: false,
        }
    } else {
        RunButton {
            label: "Run Scraping",
            enabled: true,
        }
    };

    let inputs = dashboard.inputs();
    DashboardView {
        empty_message: rows.is_empty().then_some(EMPTY_RESULTS_MESSAGE),
        visible_count: rows.len(),
        total_count: dashboard.dataset().len(),
        rows,
        subreddit_options,
        emotion_options,
        niche_options,
        filters_enabled: dashboard.filters_enabled(),
        progress,
        run_button,
        previous_data_label: if run.using_previous_data() {
            "Using Previous Data"
        } else {
            "Use Previous Data"
        },
        estimated_time: estimated_time_label(&inputs.subreddits, &inputs.num_posts),
        subreddits_input: inputs.subreddits.clone(),
        posts_input: inputs.num_posts.clone(),
        sections: Section::ALL
            .iter()
            .map(|section| (*section, *section == dashboard.section()))
            .collect(),
        notice: dashboard.notice().cloned(),
    }
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        render(&Dashboard::default())
    }
}
