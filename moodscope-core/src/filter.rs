use crate::categories::{niche_id, niche_options, NicheOption};
use crate::types::CommentRecord;
use std::fmt;
use tracing::{debug, warn};

/// One filter selection: either everything, or a concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector {
    #[default]
    All,
    Value(String),
}

impl Selector {
    pub const ALL_ID: &'static str = "all";

    pub fn value(value: impl Into<String>) -> Self {
        Selector::Value(value.into())
    }

    /// Parses an option id; `"all"` is the sentinel for no filtering.
    pub fn from_id(id: &str) -> Self {
        if id == Self::ALL_ID {
            Selector::All
        } else {
            Selector::Value(id.to_string())
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Selector::All => Self::ALL_ID,
            Selector::Value(value) => value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub subreddit: Selector,
    pub emotion: Selector,
    pub niche: Selector,
}

impl FilterState {
    /// True when `record` satisfies every active selector.
    pub fn matches(&self, record: &CommentRecord) -> bool {
        if let Selector::Value(subreddit) = &self.subreddit {
            if record.subreddit != *subreddit {
                return false;
            }
        }

        // Compared against the record's coarse label as-is.
        if let Selector::Value(emotion) = &self.emotion {
            if record.emotion.as_str() != emotion {
                return false;
            }
        }

        if let Selector::Value(niche) = &self.niche {
            if !record.comment.to_lowercase().contains(&niche_id(niche)) {
                return false;
            }
        }

        true
    }

    /// Records passing all selectors, in dataset order.
    pub fn apply<'a>(&self, records: &'a [CommentRecord]) -> Vec<&'a CommentRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

/// Current selections plus the niche options generated for the chosen category.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    state: FilterState,
    niche_options: Vec<NicheOption>,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self {
            state: FilterState::default(),
            niche_options: niche_options(&Selector::All),
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn niche_options(&self) -> &[NicheOption] {
        &self.niche_options
    }

    pub fn select_subreddit(&mut self, selector: Selector) {
        debug!("Subreddit filter: {}", selector);
        self.state.subreddit = selector;
    }

    /// Changing the category regenerates the niche options and resets the
    /// niche selection.
    pub fn select_emotion(&mut self, selector: Selector) {
        debug!("Emotion category filter: {}", selector);
        self.niche_options = niche_options(&selector);
        self.state.emotion = selector;
        self.state.niche = Selector::All;
    }

    /// Returns false when the niche is not among the current options.
    pub fn select_niche(&mut self, selector: Selector) -> bool {
        let known = self
            .niche_options
            .iter()
            .any(|option| option.id == selector.id());
        if !known {
            warn!(
                "Ignoring niche '{}' not offered for category '{}'",
                selector, self.state.emotion
            );
            return false;
        }
        debug!("Niche filter: {}", selector);
        self.state.niche = selector;
        true
    }

    pub fn reset(&mut self) {
        self.state = FilterState::default();
        self.niche_options = niche_options(&Selector::All);
    }

    pub fn visible<'a>(&self, records: &'a [CommentRecord]) -> Vec<&'a CommentRecord> {
        self.state.apply(records)
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample_comments;
    use crate::types::Sentiment;

    fn ids(records: &[&CommentRecord]) -> Vec<u32> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_no_filters_keeps_everything_in_order() {
        let records = sample_comments();
        let visible = FilterState::default().apply(&records);
        assert_eq!(ids(&visible), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_subreddit_filter() {
        let records = sample_comments();
        let state = FilterState {
            subreddit: Selector::value("wellness"),
            ..Default::default()
        };
        assert_eq!(ids(&state.apply(&records)), vec![3, 4, 8]);
    }

    #[test]
    fn test_emotion_filter_compares_literal_label() {
        let records = sample_comments();
        let frustrated = FilterState {
            emotion: Selector::value("frustrated"),
            ..Default::default()
        };
        assert_eq!(ids(&frustrated.apply(&records)), vec![1, 3]);

        let happy = FilterState {
            emotion: Selector::value("happy"),
            ..Default::default()
        };
        assert!(happy.apply(&records).is_empty());
    }

    #[test]
    fn test_niche_filter_matches_text_substring() {
        let records = sample_comments();
        let state = FilterState {
            niche: Selector::value("optimistic"),
            ..Default::default()
        };
        assert_eq!(ids(&state.apply(&records)), vec![5]);

        let stressed = FilterState {
            niche: Selector::value("stressed"),
            ..Default::default()
        };
        assert!(stressed.apply(&records).is_empty());
    }

    #[test]
    fn test_niche_label_is_normalised_before_matching() {
        let mut records = sample_comments();
        records[0].comment = "Everything feels OUTOFCONTROL lately".to_string();
        let state = FilterState {
            niche: Selector::value("Out of control"),
            ..Default::default()
        };
        assert_eq!(ids(&state.apply(&records)), vec![1]);
    }

    #[test]
    fn test_every_combination_is_the_conjunction() {
        let records = sample_comments();
        let mut subreddits = vec![Selector::All, Selector::value("nosuchsub")];
        subreddits.extend(
            ["health", "fitness", "wellness", "chronicpain"]
                .iter()
                .map(|s| Selector::value(*s)),
        );
        let mut emotions = vec![Selector::All, Selector::value("happy")];
        emotions.extend(
            [
                Sentiment::Positive,
                Sentiment::Negative,
                Sentiment::Neutral,
                Sentiment::Frustrated,
            ]
            .iter()
            .map(|s| Selector::value(s.as_str())),
        );
        let niches = vec![
            Selector::All,
            Selector::value("optimistic"),
            Selector::value("frustrat"),
            Selector::value("stress"),
        ];

        for subreddit in &subreddits {
            for emotion in &emotions {
                for niche in &niches {
                    let state = FilterState {
                        subreddit: subreddit.clone(),
                        emotion: emotion.clone(),
                        niche: niche.clone(),
                    };
                    let expected: Vec<u32> = records
                        .iter()
                        .filter(|r| match subreddit {
                            Selector::All => true,
                            Selector::Value(v) => r.subreddit == *v,
                        })
                        .filter(|r| match emotion {
                            Selector::All => true,
                            Selector::Value(v) => r.emotion.as_str() == v,
                        })
                        .filter(|r| match niche {
                            Selector::All => true,
                            Selector::Value(v) => r.comment.to_lowercase().contains(v.as_str()),
                        })
                        .map(|r| r.id)
                        .collect();
                    assert_eq!(ids(&state.apply(&records)), expected, "{:?}", state);
                }
            }
        }
    }

    #[test]
    fn test_switching_category_resets_niche() {
        let mut engine = FilterEngine::new();
        engine.select_emotion(Selector::value("bad"));
        assert_eq!(engine.niche_options().len(), 12);
        assert!(engine.select_niche(Selector::value("stressed")));
        assert_eq!(engine.state().niche, Selector::value("stressed"));

        engine.select_emotion(Selector::value("sad"));
        assert_eq!(engine.state().niche, Selector::All);
        assert_eq!(engine.niche_options().len(), 18);

        engine.select_emotion(Selector::All);
        assert_eq!(engine.niche_options().len(), 1);
    }

    #[test]
    fn test_unknown_niche_is_rejected() {
        let mut engine = FilterEngine::new();
        engine.select_emotion(Selector::value("happy"));
        assert!(!engine.select_niche(Selector::value("stressed")));
        assert_eq!(engine.state().niche, Selector::All);
        assert!(engine.select_niche(Selector::All));
    }

    #[test]
    fn test_reset() {
        let mut engine = FilterEngine::new();
        engine.select_subreddit(Selector::value("health"));
        engine.select_emotion(Selector::value("angry"));
        engine.select_niche(Selector::value("letdown"));
        engine.reset();
        assert_eq!(*engine.state(), FilterState::default());
        assert_eq!(engine.niche_options(), &[NicheOption::all()]);
    }
}
