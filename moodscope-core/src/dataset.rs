use crate::types::{CommentRecord, Sentiment};
use std::sync::Arc;

/// Ordered, immutable collection of comments shown by the dashboard.
///
/// Cloning is cheap; the records are shared. A backend integration swaps the
/// whole collection at once through [`Dataset::replace`].
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[CommentRecord]>,
}

impl Dataset {
    pub fn new(records: Vec<CommentRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// The built-in sample comments the dashboard starts with.
    pub fn sample() -> Self {
        Self::new(sample_comments())
    }

    pub fn records(&self) -> &[CommentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct subreddit names in order of first appearance.
    pub fn subreddits(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in self.records.iter() {
            if !seen.contains(&record.subreddit.as_str()) {
                seen.push(&record.subreddit);
            }
        }
        seen
    }

    pub fn replace(&mut self, records: Vec<CommentRecord>) {
        self.records = records.into();
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::sample()
    }
}

fn record(
    id: u32,
    author: &str,
    subreddit: &str,
    comment: &str,
    votes: i32,
    emotion: Sentiment,
    timestamp: &str,
) -> CommentRecord {
    CommentRecord {
        id,
        author: author.to_string(),
        subreddit: subreddit.to_string(),
        comment: comment.to_string(),
        votes,
        emotion,
        timestamp: timestamp.to_string(),
    }
}

pub fn sample_comments() -> Vec<CommentRecord> {
    vec![
        record(
            1,
            "healthseeker_22",
            "health",
            "I've been struggling with chronic back pain for months. Traditional treatments haven't worked, and I'm looking for alternative approaches that actually help.",
            47,
            Sentiment::Frustrated,
            "2 hours ago",
        ),
        record(
            2,
            "fitness_journey",
            "fitness",
            "My doctor recommended physical therapy, but I'm not seeing results after 6 weeks. Has anyone found specific exercises that actually work for lower back issues?",
            23,
            Sentiment::Negative,
            "4 hours ago",
        ),
        record(
            3,
            "patient_advocate",
            "wellness",
            "The healthcare system is so frustrating. I've been to 5 different specialists and still don't have clear answers about my condition. Anyone else dealing with this?",
            91,
            Sentiment::Frustrated,
            "6 hours ago",
        ),
        record(
            4,
            "yoga_enthusiast",
            "wellness",
            "Finally found relief through a combination of yoga and meditation. It took months of consistent practice, but my anxiety levels have significantly decreased.",
            156,
            Sentiment::Positive,
            "8 hours ago",
        ),
        record(
            5,
            "runner_mom",
            "fitness",
            "Started running again after my injury. Taking it slow but feeling optimistic about getting back to my previous fitness level.",
            34,
            Sentiment::Positive,
            "12 hours ago",
        ),
        record(
            6,
            "chronic_warrior",
            "chronicpain",
            "Some days are harder than others, but I'm learning to manage my condition better. Support groups have been incredibly helpful.",
            78,
            Sentiment::Neutral,
            "1 day ago",
        ),
        record(
            7,
            "wellness_seeker",
            "health",
            "Looking for recommendations on natural supplements for joint health. Has anyone had success with turmeric or glucosamine?",
            29,
            Sentiment::Neutral,
            "1 day ago",
        ),
        record(
            8,
            "mindful_living",
            "wellness",
            "Mindfulness practices have transformed my relationship with stress. It's not about eliminating stress but changing how we respond to it.",
            203,
            Sentiment::Positive,
            "2 days ago",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_ids_are_unique() {
        let dataset = Dataset::sample();
        let mut ids: Vec<u32> = dataset.records().iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_subreddits_in_first_appearance_order() {
        let dataset = Dataset::sample();
        assert_eq!(
            dataset.subreddits(),
            vec!["health", "fitness", "wellness", "chronicpain"]
        );
    }

    #[test]
    fn test_replace_swaps_everything() {
        let mut dataset = Dataset::sample();
        dataset.replace(sample_comments().into_iter().take(2).collect());
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[1].author, "fitness_journey");
    }
}
