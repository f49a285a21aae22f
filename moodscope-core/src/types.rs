use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse sentiment label carried by every comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Frustrated,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Frustrated => "frustrated",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Sentiment::Positive => "😊",
            Sentiment::Negative => "😞",
            Sentiment::Neutral => "😐",
            Sentiment::Frustrated => "😤",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Frustrated => "Frustrated",
        }
    }

    /// Badge text shown in the emotion column, e.g. `😤 Frustrated`.
    pub fn badge(&self) -> String {
        format!("{} {}", self.icon(), self.label())
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: u32,
    pub author: String,
    pub subreddit: String,
    pub comment: String,
    pub votes: i32,
    pub emotion: Sentiment,
    pub timestamp: String,
}

/// Body of `POST /scrape_comments`. Both fields are forwarded exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub subreddits: String,
    #[serde(rename = "numPosts")]
    pub num_posts: String,
}

impl ScrapeRequest {
    pub fn new(subreddits: impl Into<String>, num_posts: impl Into<String>) -> Self {
        Self {
            subreddits: subreddits.into(),
            num_posts: num_posts.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_badge() {
        assert_eq!(Sentiment::Frustrated.badge(), "😤 Frustrated");
        assert_eq!(Sentiment::Positive.to_string(), "positive");
    }

    #[test]
    fn test_scrape_request_wire_format() {
        let request = ScrapeRequest::new("health, fitness", "5");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "subreddits": "health, fitness", "numPosts": "5" })
        );
    }
}
