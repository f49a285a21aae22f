//! Coarse emotion categories and the niche vocabulary grouped under each.

use crate::filter::Selector;

const CATEGORY_MAP: &[(&str, &[&str])] = &[
    (
        "happy",
        &[
            "Happy", "Optimistic", "Trusting", "Peaceful", "Powerful", "Accepted", "Proud",
            "Interested", "Content", "Hopeful", "Inspired", "Intimate", "Loving", "Thankful",
            "Sensitive", "Creative", "Courageous", "Respected", "Valued", "Confident",
            "Successful", "Curious", "Inquisitive", "Joyful", "Free", "Cheeky", "Aroused",
            "Energetic", "Eager",
        ],
    ),
    (
        "surprised",
        &[
            "Excited", "Amazed", "Confused", "Startled", "Awe", "Astonished", "Disillusioned",
            "Dismayed", "Shocked", "Surprised",
        ],
    ),
    (
        "bad",
        &[
            "Bad", "Tired", "Stressed", "Busy", "Bored", "Sleepy", "Overwhelmed",
            "Out of control", "Restless", "Apathetic", "Indifferent",
        ],
    ),
    (
        "fearful",
        &[
            "Fearful", "Scared", "Anxious", "Insecure", "Weak", "Rejected", "Threatened",
            "Helpless", "Frightened", "Worried", "Overwhelmed", "Inferior", "Inadequate",
            "Worthless", "Insignificant", "Excluded", "Persecuted", "Nervous", "Exposed",
        ],
    ),
    (
        "angry",
        &[
            "Angry", "Let down", "Humiliated", "Bitter", "Mad", "Aggressive", "Frustrated",
            "Distant", "Critical", "Resentful", "Disrespected", "Ridiculed", "Indignant",
            "Violated", "Furious", "Jealous", "Provoked", "Hostile", "Infuriated", "Annoyed",
            "Withdrawn", "Numb", "Sceptical",
        ],
    ),
    (
        "disgusted",
        &[
            "Disgusted", "Disapproving", "Disappointed", "Awful", "Repelled", "Judgmental",
            "Embarrassed", "Appalled", "Revolted", "Awkward", "Dismissive",
        ],
    ),
    (
        "sad",
        &[
            "Sad", "Lonely", "Vulnerable", "Despair", "Guilty", "Depressed", "Hurt",
            "Abandoned", "Victimized", "Fragile", "Grief", "Powerless", "Ashamed", "Empty",
            "Remorseful", "Inferior", "Embarrassed",
        ],
    ),
];

/// Category keys in display order.
pub fn categories() -> impl Iterator<Item = &'static str> {
    CATEGORY_MAP.iter().map(|(category, _)| *category)
}

/// Niche labels for `category`, or `None` if the category is unknown.
pub fn niches(category: &str) -> Option<&'static [&'static str]> {
    CATEGORY_MAP
        .iter()
        .find(|(key, _)| *key == category)
        .map(|(_, labels)| *labels)
}

/// Identifier used for a niche label: lower-cased with all whitespace removed.
pub fn niche_id(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NicheOption {
    pub id: String,
    pub label: String,
}

impl NicheOption {
    pub fn all() -> Self {
        Self {
            id: Selector::ALL_ID.to_string(),
            label: "All".to_string(),
        }
    }

    pub fn from_label(label: &str) -> Self {
        Self {
            id: niche_id(label),
            label: label.to_string(),
        }
    }

    pub fn selector(&self) -> Selector {
        Selector::from_id(&self.id)
    }
}

/// Options offered by the niche filter for the selected category: always an
/// `All` entry, followed by one entry per niche label of that category.
pub fn niche_options(category: &Selector) -> Vec<NicheOption> {
    let mut options = vec![NicheOption::all()];
    if let Selector::Value(category) = category {
        if let Some(labels) = niches(category) {
            options.extend(labels.iter().map(|label| NicheOption::from_label(label)));
        }
    }
    options
}
