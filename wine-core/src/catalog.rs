//! Quality catalog: score -> (heading, description)

use serde::Serialize;

/// One row of the quality taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QualityCategory {
    /// Score this category covers (`None` for the fallback entry)
    pub score: Option<i64>,
    /// Short category heading
    pub heading: &'static str,
    /// Explanatory text in terms of the chemical profile
    pub description: &'static str,
}

/// Returned for any score outside 3..=9
pub const UNKNOWN: QualityCategory = QualityCategory {
    score: None,
    heading: "Unknown Quality",
    description: "No description available.",
};

const fn entry(score: i64, heading: &'static str, description: &'static str) -> QualityCategory {
    QualityCategory {
        score: Some(score),
        heading,
        description,
    }
}

/// Known categories, ordered by score (3..=9)
static CATALOG: [QualityCategory; 7] = [
    entry(
        3,
        "Very Poor Quality Wine",
        "Typically very low alcohol content, high residual sugar, and excessive volatile acidity, leading to an imbalanced and unstable profile.",
    ),
    entry(
        4,
        "Poor Quality Wine",
        "Low alcohol content and noticeable imbalances in residual sugar and acidity, with slight spoilage notes.",
    ),
    entry(
        5,
        "Below Average Quality Wine",
        "Slightly below average alcohol content with minor imbalances in residual sugar and acidity, indicating some flaws but drinkable characteristics.",
    ),
    entry(
        6,
        "Average Quality Wine",
        "Balanced chemical properties with average alcohol content, well-matched residual sugar and acidity, and normal density, indicating a decent fermentation process.",
    ),
    entry(
        7,
        "Good Quality Wine",
        "Higher alcohol content, well-balanced residual sugar and acidity, low volatile acidity, and optimal pH levels, reflecting good preservation and fermentation practices.",
    ),
    entry(
        8,
        "Very Good Quality Wine",
        "High alcohol content, perfectly balanced residual sugar and acidity, very low volatile acidity, and ideal pH levels, indicating excellent preservation and complexity.",
    ),
    entry(
        9,
        "Excellent Quality Wine",
        "Very high alcohol content, exceptionally well-balanced residual sugar and acidity, extremely low volatile acidity, and perfect pH levels, reflecting superior preservation and flawless fermentation practices, resulting in the highest purity and quality.",
    ),
];

const MIN_SCORE: i64 = 3;
const MAX_SCORE: i64 = 9;

/// Look up the category for a quality score.
///
/// Total over all integers: anything outside 3..=9 yields [`UNKNOWN`].
pub fn lookup(score: i64) -> &'static QualityCategory {
    if (MIN_SCORE..=MAX_SCORE).contains(&score) {
        &CATALOG[(score - MIN_SCORE) as usize]
    } else {
        &UNKNOWN
    }
}

/// All known categories in score order
pub fn entries() -> &'static [QualityCategory] {
    &CATALOG
}

impl QualityCategory {
    /// Whether this is the fallback entry
    pub fn is_unknown(&self) -> bool {
        self.score.is_none()
    }
}
