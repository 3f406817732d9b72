//! # Highlight Candidate Model
//!
//! A `HighlightCandidate` is a shot event tagged with a target category
//! and a dense per-(player, category) rank assigned by the selector.

use serde::{Deserialize, Serialize};

use super::shot::ShotType;

/// Highlight category. Declaration order is the fixed registry priority
/// order (`Ord` derives from it), so registry ordering never depends on
/// map iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    BestShot,
    ServeContext,
    ReturnContext,
    Rally,
}

impl Category {
    /// All categories in registry priority order.
    pub const ALL: [Category; 4] = [
        Category::BestShot,
        Category::ServeContext,
        Category::ReturnContext,
        Category::Rally,
    ];

    /// Shot type a candidate must have to qualify for this category.
    /// `BestShot` accepts any shot type.
    pub fn expected_shot_type(&self) -> Option<ShotType> {
        match self {
            Category::BestShot => None,
            Category::ServeContext => Some(ShotType::Serve),
            Category::ReturnContext => Some(ShotType::Return),
            Category::Rally => Some(ShotType::Rally),
        }
    }

    /// Stable snake_case name, matching the serde representation and the
    /// registry CSV column value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::BestShot => "best_shot",
            Category::ServeContext => "serve_context",
            Category::ReturnContext => "return_context",
            Category::Rally => "rally",
        }
    }

    /// Resolve a configuration key to a category. Categories are a
    /// closed set; unknown names are reported as ignored keys, never
    /// silently matched.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "best_shot" => Some(Category::BestShot),
            "serve_context" => Some(Category::ServeContext),
            "return_context" => Some(Category::ReturnContext),
            "rally" => Some(Category::Rally),
            _ => None,
        }
    }
}

/// A shot event selected for one category, with its per-(player, category)
/// rank. Carries the timing fields the window resolver needs so later
/// stages never reach back into the event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightCandidate {
    /// Id of the source `ShotEvent`
    pub event_id: u64,
    pub player_id: u32,
    pub category: Category,
    /// Dense rank 1..=N within (player_id, category)
    pub rank: u32,
    pub video_id: String,
    pub start_ms: u64,
    pub end_ms: u64,
    pub quality_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_priority_order() {
        assert!(Category::BestShot < Category::ServeContext);
        assert!(Category::ServeContext < Category::ReturnContext);
        assert!(Category::ReturnContext < Category::Rally);
    }

    #[test]
    fn test_category_names_round_trip() {
        for cat in Category::ALL {
            assert_eq!(Category::from_name(cat.as_str()), Some(cat));
        }
        assert_eq!(Category::from_name("smash_finish"), None);
    }

    #[test]
    fn test_expected_shot_type() {
        assert_eq!(Category::BestShot.expected_shot_type(), None);
        assert_eq!(
            Category::ServeContext.expected_shot_type(),
            Some(ShotType::Serve)
        );
        assert_eq!(
            Category::ReturnContext.expected_shot_type(),
            Some(ShotType::Return)
        );
        assert_eq!(Category::Rally.expected_shot_type(), Some(ShotType::Rally));
    }
}
