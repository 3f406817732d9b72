//! Per-category selection rules and their documented defaults.
//!
//! Padding defaults follow the production clipper's per-type padding
//! table; thresholds and caps are the documented defaults pinned by the
//! tests below.

use serde::{Deserialize, Serialize};

use crate::models::Category;

/// Rule set for one highlight category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Minimum quality_score for a shot to qualify
    pub min_quality_score: f64,
    /// Cap on clip windows per player, re-checked after merging
    pub max_candidates_per_player: u32,
    /// Weight of the depth placement factor in the ordering score
    pub weight_depth: f64,
    /// Weight of the net-clearance factor in the ordering score
    pub weight_height: f64,
    /// Padding applied on both sides of the shot when windowing
    pub context_padding_ms: u64,
    /// Same-category windows closer than this gap merge into one clip
    pub merge_gap_ms: u64,
}

impl CategoryRule {
    /// Documented defaults per category.
    ///
    /// | category        | min_quality | cap | w_depth | w_height | pad_ms | gap_ms |
    /// |-----------------|-------------|-----|---------|----------|--------|--------|
    /// | best_shot       | 0.75        | 10  | 0.0     | 0.0      | 500    | 0      |
    /// | serve_context   | 0.50        | 5   | 0.1     | 0.1      | 300    | 0      |
    /// | return_context  | 0.50        | 5   | 0.1     | 0.1      | 300    | 0      |
    /// | rally           | 0.60        | 5   | 0.0     | 0.0      | 0      | 0      |
    pub fn default_for(category: Category) -> Self {
        match category {
            Category::BestShot => CategoryRule {
                min_quality_score: 0.75,
                max_candidates_per_player: 10,
                weight_depth: 0.0,
                weight_height: 0.0,
                context_padding_ms: 500,
                merge_gap_ms: 0,
            },
            Category::ServeContext => CategoryRule {
                min_quality_score: 0.5,
                max_candidates_per_player: 5,
                weight_depth: 0.1,
                weight_height: 0.1,
                context_padding_ms: 300,
                merge_gap_ms: 0,
            },
            Category::ReturnContext => CategoryRule {
                min_quality_score: 0.5,
                max_candidates_per_player: 5,
                weight_depth: 0.1,
                weight_height: 0.1,
                context_padding_ms: 300,
                merge_gap_ms: 0,
            },
            Category::Rally => CategoryRule {
                min_quality_score: 0.6,
                max_candidates_per_player: 5,
                weight_depth: 0.0,
                weight_height: 0.0,
                context_padding_ms: 0,
                merge_gap_ms: 0,
            },
        }
    }
}

/// Partial rule read from external configuration; unset fields fall back
/// to the category default. Unknown fields inside a known category are
/// tolerated (forward-compatible).
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CategoryRuleOverlay {
    #[serde(default)]
    pub min_quality_score: Option<f64>,
    #[serde(default)]
    pub max_candidates_per_player: Option<u32>,
    #[serde(default)]
    pub weight_depth: Option<f64>,
    #[serde(default)]
    pub weight_height: Option<f64>,
    #[serde(default)]
    pub context_padding_ms: Option<u64>,
    #[serde(default)]
    pub merge_gap_ms: Option<u64>,
}

impl CategoryRuleOverlay {
    pub(crate) fn apply_to(&self, mut rule: CategoryRule) -> CategoryRule {
        if let Some(v) = self.min_quality_score {
            rule.min_quality_score = v;
        }
        if let Some(v) = self.max_candidates_per_player {
            rule.max_candidates_per_player = v;
        }
        if let Some(v) = self.weight_depth {
            rule.weight_depth = v;
        }
        if let Some(v) = self.weight_height {
            rule.weight_height = v;
        }
        if let Some(v) = self.context_padding_ms {
            rule.context_padding_ms = v;
        }
        if let Some(v) = self.merge_gap_ms {
            rule.merge_gap_ms = v;
        }
        rule
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_defaults() {
        let best = CategoryRule::default_for(Category::BestShot);
        assert_eq!(best.min_quality_score, 0.75);
        assert_eq!(best.max_candidates_per_player, 10);
        assert_eq!(best.context_padding_ms, 500);
        assert_eq!(best.merge_gap_ms, 0);

        let serve = CategoryRule::default_for(Category::ServeContext);
        assert_eq!(serve.min_quality_score, 0.5);
        assert_eq!(serve.max_candidates_per_player, 5);
        assert_eq!(serve.context_padding_ms, 300);

        let ret = CategoryRule::default_for(Category::ReturnContext);
        assert_eq!(ret.context_padding_ms, 300);
        assert_eq!(ret.weight_depth, 0.1);

        let rally = CategoryRule::default_for(Category::Rally);
        assert_eq!(rally.min_quality_score, 0.6);
        assert_eq!(rally.context_padding_ms, 0);
    }

    #[test]
    fn test_overlay_partial_apply() {
        let overlay: CategoryRuleOverlay =
            serde_json::from_str(r#"{"min_quality_score": 0.9, "future_field": true}"#).unwrap();
        let rule = overlay.apply_to(CategoryRule::default_for(Category::BestShot));
        assert_eq!(rule.min_quality_score, 0.9);
        // Untouched fields keep the category default.
        assert_eq!(rule.max_candidates_per_player, 10);
        assert_eq!(rule.context_padding_ms, 500);
    }
}
