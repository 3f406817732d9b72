//! # Selection Configuration Module
//!
//! One explicit configuration structure passed into each pipeline stage.
//! Nothing in the pipeline reads ambient or global state; an external
//! loader hands `SelectionConfig` (or a JSON overlay for it) to the run.
//!
//! Unrecognized category keys in an overlay are ignored with a
//! `ConfigurationKeyIgnored` warning (fail-soft, forward-compatible);
//! missing keys take the documented defaults in `rules`.

mod rules;

pub use rules::CategoryRule;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineReport, RunWarning};
use crate::models::Category;

use rules::CategoryRuleOverlay;

/// Complete rule set for one pipeline run: one rule per category.
///
/// Deserialization goes through [`SelectionConfigRepr`] so a serialized
/// config that omits categories still comes back total: missing entries
/// take their documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SelectionConfigRepr")]
pub struct SelectionConfig {
    rules: BTreeMap<Category, CategoryRule>,
}

/// Wire shape of `SelectionConfig`; entries may be missing.
#[derive(Deserialize)]
struct SelectionConfigRepr {
    #[serde(default)]
    rules: BTreeMap<Category, CategoryRule>,
}

impl From<SelectionConfigRepr> for SelectionConfig {
    fn from(repr: SelectionConfigRepr) -> Self {
        let mut config = SelectionConfig::default();
        for (category, rule) in repr.rules {
            config.rules.insert(category, rule);
        }
        config
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        let rules = Category::ALL
            .iter()
            .map(|&cat| (cat, CategoryRule::default_for(cat)))
            .collect();
        Self { rules }
    }
}

impl SelectionConfig {
    /// Rule for a category. The map is total by construction, so this
    /// never misses.
    pub fn rule(&self, category: Category) -> &CategoryRule {
        &self.rules[&category]
    }

    /// Replace one category's rule (test fixtures and calibration runs).
    pub fn set_rule(&mut self, category: Category, rule: CategoryRule) {
        self.rules.insert(category, rule);
    }

    /// Build a config from a JSON object keyed by category name, layered
    /// over the defaults. Unknown category keys are reported and skipped,
    /// as is a known category whose value is not a rule object; unknown
    /// fields inside a known category are tolerated silently.
    ///
    /// A non-object value yields the defaults untouched.
    pub fn from_json_value(value: &serde_json::Value, report: &mut PipelineReport) -> Self {
        let mut config = SelectionConfig::default();
        let Some(object) = value.as_object() else {
            return config;
        };
        for (key, rule_value) in object {
            match Category::from_name(key) {
                Some(category) => {
                    match serde_json::from_value::<CategoryRuleOverlay>(rule_value.clone()) {
                        Ok(overlay) => {
                            let rule = overlay.apply_to(CategoryRule::default_for(category));
                            config.rules.insert(category, rule);
                        }
                        // A known category with a value that is not a rule
                        // object keeps its defaults, same as an unknown key.
                        Err(_) => {
                            report.warn(RunWarning::ConfigurationKeyIgnored { key: key.clone() });
                        }
                    }
                }
                None => {
                    report.warn(RunWarning::ConfigurationKeyIgnored { key: key.clone() });
                }
            }
        }
        config
    }
}
