//! # Analysis Configuration
//!
//! Thresholds and knobs shared by every analysis. All fields have defaults,
//! so a partial config file only needs the values it changes.

use crate::error::Result;
use crate::scoring::TieBreak;
use crate::taxonomy::Taxonomy;
use crate::Profile;
use serde::{Deserialize, Serialize};

/// Options every question should offer.
pub const DEFAULT_EXPECTED_OPTIONS: usize = 4;

/// Fewest distinct profiles a question may offer.
pub const DEFAULT_MIN_DISTINCT_PROFILES: usize = 3;

/// Allowed distance between a profile's option count and the ideal share.
pub const DEFAULT_DISTRIBUTION_TOLERANCE: u64 = 2;

/// Random respondents per simulation.
pub const DEFAULT_SIMULATIONS: u32 = 1000;

/// Default simulation seed.
pub const DEFAULT_SEED: u64 = 42;

/// Configuration for quiz analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub expected_options: usize,
    pub min_distinct_profiles: usize,
    /// Question count the quiz must have. Unchecked when `None`.
    pub expected_questions: Option<usize>,
    pub distribution_tolerance: u64,
    pub simulations: u32,
    pub seed: u64,
    pub tie_break: TieBreak,
    /// Replaces the reference taxonomy when set.
    pub profiles: Option<Vec<Profile>>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            expected_options: DEFAULT_EXPECTED_OPTIONS,
            min_distinct_profiles: DEFAULT_MIN_DISTINCT_PROFILES,
            expected_questions: None,
            distribution_tolerance: DEFAULT_DISTRIBUTION_TOLERANCE,
            simulations: DEFAULT_SIMULATIONS,
            seed: DEFAULT_SEED,
            tie_break: TieBreak::default(),
            profiles: None,
        }
    }
}

impl AnalysisConfig {
    /// The taxonomy to check against: the configured profiles, or the
    /// reference taxonomy.
    pub fn taxonomy(&self) -> Result<Taxonomy> {
        match &self.profiles {
            Some(profiles) => Taxonomy::new(profiles.clone()),
            None => Ok(Taxonomy::reference()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuizError;

    #[test]
    fn defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.expected_options, 4);
        assert_eq!(config.min_distinct_profiles, 3);
        assert_eq!(config.simulations, 1000);
        assert_eq!(config.tie_break, TieBreak::FirstAnswered);
        assert_eq!(config.taxonomy().unwrap().len(), 15);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"simulations": 10, "tie_break": "alphabetical"}"#).unwrap();
        assert_eq!(config.simulations, 10);
        assert_eq!(config.tie_break, TieBreak::Alphabetical);
        assert_eq!(config.expected_options, 4);
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(serde_json::from_str::<AnalysisConfig>(r#"{"simulation": 10}"#).is_err());
    }

    #[test]
    fn custom_taxonomy() {
        let config = AnalysisConfig {
            profiles: Some(vec![
                Profile::new("Leader", "").unwrap(),
                Profile::new("Mentor", "").unwrap(),
            ]),
            ..AnalysisConfig::default()
        };
        assert_eq!(config.taxonomy().unwrap().len(), 2);
    }

    #[test]
    fn empty_custom_taxonomy_rejected() {
        let config = AnalysisConfig {
            profiles: Some(vec![]),
            ..AnalysisConfig::default()
        };
        assert!(matches!(config.taxonomy(), Err(QuizError::EmptyTaxonomy)));
    }
}
