//! Category coverage and option distribution.

use crate::config::AnalysisConfig;
use crate::fixed::Tenths;
use crate::{ProfileName, Quiz, Taxonomy};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Option count for one taxonomy profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileShare {
    pub profile: ProfileName,
    pub options: u64,
    /// Percentage of all options.
    pub share: Tenths,
    /// Within tolerance of the ideal share.
    pub balanced: bool,
}

/// Result of comparing the quiz's profiles with the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    /// Taxonomy size.
    pub expected: usize,
    /// Distinct profiles used by the quiz.
    pub found: usize,
    /// In the taxonomy, never offered by the quiz.
    pub missing: BTreeSet<ProfileName>,
    /// Offered by the quiz, not in the taxonomy.
    pub extra: BTreeSet<ProfileName>,
    /// One entry per taxonomy profile, in taxonomy order.
    pub distribution: Vec<ProfileShare>,
    pub total_options: u64,
    pub ideal_per_profile: Tenths,
    /// Max minus min option count over profiles the quiz uses.
    pub spread: u64,
}

impl CoverageReport {
    /// True when the quiz uses exactly the taxonomy's profiles.
    #[must_use]
    pub fn complete(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }

    /// Profiles whose option count is off the ideal by more than the tolerance.
    pub fn unbalanced(&self) -> impl Iterator<Item = &ProfileShare> {
        self.distribution.iter().filter(|s| !s.balanced)
    }
}

/// Compare the quiz's profile set and option counts with the taxonomy.
#[must_use]
pub fn analyze_coverage(quiz: &Quiz, taxonomy: &Taxonomy, config: &AnalysisConfig) -> CoverageReport {
    let mut counts: BTreeMap<&ProfileName, u64> = BTreeMap::new();
    for option in quiz.questions.iter().flat_map(|q| &q.options) {
        *counts.entry(&option.profile).or_insert(0) += 1;
    }

    let used = quiz.profiles();
    let expected = taxonomy.name_set();
    let missing: BTreeSet<_> = expected.difference(&used).cloned().collect();
    let extra: BTreeSet<_> = used.difference(&expected).cloned().collect();

    let total_options = quiz.option_count() as u64;
    let profiles = taxonomy.len() as u64;
    let tolerance = config.distribution_tolerance.saturating_mul(profiles);

    // |count - total/profiles| <= tolerance, scaled by `profiles`.
    let distribution = taxonomy
        .names()
        .map(|name| {
            let options = counts.get(name).copied().unwrap_or(0);
            let scaled = options.saturating_mul(profiles);
            ProfileShare {
                profile: name.clone(),
                options,
                share: Tenths::percent(options, total_options),
                balanced: scaled.abs_diff(total_options) <= tolerance,
            }
        })
        .collect();

    let spread = match (counts.values().max(), counts.values().min()) {
        (Some(max), Some(min)) => max - min,
        _ => 0,
    };

    CoverageReport {
        expected: taxonomy.len(),
        found: used.len(),
        missing,
        extra,
        distribution,
        total_options,
        ideal_per_profile: Tenths::ratio(total_options, profiles),
        spread,
    }
}

// =============================================================================
// TESTS
// =============================================================================
