//! Targeted reachability.
//!
//! For each profile, answer every question with that profile's option when
//! one exists and with the first option otherwise, then check who wins.

use crate::config::AnalysisConfig;
use crate::scoring::Tally;
use crate::{ProfileName, Quiz, Taxonomy};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetResult {
    pub profile: ProfileName,
    pub reached: bool,
    /// Winner of the targeted answer set, `None` if nothing was scored.
    pub dominant: Option<ProfileName>,
    /// Points the target itself collected.
    pub score: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TargetedReport {
    pub results: Vec<TargetResult>,
}

impl TargetedReport {
    pub fn successes(&self) -> impl Iterator<Item = &TargetResult> {
        self.results.iter().filter(|r| r.reached)
    }

    pub fn failures(&self) -> impl Iterator<Item = &TargetResult> {
        self.results.iter().filter(|r| !r.reached)
    }

    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes().count()
    }
}

/// Aim for each taxonomy profile in turn.
#[must_use]
pub fn run_targeted(quiz: &Quiz, taxonomy: &Taxonomy, config: &AnalysisConfig) -> TargetedReport {
    let results = taxonomy
        .names()
        .map(|target| {
            let choices = quiz.scored_questions().filter_map(|q| {
                q.option_for(target)
                    .and_then(|i| q.options.get(i))
                    .or_else(|| q.options.first())
                    .map(|o| &o.profile)
            });
            let tally = Tally::from_choices(choices);
            let dominant = tally.resolve(config.tie_break).map(|o| o.dominant);
            TargetResult {
                profile: target.clone(),
                reached: dominant.as_ref() == Some(target),
                dominant,
                score: tally.count(target),
            }
        })
        .collect();

    TargetedReport { results }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{quiz, taxonomy};
    use crate::scoring::TieBreak;

    #[test]
    fn every_profile_reachable_in_rotated_quiz() {
        let quiz = quiz(&[(1, &["A", "B", "C"]), (2, &["B", "C", "A"]), (3, &["C", "A", "B"])]);
        let report = run_targeted(&quiz, &taxonomy(&["A", "B", "C"]), &AnalysisConfig::default());
        assert_eq!(report.success_count(), 3);
        assert!(report.results.iter().all(|r| r.score == 3));
    }

    #[test]
    fn profile_missing_from_quiz_fails_with_zero() {
        let quiz = quiz(&[(1, &["A", "B"])]);
        let report = run_targeted(&quiz, &taxonomy(&["A", "B", "C"]), &AnalysisConfig::default());
        let c = &report.results[2];
        assert!(!c.reached);
        assert_eq!(c.score, 0);
        assert_eq!(c.dominant.as_ref().map(ProfileName::as_str), Some("A"));
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn rare_profile_loses_to_first_option_filler() {
        // B only appears once; the filler answers pile onto A.
        let quiz = quiz(&[(1, &["A", "B"]), (2, &["A", "C"]), (3, &["A", "C"])]);
        let report = run_targeted(&quiz, &taxonomy(&["A", "B", "C"]), &AnalysisConfig::default());
        let b = &report.results[1];
        assert!(!b.reached);
        assert_eq!(b.score, 1);
        assert_eq!(b.dominant.as_ref().map(ProfileName::as_str), Some("A"));
        // C gets two points against A's one.
        assert!(report.results[2].reached);
    }

    #[test]
    fn tie_break_decides_close_targets() {
        // Targeting B yields B=1 (Q1) and A=1 (Q2 filler).
        let quiz = quiz(&[(1, &["A", "B"]), (2, &["A", "C"])]);
        let first = run_targeted(&quiz, &taxonomy(&["A", "B"]), &AnalysisConfig::default());
        assert!(first.results[1].reached);

        let config = AnalysisConfig {
            tie_break: TieBreak::Alphabetical,
            ..AnalysisConfig::default()
        };
        let alpha = run_targeted(&quiz, &taxonomy(&["A", "B"]), &config);
        assert!(!alpha.results[1].reached);
    }
}
