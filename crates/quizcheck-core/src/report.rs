//! # Report Module
//!
//! Full validation report and the 100-point rubric.
//!
//! Five criteria, 20 points each:
//! - coverage complete (no missing, no extra profile)
//! - no balance finding
//! - simulation reachability (tiered)
//! - targeted reachability (tiered)
//! - option distribution spread (tiered)

use crate::analysis::{
    analyze_balance, analyze_coverage, run_targeted, simulate, BalanceReport, CoverageReport,
    SimulationReport, TargetedReport,
};
use crate::config::AnalysisConfig;
use crate::taxonomy::REFERENCE_SIZE;
use crate::{ProfileName, Quiz, Taxonomy};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Points per criterion.
pub const CRITERION_POINTS: u8 = 20;

/// Maximum total score.
pub const MAX_SCORE: u8 = 100;

/// Reachability tiers as (profiles out of [`REFERENCE_SIZE`], points).
const REACH_TIERS: [(u64, u8); 3] = [(13, 20), (10, 15), (7, 10)];

/// Spread tiers as (largest allowed spread, points).
const SPREAD_TIERS: [(u64, u8); 3] = [(2, 20), (4, 15), (6, 10)];

// =============================================================================
// GRADE
// =============================================================================

/// Overall verdict derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Grade {
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Self::Excellent,
            70..=89 => Self::Good,
            50..=69 => Self::Fair,
            _ => Self::Poor,
        }
    }

    #[must_use]
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Excellent => "quiz is well balanced",
            Self::Good => "quiz works, minor adjustments needed",
            Self::Fair => "quiz needs significant improvement",
            Self::Poor => "quiz needs a complete review",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Fair => "FAIR",
            Self::Poor => "POOR",
        };
        f.write_str(label)
    }
}

// =============================================================================
// SCORE
// =============================================================================

/// Points earned on one criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Criterion {
    pub name: &'static str,
    pub points: u8,
    pub max: u8,
}

/// Rubric breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Score {
    pub total: u8,
    pub max: u8,
    pub criteria: Vec<Criterion>,
}

/// Points for reaching `count` of `size` profiles.
///
/// Thresholds are fractions of the reference size, so 13/10/7 of 15 scale
/// to other taxonomy sizes.
fn reach_points(count: usize, size: usize) -> u8 {
    let scaled = (count as u64).saturating_mul(REFERENCE_SIZE as u64);
    REACH_TIERS
        .iter()
        .find(|(needed, _)| scaled >= needed.saturating_mul(size as u64))
        .map(|&(_, points)| points)
        .unwrap_or(0)
}

fn spread_points(spread: u64) -> u8 {
    SPREAD_TIERS
        .iter()
        .find(|(limit, _)| spread <= *limit)
        .map(|&(_, points)| points)
        .unwrap_or(0)
}

fn all_or_nothing(ok: bool) -> u8 {
    if ok { CRITERION_POINTS } else { 0 }
}

// =============================================================================
// VALIDATION REPORT
// =============================================================================

/// Everything known about a quiz after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub questions: usize,
    pub options: usize,
    pub taxonomy_size: usize,
    pub coverage: CoverageReport,
    pub balance: BalanceReport,
    pub simulation: SimulationReport,
    pub targeted: TargetedReport,
    pub score: Score,
    pub grade: Grade,
    pub recommendations: Vec<String>,
}

impl ValidationReport {
    /// Run every analysis and score the quiz.
    #[must_use]
    pub fn build(quiz: &Quiz, taxonomy: &Taxonomy, config: &AnalysisConfig) -> Self {
        let coverage = analyze_coverage(quiz, taxonomy, config);
        let balance = analyze_balance(quiz, config);
        let simulation = simulate(quiz, taxonomy, config);
        let targeted = run_targeted(quiz, taxonomy, config);

        let reachable = simulation.reachable_count(taxonomy);
        let criteria = vec![
            Criterion {
                name: "coverage",
                points: all_or_nothing(coverage.complete()),
                max: CRITERION_POINTS,
            },
            Criterion {
                name: "balance",
                points: all_or_nothing(balance.is_balanced()),
                max: CRITERION_POINTS,
            },
            Criterion {
                name: "simulation",
                points: reach_points(reachable, taxonomy.len()),
                max: CRITERION_POINTS,
            },
            Criterion {
                name: "targeted",
                points: reach_points(targeted.success_count(), taxonomy.len()),
                max: CRITERION_POINTS,
            },
            Criterion {
                name: "distribution",
                points: spread_points(coverage.spread),
                max: CRITERION_POINTS,
            },
        ];
        let total = criteria.iter().map(|c| c.points).sum();
        let grade = Grade::from_score(total);

        let recommendations =
            recommendations(&coverage, &balance, reachable, taxonomy.len(), &targeted);

        Self {
            questions: quiz.len(),
            options: quiz.option_count(),
            taxonomy_size: taxonomy.len(),
            coverage,
            balance,
            simulation,
            targeted,
            score: Score {
                total,
                max: MAX_SCORE,
                criteria,
            },
            grade,
            recommendations,
        }
    }

    /// Format as plain text with the standard section layout.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("┌─────────────────────────────────────┐\n");
        output.push_str("│ QUIZ VALIDATION REPORT              │\n");
        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str(&format!(
            "│ {} questions, {} options, {} profiles expected\n",
            self.questions, self.options, self.taxonomy_size
        ));

        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str("│ COVERAGE                            │\n");
        output.push_str(&coverage_lines(&self.coverage));

        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str("│ BALANCE                             │\n");
        output.push_str(&balance_lines(&self.balance));

        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str("│ SIMULATION                          │\n");
        output.push_str(&simulation_lines(&self.simulation, self.taxonomy_size));

        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str("│ TARGETED                            │\n");
        output.push_str(&targeted_lines(&self.targeted));

        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str(&format!(
            "│ SCORE: {}/{} {} ({})\n",
            self.score.total,
            self.score.max,
            self.grade,
            self.grade.verdict()
        ));
        for criterion in &self.score.criteria {
            output.push_str(&format!(
                "│ - {:<12} {:>2}/{}\n",
                criterion.name, criterion.points, criterion.max
            ));
        }

        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str("│ RECOMMENDATIONS                     │\n");
        if self.recommendations.is_empty() {
            output.push_str("│ - (none)                            │\n");
        } else {
            for rec in &self.recommendations {
                output.push_str(&format!("│ - {}\n", rec));
            }
        }
        output.push_str("└─────────────────────────────────────┘\n");

        output
    }
}

fn join(names: &BTreeSet<ProfileName>) -> String {
    names
        .iter()
        .map(ProfileName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn recommendations(
    coverage: &CoverageReport,
    balance: &BalanceReport,
    reachable: usize,
    size: usize,
    targeted: &TargetedReport,
) -> Vec<String> {
    let mut out = Vec::new();
    if !coverage.missing.is_empty() {
        out.push(format!("Add options for: {}", join(&coverage.missing)));
    }
    if !coverage.extra.is_empty() {
        out.push(format!(
            "Remove or rename profiles outside the taxonomy: {}",
            join(&coverage.extra)
        ));
    }
    if !balance.findings.is_empty() {
        out.push(format!("Fix {} balance findings", balance.findings.len()));
    }
    if reachable < size {
        out.push(format!(
            "Improve reachability of {} profiles",
            size - reachable
        ));
    }
    let failed: BTreeSet<ProfileName> = targeted.failures().map(|r| r.profile.clone()).collect();
    if !failed.is_empty() {
        out.push(format!("Revisit the distribution for: {}", join(&failed)));
    }
    out
}

// =============================================================================
// TEXT SECTIONS
// =============================================================================

/// Coverage section body.
#[must_use]
pub fn coverage_lines(coverage: &CoverageReport) -> String {
    let mut output = String::new();
    if coverage.complete() {
        output.push_str(&format!("│ all {} profiles present\n", coverage.expected));
    }
    if !coverage.missing.is_empty() {
        output.push_str(&format!("│ missing: {}\n", join(&coverage.missing)));
    }
    if !coverage.extra.is_empty() {
        output.push_str(&format!("│ extra: {}\n", join(&coverage.extra)));
    }
    for share in &coverage.distribution {
        let mark = if share.balanced { "ok" } else { "!!" };
        output.push_str(&format!(
            "│ {} {:<16} {:>3} options ({:>5}%)\n",
            mark, share.profile, share.options, share.share
        ));
    }
    output.push_str(&format!(
        "│ total {} options, ideal {} per profile, spread {}\n",
        coverage.total_options, coverage.ideal_per_profile, coverage.spread
    ));
    output
}

/// Balance section body.
#[must_use]
pub fn balance_lines(balance: &BalanceReport) -> String {
    let mut output = String::new();
    if balance.findings.is_empty() {
        output.push_str("│ all questions well balanced\n");
    }
    for finding in &balance.findings {
        output.push_str(&format!("│ !! {}\n", finding));
    }
    output.push_str(&format!(
        "│ average {} options, {} distinct profiles per question\n",
        balance.average_options, balance.average_distinct_profiles
    ));
    output
}

/// Simulation section body.
#[must_use]
pub fn simulation_lines(simulation: &SimulationReport, taxonomy_size: usize) -> String {
    let mut output = String::new();
    let reached = taxonomy_size.saturating_sub(simulation.unreached.len());
    output.push_str(&format!(
        "│ {} runs (seed {}), {}/{} profiles reached\n",
        simulation.runs, simulation.seed, reached, taxonomy_size
    ));
    if !simulation.unreached.is_empty() {
        output.push_str(&format!("│ never dominant: {}\n", join(&simulation.unreached)));
    }
    for freq in &simulation.frequencies {
        let mark = if freq.wins > 0 { "ok" } else { "!!" };
        output.push_str(&format!(
            "│ {} {:<16} {:>5} ({:>5}%)\n",
            mark, freq.profile, freq.wins, freq.share
        ));
    }
    output
}

/// Targeted section body.
#[must_use]
pub fn targeted_lines(targeted: &TargetedReport) -> String {
    let mut output = String::new();
    for result in &targeted.results {
        if result.reached {
            output.push_str(&format!(
                "│ ok {:<16} reachable (score {})\n",
                result.profile, result.score
            ));
        } else {
            let winner = result
                .dominant
                .as_ref()
                .map(ProfileName::as_str)
                .unwrap_or("-");
            output.push_str(&format!(
                "│ !! {:<16} lost to {} (score {})\n",
                result.profile, winner, result.score
            ));
        }
    }
    output.push_str(&format!(
        "│ {}/{} profiles reachable when targeted\n",
        targeted.success_count(),
        targeted.results.len()
    ));
    output
}

// =============================================================================
// TESTS
// =============================================================================
