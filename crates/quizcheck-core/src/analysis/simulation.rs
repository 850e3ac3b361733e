//! Random-respondent simulation.
//!
//! Each run picks one option per question uniformly at random and records
//! the dominant profile. The generator is seeded from the config, so the
//! same quiz and seed always give the same report.

use crate::config::AnalysisConfig;
use crate::fixed::Tenths;
use crate::scoring::Tally;
use crate::{ProfileName, Quiz, Taxonomy};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// How often a profile came out dominant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileFrequency {
    pub profile: ProfileName,
    pub wins: u32,
    pub share: Tenths,
}

/// Outcome of a simulation batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    pub runs: u32,
    pub seed: u64,
    /// Taxonomy profiles in order, then any other winner by name.
    pub frequencies: Vec<ProfileFrequency>,
    /// Every profile that won at least once.
    pub reachable: BTreeSet<ProfileName>,
    /// Taxonomy profiles that never won.
    pub unreached: BTreeSet<ProfileName>,
}

impl SimulationReport {
    /// Taxonomy profiles that won at least once.
    #[must_use]
    pub fn reachable_count(&self, taxonomy: &Taxonomy) -> usize {
        taxonomy.names().filter(|n| self.reachable.contains(*n)).count()
    }
}

/// Run `config.simulations` random respondents through the quiz.
#[must_use]
pub fn simulate(quiz: &Quiz, taxonomy: &Taxonomy, config: &AnalysisConfig) -> SimulationReport {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut wins: BTreeMap<ProfileName, u32> = BTreeMap::new();

    for _ in 0..config.simulations {
        let choices = quiz
            .scored_questions()
            .filter_map(|q| q.options.choose(&mut rng))
            .map(|o| &o.profile);
        let tally = Tally::from_choices(choices);
        if let Some(outcome) = tally.resolve(config.tie_break) {
            *wins.entry(outcome.dominant).or_insert(0) += 1;
        }
    }

    let runs = u64::from(config.simulations);
    let frequency = |profile: &ProfileName| {
        let count = wins.get(profile).copied().unwrap_or(0);
        ProfileFrequency {
            profile: profile.clone(),
            wins: count,
            share: Tenths::percent(u64::from(count), runs),
        }
    };

    let mut frequencies: Vec<ProfileFrequency> = taxonomy.names().map(frequency).collect();
    frequencies.extend(
        wins.keys()
            .filter(|name| !taxonomy.contains(name))
            .map(frequency),
    );

    let reachable: BTreeSet<ProfileName> = wins.keys().cloned().collect();
    let unreached = taxonomy
        .names()
        .filter(|n| !reachable.contains(*n))
        .cloned()
        .collect();

    SimulationReport {
        runs: config.simulations,
        seed: config.seed,
        frequencies,
        reachable,
        unreached,
    }
}

// =============================================================================
// TESTS
// =============================================================================
