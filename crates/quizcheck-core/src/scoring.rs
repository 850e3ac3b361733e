//! # Scoring Module
//!
//! Tally answers per profile and resolve the dominant profile.
//!
//! Every chosen option adds one point to its profile. The dominant profile
//! is the one with the highest count; ties are broken by [`TieBreak`].

use crate::error::{QuizError, Result};
use crate::{ProfileName, QuestionId, Quiz};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// TIE BREAK
// =============================================================================

/// Rule for choosing between profiles with the same top count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The profile whose first point came from the earliest question wins.
    /// This is what the quiz page does when it takes the first key of its
    /// score table.
    #[default]
    FirstAnswered,
    /// Lowest name in lexical order wins.
    Alphabetical,
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "first_answered" | "first" => Ok(Self::FirstAnswered),
            "alphabetical" | "alpha" => Ok(Self::Alphabetical),
            other => Err(format!(
                "unknown tie break: {other} (expected 'first-answered' or 'alphabetical')"
            )),
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstAnswered => f.write_str("first-answered"),
            Self::Alphabetical => f.write_str("alphabetical"),
        }
    }
}

// =============================================================================
// TALLY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TallyEntry {
    count: u32,
    first_seen: u64,
}

/// Per-profile point counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    entries: BTreeMap<ProfileName, TallyEntry>,
    sequence: u64,
}

impl Tally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tally from choices in answer order.
    pub fn from_choices<'a>(choices: impl IntoIterator<Item = &'a ProfileName>) -> Self {
        let mut tally = Self::new();
        for profile in choices {
            tally.record(profile);
        }
        tally
    }

    /// Add one point to `profile`.
    pub fn record(&mut self, profile: &ProfileName) {
        let sequence = self.sequence;
        self.sequence = self.sequence.saturating_add(1);
        self.entries
            .entry(profile.clone())
            .and_modify(|e| e.count = e.count.saturating_add(1))
            .or_insert(TallyEntry {
                count: 1,
                first_seen: sequence,
            });
    }

    /// Points for `profile`, zero if never recorded.
    #[must_use]
    pub fn count(&self, profile: &ProfileName) -> u32 {
        self.entries.get(profile).map(|e| e.count).unwrap_or(0)
    }

    /// Sum of all points.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.entries.values().map(|e| u64::from(e.count)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest count, zero for an empty tally.
    #[must_use]
    pub fn max_count(&self) -> u32 {
        self.entries.values().map(|e| e.count).max().unwrap_or(0)
    }

    /// (profile, count) pairs ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&ProfileName, u32)> {
        self.entries.iter().map(|(name, e)| (name, e.count))
    }

    /// Resolve the dominant profile. `None` when nothing was recorded.
    #[must_use]
    pub fn resolve(&self, tie_break: TieBreak) -> Option<Outcome> {
        let max = self.max_count();
        let mut leaders: Vec<(&ProfileName, &TallyEntry)> = self
            .entries
            .iter()
            .filter(|(_, e)| e.count == max && max > 0)
            .collect();

        if tie_break == TieBreak::FirstAnswered {
            leaders.sort_by_key(|(_, e)| e.first_seen);
        }
        // BTreeMap iteration is already alphabetical.

        let tied: Vec<ProfileName> = leaders.into_iter().map(|(n, _)| n.clone()).collect();
        let dominant = tied.first()?.clone();
        Some(Outcome {
            dominant,
            score: max,
            tied,
        })
    }
}

/// Result of resolving a tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// The winning profile.
    pub dominant: ProfileName,
    /// Its point count.
    pub score: u32,
    /// All profiles at `score`, in tie-break order; the dominant comes first.
    pub tied: Vec<ProfileName>,
}

impl Outcome {
    /// True if more than one profile shares the top score.
    #[must_use]
    pub fn is_tie(&self) -> bool {
        self.tied.len() > 1
    }
}

// =============================================================================
// ANSWER SHEET
// =============================================================================

/// One respondent's answers: question id to chosen option index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSheet {
    answers: BTreeMap<QuestionId, usize>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the answer for a question, replacing any previous one.
    pub fn answer(&mut self, question: QuestionId, option: usize) -> &mut Self {
        self.answers.insert(question, option);
        self
    }

    #[must_use]
    pub fn get(&self, question: QuestionId) -> Option<usize> {
        self.answers.get(&question).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl FromIterator<(QuestionId, usize)> for AnswerSheet {
    fn from_iter<I: IntoIterator<Item = (QuestionId, usize)>>(iter: I) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}

/// Score an answer sheet against a quiz.
///
/// Points are recorded in quiz question order, whatever order the answers
/// were given in. Unanswered questions add nothing. When several questions
/// share an id, only the first one is scored.
pub fn score_answers(quiz: &Quiz, sheet: &AnswerSheet) -> Result<Tally> {
    for (&id, &index) in &sheet.answers {
        let question = quiz.question(id).ok_or(QuizError::UnknownQuestion(id))?;
        if index >= question.options.len() {
            return Err(QuizError::OptionOutOfRange {
                question: id,
                index,
                available: question.options.len(),
            });
        }
    }

    let mut tally = Tally::new();
    for question in quiz.scored_questions() {
        if let Some(option) = sheet.get(question.id).and_then(|i| question.options.get(i)) {
            tally.record(&option.profile);
        }
    }
    Ok(tally)
}

// =============================================================================
// TESTS
// =============================================================================
