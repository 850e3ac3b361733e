//! Per-question structure checks.

use crate::config::AnalysisConfig;
use crate::fixed::Tenths;
use crate::{ProfileName, QuestionId, Quiz};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Question text longer than this is shortened in reports.
const PREVIEW_CHARS: usize = 50;

/// Shape of one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionBalance {
    pub id: QuestionId,
    pub preview: String,
    pub options: usize,
    pub distinct_profiles: usize,
    /// Options beyond the first for a profile already offered.
    pub duplicates: usize,
    pub profiles: Vec<ProfileName>,
}

/// A structural problem found in the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BalanceFinding {
    OptionCount {
        question: QuestionId,
        found: usize,
        expected: usize,
    },
    DuplicateProfiles {
        question: QuestionId,
        profiles: Vec<ProfileName>,
    },
    TooFewProfiles {
        question: QuestionId,
        distinct: usize,
        minimum: usize,
    },
    DuplicateQuestionId {
        question: QuestionId,
        occurrences: usize,
    },
    QuestionCount {
        found: usize,
        expected: usize,
    },
}

impl fmt::Display for BalanceFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OptionCount {
                question,
                found,
                expected,
            } => write!(f, "question {question}: {found} options (expected {expected})"),
            Self::DuplicateProfiles { question, profiles } => {
                let names: Vec<&str> = profiles.iter().map(ProfileName::as_str).collect();
                write!(f, "question {question}: duplicated profiles ({})", names.join(", "))
            }
            Self::TooFewProfiles {
                question,
                distinct,
                minimum,
            } => write!(
                f,
                "question {question}: only {distinct} distinct profiles (minimum {minimum})"
            ),
            Self::DuplicateQuestionId {
                question,
                occurrences,
            } => write!(f, "question id {question} used {occurrences} times"),
            Self::QuestionCount { found, expected } => {
                write!(f, "quiz has {found} questions (expected {expected})")
            }
        }
    }
}

/// Per-question breakdown plus findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceReport {
    pub questions: Vec<QuestionBalance>,
    pub findings: Vec<BalanceFinding>,
    pub average_options: Tenths,
    pub average_distinct_profiles: Tenths,
}

impl BalanceReport {
    /// True when no finding was raised.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Inspect every question's options.
#[must_use]
pub fn analyze_balance(quiz: &Quiz, config: &AnalysisConfig) -> BalanceReport {
    let mut questions = Vec::with_capacity(quiz.len());
    let mut findings = Vec::new();

    if let Some(expected) = config.expected_questions {
        if quiz.len() != expected {
            findings.push(BalanceFinding::QuestionCount {
                found: quiz.len(),
                expected,
            });
        }
    }

    let mut id_counts: BTreeMap<QuestionId, usize> = BTreeMap::new();
    for question in &quiz.questions {
        *id_counts.entry(question.id).or_insert(0) += 1;
    }
    findings.extend(
        id_counts
            .iter()
            .filter(|(_, n)| **n > 1)
            .map(|(&question, &occurrences)| BalanceFinding::DuplicateQuestionId {
                question,
                occurrences,
            }),
    );

    for question in &quiz.questions {
        let mut seen = BTreeSet::new();
        let mut repeated = BTreeSet::new();
        for option in &question.options {
            if !seen.insert(&option.profile) {
                repeated.insert(option.profile.clone());
            }
        }

        let balance = QuestionBalance {
            id: question.id,
            preview: preview(&question.text),
            options: question.options.len(),
            distinct_profiles: seen.len(),
            duplicates: question.options.len() - seen.len(),
            profiles: seen.into_iter().cloned().collect(),
        };

        if balance.options != config.expected_options {
            findings.push(BalanceFinding::OptionCount {
                question: question.id,
                found: balance.options,
                expected: config.expected_options,
            });
        }
        if !repeated.is_empty() {
            findings.push(BalanceFinding::DuplicateProfiles {
                question: question.id,
                profiles: repeated.into_iter().collect(),
            });
        }
        if balance.distinct_profiles < config.min_distinct_profiles {
            findings.push(BalanceFinding::TooFewProfiles {
                question: question.id,
                distinct: balance.distinct_profiles,
                minimum: config.min_distinct_profiles,
            });
        }

        questions.push(balance);
    }

    let count = questions.len() as u64;
    let options: u64 = questions.iter().map(|q| q.options as u64).sum();
    let distinct: u64 = questions.iter().map(|q| q.distinct_profiles as u64).sum();

    BalanceReport {
        questions,
        findings,
        average_options: Tenths::ratio(options, count),
        average_distinct_profiles: Tenths::ratio(distinct, count),
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

// =============================================================================
// TESTS
// =============================================================================
