//! # Core Types
//!
//! The quiz data model: profiles, questions, answer options.
//!
//! Sets and maps use `BTreeSet`/`BTreeMap` so every listing derived from a
//! quiz comes out in the same order on every run.

use crate::error::{QuizError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// PROFILE
// =============================================================================

/// Name of a personality profile, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileName(pub(crate) String);

impl ProfileName {
    /// Create a profile name, trimming surrounding whitespace.
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(QuizError::InvalidProfileName(name.as_ref().to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl TryFrom<String> for ProfileName {
    type Error = QuizError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ProfileName> for String {
    fn from(name: ProfileName) -> Self {
        name.0
    }
}

/// A profile of the taxonomy: a name and a short descriptive phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: ProfileName,
    #[serde(default)]
    pub description: String,
}

impl Profile {
    /// Create a new profile.
    pub fn new(name: impl AsRef<str>, description: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: ProfileName::new(name)?,
            description: description.into(),
        })
    }
}

// =============================================================================
// QUESTION
// =============================================================================

/// Identifier of a question as written in the quiz source.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One answer option. Choosing it adds one point to `profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    #[serde(rename = "personality")]
    pub profile: ProfileName,
}

impl AnswerOption {
    /// Create a new option.
    pub fn new(text: impl Into<String>, profile: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            text: text.into(),
            profile: ProfileName::new(profile)?,
        })
    }
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Create a new question.
    #[must_use]
    pub fn new(id: u32, text: impl Into<String>, options: Vec<AnswerOption>) -> Self {
        Self {
            id: QuestionId(id),
            text: text.into(),
            options,
        }
    }

    /// Index of the first option that scores for `profile`.
    #[must_use]
    pub fn option_for(&self, profile: &ProfileName) -> Option<usize> {
        self.options.iter().position(|o| &o.profile == profile)
    }

    /// Distinct profiles offered by this question.
    #[must_use]
    pub fn profiles(&self) -> BTreeSet<&ProfileName> {
        self.options.iter().map(|o| &o.profile).collect()
    }
}

// =============================================================================
// QUIZ
// =============================================================================

/// A quiz: questions in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Create a quiz from questions in source order.
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Number of questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// True when the quiz has no questions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Total number of answer options across all questions.
    #[must_use]
    pub fn option_count(&self) -> usize {
        self.questions.iter().map(|q| q.options.len()).sum()
    }

    /// Every profile referenced by at least one option.
    #[must_use]
    pub fn profiles(&self) -> BTreeSet<ProfileName> {
        self.questions
            .iter()
            .flat_map(|q| q.options.iter().map(|o| o.profile.clone()))
            .collect()
    }

    /// First question with the given id.
    #[must_use]
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Questions in source order, skipping any whose id was already seen.
    ///
    /// A respondent answers each id once, so scoring walks this sequence.
    pub fn scored_questions(&self) -> impl Iterator<Item = &Question> {
        let mut seen = BTreeSet::new();
        self.questions.iter().filter(move |q| seen.insert(q.id))
    }
}

// =============================================================================
// TESTS
// =============================================================================
