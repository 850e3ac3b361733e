//! # Error Module
//!
//! Errors raised by the quiz model, extraction, and scoring.

use crate::{ProfileName, QuestionId};
use thiserror::Error;

/// Errors from quizcheck-core.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The document contained no recognisable question.
    #[error("no questions found in quiz source")]
    NoQuestions,

    /// A format name that is neither `html` nor `json`.
    #[error("unknown quiz format: {0} (expected 'html' or 'json')")]
    UnknownFormat(String),

    /// An extraction pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// JSON quiz document could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A question id that does not fit in a `u32`.
    #[error("invalid question id: {0}")]
    InvalidQuestionId(String),

    /// An answer option with blank text or blank profile.
    #[error("question {question}: option #{index} has empty text or profile")]
    InvalidOption { question: QuestionId, index: usize },

    /// Profile names must be non-empty after trimming.
    #[error("invalid profile name: {0:?}")]
    InvalidProfileName(String),

    /// A taxonomy needs at least one profile.
    #[error("taxonomy has no profiles")]
    EmptyTaxonomy,

    /// Two taxonomy entries share a name.
    #[error("duplicate profile in taxonomy: {0}")]
    DuplicateProfile(ProfileName),

    /// An answer refers to a question the quiz does not contain.
    #[error("unknown question id: {0}")]
    UnknownQuestion(QuestionId),

    /// An answer picks an option index past the end of the question.
    #[error("question {question}: option index {index} out of range (has {available} options)")]
    OptionOutOfRange {
        question: QuestionId,
        index: usize,
        available: usize,
    },
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, QuizError>;
