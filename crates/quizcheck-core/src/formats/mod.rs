//! # Formats Module
//!
//! Conversion from quiz sources to the [`Quiz`] model.
//!
//! This module contains:
//! - HTML/JavaScript extraction (question object literals embedded in a page)
//! - JSON quiz documents
//!
//! Note: file I/O stays in the app layer (apps/quizcheck).
//! This module only handles text to model conversion.

mod html;
mod json;

pub use html::HtmlExtractor;
pub use json::parse_json;

use crate::error::{QuizError, Result};
use crate::Quiz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Source format of a quiz document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizFormat {
    /// A web page whose script defines the question literals.
    #[default]
    Html,
    /// A JSON document with a `questions` array.
    Json,
}

impl QuizFormat {
    /// Guess the format from a file extension. Anything but `.json` is HTML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Html,
        }
    }
}

impl FromStr for QuizFormat {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" | "js" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(QuizError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for QuizFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => f.write_str("html"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Parse a quiz source in the given format.
pub fn parse_quiz(source: &str, format: QuizFormat) -> Result<Quiz> {
    match format {
        QuizFormat::Html => HtmlExtractor::new()?.extract(source),
        QuizFormat::Json => parse_json(source),
    }
}

/// Checks shared by every format: at least one question, no blank option text.
fn validate(quiz: Quiz) -> Result<Quiz> {
    if quiz.is_empty() {
        return Err(QuizError::NoQuestions);
    }
    for question in &quiz.questions {
        if let Some(index) = question.options.iter().position(|o| o.text.trim().is_empty()) {
            return Err(QuizError::InvalidOption {
                question: question.id,
                index,
            });
        }
    }
    Ok(quiz)
}

// =============================================================================
// TESTS
// =============================================================================
