//! # quizcheck-core
//!
//! Deterministic validation engine for personality quizzes.
//!
//! A quiz is a list of multiple-choice questions; every answer option scores
//! one point for exactly one profile, and the respondent's dominant profile
//! is the one with the most points. This crate checks a quiz against a
//! taxonomy of expected profiles:
//!
//! - does the quiz offer exactly the taxonomy's profiles?
//! - is each question well formed?
//! - can every profile actually come out dominant?
//!
//! ## Constraints
//!
//! - No I/O: sources come in as `&str`, reports go out as values
//! - No floating point: shares and averages are [`fixed::Tenths`]
//! - `BTreeMap`/`BTreeSet` only, so output order is stable
//! - Randomness only through a seeded generator
//!
//! ```
//! use quizcheck_core::{formats, AnalysisConfig, Taxonomy, ValidationReport};
//!
//! let source = r#"{ id: 1, question: "Q?", options: [
//!     { text: "Plan", personality: "Stratège" },
//!     { text: "Invent", personality: "Créatif" }
//! ] }"#;
//! let quiz = formats::parse_quiz(source, formats::QuizFormat::Html)?;
//! let report = ValidationReport::build(&quiz, &Taxonomy::reference(), &AnalysisConfig::default());
//! assert_eq!(report.coverage.missing.len(), 13);
//! # Ok::<(), quizcheck_core::QuizError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod fixed;
pub mod formats;
pub mod report;
pub mod scoring;
pub mod taxonomy;
mod types;

pub use config::AnalysisConfig;
pub use error::{QuizError, Result};
pub use report::{Grade, ValidationReport};
pub use scoring::{score_answers, AnswerSheet, Outcome, Tally, TieBreak};
pub use taxonomy::Taxonomy;
pub use types::*;
