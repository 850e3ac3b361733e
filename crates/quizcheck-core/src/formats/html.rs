//! HTML/JavaScript question extraction.
//!
//! Quiz pages carry their question bank as script object literals:
//!
//! ```text
//! { id: 1, question: "...", options: [
//!     { text: "...", personality: "Stratège" },
//!     ...
//! ] }
//! ```
//!
//! Keys may be bare or double-quoted. Whitespace, including newlines, may
//! appear between any two tokens. Anything outside such literals is ignored.

use super::validate;
use crate::error::{QuizError, Result};
use crate::{AnswerOption, Question, QuestionId, Quiz};
use regex::Regex;

const QUESTION_PATTERN: &str = r#"(?s)\{\s*"?id"?\s*:\s*(\d+)\s*,\s*"?question"?\s*:\s*"((?:[^"\\]|\\.)+)"\s*,\s*"?options"?\s*:\s*\[(.*?)\]\s*\}"#;

// Empty strings must match so blank options are reported, not skipped.
const OPTION_PATTERN: &str = r#"(?s)\{\s*"?text"?\s*:\s*"((?:[^"\\]|\\.)*)"\s*,\s*"?personality"?\s*:\s*"((?:[^"\\]|\\.)*)"\s*\}"#;

/// Extracts questions from an HTML page or script.
#[derive(Debug, Clone)]
pub struct HtmlExtractor {
    question: Regex,
    option: Regex,
}

impl HtmlExtractor {
    /// Compile the extraction patterns.
    pub fn new() -> Result<Self> {
        Ok(Self {
            question: Regex::new(QUESTION_PATTERN)?,
            option: Regex::new(OPTION_PATTERN)?,
        })
    }

    /// Extract every question literal, in document order.
    pub fn extract(&self, source: &str) -> Result<Quiz> {
        let mut questions = Vec::new();

        for caps in self.question.captures_iter(source) {
            let raw_id = &caps[1];
            let id = raw_id
                .parse::<u32>()
                .map_err(|_| QuizError::InvalidQuestionId(raw_id.to_string()))?;
            let id = QuestionId(id);

            let mut options = Vec::new();
            for (index, opt) in self.option.captures_iter(&caps[3]).enumerate() {
                let option = AnswerOption::new(unescape(&opt[1]), unescape(&opt[2]))
                    .map_err(|_| QuizError::InvalidOption { question: id, index })?;
                options.push(option);
            }

            questions.push(Question {
                id,
                text: unescape(&caps[2]),
                options,
            });
        }

        validate(Quiz::new(questions))
    }
}

/// Resolve backslash escapes of a JS string literal body.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body><script>
const questions = [
    {
        id: 1,
        question: "Face à un nouveau projet, vous...",
        options: [
            { text: "Planifiez chaque étape", personality: "Stratège" },
            { text: "Cherchez une idée originale", personality: "Créatif" },
            { text: "Répartissez les tâches", personality: "Organisateur" },
            { text: "En parlez autour de vous", personality: "Communicant" }
        ]
    },
    { id: 2, question: "Votre \"force\" ?", options: [
        { text: "Décider", personality: "Leader" },
        { text: "Écouter", personality: "Mentor" }
    ] }
];
</script></body></html>
"#;

    fn extract(source: &str) -> Result<Quiz> {
        HtmlExtractor::new().unwrap().extract(source)
    }

    #[test]
    fn extracts_questions_in_document_order() {
        let quiz = extract(PAGE).unwrap();
        assert_eq!(quiz.len(), 2);
        assert_eq!(quiz.questions[0].id, QuestionId(1));
        assert_eq!(quiz.questions[1].id, QuestionId(2));
        assert_eq!(quiz.questions[0].options.len(), 4);
        assert_eq!(quiz.questions[1].options.len(), 2);
    }

    #[test]
    fn keeps_accented_profile_names() {
        let quiz = extract(PAGE).unwrap();
        assert_eq!(quiz.questions[0].options[0].profile.as_str(), "Stratège");
        assert_eq!(quiz.questions[0].options[1].profile.as_str(), "Créatif");
    }

    #[test]
    fn unescapes_quotes_in_text() {
        let quiz = extract(PAGE).unwrap();
        assert_eq!(quiz.questions[1].text, "Votre \"force\" ?");
    }

    #[test]
    fn accepts_quoted_keys() {
        let source = r#"{"id": 7, "question": "Q", "options": [{"text": "A", "personality": "Mentor"}]}"#;
        let quiz = extract(source).unwrap();
        assert_eq!(quiz.questions[0].id, QuestionId(7));
        assert_eq!(quiz.questions[0].options[0].profile.as_str(), "Mentor");
    }

    #[test]
    fn no_questions_is_an_error() {
        assert!(matches!(
            extract("<html>nothing here</html>"),
            Err(QuizError::NoQuestions)
        ));
    }

    #[test]
    fn blank_profile_is_invalid_option() {
        let source = r#"{ id: 3, question: "Q", options: [{ text: "A", personality: "Leader" }, { text: "B", personality: "  " }] }"#;
        match extract(source) {
            Err(QuizError::InvalidOption { question, index }) => {
                assert_eq!(question, QuestionId(3));
                assert_eq!(index, 1);
            }
            other => panic!("expected InvalidOption, got {other:?}"),
        }
    }

    #[test]
    fn empty_option_strings_keep_their_position() {
        let empty_profile = r#"{ id: 4, question: "Q", options: [
            { text: "A", personality: "Leader" },
            { text: "B", personality: "Mentor" },
            { text: "C", personality: "" },
            { text: "D", personality: "Créatif" }
        ] }"#;
        assert!(matches!(
            extract(empty_profile),
            Err(QuizError::InvalidOption { question: QuestionId(4), index: 2 })
        ));

        let empty_text = r#"{ id: 5, question: "Q", options: [
            { text: "A", personality: "Leader" },
            { text: "", personality: "Mentor" },
            { text: "C", personality: "Stratège" }
        ] }"#;
        assert!(matches!(
            extract(empty_text),
            Err(QuizError::InvalidOption { question: QuestionId(5), index: 1 })
        ));
    }

    #[test]
    fn option_count_includes_every_literal() {
        let source = r#"{ id: 1, question: "Q", options: [
            { text: "A", personality: "Leader" },
            { text: "B", personality: "Mentor" },
            { text: "C", personality: "Stratège" },
            { text: "D", personality: "Créatif" }
        ] }"#;
        let quiz = extract(source).unwrap();
        assert_eq!(quiz.questions[0].options.len(), 4);
    }

    #[test]
    fn oversized_id_is_rejected() {
        let source = r#"{ id: 99999999999, question: "Q", options: [] }"#;
        assert!(matches!(
            extract(source),
            Err(QuizError::InvalidQuestionId(_))
        ));
    }

    #[test]
    fn unescape_handles_common_sequences() {
        assert_eq!(unescape(r#"a\"b"#), "a\"b");
        assert_eq!(unescape(r"l\'été"), "l'été");
        assert_eq!(unescape(r"x\ny"), "x\ny");
        assert_eq!(unescape("trail\\"), "trail\\");
    }
}
