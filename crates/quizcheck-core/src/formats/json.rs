//! JSON quiz documents.
//!
//! ```json
//! { "questions": [
//!     { "id": 1, "question": "...", "options": [
//!         { "text": "...", "personality": "Leader" }
//!     ] }
//! ] }
//! ```

use super::validate;
use crate::error::{QuizError, Result};
use crate::{AnswerOption, Question, QuestionId, Quiz};
use serde::Deserialize;

// Options decode as plain strings; profile names are checked afterwards so a
// blank one is reported with its question and position.

#[derive(Deserialize)]
struct RawQuiz {
    questions: Vec<RawQuestion>,
}

#[derive(Deserialize)]
struct RawQuestion {
    id: QuestionId,
    question: String,
    options: Vec<RawOption>,
}

#[derive(Deserialize)]
struct RawOption {
    text: String,
    personality: String,
}

impl RawQuestion {
    fn into_question(self) -> Result<Question> {
        let id = self.id;
        let options = self
            .options
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                AnswerOption::new(raw.text, raw.personality)
                    .map_err(|_| QuizError::InvalidOption { question: id, index })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Question {
            id,
            text: self.question,
            options,
        })
    }
}

/// Parse a JSON quiz document.
pub fn parse_json(source: &str) -> Result<Quiz> {
    let raw: RawQuiz = serde_json::from_str(source)?;
    let questions = raw
        .questions
        .into_iter()
        .map(RawQuestion::into_question)
        .collect::<Result<Vec<_>>>()?;
    validate(Quiz::new(questions))
}
