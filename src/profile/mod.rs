//! Quiz submissions and the user-profile string derived from them.
//!
//! The profile is the text embedded for the second search signal, so its shape
//! must stay stable: one clause per answer (`question` + space + comma-joined
//! selections), clauses joined by `"; "` in submission order.


use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator between the selections of a single answer.
pub const SELECTION_SEPARATOR: &str = ", ";
/// Separator between per-answer clauses.
pub const CLAUSE_SEPARATOR: &str = "; ";

#[derive(Debug, Error)]
pub enum ProfileError {
    /// Request body did not have the submission shape.
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },
}

/// One answered quiz item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub question: String,
    pub selections: Vec<String>,
}

impl QuizAnswer {
    pub fn new<Q, S, I>(question: Q, selections: I) -> Self
    where
        Q: Into<String>,
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        Self {
            question: question.into(),
            selections: selections.into_iter().map(Into::into).collect(),
        }
    }

    /// Renders this answer as a single profile clause.
    pub fn clause(&self) -> String {
        format!(
            "{} {}",
            self.question,
            self.selections.join(SELECTION_SEPARATOR)
        )
    }
}

/// Decoded body of a search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSubmission {
    pub selected_career: String,
    pub answers: Vec<QuizAnswer>,
}

impl QuizSubmission {
    pub fn new(selected_career: impl Into<String>, answers: Vec<QuizAnswer>) -> Self {
        Self {
            selected_career: selected_career.into(),
            answers,
        }
    }

    /// Decodes a submission from parsed JSON. Types are not coerced.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ProfileError> {
        serde_json::from_value(value).map_err(|e| ProfileError::MalformedInput {
            reason: e.to_string(),
        })
    }

    /// Profile string for this submission's answers.
    pub fn user_profile(&self) -> String {
        synthesize(&self.answers)
    }
}

/// Builds the user-profile string from quiz answers.
///
/// Pure and total: an empty slice yields `""`, and an answer with no
/// selections still contributes `"{question} "`.
pub fn synthesize(answers: &[QuizAnswer]) -> String {
    answers
        .iter()
        .map(QuizAnswer::clause)
        .collect::<Vec<_>>()
        .join(CLAUSE_SEPARATOR)
}
