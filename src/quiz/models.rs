use core::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::models::{
    CountryRecord, NO_CAPITAL, NO_CURRENCY, NO_FLAG_IMAGE, NO_POPULATION,
};

pub const ROUND_SIZE: usize = 6;
pub const WRONG_OPTIONS: usize = 2;

/// Answer logged when a question is reported without being answered.
pub const REPORTED_WITHOUT_ANSWER: &str = "None";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("Dataset too sparse for {kind} questions after {draws} draws")]
    SparseDataset { kind: AttributeKind, draws: usize },

    #[error("The round is complete")]
    RoundComplete,

    #[error("The round is still in progress")]
    RoundInProgress,

    #[error("An answer is required unless the question is reported")]
    MissingAnswer,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Capital,
    Currency,
    Population,
    Flag,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 4] = [
        AttributeKind::Capital,
        AttributeKind::Currency,
        AttributeKind::Population,
        AttributeKind::Flag,
    ];

    /// The value a player has to pick. Flag questions are answered with the country name.
    pub fn answer<'a>(&self, country: &'a CountryRecord) -> &'a str {
        match self {
            AttributeKind::Capital => &country.capital,
            AttributeKind::Currency => &country.currency,
            AttributeKind::Population => &country.population,
            AttributeKind::Flag => &country.name,
        }
    }

    pub fn is_missing(&self, country: &CountryRecord) -> bool {
        match self {
            AttributeKind::Capital => country.capital == NO_CAPITAL,
            AttributeKind::Currency => country.currency == NO_CURRENCY,
            AttributeKind::Population => country.population == NO_POPULATION,
            AttributeKind::Flag => country.flag_image_url == NO_FLAG_IMAGE,
        }
    }

    pub fn prompt(&self, country: &str) -> String {
        match self {
            AttributeKind::Capital => format!("What is the capital of {}?", country),
            AttributeKind::Currency => format!("What is the currency of {}?", country),
            AttributeKind::Population => format!("What is the population of {}?", country),
            AttributeKind::Flag => "Which country does this flag belong to?".to_string(),
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeKind::Capital => write!(f, "capital"),
            AttributeKind::Currency => write!(f, "currency"),
            AttributeKind::Population => write!(f, "population"),
            AttributeKind::Flag => write!(f, "flag"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct QuestionSpec {
    pub country: String,
    pub kind: AttributeKind,
    pub correct_answer: String,
    pub flag_image_url: String,
    pub anthem_audio_url: Option<String>,
}

impl QuestionSpec {
    pub fn from_record(record: &CountryRecord, kind: AttributeKind) -> Self {
        Self {
            country: record.name.clone(),
            kind,
            correct_answer: kind.answer(record).to_string(),
            flag_image_url: record.flag_image_url.clone(),
            anthem_audio_url: record
                .has_anthem()
                .then(|| record.anthem_audio_url.clone()),
        }
    }

    pub fn prompt(&self) -> String {
        self.kind.prompt(&self.country)
    }

    pub fn audio_markup(&self) -> Option<String> {
        self.anthem_audio_url.as_ref().map(|url| {
            format!(
                "<audio controls='controls'><source src='{}' type='audio/ogg' /></audio>",
                url
            )
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub flag_image_url: String,
    pub anthem_audio: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question: String,
    pub given_answer: String,
    pub correct_answer: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct AnswerRequest {
    pub answer: Option<String>,
    #[serde(default)]
    pub report: bool,
}

impl AnswerRequest {
    pub fn given_answer(&self) -> Result<String, QuizError> {
        match (self.answer.as_deref(), self.report) {
            (Some(answer), _) if !answer.is_empty() => Ok(answer.to_string()),
            (_, true) => Ok(REPORTED_WITHOUT_ANSWER.to_string()),
            _ => Err(QuizError::MissingAnswer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub score: u32,
    pub complete: bool,
    /// Prompt text to persist as a reported question.
    pub reported_question: Option<String>,
    /// `None` once the round is complete, or when the next question could not be built yet.
    pub next: Option<QuestionView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub correct: bool,
    pub score: u32,
    pub complete: bool,
    pub next: Option<QuestionView>,
}

impl From<AnswerOutcome> for AnswerResponse {
    fn from(outcome: AnswerOutcome) -> Self {
        Self {
            correct: outcome.correct,
            score: outcome.score,
            complete: outcome.complete,
            next: outcome.next,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RoundResult {
    pub score: u32,
    pub answers: Vec<AnswerRecord>,
}
