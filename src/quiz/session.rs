use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::quiz::{
    generator::QuizGenerator,
    models::{
        AnswerOutcome, AnswerRecord, AnswerRequest, QuestionSpec, QuestionView, QuizError,
        RoundResult,
    },
};

/// One user's round. An empty question queue is the complete state.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: VecDeque<QuestionSpec>,
    score: u32,
    prompt_text: String,
    answer_log: Vec<AnswerRecord>,
    current: Option<QuestionView>,
}

impl QuizSession {
    pub fn new(questions: Vec<QuestionSpec>) -> Self {
        Self {
            questions: questions.into(),
            score: 0,
            prompt_text: String::new(),
            answer_log: Vec::new(),
            current: None,
        }
    }

    pub fn start<R: Rng + ?Sized>(
        generator: &QuizGenerator,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        let questions = generator.generate_round(rng)?;
        Ok(Self::new(questions))
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining(&self) -> usize {
        self.questions.len()
    }

    pub fn is_complete(&self) -> bool {
        self.questions.is_empty()
    }

    #[cfg(test)]
    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    pub fn answer_log(&self) -> &[AnswerRecord] {
        &self.answer_log
    }

    /// The question on display. Built once per question so repeated reads
    /// see the same option order.
    pub fn current_question<R: Rng + ?Sized>(
        &mut self,
        generator: &QuizGenerator,
        rng: &mut R,
    ) -> Result<QuestionView, QuizError> {
        if let Some(view) = &self.current {
            return Ok(view.clone());
        }

        let head = self.questions.front().ok_or(QuizError::RoundComplete)?;
        let view = generator.present(head, rng)?;
        self.prompt_text = view.question.clone();
        self.current = Some(view.clone());

        Ok(view)
    }

    /// Grades the head question and advances. The answer always counts once
    /// accepted; a next question that cannot be built is left for the next
    /// `current_question` call.
    pub fn submit<R: Rng + ?Sized>(
        &mut self,
        request: &AnswerRequest,
        generator: &QuizGenerator,
        rng: &mut R,
    ) -> Result<AnswerOutcome, QuizError> {
        let given_answer = request.given_answer()?;
        let head = self.questions.front().ok_or(QuizError::RoundComplete)?;

        if self.current.is_none() {
            self.prompt_text = head.prompt();
        }

        let correct = given_answer == head.correct_answer;
        if correct {
            self.score += 1;
        }

        self.answer_log.push(AnswerRecord {
            question: self.prompt_text.clone(),
            given_answer,
            correct_answer: head.correct_answer.clone(),
        });

        let reported_question = request.report.then(|| self.prompt_text.clone());

        self.questions.pop_front();
        self.current = None;

        let complete = self.is_complete();
        let next = match complete {
            true => None,
            false => self
                .current_question(generator, rng)
                .inspect_err(|e| warn!("Next question deferred to the next read: {}", e))
                .ok(),
        };

        Ok(AnswerOutcome {
            correct,
            score: self.score,
            complete,
            reported_question,
            next,
        })
    }

    /// Consumes a complete round.
    pub fn into_result(self) -> Result<RoundResult, QuizError> {
        if !self.is_complete() {
            return Err(QuizError::RoundInProgress);
        }

        Ok(RoundResult {
            score: self.score,
            answers: self.answer_log,
        })
    }
}
