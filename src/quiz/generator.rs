use rand::{
    Rng,
    seq::{IndexedRandom, SliceRandom},
};
use tracing::warn;

use crate::{
    dataset::models::CountryRecord,
    quiz::models::{AttributeKind, QuestionSpec, QuestionView, QuizError, ROUND_SIZE, WRONG_OPTIONS},
};

/// Builds rounds and question views from the dataset snapshot.
///
/// Subjects and wrong options are found by rejection sampling: draw a random
/// country, discard it if it has no data for the asked kind. Every search is
/// capped at `max_draws` draws and fails with [`QuizError::SparseDataset`].
pub struct QuizGenerator<'a> {
    dataset: &'a [CountryRecord],
    max_draws: usize,
}

impl<'a> QuizGenerator<'a> {
    pub fn new(dataset: &'a [CountryRecord], max_draws: usize) -> Self {
        Self { dataset, max_draws }
    }

    pub fn generate_round<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Vec<QuestionSpec>, QuizError> {
        (0..ROUND_SIZE)
            .map(|_| {
                let kind = AttributeKind::ALL[rng.random_range(0..AttributeKind::ALL.len())];
                self.draw_question(kind, rng)
            })
            .collect()
    }

    pub fn draw_question<R: Rng + ?Sized>(
        &self,
        kind: AttributeKind,
        rng: &mut R,
    ) -> Result<QuestionSpec, QuizError> {
        for _ in 0..self.max_draws {
            let Some(country) = self.dataset.choose(rng) else {
                break;
            };

            if kind.is_missing(country) {
                continue;
            }

            return Ok(QuestionSpec::from_record(country, kind));
        }

        warn!("No {} question found in {} draws", kind, self.max_draws);
        Err(QuizError::SparseDataset {
            kind,
            draws: self.max_draws,
        })
    }

    pub fn present<R: Rng + ?Sized>(
        &self,
        spec: &QuestionSpec,
        rng: &mut R,
    ) -> Result<QuestionView, QuizError> {
        let mut options = self.wrong_answers(spec, rng)?;
        options.push(spec.correct_answer.clone());
        options.shuffle(rng);

        Ok(QuestionView {
            question: spec.prompt(),
            options,
            correct_answer: spec.correct_answer.clone(),
            flag_image_url: spec.flag_image_url.clone(),
            anthem_audio: spec.audio_markup(),
        })
    }

    fn wrong_answers<R: Rng + ?Sized>(
        &self,
        spec: &QuestionSpec,
        rng: &mut R,
    ) -> Result<Vec<String>, QuizError> {
        let mut wrong: Vec<String> = Vec::with_capacity(WRONG_OPTIONS + 1);

        for _ in 0..self.max_draws {
            if wrong.len() == WRONG_OPTIONS {
                return Ok(wrong);
            }

            let Some(country) = self.dataset.choose(rng) else {
                break;
            };

            let value = spec.kind.answer(country);
            let acceptable = !spec.kind.is_missing(country)
                && country.name != spec.country
                && value != spec.correct_answer
                && !wrong.iter().any(|w| w == value);

            if acceptable {
                wrong.push(value.to_string());
            }
        }

        if wrong.len() == WRONG_OPTIONS {
            return Ok(wrong);
        }

        warn!(
            "Only found {} wrong options for {} question about {}",
            wrong.len(),
            spec.kind,
            spec.country
        );
        Err(QuizError::SparseDataset {
            kind: spec.kind,
            draws: self.max_draws,
        })
    }
}
