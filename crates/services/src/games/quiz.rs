use rand::rng;
use rand::seq::SliceRandom;

use quizdeck_core::catalog::{self, QuestionSource};
use quizdeck_core::{QuizError, QuizQuestion};

/// Draws a quiz run: a uniformly random permutation of the pool, truncated to
/// the requested length, with every question's choices independently
/// re-shuffled so choice order differs across sessions.
pub struct QuizBuilder<'a> {
    pool: &'a [QuestionSource],
}

impl Default for QuizBuilder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizBuilder<'static> {
    /// Builder over the built-in question bank.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pool: &catalog::QUESTION_BANK,
        }
    }
}

impl<'a> QuizBuilder<'a> {
    #[must_use]
    pub fn with_pool(pool: &'a [QuestionSource]) -> Self {
        Self { pool }
    }

    /// Builds `min(total, pool len)` normalized questions with fresh
    /// randomness.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` when a pool entry is malformed (blank prompt,
    /// no choices, correct index out of range).
    pub fn build(&self, total: usize) -> Result<Vec<QuizQuestion>, QuizError> {
        let mut picked: Vec<&QuestionSource> = self.pool.iter().collect();
        picked.shuffle(&mut rng());
        picked.truncate(total.min(self.pool.len()));
        picked.into_iter().map(Self::normalize).collect()
    }

    /// Shuffles one question's choices, re-deriving the correct index so it
    /// keeps pointing at the originally-correct text.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` when the source question is malformed.
    pub fn normalize(source: &QuestionSource) -> Result<QuizQuestion, QuizError> {
        let mut tagged: Vec<(usize, &str)> = source.choices.iter().copied().enumerate().collect();
        tagged.shuffle(&mut rng());

        let correct_index = tagged
            .iter()
            .position(|(original, _)| *original == source.correct)
            .ok_or(QuizError::CorrectIndexOutOfRange {
                index: source.correct,
                len: source.choices.len(),
            })?;

        let choices = tagged.into_iter().map(|(_, text)| text.to_owned()).collect();
        QuizQuestion::new(source.prompt, choices, correct_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn normalize_preserves_choice_set_and_correct_text() {
        let source = QuestionSource {
            prompt: "Which loop runs at least once?",
            choices: &["for", "while", "do...while", "foreach"],
            correct: 2,
        };

        // Any shuffle permutation must keep pointing at the original text.
        for _ in 0..50 {
            let question = QuizBuilder::normalize(&source).unwrap();
            let texts: HashSet<&str> = question.choices().iter().map(String::as_str).collect();
            let expected: HashSet<&str> = source.choices.iter().copied().collect();
            assert_eq!(texts, expected);
            assert_eq!(question.choices()[question.correct_index()], "do...while");
        }
    }

    #[test]
    fn normalize_rejects_bad_correct_index() {
        let source = QuestionSource {
            prompt: "broken",
            choices: &["a", "b"],
            correct: 5,
        };
        let err = QuizBuilder::normalize(&source).unwrap_err();
        assert_eq!(err, QuizError::CorrectIndexOutOfRange { index: 5, len: 2 });
    }

    #[test]
    fn build_truncates_to_pool_size() {
        let questions = QuizBuilder::new().build(1000).unwrap();
        assert_eq!(questions.len(), catalog::QUESTION_BANK.len());

        let questions = QuizBuilder::new().build(3).unwrap();
        assert_eq!(questions.len(), 3);
    }

    #[test]
    fn build_draws_distinct_questions() {
        let questions = QuizBuilder::new().build(catalog::QUIZ_LENGTH).unwrap();
        let prompts: HashSet<&str> = questions.iter().map(QuizQuestion::prompt).collect();
        assert_eq!(prompts.len(), questions.len());
    }
}
