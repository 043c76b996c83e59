use std::fmt;
use thiserror::Error;

use crate::score;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz has no questions")]
    NoQuestions,

    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question has no choices")]
    NoChoices,

    #[error("correct index {index} out of range for {len} choices")]
    CorrectIndexOutOfRange { index: usize, len: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A normalized question: choices already shuffled for this session, with the
/// correct index pointing into the shuffled order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    prompt: String,
    choices: Vec<String>,
    correct_index: usize,
}

impl QuizQuestion {
    /// Creates a normalized question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the prompt is blank, there are no choices, or
    /// `correct_index` does not denote a member of `choices`.
    pub fn new(
        prompt: impl Into<String>,
        choices: Vec<String>,
        correct_index: usize,
    ) -> Result<Self, QuizError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuizError::EmptyPrompt);
        }
        if choices.is_empty() {
            return Err(QuizError::NoChoices);
        }
        if correct_index >= choices.len() {
            return Err(QuizError::CorrectIndexOutOfRange {
                index: correct_index,
                len: choices.len(),
            });
        }
        Ok(Self {
            prompt,
            choices,
            correct_index,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Outcome of answering the current question, returned to the caller so the
/// view can highlight the correct choice and a wrong pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub picked: usize,
    pub correct_index: usize,
    pub correct: bool,
    /// Points awarded for this answer (zero when wrong).
    pub awarded: u32,
}

/// What `advance` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAdvance {
    Ignored,
    /// Moved to the next question; answering is unlocked again.
    Next,
    /// The last question was passed; the session is now finished.
    Finished,
}

/// Final numbers for a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSummary {
    pub correct: u32,
    pub total: u32,
    pub points: u32,
    pub seconds: u32,
}

impl fmt::Display for QuizSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Finished! {}/{} correct, {} pts, {}s",
            self.correct, self.total, self.points, self.seconds
        )
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State machine for one quiz run.
///
/// The answer lock is set between an answer submission and the next `advance`,
/// giving single-answer semantics per question.
#[derive(Debug, Clone)]
pub struct QuizSession {
    index: usize,
    correct: u32,
    points: u32,
    seconds: u32,
    questions: Vec<QuizQuestion>,
    locked: bool,
    running: bool,
    finished: bool,
}

impl QuizSession {
    /// Starts a session over an already-normalized question list.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` for an empty list.
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        Ok(Self {
            index: 0,
            correct: 0,
            points: 0,
            seconds: 0,
            questions,
            locked: false,
            running: true,
            finished: false,
        })
    }

    // Accessors
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    #[must_use]
    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.finished {
            None
        } else {
            self.questions.get(self.index)
        }
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.index + 1 == self.questions.len()
    }

    #[must_use]
    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            correct: self.correct,
            total: u32::try_from(self.total()).unwrap_or(u32::MAX),
            points: self.points,
            seconds: self.seconds,
        }
    }

    /// Advance the elapsed-time counter by one second.
    pub fn tick(&mut self) {
        if self.running {
            self.seconds = self.seconds.saturating_add(1);
        }
    }

    /// Submit an answer for the current question.
    ///
    /// Locks immediately; further calls before `advance` return `None`.
    /// A correct pick awards `100 + max(0, 50 - seconds/3)` points.
    pub fn answer(&mut self, choice: usize) -> Option<AnswerOutcome> {
        if !self.running || self.locked {
            return None;
        }
        let correct_index = self.questions.get(self.index)?.correct_index();
        self.locked = true;

        let correct = choice == correct_index;
        let awarded = if correct {
            self.correct = self.correct.saturating_add(1);
            let pts = score::quiz_answer_points(self.seconds);
            self.points = self.points.saturating_add(pts);
            pts
        } else {
            0
        };

        Some(AnswerOutcome {
            picked: choice,
            correct_index,
            correct,
            awarded,
        })
    }

    /// Move past the current question, finishing the session when it was the
    /// last one. The index never grows beyond the final question.
    pub fn advance(&mut self) -> QuizAdvance {
        if !self.running {
            return QuizAdvance::Ignored;
        }
        if self.is_last_question() {
            self.running = false;
            self.finished = true;
            QuizAdvance::Finished
        } else {
            self.index += 1;
            self.locked = false;
            QuizAdvance::Next
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
