use quizdeck_core::catalog;
use quizdeck_core::{
    AnswerOutcome, CardId, Difficulty, MemorySession, QuizAdvance, QuizSession, SelectOutcome,
};

use crate::api::types::{MemoryScorePayload, QuizScorePayload};
use crate::error::GameError;
use crate::games::deck::DeckBuilder;
use crate::games::quiz::QuizBuilder;

//
// ─── EVENTS & COMMANDS ─────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Memory,
    Quiz,
}

/// Everything that can happen to the games, from the player or from completed
/// background work. Delay and submission events carry the epoch of the session
/// they were scheduled for; the controller drops them when that session has
/// since been replaced.
#[derive(Debug, Clone)]
pub enum GameEvent {
    SwitchMode(GameMode),

    StartMemory(Difficulty),
    PickCard(CardId),
    ResolveTurn {
        epoch: u64,
    },
    ResetBoard {
        epoch: u64,
    },
    MemorySubmitted {
        epoch: u64,
        score: u32,
        outcome: Result<(), String>,
    },

    StartQuiz,
    Answer(usize),
    Advance,
    QuizSubmitted {
        epoch: u64,
        outcome: Result<(), String>,
    },

    /// One second elapsed on the named mode's clock.
    Tick(GameMode),
}

/// Side effects the controller asks its shell to perform. The controller
/// itself stays synchronous; timers, delays and network calls all live behind
/// these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    StartClock(GameMode),
    StopClock(GameMode),
    /// Deliver `ResolveTurn` back after the reveal delay.
    ScheduleResolve { epoch: u64 },
    /// Deliver `ResetBoard` back after the post-win delay.
    ScheduleReset { epoch: u64 },
    SubmitMemory {
        epoch: u64,
        payload: MemoryScorePayload,
        score: u32,
    },
    SubmitQuiz {
        epoch: u64,
        payload: QuizScorePayload,
    },
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Synchronous heart of both games.
///
/// Owns the sessions and all transition logic; every input funnels through
/// [`dispatch`](Self::dispatch), which mutates state and returns the commands
/// the async shell must carry out. Each `Start*` bumps that game's epoch so
/// stale delay or submission events from a replaced session are ignored.
#[derive(Debug)]
pub struct GameController {
    mode: GameMode,
    memory: Option<MemorySession>,
    quiz: Option<QuizSession>,
    memory_epoch: u64,
    quiz_epoch: u64,
    last_answer: Option<AnswerOutcome>,
    board_message: Option<String>,
    quiz_message: Option<String>,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

impl GameController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: GameMode::Memory,
            memory: None,
            quiz: None,
            memory_epoch: 0,
            quiz_epoch: 0,
            last_answer: None,
            board_message: None,
            quiz_message: None,
        }
    }

    // Accessors
    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn memory(&self) -> Option<&MemorySession> {
        self.memory.as_ref()
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&QuizSession> {
        self.quiz.as_ref()
    }

    #[must_use]
    pub fn memory_epoch(&self) -> u64 {
        self.memory_epoch
    }

    #[must_use]
    pub fn quiz_epoch(&self) -> u64 {
        self.quiz_epoch
    }

    /// Outcome of the most recent quiz answer, cleared on advance.
    #[must_use]
    pub fn last_answer(&self) -> Option<&AnswerOutcome> {
        self.last_answer.as_ref()
    }

    #[must_use]
    pub fn board_message(&self) -> Option<&str> {
        self.board_message.as_deref()
    }

    #[must_use]
    pub fn quiz_message(&self) -> Option<&str> {
        self.quiz_message.as_deref()
    }

    /// Apply one event and return the side effects to run.
    ///
    /// # Errors
    ///
    /// Returns `GameError` only from session construction; in-play events
    /// never fail, they degrade to no-ops.
    pub fn dispatch(&mut self, event: GameEvent) -> Result<Vec<Command>, GameError> {
        match event {
            GameEvent::SwitchMode(target) => Ok(self.switch_mode(target)),

            GameEvent::StartMemory(difficulty) => self.start_memory(difficulty),
            GameEvent::PickCard(id) => Ok(self.pick_card(id)),
            GameEvent::ResolveTurn { epoch } => Ok(self.resolve_turn(epoch)),
            GameEvent::ResetBoard { epoch } => Ok(self.reset_board(epoch)),
            GameEvent::MemorySubmitted {
                epoch,
                score,
                outcome,
            } => Ok(self.memory_submitted(epoch, score, &outcome)),

            GameEvent::StartQuiz => self.start_quiz(),
            GameEvent::Answer(choice) => Ok(self.answer(choice)),
            GameEvent::Advance => Ok(self.advance()),
            GameEvent::QuizSubmitted { epoch, outcome } => {
                Ok(self.quiz_submitted(epoch, &outcome))
            }

            GameEvent::Tick(mode) => Ok(self.tick(mode)),
        }
    }

    //
    // ─── MODE ──────────────────────────────────────────────────────────────
    //

    /// Leaving a mode pauses its clock; returning to a still-running session
    /// resumes it.
    fn switch_mode(&mut self, target: GameMode) -> Vec<Command> {
        if target == self.mode {
            return Vec::new();
        }
        let leaving = self.mode;
        self.mode = target;

        let mut commands = vec![Command::StopClock(leaving)];
        let resume = match target {
            GameMode::Memory => self.memory.as_ref().is_some_and(MemorySession::is_running),
            GameMode::Quiz => self.quiz.as_ref().is_some_and(QuizSession::is_running),
        };
        if resume {
            commands.push(Command::StartClock(target));
        }
        commands
    }

    //
    // ─── MEMORY ────────────────────────────────────────────────────────────
    //

    fn start_memory(&mut self, difficulty: Difficulty) -> Result<Vec<Command>, GameError> {
        let deck = DeckBuilder::new().build(difficulty.pairs());
        let session = MemorySession::new(difficulty, deck)?;

        self.mode = GameMode::Memory;
        self.memory_epoch += 1;
        self.memory = Some(session);
        self.board_message = None;
        Ok(vec![Command::StartClock(GameMode::Memory)])
    }

    fn pick_card(&mut self, id: CardId) -> Vec<Command> {
        if self.mode != GameMode::Memory {
            return Vec::new();
        }
        let Some(session) = self.memory.as_mut() else {
            return Vec::new();
        };
        match session.select(id) {
            SelectOutcome::TurnPlayed { .. } => vec![Command::ScheduleResolve {
                epoch: self.memory_epoch,
            }],
            SelectOutcome::FirstRevealed | SelectOutcome::Ignored => Vec::new(),
        }
    }

    fn resolve_turn(&mut self, epoch: u64) -> Vec<Command> {
        if epoch != self.memory_epoch {
            return Vec::new();
        }
        let Some(session) = self.memory.as_mut() else {
            return Vec::new();
        };
        let Some(outcome) = session.resolve_turn() else {
            return Vec::new();
        };
        if !outcome.completed {
            return Vec::new();
        }

        let score = session.score();
        let payload = MemoryScorePayload {
            difficulty: session.difficulty(),
            score,
            moves: session.moves(),
            seconds: session.seconds(),
        };
        self.board_message = Some(format!("You won! Score: {score}"));
        vec![
            Command::StopClock(GameMode::Memory),
            Command::SubmitMemory {
                epoch,
                payload,
                score,
            },
        ]
    }

    fn memory_submitted(
        &mut self,
        epoch: u64,
        score: u32,
        outcome: &Result<(), String>,
    ) -> Vec<Command> {
        if epoch != self.memory_epoch {
            return Vec::new();
        }
        self.board_message = Some(match outcome {
            Ok(()) => format!("You won! Score: {score} - saved"),
            Err(message) => format!("You won! Score: {score} - save failed: {message}"),
        });
        vec![Command::ScheduleReset { epoch }]
    }

    fn reset_board(&mut self, epoch: u64) -> Vec<Command> {
        if epoch != self.memory_epoch {
            return Vec::new();
        }
        if let Some(session) = self.memory.as_mut() {
            session.reset_to_idle();
        }
        Vec::new()
    }

    //
    // ─── QUIZ ──────────────────────────────────────────────────────────────
    //

    fn start_quiz(&mut self) -> Result<Vec<Command>, GameError> {
        let questions = QuizBuilder::new().build(catalog::QUIZ_LENGTH)?;
        let session = QuizSession::new(questions)?;

        self.mode = GameMode::Quiz;
        self.quiz_epoch += 1;
        self.quiz = Some(session);
        self.last_answer = None;
        self.quiz_message = None;
        Ok(vec![Command::StartClock(GameMode::Quiz)])
    }

    fn answer(&mut self, choice: usize) -> Vec<Command> {
        if self.mode != GameMode::Quiz {
            return Vec::new();
        }
        if let Some(outcome) = self.quiz.as_mut().and_then(|s| s.answer(choice)) {
            self.last_answer = Some(outcome);
        }
        Vec::new()
    }

    fn advance(&mut self) -> Vec<Command> {
        if self.mode != GameMode::Quiz {
            return Vec::new();
        }
        let Some(session) = self.quiz.as_mut() else {
            return Vec::new();
        };
        match session.advance() {
            QuizAdvance::Ignored => Vec::new(),
            QuizAdvance::Next => {
                self.last_answer = None;
                Vec::new()
            }
            QuizAdvance::Finished => {
                self.last_answer = None;
                let summary = session.summary();
                self.quiz_message = Some(summary.to_string());
                vec![
                    Command::StopClock(GameMode::Quiz),
                    Command::SubmitQuiz {
                        epoch: self.quiz_epoch,
                        payload: QuizScorePayload {
                            score: summary.points,
                            total: summary.total,
                            seconds: summary.seconds,
                        },
                    },
                ]
            }
        }
    }

    fn quiz_submitted(&mut self, epoch: u64, outcome: &Result<(), String>) -> Vec<Command> {
        if epoch != self.quiz_epoch {
            return Vec::new();
        }
        if let Some(message) = self.quiz_message.as_mut() {
            match outcome {
                Ok(()) => message.push_str(" - saved"),
                Err(reason) => {
                    message.push_str(" - save failed: ");
                    message.push_str(reason);
                }
            }
        }
        Vec::new()
    }

    //
    // ─── TIME ──────────────────────────────────────────────────────────────
    //

    fn tick(&mut self, mode: GameMode) -> Vec<Command> {
        match mode {
            GameMode::Memory => {
                if let Some(session) = self.memory.as_mut() {
                    session.tick();
                }
            }
            GameMode::Quiz => {
                if let Some(session) = self.quiz.as_mut() {
                    session.tick();
                }
            }
        }
        Vec::new()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
