//! Async shell around [`GameController`].
//!
//! The controller is synchronous; everything time-shaped lives here: per-game
//! second clocks, the reveal and reset delays, and fire-and-forget score
//! submissions. All of it reports back by sending events into one channel,
//! so the controller only ever runs on the caller's task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::api::ResultSubmitter;
use crate::error::GameError;
use crate::games::{Command, GameController, GameEvent, GameMode};

/// Board pause between the second flip and the turn being resolved.
const REVEAL_DELAY: Duration = Duration::from_millis(650);
/// Pause between the win banner and the board returning to idle.
const RESET_DELAY: Duration = Duration::from_millis(900);

//
// ─── CLOCK ─────────────────────────────────────────────────────────────────────
//

/// A 1 Hz ticker feeding `Tick` events into the loop's channel.
///
/// Restartable; starting again replaces the previous ticker.
struct SessionClock {
    handle: Option<JoinHandle<()>>,
}

impl SessionClock {
    fn idle() -> Self {
        Self { handle: None }
    }

    fn start(&mut self, tx: UnboundedSender<GameEvent>, mode: GameMode) {
        self.stop();
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick completes immediately; the clock starts at zero.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(GameEvent::Tick(mode)).is_err() {
                    break;
                }
            }
        }));
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for SessionClock {
    fn drop(&mut self) {
        self.stop();
    }
}

//
// ─── LOOP ──────────────────────────────────────────────────────────────────────
//

/// Runs both games against a score submitter.
///
/// Callers feed player input through [`handle`](Self::handle) and pump
/// background completions with [`recv`](Self::recv), passing each received
/// event back into `handle`. Must live inside a tokio runtime.
pub struct GameLoop {
    controller: GameController,
    submitter: Arc<dyn ResultSubmitter>,
    tx: UnboundedSender<GameEvent>,
    rx: UnboundedReceiver<GameEvent>,
    memory_clock: SessionClock,
    quiz_clock: SessionClock,
    reveal_delay: Duration,
    reset_delay: Duration,
}

impl GameLoop {
    #[must_use]
    pub fn new(submitter: Arc<dyn ResultSubmitter>) -> Self {
        Self::with_delays(submitter, REVEAL_DELAY, RESET_DELAY)
    }

    /// Loop with explicit delays; tests use zero to keep flows instantaneous.
    #[must_use]
    pub fn with_delays(
        submitter: Arc<dyn ResultSubmitter>,
        reveal_delay: Duration,
        reset_delay: Duration,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            controller: GameController::new(),
            submitter,
            tx,
            rx,
            memory_clock: SessionClock::idle(),
            quiz_clock: SessionClock::idle(),
            reveal_delay,
            reset_delay,
        }
    }

    #[must_use]
    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// Apply one event and launch whatever background work it demands.
    ///
    /// # Errors
    ///
    /// Returns `GameError` when session construction fails.
    pub fn handle(&mut self, event: GameEvent) -> Result<(), GameError> {
        let commands = self.controller.dispatch(event)?;
        for command in commands {
            self.run(command);
        }
        Ok(())
    }

    /// Next background-generated event (ticks, delayed resolves, submission
    /// results). `None` only once every sender is gone.
    pub async fn recv(&mut self) -> Option<GameEvent> {
        self.rx.recv().await
    }

    fn run(&mut self, command: Command) {
        match command {
            Command::StartClock(GameMode::Memory) => {
                self.memory_clock.start(self.tx.clone(), GameMode::Memory);
            }
            Command::StartClock(GameMode::Quiz) => {
                self.quiz_clock.start(self.tx.clone(), GameMode::Quiz);
            }
            Command::StopClock(GameMode::Memory) => self.memory_clock.stop(),
            Command::StopClock(GameMode::Quiz) => self.quiz_clock.stop(),

            Command::ScheduleResolve { epoch } => {
                self.send_after(self.reveal_delay, GameEvent::ResolveTurn { epoch });
            }
            Command::ScheduleReset { epoch } => {
                self.send_after(self.reset_delay, GameEvent::ResetBoard { epoch });
            }

            Command::SubmitMemory {
                epoch,
                payload,
                score,
            } => {
                let submitter = Arc::clone(&self.submitter);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let outcome = submitter.submit_memory(&payload).await.map_err(|err| {
                        warn!(error = %err, "memory score submission failed");
                        err.user_message()
                    });
                    let _ = tx.send(GameEvent::MemorySubmitted {
                        epoch,
                        score,
                        outcome,
                    });
                });
            }
            Command::SubmitQuiz { epoch, payload } => {
                let submitter = Arc::clone(&self.submitter);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let outcome = submitter.submit_quiz(&payload).await.map_err(|err| {
                        warn!(error = %err, "quiz score submission failed");
                        err.user_message()
                    });
                    let _ = tx.send(GameEvent::QuizSubmitted { epoch, outcome });
                });
            }
        }
    }

    fn send_after(&self, delay: Duration, event: GameEvent) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(event);
        });
    }
}
