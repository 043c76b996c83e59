use std::collections::HashMap;
use thiserror::Error;

use crate::model::card::Card;
use crate::model::difficulty::Difficulty;
use crate::model::ids::CardId;
use crate::score;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MemoryError {
    #[error("deck is empty")]
    EmptyDeck,

    #[error("label {label:?} appears {count} times, expected exactly 2")]
    UnpairedLabel { label: String, count: usize },

    #[error("duplicate card id in deck")]
    DuplicateCardId,
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// What a single `select` call did.
///
/// `Ignored` covers every invariant violation (unknown id, matched or already
/// revealed card, locked input, idle session); those are silent no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Ignored,
    /// First card of a turn was flipped; the turn stays open.
    FirstRevealed,
    /// Second card was flipped; input is now locked until the turn resolves.
    TurnPlayed { matched: bool },
}

/// Result of resolving a locked turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    pub matched: bool,
    /// True when this turn matched the final pair.
    pub completed: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State machine for one memory-match game.
///
/// Holds the shuffled deck plus turn bookkeeping. At most two cards are
/// revealed-but-unmatched at any time; while two are, `is_locked` is true and
/// every `select` is ignored until `resolve_turn` runs.
#[derive(Debug, Clone)]
pub struct MemorySession {
    difficulty: Difficulty,
    pairs: u32,
    deck: Vec<Card>,
    first: Option<CardId>,
    second: Option<CardId>,
    locked: bool,
    moves: u32,
    matches: u32,
    seconds: u32,
    running: bool,
}

impl MemorySession {
    /// Starts a session over an already-built deck.
    ///
    /// # Errors
    ///
    /// Returns `MemoryError` if the deck is empty, contains a label that does
    /// not appear exactly twice, or reuses a card id.
    pub fn new(difficulty: Difficulty, deck: Vec<Card>) -> Result<Self, MemoryError> {
        if deck.is_empty() {
            return Err(MemoryError::EmptyDeck);
        }

        let mut label_counts: HashMap<&str, usize> = HashMap::new();
        let mut ids = Vec::with_capacity(deck.len());
        for card in &deck {
            *label_counts.entry(card.label()).or_insert(0) += 1;
            ids.push(card.id());
        }
        ids.sort_unstable();
        ids.dedup();
        if ids.len() != deck.len() {
            return Err(MemoryError::DuplicateCardId);
        }
        if let Some((label, count)) = label_counts.into_iter().find(|(_, c)| *c != 2) {
            return Err(MemoryError::UnpairedLabel {
                label: label.to_owned(),
                count,
            });
        }

        let pairs = u32::try_from(deck.len() / 2).unwrap_or(u32::MAX);
        Ok(Self {
            difficulty,
            pairs,
            deck,
            first: None,
            second: None,
            locked: false,
            moves: 0,
            matches: 0,
            seconds: 0,
            running: true,
        })
    }

    // Accessors
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn columns(&self) -> u32 {
        self.difficulty.columns()
    }

    #[must_use]
    pub fn pairs(&self) -> u32 {
        self.pairs
    }

    #[must_use]
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn matches(&self) -> u32 {
        self.matches
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

    /// `matches == pairs` is the unique terminal condition.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.matches == self.pairs
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.deck.iter().find(|c| c.id() == id)
    }

    /// Score for the session as played so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        score::memory_score(self.pairs, self.moves, self.seconds)
    }

    /// Advance the elapsed-time counter by one second.
    pub fn tick(&mut self) {
        if self.running {
            self.seconds = self.seconds.saturating_add(1);
        }
    }

    /// Flip the named card.
    ///
    /// The second flip of a turn records the label comparison and locks input;
    /// the board change itself (match or hide) is applied later by
    /// `resolve_turn`, after the caller's cosmetic delay.
    pub fn select(&mut self, id: CardId) -> SelectOutcome {
        if !self.running || self.locked {
            return SelectOutcome::Ignored;
        }
        {
            let Some(card) = self.deck.iter_mut().find(|c| c.id() == id) else {
                return SelectOutcome::Ignored;
            };
            if card.is_matched() || card.is_revealed() {
                return SelectOutcome::Ignored;
            }
            card.reveal();
        }

        if self.first.is_none() {
            self.first = Some(id);
            return SelectOutcome::FirstRevealed;
        }

        self.second = Some(id);
        self.moves = self.moves.saturating_add(1);
        self.locked = true;

        let matched = self.pending_match();
        SelectOutcome::TurnPlayed { matched }
    }

    /// Apply the pending turn: match both cards or hide both, then release
    /// the input lock. Returns `None` when no turn is pending.
    pub fn resolve_turn(&mut self) -> Option<TurnOutcome> {
        let (Some(first), Some(second)) = (self.first, self.second) else {
            return None;
        };

        let matched = self.pending_match();
        for id in [first, second] {
            if let Some(card) = self.deck.iter_mut().find(|c| c.id() == id) {
                if matched {
                    card.set_matched();
                } else {
                    card.hide();
                }
            }
        }
        if matched {
            self.matches = self.matches.saturating_add(1);
        }

        self.first = None;
        self.second = None;
        self.locked = false;

        let completed = self.is_complete();
        if completed {
            self.running = false;
        }
        Some(TurnOutcome { matched, completed })
    }

    /// Return the board to its idle state: counters zeroed, every card hidden,
    /// session no longer running. The deck itself is kept.
    pub fn reset_to_idle(&mut self) {
        self.running = false;
        self.locked = false;
        self.first = None;
        self.second = None;
        self.moves = 0;
        self.matches = 0;
        self.seconds = 0;
        for card in &mut self.deck {
            card.reset();
        }
    }

    fn pending_match(&self) -> bool {
        match (self.first, self.second) {
            (Some(a), Some(b)) => {
                let a = self.card(a).map(Card::label);
                let b = self.card(b).map(Card::label);
                matches!((a, b), (Some(a), Some(b)) if a == b)
            }
            _ => false,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::CardId;

    fn paired_deck(labels: &[&str]) -> Vec<Card> {
        let mut deck = Vec::new();
        for label in labels {
            deck.push(Card::new(CardId::new(), *label));
            deck.push(Card::new(CardId::new(), *label));
        }
        deck
    }

    fn session(labels: &[&str]) -> MemorySession {
        MemorySession::new(Difficulty::Easy, paired_deck(labels)).unwrap()
    }

    /// Ids of the two cards carrying `label`.
    fn pair_ids(session: &MemorySession, label: &str) -> (CardId, CardId) {
        let ids: Vec<CardId> = session
            .deck()
            .iter()
            .filter(|c| c.label() == label)
            .map(Card::id)
            .collect();
        (ids[0], ids[1])
    }

    #[test]
    fn rejects_empty_deck() {
        let err = MemorySession::new(Difficulty::Easy, Vec::new()).unwrap_err();
        assert_eq!(err, MemoryError::EmptyDeck);
    }

    #[test]
    fn rejects_unpaired_label() {
        let mut deck = paired_deck(&["SQL"]);
        deck.push(Card::new(CardId::new(), "SQL"));
        let err = MemorySession::new(Difficulty::Easy, deck).unwrap_err();
        assert!(matches!(err, MemoryError::UnpairedLabel { count: 3, .. }));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let id = CardId::new();
        let deck = vec![Card::new(id, "CSS"), Card::new(id, "CSS")];
        let err = MemorySession::new(Difficulty::Easy, deck).unwrap_err();
        assert_eq!(err, MemoryError::DuplicateCardId);
    }

    #[test]
    fn first_selection_keeps_turn_open() {
        let mut s = session(&["Rust", "Go"]);
        let (a, _) = pair_ids(&s, "Rust");
        assert_eq!(s.select(a), SelectOutcome::FirstRevealed);
        assert!(!s.is_locked());
        assert_eq!(s.moves(), 0);
        assert!(s.card(a).unwrap().is_revealed());
    }

    #[test]
    fn matching_turn_marks_both_and_counts() {
        let mut s = session(&["Rust", "Go"]);
        let (a, b) = pair_ids(&s, "Rust");
        s.select(a);
        assert_eq!(s.select(b), SelectOutcome::TurnPlayed { matched: true });
        assert!(s.is_locked());
        assert_eq!(s.moves(), 1);

        let outcome = s.resolve_turn().unwrap();
        assert!(outcome.matched);
        assert!(!outcome.completed);
        assert_eq!(s.matches(), 1);
        assert!(!s.is_locked());
        assert!(s.card(a).unwrap().is_matched());
        assert!(s.card(b).unwrap().is_matched());
    }

    #[test]
    fn mismatching_turn_hides_both() {
        let mut s = session(&["Rust", "Go"]);
        let (a, _) = pair_ids(&s, "Rust");
        let (b, _) = pair_ids(&s, "Go");
        s.select(a);
        assert_eq!(s.select(b), SelectOutcome::TurnPlayed { matched: false });

        let outcome = s.resolve_turn().unwrap();
        assert!(!outcome.matched);
        // Never one hidden and one revealed after a resolved turn.
        assert!(!s.card(a).unwrap().is_revealed());
        assert!(!s.card(b).unwrap().is_revealed());
        assert_eq!(s.matches(), 0);
        assert!(!s.is_locked());
    }

    #[test]
    fn select_is_noop_while_locked() {
        let mut s = session(&["Rust", "Go"]);
        let (a, _) = pair_ids(&s, "Rust");
        let (b, _) = pair_ids(&s, "Go");
        let (c, _) = pair_ids(&s, "Go");
        s.select(a);
        s.select(b);
        assert_eq!(s.select(c), SelectOutcome::Ignored);
        assert_eq!(s.moves(), 1);
    }

    #[test]
    fn select_is_noop_on_revealed_matched_or_unknown_cards() {
        let mut s = session(&["Rust", "Go"]);
        let (a, b) = pair_ids(&s, "Rust");

        s.select(a);
        // Same card twice does not close the turn.
        assert_eq!(s.select(a), SelectOutcome::Ignored);
        s.select(b);
        s.resolve_turn();

        // Matched cards are inert.
        assert_eq!(s.select(a), SelectOutcome::Ignored);
        // Unknown ids are inert.
        assert_eq!(s.select(CardId::new()), SelectOutcome::Ignored);
        assert_eq!(s.moves(), 1);
    }

    #[test]
    fn resolve_without_pending_turn_is_none() {
        let mut s = session(&["Rust"]);
        assert!(s.resolve_turn().is_none());
        let (a, _) = pair_ids(&s, "Rust");
        s.select(a);
        assert!(s.resolve_turn().is_none());
    }

    #[test]
    fn final_match_completes_and_stops_session() {
        let mut s = session(&["Rust"]);
        let (a, b) = pair_ids(&s, "Rust");
        s.select(a);
        s.select(b);
        let outcome = s.resolve_turn().unwrap();
        assert!(outcome.matched);
        assert!(outcome.completed);
        assert!(s.is_complete());
        assert!(!s.is_running());
    }

    #[test]
    fn tick_counts_only_while_running() {
        let mut s = session(&["Rust"]);
        s.tick();
        s.tick();
        assert_eq!(s.seconds(), 2);
        s.reset_to_idle();
        s.tick();
        assert_eq!(s.seconds(), 0);
    }

    #[test]
    fn reset_returns_board_to_idle() {
        let mut s = session(&["Rust", "Go"]);
        let (a, b) = pair_ids(&s, "Rust");
        s.select(a);
        s.select(b);
        s.resolve_turn();
        s.tick();

        s.reset_to_idle();
        assert!(!s.is_running());
        assert!(!s.is_locked());
        assert_eq!(s.moves(), 0);
        assert_eq!(s.matches(), 0);
        assert_eq!(s.seconds(), 0);
        assert!(s.deck().iter().all(|c| !c.is_revealed() && !c.is_matched()));
        // Deck itself is preserved for the next start.
        assert_eq!(s.deck().len(), 4);
    }
}
