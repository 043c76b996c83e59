use crate::model::ids::CardId;

/// A single face-down card on the memory board.
///
/// Exactly two cards in a deck share a label. `matched` implies the card
/// was revealed when its pair was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    id: CardId,
    label: String,
    revealed: bool,
    matched: bool,
}

impl Card {
    /// Creates a new hidden, unmatched card.
    #[must_use]
    pub fn new(id: CardId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            revealed: false,
            matched: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.matched
    }

    // Mutation is reserved for the memory session so the two-revealed-cards
    // invariant cannot be broken from outside.
    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn hide(&mut self) {
        self.revealed = false;
    }

    pub(crate) fn set_matched(&mut self) {
        self.matched = true;
    }

    pub(crate) fn reset(&mut self) {
        self.revealed = false;
        self.matched = false;
    }
}
