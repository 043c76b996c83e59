use rand::rng;
use rand::seq::SliceRandom;

use quizdeck_core::catalog;
use quizdeck_core::{Card, CardId};

/// Deals a shuffled memory deck: distinct labels drawn from the vocabulary,
/// duplicated into pairs, each card with a fresh identity.
pub struct DeckBuilder<'a> {
    vocabulary: &'a [&'a str],
}

impl Default for DeckBuilder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckBuilder<'static> {
    /// Builder over the built-in term vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vocabulary: &catalog::TERMS,
        }
    }
}

impl<'a> DeckBuilder<'a> {
    #[must_use]
    pub fn with_vocabulary(vocabulary: &'a [&'a str]) -> Self {
        Self { vocabulary }
    }

    /// Builds a deck of `2 * pair_count` cards in uniformly random order.
    ///
    /// A request for more pairs than the vocabulary holds degrades to the
    /// vocabulary size rather than dealing colliding labels.
    #[must_use]
    pub fn build(&self, pair_count: u32) -> Vec<Card> {
        let requested = usize::try_from(pair_count).unwrap_or(usize::MAX);
        let take = requested.min(self.vocabulary.len());

        let mut rng = rng();
        let mut labels: Vec<&str> = self.vocabulary.to_vec();
        labels.shuffle(&mut rng);
        labels.truncate(take);

        let mut deck: Vec<Card> = labels
            .into_iter()
            .flat_map(|label| [Card::new(CardId::new(), label), Card::new(CardId::new(), label)])
            .collect();
        deck.shuffle(&mut rng);
        deck
    }
}
