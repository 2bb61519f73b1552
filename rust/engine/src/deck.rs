use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;
use crate::player::Player;

/// Ordered sequence of the cards not yet dealt. Created fresh for every hand.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// Full deck in factory order backed by an unpredictable RNG.
    pub fn new() -> Self {
        Self::with_rng(ChaCha20Rng::from_rng(&mut rand::rng()))
    }

    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: ChaCha20Rng) -> Self {
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    /// Fisher-Yates over the remaining cards.
    pub fn shuffle(&mut self) {
        let position = self.position;
        self.cards[position..].shuffle(&mut self.rng);
    }

    pub fn deal_one(&mut self) -> Result<Card, GameError> {
        let card = self
            .cards
            .get(self.position)
            .copied()
            .ok_or(GameError::EmptyDeck)?;
        self.position += 1;
        Ok(card)
    }

    pub fn burn_one(&mut self) -> Result<(), GameError> {
        self.deal_one().map(|_| ())
    }

    pub fn deal_flop(&mut self) -> Result<[Card; 3], GameError> {
        self.burn_one()?;
        Ok([self.deal_one()?, self.deal_one()?, self.deal_one()?])
    }

    pub fn deal_turn(&mut self) -> Result<Card, GameError> {
        self.burn_one()?;
        self.deal_one()
    }

    pub fn deal_river(&mut self) -> Result<Card, GameError> {
        self.deal_turn()
    }

    /// Deals two cards to every seated player with an empty hand, one card per
    /// pass around the table. Eliminated seats are skipped.
    pub fn deal_to_players(&mut self, players: &mut [Player]) -> Result<(), GameError> {
        let needed = players
            .iter()
            .filter(|p| !p.is_eliminated() && p.hand.is_empty())
            .count()
            * 2;
        if needed > self.remaining() {
            return Err(GameError::EmptyDeck);
        }
        let receivers: Vec<usize> = players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_eliminated() && p.hand.is_empty())
            .map(|(i, _)| i)
            .collect();
        for _ in 0..2 {
            for &i in &receivers {
                let card = self.deal_one()?;
                players[i].hand.push(card);
            }
        }
        Ok(())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    /// Cards still in the deck, next card first.
    pub fn remaining_cards(&self) -> &[Card] {
        &self.cards[self.position..]
    }
}
