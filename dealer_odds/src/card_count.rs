use std::ops::Index;

use crate::RANK_TEMPLATE;

const MIN_RANK: u8 = 2;

/// This provides a container to store the numbers of each card value (from
/// 2 to 11 inclusive, where 11 is Ace and 10 covers T, J, Q and K).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardCount {
    counts: [u16; 10],
    total: u16,
}

impl CardCount {
    pub fn new(counts: &[u16; 10]) -> CardCount {
        let mut card_count = CardCount {
            counts: *counts,
            total: 0,
        };

        card_count.propagate_counts();

        card_count
    }

    /// The composition of a full shoe, i.e. `RANK_TEMPLATE` repeated four times per deck.
    pub fn with_number_of_decks(number_of_decks: u8) -> CardCount {
        let mut counts = [0; 10];
        for rank in RANK_TEMPLATE {
            counts[(rank - MIN_RANK) as usize] += 4 * number_of_decks as u16;
        }
        Self::new(&counts)
    }

    pub fn get_total(&self) -> u16 {
        self.total
    }

    fn propagate_counts(&mut self) {
        self.total = self.counts.iter().sum();
    }
}

impl Index<u8> for CardCount {
    type Output = u16;
    fn index(&self, index: u8) -> &Self::Output {
        &self.counts[(index - MIN_RANK) as usize]
    }
}
