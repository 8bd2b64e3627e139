use crate::{CardCount, Error, RANK_TEMPLATE};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A shoe of card values. Suits are irrelevant to the dealer, so every card is kept as
/// its blackjack value (2 to 11).
#[derive(Debug, Clone)]
pub struct Shoe {
    number_of_decks: u8,
    reshuffle_threshold: f64,
    cards: Vec<u8>,
    current_index: usize,
    rng: StdRng,
}

impl Shoe {
    /// Creates a new shuffled shoe. It is reshuffled before a deal once fewer than
    /// `penetration * number_of_decks * 13` cards remain.
    pub fn new(number_of_decks: u8, penetration: f64) -> Shoe {
        Self::with_rng(number_of_decks, penetration, StdRng::from_entropy())
    }

    /// Same as `new`, but every shuffle is reproducible from `seed`.
    pub fn with_seed(number_of_decks: u8, penetration: f64, seed: u64) -> Shoe {
        Self::with_rng(number_of_decks, penetration, StdRng::seed_from_u64(seed))
    }

    fn with_rng(number_of_decks: u8, penetration: f64, rng: StdRng) -> Shoe {
        let mut shoe = Shoe {
            number_of_decks,
            reshuffle_threshold: penetration * number_of_decks as f64 * 13.0,
            cards: Vec::with_capacity(number_of_decks as usize * 52),
            current_index: 0,
            rng,
        };
        shoe.reset();
        shoe
    }

    /// Puts every card back and shuffles. Nothing of the previous order is kept.
    pub fn reset(&mut self) {
        self.cards.clear();
        for _ in 0..self.number_of_decks {
            for _suit in 0..4 {
                self.cards.extend_from_slice(&RANK_TEMPLATE);
            }
        }
        self.cards.shuffle(&mut self.rng);
        self.current_index = 0;
        log::debug!("Shoe reshuffled with {} cards", self.cards.len());
    }

    /// Deals the next card, reshuffling first if the threshold has been reached or
    /// the shoe has run out.
    pub fn deal(&mut self) -> Result<u8, Error> {
        if self.needs_reshuffle() || self.remaining() == 0 {
            self.reset();
        }
        if self.remaining() == 0 {
            return Err(Error::EmptyShoe);
        }

        let card = self.cards[self.current_index];
        self.current_index += 1;
        Ok(card)
    }

    pub fn needs_reshuffle(&self) -> bool {
        (self.remaining() as f64) < self.reshuffle_threshold
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.current_index
    }

    /// The next few cards in dealing order, without dealing them.
    pub fn preview(&self, number_of_cards: usize) -> &[u8] {
        let end = (self.current_index + number_of_cards).min(self.cards.len());
        &self.cards[self.current_index..end]
    }

    /// Composition of the shoe when full, regardless of what has been dealt.
    pub fn get_full_card_count(&self) -> CardCount {
        CardCount::with_number_of_decks(self.number_of_decks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number_of_cards_is_correct(shoe: &Shoe) -> bool {
        let mut counts = [0; 10];
        for card in &shoe.cards {
            counts[(*card - 2) as usize] += 1;
        }
        CardCount::new(&counts) == shoe.get_full_card_count()
    }

    #[test]
    fn new_shoe_is_full() {
        for number_of_decks in 1..=8 {
            let shoe = Shoe::new(number_of_decks, 0.25);
            assert!(number_of_cards_is_correct(&shoe));
            assert_eq!(shoe.remaining(), number_of_decks as usize * 52);
            assert_eq!(shoe.get_full_card_count().get_total(), number_of_decks as u16 * 52);
        }
    }

    #[test]
    fn dealing_shrinks_the_shoe() {
        let mut shoe = Shoe::with_seed(2, 0.5, 7);
        for k in 1..=50 {
            shoe.deal().unwrap();
            assert_eq!(shoe.remaining(), 104 - k);
        }
    }

    #[test]
    fn reshuffles_once_threshold_is_crossed() {
        let mut shoe = Shoe::with_seed(1, 0.5, 42);
        assert_eq!(shoe.reshuffle_threshold, 6.5);
        for _ in 0..46 {
            shoe.deal().unwrap();
        }
        assert_eq!(shoe.remaining(), 6);
        assert!(shoe.needs_reshuffle());

        shoe.deal().unwrap();
        assert_eq!(shoe.remaining(), 51);
        assert!(number_of_cards_is_correct(&shoe));
    }

    #[test]
    fn no_reshuffle_above_threshold() {
        let mut shoe = Shoe::with_seed(1, 0.5, 42);
        for _ in 0..45 {
            shoe.deal().unwrap();
        }
        assert_eq!(shoe.remaining(), 7);
        assert!(!shoe.needs_reshuffle());
        shoe.deal().unwrap();
        assert_eq!(shoe.remaining(), 6);
    }

    #[test]
    fn preview_matches_dealing_order() {
        let mut shoe = Shoe::with_seed(2, 0.25, 3);
        let firsts = shoe.preview(4).to_vec();
        assert_eq!(firsts.len(), 4);
        for card in firsts {
            assert_eq!(shoe.deal().unwrap(), card);
        }
        assert_eq!(shoe.get_full_card_count(), CardCount::with_number_of_decks(2));
    }

    #[test]
    fn runs_out_and_reshuffles_without_penetration() {
        let mut shoe = Shoe::with_seed(1, 0.0, 11);
        for k in 0..520 {
            shoe.deal().unwrap();
            assert_eq!(shoe.remaining(), 51 - k % 52);
        }
        assert!(number_of_cards_is_correct(&shoe));
    }

    #[test]
    fn same_seed_deals_same_cards() {
        let mut a = Shoe::with_seed(6, 0.25, 2024);
        let mut b = Shoe::with_seed(6, 0.25, 2024);
        for _ in 0..400 {
            assert_eq!(a.deal(), b.deal());
        }
    }

    #[test]
    fn empty_shoe_cannot_deal() {
        let mut shoe = Shoe::new(0, 0.25);
        assert_eq!(shoe.deal(), Err(Error::EmptyShoe));
    }
}
