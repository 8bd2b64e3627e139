use std::fmt;

use crate::{ACE, BLACKJACK_VALUE};

/// Value of a hand under its current Ace resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandValue {
    /// At least one Ace still counts as 11. `hard_part` sums every other card,
    /// including Aces already counted as 1.
    Soft { hard_part: u16, soft_aces: u16 },
    Hard(u16),
}

impl HandValue {
    pub fn total(&self) -> u16 {
        match *self {
            HandValue::Soft {
                hard_part,
                soft_aces,
            } => hard_part + soft_aces * ACE as u16,
            HandValue::Hard(total) => total,
        }
    }

    pub fn is_soft(&self) -> bool {
        matches!(self, HandValue::Soft { .. })
    }

    /// Adds a card with Aces counted as 11, without resolving anything.
    pub fn with_card(self, card: u8) -> HandValue {
        match (self, card) {
            (HandValue::Hard(total), ACE) => HandValue::Soft {
                hard_part: total,
                soft_aces: 1,
            },
            (HandValue::Hard(total), _) => HandValue::Hard(total + card as u16),
            (
                HandValue::Soft {
                    hard_part,
                    soft_aces,
                },
                ACE,
            ) => HandValue::Soft {
                hard_part,
                soft_aces: soft_aces + 1,
            },
            (
                HandValue::Soft {
                    hard_part,
                    soft_aces,
                },
                _,
            ) => HandValue::Soft {
                hard_part: hard_part + card as u16,
                soft_aces,
            },
        }
    }

    /// Over 21 with soft Aces: every one of them drops to 1 at once.
    pub fn resolve(self) -> HandValue {
        match self {
            HandValue::Soft {
                hard_part,
                soft_aces,
            } if self.total() > BLACKJACK_VALUE => HandValue::Hard(hard_part + soft_aces),
            _ => self,
        }
    }

    /// A pair of Aces is one hard Ace and one soft Ace, i.e. soft 12.
    fn pair_of_aces() -> HandValue {
        HandValue::Soft {
            hard_part: 1,
            soft_aces: 1,
        }
    }

    /// Replays `cards` in dealing order, resolving after every card as the hand does.
    pub fn from_cards(cards: &[u8]) -> HandValue {
        let mut value = HandValue::Hard(0);
        for (i, &card) in cards.iter().enumerate() {
            value = if i == 1 && cards[0] == ACE && card == ACE {
                HandValue::pair_of_aces()
            } else {
                value.with_card(card).resolve()
            };
        }
        value
    }
}

impl Default for HandValue {
    fn default() -> Self {
        HandValue::Hard(0)
    }
}

/// The dealer's cards of one round.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<u8>,
    value: HandValue,
    busted: bool,
}

impl Hand {
    pub fn new() -> Hand {
        Hand {
            cards: Vec::with_capacity(6),
            value: HandValue::default(),
            busted: false,
        }
    }

    pub fn add_card(&mut self, card: u8) {
        self.cards.push(card);
        self.evaluate();
    }

    /// Recomputes the value from the cards and marks the hand busted if it is still
    /// over 21 after the Aces have been resolved. Returns the resulting value.
    pub fn evaluate(&mut self) -> u16 {
        self.value = HandValue::from_cards(&self.cards);
        let total = self.value.total();
        if total > BLACKJACK_VALUE {
            self.busted = true;
        }
        total
    }

    pub fn value(&self) -> u16 {
        self.value.total()
    }

    pub fn hand_value(&self) -> HandValue {
        self.value
    }

    pub fn cards(&self) -> &[u8] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_soft(&self) -> bool {
        self.value.is_soft()
    }

    pub fn is_busted(&self) -> bool {
        self.busted || self.value() > BLACKJACK_VALUE
    }

    pub fn is_bj(&self) -> bool {
        self.value() == BLACKJACK_VALUE && self.cards.len() == 2
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", card)?;
        }
        write!(f, "]")
    }
}
