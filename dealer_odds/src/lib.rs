pub mod calculation;
mod card_count;
mod error;
pub mod simulation;

use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
pub use card_count::CardCount;
pub use error::Error;

/// Card values a single deck contributes, ten/face cards collapsed to 10 and Ace counted as 11.
pub const RANK_TEMPLATE: [u8; 13] = [2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10, 11];
pub const ACE: u8 = 11;
pub const TEN: u8 = 10;
/// The dealer draws while the hand value is below this, soft or hard.
pub const DEALER_STAND_VALUE: u16 = 17;
pub const BLACKJACK_VALUE: u16 = 21;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rule {
    pub number_of_decks: u8,
    /// Fraction of one deck per deck left in the shoe that triggers a reshuffle.
    pub penetration: f64,
    pub expansion_policy: ExpansionPolicy,
    pub seed: Option<u64>,
}

impl Rule {
    pub fn validate(&self) -> Result<(), Error> {
        if self.number_of_decks == 0 {
            return Err(Error::InvalidRule(String::from(
                "number_of_decks must be at least 1",
            )));
        }
        if !(self.penetration > 0.0 && self.penetration < 1.0) {
            return Err(Error::InvalidRule(format!(
                "penetration must be in (0, 1), got {}",
                self.penetration
            )));
        }
        Ok(())
    }
}

impl Default for Rule {
    fn default() -> Self {
        Rule {
            number_of_decks: 6,
            penetration: 0.25,
            expansion_policy: ExpansionPolicy::Memoized,
            seed: None,
        }
    }
}

/// How the outcome-probability engine walks the draw tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_enum_str, Deserialize_enum_str)]
pub enum ExpansionPolicy {
    /// Expand every rank slot of every branch.
    FullTree,
    /// Reuse subtrees reached again at the same running value and depth.
    Memoized,
}
