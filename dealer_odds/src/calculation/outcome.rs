use std::ops::Index;

use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::BLACKJACK_VALUE;

/// Where a dealer's hand can end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
pub enum Outcome {
    #[strum(serialize = "17")]
    Stand17,
    #[strum(serialize = "18")]
    Stand18,
    #[strum(serialize = "19")]
    Stand19,
    #[strum(serialize = "20")]
    Stand20,
    #[strum(serialize = "21")]
    Stand21,
    #[strum(serialize = "Bust")]
    Bust,
}

impl Outcome {
    /// The bucket of a final hand value, or `None` below 17 where the dealer keeps
    /// drawing.
    pub fn of_value(value: u16) -> Option<Outcome> {
        match value {
            17 => Some(Outcome::Stand17),
            18 => Some(Outcome::Stand18),
            19 => Some(Outcome::Stand19),
            20 => Some(Outcome::Stand20),
            21 => Some(Outcome::Stand21),
            v if v > BLACKJACK_VALUE => Some(Outcome::Bust),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Percentages (0 to 100) of each final dealer outcome, in `Outcome` order.
/// Because of how draws are approximated they need not sum to exactly 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OutcomeDistribution {
    percentages: [f64; 6],
    /// Chance of a natural from a lone Ace or ten. Not part of the six buckets.
    natural: f64,
}

impl OutcomeDistribution {
    pub(crate) fn from_accumulators(accumulators: [f64; 6], natural: f64) -> Self {
        Self {
            percentages: accumulators.map(|p| p * 100.0),
            natural,
        }
    }

    pub(crate) fn certain(outcome: Outcome) -> Self {
        let mut percentages = [0.0; 6];
        percentages[outcome.index()] = 100.0;
        Self {
            percentages,
            natural: 0.0,
        }
    }

    pub fn get(&self, outcome: Outcome) -> f64 {
        self.percentages[outcome.index()]
    }

    pub fn sum(&self) -> f64 {
        self.percentages.iter().sum()
    }

    pub fn natural_probability(&self) -> f64 {
        self.natural
    }

    pub fn iter(&self) -> impl Iterator<Item = (Outcome, f64)> + '_ {
        Outcome::iter().map(move |outcome| (outcome, self.get(outcome)))
    }
}

impl Index<Outcome> for OutcomeDistribution {
    type Output = f64;
    fn index(&self, index: Outcome) -> &Self::Output {
        &self.percentages[index.index()]
    }
}
