mod draw_tree;
mod outcome;

use crate::simulation::hand::Hand;
use crate::{CardCount, Error, ExpansionPolicy, ACE, BLACKJACK_VALUE, TEN};

use self::draw_tree::DrawTree;
pub use self::outcome::{Outcome, OutcomeDistribution};

/// Receives the intermediate state of the draw tree while it is being expanded.
pub trait ExpansionTracer {
    /// The distinct totals one draw away from `value`, highest first.
    fn on_candidates(&mut self, value: u16, depth: u16, candidates: &[u16]) {
        log::trace!("depth {} value {}: {:?}", depth, value, candidates);
    }

    fn on_accumulate(&mut self, depth: u16, accumulators: &[f64; 6]) {
        log::trace!("depth {}: {:?}", depth, accumulators);
    }
}

impl ExpansionTracer for () {}

/// Computes where the dealer holding `hand` will finish, drawing from a shoe made of
/// `card_count`.
pub fn exp_val<T: ExpansionTracer>(
    hand: &Hand,
    card_count: &CardCount,
    policy: ExpansionPolicy,
    tracer: &mut T,
) -> Result<OutcomeDistribution, Error> {
    if hand.is_empty() {
        return Err(Error::InvalidHandState(String::from(
            "the dealer has not been dealt any card",
        )));
    }
    if hand.is_busted() {
        return Err(Error::InvalidHandState(format!(
            "hand {} is already busted",
            hand
        )));
    }
    if card_count.get_total() == 0 {
        return Err(Error::EmptyShoe);
    }

    let value = hand.value();
    if let Some(outcome) = Outcome::of_value(value) {
        return Ok(OutcomeDistribution::certain(outcome));
    }

    let natural = match hand.cards() {
        [first] => natural_probability(*first, card_count).unwrap_or(0.0),
        _ => 0.0,
    };
    let accumulators = DrawTree::new(card_count, policy, tracer).expand(value);
    Ok(OutcomeDistribution::from_accumulators(accumulators, natural))
}

/// Percentage chance that a lone Ace or ten becomes a natural with the next card.
/// `None` for any other card.
pub fn natural_probability(card: u8, card_count: &CardCount) -> Option<f64> {
    if card != ACE && card != TEN {
        return None;
    }
    let needed = (BLACKJACK_VALUE - card as u16) as u8;
    let others = card_count.get_total().saturating_sub(1);
    if others == 0 {
        return Some(0.0);
    }
    Some(100.0 * card_count[needed] as f64 / others as f64)
}
