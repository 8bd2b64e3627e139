mod dealer;
pub mod hand;
pub mod shoe;

use crate::calculation::{ExpansionTracer, OutcomeDistribution};
use crate::{Error, Rule};
use strum_macros::{Display, EnumString};

pub use self::dealer::{Dealer, DealerPhase};
use self::{hand::Hand, shoe::Shoe};

/// How a hit left the dealer's hand. Displayed the way the table calls it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Classification {
    Hit,
    Stand,
    #[strum(serialize = "BJ!")]
    Blackjack,
    #[strum(serialize = "Busted!")]
    Busted,
}

impl Classification {
    /// Blackjack wins over Busted, which wins over Stand.
    pub fn of(hand: &Hand) -> Classification {
        if hand.is_bj() {
            Classification::Blackjack
        } else if hand.is_busted() {
            Classification::Busted
        } else if hand.value() >= crate::DEALER_STAND_VALUE {
            Classification::Stand
        } else {
            Classification::Hit
        }
    }
}

/// What a single hit produced.
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a> {
    pub cards: &'a [u8],
    pub value: u16,
    pub classification: Classification,
    /// Percentage chance of a natural, present while the hand is a lone Ace or ten.
    pub natural_probability: Option<f64>,
}

pub trait DealerEventHandler {
    fn on_round_begin(&mut self, shoe: &Shoe) {
        log::debug!("Round begins with {} cards in shoe", shoe.remaining());
    }

    fn on_hit(&mut self, observation: &Observation) {
        log::debug!(
            "{:?} {} {}",
            observation.cards,
            observation.value,
            observation.classification
        );
    }

    fn on_round_end(&mut self, hand: &Hand, phase: DealerPhase) {
        log::debug!("Round ends with {} ({})", hand, phase);
    }
}

impl DealerEventHandler for () {}

/// A dealer playing alone against one shoe.
pub struct Game {
    rule: Rule,
    shoe: Shoe,
    dealer: Dealer,
}

impl Game {
    pub fn new(rule: &Rule) -> Result<Self, Error> {
        rule.validate()?;
        let shoe = match rule.seed {
            Some(seed) => Shoe::with_seed(rule.number_of_decks, rule.penetration, seed),
            None => Shoe::new(rule.number_of_decks, rule.penetration),
        };
        Ok(Self {
            rule: *rule,
            shoe,
            dealer: Dealer::new(),
        })
    }

    /// Plays one full dealer round and returns how it ended.
    pub fn play<H: DealerEventHandler>(&mut self, handler: &mut H) -> Result<DealerPhase, Error> {
        self.dealer.play(&mut self.shoe, handler)
    }

    /// Starts a new round, deals the dealer a single card, then estimates where the
    /// dealer will end up from there.
    pub fn hit_and_estimate<H: DealerEventHandler, T: ExpansionTracer>(
        &mut self,
        handler: &mut H,
        tracer: &mut T,
    ) -> Result<OutcomeDistribution, Error> {
        self.dealer.reset();
        handler.on_round_begin(&self.shoe);
        self.dealer.hit(&mut self.shoe, handler)?;
        self.dealer
            .exp_val(&self.shoe, self.rule.expansion_policy, tracer)
    }

    pub fn get_dealer(&self) -> &Dealer {
        &self.dealer
    }
}
