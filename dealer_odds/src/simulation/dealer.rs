use dealer_odds_macros::allowed_phase;
use strum_macros::Display;

use super::{hand::Hand, shoe::Shoe, Classification, DealerEventHandler, Observation};
use crate::calculation::{self, ExpansionTracer, OutcomeDistribution};
use crate::{Error, ExpansionPolicy, DEALER_STAND_VALUE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DealerPhase {
    Playing,
    Standing,
    Busted,
    Blackjack,
}

impl From<Classification> for DealerPhase {
    fn from(classification: Classification) -> Self {
        match classification {
            Classification::Hit => DealerPhase::Playing,
            Classification::Stand => DealerPhase::Standing,
            Classification::Busted => DealerPhase::Busted,
            Classification::Blackjack => DealerPhase::Blackjack,
        }
    }
}

/// The dealer stands on any 17, soft or hard.
#[derive(Debug, Clone)]
pub struct Dealer {
    hand: Hand,
    phase: DealerPhase,
}

impl Dealer {
    pub fn new() -> Self {
        Self {
            hand: Hand::new(),
            phase: DealerPhase::Playing,
        }
    }

    /// Starts a new round with an empty hand.
    pub fn reset(&mut self) {
        self.hand = Hand::new();
        self.phase = DealerPhase::Playing;
    }

    /// Plays a whole round: draws until the hand is worth 17 or more.
    pub fn play<H: DealerEventHandler>(
        &mut self,
        shoe: &mut Shoe,
        handler: &mut H,
    ) -> Result<DealerPhase, Error> {
        self.reset();
        handler.on_round_begin(shoe);
        while self.hand.value() < DEALER_STAND_VALUE {
            self.hit(shoe, handler)?;
        }
        handler.on_round_end(&self.hand, self.phase);
        Ok(self.phase)
    }

    /// Draws one card and reports the resulting hand to `handler`.
    #[allowed_phase(Playing)]
    pub fn hit<H: DealerEventHandler>(
        &mut self,
        shoe: &mut Shoe,
        handler: &mut H,
    ) -> Result<Classification, Error> {
        let card = shoe.deal()?;
        self.hand.add_card(card);

        let classification = Classification::of(&self.hand);
        self.phase = classification.into();

        let natural_probability = match self.hand.cards() {
            [first] => calculation::natural_probability(*first, &shoe.get_full_card_count()),
            _ => None,
        };
        handler.on_hit(&Observation {
            cards: self.hand.cards(),
            value: self.hand.value(),
            classification,
            natural_probability,
        });

        Ok(classification)
    }

    /// Distribution of where this hand will end up, from the composition of `shoe`.
    pub fn exp_val<T: ExpansionTracer>(
        &self,
        shoe: &Shoe,
        policy: ExpansionPolicy,
        tracer: &mut T,
    ) -> Result<OutcomeDistribution, Error> {
        calculation::exp_val(&self.hand, &shoe.get_full_card_count(), policy, tracer)
    }

    pub fn get_hand(&self) -> &Hand {
        &self.hand
    }

    pub fn get_phase(&self) -> DealerPhase {
        self.phase
    }
}

impl Default for Dealer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_phase() {
        let mut shoe = Shoe::with_seed(6, 0.25, 1);
        let mut dealer = Dealer::new();
        let phase = dealer.play(&mut shoe, &mut ()).unwrap();
        assert_ne!(phase, DealerPhase::Playing);
        assert_eq!(dealer.get_phase(), phase);

        let err = dealer.hit(&mut shoe, &mut ()).unwrap_err();
        assert_eq!(
            err,
            Error::NotAllowedInPhase {
                operation: "hit",
                expected: DealerPhase::Playing,
                actual: phase,
            }
        );

        dealer.reset();
        assert!(dealer.hit(&mut shoe, &mut ()).is_ok());
    }

    #[test]
    fn phase_follows_classification() {
        let mut shoe = Shoe::with_seed(6, 0.25, 99);
        let mut dealer = Dealer::new();
        for _ in 0..100 {
            dealer.reset();
            while dealer.get_phase() == DealerPhase::Playing {
                let classification = dealer.hit(&mut shoe, &mut ()).unwrap();
                assert_eq!(DealerPhase::from(classification), dealer.get_phase());
            }
            let hand = dealer.get_hand();
            match dealer.get_phase() {
                DealerPhase::Blackjack => assert!(hand.is_bj()),
                DealerPhase::Busted => assert!(hand.is_busted()),
                DealerPhase::Standing => assert!((17..=21).contains(&hand.value())),
                DealerPhase::Playing => unreachable!(),
            }
        }
    }

    #[test]
    fn lone_ace_or_ten_reports_natural_probability() {
        struct Capture(Vec<Option<f64>>);
        impl DealerEventHandler for Capture {
            fn on_hit(&mut self, observation: &Observation) {
                self.0.push(observation.natural_probability);
            }
        }

        let mut shoe = Shoe::with_seed(6, 0.25, 5);
        let mut dealer = Dealer::new();
        for _ in 0..20 {
            let mut capture = Capture(Vec::new());
            let first = shoe.preview(1)[0];
            dealer.play(&mut shoe, &mut capture).unwrap();
            assert_eq!(capture.0[0].is_some(), first == 10 || first == 11);
            assert!(capture.0[1..].iter().all(|p| p.is_none()));
        }
    }
}
