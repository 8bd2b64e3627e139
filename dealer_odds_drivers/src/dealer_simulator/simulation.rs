use dealer_odds::calculation::{ExpansionTracer, OutcomeDistribution};
use dealer_odds::simulation::shoe::Shoe;
use dealer_odds::simulation::{hand::Hand, DealerEventHandler, DealerPhase, Game, Observation};

const PREVIEWED_CARDS: usize = 5;

/// Prints every hit the way the table calls it.
#[derive(Debug, Clone, Default)]
struct Handler {
    round_id: u64,
}

impl DealerEventHandler for Handler {
    fn on_round_begin(&mut self, shoe: &Shoe) {
        self.round_id += 1;
        log::debug!(
            "Round #{}, {} cards left in shoe, next: {:?}",
            self.round_id,
            shoe.remaining(),
            shoe.preview(PREVIEWED_CARDS)
        );
    }

    fn on_hit(&mut self, observation: &Observation) {
        println!("{}", format_observation(observation));
    }

    fn on_round_end(&mut self, hand: &Hand, phase: DealerPhase) {
        log::debug!("Round #{} ended with {} ({})", self.round_id, hand, phase);
    }
}

/// Prints the draw tree as it is expanded.
struct Tracer;

impl ExpansionTracer for Tracer {
    fn on_candidates(&mut self, value: u16, depth: u16, candidates: &[u16]) {
        println!("depth {} from {}: {:?}", depth, value, candidates);
    }

    fn on_accumulate(&mut self, depth: u16, accumulators: &[f64; 6]) {
        println!("depth {} accumulated: {:?}", depth, accumulators);
    }
}

/// One console line per hit: cards, value, classification, and the natural chance
/// while the hand is a lone Ace or ten.
fn format_observation(observation: &Observation) -> String {
    let line = format!(
        "{:?} {} {}",
        observation.cards, observation.value, observation.classification
    );
    match observation.natural_probability {
        Some(p) => format!("{} BJ prob: {:.2}", line, p),
        None => line,
    }
}

pub fn simulate_rounds(
    rule: &dealer_odds::Rule,
    number_of_rounds: u32,
) -> Result<(), dealer_odds::Error> {
    let mut handler: Handler = Default::default();
    let mut game = Game::new(rule)?;

    for _ in 0..number_of_rounds {
        game.play(&mut handler)?;
        println!("END");
    }
    Ok(())
}

pub fn simulate_single_hit(rule: &dealer_odds::Rule) -> Result<(), dealer_odds::Error> {
    let mut handler: Handler = Default::default();
    let mut game = Game::new(rule)?;

    let distribution = game.hit_and_estimate(&mut handler, &mut Tracer)?;
    print_distribution(&distribution);
    Ok(())
}

fn print_distribution(distribution: &OutcomeDistribution) {
    for (outcome, p) in distribution.iter() {
        println!("{:>4}: {:>7.3}%", outcome, p);
    }
    println!("Total: {:.3}%", distribution.sum());
    if distribution.natural_probability() > 0.0 {
        println!("BJ prob: {:.3}%", distribution.natural_probability());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealer_odds::simulation::Classification;

    fn observe(cards: &[u8], value: u16, classification: Classification) -> String {
        format_observation(&Observation {
            cards,
            value,
            classification,
            natural_probability: None,
        })
    }

    #[test]
    fn hits_are_printed_as_called() {
        assert_eq!(observe(&[10, 7], 17, Classification::Stand), "[10, 7] 17 Stand");
        assert_eq!(observe(&[4, 5], 9, Classification::Hit), "[4, 5] 9 Hit");
        assert_eq!(
            observe(&[10, 9, 10], 29, Classification::Busted),
            "[10, 9, 10] 29 Busted!"
        );
        assert_eq!(observe(&[11, 10], 21, Classification::Blackjack), "[11, 10] 21 BJ!");
    }

    #[test]
    fn lone_ace_line_carries_natural_chance() {
        let line = format_observation(&Observation {
            cards: &[11],
            value: 11,
            classification: Classification::Hit,
            natural_probability: Some(9600.0 / 311.0),
        });
        assert_eq!(line, "[11] 11 Hit BJ prob: 30.87");
    }
}
