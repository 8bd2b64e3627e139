use std::collections::HashMap;

use super::{ExpansionTracer, Outcome};
use crate::{CardCount, ExpansionPolicy, ACE, BLACKJACK_VALUE, RANK_TEMPLATE};

type Accumulators = [f64; 6];

/// Enumerates every sequence of draws from a running value until the dealer stands
/// or busts.
///
/// Each of the 13 rank slots is taken to be drawn with probability 1/13 regardless
/// of the cards drawn before it, so a branch `depth` draws deep starts with weight
/// `(1/13)^(depth - 1)`. A leaf then counts the cards of every rank reaching it over
/// `total_cards - depth`, shrinking the shoe by one card per level of depth. Which
/// ranks were drawn along the path is not accounted for.
pub(crate) struct DrawTree<'a, T: ExpansionTracer> {
    policy: ExpansionPolicy,
    card_count: &'a CardCount,
    total_cards: f64,
    tracer: &'a mut T,
    memo: HashMap<(u16, u16), Accumulators>,
    accumulators: Accumulators,
}

impl<'a, T: ExpansionTracer> DrawTree<'a, T> {
    pub fn new(card_count: &'a CardCount, policy: ExpansionPolicy, tracer: &'a mut T) -> Self {
        Self {
            policy,
            card_count,
            total_cards: card_count.get_total() as f64,
            tracer,
            memo: HashMap::new(),
            accumulators: [0.0; 6],
        }
    }

    /// Probabilities (as fractions) of each outcome starting from `value`.
    pub fn expand(mut self, value: u16) -> Accumulators {
        match self.policy {
            ExpansionPolicy::FullTree => {
                self.expand_full(value, 1);
                self.accumulators
            }
            ExpansionPolicy::Memoized => self.expand_memoized(value, 1),
        }
    }

    fn expand_full(&mut self, value: u16, depth: u16) {
        let (leaves, branches) = self.visit(value, depth);
        for (acc, leaf) in self.accumulators.iter_mut().zip(leaves) {
            *acc += leaf;
        }
        self.tracer.on_accumulate(depth, &self.accumulators);

        for (next_value, multiplicity) in branches {
            for _ in 0..multiplicity {
                self.expand_full(next_value, depth + 1);
            }
        }
    }

    fn expand_memoized(&mut self, value: u16, depth: u16) -> Accumulators {
        if let Some(cached) = self.memo.get(&(value, depth)) {
            return *cached;
        }

        let (mut accumulators, branches) = self.visit(value, depth);
        for (next_value, multiplicity) in branches {
            let subtree = self.expand_memoized(next_value, depth + 1);
            for (acc, p) in accumulators.iter_mut().zip(subtree) {
                *acc += p * multiplicity as f64;
            }
        }
        self.tracer.on_accumulate(depth, &accumulators);

        self.memo.insert((value, depth), accumulators);
        accumulators
    }

    /// Looks one draw ahead of `value`. Returns what the terminal totals contribute and
    /// the distinct totals still below 17 with how many rank slots lead to each, highest
    /// first.
    fn visit(&mut self, value: u16, depth: u16) -> (Accumulators, Vec<(u16, usize)>) {
        let candidates = RANK_TEMPLATE.map(|rank| next_value(value, rank));
        let mut distinct = candidates.to_vec();
        distinct.sort_unstable_by(|a, b| b.cmp(a));
        distinct.dedup();
        self.tracer.on_candidates(value, depth, &distinct);

        let mut leaves = [0.0; 6];
        let mut branches = Vec::new();
        let mut bust_counted = false;
        for next in distinct {
            match Outcome::of_value(next) {
                Some(Outcome::Bust) => {
                    // All busting ranks are counted together, once.
                    if !bust_counted {
                        let drawn = self.drawn(value, |c| c > BLACKJACK_VALUE);
                        leaves[Outcome::Bust.index()] += self.leaf_probability(drawn, depth);
                        bust_counted = true;
                    }
                }
                Some(outcome) => {
                    let drawn = self.drawn(value, |c| c == next);
                    leaves[outcome.index()] += self.leaf_probability(drawn, depth);
                }
                None => {
                    let slots = candidates.iter().filter(|&&c| c == next).count();
                    branches.push((next, slots));
                }
            }
        }
        (leaves, branches)
    }

    /// Cards in the shoe whose rank takes `value` to a total accepted by `reaches`.
    fn drawn(&self, value: u16, reaches: impl Fn(u16) -> bool) -> u16 {
        (RANK_TEMPLATE[0]..=ACE)
            .filter(|&rank| reaches(next_value(value, rank)))
            .map(|rank| self.card_count[rank])
            .sum()
    }

    fn leaf_probability(&self, drawn: u16, depth: u16) -> f64 {
        drawn as f64 * branch_weight(depth) / (self.total_cards - depth as f64)
    }
}

fn branch_weight(depth: u16) -> f64 {
    (1.0 / RANK_TEMPLATE.len() as f64).powi(depth as i32 - 1)
}

/// An Ace that would push the total over 21 counts as 1. Only the Ace just drawn is
/// considered; Aces drawn earlier on the path keep whatever they were counted as.
fn next_value(value: u16, rank: u8) -> u16 {
    if rank == ACE && value + ACE as u16 > BLACKJACK_VALUE {
        value + 1
    } else {
        value + rank as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        candidates: Vec<(u16, u16, Vec<u16>)>,
        snapshots: usize,
    }

    impl ExpansionTracer for Recorder {
        fn on_candidates(&mut self, value: u16, depth: u16, candidates: &[u16]) {
            self.candidates.push((value, depth, candidates.to_vec()));
        }

        fn on_accumulate(&mut self, _: u16, _: &[f64; 6]) {
            self.snapshots += 1;
        }
    }

    #[test]
    fn ace_drops_to_one_when_it_would_bust() {
        assert_eq!(next_value(10, ACE), 21);
        assert_eq!(next_value(11, ACE), 12);
        assert_eq!(next_value(16, ACE), 17);
        assert_eq!(next_value(16, 10), 26);
    }

    #[test]
    fn branch_weight_shrinks_by_a_thirteenth() {
        assert_eq!(branch_weight(1), 1.0);
        assert!((branch_weight(2) - 1.0 / 13.0).abs() < 1e-15);
        assert!((branch_weight(3) - 1.0 / 169.0).abs() < 1e-15);
    }

    #[test]
    fn candidates_are_distinct_and_descending() {
        let card_count = CardCount::with_number_of_decks(6);
        let mut recorder = Recorder {
            candidates: Vec::new(),
            snapshots: 0,
        };
        DrawTree::new(&card_count, ExpansionPolicy::FullTree, &mut recorder).expand(16);
        assert_eq!(
            recorder.candidates,
            vec![(16, 1, vec![26, 25, 24, 23, 22, 21, 20, 19, 18, 17])]
        );
        assert_eq!(recorder.snapshots, 1);
    }

    #[test]
    fn one_draw_from_sixteen() {
        let card_count = CardCount::with_number_of_decks(6);
        let accumulators =
            DrawTree::new(&card_count, ExpansionPolicy::Memoized, &mut ()).expand(16);
        let single = 24.0 / 311.0;
        for p in &accumulators[..5] {
            assert!((p - single).abs() < 1e-12);
        }
        assert!((accumulators[5] - 8.0 * single).abs() < 1e-12);
    }

    #[test]
    fn leaves_follow_the_composition() {
        // A six-deck shoe with every Ace taken out.
        let card_count = CardCount::new(&[24, 24, 24, 24, 24, 24, 24, 24, 96, 0]);
        let accumulators =
            DrawTree::new(&card_count, ExpansionPolicy::Memoized, &mut ()).expand(16);
        assert_eq!(accumulators[0], 0.0);
        for p in &accumulators[1..5] {
            assert!((p - 24.0 / 287.0).abs() < 1e-12);
        }
        assert!((accumulators[5] - 192.0 / 287.0).abs() < 1e-12);
    }

    #[test]
    fn full_tree_visits_every_rank_slot() {
        let card_count = CardCount::with_number_of_decks(1);
        let mut full = Recorder {
            candidates: Vec::new(),
            snapshots: 0,
        };
        DrawTree::new(&card_count, ExpansionPolicy::FullTree, &mut full).expand(6);
        let mut memoized = Recorder {
            candidates: Vec::new(),
            snapshots: 0,
        };
        DrawTree::new(&card_count, ExpansionPolicy::Memoized, &mut memoized).expand(6);
        // From 6 the ten slot alone leads to 16 four times over.
        let visits_of_16_at_depth_2 = full
            .candidates
            .iter()
            .filter(|(value, depth, _)| *value == 16 && *depth == 2)
            .count();
        assert_eq!(visits_of_16_at_depth_2, 4);
        assert!(memoized.candidates.len() < full.candidates.len());
    }
}
