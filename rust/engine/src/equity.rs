//! Monte Carlo win/tie/lose estimation against random opponent holdings.
//!
//! Read-only with respect to any table: callers pass card copies in and get a
//! report back. The only state is the simulator's own memo cache and RNG.

use std::collections::{HashMap, HashSet, VecDeque};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{full_deck, Card};
use crate::errors::EquityError;
use crate::hand::{best_of, Category};

pub const DEFAULT_TRIALS: u32 = 10_000;
/// Memoized reports kept before the oldest is evicted.
pub const CACHE_CAPACITY: usize = 100;
/// 2 hole cards + 5 board cards + 2 per opponent must fit in one deck.
pub const MAX_OPPONENTS: usize = 22;

/// How often one hand category came up and how the player fared when it did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: Category,
    pub count: u32,
    /// Share of all trials, percent
    pub percentage: f64,
    /// Player outcome rates given this category was reached, percent
    pub win_rate: f64,
    pub tie_rate: f64,
    pub lose_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityReport {
    pub trials: u32,
    pub opponents: usize,
    pub win_rate: f64,
    pub tie_rate: f64,
    pub lose_rate: f64,
    /// Player's final hand categories
    pub player_hands: Vec<CategoryStats>,
    /// Strongest opponent hand per trial
    pub opponent_hands: Vec<CategoryStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct EquityKey {
    hole: Vec<Card>,
    community: Vec<Card>,
    opponents: usize,
}

impl EquityKey {
    fn new(hole: &[Card], community: &[Card], opponents: usize) -> Self {
        let mut hole = hole.to_vec();
        hole.sort_unstable();
        let mut community = community.to_vec();
        community.sort_unstable();
        Self {
            hole,
            community,
            opponents,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Win,
    Tie,
    Lose,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    count: u32,
    win: u32,
    tie: u32,
    lose: u32,
}

impl Tally {
    fn record(&mut self, outcome: Outcome) {
        self.count += 1;
        match outcome {
            Outcome::Win => self.win += 1,
            Outcome::Tie => self.tie += 1,
            Outcome::Lose => self.lose += 1,
        }
    }
}

/// Monte Carlo equity estimator with a bounded, insertion-ordered memo cache.
///
/// ```
/// use holdem_engine::cards::Card;
/// use holdem_engine::equity::EquitySimulator;
///
/// let cards = |codes: &[&str]| -> Vec<Card> {
///     codes.iter().filter_map(|c| Card::from_code(c)).collect()
/// };
/// let mut sim = EquitySimulator::with_seed(7).with_trials(500);
/// let report = sim
///     .estimate(&cards(&["ASPADES", "AHEARTS"]), &cards(&["2CLUBS", "7DIAMONDS", "9HEARTS"]), 1)
///     .unwrap();
/// assert!(report.win_rate > report.lose_rate);
/// ```
#[derive(Debug, Clone)]
pub struct EquitySimulator {
    trials: u32,
    capacity: usize,
    cache: HashMap<EquityKey, EquityReport>,
    order: VecDeque<EquityKey>,
    rng: ChaCha20Rng,
}

impl Default for EquitySimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl EquitySimulator {
    pub fn new() -> Self {
        Self::with_rng(ChaCha20Rng::from_rng(&mut rand::rng()))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    fn with_rng(rng: ChaCha20Rng) -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            capacity: CACHE_CAPACITY,
            cache: HashMap::new(),
            order: VecDeque::new(),
            rng,
        }
    }

    pub fn with_trials(mut self, trials: u32) -> Self {
        self.trials = trials.max(1);
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    pub fn trials(&self) -> u32 {
        self.trials
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    /// Estimates the player's chance to win, tie or lose at showdown against
    /// `opponents` random hands. Repeated queries for the same cards (in any
    /// order) and opponent count are answered from the cache.
    ///
    /// # Errors
    ///
    /// [`EquityError`] unless there are exactly 2 hole cards, 3 to 5 community
    /// cards, no duplicates, and enough cards left for every opponent.
    pub fn estimate(
        &mut self,
        hole: &[Card],
        community: &[Card],
        opponents: usize,
    ) -> Result<EquityReport, EquityError> {
        validate(hole, community, opponents)?;
        let key = EquityKey::new(hole, community, opponents);
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(opponents, "equity cache hit");
            return Ok(hit.clone());
        }

        let report = self.simulate(hole, community, opponents);
        self.cache.insert(key.clone(), report.clone());
        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.cache.remove(&oldest);
            }
        }
        Ok(report)
    }

    fn simulate(&mut self, hole: &[Card], community: &[Card], opponents: usize) -> EquityReport {
        let mut unseen: Vec<Card> = full_deck()
            .into_iter()
            .filter(|c| !hole.contains(c) && !community.contains(c))
            .collect();
        let missing = 5 - community.len();

        let mut totals = Tally::default();
        let mut player_tally = [Tally::default(); 10];
        let mut opponent_tally = [Tally::default(); 10];
        let mut board: Vec<Card> = Vec::with_capacity(5);
        let mut seven: Vec<Card> = Vec::with_capacity(7);

        for _ in 0..self.trials {
            unseen.shuffle(&mut self.rng);
            board.clear();
            board.extend_from_slice(community);
            board.extend_from_slice(&unseen[..missing]);

            seven.clear();
            seven.extend_from_slice(hole);
            seven.extend_from_slice(&board);
            let mine = best_of(&seven);

            let mut best_opponent = None;
            for o in 0..opponents {
                let start = missing + 2 * o;
                seven.clear();
                seven.extend_from_slice(&unseen[start..start + 2]);
                seven.extend_from_slice(&board);
                let theirs = best_of(&seven);
                if best_opponent.as_ref().is_none_or(|b| theirs > *b) {
                    best_opponent = Some(theirs);
                }
            }

            let outcome = match &best_opponent {
                None => Outcome::Win,
                Some(b) if mine > *b => Outcome::Win,
                Some(b) if mine == *b => Outcome::Tie,
                Some(_) => Outcome::Lose,
            };
            totals.record(outcome);
            player_tally[mine.category as usize].record(outcome);
            if let Some(b) = best_opponent {
                opponent_tally[b.category as usize].record(outcome);
            }
        }

        let trials = self.trials;
        tracing::debug!(trials, opponents, win = totals.win, "equity simulated");
        EquityReport {
            trials,
            opponents,
            win_rate: percent(totals.win, trials),
            tie_rate: percent(totals.tie, trials),
            lose_rate: percent(totals.lose, trials),
            player_hands: distribution(&player_tally, trials),
            opponent_hands: distribution(&opponent_tally, trials),
        }
    }
}

fn validate(hole: &[Card], community: &[Card], opponents: usize) -> Result<(), EquityError> {
    if hole.len() != 2 {
        return Err(EquityError::HoleCards(hole.len()));
    }
    if !(3..=5).contains(&community.len()) {
        return Err(EquityError::CommunityCards(community.len()));
    }
    if opponents > MAX_OPPONENTS {
        return Err(EquityError::TooManyOpponents(opponents));
    }
    let mut seen = HashSet::with_capacity(7);
    for &c in hole.iter().chain(community) {
        if !seen.insert(c) {
            return Err(EquityError::DuplicateCard(c));
        }
    }
    Ok(())
}

fn percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 * 10_000.0 / whole as f64).round() / 100.0
}

fn distribution(tallies: &[Tally; 10], trials: u32) -> Vec<CategoryStats> {
    Category::ALL
        .iter()
        .zip(tallies.iter())
        .filter(|(_, t)| t.count > 0)
        .map(|(&category, t)| CategoryStats {
            category,
            count: t.count,
            percentage: percent(t.count, trials),
            win_rate: percent(t.win, t.count),
            tie_rate: percent(t.tie, t.count),
            lose_rate: percent(t.lose, t.count),
        })
        .collect()
}
