use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::errors::GameError;
use crate::player::Player;

/// Hand categories in strict hierarchy order, weakest first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::HighCard,
        Category::OnePair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
        Category::RoyalFlush,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Category plus tiebreaker ranks, most significant first.
///
/// Tiebreaker layout per category:
/// - four of a kind: `[quad, kicker]`
/// - full house: `[trips, pair]`
/// - flush, high card: all five ranks descending
/// - straight, straight flush, royal flush: `[high card of the run]` (the wheel is 5)
/// - three of a kind: `[trips, kicker, kicker]`
/// - two pair: `[high pair, low pair, kicker]`
/// - one pair: `[pair, kicker, kicker, kicker]`
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct EvaluatedHand {
    pub category: Category,
    pub tiebreaker: Vec<u8>,
}

impl Ord for EvaluatedHand {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_hands(self, other)
    }
}

impl PartialOrd for EvaluatedHand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Category first, then tiebreakers element by element. Identical ⇒ `Equal`.
pub fn compare_hands(a: &EvaluatedHand, b: &EvaluatedHand) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.tiebreaker.cmp(&b.tiebreaker),
        ord => ord,
    }
}

/// Classifies exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> EvaluatedHand {
    let mut ranks: [u8; 5] = [0; 5];
    for (slot, c) in ranks.iter_mut().zip(cards.iter()) {
        *slot = c.rank.value();
    }
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight_high = straight_high(&ranks);

    if let Some(high) = straight_high {
        if is_flush {
            let category = if high == Rank::Ace.value() {
                Category::RoyalFlush
            } else {
                Category::StraightFlush
            };
            return EvaluatedHand {
                category,
                tiebreaker: vec![high],
            };
        }
    }

    // (rank, count) groups ordered by count then rank, both descending
    let mut groups: Vec<(u8, u8)> = Vec::with_capacity(5);
    for &r in &ranks {
        match groups.iter_mut().find(|(rank, _)| *rank == r) {
            Some((_, count)) => *count += 1,
            None => groups.push((r, 1)),
        }
    }
    groups.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
    let group_ranks = || groups.iter().map(|(r, _)| *r).collect::<Vec<u8>>();

    match (groups[0].1, groups.get(1).map(|g| g.1)) {
        (4, _) => EvaluatedHand {
            category: Category::FourOfAKind,
            tiebreaker: group_ranks(),
        },
        (3, Some(2)) => EvaluatedHand {
            category: Category::FullHouse,
            tiebreaker: group_ranks(),
        },
        _ if is_flush => EvaluatedHand {
            category: Category::Flush,
            tiebreaker: ranks.to_vec(),
        },
        _ if straight_high.is_some() => EvaluatedHand {
            category: Category::Straight,
            tiebreaker: straight_high.into_iter().collect(),
        },
        (3, _) => EvaluatedHand {
            category: Category::ThreeOfAKind,
            tiebreaker: group_ranks(),
        },
        (2, Some(2)) => EvaluatedHand {
            category: Category::TwoPair,
            tiebreaker: group_ranks(),
        },
        (2, _) => EvaluatedHand {
            category: Category::OnePair,
            tiebreaker: group_ranks(),
        },
        _ => EvaluatedHand {
            category: Category::HighCard,
            tiebreaker: ranks.to_vec(),
        },
    }
}

/// `ranks` sorted descending. The wheel (A-5-4-3-2) reports 5.
fn straight_high(ranks: &[u8; 5]) -> Option<u8> {
    let distinct = ranks.windows(2).all(|w| w[0] != w[1]);
    if !distinct {
        return None;
    }
    if ranks[0] - ranks[4] == 4 {
        return Some(ranks[0]);
    }
    if *ranks == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

/// Best five-card hand out of 5 to 7 unique cards.
///
/// # Errors
///
/// [`GameError::DuplicateCard`], [`GameError::InsufficientCards`] or
/// [`GameError::TooManyCards`] when the input breaks the contract.
///
/// ```
/// use holdem_engine::cards::Card;
/// use holdem_engine::hand::{evaluate_best_hand, Category};
///
/// let cards: Vec<Card> = ["2HEARTS", "2DIAMONDS", "2SPADES", "5CLUBS", "5HEARTS", "9DIAMONDS", "KCLUBS"]
///     .iter()
///     .filter_map(|c| Card::from_code(c))
///     .collect();
/// let best = evaluate_best_hand(&cards).unwrap();
/// assert_eq!(best.category, Category::FullHouse);
/// assert_eq!(best.tiebreaker, vec![2, 5]);
/// ```
pub fn evaluate_best_hand(cards: &[Card]) -> Result<EvaluatedHand, GameError> {
    if cards.len() < 5 {
        return Err(GameError::InsufficientCards(cards.len()));
    }
    if cards.len() > 7 {
        return Err(GameError::TooManyCards(cards.len()));
    }
    let mut seen = HashSet::with_capacity(cards.len());
    for &c in cards {
        if !seen.insert(c) {
            return Err(GameError::DuplicateCard(c));
        }
    }
    Ok(best_of(cards))
}

/// Enumerates every 5-card subset (at most 21). Caller guarantees 5..=7 unique cards.
pub(crate) fn best_of(cards: &[Card]) -> EvaluatedHand {
    let n = cards.len();
    let mut best: Option<EvaluatedHand> = None;
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        let hand = evaluate_five(&[cards[a], cards[b], cards[c], cards[d], cards[e]]);
                        if best.as_ref().is_none_or(|cur| hand > *cur) {
                            best = Some(hand);
                        }
                    }
                }
            }
        }
    }
    best.unwrap_or(EvaluatedHand {
        category: Category::HighCard,
        tiebreaker: Vec::new(),
    })
}

/// Outcome of comparing every contender's best hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownResult {
    /// Every contender whose hand equals the best one, in seat order
    pub winners: Vec<usize>,
    pub hands: Vec<(usize, EvaluatedHand)>,
}

impl ShowdownResult {
    pub fn winning_hand(&self) -> Option<&EvaluatedHand> {
        let winner = self.winners.first()?;
        self.hands.iter().find(|(id, _)| id == winner).map(|(_, h)| h)
    }
}

/// Evaluates all non-folded contenders among `players` and returns every player
/// tied for the best hand.
pub fn showdown<'a, I>(players: I, community: &[Card]) -> Result<ShowdownResult, GameError>
where
    I: IntoIterator<Item = &'a Player>,
{
    if !(3..=5).contains(&community.len()) {
        return Err(GameError::InvalidCommunityCards(community.len()));
    }
    let mut hands = Vec::new();
    for p in players.into_iter().filter(|p| p.is_contender()) {
        if p.hand.len() != 2 {
            return Err(GameError::MissingHoleCards { player_id: p.id });
        }
        let mut cards = Vec::with_capacity(7);
        cards.extend_from_slice(&p.hand);
        cards.extend_from_slice(community);
        hands.push((p.id, evaluate_best_hand(&cards)?));
    }
    let best = hands
        .iter()
        .map(|(_, h)| h)
        .max()
        .cloned()
        .ok_or(GameError::NoContenders)?;
    let winners = hands
        .iter()
        .filter(|(_, h)| *h == best)
        .map(|(id, _)| *id)
        .collect();
    Ok(ShowdownResult { winners, hands })
}
