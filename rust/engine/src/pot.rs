//! Main/side pot construction from per-hand contributions and exact distribution.

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::game::{GameState, Winner};
use crate::hand::showdown;
use crate::player::Player;

/// One pot layer. Built fresh from `total_bet` values at distribution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    /// Non-folded players who contributed at least `max_contribution`
    pub eligible_players: Vec<usize>,
    pub is_main_pot: bool,
    /// Contribution level capping this layer
    pub max_contribution: u32,
}

/// Chips paid out of one pot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotAward {
    pub pot_index: usize,
    pub amount: u32,
    pub winners: Vec<Winner>,
}

/// Splits `state.pot` into layers by distinct contribution level.
///
/// Each layer holds `level delta × contributors at or above the level`, capped
/// by what is left of the real pot. A layer nobody can win (every contributor
/// folded) is merged into the layer below it. The amounts always sum to
/// `state.pot`.
pub fn create_all_pots(state: &GameState) -> Vec<Pot> {
    let mut contributors: Vec<&Player> = state.players.iter().filter(|p| p.total_bet > 0).collect();
    contributors.sort_by_key(|p| p.total_bet);

    let mut layers: Vec<Pot> = Vec::new();
    let mut remaining = state.pot;
    let mut prev_level = 0u32;
    for level in contributors.iter().map(|p| p.total_bet) {
        if level <= prev_level {
            continue;
        }
        let at_level: Vec<&&Player> = contributors.iter().filter(|p| p.total_bet >= level).collect();
        let amount = ((level - prev_level) as u64 * at_level.len() as u64).min(remaining as u64) as u32;
        remaining -= amount;
        if amount > 0 {
            layers.push(Pot {
                amount,
                eligible_players: at_level
                    .iter()
                    .filter(|p| p.is_contender())
                    .map(|p| p.id)
                    .collect(),
                is_main_pot: false,
                max_contribution: level,
            });
        }
        prev_level = level;
    }
    if remaining > 0 {
        match layers.last_mut() {
            Some(last) => last.amount += remaining,
            None => layers.push(Pot {
                amount: remaining,
                eligible_players: state.contenders().map(|p| p.id).collect(),
                is_main_pot: false,
                max_contribution: 0,
            }),
        }
    }

    let mut pots: Vec<Pot> = Vec::with_capacity(layers.len());
    let mut carry = 0u32;
    for mut layer in layers {
        if layer.eligible_players.is_empty() {
            match pots.last_mut() {
                Some(below) => below.amount += layer.amount,
                None => carry += layer.amount,
            }
            continue;
        }
        layer.amount += carry;
        carry = 0;
        pots.push(layer);
    }
    if carry > 0 {
        pots.push(Pot {
            amount: carry,
            eligible_players: Vec::new(),
            is_main_pot: false,
            max_contribution: prev_level,
        });
    }
    if let Some(main) = pots.first_mut() {
        main.is_main_pot = true;
    }
    pots
}

/// Awards every pot and zeroes `state.pot`.
///
/// An uncontested pot goes to its single eligible player without evaluation.
/// A contested pot is split evenly between the showdown winners; odd chips go
/// one each to the winners in seat order. Calling again after the pot is empty
/// distributes nothing.
///
/// # Errors
///
/// Propagates showdown contract violations (e.g. fewer than 3 community cards
/// with several contenders). No chips move when an error is returned.
pub fn distribute_all_pots(state: &mut GameState) -> Result<Vec<PotAward>, GameError> {
    if state.pot == 0 {
        return Ok(Vec::new());
    }
    let pots = create_all_pots(state);
    let mut awards = Vec::with_capacity(pots.len());

    for (pot_index, pot) in pots.iter().enumerate() {
        let eligible: Vec<&Player> = pot
            .eligible_players
            .iter()
            .filter_map(|&id| state.players.get(id))
            .filter(|p| p.is_contender())
            .collect();
        let winners = match eligible.as_slice() {
            [] => return Err(GameError::NoContenders),
            [only] => vec![Winner {
                player_id: only.id,
                amount: pot.amount,
                category: None,
            }],
            _ => {
                let result = showdown(eligible.iter().copied(), &state.community_cards)?;
                let category = result.winning_hand().map(|h| h.category);
                let mut ids = result.winners.clone();
                ids.sort_unstable();
                split_evenly(pot.amount, &ids)
                    .into_iter()
                    .map(|(player_id, amount)| Winner {
                        player_id,
                        amount,
                        category,
                    })
                    .collect()
            }
        };
        awards.push(PotAward {
            pot_index,
            amount: pot.amount,
            winners,
        });
    }

    for award in &awards {
        for w in &award.winners {
            state.players[w.player_id].add_chips(w.amount);
        }
    }
    state.pot = 0;
    tracing::debug!(pots = awards.len(), "pots distributed");
    Ok(awards)
}

/// Even split, odd chips one each to the first winners in the given order.
fn split_evenly(amount: u32, winners: &[usize]) -> Vec<(usize, u32)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let n = winners.len() as u32;
    let share = amount / n;
    let remainder = (amount % n) as usize;
    winners
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, share + u32::from(i < remainder)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_hands_out_odd_chips_in_order() {
        assert_eq!(split_evenly(101, &[0, 2]), vec![(0, 51), (2, 50)]);
        assert_eq!(split_evenly(100, &[1, 3, 4]), vec![(1, 34), (3, 33), (4, 33)]);
        assert_eq!(split_evenly(5, &[]), vec![]);
    }
}
