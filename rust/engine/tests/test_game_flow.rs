use std::collections::HashSet;

use holdem_engine::betting::minimum_raise;
use holdem_engine::cards::Card;
use holdem_engine::engine::Engine;
use holdem_engine::errors::GameError;
use holdem_engine::game::{GameState, TableConfig};
use holdem_engine::player::{Action, ActionKind, PlayerAction, SeatRole};
use holdem_engine::round::{self, Round};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn engine(names: &[&str], seed: u64) -> Engine {
    Engine::with_seed(names, TableConfig::default(), seed).expect("engine")
}

/// Checks or calls for whoever is to act until the hand is over.
fn check_down(engine: &mut Engine) {
    while let Some(seat) = engine.current_player() {
        let allowed = engine.allowed_actions(seat).unwrap();
        let action = if allowed.contains(&ActionKind::Check) {
            PlayerAction::Check
        } else {
            PlayerAction::Call
        };
        let res = engine.process_action(Action::new(seat, action)).unwrap();
        assert!(res.success, "{}", res.message);
    }
}

fn burns_for(board: usize) -> usize {
    match board {
        0 => 0,
        3 => 1,
        4 => 2,
        _ => 3,
    }
}

fn assert_cards_partition(state: &GameState) {
    let mut seen: HashSet<Card> = HashSet::new();
    let mut count = 0;
    for c in state
        .deck
        .remaining_cards()
        .iter()
        .chain(state.community_cards.iter())
        .chain(state.players.iter().flat_map(|p| p.hand.iter()))
    {
        assert!(seen.insert(*c), "duplicate {c}");
        count += 1;
    }
    assert_eq!(count + burns_for(state.community_cards.len()), 52);
}

#[test]
fn heads_up_blinds_and_first_actor() {
    let mut e = engine(&["P0", "P1"], 1);
    let res = e.start_new_hand().unwrap();
    assert!(res.success);
    assert!(!res.hand_complete);

    let s = e.state();
    assert_eq!(s.pot, 30);
    assert_eq!(s.players[0].chips, 990);
    assert_eq!(s.players[0].current_bet, 10);
    assert_eq!(s.players[1].chips, 980);
    assert_eq!(s.players[1].current_bet, 20);
    assert!(s.players.iter().all(|p| p.hand.len() == 2));
    assert_eq!(s.round, Round::Preflop);
    assert_eq!(s.current_player_index, 0);
    assert_eq!(s.players[0].seat_role, SeatRole::Dealer);
    assert_eq!(s.players[1].seat_role, SeatRole::BigBlind);
    assert_eq!(s.small_blind_index, Some(0));
    assert_cards_partition(s);
}

#[test]
fn first_actor_is_left_of_the_big_blind() {
    let mut e = engine(&["a", "b", "c", "d"], 2);
    e.start_new_hand().unwrap();
    let s = e.state();
    assert_eq!(s.dealer_index, Some(0));
    assert_eq!(s.small_blind_index, Some(1));
    assert_eq!(s.big_blind_index, Some(2));
    assert_eq!(e.current_player(), Some(3));
}

#[test]
fn button_rotates_each_hand() {
    let mut e = engine(&["a", "b", "c"], 3);
    let mut dealers = Vec::new();
    for _ in 0..4 {
        e.start_new_hand().unwrap();
        dealers.push(e.state().dealer_index);
        let seat = e.current_player().unwrap();
        // everyone folds to the big blind
        e.process_action(Action::new(seat, PlayerAction::Fold)).unwrap();
        if let Some(seat) = e.current_player() {
            e.process_action(Action::new(seat, PlayerAction::Fold)).unwrap();
        }
        assert!(e.is_hand_complete());
    }
    assert_eq!(dealers, vec![Some(0), Some(1), Some(2), Some(0)]);
}

#[test]
fn out_of_turn_and_illegal_actions_are_rejected_without_side_effects() {
    let mut e = engine(&["a", "b", "c"], 4);
    e.start_new_hand().unwrap();
    let before = e.game_state();

    let res = e.process_action(Action::new(1, PlayerAction::Call)).unwrap();
    assert!(!res.success);
    assert!(res.message.contains("not player 1's turn"), "{}", res.message);
    assert_eq!(e.game_state(), before);

    let res = e.process_action(Action::new(0, PlayerAction::Check)).unwrap();
    assert!(!res.success);
    assert_eq!(
        res.allowed_actions,
        vec![
            ActionKind::Fold,
            ActionKind::Call,
            ActionKind::Raise,
            ActionKind::AllIn
        ]
    );
    assert_eq!(e.game_state(), before);

    let res = e.process_action(Action::new(9, PlayerAction::Fold)).unwrap();
    assert!(!res.success);
    assert_eq!(e.game_state(), before);
}

#[test]
fn streets_deal_three_one_one() {
    let mut e = engine(&["a", "b", "c"], 5);
    e.start_new_hand().unwrap();
    let mut boards = Vec::new();
    while let Some(seat) = e.current_player() {
        let round = e.state().round;
        let allowed = e.allowed_actions(seat).unwrap();
        let action = if allowed.contains(&ActionKind::Check) {
            PlayerAction::Check
        } else {
            PlayerAction::Call
        };
        e.process_action(Action::new(seat, action)).unwrap();
        if e.state().round != round && e.state().round.is_betting() {
            boards.push(e.state().community_cards.len());
            assert_cards_partition(e.state());
            // post-flop action starts left of the button
            assert_eq!(e.current_player(), Some(1));
        }
    }
    assert_eq!(boards, vec![3, 4, 5]);
    assert_eq!(e.state().round, Round::Showdown);
    assert_eq!(e.state().pot, 0);
    let winners = e.state().winners.clone().unwrap();
    assert!(winners.iter().all(|w| w.category.is_some()));
    assert_eq!(winners.iter().map(|w| w.amount).sum::<u32>(), 60);
}

#[test]
fn advancing_an_open_street_fails() {
    let mut gs = GameState::new(&["a", "b", "c"], TableConfig::default());
    round::rotate_dealer_button(&mut gs).unwrap();
    gs.round = Round::Preflop;
    gs.pot += gs.players[1].commit(10);
    gs.pot += gs.players[2].commit(20);
    let before = gs.snapshot();
    assert_eq!(
        round::advance_to_next_round(&mut gs),
        Err(GameError::BettingNotComplete)
    );
    assert_eq!(gs.snapshot(), before);

    let mut idle = GameState::new(&["a", "b"], TableConfig::default());
    assert_eq!(
        round::advance_to_next_round(&mut idle),
        Err(GameError::HandNotInProgress)
    );
}

#[test]
fn determine_winner_before_the_river_is_rejected() {
    let mut e = engine(&["a", "b"], 6);
    e.start_new_hand().unwrap();
    assert_eq!(e.determine_winner(), Err(GameError::BettingNotComplete));
    assert_eq!(e.state().pot, 30);
}

#[test]
fn determine_winner_is_idempotent() {
    let mut e = engine(&["a", "b"], 7);
    e.start_new_hand().unwrap();
    check_down(&mut e);
    assert!(e.is_hand_complete());
    let chips: Vec<u32> = e.state().players.iter().map(|p| p.chips).collect();
    assert_eq!(chips.iter().sum::<u32>(), 2_000);

    assert!(e.determine_winner().unwrap().is_empty());
    assert!(e.distribute_pot().unwrap().is_empty());
    let again: Vec<u32> = e.state().players.iter().map(|p| p.chips).collect();
    assert_eq!(chips, again);
}

#[test]
fn fold_to_one_player_wins_without_evaluation() {
    let mut e = engine(&["a", "b", "c"], 8);
    e.start_new_hand().unwrap();
    e.process_action(Action::new(0, PlayerAction::Fold)).unwrap();
    let res = e.process_action(Action::new(1, PlayerAction::Fold)).unwrap();
    assert!(res.success);
    assert!(res.hand_complete);
    assert_eq!(res.awards.len(), 1);
    assert_eq!(res.awards[0].winners[0].player_id, 2);
    assert_eq!(res.awards[0].winners[0].category, None);
    assert!(e.state().community_cards.is_empty());
    assert_eq!(e.state().players[2].chips, 1_010);
    assert!(e.hand_record().unwrap().showdown.is_none());
}

#[test]
fn hand_after_completion_cannot_take_actions() {
    let mut e = engine(&["a", "b"], 9);
    e.start_new_hand().unwrap();
    e.process_action(Action::new(0, PlayerAction::Fold)).unwrap();
    let res = e.process_action(Action::new(1, PlayerAction::Check)).unwrap();
    assert!(!res.success);
    assert_eq!(res.message, "No hand in progress");
}

#[test]
fn starting_a_hand_mid_hand_is_an_error() {
    let mut e = engine(&["a", "b"], 10);
    e.start_new_hand().unwrap();
    assert_eq!(e.start_new_hand().unwrap_err(), GameError::HandInProgress);
}

#[test]
fn short_stack_blind_is_all_in_and_board_runs_out() {
    let config = TableConfig {
        starting_chips: 15,
        small_blind: 10,
        big_blind: 20,
    };
    let mut e = Engine::with_seed(&["a", "b"], config, 11).unwrap();
    e.start_new_hand().unwrap();
    {
        let s = e.state();
        assert_eq!(s.players[1].current_bet, 15);
        assert!(s.players[1].is_all_in);
        assert_eq!(s.pot, 25);
        assert_eq!(e.current_player(), Some(0));
    }
    let res = e.process_action(Action::new(0, PlayerAction::Call)).unwrap();
    assert!(res.success);
    assert!(res.hand_complete);
    assert_eq!(e.state().community_cards.len(), 5);
    assert_eq!(e.state().total_chips(), 30);
}

#[test]
fn big_blind_keeps_the_option_behind_a_short_all_in_small_blind() {
    let config = TableConfig {
        starting_chips: 95,
        small_blind: 10,
        big_blind: 20,
    };
    let mut e = Engine::with_seed(&["a", "b"], config, 13).unwrap();
    // a folds every small blind and folds every big blind to a raise
    for _ in 0..6 {
        e.start_new_hand().unwrap();
        let sb = e.state().small_blind_index.unwrap();
        let action = if sb == 0 {
            PlayerAction::Fold
        } else {
            PlayerAction::Raise(40)
        };
        assert!(e.process_action(Action::new(sb, action)).unwrap().success);
        if let Some(seat) = e.current_player() {
            assert_eq!(seat, 0);
            e.process_action(Action::new(0, PlayerAction::Fold)).unwrap();
        }
        assert!(e.is_hand_complete());
    }
    assert_eq!(e.state().players[0].chips, 5);

    e.start_new_hand().unwrap();
    {
        let s = e.state();
        assert_eq!(s.small_blind_index, Some(0));
        assert!(s.players[0].is_all_in);
        assert_eq!(s.players[0].current_bet, 5);
        assert_eq!(s.players[1].current_bet, 20);
        assert!(!s.players[1].has_acted);
        assert!(!round::is_betting_round_complete(s));
    }
    assert_eq!(e.current_player(), Some(1));
    assert!(e.allowed_actions(1).unwrap().contains(&ActionKind::Check));

    // the lone player with chips still checks on every street
    let mut streets = Vec::new();
    while let Some(seat) = e.current_player() {
        assert_eq!(seat, 1);
        streets.push(e.state().round);
        let res = e.process_action(Action::new(1, PlayerAction::Check)).unwrap();
        assert!(res.success, "{}", res.message);
    }
    assert_eq!(
        streets,
        vec![Round::Preflop, Round::Flop, Round::Turn, Round::River]
    );
    assert_eq!(e.state().community_cards.len(), 5);
    assert_eq!(e.state().total_chips(), 190);
}

#[test]
fn busted_players_are_eliminated_and_the_tournament_ends() {
    let config = TableConfig {
        starting_chips: 20,
        small_blind: 10,
        big_blind: 20,
    };
    let mut e = Engine::with_seed(&["a", "b", "c"], config, 12).unwrap();
    let mut hands = 0;
    while !e.state().game_ended {
        hands += 1;
        assert!(hands < 500, "tournament did not finish");
        e.start_new_hand().unwrap();
        for p in e.state().players.iter().filter(|p| p.is_eliminated()) {
            assert_eq!(p.seat_role, SeatRole::None);
            assert!(p.hand.is_empty());
        }
        check_down(&mut e);
        assert_eq!(e.state().total_chips(), 60);
    }

    let s = e.state();
    let champion = s.tournament_winner.expect("winner");
    assert_eq!(s.players[champion].chips, 60);
    for p in s.players.iter().filter(|p| p.id != champion) {
        assert!(p.is_eliminated());
        assert_eq!(p.chips, 0);
    }
    assert!(e.start_new_hand().unwrap().message.contains("wins the tournament"));
    let res = e.process_action(Action::new(champion, PlayerAction::Check)).unwrap();
    assert!(!res.success);
}

#[test]
fn chips_are_conserved_under_random_play() {
    let mut policy = ChaCha20Rng::seed_from_u64(99);
    for seed in 0..20 {
        let mut e = engine(&["a", "b", "c", "d", "e"], seed);
        let total = e.state().total_chips();
        for _ in 0..30 {
            if e.state().game_ended {
                break;
            }
            e.start_new_hand().unwrap();
            while let Some(seat) = e.current_player() {
                assert_cards_partition(e.state());
                let allowed = e.allowed_actions(seat).unwrap();
                let kind = allowed[policy.random_range(0..allowed.len())];
                let action = match kind {
                    ActionKind::Fold => PlayerAction::Fold,
                    ActionKind::Check => PlayerAction::Check,
                    ActionKind::Call => PlayerAction::Call,
                    ActionKind::AllIn => PlayerAction::AllIn,
                    ActionKind::Raise => {
                        let p = &e.state().players[seat];
                        let min = minimum_raise(e.state());
                        let max = p.chips + p.current_bet;
                        PlayerAction::Raise(policy.random_range(min..=max))
                    }
                };
                let res = e.process_action(Action::new(seat, action)).unwrap();
                assert!(res.success, "{}", res.message);
                assert_eq!(e.state().total_chips(), total);
            }
            assert_eq!(e.state().pot, 0);
            assert_eq!(e.state().total_chips(), total);
        }
    }
}

#[test]
fn same_seed_replays_the_same_hand() {
    let mut a = engine(&["a", "b", "c"], 13);
    let mut b = engine(&["a", "b", "c"], 13);
    a.start_new_hand().unwrap();
    b.start_new_hand().unwrap();
    check_down(&mut a);
    check_down(&mut b);
    assert_eq!(a.game_state(), b.game_state());
    assert_eq!(
        a.hand_record().map(|r| r.board.clone()),
        b.hand_record().map(|r| r.board.clone())
    );
}
