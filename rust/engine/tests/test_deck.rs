use std::collections::HashSet;

use holdem_engine::cards::{full_deck, Card};
use holdem_engine::deck::Deck;
use holdem_engine::errors::GameError;
use holdem_engine::player::Player;

#[test]
fn full_deck_has_52_unique_cards() {
    let deck = full_deck();
    assert_eq!(deck.len(), 52);
    let unique: HashSet<Card> = deck.into_iter().collect();
    assert_eq!(unique.len(), 52);
}

#[test]
fn same_seed_same_order_different_seed_differs() {
    let mut a = Deck::new_with_seed(42);
    let mut b = Deck::new_with_seed(42);
    let mut c = Deck::new_with_seed(43);
    a.shuffle();
    b.shuffle();
    c.shuffle();
    assert_eq!(a.remaining_cards(), b.remaining_cards());
    assert_ne!(a.remaining_cards(), c.remaining_cards());
}

#[test]
fn hole_cards_go_round_the_table_twice() {
    let mut deck = Deck::new_with_seed(9);
    deck.shuffle();
    let order: Vec<Card> = deck.remaining_cards()[..6].to_vec();
    let mut players: Vec<Player> = (0..3).map(|i| Player::new(i, format!("p{i}"), 100)).collect();
    deck.deal_to_players(&mut players).unwrap();

    assert_eq!(players[0].hand, vec![order[0], order[3]]);
    assert_eq!(players[1].hand, vec![order[1], order[4]]);
    assert_eq!(players[2].hand, vec![order[2], order[5]]);
    assert_eq!(deck.remaining(), 46);
}

#[test]
fn dealing_skips_eliminated_and_already_dealt_seats() {
    let mut deck = Deck::new_with_seed(1);
    let mut players: Vec<Player> = (0..3).map(|i| Player::new(i, format!("p{i}"), 100)).collect();
    players[1].eliminate();
    deck.deal_to_players(&mut players).unwrap();
    assert!(players[1].hand.is_empty());
    assert_eq!(players[0].hand.len(), 2);

    // a second pass deals nobody a third card
    deck.deal_to_players(&mut players).unwrap();
    assert_eq!(players[0].hand.len(), 2);
    assert_eq!(deck.remaining(), 48);
}

#[test]
fn streets_burn_before_dealing() {
    let mut deck = Deck::new_with_seed(5);
    deck.shuffle();
    let order: Vec<Card> = deck.remaining_cards().to_vec();

    let flop = deck.deal_flop().unwrap();
    assert_eq!(flop, [order[1], order[2], order[3]]);
    assert_eq!(deck.deal_turn().unwrap(), order[5]);
    assert_eq!(deck.deal_river().unwrap(), order[7]);
    assert_eq!(deck.remaining(), 44);
}

#[test]
fn shuffle_only_touches_undealt_cards() {
    let mut deck = Deck::new_with_seed(3);
    let first = deck.deal_one().unwrap();
    deck.shuffle();
    assert_eq!(deck.remaining(), 51);
    assert!(!deck.remaining_cards().contains(&first));
}

#[test]
fn empty_deck_is_an_error() {
    let mut deck = Deck::new_with_seed(0);
    for _ in 0..52 {
        deck.deal_one().unwrap();
    }
    assert_eq!(deck.deal_one(), Err(GameError::EmptyDeck));
    assert_eq!(deck.burn_one(), Err(GameError::EmptyDeck));

    let mut players = vec![Player::new(0, "a", 10)];
    assert_eq!(deck.deal_to_players(&mut players), Err(GameError::EmptyDeck));
    assert!(players[0].hand.is_empty());
}
