use holdem_engine::cards::{Card, Rank as R, Suit as S};
use holdem_engine::game::{GameState, TableConfig};
use holdem_engine::pot::{create_all_pots, distribute_all_pots};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn c(r: R, s: S) -> Card {
    Card::new(r, s)
}

fn table_with_bets(bets: &[u32]) -> GameState {
    let names: Vec<String> = (0..bets.len()).map(|i| format!("p{i}")).collect();
    let mut gs = GameState::new(&names, TableConfig::default());
    for (p, &bet) in gs.players.iter_mut().zip(bets) {
        p.total_bet = bet;
        p.chips = 0;
    }
    gs.pot = bets.iter().sum();
    gs
}

fn river_board() -> Vec<Card> {
    vec![
        c(R::Two, S::Clubs),
        c(R::Seven, S::Diamonds),
        c(R::Nine, S::Hearts),
        c(R::Jack, S::Spades),
        c(R::King, S::Clubs),
    ]
}

#[test]
fn three_all_in_levels_make_three_pots() {
    let gs = table_with_bets(&[100, 200, 300]);
    let pots = create_all_pots(&gs);
    let summary: Vec<(u32, Vec<usize>)> = pots
        .iter()
        .map(|p| (p.amount, p.eligible_players.clone()))
        .collect();
    assert_eq!(
        summary,
        vec![(300, vec![0, 1, 2]), (200, vec![1, 2]), (100, vec![2])]
    );
    assert!(pots[0].is_main_pot);
    assert!(!pots[1].is_main_pot);
    assert_eq!(pots.iter().map(|p| p.amount).sum::<u32>(), 600);
}

#[test]
fn equal_contributions_make_one_pot() {
    let gs = table_with_bets(&[250, 250, 250, 250]);
    let pots = create_all_pots(&gs);
    assert_eq!(pots.len(), 1);
    assert_eq!(pots[0].amount, 1000);
    assert_eq!(pots[0].eligible_players, vec![0, 1, 2, 3]);
}

#[test]
fn pots_sum_to_the_pot_for_random_contributions() {
    let mut rng = ChaCha20Rng::seed_from_u64(2024);
    for _ in 0..500 {
        let seats = rng.random_range(2..=10);
        let bets: Vec<u32> = (0..seats).map(|_| rng.random_range(0..=2_000)).collect();
        let mut gs = table_with_bets(&bets);
        // fold some contributors, keep at least one contender
        for p in gs.players.iter_mut().skip(1) {
            p.is_folded = rng.random_bool(0.3);
        }
        let pots = create_all_pots(&gs);
        assert_eq!(pots.iter().map(|p| p.amount).sum::<u32>(), gs.pot, "{bets:?}");
    }
}

#[test]
fn distinct_contributions_sum_exactly() {
    let gs = table_with_bets(&[5, 17, 230, 1_000, 999, 3]);
    let pots = create_all_pots(&gs);
    assert_eq!(pots.len(), 6);
    assert_eq!(pots.iter().map(|p| p.amount).sum::<u32>(), gs.pot);
}

#[test]
fn layer_without_eligible_player_merges_down() {
    // seat 0 raised big and folded; seats 1 and 2 are in for 100
    let mut gs = table_with_bets(&[300, 100, 100]);
    gs.players[0].is_folded = true;
    let pots = create_all_pots(&gs);
    assert_eq!(pots.len(), 1);
    assert_eq!(pots[0].amount, 500);
    assert_eq!(pots[0].eligible_players, vec![1, 2]);
}

#[test]
fn side_pots_go_to_the_best_eligible_hand() {
    let mut gs = table_with_bets(&[100, 200, 300]);
    gs.community_cards = river_board();
    // seat 0 has the nuts for the main pot, seat 1 beats seat 2
    gs.players[0].hand = vec![c(R::King, S::Hearts), c(R::King, S::Diamonds)];
    gs.players[1].hand = vec![c(R::Jack, S::Hearts), c(R::Jack, S::Diamonds)];
    gs.players[2].hand = vec![c(R::Ace, S::Hearts), c(R::Three, S::Diamonds)];

    let awards = distribute_all_pots(&mut gs).unwrap();
    assert_eq!(awards.len(), 3);
    assert_eq!(gs.players[0].chips, 300);
    assert_eq!(gs.players[1].chips, 200);
    // uncontested top layer returns to its only contributor
    assert_eq!(gs.players[2].chips, 100);
    assert_eq!(awards[2].winners[0].category, None);
    assert_eq!(gs.pot, 0);
}

#[test]
fn split_pot_differs_by_at_most_one_chip() {
    let mut gs = table_with_bets(&[50, 50, 1]);
    gs.players[2].is_folded = true;
    gs.community_cards = vec![
        c(R::Five, S::Clubs),
        c(R::Six, S::Diamonds),
        c(R::Seven, S::Hearts),
        c(R::Eight, S::Spades),
        c(R::Nine, S::Clubs),
    ];
    gs.players[0].hand = vec![c(R::Two, S::Clubs), c(R::Three, S::Diamonds)];
    gs.players[1].hand = vec![c(R::Two, S::Diamonds), c(R::Three, S::Clubs)];

    let awards = distribute_all_pots(&mut gs).unwrap();
    let paid: u32 = awards.iter().flat_map(|a| &a.winners).map(|w| w.amount).sum();
    assert_eq!(paid, 101);
    assert_eq!(gs.players[0].chips + gs.players[1].chips, 101);
    assert!(gs.players[0].chips.abs_diff(gs.players[1].chips) <= 1);
    // the odd chip goes to the lower seat
    assert_eq!(gs.players[0].chips, 51);
}

#[test]
fn second_distribution_pays_nothing() {
    let mut gs = table_with_bets(&[100, 100]);
    gs.community_cards = river_board();
    gs.players[0].hand = vec![c(R::Ace, S::Hearts), c(R::Ace, S::Diamonds)];
    gs.players[1].hand = vec![c(R::Three, S::Hearts), c(R::Four, S::Diamonds)];

    assert_eq!(distribute_all_pots(&mut gs).unwrap().len(), 1);
    let chips: Vec<u32> = gs.players.iter().map(|p| p.chips).collect();
    assert!(distribute_all_pots(&mut gs).unwrap().is_empty());
    assert_eq!(gs.players.iter().map(|p| p.chips).collect::<Vec<_>>(), chips);
}

#[test]
fn failed_showdown_moves_no_chips() {
    let mut gs = table_with_bets(&[100, 100]);
    gs.community_cards = river_board()[..2].to_vec();
    gs.players[0].hand = vec![c(R::Ace, S::Hearts), c(R::Ace, S::Diamonds)];
    gs.players[1].hand = vec![c(R::Three, S::Hearts), c(R::Four, S::Diamonds)];
    assert!(distribute_all_pots(&mut gs).is_err());
    assert_eq!(gs.pot, 200);
    assert!(gs.players.iter().all(|p| p.chips == 0));
}
