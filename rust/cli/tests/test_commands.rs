//! End-to-end checks of each subcommand through `holdem_cli::run`.
//!
//! Exit codes: 0 success, 2 any error, help and version print to stdout.

fn run(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut argv = vec!["holdem"];
    argv.extend_from_slice(args);
    let code = holdem_cli::run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn test_help_goes_to_stdout() {
    let (code, out, err) = run(&["--help"]);
    assert_eq!(code, 0);
    assert!(out.contains("equity"));
    assert!(err.is_empty());
}

#[test]
fn test_unknown_command_lists_commands() {
    let (code, out, err) = run(&["shuffle"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("Usage: holdem <command>"));
    for c in ["deal", "sim", "eval", "equity", "cfg"] {
        assert!(err.contains(&format!("  {}", c)), "missing {c}");
    }
}

#[test]
fn test_deal_with_seed_is_reproducible() {
    let first = run(&["deal", "--seed", "42", "--seats", "4"]);
    let second = run(&["deal", "--seed", "42", "--seats", "4"]);
    assert_eq!(first.0, 0, "{}", first.2);
    assert_eq!(first.1, second.1);
    assert!(first.1.contains("Hand #1 (seed 42)"));
    assert_eq!(first.1.lines().filter(|l| l.starts_with("Seat ")).count(), 4);
}

#[test]
fn test_deal_four_seats_marks_each_position() {
    let (code, out, _) = run(&["deal", "--seed", "3", "--seats", "4"]);
    assert_eq!(code, 0);
    let roles: Vec<&str> = out.lines().filter(|l| l.starts_with("Seat ")).collect();
    assert!(roles[0].contains(" D "), "{out}");
    assert!(roles[1].contains(" SB "), "{out}");
    assert!(roles[2].contains(" BB "), "{out}");
    assert!(out.contains("To act: P4"));
}

#[test]
fn test_deal_rejects_single_seat() {
    let (code, _, err) = run(&["deal", "--seats", "1"]);
    assert_eq!(code, 2);
    assert!(err.contains("seats must be between 2 and 10"));
}

#[test]
fn test_eval_royal_flush() {
    let (code, out, _) = run(&[
        "eval", "ASPADES", "KSPADES", "QSPADES", "JSPADES", "10SPADES",
    ]);
    assert_eq!(code, 0);
    assert!(out.contains("Category: Royal Flush"));
    assert!(out.contains("Tiebreaker: [14]"));
}

#[test]
fn test_eval_wheel_is_five_high() {
    let (code, out, _) = run(&[
        "eval", "AHEARTS", "2CLUBS", "3DIAMONDS", "4SPADES", "5HEARTS", "KCLUBS",
    ]);
    assert_eq!(code, 0);
    assert!(out.contains("Category: Straight"));
    assert!(out.contains("Tiebreaker: [5]"));
}

#[test]
fn test_eval_rejects_bad_and_duplicate_cards() {
    let (code, _, err) = run(&["eval", "AS", "KS", "QS", "JS", "TS"]);
    assert_eq!(code, 2);
    assert!(err.contains("Unrecognized card 'AS'"));

    let (code, _, err) = run(&[
        "eval", "AHEARTS", "AHEARTS", "2CLUBS", "3CLUBS", "4CLUBS",
    ]);
    assert_eq!(code, 2);
    assert!(err.contains("Duplicate card: AHEARTS"));
}

#[test]
fn test_eval_rejects_eight_cards() {
    let (code, _, err) = run(&[
        "eval", "2CLUBS", "3CLUBS", "4CLUBS", "5CLUBS", "6CLUBS", "7CLUBS", "8CLUBS", "9CLUBS",
    ]);
    assert_eq!(code, 2);
    assert!(err.contains("5 to 7 cards, got 8"));
}

#[test]
fn test_equity_json_report() {
    let (code, out, err) = run(&[
        "equity", "--hole", "AHEARTS", "ASPADES", "--board", "2CLUBS", "7DIAMONDS", "9HEARTS",
        "--opponents", "2", "--trials", "400", "--seed", "5",
    ]);
    assert_eq!(code, 0, "{err}");
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["trials"], 400);
    assert_eq!(report["opponents"], 2);
    let total = report["win_rate"].as_f64().unwrap()
        + report["tie_rate"].as_f64().unwrap()
        + report["lose_rate"].as_f64().unwrap();
    assert!((total - 100.0).abs() < 0.05);
    assert!(report["player_hands"].as_array().is_some_and(|a| !a.is_empty()));
}

#[test]
fn test_equity_same_seed_same_report() {
    let args = [
        "equity", "--hole", "KHEARTS", "QHEARTS", "--board", "2HEARTS", "9CLUBS", "JHEARTS",
        "5SPADES", "--trials", "300", "--seed", "77",
    ];
    assert_eq!(run(&args).1, run(&args).1);
}

#[test]
fn test_equity_requires_a_flop() {
    let (code, _, err) = run(&[
        "equity", "--hole", "AHEARTS", "ASPADES", "--board", "2CLUBS", "7DIAMONDS",
    ]);
    assert_eq!(code, 2);
    assert!(!err.is_empty());
}

#[test]
fn test_equity_too_many_opponents() {
    let (code, _, err) = run(&[
        "equity", "--hole", "AHEARTS", "ASPADES", "--board", "2CLUBS", "7DIAMONDS", "9HEARTS",
        "--opponents", "23", "--trials", "10",
    ]);
    assert_eq!(code, 2);
    assert!(err.contains("Too many opponents"));
}
