use time::OffsetDateTime;

use crate::domain::cards_types::{Card, Suit};
use crate::domain::seats::Seat;
use crate::domain::test_gens::parse_cards;
use crate::domain::tricks::{legal_plays, trick_winner, validate_play, PlayedCard, Trick};
use crate::errors::domain::{DomainError, ValidationKind};

fn trick_with(leader: Seat, tokens: &[&str]) -> Trick {
    let mut trick = Trick::new(1, leader);
    for (i, card) in parse_cards(tokens).into_iter().enumerate() {
        trick.cards.push(PlayedCard {
            card,
            seat: leader.nth_next(i),
            at: OffsetDateTime::now_utc(),
        });
    }
    trick
}

fn card(token: &str) -> Card {
    token.parse().expect("hardcoded valid card token")
}

#[test]
fn leading_allows_the_entire_hand() {
    let hand = parse_cards(&["AS", "KH", "2C"]);
    let trick = Trick::new(1, Seat::North);
    assert_eq!(legal_plays(&hand, &trick), hand);
    assert!(validate_play(card("2C"), &hand, &trick).is_ok());
}

#[test]
fn must_follow_suit_when_holding_the_led_suit() {
    let hand = parse_cards(&["AS", "TS", "KH", "2C"]);
    let trick = trick_with(Seat::East, &["QS"]);

    let legal = legal_plays(&hand, &trick);
    assert_eq!(legal, parse_cards(&["AS", "TS"]));

    let err = validate_play(card("KH"), &hand, &trick).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::MustFollowSuit, _)
    ));
    assert!(validate_play(card("TS"), &hand, &trick).is_ok());
}

#[test]
fn void_hand_may_play_anything() {
    let hand = parse_cards(&["KH", "2C"]);
    let trick = trick_with(Seat::East, &["QS"]);
    assert_eq!(legal_plays(&hand, &trick), hand);
    assert!(validate_play(card("2C"), &hand, &trick).is_ok());
}

#[test]
fn card_not_in_hand_is_rejected() {
    let hand = parse_cards(&["KH"]);
    let trick = Trick::new(1, Seat::North);
    let err = validate_play(card("AS"), &hand, &trick).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::CardNotInHand, _)
    ));
}

#[test]
fn highest_of_led_suit_wins_without_trump() {
    // North leads the 4 of spades; East's ace holds
    let trick = trick_with(Seat::North, &["4S", "AS", "KS", "2H"]);
    assert_eq!(trick_winner(&trick, None).unwrap(), Seat::East);
}

#[test]
fn off_suit_cards_never_win_without_trump() {
    let trick = trick_with(Seat::North, &["4S", "AH", "KD", "2C"]);
    assert_eq!(trick_winner(&trick, None).unwrap(), Seat::North);
}

#[test]
fn any_trump_beats_any_non_trump() {
    // Hearts are trump; West's two of hearts beats three high spades
    let trick = trick_with(Seat::North, &["AS", "KS", "QS", "2H"]);
    assert_eq!(trick_winner(&trick, Some(Suit::Hearts)).unwrap(), Seat::West);
}

#[test]
fn highest_trump_wins_among_trumps() {
    let trick = trick_with(Seat::North, &["AS", "3H", "TH", "2H"]);
    assert_eq!(trick_winner(&trick, Some(Suit::Hearts)).unwrap(), Seat::South);
}

#[test]
fn trump_contract_without_trumps_played_falls_back_to_led_suit() {
    let trick = trick_with(Seat::West, &["QD", "KD", "2C", "3S"]);
    assert_eq!(trick_winner(&trick, Some(Suit::Hearts)).unwrap(), Seat::North);
}

#[test]
fn resolving_a_short_trick_is_an_invariant_error() {
    let trick = trick_with(Seat::North, &["4S", "AS"]);
    let err = trick_winner(&trick, None).unwrap_err();
    assert!(matches!(err, DomainError::Invariant(_)));
}

#[test]
fn seat_to_play_rotates_from_leader() {
    let mut trick = Trick::new(3, Seat::South);
    assert_eq!(trick.seat_to_play(), Seat::South);
    trick.cards.push(PlayedCard {
        card: card("2C"),
        seat: Seat::South,
        at: OffsetDateTime::now_utc(),
    });
    assert_eq!(trick.seat_to_play(), Seat::West);
}
