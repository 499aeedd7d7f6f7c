//! Shared strategies and small parsing helpers for domain tests.

use proptest::prelude::*;
use time::OffsetDateTime;

use crate::domain::cards_types::{BidLevel, Card, Strain};
use crate::domain::dealing::{full_deck, Vulnerability};
use crate::domain::seats::Seat;
use crate::domain::tricks::{PlayedCard, Trick};

pub fn parse_cards(tokens: &[&str]) -> Vec<Card> {
    tokens
        .iter()
        .map(|t| t.parse::<Card>().expect("hardcoded valid card token"))
        .collect()
}

pub fn arb_seat() -> impl Strategy<Value = Seat> {
    (0..4usize).prop_map(Seat::from_index)
}

pub fn arb_strain() -> impl Strategy<Value = Strain> {
    prop_oneof![
        Just(Strain::Clubs),
        Just(Strain::Diamonds),
        Just(Strain::Hearts),
        Just(Strain::Spades),
        Just(Strain::NoTrump),
    ]
}

pub fn arb_level() -> impl Strategy<Value = BidLevel> {
    (1u8..=7).prop_map(|l| BidLevel::new(l).expect("level in range"))
}

pub fn arb_vulnerability() -> impl Strategy<Value = Vulnerability> {
    (any::<bool>(), any::<bool>()).prop_map(|(ns, ew)| Vulnerability { ns, ew })
}

/// Four distinct cards drawn from a shuffled deck.
pub fn four_distinct_cards() -> impl Strategy<Value = Vec<Card>> {
    Just(full_deck())
        .prop_shuffle()
        .prop_map(|deck| deck[..4].to_vec())
}

/// A completed 4-card trick with a random leader; seats rotate clockwise.
pub fn complete_trick() -> impl Strategy<Value = Trick> {
    (four_distinct_cards(), arb_seat()).prop_map(|(cards, leader)| {
        let mut trick = Trick::new(1, leader);
        for (i, card) in cards.into_iter().enumerate() {
            trick.cards.push(PlayedCard {
                card,
                seat: leader.nth_next(i),
                at: OffsetDateTime::now_utc(),
            });
        }
        trick
    })
}
