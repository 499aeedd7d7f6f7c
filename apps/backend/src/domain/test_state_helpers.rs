//! Builders for deterministic game states used across domain tests.

use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::actions::{apply_action, ActionOutcome, GameAction};
use crate::domain::bidding::{BidAction, BidCall};
use crate::domain::cards_types::{BidLevel, Card, Rank, Strain, Suit};
use crate::domain::dealing::{Deal, Vulnerability};
use crate::domain::seats::Seat;
use crate::domain::state::GameState;
use crate::errors::domain::DomainError;

pub fn call(seat: Seat, action: BidAction) -> BidCall {
    BidCall {
        seat,
        action,
        at: OffsetDateTime::now_utc(),
    }
}

pub fn bid(level: u8, strain: Strain) -> BidAction {
    BidAction::Bid {
        level: BidLevel::new(level).expect("test level in range"),
        strain,
    }
}

/// A legal partition deal: each seat holds one entire suit.
/// North spades, East hearts, South diamonds, West clubs — every player is
/// void outside their own suit, so any card is always a legal play.
pub fn one_suit_per_seat_deal(dealer: Seat, vulnerability: Vulnerability) -> Deal {
    let ranks = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];
    let suit_hand = |suit: Suit| -> Vec<Card> {
        ranks.iter().map(|&rank| Card { suit, rank }).collect()
    };
    Deal {
        id: Uuid::new_v4(),
        hands: [
            suit_hand(Suit::Spades),
            suit_hand(Suit::Hearts),
            suit_hand(Suit::Diamonds),
            suit_hand(Suit::Clubs),
        ],
        dealer,
        vulnerability,
        dealt_at: OffsetDateTime::now_utc(),
    }
}

/// Fresh state with the one-suit-per-seat deal installed.
pub fn dealt_state(dealer: Seat, vulnerability: Vulnerability) -> GameState {
    let mut state = GameState::new();
    apply_action(
        &mut state,
        GameAction::DealCards {
            deal: one_suit_per_seat_deal(dealer, vulnerability),
        },
    )
    .expect("deal applies");
    state
}

/// Run an auction by feeding calls through the reducer.
pub fn run_auction(
    state: &mut GameState,
    calls: &[(Seat, BidAction)],
) -> Result<ActionOutcome, DomainError> {
    let mut last = ActionOutcome::Dealt;
    for &(seat, action) in calls {
        last = apply_action(
            state,
            GameAction::MakeBid {
                call: call(seat, action),
            },
        )?;
    }
    Ok(last)
}
