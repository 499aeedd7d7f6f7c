//! Per-player projection of the authoritative state.
//!
//! `project` is pure and idempotent: it reads the authoritative state and
//! produces what one viewer is allowed to see. It never feeds back into the
//! authoritative state.
//!
//! Visibility rules:
//! - the viewer's own hand is always shown;
//! - dummy's remaining hand is shown to everyone once any card of the hand
//!   has been played (completed tricks count, so a reconnecting client sees
//!   dummy mid-hand);
//! - in the review phase after the hand, all four originally dealt hands are
//!   exposed alongside the remaining cards;
//! - nothing else is filtered: auction, tricks, contract, and scores are
//!   fully shared once they exist.

use serde::{Deserialize, Serialize};

use crate::domain::bidding::{BiddingSequence, Contract};
use crate::domain::cards_types::Card;
use crate::domain::dealing::Vulnerability;
use crate::domain::scoring::{ContractResult, DuplicateScore};
use crate::domain::seats::Seat;
use crate::domain::state::{CardPlayState, GamePhase, GameState};

/// What one seat is allowed to see. Serialized as-is to that seat's client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerGameView {
    pub viewer: Seat,
    pub phase: GamePhase,
    pub dealer: Option<Seat>,
    pub current_bidder: Option<Seat>,
    pub current_player: Option<Seat>,
    pub vulnerability: Option<Vulnerability>,
    pub bidding: Option<BiddingSequence>,
    pub contract: Option<Contract>,
    pub card_play: Option<CardPlayState>,
    pub result: Option<ContractResult>,
    pub score: Option<DuplicateScore>,
    /// Remaining cards per seat; hidden hands project as empty.
    pub hands: [Vec<Card>; 4],
    /// The four originally dealt hands, exposed only for post-hand review.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_hands: Option<[Vec<Card>; 4]>,
}

/// Derive the viewer-scoped state for `viewer`.
pub fn project(state: &GameState, viewer: Seat) -> PlayerGameView {
    let review = state.phase == GamePhase::Complete;

    let exposed_dummy = match &state.card_play {
        Some(play) if state.phase == GamePhase::Playing && play.any_card_played() => {
            Some(play.dummy)
        }
        _ => None,
    };

    let mut hands: [Vec<Card>; 4] = Default::default();
    for seat in Seat::ALL {
        let visible = seat == viewer || exposed_dummy == Some(seat) || review;
        if visible {
            hands[seat.index()] = state.hands[seat.index()].clone();
        }
    }

    let original_hands = if review {
        state.deal.as_ref().map(|deal| deal.hands.clone())
    } else {
        None
    };

    PlayerGameView {
        viewer,
        phase: state.phase,
        dealer: state.dealer,
        current_bidder: state.current_bidder,
        current_player: state.current_player,
        vulnerability: state.deal.as_ref().map(|d| d.vulnerability),
        bidding: state.bidding.clone(),
        contract: state.contract,
        card_play: state.card_play.clone(),
        result: state.result.clone(),
        score: state.score,
        hands,
        original_hands,
    }
}
