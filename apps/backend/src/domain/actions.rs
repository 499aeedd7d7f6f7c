//! The game reducer: domain actions in, next authoritative state out.
//!
//! All validation happens before any mutation, so a rejected action leaves
//! the state exactly as it was. Wrong-phase submissions surface as
//! `DomainError::Phase`; rule violations as `DomainError::Validation`.

use time::OffsetDateTime;

use crate::domain::bidding::{
    is_auction_complete, resolve_contract, validate_call, BidCall,
};
use crate::domain::cards_logic::remove_card;
use crate::domain::cards_types::Card;
use crate::domain::dealing::Deal;
use crate::domain::scoring::{score_contract, ContractResult};
use crate::domain::seats::{Seat, Side};
use crate::domain::state::{CardPlayState, GamePhase, GameState};
use crate::domain::tricks::{
    trick_winner, validate_play, PlayedCard, Trick, TRICKS_PER_HAND,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// Everything that can happen to a table. Exhaustive by construction:
/// adding a variant breaks every match until it is handled.
#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    DealCards { deal: Deal },
    MakeBid { call: BidCall },
    PlayCard { seat: Seat, card: Card },
    CompleteHand,
}

/// What an accepted action did, for the transport layer's event fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Dealt,
    BidMade {
        auction_complete: bool,
        passed_out: bool,
    },
    CardPlayed {
        trick_complete: bool,
        trick_winner: Option<Seat>,
        hand_complete: bool,
    },
    HandCompleted,
}

/// Apply one action to the state, mutating it only on success.
pub fn apply_action(
    state: &mut GameState,
    action: GameAction,
) -> Result<ActionOutcome, DomainError> {
    match action {
        GameAction::DealCards { deal } => handle_deal(state, deal),
        GameAction::MakeBid { call } => handle_bid(state, call),
        GameAction::PlayCard { seat, card } => handle_play(state, seat, card),
        GameAction::CompleteHand => handle_complete(state),
    }
}

/// Install a fresh deal and enter the bidding phase. Legal from any phase;
/// everything hand-scoped is reset.
fn handle_deal(state: &mut GameState, deal: Deal) -> Result<ActionOutcome, DomainError> {
    deal.verify_partition()?;

    state.hands = deal.hands.clone();
    state.dealer = Some(deal.dealer);
    state.current_bidder = Some(deal.dealer);
    state.current_player = None;
    state.bidding = Some(crate::domain::bidding::BiddingSequence::new(deal.dealer));
    state.contract = None;
    state.card_play = None;
    state.result = None;
    state.score = None;
    state.deal = Some(deal);
    state.phase = GamePhase::Bidding;

    Ok(ActionOutcome::Dealt)
}

fn handle_bid(state: &mut GameState, call: BidCall) -> Result<ActionOutcome, DomainError> {
    state.require_phase(GamePhase::Bidding)?;
    validate_call(state.require_bidding()?, call.seat, call.action)?;

    let sequence = state
        .bidding
        .as_mut()
        .ok_or_else(|| DomainError::invariant("bidding sequence not initialized"))?;
    sequence.calls.push(call);

    if !is_auction_complete(sequence) {
        let next = sequence.bidder_to_act();
        state.current_bidder = Some(next);
        return Ok(ActionOutcome::BidMade {
            auction_complete: false,
            passed_out: false,
        });
    }

    sequence.complete = true;
    let contract = resolve_contract(sequence)?;
    sequence.contract = contract;

    match contract {
        // Passed out: no contract, no play, no score.
        None => {
            state.current_bidder = None;
            state.phase = GamePhase::Complete;
            Ok(ActionOutcome::BidMade {
                auction_complete: true,
                passed_out: true,
            })
        }
        Some(contract) => {
            let play = CardPlayState::new(contract);
            state.current_player = Some(play.leader);
            state.contract = Some(contract);
            state.card_play = Some(play);
            state.current_bidder = None;
            state.phase = GamePhase::Playing;
            Ok(ActionOutcome::BidMade {
                auction_complete: true,
                passed_out: false,
            })
        }
    }
}

fn handle_play(state: &mut GameState, seat: Seat, card: Card) -> Result<ActionOutcome, DomainError> {
    state.require_phase(GamePhase::Playing)?;

    let play = state.require_card_play()?;
    let to_act = state
        .current_player
        .ok_or_else(|| DomainError::invariant("playing phase with no player to act"))?;
    if seat != to_act {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("it is {to_act}'s turn to play"),
        ));
    }
    validate_play(card, state.hand(seat), &play.current_trick)?;
    let trump = play.contract.strain.trump_suit();

    // Validation passed; from here on the action must fully apply.
    let played = remove_card(&mut state.hands[seat.index()], card)
        .ok_or_else(|| DomainError::invariant("validated card vanished from hand"))?;
    let play = state
        .card_play
        .as_mut()
        .ok_or_else(|| DomainError::invariant("card play not initialized"))?;
    play.current_trick.cards.push(PlayedCard {
        card: played,
        seat,
        at: OffsetDateTime::now_utc(),
    });

    if !play.current_trick.is_full() {
        state.current_player = Some(seat.next());
        return Ok(ActionOutcome::CardPlayed {
            trick_complete: false,
            trick_winner: None,
            hand_complete: false,
        });
    }

    // Fourth card: resolve the trick.
    let winner = trick_winner(&play.current_trick, trump)?;
    play.current_trick.winner = Some(winner);
    play.current_trick.complete = true;
    match winner.side() {
        Side::NorthSouth => play.ns_tricks += 1,
        Side::EastWest => play.ew_tricks += 1,
    }
    play.tricks.push(play.current_trick.clone());
    let trick_count = play.completed_tricks();

    if trick_count < TRICKS_PER_HAND {
        play.current_trick = Trick::new(trick_count + 1, winner);
        play.leader = winner;
        state.current_player = Some(winner);
        return Ok(ActionOutcome::CardPlayed {
            trick_complete: true,
            trick_winner: Some(winner),
            hand_complete: false,
        });
    }

    // Thirteenth trick: score the hand.
    let contract = play.contract;
    let declarer = play.declarer;
    let tricks_made = play.tricks_for(declarer.side());
    let vulnerability = state.require_deal()?.vulnerability;

    let result = ContractResult {
        contract,
        tricks_made,
        declarer,
        vulnerability,
    };
    state.score = Some(score_contract(&result));
    state.result = Some(result);
    state.current_player = None;
    state.phase = GamePhase::Complete;

    Ok(ActionOutcome::CardPlayed {
        trick_complete: true,
        trick_winner: Some(winner),
        hand_complete: true,
    })
}

/// Forced transition to `Complete` for abnormal termination paths.
fn handle_complete(state: &mut GameState) -> Result<ActionOutcome, DomainError> {
    state.phase = GamePhase::Complete;
    state.current_bidder = None;
    state.current_player = None;
    Ok(ActionOutcome::HandCompleted)
}
