//! Auction legality, completion detection, and contract resolution.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::cards_types::{BidLevel, Strain};
use crate::domain::seats::Seat;
use crate::errors::domain::{DomainError, ValidationKind};

/// One call in the auction: a bid naming a level and strain, or Pass,
/// Double, Redouble.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BidAction {
    Bid { level: BidLevel, strain: Strain },
    Pass,
    Double,
    Redouble,
}

impl BidAction {
    #[inline]
    pub fn is_pass(self) -> bool {
        matches!(self, BidAction::Pass)
    }

    #[inline]
    pub fn as_bid(self) -> Option<(BidLevel, Strain)> {
        match self {
            BidAction::Bid { level, strain } => Some((level, strain)),
            _ => None,
        }
    }
}

/// Comparison value for bids: `level*5 + strain order`.
/// Ensures 1NT > 1S > 1H > 1D > 1C and 2C > 1NT.
#[inline]
pub fn bid_value(level: BidLevel, strain: Strain) -> u8 {
    level.get() * 5 + strain.order()
}

/// A call attributed to the seat that made it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidCall {
    pub seat: Seat,
    pub action: BidAction,
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
}

/// The resolved contract. Only produced by `resolve_contract`; never
/// constructed from raw user input.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub level: BidLevel,
    pub strain: Strain,
    pub declarer: Seat,
    pub doubled: bool,
    pub redoubled: bool,
}

/// The auction so far. Calls run strictly clockwise from the dealer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiddingSequence {
    pub calls: Vec<BidCall>,
    pub dealer: Seat,
    pub complete: bool,
    pub contract: Option<Contract>,
}

impl BiddingSequence {
    pub fn new(dealer: Seat) -> Self {
        Self {
            calls: Vec::new(),
            dealer,
            complete: false,
            contract: None,
        }
    }

    /// Seat due to call next: `(dealer index + call count) mod 4`.
    #[inline]
    pub fn bidder_to_act(&self) -> Seat {
        self.dealer.nth_next(self.calls.len())
    }

    fn last_bid_index(&self) -> Option<usize> {
        self.calls
            .iter()
            .rposition(|c| matches!(c.action, BidAction::Bid { .. }))
    }

    fn last_non_pass_index(&self) -> Option<usize> {
        self.calls.iter().rposition(|c| !c.action.is_pass())
    }
}

/// Validate a call by `seat` against the sequence, including turn order.
/// `Ok(())` means the call may be appended; errors carry the refusal reason.
pub fn validate_call(
    sequence: &BiddingSequence,
    seat: Seat,
    action: BidAction,
) -> Result<(), DomainError> {
    let to_act = sequence.bidder_to_act();
    if seat != to_act {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("it is {to_act}'s turn to call"),
        ));
    }

    match action {
        // Pass is always legal.
        BidAction::Pass => Ok(()),

        BidAction::Double => {
            let Some(bid_idx) = sequence.last_bid_index() else {
                return Err(DomainError::validation(
                    ValidationKind::InvalidDouble,
                    "cannot double without a previous bid",
                ));
            };
            // The bid must still be live: no double/redouble since it.
            match sequence.last_non_pass_index() {
                Some(idx) if idx == bid_idx => {}
                _ => {
                    return Err(DomainError::validation(
                        ValidationKind::InvalidDouble,
                        "cannot double a double or redouble",
                    ))
                }
            }
            let bidder = sequence.calls[bid_idx].seat;
            if !seat.is_opponent_of(bidder) {
                return Err(DomainError::validation(
                    ValidationKind::InvalidDouble,
                    "can only double opponent bids",
                ));
            }
            Ok(())
        }

        BidAction::Redouble => {
            let doubled = sequence
                .last_non_pass_index()
                .map(|idx| sequence.calls[idx].action == BidAction::Double)
                .unwrap_or(false);
            if !doubled {
                return Err(DomainError::validation(
                    ValidationKind::InvalidRedouble,
                    "can only redouble after a double",
                ));
            }
            let Some(bid_idx) = sequence.last_bid_index() else {
                return Err(DomainError::invariant(
                    "double present with no bid to redouble",
                ));
            };
            let bidder = sequence.calls[bid_idx].seat;
            if seat != bidder && !seat.is_partner_of(bidder) {
                return Err(DomainError::validation(
                    ValidationKind::InvalidRedouble,
                    "can only redouble your side's doubled bid",
                ));
            }
            Ok(())
        }

        BidAction::Bid { level, strain } => {
            if let Some(bid_idx) = sequence.last_bid_index() {
                let (last_level, last_strain) = sequence.calls[bid_idx]
                    .action
                    .as_bid()
                    .ok_or_else(|| DomainError::invariant("last bid index is not a bid"))?;
                if bid_value(level, strain) <= bid_value(last_level, last_strain) {
                    return Err(DomainError::validation(
                        ValidationKind::InsufficientBid,
                        format!("bid must be higher than {}{}", last_level.get(), last_strain),
                    ));
                }
            }
            Ok(())
        }
    }
}

/// Auction completion: four opening passes (passed out), or at least one
/// non-pass call followed by exactly three consecutive passes.
pub fn is_auction_complete(sequence: &BiddingSequence) -> bool {
    let calls = &sequence.calls;
    if calls.len() < 4 {
        return false;
    }

    if calls[calls.len() - 4..].iter().all(|c| c.action.is_pass()) {
        return true;
    }

    let trailing_passes = calls[calls.len() - 3..].iter().all(|c| c.action.is_pass());
    trailing_passes
        && calls[..calls.len() - 3]
            .iter()
            .any(|c| !c.action.is_pass())
}

/// Resolve a completed auction into its contract.
///
/// `Ok(None)` means the hand was passed out. Doubled/redoubled flags come
/// from the calls after the final bid; a later double resets a redouble.
/// The declarer is the first member of the winning side to have named the
/// winning strain anywhere in the auction, not necessarily the final bidder.
pub fn resolve_contract(sequence: &BiddingSequence) -> Result<Option<Contract>, DomainError> {
    if !is_auction_complete(sequence) {
        return Err(DomainError::invariant(
            "cannot resolve contract before the auction is complete",
        ));
    }

    let Some(bid_idx) = sequence.last_bid_index() else {
        return Ok(None);
    };
    let winning_call = &sequence.calls[bid_idx];
    let (level, strain) = winning_call
        .action
        .as_bid()
        .ok_or_else(|| DomainError::invariant("last bid index is not a bid"))?;

    let mut doubled = false;
    let mut redoubled = false;
    for call in &sequence.calls[bid_idx + 1..] {
        match call.action {
            BidAction::Double => {
                doubled = true;
                redoubled = false;
            }
            BidAction::Redouble => redoubled = true,
            _ => {}
        }
    }

    let winning_side = winning_call.seat.side();
    let declarer = sequence
        .calls
        .iter()
        .find(|call| {
            call.seat.side() == winning_side
                && call.action.as_bid().is_some_and(|(_, s)| s == strain)
        })
        .map(|call| call.seat)
        .ok_or_else(|| {
            DomainError::invariant("completed auction has no declarer for the winning strain")
        })?;

    Ok(Some(Contract {
        level,
        strain,
        declarer,
        doubled,
        redoubled,
    }))
}
