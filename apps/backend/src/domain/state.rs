//! Authoritative game state: phases, card-play bookkeeping, root aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::bidding::{BiddingSequence, Contract};
use crate::domain::cards_types::Card;
use crate::domain::dealing::Deal;
use crate::domain::scoring::{ContractResult, DuplicateScore};
use crate::domain::seats::{Seat, Side};
use crate::domain::tricks::Trick;
use crate::errors::domain::DomainError;

/// Hand lifecycle phases. One-directional within a hand; a new deal
/// re-enters `Bidding`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Waiting,
    Bidding,
    Playing,
    Complete,
}

/// Card-play bookkeeping for the current hand.
///
/// Invariants: `ns_tricks + ew_tricks == tricks.len() <= 13`;
/// `dummy == declarer.partner()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPlayState {
    /// Completed tricks in play order.
    pub tricks: Vec<Trick>,
    /// The trick being assembled (or the final trick once the hand ends).
    pub current_trick: Trick,
    pub leader: Seat,
    pub declarer: Seat,
    pub dummy: Seat,
    pub contract: Contract,
    pub ns_tricks: u8,
    pub ew_tricks: u8,
}

impl CardPlayState {
    /// Set up play for a freshly resolved contract: dummy is declarer's
    /// partner and the opening lead belongs to declarer's left-hand opponent.
    pub fn new(contract: Contract) -> Self {
        let opening_leader = contract.declarer.next();
        Self {
            tricks: Vec::new(),
            current_trick: Trick::new(1, opening_leader),
            leader: opening_leader,
            declarer: contract.declarer,
            dummy: contract.declarer.partner(),
            contract,
            ns_tricks: 0,
            ew_tricks: 0,
        }
    }

    #[inline]
    pub fn completed_tricks(&self) -> u8 {
        self.tricks.len() as u8
    }

    /// Whether any card of the hand has been played, counting completed
    /// tricks. Gates dummy exposure (reconnection-safe).
    #[inline]
    pub fn any_card_played(&self) -> bool {
        !self.current_trick.cards.is_empty() || !self.tricks.is_empty()
    }

    #[inline]
    pub fn tricks_for(&self, side: Side) -> u8 {
        match side {
            Side::NorthSouth => self.ns_tricks,
            Side::EastWest => self.ew_tricks,
        }
    }
}

/// The root aggregate for one table. Reset and rebuilt on each new deal.
///
/// The reducer in `actions` is the only writer; everything else reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub phase: GamePhase,
    pub deal: Option<Deal>,
    pub dealer: Option<Seat>,
    pub current_bidder: Option<Seat>,
    pub current_player: Option<Seat>,
    pub bidding: Option<BiddingSequence>,
    pub contract: Option<Contract>,
    pub card_play: Option<CardPlayState>,
    pub result: Option<ContractResult>,
    pub score: Option<DuplicateScore>,
    /// Authoritative remaining cards, indexed by seat. Never sent to a
    /// client unfiltered; see `player_view`.
    pub hands: [Vec<Card>; 4],
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Waiting,
            deal: None,
            dealer: None,
            current_bidder: None,
            current_player: None,
            bidding: None,
            contract: None,
            card_play: None,
            result: None,
            score: None,
            hands: Default::default(),
        }
    }

    #[inline]
    pub fn hand(&self, seat: Seat) -> &[Card] {
        &self.hands[seat.index()]
    }

    pub fn require_phase(&self, expected: GamePhase) -> Result<(), DomainError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(DomainError::phase(expected, self.phase))
        }
    }

    pub fn require_bidding(&self) -> Result<&BiddingSequence, DomainError> {
        self.bidding
            .as_ref()
            .ok_or_else(|| DomainError::invariant("bidding sequence not initialized"))
    }

    pub fn require_card_play(&self) -> Result<&CardPlayState, DomainError> {
        self.card_play
            .as_ref()
            .ok_or_else(|| DomainError::invariant("card play not initialized"))
    }

    pub fn require_deal(&self) -> Result<&Deal, DomainError> {
        self.deal
            .as_ref()
            .ok_or_else(|| DomainError::invariant("no deal installed"))
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
