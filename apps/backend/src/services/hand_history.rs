//! In-memory record of completed hands for post-game review.
//!
//! Text export formats are out of scope; this keeps the structured records
//! a review UI needs.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::bidding::BiddingSequence;
use crate::domain::cards_types::Card;
use crate::domain::dealing::Deal;
use crate::domain::scoring::{ContractResult, DuplicateScore};
use crate::domain::tricks::{PlayedCard, Trick};

/// One completed hand with everything needed to replay it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandRecord {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
    pub deal: Deal,
    pub bidding: BiddingSequence,
    pub tricks: Vec<Trick>,
    pub opening_lead: Option<PlayedCard>,
    /// Cards declarer played from their own hand, in play order.
    pub declarer_plays: Vec<PlayedCard>,
    /// Dummy's originally exposed hand.
    pub dummy_exposed: Vec<Card>,
    pub result: ContractResult,
    pub score: DuplicateScore,
    /// Display names per seat (N, E, S, W).
    pub players: [String; 4],
    pub duration_ms: u64,
}

/// Per-room store of completed hands, in play order.
#[derive(Debug, Default)]
pub struct HandHistory {
    hands: Vec<HandRecord>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { hands: Vec::new() }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn store_hand(
        &mut self,
        deal: Deal,
        bidding: BiddingSequence,
        tricks: Vec<Trick>,
        result: ContractResult,
        score: DuplicateScore,
        players: [String; 4],
        duration_ms: u64,
    ) -> Uuid {
        let opening_lead = tricks.first().and_then(|t| t.cards.first()).cloned();
        let declarer_plays = tricks
            .iter()
            .flat_map(|t| t.cards.iter())
            .filter(|p| p.seat == result.declarer)
            .cloned()
            .collect();
        let dummy = result.declarer.partner();
        let dummy_exposed = deal.hand(dummy).to_vec();

        let id = Uuid::new_v4();
        self.hands.push(HandRecord {
            id,
            recorded_at: OffsetDateTime::now_utc(),
            deal,
            bidding,
            tricks,
            opening_lead,
            declarer_plays,
            dummy_exposed,
            result,
            score,
            players,
            duration_ms,
        });
        id
    }

    pub fn get(&self, id: Uuid) -> Option<&HandRecord> {
        self.hands.iter().find(|h| h.id == id)
    }

    pub fn all(&self) -> &[HandRecord] {
        &self.hands
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}
