//! Rubber-free session scoring: a fixed run of hands with running NS/EW totals.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::scoring::DuplicateScore;

pub const HANDS_PER_SESSION: u32 = 4;

/// Accumulated scores across a fixed-length session.
///
/// Mutated only by `start_hand` (advancing the hand counter) and
/// `record_score` (appending one score per completed hand).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionScore {
    pub session_id: Uuid,
    pub hand_number: u32,
    pub total_hands: u32,
    pub ns_total: i32,
    pub ew_total: i32,
    pub hand_scores: Vec<DuplicateScore>,
    pub complete: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
}

impl SessionScore {
    pub fn new(total_hands: u32) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            hand_number: 0,
            total_hands,
            ns_total: 0,
            ew_total: 0,
            hand_scores: Vec::new(),
            complete: false,
            started_at: OffsetDateTime::now_utc(),
        }
    }

    /// Advance to the next hand, auto-resetting a completed session.
    /// Returns the new hand number (1-based; doubles as the board number).
    pub fn start_hand(&mut self) -> u32 {
        if self.complete {
            *self = Self::new(self.total_hands);
        }
        self.hand_number += 1;
        self.hand_number
    }

    /// Record a completed hand's score and accumulate the totals.
    pub fn record_score(&mut self, score: DuplicateScore) {
        self.hand_scores.push(score);
        self.ns_total += score.ns_score;
        self.ew_total += score.ew_score;
        if self.hand_number >= self.total_hands {
            self.complete = true;
        }
    }

    pub fn remaining_hands(&self) -> u32 {
        self.total_hands.saturating_sub(self.hand_number)
    }
}
