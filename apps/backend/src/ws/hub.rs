//! Per-room registry of live sessions for broadcast fan-out.
//!
//! Broadcasts carry only the event kind; each session pulls its own
//! per-seat view from the room when the notification arrives, so a hidden
//! hand never crosses a channel it should not.

use actix::prelude::*;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::actions::ActionOutcome;
use crate::domain::bidding::BidAction;
use crate::domain::cards_types::Card;
use crate::domain::seats::Seat;

/// What happened in the room; sessions translate this into per-seat frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoomEvent {
    PlayerJoined { seat: Seat, player_count: usize },
    GameStarted,
    BidMade { seat: Seat, action: BidAction },
    CardPlayed { seat: Seat, card: Card, outcome: ActionOutcome },
    NewBoard,
    StateChanged,
}

#[derive(Message, Clone, Copy)]
#[rtype(result = "()")]
pub struct RoomBroadcast {
    pub event: RoomEvent,
}

/// Registry of session recipients per room id.
#[derive(Default)]
pub struct RoomSessionRegistry {
    sessions: DashMap<String, DashMap<Uuid, Recipient<RoomBroadcast>>>,
}

impl RoomSessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn register(&self, room_id: &str, recipient: Recipient<RoomBroadcast>) -> Uuid {
        let token = Uuid::new_v4();
        let entry = self
            .sessions
            .entry(room_id.to_string())
            .or_insert_with(DashMap::new);
        entry.insert(token, recipient);
        token
    }

    pub fn unregister(&self, room_id: &str, token: Uuid) {
        if let Some(entry) = self.sessions.get(room_id) {
            entry.remove(&token);
            if entry.is_empty() {
                drop(entry);
                self.sessions.remove(room_id);
            }
        }
    }

    pub fn broadcast(&self, room_id: &str, event: RoomEvent) {
        if let Some(entry) = self.sessions.get(room_id) {
            for recipient in entry.iter() {
                let _ = recipient.value().do_send(RoomBroadcast { event });
            }
        }
    }
}
