//! Wire messages for the realtime channel.
//!
//! The payload shapes are deliberately thin: every state-changing event is
//! followed by a per-seat `RoomView` snapshot, so clients never have to
//! reconstruct state from deltas.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::bidding::BidAction;
use crate::domain::cards_types::Card;
use crate::domain::scoring::DuplicateScore;
use crate::domain::seats::Seat;
use crate::services::rooms::{PlayerPublic, RoomView};

pub const PROTOCOL_VERSION: i32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Hello {
        protocol: i32,
    },
    CreateRoom {
        #[serde(default)]
        player_id: Option<Uuid>,
    },
    JoinRoom {
        room_id: String,
        #[serde(default)]
        player_id: Option<Uuid>,
    },
    StartGame,
    PlaceBid {
        action: BidAction,
    },
    PlayCard {
        card: Card,
    },
    DealNextHand,
    Sync,
}

/// Outgoing frames. Serialize-only: clients never send these back.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    HelloAck {
        protocol: i32,
    },
    RoomCreated {
        room_id: String,
        seat: Seat,
        player_id: Uuid,
    },
    RoomJoined {
        room_id: String,
        seat: Seat,
        player_id: Uuid,
        players: Vec<PlayerPublic>,
    },
    PlayerJoined {
        seat: Seat,
        player_count: usize,
    },
    GameStarted {
        view: RoomView,
    },
    StateUpdate {
        view: RoomView,
    },
    BidMade {
        seat: Seat,
        action: BidAction,
        view: RoomView,
    },
    CardPlayed {
        seat: Seat,
        card: Card,
        view: RoomView,
    },
    TrickComplete {
        winner: Seat,
        view: RoomView,
    },
    HandComplete {
        score: DuplicateScore,
        view: RoomView,
    },
    Error {
        code: String,
        message: String,
    },
}
