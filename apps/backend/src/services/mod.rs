//! Room orchestration around the domain core.

pub mod hand_history;
pub mod rooms;

pub use hand_history::{HandHistory, HandRecord};
pub use rooms::{GameRoom, Player, PlayerPublic, RoomStore, RoomView};
