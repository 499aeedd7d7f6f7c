//! Game rooms: seats, the authoritative state, and the store that owns them.
//!
//! A room applies all mutating actions strictly sequentially; callers go
//! through the room's mutex in `RoomStore`, so two concurrent submissions
//! can never interleave mid-transition. The engine itself never blocks.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::domain::actions::{apply_action, ActionOutcome, GameAction};
use crate::domain::bidding::{BidAction, BidCall};
use crate::domain::cards_types::Card;
use crate::domain::dealing::{deal, VulnerabilityRule};
use crate::domain::player_view::{project, PlayerGameView};
use crate::domain::seats::Seat;
use crate::domain::session::SessionScore;
use crate::domain::state::GameState;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::services::hand_history::HandHistory;

const ROOM_CODE_LEN: usize = 6;
const INACTIVE_AFTER_SECS: i64 = 30 * 60;

/// A connected (or lately disconnected) participant in one seat.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: Uuid,
    pub conn_id: Uuid,
    pub seat: Seat,
    pub connected: bool,
}

/// Roster entry safe to share with every client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPublic {
    pub seat: Seat,
    pub player_id: Uuid,
    pub connected: bool,
}

/// One seat's outgoing snapshot: roster, session totals, projected game.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    pub room_id: String,
    pub players: Vec<PlayerPublic>,
    pub session: SessionScore,
    pub game: PlayerGameView,
}

pub struct GameRoom {
    pub room_id: String,
    players: [Option<Player>; 4],
    state: GameState,
    session: SessionScore,
    history: HandHistory,
    vulnerability_rule: VulnerabilityRule,
    hand_started_at: Option<OffsetDateTime>,
    last_activity: OffsetDateTime,
}

impl GameRoom {
    pub fn new(room_id: String, vulnerability_rule: VulnerabilityRule, hands_per_session: u32) -> Self {
        Self {
            room_id,
            players: Default::default(),
            state: GameState::new(),
            session: SessionScore::new(hands_per_session),
            history: HandHistory::new(),
            vulnerability_rule,
            hand_started_at: None,
            last_activity: OffsetDateTime::now_utc(),
        }
    }

    fn touch(&mut self) {
        self.last_activity = OffsetDateTime::now_utc();
    }

    /// Seat a connection. A returning `player_id` reclaims its old seat;
    /// otherwise the first empty seat is used, then any abandoned one.
    pub fn add_player(
        &mut self,
        conn_id: Uuid,
        player_id: Option<Uuid>,
    ) -> Result<Seat, DomainError> {
        if let Some(player_id) = player_id {
            let reclaimed = self
                .players
                .iter_mut()
                .flatten()
                .find(|p| p.id == player_id)
                .map(|slot| {
                    slot.conn_id = conn_id;
                    slot.connected = true;
                    slot.seat
                });
            if let Some(seat) = reclaimed {
                info!(room_id = %self.room_id, %player_id, seat = %seat, "player reconnected");
                self.touch();
                return Ok(seat);
            }
        }

        let new_id = player_id.unwrap_or_else(Uuid::new_v4);
        for seat in Seat::ALL {
            if self.players[seat.index()].is_none() {
                self.players[seat.index()] = Some(Player {
                    id: new_id,
                    conn_id,
                    seat,
                    connected: true,
                });
                self.touch();
                return Ok(seat);
            }
        }

        // Full table: allow takeover of an abandoned seat.
        for seat in Seat::ALL {
            let slot = &mut self.players[seat.index()];
            if matches!(slot, Some(p) if !p.connected) {
                *slot = Some(Player {
                    id: new_id,
                    conn_id,
                    seat,
                    connected: true,
                });
                info!(room_id = %self.room_id, seat = %seat, "abandoned seat taken over");
                self.touch();
                return Ok(seat);
            }
        }

        Err(DomainError::validation(
            ValidationKind::RoomFull,
            "all four seats are taken",
        ))
    }

    pub fn seat_of_conn(&self, conn_id: Uuid) -> Option<Seat> {
        self.players
            .iter()
            .flatten()
            .find(|p| p.conn_id == conn_id)
            .map(|p| p.seat)
    }

    pub fn handle_disconnect(&mut self, conn_id: Uuid) {
        for player in self.players.iter_mut().flatten() {
            if player.conn_id == conn_id {
                player.connected = false;
                info!(room_id = %self.room_id, seat = %player.seat, "player disconnected");
            }
        }
    }

    pub fn seated_count(&self) -> usize {
        self.players.iter().flatten().count()
    }

    pub fn roster(&self) -> Vec<PlayerPublic> {
        self.players
            .iter()
            .flatten()
            .map(|p| PlayerPublic {
                seat: p.seat,
                player_id: p.id,
                connected: p.connected,
            })
            .collect()
    }

    /// Start the first hand. Requires a full table; North deals first.
    pub fn start_game(&mut self) -> Result<ActionOutcome, DomainError> {
        if self.seated_count() < 4 {
            return Err(DomainError::validation(
                ValidationKind::NotEnoughPlayers,
                "need 4 players to start",
            ));
        }
        self.start_hand(Seat::North)
    }

    /// Deal the next board; the dealer rotates clockwise.
    pub fn deal_next_hand(&mut self) -> Result<ActionOutcome, DomainError> {
        let next_dealer = match self.state.deal.as_ref() {
            Some(deal) => deal.dealer.next(),
            None => Seat::North,
        };
        self.start_hand(next_dealer)
    }

    fn start_hand(&mut self, dealer: Seat) -> Result<ActionOutcome, DomainError> {
        let board_no = self.session.start_hand();
        let vulnerability = self.vulnerability_rule.vulnerability(dealer, board_no);
        let deal = deal(dealer, vulnerability);
        info!(
            room_id = %self.room_id,
            board_no,
            dealer = %dealer,
            deal_id = %deal.id,
            "dealing new board"
        );
        let outcome = apply_action(&mut self.state, GameAction::DealCards { deal })?;
        self.hand_started_at = Some(OffsetDateTime::now_utc());
        self.touch();
        Ok(outcome)
    }

    /// Submit a call for the seat bound to `conn_id`.
    pub fn place_bid(
        &mut self,
        conn_id: Uuid,
        action: BidAction,
    ) -> Result<(Seat, ActionOutcome), DomainError> {
        let seat = self.require_seat(conn_id)?;
        let call = BidCall {
            seat,
            action,
            at: OffsetDateTime::now_utc(),
        };
        let outcome = apply_action(&mut self.state, GameAction::MakeBid { call })?;
        self.touch();
        Ok((seat, outcome))
    }

    /// Submit a card for the seat bound to `conn_id`.
    ///
    /// When it is dummy's turn and the submitter is declarer, the play is
    /// applied as dummy's: validated against dummy's hand, not declarer's.
    pub fn play_card(
        &mut self,
        conn_id: Uuid,
        card: Card,
    ) -> Result<(Seat, ActionOutcome), DomainError> {
        let conn_seat = self.require_seat(conn_id)?;

        let acting_seat = match (&self.state.card_play, self.state.current_player) {
            (Some(play), Some(to_act))
                if to_act == play.dummy && conn_seat == play.declarer =>
            {
                play.dummy
            }
            _ => conn_seat,
        };

        let outcome = apply_action(
            &mut self.state,
            GameAction::PlayCard {
                seat: acting_seat,
                card,
            },
        )?;

        if matches!(outcome, ActionOutcome::CardPlayed { hand_complete: true, .. }) {
            self.record_completed_hand();
        }

        self.touch();
        Ok((acting_seat, outcome))
    }

    /// Session bookkeeping and history once the 13th trick resolves.
    fn record_completed_hand(&mut self) {
        let (Some(result), Some(score), Some(deal), Some(bidding), Some(play)) = (
            self.state.result.clone(),
            self.state.score,
            self.state.deal.clone(),
            self.state.bidding.clone(),
            self.state.card_play.clone(),
        ) else {
            return;
        };

        self.session.record_score(score);

        let duration_ms = self
            .hand_started_at
            .map(|started| {
                let elapsed = OffsetDateTime::now_utc() - started;
                elapsed.whole_milliseconds().max(0) as u64
            })
            .unwrap_or(0);

        let players = Seat::ALL.map(|seat| {
            self.players[seat.index()]
                .as_ref()
                .map(|p| p.id.to_string())
                .unwrap_or_else(|| seat.name().to_string())
        });

        let record_id = self.history.store_hand(
            deal,
            bidding,
            play.tricks,
            result,
            score,
            players,
            duration_ms,
        );
        info!(
            room_id = %self.room_id,
            %record_id,
            ns_score = score.ns_score,
            "hand complete, recorded to history"
        );
    }

    pub fn view_for(&self, seat: Seat) -> RoomView {
        RoomView {
            room_id: self.room_id.clone(),
            players: self.roster(),
            session: self.session.clone(),
            game: project(&self.state, seat),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn session(&self) -> &SessionScore {
        &self.session
    }

    pub fn history(&self) -> &HandHistory {
        &self.history
    }

    pub fn is_inactive(&self) -> bool {
        let idle = OffsetDateTime::now_utc() - self.last_activity;
        idle.whole_seconds() > INACTIVE_AFTER_SECS
    }

    fn require_seat(&self, conn_id: Uuid) -> Result<Seat, DomainError> {
        self.seat_of_conn(conn_id).ok_or_else(|| {
            DomainError::validation(ValidationKind::NotSeated, "connection holds no seat")
        })
    }
}

/// Explicit owner of every live room, passed to the API layer.
/// Each room is guarded by its own mutex (single writer per room).
#[derive(Default)]
pub struct RoomStore {
    rooms: DashMap<String, Arc<Mutex<GameRoom>>>,
}

impl RoomStore {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    pub fn create_room(
        &self,
        vulnerability_rule: VulnerabilityRule,
        hands_per_session: u32,
    ) -> (String, Arc<Mutex<GameRoom>>) {
        loop {
            let room_id = generate_room_code();
            if self.rooms.contains_key(&room_id) {
                continue;
            }
            let room = Arc::new(Mutex::new(GameRoom::new(
                room_id.clone(),
                vulnerability_rule,
                hands_per_session,
            )));
            self.rooms.insert(room_id.clone(), room.clone());
            info!(%room_id, "room created");
            return (room_id, room);
        }
    }

    pub fn get(&self, room_id: &str) -> Option<Arc<Mutex<GameRoom>>> {
        self.rooms.get(room_id).map(|r| r.value().clone())
    }

    pub fn remove(&self, room_id: &str) {
        self.rooms.remove(room_id);
    }

    /// Drop rooms idle past the threshold; returns how many were removed.
    pub fn sweep_inactive(&self) -> usize {
        let stale: Vec<String> = self
            .rooms
            .iter()
            .filter(|entry| entry.value().lock().is_inactive())
            .map(|entry| entry.key().clone())
            .collect();
        for room_id in &stale {
            self.rooms.remove(room_id);
            info!(%room_id, "inactive room removed");
        }
        stale.len()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

fn generate_room_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ROOM_CODE_LEN)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect()
}
