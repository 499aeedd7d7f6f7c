//! One WebSocket session per connected client.
//!
//! The session actor owns no game state: every action goes through the
//! room's mutex, and every broadcast makes the session re-project its own
//! seat's view before anything is written to the socket.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::web;
use actix_web_actors::ws;
use parking_lot::Mutex;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::actions::ActionOutcome;
use crate::domain::seats::Seat;
use crate::errors::domain::DomainError;
use crate::services::rooms::GameRoom;
use crate::state::app_state::AppState;
use crate::ws::hub::{RoomBroadcast, RoomEvent};
use crate::ws::protocol::{ClientMsg, ServerMsg, PROTOCOL_VERSION};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub struct WsGameSession {
    conn_id: Uuid,
    player_id: Option<Uuid>,
    room_id: Option<String>,
    seat: Option<Seat>,
    registry_token: Option<Uuid>,
    app_state: web::Data<AppState>,
    last_heartbeat: Instant,
}

impl WsGameSession {
    pub fn new(app_state: web::Data<AppState>) -> Self {
        Self {
            conn_id: Uuid::new_v4(),
            player_id: None,
            room_id: None,
            seat: None,
            registry_token: None,
            app_state,
            last_heartbeat: Instant::now(),
        }
    }

    fn send(&self, ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(frame) => ctx.text(frame),
            Err(err) => error!(conn_id = %self.conn_id, error = %err, "failed to encode frame"),
        }
    }

    fn send_error(&self, ctx: &mut ws::WebsocketContext<Self>, err: &DomainError) {
        let (code, message) = match err {
            DomainError::Validation(kind, detail) => (kind.code().to_string(), detail.clone()),
            DomainError::Phase { .. } => ("PHASE_MISMATCH".to_string(), err.to_string()),
            DomainError::Invariant(_) => {
                // An invariant failure is a bug in the engine, not bad input.
                error!(conn_id = %self.conn_id, error = %err, "engine invariant violated");
                ("INTERNAL".to_string(), "internal error".to_string())
            }
        };
        self.send(ctx, &ServerMsg::Error { code, message });
    }

    fn room(&self) -> Option<Arc<Mutex<GameRoom>>> {
        let room_id = self.room_id.as_deref()?;
        self.app_state.rooms.get(room_id)
    }

    /// Current per-seat snapshot; `None` until the session holds a seat.
    fn own_view(&self) -> Option<crate::services::rooms::RoomView> {
        let seat = self.seat?;
        let room = self.room()?;
        let view = room.lock().view_for(seat);
        Some(view)
    }

    fn enter_room(
        &mut self,
        ctx: &mut ws::WebsocketContext<Self>,
        room_id: String,
        seat: Seat,
        player_id: Uuid,
    ) {
        let recipient = ctx.address().recipient::<RoomBroadcast>();
        let token = self.app_state.registry.register(&room_id, recipient);
        self.registry_token = Some(token);
        self.room_id = Some(room_id);
        self.seat = Some(seat);
        self.player_id = Some(player_id);
    }

    fn broadcast(&self, event: RoomEvent) {
        if let Some(room_id) = self.room_id.as_deref() {
            self.app_state.registry.broadcast(room_id, event);
        }
    }

    fn handle_client_msg(&mut self, ctx: &mut ws::WebsocketContext<Self>, msg: ClientMsg) {
        match msg {
            ClientMsg::Hello { protocol } => {
                if protocol != PROTOCOL_VERSION {
                    self.send(
                        ctx,
                        &ServerMsg::Error {
                            code: "BAD_PROTOCOL".into(),
                            message: format!("server speaks protocol {PROTOCOL_VERSION}"),
                        },
                    );
                    return;
                }
                self.send(
                    ctx,
                    &ServerMsg::HelloAck {
                        protocol: PROTOCOL_VERSION,
                    },
                );
            }

            ClientMsg::CreateRoom { player_id } => {
                let config = &self.app_state.config;
                let (room_id, room) = self
                    .app_state
                    .rooms
                    .create_room(config.vulnerability_rule, config.hands_per_session);
                let seated = {
                    let mut room = room.lock();
                    let claimed_id = player_id.or(self.player_id);
                    room.add_player(self.conn_id, claimed_id).map(|seat| {
                        // add_player generated an id when none was supplied;
                        // read back the authoritative one from the roster.
                        let player_id = room
                            .roster()
                            .iter()
                            .find(|p| p.seat == seat)
                            .map(|p| p.player_id)
                            .unwrap_or_else(Uuid::new_v4);
                        (seat, player_id)
                    })
                };
                match seated {
                    Ok((seat, player_id)) => {
                        self.enter_room(ctx, room_id.clone(), seat, player_id);
                        info!(conn_id = %self.conn_id, %room_id, seat = %seat, "room created");
                        self.send(
                            ctx,
                            &ServerMsg::RoomCreated {
                                room_id,
                                seat,
                                player_id,
                            },
                        );
                    }
                    Err(err) => self.send_error(ctx, &err),
                }
            }

            ClientMsg::JoinRoom { room_id, player_id } => {
                let Some(room) = self.app_state.rooms.get(&room_id) else {
                    self.send(
                        ctx,
                        &ServerMsg::Error {
                            code: "ROOM_NOT_FOUND".into(),
                            message: format!("no room {room_id}"),
                        },
                    );
                    return;
                };
                let joined = {
                    let mut room = room.lock();
                    let claimed_id = player_id.or(self.player_id);
                    room.add_player(self.conn_id, claimed_id).map(|seat| {
                        let player_id = room
                            .roster()
                            .iter()
                            .find(|p| p.seat == seat)
                            .map(|p| p.player_id)
                            .unwrap_or_else(Uuid::new_v4);
                        (seat, player_id, room.roster(), room.seated_count())
                    })
                };
                match joined {
                    Ok((seat, player_id, players, player_count)) => {
                        self.enter_room(ctx, room_id.clone(), seat, player_id);
                        info!(conn_id = %self.conn_id, %room_id, seat = %seat, "joined room");
                        self.send(
                            ctx,
                            &ServerMsg::RoomJoined {
                                room_id,
                                seat,
                                player_id,
                                players,
                            },
                        );
                        self.broadcast(RoomEvent::PlayerJoined { seat, player_count });
                    }
                    Err(err) => self.send_error(ctx, &err),
                }
            }

            ClientMsg::StartGame => {
                let Some(room) = self.room() else {
                    return self.send_not_in_room(ctx);
                };
                let started = room.lock().start_game();
                match started {
                    Ok(_) => self.broadcast(RoomEvent::GameStarted),
                    Err(err) => self.send_error(ctx, &err),
                }
            }

            ClientMsg::PlaceBid { action } => {
                let Some(room) = self.room() else {
                    return self.send_not_in_room(ctx);
                };
                let result = room.lock().place_bid(self.conn_id, action);
                match result {
                    Ok((seat, _outcome)) => self.broadcast(RoomEvent::BidMade { seat, action }),
                    Err(err) => self.send_error(ctx, &err),
                }
            }

            ClientMsg::PlayCard { card } => {
                let Some(room) = self.room() else {
                    return self.send_not_in_room(ctx);
                };
                let result = room.lock().play_card(self.conn_id, card);
                match result {
                    Ok((seat, outcome)) => {
                        self.broadcast(RoomEvent::CardPlayed {
                            seat,
                            card,
                            outcome,
                        });
                    }
                    Err(err) => self.send_error(ctx, &err),
                }
            }

            ClientMsg::DealNextHand => {
                let Some(room) = self.room() else {
                    return self.send_not_in_room(ctx);
                };
                let dealt = room.lock().deal_next_hand();
                match dealt {
                    Ok(_) => self.broadcast(RoomEvent::NewBoard),
                    Err(err) => self.send_error(ctx, &err),
                }
            }

            ClientMsg::Sync => {
                if let Some(view) = self.own_view() {
                    self.send(ctx, &ServerMsg::StateUpdate { view });
                } else {
                    self.send_not_in_room(ctx);
                }
            }
        }
    }

    fn send_not_in_room(&self, ctx: &mut ws::WebsocketContext<Self>) {
        self.send(
            ctx,
            &ServerMsg::Error {
                code: "NOT_IN_ROOM".into(),
                message: "join a room first".into(),
            },
        );
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "client heartbeat timed out");
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }
}

impl Actor for WsGameSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.start_heartbeat(ctx);
    }

    fn stopping(&mut self, _ctx: &mut Self::Context) -> Running {
        if let (Some(room_id), Some(token)) = (self.room_id.as_deref(), self.registry_token) {
            self.app_state.registry.unregister(room_id, token);
        }
        if let Some(room) = self.room() {
            room.lock().handle_disconnect(self.conn_id);
        }
        // Let the remaining players see the roster change.
        self.broadcast(RoomEvent::StateChanged);
        Running::Stop
    }
}

impl Handler<RoomBroadcast> for WsGameSession {
    type Result = ();

    fn handle(&mut self, msg: RoomBroadcast, ctx: &mut Self::Context) {
        let Some(view) = self.own_view() else {
            return;
        };

        match msg.event {
            RoomEvent::PlayerJoined { seat, player_count } => {
                self.send(ctx, &ServerMsg::PlayerJoined { seat, player_count });
                self.send(ctx, &ServerMsg::StateUpdate { view });
            }
            RoomEvent::GameStarted => {
                self.send(ctx, &ServerMsg::GameStarted { view });
            }
            RoomEvent::BidMade { seat, action } => {
                self.send(ctx, &ServerMsg::BidMade { seat, action, view });
            }
            RoomEvent::CardPlayed {
                seat,
                card,
                outcome,
            } => {
                let ActionOutcome::CardPlayed {
                    trick_complete,
                    trick_winner,
                    hand_complete,
                } = outcome
                else {
                    return;
                };
                self.send(
                    ctx,
                    &ServerMsg::CardPlayed {
                        seat,
                        card,
                        view: view.clone(),
                    },
                );
                if let (true, Some(winner)) = (trick_complete, trick_winner) {
                    self.send(
                        ctx,
                        &ServerMsg::TrickComplete {
                            winner,
                            view: view.clone(),
                        },
                    );
                }
                if hand_complete {
                    if let Some(score) = view.game.score {
                        self.send(ctx, &ServerMsg::HandComplete { score, view });
                    }
                }
            }
            RoomEvent::NewBoard | RoomEvent::StateChanged => {
                self.send(ctx, &ServerMsg::StateUpdate { view });
            }
        }
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsGameSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(client_msg) => self.handle_client_msg(ctx, client_msg),
                    Err(err) => self.send(
                        ctx,
                        &ServerMsg::Error {
                            code: "BAD_REQUEST".into(),
                            message: format!("unparseable message: {err}"),
                        },
                    ),
                }
            }
            Ok(ws::Message::Binary(_)) => self.send(
                ctx,
                &ServerMsg::Error {
                    code: "BAD_REQUEST".into(),
                    message: "binary frames are not supported".into(),
                },
            ),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(_) => {}
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "websocket protocol error");
                ctx.stop();
            }
        }
    }
}
