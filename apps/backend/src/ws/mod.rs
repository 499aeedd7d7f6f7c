//! Realtime transport boundary: protocol frames, session actors, fan-out.

pub mod hub;
pub mod protocol;
pub mod session;

use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;

use crate::state::app_state::AppState;
use session::WsGameSession;

/// Upgrade an HTTP request to a game WebSocket session.
pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(WsGameSession::new(app_state), &req, stream)
}
