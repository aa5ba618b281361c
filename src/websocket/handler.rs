use actix::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{debug, info, warn};
use uuid::Uuid;

use crate::models::{AppState, Channel, ClientMessage, PushSnapshot};
use crate::websocket::game_handlers::{on_connect, on_disconnect, on_move_request, on_resync};

/// WebSocket handler for one registered session
pub struct PlayerSocket {
    pub session_id: String,
    pub connection_id: String,
    pub app_state: web::Data<AppState>,
}

impl PlayerSocket {
    pub fn new(session_id: String, app_state: web::Data<AppState>) -> Self {
        PlayerSocket {
            session_id,
            connection_id: Uuid::new_v4().to_string(),
            app_state,
        }
    }
}

impl Actor for PlayerSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            "WebSocket connection {} started: {}",
            self.connection_id, self.session_id
        );
        let channel = Channel::new(self.connection_id.clone(), ctx.address().recipient());
        if !on_connect(&self.app_state, &self.session_id, channel) {
            warn!("Session {} vanished before connecting", self.session_id);
            ctx.stop();
        }
    }

    fn stopped(&mut self, _: &mut Self::Context) {
        on_disconnect(&self.app_state, &self.session_id, &self.connection_id);
        info!(
            "WebSocket connection {} closed: {}",
            self.connection_id, self.session_id
        );
    }
}

impl Handler<PushSnapshot> for PlayerSocket {
    type Result = ();

    fn handle(&mut self, msg: PushSnapshot, ctx: &mut Self::Context) {
        debug!("Pushing snapshot to {}", self.session_id);
        ctx.text(msg.0);
    }
}

// WebSocket message handler
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for PlayerSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {}
            Ok(ws::Message::Text(text)) => {
                self.handle_message(text.trim());
            }
            Ok(ws::Message::Binary(_)) => {
                warn!("Binary messages are not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                info!("Connection closed: {:?}", reason);
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {}
            Err(e) => {
                warn!("Protocol error on {}: {}", self.session_id, e);
                ctx.stop();
            }
        }
    }
}

impl PlayerSocket {
    fn handle_message(&self, text: &str) {
        if text == "ping" {
            return;
        }

        let client_msg = match serde_json::from_str::<ClientMessage>(text) {
            Ok(msg) => msg,
            Err(e) => {
                warn!("Error parsing message from {}: {}", self.session_id, e);
                return;
            }
        };

        match (client_msg.request.as_deref(), client_msg.play) {
            (None | Some("play"), None) => on_resync(&self.app_state, &self.session_id),
            (None | Some("play"), Some(play)) => {
                if let Err(e) = on_move_request(&self.app_state, &self.session_id, play) {
                    debug!("Dropped move {:?} from {}: {}", play, self.session_id, e);
                }
            }
            (Some(other), _) => info!("Unknown request {:?} from {}", other, self.session_id),
        }
    }
}

// WebSocket connection handler
pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session_id = path.into_inner();
    if app_state.session(&session_id).is_none() {
        info!("Refusing websocket for unknown session {}", session_id);
        return Ok(HttpResponse::NotFound().finish());
    }

    ws::start(PlayerSocket::new(session_id, app_state), &req, stream)
}
