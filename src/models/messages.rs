use actix::Message;
use serde::{Deserialize, Serialize};

use crate::game::{Colour, GameStatus, Outcome, Side, Squares};

/// Body of `POST /register`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
}

/// Reply to `POST /register`: where the client should open its websocket.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterResponse {
    pub url: String,
}

/// `[row, side]` as sent by the client. The row stays signed so a negative
/// value can be refused as an invalid row instead of failing to parse.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayRequest(pub i64, pub Side);

/// Message sent from client to server
///
/// `{"play": null}` asks for the current snapshot,
/// `{"request": "play", "play": [row, side]}` attempts a move.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ClientMessage {
    #[serde(default)]
    pub request: Option<String>,
    #[serde(default)]
    pub play: Option<PlayRequest>,
}

/// Snapshot pushed from server to client
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerMessage {
    pub squares: Squares,
    pub current_player: Option<Colour>,
    pub your_colour: Colour,
    pub your_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub their_name: Option<String>,
    pub winner: Option<Colour>,
    pub status: GameStatus,
    pub outcome: Option<Outcome>,
    pub move_count: u32,
}

/// Serialized snapshot delivered to a session's channel
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct PushSnapshot(pub String);
