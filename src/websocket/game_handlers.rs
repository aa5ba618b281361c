use log::{debug, info};

use crate::error::MoveError;
use crate::game::{GameStatus, Move, Placement};
use crate::models::{AppState, Channel, PlayRequest, Session};

/// Attach a session's channel. Starts and broadcasts the game if this was the
/// second seat to attach; otherwise sends the connecting session the current
/// snapshot if its game is under way. A newer connection replaces the old one
/// as the session's channel. Returns false for an unknown session.
pub fn on_connect(state: &AppState, session_id: &str, channel: Channel) -> bool {
    // The sessions lock is held through the seat attach so the session and its
    // seat always name the same connection.
    let mut sessions = state.sessions.lock().unwrap();
    let Some(session) = sessions.get_mut(session_id) else {
        return false;
    };
    session.channel = Some(channel.clone());

    let Some(room) = session.game_id.as_deref().and_then(|id| state.game(id)) else {
        info!("Session {} connected and is waiting for an opponent", session_id);
        return true;
    };

    let mut room = room.lock().unwrap();
    if room.attach(session_id, channel) {
        info!("Game {} is active", room.id);
        room.broadcast();
    } else if room.engine.status() != GameStatus::Waiting {
        if let Some(colour) = room.seat_for(session_id).map(|seat| seat.colour) {
            room.push(colour);
        }
    }
    true
}

/// Re-send the current snapshot to a session that asks for it with `{"play": null}`.
pub fn on_resync(state: &AppState, session_id: &str) {
    let Some((colour, room)) = state.seat_of(session_id) else {
        debug!("Session {} has no game to resync", session_id);
        return;
    };

    let room = room.lock().unwrap();
    if room.engine.status() != GameStatus::Waiting {
        room.push(colour);
    }
}

/// Apply a move for the session's colour and broadcast the result to both
/// seats. Rejected moves change nothing and send nothing.
pub fn on_move_request(
    state: &AppState,
    session_id: &str,
    play: PlayRequest,
) -> Result<Placement, MoveError> {
    let (colour, room) = state.seat_of(session_id).ok_or(MoveError::GameNotActive)?;
    // Negative rows map past the board so the engine reports them as invalid
    // after its turn checks.
    let row = usize::try_from(play.0).unwrap_or(usize::MAX);

    // Broadcasting under the room lock keeps every seat's snapshots in move order.
    let mut room = room.lock().unwrap();
    let placement = room.engine.apply_move(colour, Move { row, side: play.1 })?;
    info!(
        "Game {}: {:?} placed at ({}, {})",
        room.id, colour, placement.row, placement.column
    );
    if let Some(outcome) = room.engine.outcome() {
        info!("Game {} finished: {:?}", room.id, outcome);
    }
    room.broadcast();
    Ok(placement)
}

/// A websocket closed. Only the session's current connection ends the session;
/// a socket that was already replaced by a newer one goes away quietly.
pub fn on_disconnect(state: &AppState, session_id: &str, connection_id: &str) {
    match state.unregister_connection(session_id, connection_id) {
        Some(session) => leave_game(state, session),
        None => debug!(
            "Connection {} of session {} closed without ending it",
            connection_id, session_id
        ),
    }
}

/// Release a session whatever its connections are doing.
pub fn release_session(state: &AppState, session_id: &str) {
    if let Some(session) = state.unregister(session_id) {
        leave_game(state, session);
    }
}

/// An undecided game the session was playing is abandoned and the remaining
/// seat gets a final snapshot.
fn leave_game(state: &AppState, session: Session) {
    let Some(game_id) = session.game_id else {
        return;
    };
    let Some(room) = state.game(&game_id) else {
        return;
    };

    let released = {
        let mut room = room.lock().unwrap();
        if let Some(colour) = room.detach(&session.id) {
            if room.engine.abandon(colour) {
                info!("Game {} abandoned by {:?}", game_id, colour);
                room.broadcast();
            }
        }
        room.is_released()
    };

    if released {
        state.release_game(&game_id);
    }
}
