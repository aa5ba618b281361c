use log::{info, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::config::Config;
use crate::game::{Colour, GameEngine};
use crate::matchmaker::{Enqueued, Matchmaker, Pairing};
use crate::models::{GameRoom, Session};

/// Application state shared between connections
///
/// Lock order is `matchmaker`, then `sessions`, then `games`, then a single
/// room. Rooms are independent of each other.
pub struct AppState {
    pub config: Config,
    pub matchmaker: Mutex<Matchmaker>,
    pub sessions: Mutex<HashMap<String, Session>>,
    pub games: Mutex<HashMap<String, Arc<Mutex<GameRoom>>>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            config,
            matchmaker: Mutex::new(Matchmaker::new()),
            sessions: Mutex::new(HashMap::new()),
            games: Mutex::new(HashMap::new()),
        }
    }

    /// Create a session for `identity` and hand it to the matchmaker. Pairing
    /// decisions are made one at a time under the matchmaker lock.
    pub fn register(&self, identity: &str) -> Session {
        let mut matchmaker = self.matchmaker.lock().unwrap();
        let mut sessions = self.sessions.lock().unwrap();

        let session = Session::new(identity);
        info!("Registered {} as session {}", session.identity, session.id);
        sessions.insert(session.id.clone(), session.clone());

        if let Enqueued::Paired(pairing) = matchmaker.enqueue(&session) {
            if !self.create_game(&mut sessions, &pairing) {
                matchmaker.enqueue(&session);
            }
        }

        sessions.get(&session.id).cloned().unwrap_or(session)
    }

    /// Forget a session. Returns it if it was registered.
    pub fn unregister(&self, session_id: &str) -> Option<Session> {
        let mut matchmaker = self.matchmaker.lock().unwrap();
        if matchmaker.withdraw(session_id) {
            info!("Session {} left the waiting slot", session_id);
        }
        self.sessions.lock().unwrap().remove(session_id)
    }

    /// Forget a session when its current connection closes. A connection that
    /// has already been replaced by a newer one leaves the session alone.
    pub fn unregister_connection(&self, session_id: &str, connection_id: &str) -> Option<Session> {
        let mut matchmaker = self.matchmaker.lock().unwrap();
        let mut sessions = self.sessions.lock().unwrap();
        if !sessions.get(session_id)?.is_current(connection_id) {
            info!(
                "Connection {} of session {} closed; a newer one is attached",
                connection_id, session_id
            );
            return None;
        }

        if matchmaker.withdraw(session_id) {
            info!("Session {} left the waiting slot", session_id);
        }
        sessions.remove(session_id)
    }

    pub fn session(&self, session_id: &str) -> Option<Session> {
        self.sessions.lock().unwrap().get(session_id).cloned()
    }

    pub fn game(&self, game_id: &str) -> Option<Arc<Mutex<GameRoom>>> {
        self.games.lock().unwrap().get(game_id).cloned()
    }

    /// The colour and room a session plays in, once it has been paired.
    pub fn seat_of(&self, session_id: &str) -> Option<(Colour, Arc<Mutex<GameRoom>>)> {
        let session = self.session(session_id)?;
        let colour = session.colour?;
        let room = self.game(session.game_id.as_deref()?)?;
        Some((colour, room))
    }

    pub fn release_game(&self, game_id: &str) {
        if self.games.lock().unwrap().remove(game_id).is_some() {
            info!("Released game {}", game_id);
        }
    }

    fn create_game(&self, sessions: &mut HashMap<String, Session>, pairing: &Pairing) -> bool {
        let (Some(red), Some(black)) = (
            sessions.get(&pairing.red).cloned(),
            sessions.get(&pairing.black).cloned(),
        ) else {
            warn!("Cannot pair {} with {}: session is gone", pairing.red, pairing.black);
            return false;
        };

        let game_id = Uuid::new_v4().to_string();
        let engine = GameEngine::new(self.config.board_size, self.config.win_length);
        let mut room = GameRoom::new(game_id.clone(), engine, &red, &black);

        // Either player may have connected while still waiting.
        let mut started = false;
        for session in [&red, &black] {
            if let Some(channel) = session.channel.clone() {
                started |= room.attach(&session.id, channel);
            }
        }
        if started {
            room.broadcast();
        }

        for (id, colour) in [(&red.id, Colour::Red), (&black.id, Colour::Black)] {
            if let Some(session) = sessions.get_mut(id) {
                session.bind(&game_id, colour);
            }
        }

        info!(
            "Created game {}: {} (red) vs {} (black)",
            game_id, red.identity, black.identity
        );
        self.games
            .lock()
            .unwrap()
            .insert(game_id, Arc::new(Mutex::new(room)));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameStatus;

    #[test]
    fn test_register_pairs_every_two_sessions() {
        let state = AppState::new(Config::default());

        let ada = state.register("ada");
        assert!(ada.game_id.is_none());
        assert_eq!(state.matchmaker.lock().unwrap().waiting(), Some(ada.id.as_str()));

        let bo = state.register("bo");
        assert_eq!(bo.colour, Some(Colour::Black));
        let ada = state.session(&ada.id).unwrap();
        assert_eq!(ada.colour, Some(Colour::Red));
        assert_eq!(ada.game_id, bo.game_id);

        let (_, room) = state.seat_of(&ada.id).unwrap();
        let room = room.lock().unwrap();
        assert_eq!(room.engine.status(), GameStatus::Waiting);
        assert_eq!(room.seat(Colour::Red).name, "ada");
        assert_eq!(room.seat(Colour::Black).name, "bo");
    }

    #[test]
    fn test_unregister_frees_the_waiting_slot() {
        let state = AppState::new(Config::default());
        let ada = state.register("ada");
        assert!(state.unregister(&ada.id).is_some());
        assert!(state.unregister(&ada.id).is_none());

        let bo = state.register("bo");
        assert!(bo.game_id.is_none());
        assert_eq!(state.games.lock().unwrap().len(), 0);
    }

    #[test]
    fn test_seat_of_unpaired_session() {
        let state = AppState::new(Config::default());
        let ada = state.register("ada");
        assert!(state.seat_of(&ada.id).is_none());
        assert!(state.seat_of("missing").is_none());
    }
}
