use log::{debug, warn};

use crate::game::{Colour, GameEngine, GameStatus};
use crate::models::messages::{PushSnapshot, ServerMessage};
use crate::models::session::{Channel, Session};

/// One side of a game: who sits there and where to push their snapshots.
#[derive(Clone)]
pub struct Seat {
    pub session_id: String,
    pub name: String,
    pub colour: Colour,
    pub channel: Option<Channel>,
}

impl Seat {
    fn new(session: &Session, colour: Colour) -> Self {
        Seat {
            session_id: session.id.clone(),
            name: session.identity.clone(),
            colour,
            channel: None,
        }
    }
}

/// A paired game: the engine plus the two seats bound to it at pairing time.
pub struct GameRoom {
    pub id: String,
    pub engine: GameEngine,
    seats: [Seat; 2],
}

impl GameRoom {
    pub fn new(id: String, engine: GameEngine, red: &Session, black: &Session) -> Self {
        GameRoom {
            id,
            engine,
            seats: [Seat::new(red, Colour::Red), Seat::new(black, Colour::Black)],
        }
    }

    pub fn seat(&self, colour: Colour) -> &Seat {
        match colour {
            Colour::Red => &self.seats[0],
            Colour::Black => &self.seats[1],
        }
    }

    pub fn seat_for(&self, session_id: &str) -> Option<&Seat> {
        self.seats.iter().find(|seat| seat.session_id == session_id)
    }

    /// Attach a session's channel to its seat. Starts the game once both
    /// seats are attached; returns true only on that transition.
    pub fn attach(&mut self, session_id: &str, channel: Channel) -> bool {
        match self.seats.iter_mut().find(|seat| seat.session_id == session_id) {
            Some(seat) => seat.channel = Some(channel),
            None => return false,
        }

        self.seats.iter().all(|seat| seat.channel.is_some()) && self.engine.start()
    }

    /// Drop a session's channel, returning the colour of its seat.
    pub fn detach(&mut self, session_id: &str) -> Option<Colour> {
        let seat = self
            .seats
            .iter_mut()
            .find(|seat| seat.session_id == session_id)?;
        seat.channel = None;
        Some(seat.colour)
    }

    /// Finished and nobody is listening any more.
    pub fn is_released(&self) -> bool {
        self.engine.status() == GameStatus::Finished
            && self.seats.iter().all(|seat| seat.channel.is_none())
    }

    pub fn snapshot_for(&self, colour: Colour) -> ServerMessage {
        let snapshot = self.engine.snapshot();
        ServerMessage {
            squares: snapshot.squares,
            current_player: snapshot.current_player,
            your_colour: colour,
            your_name: self.seat(colour).name.clone(),
            their_name: Some(self.seat(colour.other()).name.clone()),
            winner: snapshot.outcome.and_then(|outcome| outcome.winner()),
            status: snapshot.status,
            outcome: snapshot.outcome,
            move_count: snapshot.move_count,
        }
    }

    /// Push the current snapshot to one seat, if it is attached.
    pub fn push(&self, colour: Colour) {
        let seat = self.seat(colour);
        let Some(channel) = &seat.channel else {
            debug!("Seat {:?} in game {} has no channel", colour, self.id);
            return;
        };

        match serde_json::to_string(&self.snapshot_for(colour)) {
            Ok(payload) => channel.recipient.do_send(PushSnapshot(payload)),
            Err(e) => warn!("Failed to serialize snapshot for game {}: {}", self.id, e),
        }
    }

    /// Push the current snapshot to both seats.
    pub fn broadcast(&self) {
        debug!(
            "Broadcasting move {} of game {}",
            self.engine.move_count(),
            self.id
        );
        for seat in &self.seats {
            self.push(seat.colour);
        }
    }
}
