use actix::Recipient;
use log::warn;
use uuid::Uuid;

use crate::game::Colour;
use crate::models::messages::PushSnapshot;

/// One websocket connection of a session. A session may reconnect, so the
/// connection id tells its sockets apart.
#[derive(Clone)]
pub struct Channel {
    pub connection_id: String,
    pub recipient: Recipient<PushSnapshot>,
}

impl Channel {
    pub fn new(connection_id: impl Into<String>, recipient: Recipient<PushSnapshot>) -> Self {
        Channel {
            connection_id: connection_id.into(),
            recipient,
        }
    }
}

/// One registered player: a display name, and once paired, a colour and game.
#[derive(Clone)]
pub struct Session {
    pub id: String,
    pub identity: String,
    pub colour: Option<Colour>,
    pub game_id: Option<String>,
    pub channel: Option<Channel>,
}

impl Session {
    pub fn new(identity: impl Into<String>) -> Self {
        Session {
            id: Uuid::new_v4().as_simple().to_string(),
            identity: identity.into(),
            colour: None,
            game_id: None,
            channel: None,
        }
    }

    /// Binds the session to a game. A session joins at most one game, so a
    /// second bind is ignored.
    pub fn bind(&mut self, game_id: &str, colour: Colour) {
        if let Some(current) = &self.game_id {
            warn!(
                "Session {} is already in game {}, not joining {}",
                self.id, current, game_id
            );
            return;
        }
        self.game_id = Some(game_id.to_string());
        self.colour = Some(colour);
    }

    /// True when `connection_id` is the socket currently carrying this session.
    pub fn is_current(&self, connection_id: &str) -> bool {
        self.channel
            .as_ref()
            .is_some_and(|channel| channel.connection_id == connection_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_unbound() {
        let session = Session::new("ada");
        assert_eq!(session.identity, "ada");
        assert_eq!(session.id.len(), 32);
        assert!(session.colour.is_none());
        assert!(session.game_id.is_none());
        assert!(session.channel.is_none());
    }

    #[test]
    fn test_bind_once() {
        let mut session = Session::new("ada");
        session.bind("g1", Colour::Red);
        session.bind("g2", Colour::Black);
        assert_eq!(session.game_id.as_deref(), Some("g1"));
        assert_eq!(session.colour, Some(Colour::Red));
    }

    #[actix_rt::test]
    async fn test_only_the_latest_channel_is_current() {
        struct Sink;
        impl actix::Actor for Sink {
            type Context = actix::Context<Self>;
        }
        impl actix::Handler<PushSnapshot> for Sink {
            type Result = ();
            fn handle(&mut self, _: PushSnapshot, _: &mut Self::Context) {}
        }

        let mut session = Session::new("ada");
        let addr = actix::Actor::start(Sink);
        assert!(!session.is_current("first"));

        session.channel = Some(Channel::new("first", addr.clone().recipient()));
        assert!(session.is_current("first"));
        session.channel = Some(Channel::new("second", addr.recipient()));
        assert!(!session.is_current("first"));
        assert!(session.is_current("second"));
    }
}
