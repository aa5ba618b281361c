use log::info;

use crate::models::Session;

/// Who gets which seat when two sessions pair. The first-enqueued session
/// takes red and moves first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub red: String,
    pub black: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enqueued {
    Waiting,
    Paired(Pairing),
}

/// Holds at most one unpaired session. Callers serialize access so that two
/// registrations can never race into the same slot.
#[derive(Debug, Default)]
pub struct Matchmaker {
    waiting: Option<String>,
}

impl Matchmaker {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn waiting(&self) -> Option<&str> {
        self.waiting.as_deref()
    }

    pub fn enqueue(&mut self, session: &Session) -> Enqueued {
        match self.waiting.take() {
            Some(first) if first != session.id => {
                info!("Pairing session {} with {}", first, session.id);
                Enqueued::Paired(Pairing {
                    red: first,
                    black: session.id.clone(),
                })
            }
            _ => {
                info!("Session {} is waiting for an opponent", session.id);
                self.waiting = Some(session.id.clone());
                Enqueued::Waiting
            }
        }
    }

    /// Remove a session from the waiting slot. Returns true if it was waiting.
    pub fn withdraw(&mut self, session_id: &str) -> bool {
        if self.waiting.as_deref() == Some(session_id) {
            self.waiting = None;
            true
        } else {
            false
        }
    }
}
