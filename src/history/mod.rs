use log::debug;
use crate::models::chat::Turn;

/// Ordered, append-only record of one session's turns. Lives in memory only.
#[derive(Clone, Debug, Default)]
pub struct ConversationLog {
    turns: Vec<Turn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: Turn) -> &Turn {
        debug!(
            "Appending {} turn with {} part(s), log length now {}",
            turn.role,
            turn.parts.len(),
            self.turns.len() + 1
        );
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub fn all(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
