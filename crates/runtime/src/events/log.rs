use super::GameEvent;

/// Append-only buffer of events awaiting collection.
#[derive(Debug, Default)]
pub struct EventLog {
    pending: Vec<GameEvent>,
    total: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.total += 1;
        self.pending.push(event);
    }

    /// Takes every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[GameEvent] {
        &self.pending
    }

    /// Events recorded since creation, drained or not.
    pub fn total(&self) -> u64 {
        self.total
    }
}
