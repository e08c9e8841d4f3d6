use tracing::trace;

use crate::error::Result;
use crate::simulation::Simulation;

/// Packets carried by a [`ReplicationLink`] so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinkStats {
    pub packets_forwarded: u64,
    pub requests_forwarded: u64,
}

/// In-process stand-in for the network between one authority and its
/// observers.
///
/// Delivery is reliable and ordered. Every observer receives every authority
/// packet; observer requests are delivered to the authority in observer order.
#[derive(Debug, Default)]
pub struct ReplicationLink {
    stats: LinkStats,
}

impl ReplicationLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    /// Moves pending traffic in both directions.
    ///
    /// Observer requests go first so the authority acts on them during its
    /// next step.
    pub fn pump(&mut self, authority: &mut Simulation, observers: &mut [Simulation]) -> Result<()> {
        for observer in observers.iter_mut() {
            if let Some(bytes) = observer.take_outbound_requests()? {
                authority.apply_remote_requests(&bytes)?;
                self.stats.requests_forwarded += 1;
            }
        }

        for bytes in authority.take_outbound_replication() {
            for observer in observers.iter_mut() {
                observer.apply_replication(&bytes)?;
            }
            self.stats.packets_forwarded += 1;
            trace!(size = bytes.len(), "replication packet forwarded");
        }
        Ok(())
    }
}
