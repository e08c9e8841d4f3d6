use std::collections::BTreeMap;

use game_core::{Character, ControllerId, EntityId, Intent};
use tracing::debug;

use super::{AgentContext, AgentController};

/// Ticks every registered agent controller once per frame, in registration
/// order, on the simulation thread.
#[derive(Debug, Default)]
pub struct AgentScheduler {
    controllers: Vec<AgentController>,
}

impl AgentScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, controller: AgentController) {
        debug!(controller = %controller.id(), pawn = %controller.pawn(), "agent registered");
        self.controllers.push(controller);
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn controllers(&self) -> &[AgentController] {
        &self.controllers
    }

    pub fn controller_for(&self, pawn: EntityId) -> Option<&AgentController> {
        self.controllers.iter().find(|controller| controller.pawn() == pawn)
    }

    fn controller_for_mut(&mut self, pawn: EntityId) -> Option<&mut AgentController> {
        self.controllers
            .iter_mut()
            .find(|controller| controller.pawn() == pawn)
    }

    /// Begins play for the controller driving `pawn`.
    pub fn begin_play(&mut self, pawn: EntityId) {
        if let Some(controller) = self.controller_for_mut(pawn) {
            controller.on_begin_play();
        }
    }

    pub fn pawn_lost(&mut self, pawn: EntityId) {
        if let Some(controller) = self.controller_for_mut(pawn) {
            controller.on_pawn_lost();
        }
    }

    /// Detaches the controller driving `pawn`; it is dropped on the next tick.
    pub fn detach(&mut self, pawn: EntityId) -> Option<ControllerId> {
        let controller = self.controller_for_mut(pawn)?;
        controller.detach();
        Some(controller.id())
    }

    /// Runs one frame and returns the issued intents tagged with their pawn.
    ///
    /// Controllers whose pawn no longer exists are detached and dropped.
    /// Pawns that are possessed by another controller (or none) are skipped.
    pub fn tick(
        &mut self,
        dt: f32,
        characters: &BTreeMap<EntityId, Character>,
    ) -> Vec<(EntityId, Intent)> {
        let mut issued = Vec::new();

        for controller in &mut self.controllers {
            let Some(pawn) = characters.get(&controller.pawn()) else {
                controller.detach();
                continue;
            };
            if controller.is_detached() || pawn.controller() != Some(controller.id()) {
                continue;
            }

            let entity = pawn.id();
            let ctx = AgentContext::observe(pawn, characters, dt);
            issued.extend(
                controller
                    .on_tick(ctx)
                    .into_iter()
                    .map(|intent| (entity, intent)),
            );
        }

        self.controllers.retain(|controller| {
            let keep = !controller.is_detached();
            if !keep {
                debug!(controller = %controller.id(), "agent dropped");
            }
            keep
        });

        issued
    }
}
