//! Intent dispatch: the single path player input and agent decisions take
//! into the simulation.

use game_core::{AbilityHost, Damageable, EntityId, Intent};
use tracing::{debug, trace};

use crate::simulation::Simulation;
use crate::world::MoveAxis;

impl Simulation {
    pub(crate) fn dispatch(&mut self, entity: EntityId, intent: Intent) {
        let Some(character) = self.character_mut(entity) else {
            debug!(%entity, intent = intent.label(), "intent for unknown entity dropped");
            return;
        };
        if character.is_dead() {
            trace!(%entity, intent = intent.label(), "intent for dead pawn dropped");
            return;
        }

        match intent {
            Intent::MoveForward(value) => self.move_axis(entity, MoveAxis::Forward, value),
            Intent::MoveRight(value) => self.move_axis(entity, MoveAxis::Right, value),
            Intent::Jump => self.movement.jump(entity),
            Intent::StopJumping => self.movement.stop_jumping(entity),
            Intent::ActivateTags { tags, allow_remote } => {
                let report = character.activate_abilities_detailed(&tags, allow_remote);
                if !report.was_attempted() {
                    trace!(%entity, %tags, "no ability dispatched");
                }
                self.record_cancellations(entity, &report.cancelled);
                for (handle, instance) in report.activated {
                    self.record_activation(entity, handle, instance);
                }
            }
            Intent::Shoot { target } => self.shoot(entity, target),
            Intent::ApplyDamage { target, amount } => {
                if let Err(error) = self.apply_damage(target, amount, Some(entity)) {
                    debug!(%entity, %target, %error, "damage intent rejected");
                }
            }
        }
    }

    /// Axis input needs a possessing controller and a non-zero finite value.
    fn move_axis(&mut self, entity: EntityId, axis: MoveAxis, value: f32) {
        let possessed = self
            .character(entity)
            .is_some_and(|character| character.controller().is_some());
        if !possessed || value == 0.0 || !value.is_finite() {
            return;
        }
        self.movement
            .add_movement_input(entity, axis, value.clamp(-1.0, 1.0));
    }

    fn shoot(&mut self, entity: EntityId, target: Option<EntityId>) {
        if !self.role().is_authority() {
            trace!(%entity, "shots resolve on the authority only");
            return;
        }
        let Some(item) = self.character(entity).and_then(|c| c.held_item()).cloned() else {
            debug!(%entity, "shoot without a held item");
            return;
        };
        let Some(shot) = self.world.pull_trigger(entity, &item, target) else {
            return;
        };
        if let Err(error) = self.apply_damage(shot.target, shot.damage, Some(entity)) {
            debug!(%entity, target = %shot.target, %error, "shot rejected");
        }
    }
}
