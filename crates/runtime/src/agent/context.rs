//! Blackboard handed to behavior policies each frame.

use std::collections::BTreeMap;

use game_core::{AbilityHost, Character, CooldownTable, Damageable, EntityId, Intent, TagContainer};

/// What an agent knows about its own pawn this frame.
#[derive(Clone, Debug)]
pub struct PawnView {
    pub entity: EntityId,
    pub health_fraction: f32,
    pub has_item: bool,
    /// Tags of granted abilities that would pass their activation checks now.
    pub ready_tags: TagContainer,
    /// Tags of abilities currently running.
    pub active_tags: TagContainer,
    pub cooldowns: CooldownTable,
}

impl PawnView {
    pub fn observe(pawn: &Character) -> Self {
        let abilities = pawn.abilities();
        let activation = pawn.activation_context();

        let mut ready_tags = TagContainer::new();
        for (handle, def) in abilities.granted() {
            if abilities.can_activate(handle, activation).is_ok() {
                def.tags.iter().cloned().for_each(|tag| {
                    ready_tags.insert(tag);
                });
            }
        }

        let active_tags = abilities
            .active_abilities()
            .iter()
            .flat_map(|instance| instance.tags().iter().cloned())
            .collect();

        Self {
            entity: pawn.id(),
            health_fraction: pawn.health_fraction(),
            has_item: pawn.held_item().is_some(),
            ready_tags,
            active_tags,
            cooldowns: abilities.cooldowns().clone(),
        }
    }
}

/// Another character the agent may engage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetView {
    pub entity: EntityId,
    pub health_fraction: f32,
}

/// Per-frame context for one agent.
///
/// Owned rather than borrowed so trees can be stored as
/// `Box<dyn Behavior<AgentContext>>`.
#[derive(Clone, Debug)]
pub struct AgentContext {
    pub pawn: PawnView,
    /// Living, collidable characters other than the pawn, by id.
    pub targets: Vec<TargetView>,
    /// Seconds since the previous frame.
    pub dt: f32,
    intents: Vec<Intent>,
}

impl AgentContext {
    pub fn new(pawn: PawnView, targets: Vec<TargetView>, dt: f32) -> Self {
        Self {
            pawn,
            targets,
            dt,
            intents: Vec::new(),
        }
    }

    /// Builds the context for `pawn` from the simulation's characters.
    pub fn observe(pawn: &Character, characters: &BTreeMap<EntityId, Character>, dt: f32) -> Self {
        let targets = characters
            .values()
            .filter(|other| other.id() != pawn.id() && !other.is_dead() && other.collision_enabled())
            .map(|other| TargetView {
                entity: other.id(),
                health_fraction: other.health_fraction(),
            })
            .collect();

        Self::new(PawnView::observe(pawn), targets, dt)
    }

    /// The weakest target; ties go to the lowest id.
    pub fn preferred_target(&self) -> Option<TargetView> {
        self.targets.iter().copied().reduce(|best, candidate| {
            if candidate.health_fraction < best.health_fraction {
                candidate
            } else {
                best
            }
        })
    }

    pub fn push_intent(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    pub fn into_intents(self) -> Vec<Intent> {
        self.intents
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use game_core::{AbilityDef, CharacterTemplate, GameplayTag, NullCoordinator, Role};

    use super::*;

    fn tags(labels: &[&str]) -> TagContainer {
        TagContainer::parse(labels).unwrap()
    }

    #[test]
    fn ready_tags_follow_activation_checks() {
        let grants = vec![
            Arc::new(
                AbilityDef::new("Bolt", tags(&["Ability.Fire.Bolt"]))
                    .with_cooldown(GameplayTag::new("Cooldown.Bolt").unwrap(), 3.0),
            ),
            Arc::new(AbilityDef::new("Meteor", tags(&["Ability.Fire.Meteor"])).with_required_level(4)),
            Arc::new(AbilityDef::new("Ward", tags(&["Ability.Ward"]))),
        ];
        let mut pawn = Character::spawn(
            EntityId(1),
            &CharacterTemplate::new("Mage"),
            grants,
            Role::Authority,
            Arc::new(NullCoordinator),
        )
        .unwrap();
        pawn.begin_play();

        let view = PawnView::observe(&pawn);
        assert!(view.ready_tags.has_any(&tags(&["Ability.Fire.Bolt"])));
        assert!(view.ready_tags.has_any(&tags(&["Ability.Ward"])));
        assert!(!view.ready_tags.has_any(&tags(&["Ability.Fire.Meteor"])));

        pawn.activate_abilities_with_tags(&tags(&["Ability.Fire.Bolt", "Ability.Ward"]), true);
        let view = PawnView::observe(&pawn);
        assert!(!view.ready_tags.has_any(&tags(&["Ability.Fire", "Ability.Ward"])));
        assert!(view.active_tags.has_any(&tags(&["Ability.Ward"])));
    }
}
