//! In-world collaborators the simulation delegates to: item spawning and
//! firing, and pawn movement.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use game_core::{EntityId, HeldItem, ItemHandle};
use tracing::debug;

/// A resolved shot: who gets hit, and for how much.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shot {
    pub target: EntityId,
    pub damage: f32,
}

/// Spawns held items and resolves their use.
pub trait WorldService: Send {
    /// Spawns `item` and attaches it to `owner`. `None` if the item is unknown.
    fn spawn_held_item(&mut self, owner: EntityId, item: &str) -> Option<HeldItem>;

    /// Fires the held item. `None` when nothing is hit.
    fn pull_trigger(
        &mut self,
        shooter: EntityId,
        item: &HeldItem,
        target: Option<EntityId>,
    ) -> Option<Shot>;
}

/// Damage dealt by one weapon type.
#[derive(Clone, Debug, PartialEq)]
pub struct WeaponSpec {
    pub name: String,
    pub damage: f32,
}

/// Hitscan weapons: every shot at a target hits for the weapon's damage.
#[derive(Clone, Debug)]
pub struct Armory {
    weapons: BTreeMap<String, WeaponSpec>,
    next_handle: u32,
}

impl Armory {
    pub fn empty() -> Self {
        Self {
            weapons: BTreeMap::new(),
            next_handle: 1,
        }
    }

    #[must_use]
    pub fn with_weapon(mut self, name: impl Into<String>, damage: f32) -> Self {
        let name = name.into();
        self.weapons.insert(name.clone(), WeaponSpec { name, damage });
        self
    }

    pub fn weapon(&self, name: &str) -> Option<&WeaponSpec> {
        self.weapons.get(name)
    }
}

impl Default for Armory {
    fn default() -> Self {
        Self::empty()
            .with_weapon("rifle", 20.0)
            .with_weapon("pistol", 10.0)
    }
}

impl WorldService for Armory {
    fn spawn_held_item(&mut self, owner: EntityId, item: &str) -> Option<HeldItem> {
        let spec = self.weapons.get(item)?;
        let handle = ItemHandle(self.next_handle);
        self.next_handle += 1;
        debug!(%owner, item = %spec.name, handle = handle.0, "held item spawned");
        Some(HeldItem::weapon(handle, spec.name.clone(), owner))
    }

    fn pull_trigger(
        &mut self,
        shooter: EntityId,
        item: &HeldItem,
        target: Option<EntityId>,
    ) -> Option<Shot> {
        let target = target.filter(|&target| target != shooter)?;
        let spec = self.weapons.get(&item.name)?;
        Some(Shot {
            target,
            damage: spec.damage,
        })
    }
}

/// Movement axis of an input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveAxis {
    Forward,
    Right,
}

/// One movement command forwarded to the movement subsystem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MovementInput {
    Axis {
        entity: EntityId,
        axis: MoveAxis,
        value: f32,
    },
    Jump(EntityId),
    StopJumping(EntityId),
}

/// Receives movement commands for pawns.
pub trait MovementService: Send {
    fn add_movement_input(&mut self, entity: EntityId, axis: MoveAxis, value: f32);
    fn jump(&mut self, entity: EntityId);
    fn stop_jumping(&mut self, entity: EntityId);
}

/// Movement service that only records what it is asked to do.
///
/// Clones share the same record, so a caller can keep a handle after moving
/// one into a simulation.
#[derive(Clone, Debug, Default)]
pub struct MovementLog {
    inputs: Arc<Mutex<Vec<MovementInput>>>,
}

impl MovementLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn inputs_mut(&self) -> MutexGuard<'_, Vec<MovementInput>> {
        self.inputs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn inputs(&self) -> Vec<MovementInput> {
        self.inputs_mut().clone()
    }

    pub fn clear(&self) {
        self.inputs_mut().clear();
    }
}

impl MovementService for MovementLog {
    fn add_movement_input(&mut self, entity: EntityId, axis: MoveAxis, value: f32) {
        self.inputs_mut().push(MovementInput::Axis {
            entity,
            axis,
            value,
        });
    }

    fn jump(&mut self, entity: EntityId) {
        self.inputs_mut().push(MovementInput::Jump(entity));
    }

    fn stop_jumping(&mut self, entity: EntityId) {
        self.inputs_mut().push(MovementInput::StopJumping(entity));
    }
}
