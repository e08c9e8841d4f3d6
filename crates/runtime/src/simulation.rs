//! Frame-driven simulation of one network role.
//!
//! A [`Simulation`] owns every character, the agent scheduler, the match
//! coordinator, and the world collaborators. Embedders drive it with
//! [`Simulation::step`] and feed it input through [`Simulation::submit`].

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use game_core::{
    AbilityCatalog, AbilityHandle, AbilityHost, Character, CharacterTemplate, ControllerId,
    Damageable, EntityId, GameConfig, InstanceId, Intent, MatchCoordinator, Replicable, Role,
};
use tracing::{debug, info, warn};

use crate::agent::{AgentController, AgentScheduler, BehaviorPolicy, presets};
use crate::coordinator::{ArenaCoordinator, ArenaRules, ScoreBoard};
use crate::error::{Result, RuntimeError};
use crate::events::{EventLog, GameEvent};
use crate::replication::{self, ClientPacket, RemoteActivation, ServerPacket};
use crate::world::{Armory, MovementLog, MovementService, WorldService};

/// Builder for [`Simulation`].
pub struct SimulationBuilder {
    role: Role,
    config: GameConfig,
    catalog: AbilityCatalog,
    world: Option<Box<dyn WorldService>>,
    movement: Option<Box<dyn MovementService>>,
}

impl SimulationBuilder {
    pub fn new() -> Self {
        Self {
            role: Role::Authority,
            config: GameConfig::default(),
            catalog: AbilityCatalog::new(),
            world: None,
            movement: None,
        }
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn catalog(mut self, catalog: AbilityCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn world(mut self, world: impl WorldService + 'static) -> Self {
        self.world = Some(Box::new(world));
        self
    }

    pub fn movement(mut self, movement: impl MovementService + 'static) -> Self {
        self.movement = Some(Box::new(movement));
        self
    }

    pub fn build(self) -> Result<Simulation> {
        if self.config.tick_rate == 0 {
            return Err(RuntimeError::InvalidConfig("tick_rate must be positive"));
        }
        if self.config.sync_interval_ticks == 0 {
            return Err(RuntimeError::InvalidConfig(
                "sync_interval_ticks must be positive",
            ));
        }

        let coordinator = Arc::new(ArenaCoordinator::new(ArenaRules::from(&self.config)));
        info!(role = %self.role, tick_rate = self.config.tick_rate, "simulation created");

        Ok(Simulation {
            role: self.role,
            config: self.config,
            catalog: self.catalog,
            characters: BTreeMap::new(),
            scheduler: AgentScheduler::new(),
            coordinator,
            world: self.world.unwrap_or_else(|| Box::new(Armory::default())),
            movement: self
                .movement
                .unwrap_or_else(|| Box::new(MovementLog::new())),
            events: EventLog::new(),
            queue: VecDeque::new(),
            outbound: Vec::new(),
            outbound_requests: Vec::new(),
            tick: 0,
            last_server_tick: None,
            next_entity: 1,
            next_controller: 1,
            match_ended: false,
        })
    }
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One role's view of the match.
pub struct Simulation {
    role: Role,
    config: GameConfig,
    catalog: AbilityCatalog,
    characters: BTreeMap<EntityId, Character>,
    pub(crate) scheduler: AgentScheduler,
    coordinator: Arc<ArenaCoordinator>,
    pub(crate) world: Box<dyn WorldService>,
    pub(crate) movement: Box<dyn MovementService>,
    pub(crate) events: EventLog,
    queue: VecDeque<(EntityId, Intent)>,
    outbound: Vec<Vec<u8>>,
    outbound_requests: Vec<RemoteActivation>,
    tick: u64,
    last_server_tick: Option<u64>,
    next_entity: u32,
    next_controller: u32,
    match_ended: bool,
}

impl Simulation {
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::new()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Steps taken so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn character(&self, entity: EntityId) -> Option<&Character> {
        self.characters.get(&entity)
    }

    pub(crate) fn character_mut(&mut self, entity: EntityId) -> Option<&mut Character> {
        self.characters.get_mut(&entity)
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> + '_ {
        self.characters.values()
    }

    pub fn scheduler(&self) -> &AgentScheduler {
        &self.scheduler
    }

    pub fn coordinator(&self) -> &Arc<ArenaCoordinator> {
        &self.coordinator
    }

    pub fn scores(&self) -> ScoreBoard {
        self.coordinator.scores()
    }

    pub fn is_match_over(&self) -> bool {
        self.match_ended
    }

    pub(crate) fn require_authority(&self, operation: &'static str) -> Result<()> {
        self.require_role(operation, Role::Authority)
    }

    fn require_role(&self, operation: &'static str, expected: Role) -> Result<()> {
        if self.role == expected {
            Ok(())
        } else {
            Err(RuntimeError::WrongRole {
                operation,
                expected,
                actual: self.role,
            })
        }
    }

    // ========================================================================
    // Spawning
    // ========================================================================

    /// Spawns a character for `template`: an agent when it names a policy,
    /// otherwise a player-controlled pawn.
    pub fn spawn_character(&mut self, template: &CharacterTemplate) -> Result<EntityId> {
        let (entity, _) = match template.policy {
            Some(kind) => self.spawn_agent(template, Some(presets::policy_for(kind)))?,
            None => self.spawn_player(template)?,
        };
        Ok(entity)
    }

    /// Spawns a pawn possessed by a player controller.
    pub fn spawn_player(&mut self, template: &CharacterTemplate) -> Result<(EntityId, ControllerId)> {
        let entity = self.spawn_pawn(template)?;
        let controller = self.allocate_controller();
        if let Some(character) = self.characters.get_mut(&entity) {
            character.attach_controller(controller);
        }
        info!(%entity, %controller, name = %template.name, "player spawned");
        Ok((entity, controller))
    }

    /// Spawns a pawn driven by an agent controller.
    ///
    /// Agents only run on the authority; an observer spawns the pawn alone so
    /// that entity and controller ids stay aligned across roles.
    pub fn spawn_agent(
        &mut self,
        template: &CharacterTemplate,
        policy: Option<Arc<dyn BehaviorPolicy>>,
    ) -> Result<(EntityId, ControllerId)> {
        let entity = self.spawn_pawn(template)?;
        let controller = self.allocate_controller();

        if self.role.is_authority() {
            if let Some(character) = self.characters.get_mut(&entity) {
                character.attach_controller(controller);
            }
            self.scheduler
                .register(AgentController::new(controller, entity, policy));
            self.scheduler.begin_play(entity);
        }

        info!(%entity, %controller, name = %template.name, "agent spawned");
        Ok((entity, controller))
    }

    fn spawn_pawn(&mut self, template: &CharacterTemplate) -> Result<EntityId> {
        let grants = self.catalog.resolve(&template.abilities)?;
        let entity = EntityId(self.next_entity);

        let coordinator: Arc<dyn MatchCoordinator> = self.coordinator.clone();
        let mut character = Character::spawn(entity, template, grants, self.role, coordinator)
            .map_err(|source| RuntimeError::Spawn {
                name: template.name.clone(),
                source,
            })?;
        self.next_entity += 1;

        character.begin_play();
        if let Some(item) = &template.held_item {
            match self.world.spawn_held_item(entity, item) {
                Some(held) => {
                    character.equip(held);
                }
                None => warn!(%entity, item = %item, "unknown held item; spawning unarmed"),
            }
        }

        self.characters.insert(entity, character);
        Ok(entity)
    }

    fn allocate_controller(&mut self) -> ControllerId {
        let id = ControllerId(self.next_controller);
        self.next_controller += 1;
        id
    }

    /// Removes a character and detaches its agent, if any.
    pub fn despawn(&mut self, entity: EntityId) -> Result<Character> {
        let character = self
            .characters
            .remove(&entity)
            .ok_or(RuntimeError::UnknownEntity(entity))?;
        self.scheduler.detach(entity);
        self.coordinator.cancel_respawn(entity);
        self.queue.retain(|(issuer, _)| *issuer != entity);
        info!(%entity, "character despawned");
        Ok(character)
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Queues an intent for `entity`, dispatched on the next step.
    pub fn submit(&mut self, entity: EntityId, intent: Intent) -> Result<()> {
        if !self.characters.contains_key(&entity) {
            return Err(RuntimeError::UnknownEntity(entity));
        }
        self.queue.push_back((entity, intent));
        Ok(())
    }

    /// Applies damage from an external source. Authority only.
    pub fn apply_damage(
        &mut self,
        target: EntityId,
        amount: f32,
        source: Option<EntityId>,
    ) -> Result<f32> {
        self.require_authority("apply_damage")?;
        let character = self
            .characters
            .get_mut(&target)
            .ok_or(RuntimeError::UnknownEntity(target))?;

        let outcome = character.apply_damage(amount, source);
        let cancelled = character.take_cancelled_abilities();
        if outcome.applied > 0.0 {
            self.events.push(GameEvent::Damaged {
                entity: target,
                source,
                amount: outcome.applied,
                health_before: outcome.health_before,
                health_after: outcome.health_after,
            });
        }
        self.record_cancellations(target, &cancelled);
        if outcome.killed {
            self.settle_kills();
        }
        Ok(outcome.applied)
    }

    /// Writes the replicated character level. Returns false on observers.
    pub fn set_character_level(&mut self, entity: EntityId, level: i32) -> Result<bool> {
        let character = self
            .characters
            .get_mut(&entity)
            .ok_or(RuntimeError::UnknownEntity(entity))?;

        let before = character.character_level();
        let written = character.set_character_level(level);
        if written && before != level {
            self.events.push(GameEvent::LevelChanged { entity, level });
        }
        Ok(written)
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Advances the simulation by `dt` seconds.
    ///
    /// Order: agents decide, queued intents dispatch in submission order,
    /// abilities and cooldowns advance, due respawns happen, then replicated
    /// state is collected.
    pub fn step(&mut self, dt: f32) -> Result<()> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.tick += 1;

        if self.role.is_authority() && !self.match_ended {
            let issued = self.scheduler.tick(dt, &self.characters);
            self.queue.extend(issued);
        }

        while let Some((entity, intent)) = self.queue.pop_front() {
            self.dispatch(entity, intent);
        }

        for character in self.characters.values_mut() {
            for instance in character.tick(dt) {
                self.events.push(GameEvent::AbilityEnded {
                    entity: character.id(),
                    instance: instance.id(),
                    cancelled: false,
                });
            }
        }

        self.process_respawns(dt)?;
        self.collect_replication()
    }

    /// Steps once with the configured fixed delta.
    pub fn step_fixed(&mut self) -> Result<()> {
        self.step(self.config.fixed_delta())
    }

    pub(crate) fn settle_kills(&mut self) {
        for report in self.coordinator.take_kills() {
            self.scheduler.pawn_lost(report.victim);
            self.events.push(GameEvent::Killed {
                victim: report.victim,
                killer: report.killer,
            });
        }

        if !self.match_ended {
            if let Some((winner, kills)) = self.coordinator.winner() {
                self.match_ended = true;
                info!(%winner, kills, tick = self.tick, "match ended");
                self.events.push(GameEvent::MatchEnded { winner, kills });
            }
        }
    }

    fn process_respawns(&mut self, dt: f32) -> Result<()> {
        for entity in self.coordinator.tick_respawns(dt) {
            let Some(character) = self.characters.get_mut(&entity) else {
                continue;
            };

            let coordinator: Arc<dyn MatchCoordinator> = self.coordinator.clone();
            character
                .respawn(coordinator)
                .map_err(|source| RuntimeError::Spawn {
                    name: character.name().to_owned(),
                    source,
                })?;
            let cancelled = character.take_cancelled_abilities();
            self.record_cancellations(entity, &cancelled);
            self.scheduler.begin_play(entity);
            self.events.push(GameEvent::Respawned { entity });
        }
        Ok(())
    }

    pub(crate) fn record_activation(
        &mut self,
        entity: EntityId,
        handle: AbilityHandle,
        instance: InstanceId,
    ) {
        let ability = self
            .characters
            .get(&entity)
            .and_then(|character| character.abilities().def(handle))
            .map(|def| def.name.clone())
            .unwrap_or_default();
        self.events.push(GameEvent::AbilityActivated {
            entity,
            ability,
            instance,
        });
    }

    pub(crate) fn record_cancellations(&mut self, entity: EntityId, cancelled: &[InstanceId]) {
        for &instance in cancelled {
            self.events.push(GameEvent::AbilityEnded {
                entity,
                instance,
                cancelled: true,
            });
        }
    }

    /// Takes every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    // ========================================================================
    // Replication
    // ========================================================================

    fn collect_replication(&mut self) -> Result<()> {
        match self.role {
            Role::Authority => {
                let full_interval = u64::from(self.config.full_snapshot_interval_ticks);
                let full = full_interval > 0 && self.tick % full_interval == 0;
                let due = self.tick % u64::from(self.config.sync_interval_ticks) == 0;
                if !full && !due {
                    return Ok(());
                }

                let snapshots: Vec<_> = self
                    .characters
                    .values_mut()
                    .filter_map(|character| {
                        let dirty = character.collect_snapshot();
                        if full { character.full_snapshot() } else { dirty }
                    })
                    .collect();
                if snapshots.is_empty() {
                    return Ok(());
                }

                debug!(tick = self.tick, count = snapshots.len(), full, "replication collected");
                let bytes = replication::encode(&ServerPacket {
                    tick: self.tick,
                    snapshots,
                })?;
                self.outbound.push(bytes);
            }
            Role::Observer => {
                for character in self.characters.values_mut() {
                    let entity = character.id();
                    self.outbound_requests.extend(
                        character
                            .abilities_mut()
                            .take_remote_requests()
                            .into_iter()
                            .map(|handle| RemoteActivation { entity, handle }),
                    );
                }
            }
        }
        Ok(())
    }

    /// Encoded [`ServerPacket`]s produced since the last call. Authority only
    /// produces any.
    pub fn take_outbound_replication(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.outbound)
    }

    /// Encoded [`ClientPacket`] of pending remote activation requests, if any.
    pub fn take_outbound_requests(&mut self) -> Result<Option<Vec<u8>>> {
        if self.outbound_requests.is_empty() {
            return Ok(None);
        }
        let packet = ClientPacket {
            tick: self.tick,
            requests: std::mem::take(&mut self.outbound_requests),
        };
        Ok(Some(replication::encode(&packet)?))
    }

    /// Applies an authority packet. Observer only.
    ///
    /// Packets older than the newest one applied are dropped. Returns the
    /// number of snapshots applied.
    pub fn apply_replication(&mut self, bytes: &[u8]) -> Result<usize> {
        self.require_role("apply_replication", Role::Observer)?;
        let packet: ServerPacket = replication::decode(bytes)?;

        if self.last_server_tick.is_some_and(|last| packet.tick < last) {
            debug!(tick = packet.tick, "dropped stale replication packet");
            return Ok(0);
        }
        self.last_server_tick = Some(packet.tick);

        let mut applied = 0;
        for snapshot in &packet.snapshots {
            let Some(character) = self.characters.get_mut(&snapshot.entity) else {
                debug!(entity = %snapshot.entity, "snapshot for unknown entity");
                continue;
            };

            let before = character.character_level();
            if character.apply_snapshot(snapshot) {
                applied += 1;
                let level = character.character_level();
                if level != before {
                    self.events.push(GameEvent::LevelChanged {
                        entity: snapshot.entity,
                        level,
                    });
                }
            }
        }
        Ok(applied)
    }

    /// Runs activation requests forwarded by an observer. Authority only.
    ///
    /// Returns the number of abilities that started.
    pub fn apply_remote_requests(&mut self, bytes: &[u8]) -> Result<usize> {
        self.require_authority("apply_remote_requests")?;
        let packet: ClientPacket = replication::decode(bytes)?;

        let mut started = 0;
        for request in packet.requests {
            let Some(character) = self.characters.get_mut(&request.entity) else {
                debug!(entity = %request.entity, "remote request for unknown entity");
                continue;
            };
            if character.is_dead() {
                continue;
            }

            let ctx = character.activation_context();
            match character.abilities_mut().activate_handle(request.handle, ctx) {
                Ok(activation) => {
                    started += 1;
                    self.record_cancellations(request.entity, &activation.cancelled);
                    self.record_activation(request.entity, request.handle, activation.instance);
                }
                Err(failure) => {
                    debug!(entity = %request.entity, handle = %request.handle, %failure, "remote activation rejected");
                }
            }
        }
        Ok(started)
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("role", &self.role)
            .field("tick", &self.tick)
            .field("characters", &self.characters.len())
            .field("agents", &self.scheduler.len())
            .field("match_ended", &self.match_ended)
            .finish_non_exhaustive()
    }
}
