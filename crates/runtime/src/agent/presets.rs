//! Ready-made policies for the bundled agent archetypes.
//!
//! ```text
//! gunner()
//!   └─ Selector
//!       ├─ Sequence
//!       │   ├─ HasTarget
//!       │   ├─ AlwaysSucceed(Sequence[IsHealthLow(0.3), Strafe])
//!       │   └─ ShootTarget
//!       └─ Idle
//!
//! caster(abilities)
//!   └─ Selector
//!       ├─ Sequence[HasTarget, AbilityReady, ActivateAbilities]
//!       ├─ Sequence[HasTarget, ShootTarget]
//!       └─ Idle
//! ```

use std::sync::Arc;

use behavior_tree::builder::{always_succeed, selector, sequence};
use game_core::{GameplayTag, PolicyKind, TagContainer};

use super::nodes::{AbilityReady, ActivateAbilities, HasTarget, Idle, IsHealthLow, ShootTarget, Strafe};
use super::{BehaviorPolicy, BehaviorTree, TreePolicy};

/// Tag root the bundled caster preset activates.
pub const OFFENSIVE_ABILITY_TAG: &str = "Ability.Offensive";

/// Health ratio below which a gunner strafes while firing.
pub const EVASIVE_HEALTH_THRESHOLD: f32 = 0.3;

/// Shoots the weakest target, strafing when hurt.
pub fn gunner() -> BehaviorTree {
    selector(vec![
        sequence(vec![
            Box::new(HasTarget),
            always_succeed(sequence(vec![
                Box::new(IsHealthLow {
                    threshold: EVASIVE_HEALTH_THRESHOLD,
                }),
                Box::new(Strafe { value: 1.0 }),
            ])),
            Box::new(ShootTarget),
        ]),
        Box::new(Idle),
    ])
}

/// Casts abilities matching `abilities` whenever one is ready, shooting in
/// between.
pub fn caster(abilities: TagContainer) -> BehaviorTree {
    selector(vec![
        sequence(vec![
            Box::new(HasTarget),
            Box::new(AbilityReady {
                tags: abilities.clone(),
            }),
            Box::new(ActivateAbilities { tags: abilities }),
        ]),
        sequence(vec![Box::new(HasTarget), Box::new(ShootTarget)]),
        Box::new(Idle),
    ])
}

/// Stands still forever.
pub fn dummy() -> BehaviorTree {
    Box::new(Idle)
}

fn offensive_tags() -> TagContainer {
    GameplayTag::new(OFFENSIVE_ABILITY_TAG)
        .map(TagContainer::from)
        .unwrap_or_default()
}

/// Policy for a template's [`PolicyKind`].
pub fn policy_for(kind: PolicyKind) -> Arc<dyn BehaviorPolicy> {
    let tree = match kind {
        PolicyKind::Gunner => gunner(),
        PolicyKind::Caster => caster(offensive_tags()),
        PolicyKind::Dummy => dummy(),
    };
    Arc::new(TreePolicy::new(kind.to_string(), tree))
}
