//! Collision event router
//!
//! Classifies each drained collision event and applies exactly one
//! gameplay-state transition. A physics step can report several
//! simultaneous events sharing the player's handle (touching a platform
//! and grazing a spinner in the same step), so classification is
//! first-match-wins:
//!
//! 1. finish contact - marks the course completed, at most once
//! 2. hazard contact - recorded, but never touches the grounded flag
//!    (a spinner face is not a landing surface)
//! 3. anything else - generic surface, forwarded to the grounded state
//!
//! Events are independent pairs; the router imposes no ordering beyond
//! the engine's.

use super::Finish;
use super::player::Player;
use super::registry::{EntityKind, HandleRegistry};
use crate::physics::{ContactEvent, PhysicsWorld};

/// What a single event resolved to, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    /// First start-contact with the finish marker
    LevelCompleted,
    /// Finish contact after completion, or a finish stop event
    FinishIgnored,
    /// Contact with a spinner or pendulum; grounded state untouched
    HazardHit(EntityKind),
    /// Ordinary surface contact forwarded to the grounded transition
    Surface { grounded: bool },
}

pub struct CollisionRouter {
    registry: HandleRegistry,
}

impl CollisionRouter {
    pub fn new(registry: HandleRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &HandleRegistry {
        &self.registry
    }

    pub fn route(
        &self,
        event: ContactEvent,
        world: &mut PhysicsWorld,
        player: &mut Player,
        finish: &mut Finish,
        now: f32,
    ) -> Routed {
        let ends = [
            self.registry.lookup(event.collider1),
            self.registry.lookup(event.collider2),
        ];

        if ends
            .iter()
            .flatten()
            .any(|entity| entity.kind == EntityKind::Finish)
        {
            if event.started && !finish.reached {
                finish.reached = true;
                log::info!("level completed");
                return Routed::LevelCompleted;
            }
            return Routed::FinishIgnored;
        }

        if let Some(hazard) = ends
            .iter()
            .flatten()
            .find(|entity| entity.kind.is_hazard())
        {
            log::debug!("hazard contact: {:?} #{}", hazard.kind, hazard.index);
            return Routed::HazardHit(hazard.kind);
        }

        // Untracked geometry lands here too: unknown handles are plain
        // surfaces, not errors.
        player.set_grounded(event.started, world, now);
        Routed::Surface {
            grounded: event.started,
        }
    }
}
