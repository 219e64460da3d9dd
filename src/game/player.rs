//! Player body and gameplay state
//!
//! A frictionless dynamic capsule with rotations locked so it stays
//! upright. The grounded flag only ever changes through router-validated
//! surface events; hazard contacts are filtered out before they get
//! here. The re-jump cooldown is a scheduled, non-cancelable clear: a
//! stale clear firing into a newer grounded period just clears the flag
//! a little early, which is accepted behavior.

use glam::Vec3;

use crate::consts;
use crate::physics::{ColliderHandle, PhysicsWorld, RigidBodyHandle};

pub struct Player {
    body: RigidBodyHandle,
    collider: ColliderHandle,
    grounded: bool,
    jump_cooldown: bool,
    /// Pending cooldown-clear deadlines, in loop time seconds.
    cooldown_clears: Vec<f32>,
    restart_point: Vec3,
}

impl Player {
    pub fn spawn(world: &mut PhysicsWorld, position: Vec3) -> Self {
        let body = world.create_dynamic_body(position, true);
        let collider = world.attach_player_capsule(
            body,
            consts::PLAYER_CAPSULE_HALF_HEIGHT,
            consts::PLAYER_CAPSULE_RADIUS,
            consts::PLAYER_CAPSULE_OFFSET_Y,
        );
        Self {
            body,
            collider,
            grounded: false,
            jump_cooldown: false,
            cooldown_clears: Vec::new(),
            restart_point: consts::RESTART_POINT,
        }
    }

    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn collider(&self) -> ColliderHandle {
        self.collider
    }

    pub fn grounded(&self) -> bool {
        self.grounded
    }

    pub fn can_jump(&self) -> bool {
        self.grounded && !self.jump_cooldown
    }

    /// Router-validated grounded transition. Landing applies heavy
    /// damping (so the player does not skate off) and arms the re-jump
    /// cooldown; leaving the ground removes the damping.
    pub fn set_grounded(&mut self, grounded: bool, world: &mut PhysicsWorld, now: f32) {
        if grounded == self.grounded {
            return;
        }
        self.grounded = grounded;
        if grounded {
            world.set_linear_damping(self.body, consts::GROUNDED_DAMPING);
            self.jump_cooldown = true;
            self.cooldown_clears.push(now + consts::JUMP_COOLDOWN_SECS);
        } else {
            world.set_linear_damping(self.body, 0.0);
        }
    }

    /// Grounded-only locomotion impulse; there is no air control.
    pub fn drive(&self, world: &mut PhysicsWorld, impulse: Vec3) {
        if self.grounded {
            world.apply_impulse(self.body, impulse);
        }
    }

    /// Jump, gated by the cooldown. Damping comes off first so the
    /// launch impulse is not eaten before the capsule leaves the
    /// surface; the cooldown re-arms until the next landing clears it.
    pub fn jump(&mut self, world: &mut PhysicsWorld, impulse: Vec3) {
        if !self.can_jump() {
            return;
        }
        self.jump_cooldown = true;
        world.set_linear_damping(self.body, 0.0);
        world.apply_impulse(self.body, impulse);
    }

    /// Per-frame maintenance: fire due cooldown clears, then check the
    /// fall threshold. Returns true when a fall reset happened.
    pub fn update(&mut self, world: &mut PhysicsWorld, now: f32) -> bool {
        if self.cooldown_clears.iter().any(|&at| at <= now) {
            self.jump_cooldown = false;
        }
        self.cooldown_clears.retain(|&at| at > now);

        if world.translation(self.body).y < consts::FALL_RESET_Y {
            self.reset(world);
            return true;
        }
        false
    }

    /// Fatal-to-attempt recovery: kill all momentum and put the body
    /// back at the restart point. Leftover velocity would carry into the
    /// fresh attempt otherwise.
    pub fn reset(&mut self, world: &mut PhysicsWorld) {
        world.set_linvel(self.body, Vec3::ZERO);
        world.set_translation(self.body, self.restart_point);
        log::info!("player fell, reset to {:?}", self.restart_point);
    }
}
