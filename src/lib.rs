//! Sky Hopper - procedurally generated obstacle-course platformer core
//!
//! Core modules:
//! - `config`: Course generation parameters with validated defaults
//! - `rng`: Seedable random source (deterministic replay)
//! - `physics`: Rapier world wrapper + per-step collision event drain
//! - `course`: Course generator and platform/obstacle descriptors
//! - `game`: Handle registry, collision router, player state, frame loop
//!
//! Rendering, cameras, input polling and UI are the embedder's concern;
//! this crate only produces the layout, steps the simulation and routes
//! collision events into gameplay state.

pub mod config;
pub mod course;
pub mod game;
pub mod physics;
pub mod rng;

pub use config::{ConfigError, CourseConfig};
pub use course::{CourseGenerator, CourseLayout};
pub use game::Game;
pub use physics::PhysicsWorld;

use glam::Vec3;

/// Gameplay constants
pub mod consts {
    use glam::Vec3;

    /// World gravity (m/s^2, Y up)
    pub const GRAVITY_Y: f32 = -9.81;
    /// Per-frame physics timestep cap; frame hitches are clamped to this
    pub const MAX_TIMESTEP: f32 = 0.1;

    /// Linear damping applied while the player rests on a surface
    pub const GROUNDED_DAMPING: f32 = 4.0;
    /// Re-jump cooldown armed on every grounding transition
    pub const JUMP_COOLDOWN_SECS: f32 = 0.25;
    /// Falling below this height triggers the run reset
    pub const FALL_RESET_Y: f32 = -3.0;
    /// Where the player respawns after a fall
    pub const RESTART_POINT: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    /// Initial player spawn, just above the start platform
    pub const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, 0.1, 0.0);

    /// Player capsule dimensions
    pub const PLAYER_CAPSULE_HALF_HEIGHT: f32 = 0.5;
    pub const PLAYER_CAPSULE_RADIUS: f32 = 0.15;
    /// Capsule center offset above the body origin (feet at the origin)
    pub const PLAYER_CAPSULE_OFFSET_Y: f32 = 0.645;

    /// Start platform footprint (half the course-platform default)
    pub const START_PLATFORM_SIZE: Vec3 = Vec3::new(2.0, 0.1, 2.0);

    /// Spinner bar half-extents (a long thin rotating beam)
    pub const SPINNER_BAR_HALF_EXTENTS: Vec3 = Vec3::new(2.0, 0.15, 0.15);
    /// Spinners mount this far above their sampled segment point
    pub const SPINNER_MOUNT_RISE: f32 = 1.0;

    /// Pendulum anchors mount this far above their sampled segment point
    pub const PENDULUM_MOUNT_RISE: f32 = 3.0;
    /// Arm length from anchor to bob center
    pub const PENDULUM_ARM_LENGTH: f32 = 2.2;
    pub const PENDULUM_ARM_HALF_WIDTH: f32 = 0.08;
    pub const PENDULUM_BOB_RADIUS: f32 = 0.35;
    /// Initial swing offset is drawn from [-max, max]
    pub const PENDULUM_MAX_PHASE: f32 = 0.9;

    /// Finish marker is lifted 2..5 above the last platform and pushed
    /// 2 units further along the course axis
    pub const FINISH_MIN_RISE: f32 = 2.0;
    pub const FINISH_MAX_RISE: f32 = 5.0;
    pub const FINISH_FORWARD_OFFSET: f32 = 2.0;
    /// Half-size of the octahedral finish marker hull
    pub const FINISH_HALF_SIZE: f32 = 0.5;
}

/// Straight-line distance and unit direction from `from` to `to`.
///
/// Direction falls back to the course axis for coincident points so a
/// degenerate segment never yields NaNs.
#[inline]
pub fn segment_towards(from: Vec3, to: Vec3) -> (f32, Vec3) {
    let delta = to - from;
    let distance = delta.length();
    if distance > f32::EPSILON {
        (distance, delta / distance)
    } else {
        (0.0, Vec3::Z)
    }
}
