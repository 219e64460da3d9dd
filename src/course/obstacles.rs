//! Obstacle spawners and drivers
//!
//! Spinners are kinematic bars the game loop rotates by hand each frame;
//! pendulums are passive dynamic bodies the physics engine swings on a
//! revolute joint, so they need no per-frame driver.

use glam::Vec3;

use super::layout::{PendulumDef, SpinnerDef, SwingAxis};
use crate::consts;
use crate::physics::PhysicsWorld;

/// Create a spinner's kinematic body and bar collider at `position`.
pub fn spawn_spinner(world: &mut PhysicsWorld, position: Vec3, speed: f32) -> SpinnerDef {
    let body = world.create_kinematic_body(position);
    let collider = world.attach_cuboid(body, consts::SPINNER_BAR_HALF_EXTENTS);
    SpinnerDef {
        position,
        speed,
        body,
        collider,
    }
}

/// Create a pendulum: a fixed anchor at `position` plus one dynamic
/// swing body hinged to it, carrying the arm and bob colliders. The
/// swing body starts tilted by `phase` about the hinge axis so pendulums
/// along a course are out of step with each other.
pub fn spawn_pendulum(
    world: &mut PhysicsWorld,
    position: Vec3,
    axis: SwingAxis,
    phase: f32,
) -> PendulumDef {
    let anchor = world.create_fixed_body(position, Vec3::ZERO);
    let swing = world.create_posed_dynamic_body(position, axis.tilt(phase));

    let arm_half = consts::PENDULUM_ARM_LENGTH / 2.0;
    let arm = world.attach_offset_cuboid(
        swing,
        Vec3::new(
            consts::PENDULUM_ARM_HALF_WIDTH,
            arm_half,
            consts::PENDULUM_ARM_HALF_WIDTH,
        ),
        Vec3::new(0.0, -arm_half, 0.0),
    );
    let bob = world.attach_ball(
        swing,
        consts::PENDULUM_BOB_RADIUS,
        Vec3::new(0.0, -consts::PENDULUM_ARM_LENGTH, 0.0),
    );

    // Hinge at the shared origin; rotation about the axis leaves the
    // axis itself invariant, so the same local axis works for both
    // bodies regardless of phase.
    world.attach_revolute_joint(anchor, swing, axis.axis(), Vec3::ZERO, Vec3::ZERO);

    PendulumDef {
        position,
        axis,
        phase,
        bodies: [anchor, swing],
        colliders: [arm, bob],
    }
}

/// Per-frame driver for one spinner: accumulates yaw from unclamped
/// elapsed time and schedules it on the kinematic body before the step.
#[derive(Debug)]
pub struct Spinner {
    body: crate::physics::RigidBodyHandle,
    speed: f32,
    angle: f32,
}

impl Spinner {
    pub fn from_def(def: &SpinnerDef) -> Self {
        Self {
            body: def.body,
            speed: def.speed,
            angle: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32, world: &mut PhysicsWorld) {
        self.angle += self.speed * dt;
        world.set_next_kinematic_rotation(self.body, self.angle);
    }

    /// Current yaw, for mesh sync by the embedder.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_accumulates_unclamped_time() {
        let mut world = PhysicsWorld::new();
        let def = spawn_spinner(&mut world, Vec3::new(0.0, 1.0, 0.0), 2.0);
        let mut spinner = Spinner::from_def(&def);

        spinner.advance(0.5, &mut world);
        // A frame hitch is not clamped for obstacle kinematics.
        spinner.advance(1.0, &mut world);
        assert!((spinner.angle() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn pendulum_swings_from_phase_offset() {
        let mut world = PhysicsWorld::new();
        let def = spawn_pendulum(&mut world, Vec3::new(0.0, 5.0, 0.0), SwingAxis::X, 0.8);
        let swing = def.bodies[1];

        // The hinge pins the swing body to the anchor while gravity works
        // on the offset colliders.
        for _ in 0..60 {
            world.step(1.0 / 60.0);
        }
        let origin = world.translation(swing);
        assert!(origin.distance(Vec3::new(0.0, 5.0, 0.0)) < 0.25);
    }

    #[test]
    fn pendulum_owns_distinct_handles() {
        let mut world = PhysicsWorld::new();
        let def = spawn_pendulum(&mut world, Vec3::new(1.0, 4.0, 2.0), SwingAxis::Z, 0.0);
        assert_ne!(def.bodies[0], def.bodies[1]);
        assert_ne!(def.colliders[0], def.colliders[1]);
    }
}
