//! Rapier world wrapper
//!
//! Owns the complete rigid-body state and exposes the narrow interface
//! the gameplay core needs: body/collider creation returning opaque
//! handles, a per-frame `step`, and a collision-event drain. Course and
//! game code work in glam `Vec3`; nalgebra types never leak past this
//! module.

use crossbeam::channel::{Receiver, unbounded};
use glam::Vec3;
use rapier3d::na::{Translation3, UnitQuaternion};
use rapier3d::prelude::*;

pub use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};

use crate::consts;

/// One drained collision event: an (unordered) collider pair plus
/// whether the contact started or stopped this step.
#[derive(Debug, Clone, Copy)]
pub struct ContactEvent {
    pub collider1: ColliderHandle,
    pub collider2: ColliderHandle,
    pub started: bool,
}

impl ContactEvent {
    /// True if either side of the pair is `handle`.
    #[inline]
    pub fn involves(&self, handle: ColliderHandle) -> bool {
        self.collider1 == handle || self.collider2 == handle
    }
}

pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    event_collector: ChannelEventCollector,
    collision_events: Receiver<CollisionEvent>,
    contact_force_events: Receiver<ContactForceEvent>,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        let (collision_send, collision_recv) = unbounded();
        let (force_send, force_recv) = unbounded();
        Self {
            gravity: vector![0.0, consts::GRAVITY_Y, 0.0],
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            event_collector: ChannelEventCollector::new(collision_send, force_send),
            collision_events: collision_recv,
            contact_force_events: force_recv,
        }
    }

    /// Advance the simulation by `dt` seconds (one step, no substepping).
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.event_collector,
        );
    }

    /// Drain every collision event produced by the last step, in the
    /// order the engine emitted them. The channel is empty afterwards;
    /// contact-force events are discarded (unused by gameplay).
    pub fn drain_collision_events(&mut self) -> Vec<ContactEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.collision_events.try_recv() {
            events.push(ContactEvent {
                collider1: event.collider1(),
                collider2: event.collider2(),
                started: event.started(),
            });
        }
        while self.contact_force_events.try_recv().is_ok() {}
        events
    }

    // --- body construction ---------------------------------------------

    /// Immovable body posed by translation + XYZ euler rotation.
    pub fn create_fixed_body(&mut self, position: Vec3, rotation: Vec3) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed()
            .position(isometry(position, rotation))
            .build();
        self.bodies.insert(body)
    }

    /// Force-driven body. Rotation locking keeps capsules upright.
    pub fn create_dynamic_body(&mut self, position: Vec3, lock_rotations: bool) -> RigidBodyHandle {
        let mut builder = RigidBodyBuilder::dynamic()
            .translation(to_na(position))
            .can_sleep(false);
        if lock_rotations {
            builder = builder.locked_axes(LockedAxes::ROTATION_LOCKED);
        }
        self.bodies.insert(builder.build())
    }

    /// Force-driven body spawned mid-pose (pendulum swing bodies start
    /// tilted by their phase). Sleeping stays disabled so a hazard never
    /// dozes off at the apex of its swing.
    pub fn create_posed_dynamic_body(&mut self, position: Vec3, rotation: Vec3) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .position(isometry(position, rotation))
            .can_sleep(false)
            .build();
        self.bodies.insert(body)
    }

    /// Position-based kinematic body (spinners), driven between steps via
    /// [`Self::set_next_kinematic_rotation`].
    pub fn create_kinematic_body(&mut self, position: Vec3) -> RigidBodyHandle {
        let body = RigidBodyBuilder::kinematic_position_based()
            .translation(to_na(position))
            .build();
        self.bodies.insert(body)
    }

    // --- collider construction -----------------------------------------

    pub fn attach_cuboid(&mut self, body: RigidBodyHandle, half_extents: Vec3) -> ColliderHandle {
        let collider =
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build();
        self.colliders
            .insert_with_parent(collider, body, &mut self.bodies)
    }

    /// Cuboid offset from its parent body origin (pendulum arms).
    pub fn attach_offset_cuboid(
        &mut self,
        body: RigidBodyHandle,
        half_extents: Vec3,
        offset: Vec3,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(to_na(offset))
            .build();
        self.colliders
            .insert_with_parent(collider, body, &mut self.bodies)
    }

    pub fn attach_ball(
        &mut self,
        body: RigidBodyHandle,
        radius: f32,
        offset: Vec3,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::ball(radius)
            .translation(to_na(offset))
            .build();
        self.colliders
            .insert_with_parent(collider, body, &mut self.bodies)
    }

    /// Frictionless unit-mass capsule reporting collision events; this is
    /// the player shape, and enabling events here is what feeds the
    /// per-step event queue for every contact the player makes.
    pub fn attach_player_capsule(
        &mut self,
        body: RigidBodyHandle,
        half_height: f32,
        radius: f32,
        offset_y: f32,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::capsule_y(half_height, radius)
            .translation(vector![0.0, offset_y, 0.0])
            .mass(1.0)
            .friction(0.0)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        self.colliders
            .insert_with_parent(collider, body, &mut self.bodies)
    }

    /// Convex hull collider from a point cloud (finish marker). Returns
    /// `None` for degenerate input.
    pub fn attach_convex_hull(
        &mut self,
        body: RigidBodyHandle,
        points: &[Vec3],
    ) -> Option<ColliderHandle> {
        let points: Vec<Point<Real>> = points.iter().map(|p| point![p.x, p.y, p.z]).collect();
        let collider = ColliderBuilder::convex_hull(&points)?.build();
        Some(
            self.colliders
                .insert_with_parent(collider, body, &mut self.bodies),
        )
    }

    /// Hinge `child` to `parent` about `axis`, with anchors in each
    /// body's local space (pendulum suspension).
    pub fn attach_revolute_joint(
        &mut self,
        parent: RigidBodyHandle,
        child: RigidBodyHandle,
        axis: Vec3,
        parent_anchor: Vec3,
        child_anchor: Vec3,
    ) {
        let joint = RevoluteJointBuilder::new(UnitVector::new_normalize(to_na(axis)))
            .local_anchor1(point![parent_anchor.x, parent_anchor.y, parent_anchor.z])
            .local_anchor2(point![child_anchor.x, child_anchor.y, child_anchor.z])
            .build();
        self.impulse_joints.insert(parent, child, joint, true);
    }

    // --- body accessors -------------------------------------------------

    pub fn translation(&self, handle: RigidBodyHandle) -> Vec3 {
        self.bodies
            .get(handle)
            .map(|body| to_glam(body.translation()))
            .unwrap_or(Vec3::ZERO)
    }

    pub fn set_translation(&mut self, handle: RigidBodyHandle, position: Vec3) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_translation(to_na(position), true);
        }
    }

    pub fn linvel(&self, handle: RigidBodyHandle) -> Vec3 {
        self.bodies
            .get(handle)
            .map(|body| to_glam(body.linvel()))
            .unwrap_or(Vec3::ZERO)
    }

    pub fn set_linvel(&mut self, handle: RigidBodyHandle, velocity: Vec3) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_linvel(to_na(velocity), true);
        }
    }

    pub fn linear_damping(&self, handle: RigidBodyHandle) -> f32 {
        self.bodies
            .get(handle)
            .map(|body| body.linear_damping())
            .unwrap_or(0.0)
    }

    pub fn set_linear_damping(&mut self, handle: RigidBodyHandle, damping: f32) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_linear_damping(damping);
        }
    }

    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vec3) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.apply_impulse(to_na(impulse), true);
        }
    }

    /// Schedule a kinematic body's orientation for the next step.
    pub fn set_next_kinematic_rotation(&mut self, handle: RigidBodyHandle, yaw: f32) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_next_kinematic_rotation(UnitQuaternion::from_euler_angles(0.0, yaw, 0.0));
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn to_na(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

#[inline]
fn to_glam(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn isometry(position: Vec3, rotation: Vec3) -> Isometry<Real> {
    Isometry::from_parts(
        Translation3::new(position.x, position.y, position.z),
        UnitQuaternion::from_euler_angles(rotation.x, rotation.y, rotation.z),
    )
}
