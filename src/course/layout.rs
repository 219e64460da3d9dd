//! Course descriptors
//!
//! Plain data handed back to the embedding application for mesh
//! placement. Positions/rotations/sizes serialize; physics handles are
//! runtime-only and skipped.

use glam::Vec3;
use serde::Serialize;

use crate::physics::{ColliderHandle, RigidBodyHandle};

/// A fixed slab the player can land on. Immutable after creation; one
/// fixed body + one box collider each.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformDef {
    pub position: Vec3,
    /// XYZ euler tilt; zero for flat platforms
    pub rotation: Vec3,
    /// Full extents (width, thickness, depth)
    pub size: Vec3,
    #[serde(skip_serializing)]
    pub body: RigidBodyHandle,
    #[serde(skip_serializing)]
    pub collider: ColliderHandle,
}

/// A kinematic bar revolving around its mount point.
#[derive(Debug, Clone, Serialize)]
pub struct SpinnerDef {
    pub position: Vec3,
    /// Rotation speed, radians per second
    pub speed: f32,
    #[serde(skip_serializing)]
    pub body: RigidBodyHandle,
    #[serde(skip_serializing)]
    pub collider: ColliderHandle,
}

/// Which vertical plane a pendulum swings in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SwingAxis {
    /// Hinge about X: swings along the course axis
    X,
    /// Hinge about Z: swings across the course
    Z,
}

impl SwingAxis {
    pub fn axis(self) -> Vec3 {
        match self {
            SwingAxis::X => Vec3::X,
            SwingAxis::Z => Vec3::Z,
        }
    }

    /// Initial swing tilt as an XYZ euler rotation.
    pub fn tilt(self, phase: f32) -> Vec3 {
        match self {
            SwingAxis::X => Vec3::new(phase, 0.0, 0.0),
            SwingAxis::Z => Vec3::new(0.0, 0.0, phase),
        }
    }
}

/// A swinging arm-and-bob hazard suspended from a fixed anchor. The
/// swing body carries both hazard colliders, so one pendulum owns
/// several physics handles.
#[derive(Debug, Clone, Serialize)]
pub struct PendulumDef {
    /// Anchor position (top of the arm)
    pub position: Vec3,
    pub axis: SwingAxis,
    /// Initial swing offset in radians
    pub phase: f32,
    #[serde(skip_serializing)]
    pub bodies: [RigidBodyHandle; 2],
    #[serde(skip_serializing)]
    pub colliders: [ColliderHandle; 2],
}

/// The goal marker past the last platform.
#[derive(Debug, Clone, Serialize)]
pub struct FinishDef {
    pub position: Vec3,
    #[serde(skip_serializing)]
    pub body: RigidBodyHandle,
    #[serde(skip_serializing)]
    pub collider: ColliderHandle,
}

/// Everything one `generate` call produced, in traversal order.
#[derive(Debug, Clone, Serialize)]
pub struct CourseLayout {
    pub platforms: Vec<PlatformDef>,
    pub spinners: Vec<SpinnerDef>,
    pub pendulums: Vec<PendulumDef>,
    pub finish: FinishDef,
}

impl CourseLayout {
    /// Platform count including the fixed start platform.
    pub fn platform_count(&self) -> usize {
        self.platforms.len()
    }
}
