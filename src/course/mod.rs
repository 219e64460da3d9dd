//! Procedural course generation
//!
//! The generator walks a cursor forward/upward from the origin, emitting
//! platforms and interleaving spinner/pendulum obstacles along each
//! segment, all driven by one seeded random source. Everything spawned
//! is registered with the physics world and the handle registry.

pub mod generator;
pub mod layout;
pub mod obstacles;

pub use generator::{CourseCursor, CourseGenerator};
pub use layout::{CourseLayout, FinishDef, PendulumDef, PlatformDef, SpinnerDef, SwingAxis};
pub use obstacles::Spinner;
