//! Course generator
//!
//! Walks a cursor from the origin toward +Z, emitting platforms whose
//! forward step, lateral jitter and height gain all grow with progress,
//! then seeds obstacles along each inter-platform segment. Deterministic
//! for a fixed seed; called exactly once per course.

use std::f32::consts::PI;

use glam::Vec3;

use super::layout::{CourseLayout, FinishDef, PendulumDef, PlatformDef, SpinnerDef, SwingAxis};
use super::obstacles;
use crate::config::{ConfigError, CourseConfig};
use crate::consts;
use crate::game::{EntityRef, HandleRegistry};
use crate::physics::PhysicsWorld;
use crate::rng::CourseRng;
use crate::segment_towards;

/// Running generation state: where the course currently ends and how far
/// along [0, 1] difficulty scaling has come. Progress never decreases.
#[derive(Debug, Clone, Copy)]
pub struct CourseCursor {
    pub position: Vec3,
    pub height: f32,
    pub progress: f32,
}

impl CourseCursor {
    /// Start just past the origin platform's front edge.
    pub fn start() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 2.0),
            height: 0.0,
            progress: 0.0,
        }
    }

    pub fn advance_to(&mut self, position: Vec3, progress: f32) {
        debug_assert!(progress >= self.progress);
        self.position = position;
        self.height = position.y;
        self.progress = progress;
    }
}

pub struct CourseGenerator {
    config: CourseConfig,
    rng: CourseRng,
}

impl CourseGenerator {
    /// Fails fast on an invalid configuration; nothing is clamped.
    pub fn new(config: CourseConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: CourseRng::seeded(seed),
        })
    }

    /// Build the whole course: start platform, N generated platforms with
    /// obstacles interleaved between consecutive pairs, and the finish
    /// marker past the last platform. Registers every collider it spawns.
    pub fn generate(&mut self, world: &mut PhysicsWorld) -> (CourseLayout, HandleRegistry) {
        let mut registry = HandleRegistry::new();
        let mut platforms = Vec::new();
        let mut spinners = Vec::new();
        let mut pendulums = Vec::new();

        let start = self.spawn_platform(
            world,
            Vec3::ZERO,
            Vec3::ZERO,
            consts::START_PLATFORM_SIZE,
        );
        registry.insert(start.collider, EntityRef::platform(0));
        platforms.push(start);

        let count = self
            .rng
            .int_in(self.config.min_platforms, self.config.max_platforms);
        let mut cursor = CourseCursor::start();

        // Average per-step distances; individual steps scale up from
        // these with progress.
        let avg_forward = self.config.course_length / (count + 1) as f32;
        let avg_lateral = self.config.course_width / 2.0;

        for step in 0..count {
            let progress = step as f32 / count as f32;
            let (position, rotation, size) =
                self.next_platform_pose(cursor.position, avg_forward, avg_lateral, progress);

            let platform = self.spawn_platform(world, position, rotation, size);
            registry.insert(platform.collider, EntityRef::platform(platforms.len()));
            platforms.push(platform);

            self.populate_segment(
                world,
                &mut registry,
                cursor.position,
                position,
                &mut spinners,
                &mut pendulums,
            );

            cursor.advance_to(position, progress);
        }

        let finish = self.spawn_finish(world, platforms.last().map(|p| p.position).unwrap_or(Vec3::ZERO));
        registry.insert(finish.collider, EntityRef::finish());

        log::info!(
            "generated course: {} platforms, {} spinners, {} pendulums, finish at {:?}",
            platforms.len(),
            spinners.len(),
            pendulums.len(),
            finish.position
        );

        (
            CourseLayout {
                platforms,
                spinners,
                pendulums,
                finish,
            },
            registry,
        )
    }

    /// Roll the next platform's pose. Forward step and lateral jitter
    /// grow with progress; height strictly gains in expectation, so the
    /// course climbs and tightens toward the end.
    fn next_platform_pose(
        &mut self,
        from: Vec3,
        avg_forward: f32,
        avg_lateral: f32,
        progress: f32,
    ) -> (Vec3, Vec3, Vec3) {
        let forward = avg_forward * (1.0 + progress * self.config.forward_growth);
        let lateral = avg_lateral * (1.0 + progress * self.config.lateral_growth);

        let mut position = from;
        position.z += forward;
        position.x += self.rng.signed_unit() * lateral;
        position.y += self.rng.float_in(self.config.min_rise, self.config.max_rise)
            * (1.0 + progress);

        // Occasional small tilt: harder to hold, still landable.
        let rotation = if self.rng.chance(self.config.tilt_chance) {
            let pitch = self.rng.float_in(-PI / 12.0, PI / 12.0);
            let roll = self.rng.float_in(0.0, PI / 8.0);
            Vec3::new(pitch, 0.0, roll)
        } else {
            Vec3::ZERO
        };

        let size = Vec3::new(
            self.rng
                .float_in(self.config.min_platform_size, self.config.max_platform_size),
            self.config.platform_thickness,
            self.rng
                .float_in(self.config.min_platform_size, self.config.max_platform_size),
        );

        (position, rotation, size)
    }

    fn spawn_platform(
        &mut self,
        world: &mut PhysicsWorld,
        position: Vec3,
        rotation: Vec3,
        size: Vec3,
    ) -> PlatformDef {
        let body = world.create_fixed_body(position, rotation);
        let collider = world.attach_cuboid(body, size / 2.0);
        PlatformDef {
            position,
            rotation,
            size,
            body,
            collider,
        }
    }

    /// Seed obstacles along the straight segment between two consecutive
    /// platforms: one per `obstacle_spacing` units, nudged off the line
    /// so they are not perfectly in the player's path. Even positions
    /// prefer spinners, the rest (and spinner overflow) fall through to
    /// pendulums; a segment shorter than the spacing gets nothing, which
    /// is expected.
    fn populate_segment(
        &mut self,
        world: &mut PhysicsWorld,
        registry: &mut HandleRegistry,
        from: Vec3,
        to: Vec3,
        spinners: &mut Vec<SpinnerDef>,
        pendulums: &mut Vec<PendulumDef>,
    ) {
        let (distance, direction) = segment_towards(from, to);
        let count = (distance / self.config.obstacle_spacing).floor() as usize;

        for slot in 1..=count {
            let along = slot as f32 / (count + 1) as f32;
            let mut point = from + direction * (distance * along);
            point.x += self.rng.signed_unit();
            point.y += self.rng.float_in(0.0, 2.0);

            if slot % 2 == 0 && spinners.len() < self.config.max_spinners {
                // Later slots in a segment spin faster.
                let speed = 1.0 + along * 2.0;
                let def = obstacles::spawn_spinner(
                    world,
                    point + Vec3::Y * consts::SPINNER_MOUNT_RISE,
                    speed,
                );
                registry.insert(def.collider, EntityRef::spinner(spinners.len()));
                spinners.push(def);
            } else if pendulums.len() < self.config.max_pendulums {
                let axis = if self.rng.chance(0.5) {
                    SwingAxis::X
                } else {
                    SwingAxis::Z
                };
                let phase = self
                    .rng
                    .float_in(-consts::PENDULUM_MAX_PHASE, consts::PENDULUM_MAX_PHASE);
                let def = obstacles::spawn_pendulum(
                    world,
                    point + Vec3::Y * consts::PENDULUM_MOUNT_RISE,
                    axis,
                    phase,
                );
                for collider in def.colliders {
                    registry.insert(collider, EntityRef::pendulum(pendulums.len()));
                }
                pendulums.push(def);
            }
        }
    }

    /// Goal marker: lifted a random couple of units above the last
    /// platform and pushed a little further along the course. An
    /// octahedral hull gives it a slimmer silhouette than a plain box.
    fn spawn_finish(&mut self, world: &mut PhysicsWorld, last_platform: Vec3) -> FinishDef {
        let rise = self
            .rng
            .float_in(consts::FINISH_MIN_RISE, consts::FINISH_MAX_RISE);
        let position = last_platform + Vec3::new(0.0, rise, consts::FINISH_FORWARD_OFFSET);

        let body = world.create_fixed_body(position, Vec3::ZERO);
        let s = consts::FINISH_HALF_SIZE;
        let points = [
            Vec3::new(s, 0.0, 0.0),
            Vec3::new(-s, 0.0, 0.0),
            Vec3::new(0.0, s, 0.0),
            Vec3::new(0.0, -s, 0.0),
            Vec3::new(0.0, 0.0, s),
            Vec3::new(0.0, 0.0, -s),
        ];
        let collider = match world.attach_convex_hull(body, &points) {
            Some(handle) => handle,
            None => world.attach_cuboid(body, Vec3::splat(s)),
        };

        FinishDef {
            position,
            body,
            collider,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::EntityKind;
    use proptest::prelude::*;

    fn generate_with(config: CourseConfig, seed: u64) -> (CourseLayout, HandleRegistry) {
        let mut world = PhysicsWorld::new();
        let mut generator = CourseGenerator::new(config, seed).expect("valid config");
        generator.generate(&mut world)
    }

    #[test]
    fn platform_count_includes_start() {
        let config = CourseConfig::default();
        for seed in [0u64, 1, 42, 9999] {
            let (layout, _) = generate_with(config.clone(), seed);
            let n = layout.platform_count() as u32;
            assert!(n >= config.min_platforms + 1 && n <= config.max_platforms + 1);
        }
    }

    #[test]
    fn forward_axis_strictly_increases() {
        let (layout, _) = generate_with(CourseConfig::default(), 7);
        for pair in layout.platforms.windows(2) {
            assert!(pair[1].position.z > pair[0].position.z);
        }
    }

    #[test]
    fn same_seed_reproduces_layout() {
        let (a, _) = generate_with(CourseConfig::default(), 0xC0FFEE);
        let (b, _) = generate_with(CourseConfig::default(), 0xC0FFEE);

        assert_eq!(a.platform_count(), b.platform_count());
        for (pa, pb) in a.platforms.iter().zip(&b.platforms) {
            assert_eq!(pa.position, pb.position);
            assert_eq!(pa.rotation, pb.rotation);
            assert_eq!(pa.size, pb.size);
        }
        assert_eq!(a.spinners.len(), b.spinners.len());
        for (sa, sb) in a.spinners.iter().zip(&b.spinners) {
            assert_eq!(sa.position, sb.position);
            assert_eq!(sa.speed, sb.speed);
        }
        assert_eq!(a.pendulums.len(), b.pendulums.len());
        for (pa, pb) in a.pendulums.iter().zip(&b.pendulums) {
            assert_eq!(pa.position, pb.position);
            assert_eq!(pa.axis, pb.axis);
            assert_eq!(pa.phase, pb.phase);
        }
        assert_eq!(a.finish.position, b.finish.position);
    }

    #[test]
    fn population_caps_hold() {
        let config = CourseConfig {
            max_spinners: 2,
            max_pendulums: 3,
            ..Default::default()
        };
        for seed in 0..20u64 {
            let (layout, _) = generate_with(config.clone(), seed);
            assert!(layout.spinners.len() <= 2);
            assert!(layout.pendulums.len() <= 3);
        }
    }

    #[test]
    fn every_obstacle_collider_is_registered_once() {
        let (layout, registry) = generate_with(CourseConfig::default(), 31);

        for (i, spinner) in layout.spinners.iter().enumerate() {
            let entry = registry.lookup(spinner.collider).expect("registered");
            assert_eq!(entry.kind, EntityKind::Spinner);
            assert_eq!(entry.index, i);
        }
        for (i, pendulum) in layout.pendulums.iter().enumerate() {
            for collider in pendulum.colliders {
                let entry = registry.lookup(collider).expect("registered");
                assert_eq!(entry.kind, EntityKind::Pendulum);
                assert_eq!(entry.index, i);
            }
        }
        let finish = registry.lookup(layout.finish.collider).expect("registered");
        assert_eq!(finish.kind, EntityKind::Finish);

        // One entry per platform + finish + two colliders per pendulum.
        let expected =
            layout.platform_count() + layout.spinners.len() + layout.pendulums.len() * 2 + 1;
        assert_eq!(registry.len(), expected);
    }

    #[test]
    fn zero_platform_range_yields_start_only() {
        let config = CourseConfig {
            min_platforms: 0,
            max_platforms: 0,
            ..Default::default()
        };
        let (layout, _) = generate_with(config, 5);
        assert_eq!(layout.platform_count(), 1);
        assert!(layout.spinners.is_empty());
        assert!(layout.pendulums.is_empty());
    }

    #[test]
    fn cursor_progress_is_monotone() {
        let mut cursor = CourseCursor::start();
        for step in 0..12 {
            let progress = step as f32 / 12.0;
            cursor.advance_to(cursor.position + Vec3::Z, progress);
            assert!(cursor.progress >= 0.0 && cursor.progress <= 1.0);
            assert_eq!(cursor.progress, progress);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn generation_properties_hold_for_valid_configs(
            min in 1u32..6,
            extra in 0u32..5,
            spacing in 1.0f32..5.0,
            max_spinners in 0usize..4,
            max_pendulums in 0usize..4,
            seed in any::<u64>(),
        ) {
            let config = CourseConfig {
                min_platforms: min,
                max_platforms: min + extra,
                obstacle_spacing: spacing,
                max_spinners,
                max_pendulums,
                ..Default::default()
            };
            let (layout, _) = generate_with(config.clone(), seed);

            let n = layout.platform_count() as u32;
            prop_assert!(n >= config.min_platforms + 1);
            prop_assert!(n <= config.max_platforms + 1);
            prop_assert!(layout.spinners.len() <= config.max_spinners);
            prop_assert!(layout.pendulums.len() <= config.max_pendulums);
            for pair in layout.platforms.windows(2) {
                prop_assert!(pair[1].position.z > pair[0].position.z);
            }
        }
    }
}
