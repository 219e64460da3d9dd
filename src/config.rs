//! Course generation parameters
//!
//! A single plain-data struct with documented defaults. Validation is
//! fail-fast: a bad range is reported to the caller at generator
//! construction and never silently clamped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("platform count range is inverted: min {min} > max {max}")]
    PlatformRange { min: u32, max: u32 },

    #[error("platform size range is invalid: min {min}, max {max}")]
    PlatformSizeRange { min: f32, max: f32 },

    #[error("height step range is invalid: min {min}, max {max}")]
    RiseRange { min: f32, max: f32 },

    #[error("course dimensions must be positive: length {length}, width {width}")]
    CourseDimensions { length: f32, width: f32 },

    #[error("obstacle spacing must be positive, got {0}")]
    ObstacleSpacing(f32),

    #[error("tilt chance must be within [0, 1], got {0}")]
    TiltChance(f32),

    #[error("difficulty growth must be non-negative: forward {forward}, lateral {lateral}")]
    Growth { forward: f32, lateral: f32 },
}

/// Tuning knobs for [`crate::course::CourseGenerator`].
///
/// Defaults: 10-15 platforms over a 20x12 course, rising 1-2 units per
/// step, one obstacle every 3 units of segment length, capped at
/// 2 spinners and 3 pendulums.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseConfig {
    /// Platform count is drawn uniformly from [min_platforms, max_platforms]
    pub min_platforms: u32,
    pub max_platforms: u32,
    /// Nominal course length; the average forward step is length / (n + 1)
    pub course_length: f32,
    /// Nominal course width; lateral jitter scales with width / 2
    pub course_width: f32,
    /// Platform footprint (width/depth) is drawn from [min, max]
    pub min_platform_size: f32,
    pub max_platform_size: f32,
    /// Fixed platform slab thickness
    pub platform_thickness: f32,
    /// Per-step height gain is drawn from [min_rise, max_rise], scaled by
    /// (1 + progress)
    pub min_rise: f32,
    pub max_rise: f32,
    /// Forward step grows by this factor at full progress
    pub forward_growth: f32,
    /// Lateral jitter grows by this factor at full progress
    pub lateral_growth: f32,
    /// Probability that a platform gets a small random tilt
    pub tilt_chance: f32,
    /// One obstacle per this many units of inter-platform distance
    pub obstacle_spacing: f32,
    /// Population caps per obstacle kind; once reached the kind is skipped
    pub max_spinners: usize,
    pub max_pendulums: usize,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            min_platforms: 10,
            max_platforms: 15,
            course_length: 20.0,
            course_width: 12.0,
            min_platform_size: 1.0,
            max_platform_size: 5.0,
            platform_thickness: 0.1,
            min_rise: 1.0,
            max_rise: 2.0,
            forward_growth: 0.5,
            lateral_growth: 0.3,
            tilt_chance: 0.4,
            obstacle_spacing: 3.0,
            max_spinners: 2,
            max_pendulums: 3,
        }
    }
}

impl CourseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_platforms > self.max_platforms {
            return Err(ConfigError::PlatformRange {
                min: self.min_platforms,
                max: self.max_platforms,
            });
        }
        if !(self.min_platform_size > 0.0 && self.max_platform_size >= self.min_platform_size) {
            return Err(ConfigError::PlatformSizeRange {
                min: self.min_platform_size,
                max: self.max_platform_size,
            });
        }
        if !(self.min_rise >= 0.0 && self.max_rise >= self.min_rise) {
            return Err(ConfigError::RiseRange {
                min: self.min_rise,
                max: self.max_rise,
            });
        }
        if !(self.course_length > 0.0 && self.course_width > 0.0) {
            return Err(ConfigError::CourseDimensions {
                length: self.course_length,
                width: self.course_width,
            });
        }
        if !(self.obstacle_spacing > 0.0) {
            return Err(ConfigError::ObstacleSpacing(self.obstacle_spacing));
        }
        if !(0.0..=1.0).contains(&self.tilt_chance) {
            return Err(ConfigError::TiltChance(self.tilt_chance));
        }
        if !(self.forward_growth >= 0.0 && self.lateral_growth >= 0.0) {
            return Err(ConfigError::Growth {
                forward: self.forward_growth,
                lateral: self.lateral_growth,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(CourseConfig::default().validate(), Ok(()));
    }

    #[test]
    fn inverted_platform_range_is_rejected() {
        let config = CourseConfig {
            min_platforms: 8,
            max_platforms: 3,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::PlatformRange { min: 8, max: 3 })
        );
    }

    #[test]
    fn inverted_size_range_is_rejected() {
        let config = CourseConfig {
            min_platform_size: 5.0,
            max_platform_size: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PlatformSizeRange { .. })
        ));
    }

    #[test]
    fn non_positive_spacing_is_rejected() {
        let config = CourseConfig {
            obstacle_spacing: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ObstacleSpacing(0.0)));

        let config = CourseConfig {
            obstacle_spacing: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_tilt_chance_is_rejected() {
        let config = CourseConfig {
            tilt_chance: 1.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TiltChance(1.5)));
    }

    #[test]
    fn negative_growth_is_rejected() {
        let config = CourseConfig {
            lateral_growth: -0.1,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Growth { .. })));
    }

    #[test]
    fn zero_platform_min_is_allowed() {
        // A range touching zero is a degenerate-but-legal configuration;
        // generation just yields the start platform when N resolves to 0.
        let config = CourseConfig {
            min_platforms: 0,
            max_platforms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }
}
