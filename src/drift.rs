//! Decorative per-frame motion derived from the scene clock.
//!
//! Everything here is a pure function of elapsed time: the galaxy's slow spin
//! and wobble, the core's tumble, the counter-orbiting light pair, and the
//! star-layer rotations. The frame loop derives a fresh [`DriftState`] each
//! frame instead of accumulating rotations, so drift never diverges from the
//! clock.

use glam::Vec3;
use std::f32::consts::PI;

use crate::starfield::BACKGROUND_LAYERS;

/// Galaxy yaw rate in radians per second.
const GALAXY_SPIN: f32 = 0.03;
/// Wobble oscillation rate.
const WOBBLE_RATE: f32 = 0.1;
/// Peak wobble tilt in radians.
const WOBBLE_TILT: f32 = 0.02;
/// Core tumble rates (yaw, pitch).
const CORE_SPIN: (f32, f32) = (0.2, 0.15);
/// Orbit radius of the decorative light pair.
const LIGHT_RADIUS: f32 = 80.0;
/// Angular speed of the light orbit in radians per second.
const LIGHT_SPEED: f32 = 0.5;

/// Rotation angles and light positions for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftState {
    /// Galaxy rotation about the vertical axis.
    pub galaxy_yaw: f32,
    /// Galaxy wobble tilt about the x axis.
    pub galaxy_pitch: f32,
    /// Core rotation about the vertical axis.
    pub core_yaw: f32,
    /// Core rotation about the x axis.
    pub core_pitch: f32,
    /// The two decorative lights, orbiting half a turn apart.
    pub light_positions: [Vec3; 2],
    /// Per-layer star rotations as (yaw, pitch).
    pub star_angles: [(f32, f32); 3],
}

impl DriftState {
    /// Derive the drift state at an elapsed-time reading.
    pub fn at(elapsed: f32) -> Self {
        let light_angle = elapsed * LIGHT_SPEED;
        let light = |angle: f32| {
            Vec3::new(angle.cos() * LIGHT_RADIUS, 0.0, angle.sin() * LIGHT_RADIUS)
        };

        let mut star_angles = [(0.0, 0.0); 3];
        for (angles, layer) in star_angles.iter_mut().zip(BACKGROUND_LAYERS.iter()) {
            *angles = (elapsed * layer.spin_y, elapsed * layer.spin_x);
        }

        Self {
            galaxy_yaw: elapsed * GALAXY_SPIN,
            galaxy_pitch: (elapsed * WOBBLE_RATE).sin() * WOBBLE_TILT,
            core_yaw: elapsed * CORE_SPIN.0,
            core_pitch: elapsed * CORE_SPIN.1,
            light_positions: [light(light_angle), light(light_angle + PI)],
            star_angles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drift_starts_at_rest() {
        let drift = DriftState::at(0.0);
        assert_eq!(drift.galaxy_yaw, 0.0);
        assert_eq!(drift.galaxy_pitch, 0.0);
        assert_eq!(drift.core_yaw, 0.0);
        assert_eq!(drift.star_angles, [(0.0, 0.0); 3]);
    }

    #[test]
    fn test_galaxy_rates() {
        let drift = DriftState::at(10.0);
        assert!((drift.galaxy_yaw - 0.3).abs() < 1e-6);
        assert!((drift.galaxy_pitch - (1.0_f32).sin() * 0.02).abs() < 1e-6);
        assert!((drift.core_yaw - 2.0).abs() < 1e-6);
        assert!((drift.core_pitch - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_lights_orbit_opposed() {
        let drift = DriftState::at(2.4);
        let [a, b] = drift.light_positions;
        // Half a turn apart on the same circle.
        assert!((a + b).length() < 1e-3);
        assert!((a.length() - 80.0).abs() < 1e-3);
        assert_eq!(a.y, 0.0);
    }

    #[test]
    fn test_star_angles_follow_layer_speeds() {
        let drift = DriftState::at(100.0);
        assert!((drift.star_angles[0].0 - 0.5).abs() < 1e-6);
        assert!((drift.star_angles[1].0 + 0.8).abs() < 1e-6);
        assert!((drift.star_angles[2].1 - 0.0).abs() < 1e-6);
    }
}
