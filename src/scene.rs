//! The owned scene session.
//!
//! One [`Scene`] holds every piece of mutable state: the frame clock, the
//! orbit camera, the disturbance tracker, and the generation parameters. It
//! is created on startup and dropped on teardown; nothing lives at module
//! scope.
//!
//! Each frame [`Scene::advance`] produces a [`FrameSnapshot`] — a plain-data
//! view of everything the renderer needs. The GPU layer consumes the snapshot
//! by value and holds no references back into the session, so scene state and
//! renderer state cannot drift apart mid-frame.

use glam::{EulerRot, Mat4, Vec2, Vec3};

use crate::camera::OrbitCamera;
use crate::clock::Clock;
use crate::drift::DriftState;
use crate::error::ParamError;
use crate::galaxy::GalaxyParams;
use crate::waves::{WaveSlot, WaveTracker, MAX_WAVES};

/// Startup configuration for a scene session.
#[derive(Debug, Clone, Default)]
pub struct SceneConfig {
    /// Galaxy generation parameters.
    pub galaxy: GalaxyParams,
    /// Generation seed. `None` scatters differently every run.
    pub seed: Option<u64>,
}

/// Plain-data uniform snapshot for one frame.
///
/// Everything the shaders consume, already resolved: no renderer-owned
/// objects, no shared mutability.
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot {
    /// Elapsed scene time in seconds.
    pub elapsed: f32,
    /// Camera view matrix.
    pub view: Mat4,
    /// Camera projection matrix.
    pub proj: Mat4,
    /// Galaxy model rotation (spin plus wobble).
    pub galaxy_model: Mat4,
    /// Base point size for galaxy particles.
    pub point_size: f32,
    /// The five wave uniform slots, sentinel-filled past the live count.
    pub waves: [WaveSlot; MAX_WAVES],
    /// Per-layer star field rotations.
    pub star_models: [Mat4; 3],
    /// Core sprite rotation.
    pub core_model: Mat4,
    /// Decorative orbiting light positions, for shading collaborators.
    pub light_positions: [Vec3; 2],
}

/// All mutable scene state, created on startup and torn down once.
#[derive(Debug)]
pub struct Scene {
    /// Galaxy generation parameters the current field was built from.
    pub params: GalaxyParams,
    /// The frame clock shared by every time consumer.
    pub clock: Clock,
    /// The orbit camera.
    pub camera: OrbitCamera,
    /// Active click disturbances.
    pub waves: WaveTracker,
}

impl Scene {
    /// Create a session for the given galaxy parameters.
    pub fn new(params: GalaxyParams) -> Result<Self, ParamError> {
        params.validate()?;
        Ok(Self {
            params,
            clock: Clock::new(),
            camera: OrbitCamera::new(),
            waves: WaveTracker::new(),
        })
    }

    /// Resolve a click against the ground plane and seed a disturbance.
    ///
    /// Clicks whose ray misses the plane are silently ignored.
    pub fn click(&mut self, ndc: Vec2, aspect: f32) {
        if let Some(hit) = self.camera.pick_ground(ndc, aspect) {
            self.waves.add(Vec2::new(hit.x, hit.z), self.clock.elapsed());
        }
    }

    /// Advance the session by one frame and snapshot the uniforms.
    ///
    /// Reads the clock once, prunes expired disturbances, steps the camera,
    /// and derives all decorative rotation from the new elapsed time.
    pub fn advance(&mut self, aspect: f32) -> FrameSnapshot {
        let (elapsed, dt) = self.clock.update();
        self.camera.update(dt);
        self.waves.prune(elapsed);

        let drift = DriftState::at(elapsed);
        let mut star_models = [Mat4::IDENTITY; 3];
        for (model, (yaw, pitch)) in star_models.iter_mut().zip(drift.star_angles) {
            *model = Mat4::from_euler(EulerRot::XYZ, pitch, yaw, 0.0);
        }

        FrameSnapshot {
            elapsed,
            view: self.camera.view_matrix(),
            proj: self.camera.projection(aspect),
            galaxy_model: Mat4::from_euler(
                EulerRot::XYZ,
                drift.galaxy_pitch,
                drift.galaxy_yaw,
                0.0,
            ),
            point_size: self.params.size,
            waves: self.waves.slots(elapsed),
            star_models,
            core_model: Mat4::from_euler(EulerRot::XYZ, drift.core_pitch, drift.core_yaw, 0.0),
            light_positions: drift.light_positions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waves::SENTINEL_AGE;

    #[test]
    fn test_scene_rejects_invalid_params() {
        let params = GalaxyParams {
            count: 0,
            ..GalaxyParams::default()
        };
        assert!(Scene::new(params).is_err());
    }

    #[test]
    fn test_click_on_ground_seeds_wave() {
        let mut scene = Scene::new(GalaxyParams::default()).unwrap();
        // The start pose looks at the origin; a center click must land.
        scene.click(Vec2::ZERO, 16.0 / 9.0);
        assert_eq!(scene.waves.len(), 1);
    }

    #[test]
    fn test_sky_click_is_ignored() {
        let mut scene = Scene::new(GalaxyParams::default()).unwrap();
        scene.click(Vec2::new(0.0, 1.0), 16.0 / 9.0);
        assert!(scene.waves.is_empty());
    }

    #[test]
    fn test_advance_snapshot_shape() {
        let mut scene = Scene::new(GalaxyParams::default()).unwrap();
        let snapshot = scene.advance(16.0 / 9.0);

        assert_eq!(scene.clock.frame(), 1);
        assert_eq!(snapshot.point_size, scene.params.size);
        // No clicks yet: every slot is a sentinel.
        assert!(snapshot.waves.iter().all(|s| s.age == SENTINEL_AGE));
        let view_proj = snapshot.proj * snapshot.view;
        assert!(view_proj.to_cols_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_advance_exports_live_wave_age() {
        let mut scene = Scene::new(GalaxyParams::default()).unwrap();
        scene.click(Vec2::ZERO, 1.0);
        let snapshot = scene.advance(1.0);

        // The click happened at clock zero, so its age equals elapsed time.
        assert!((snapshot.waves[0].age - snapshot.elapsed).abs() < 1e-3);
        assert!(snapshot.waves[0].age < 1.0);
    }
}
