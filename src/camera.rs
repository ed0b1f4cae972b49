//! Orbit camera and ground-plane picking.
//!
//! The camera orbits a target point with damped drag input, clamped zoom,
//! and an optional auto-rotate gait. It also converts pointer positions into
//! world-space rays so clicks can be resolved against the ground plane; a
//! click whose ray misses the plane resolves to `None` and is ignored.

use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::TAU;

/// Where the camera starts and returns to on reset.
const START_POSITION: Vec3 = Vec3::new(0.0, 80.0, 180.0);
/// Vertical field of view in degrees.
const FOV_DEGREES: f32 = 75.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 2000.0;
/// Zoom clamp range in world units.
const MIN_DISTANCE: f32 = 50.0;
const MAX_DISTANCE: f32 = 500.0;
/// Radians of orbit per pixel of drag.
const DRAG_SENSITIVITY: f32 = 0.005;
/// World units of zoom per scroll step.
const ZOOM_STEP: f32 = 10.0;
/// Fraction of drag velocity shed per 60 Hz frame.
const DAMPING: f32 = 0.05;
/// Pitch clamp keeps the camera off the poles.
const PITCH_LIMIT: f32 = 1.5;

/// Orbit camera for viewing the scene.
#[derive(Debug)]
pub struct OrbitCamera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Whether the camera slowly orbits on its own.
    pub auto_rotate: bool,
    /// Auto-rotate gait; 2.0 is one revolution per 30 seconds.
    pub auto_rotate_speed: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
}

impl OrbitCamera {
    /// Create a camera at the start pose, auto-rotating.
    pub fn new() -> Self {
        let distance = START_POSITION.length();
        Self {
            yaw: 0.0,
            pitch: (START_POSITION.y / distance).asin(),
            distance,
            target: Vec3::ZERO,
            auto_rotate: true,
            auto_rotate_speed: 0.5,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
        }
    }

    /// Feed a drag delta in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw_velocity -= dx * DRAG_SENSITIVITY;
        self.pitch_velocity += dy * DRAG_SENSITIVITY;
    }

    /// Zoom by a scroll delta, clamped to the orbit range.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll * ZOOM_STEP).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Advance damping and auto-rotation by one frame.
    pub fn update(&mut self, dt: f32) {
        if self.auto_rotate {
            self.yaw += self.auto_rotate_speed * TAU / 60.0 * dt;
        }
        self.yaw += self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let decay = (1.0 - DAMPING).powf(dt * 60.0);
        self.yaw_velocity *= decay;
        self.pitch_velocity *= decay;
    }

    /// Toggle the auto-rotate gait.
    pub fn toggle_auto_rotate(&mut self) {
        self.auto_rotate = !self.auto_rotate;
    }

    /// Return to the start pose, shedding any drag momentum.
    pub fn reset(&mut self) {
        let auto_rotate = self.auto_rotate;
        *self = Self::new();
        self.auto_rotate = auto_rotate;
    }

    /// The camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// View matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Projection matrix for the given aspect ratio.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(FOV_DEGREES.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }

    /// Combined view-projection matrix for the given aspect ratio.
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view_matrix()
    }

    /// World-space ray through a pointer position in NDC.
    ///
    /// Returns `(origin, direction)` with a normalized direction.
    pub fn screen_ray(&self, ndc: Vec2, aspect: f32) -> (Vec3, Vec3) {
        let inv = self.view_proj(aspect).inverse();
        let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        (near, (far - near).normalize())
    }

    /// Resolve a pointer position against the ground plane (y = 0).
    ///
    /// `None` when the ray is parallel to the plane or points away from it.
    pub fn pick_ground(&self, ndc: Vec2, aspect: f32) -> Option<Vec3> {
        let (origin, dir) = self.screen_ray(ndc, aspect);
        if dir.y.abs() < 1e-6 {
            return None;
        }
        let t = -origin.y / dir.y;
        if t <= 0.0 {
            return None;
        }
        Some(origin + dir * t)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_pose_matches_position() {
        let camera = OrbitCamera::new();
        let pos = camera.position();
        assert!((pos - START_POSITION).length() < 1e-3);
    }

    #[test]
    fn test_zoom_clamps() {
        let mut camera = OrbitCamera::new();
        camera.zoom(1_000.0);
        assert_eq!(camera.distance, MIN_DISTANCE);
        camera.zoom(-1_000.0);
        assert_eq!(camera.distance, MAX_DISTANCE);
    }

    #[test]
    fn test_reset_restores_pose_and_momentum() {
        let mut camera = OrbitCamera::new();
        camera.orbit(100.0, -40.0);
        camera.zoom(5.0);
        camera.update(0.016);
        camera.reset();

        let fresh = OrbitCamera::new();
        assert_eq!(camera.yaw, fresh.yaw);
        assert_eq!(camera.pitch, fresh.pitch);
        assert_eq!(camera.distance, fresh.distance);
        let before = camera.yaw;
        camera.auto_rotate = false;
        camera.update(1.0);
        assert!((camera.yaw - before).abs() < 1e-6, "momentum survived reset");
    }

    #[test]
    fn test_auto_rotate_rate() {
        let mut camera = OrbitCamera::new();
        camera.auto_rotate = true;
        camera.auto_rotate_speed = 2.0;
        let start = camera.yaw;
        // One revolution per 30 seconds at speed 2.0.
        for _ in 0..30 {
            camera.update(1.0);
        }
        assert!((camera.yaw - start - TAU).abs() < 1e-3);
    }

    #[test]
    fn test_center_click_hits_target_under_camera() {
        let camera = OrbitCamera::new();
        // The camera looks at the origin, which lies on the ground plane.
        let hit = camera.pick_ground(Vec2::ZERO, 16.0 / 9.0).expect("hit");
        assert!(hit.length() < 0.1, "expected origin, got {hit}");
    }

    #[test]
    fn test_sky_click_misses_ground() {
        let camera = OrbitCamera::new();
        // Top of the screen points above the horizon from the start pose.
        assert_eq!(camera.pick_ground(Vec2::new(0.0, 1.0), 16.0 / 9.0), None);
    }

    #[test]
    fn test_level_camera_misses_ground() {
        let mut camera = OrbitCamera::new();
        camera.pitch = 0.0;
        assert_eq!(camera.pick_ground(Vec2::ZERO, 1.0), None);
    }
}
