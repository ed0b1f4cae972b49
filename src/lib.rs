//! # stardrift
//!
//! An interactive spiral-galaxy particle scene: a procedurally generated
//! point field displaced by click-driven ripple waves, over layered
//! background star fields, rendered with wgpu.
//!
//! ## Quick Start
//!
//! ```ignore
//! use stardrift::prelude::*;
//! use winit::event_loop::{ControlFlow, EventLoop};
//!
//! fn main() -> Result<(), SceneError> {
//!     let event_loop = EventLoop::new()?;
//!     event_loop.set_control_flow(ControlFlow::Poll);
//!
//!     let mut app = App::new(SceneConfig::default())?;
//!     event_loop.run_app(&mut app)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Generation
//!
//! [`GalaxyField::generate`] builds immutable position/color/scale buffers
//! for particles arranged along spiral branches; [`StarLayer::generate`]
//! scatters the background layers. Both take an injected [`rand`] RNG, so a
//! seeded run reproduces the same sky.
//!
//! ### Waves
//!
//! Clicking the ground plane seeds a [`waves::Disturbance`]: an expanding
//! ripple that displaces nearby particles vertically for three seconds. Up
//! to five disturbances are live at once, oldest evicted first. The tracker
//! exports fixed uniform slots each frame; the displacement math lives both
//! in [`waves::displacement`] (CPU reference, tested) and in `shader.wgsl`.
//!
//! ### The frame loop
//!
//! A [`Scene`] session owns the clock, camera, and tracker. Each frame it
//! produces a plain [`scene::FrameSnapshot`] the GPU layer consumes by
//! value; nothing holds references into renderer-owned objects.
//!
//! | Binding | Effect |
//! |---------|--------|
//! | drag    | orbit the camera |
//! | scroll  | zoom |
//! | click   | seed a ripple on the ground plane |
//! | Space   | toggle auto-rotate |
//! | R       | reset the camera |

pub mod app;
pub mod camera;
pub mod clock;
pub mod drift;
pub mod error;
pub mod galaxy;
pub mod gpu;
pub mod input;
pub mod scene;
pub mod starfield;
pub mod uniforms;
pub mod waves;

pub use app::App;
pub use camera::OrbitCamera;
pub use clock::Clock;
pub use error::{GpuError, ParamError, SceneError};
pub use galaxy::{GalaxyField, GalaxyParams};
pub use glam::{Mat4, Vec2, Vec3};
pub use scene::{FrameSnapshot, Scene, SceneConfig};
pub use starfield::{StarLayer, StarLayerParams, BACKGROUND_LAYERS};
pub use waves::{Disturbance, WaveSlot, WaveTracker, MAX_WAVES, WAVE_LIFETIME};

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::app::App;
    pub use crate::camera::OrbitCamera;
    pub use crate::clock::Clock;
    pub use crate::drift::DriftState;
    pub use crate::error::{GpuError, ParamError, SceneError};
    pub use crate::galaxy::{GalaxyField, GalaxyParams};
    pub use crate::scene::{FrameSnapshot, Scene, SceneConfig};
    pub use crate::starfield::{StarLayer, StarLayerParams, BACKGROUND_LAYERS};
    pub use crate::waves::{WaveSlot, WaveTracker, MAX_WAVES, WAVE_LIFETIME};
    pub use crate::{Vec2, Vec3};
}
