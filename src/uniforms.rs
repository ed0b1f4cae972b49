//! GPU uniform layouts.
//!
//! `#[repr(C)]` Pod structs mirroring the WGSL uniform blocks in
//! `shader.wgsl` and `starfield.wgsl`, padded to std140-compatible offsets.
//! Each is rebuilt from the frame's [`FrameSnapshot`] and written to its
//! uniform buffer once per frame.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::scene::FrameSnapshot;
use crate::starfield::StarLayerParams;
use crate::waves::MAX_WAVES;

/// Core sprite tint (#ffaa44) and opacity.
const CORE_COLOR: [f32; 4] = [1.0, 0.667, 0.267, 0.6];
/// Core sprite half-extent in world units.
const CORE_SIZE: f32 = 8.0;

/// Uniform block for the galaxy point pass. Matches `shader.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct GalaxyUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// Wave slots as (origin.x, 0, origin.z, age).
    pub waves: [[f32; 4]; MAX_WAVES],
    pub time: f32,
    pub size: f32,
    pub _pad: [f32; 2],
}

impl GalaxyUniforms {
    /// Build the block from a frame snapshot.
    pub fn from_snapshot(snapshot: &FrameSnapshot) -> Self {
        let mut waves = [[0.0; 4]; MAX_WAVES];
        for (out, slot) in waves.iter_mut().zip(snapshot.waves.iter()) {
            *out = [slot.origin.x, 0.0, slot.origin.y, slot.age];
        }
        Self {
            view: snapshot.view.to_cols_array_2d(),
            proj: snapshot.proj.to_cols_array_2d(),
            model: snapshot.galaxy_model.to_cols_array_2d(),
            waves,
            time: snapshot.elapsed,
            size: snapshot.point_size,
            _pad: [0.0; 2],
        }
    }
}

/// Uniform block for star layers and the core sprite. Matches `starfield.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LayerUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// Tint and opacity.
    pub color: [f32; 4],
    /// Point half-extent in world units.
    pub size: f32,
    pub _pad: [f32; 3],
}

impl LayerUniforms {
    /// Block for star layer `index`.
    pub fn star_layer(snapshot: &FrameSnapshot, index: usize, params: &StarLayerParams) -> Self {
        Self {
            view: snapshot.view.to_cols_array_2d(),
            proj: snapshot.proj.to_cols_array_2d(),
            model: snapshot.star_models[index].to_cols_array_2d(),
            color: color_with_alpha(params.color, 0.8),
            size: params.size * 0.5,
            _pad: [0.0; 3],
        }
    }

    /// Block for the central core sprite.
    pub fn core(snapshot: &FrameSnapshot) -> Self {
        Self {
            view: snapshot.view.to_cols_array_2d(),
            proj: snapshot.proj.to_cols_array_2d(),
            model: snapshot.core_model.to_cols_array_2d(),
            color: CORE_COLOR,
            size: CORE_SIZE,
            _pad: [0.0; 3],
        }
    }
}

fn color_with_alpha(color: Vec3, alpha: f32) -> [f32; 4] {
    [color.x, color.y, color.z, alpha]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::GalaxyParams;
    use crate::scene::Scene;
    use crate::starfield::BACKGROUND_LAYERS;
    use crate::waves::{SENTINEL_AGE, SENTINEL_ORIGIN};

    #[test]
    fn test_uniform_sizes_match_wgsl_layout() {
        // view + proj + model + 5 wave vec4s + time/size/pad
        assert_eq!(std::mem::size_of::<GalaxyUniforms>(), 64 * 3 + 80 + 16);
        // view + proj + model + color + size/pad
        assert_eq!(std::mem::size_of::<LayerUniforms>(), 64 * 3 + 16 + 16);
    }

    #[test]
    fn test_empty_slots_export_sentinels() {
        let mut scene = Scene::new(GalaxyParams::default()).unwrap();
        let snapshot = scene.advance(1.0);
        let uniforms = GalaxyUniforms::from_snapshot(&snapshot);

        for wave in &uniforms.waves {
            assert_eq!(wave[0], SENTINEL_ORIGIN);
            assert_eq!(wave[2], SENTINEL_ORIGIN);
            assert_eq!(wave[3], SENTINEL_AGE);
        }
    }

    #[test]
    fn test_star_layer_carries_tint_and_size() {
        let mut scene = Scene::new(GalaxyParams::default()).unwrap();
        let snapshot = scene.advance(1.0);
        let uniforms = LayerUniforms::star_layer(&snapshot, 1, &BACKGROUND_LAYERS[1]);

        assert_eq!(uniforms.color[3], 0.8);
        assert_eq!(uniforms.size, BACKGROUND_LAYERS[1].size * 0.5);
    }
}
