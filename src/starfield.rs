//! Layered background star fields.
//!
//! Three concentric layers of uniformly scattered points, each with its own
//! count, spread, point size, tint, and slow rotation. Layers are generated
//! once and rotated per frame by [`crate::drift::DriftState`].

use glam::Vec3;
use rand::Rng;

use crate::error::ParamError;

/// Parameters for one star layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarLayerParams {
    /// Number of stars in the layer.
    pub count: u32,
    /// Cube spread: coordinates fall in `[-extent/2, extent/2]` per axis.
    pub extent: f32,
    /// Rendered point size.
    pub size: f32,
    /// Layer tint in linear RGB.
    pub color: Vec3,
    /// Yaw rotation speed in radians per second.
    pub spin_y: f32,
    /// Pitch rotation speed in radians per second.
    pub spin_x: f32,
}

impl StarLayerParams {
    /// Check that the layer can be generated.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.count == 0 {
            return Err(ParamError::ZeroCount);
        }
        if !self.extent.is_finite() {
            return Err(ParamError::NonFinite("extent"));
        }
        Ok(())
    }
}

/// The three background layers: a far white shell, a mid pale-blue shell
/// drifting the opposite way, and a near warm shell.
pub const BACKGROUND_LAYERS: [StarLayerParams; 3] = [
    StarLayerParams {
        count: 5_000,
        extent: 2_000.0,
        size: 1.5,
        color: Vec3::new(1.0, 1.0, 1.0),
        spin_y: 0.005,
        spin_x: 0.003,
    },
    StarLayerParams {
        count: 3_000,
        extent: 1_500.0,
        size: 1.0,
        color: Vec3::new(0.667, 0.8, 1.0),
        spin_y: -0.008,
        spin_x: 0.004,
    },
    StarLayerParams {
        count: 2_000,
        extent: 1_000.0,
        size: 0.7,
        color: Vec3::new(1.0, 0.867, 0.667),
        spin_y: 0.01,
        spin_x: 0.0,
    },
];

/// A generated star layer: one flat position buffer, 3 floats per star.
#[derive(Debug, Clone)]
pub struct StarLayer {
    /// World-space star positions.
    pub positions: Vec<f32>,
}

impl StarLayer {
    /// Scatter `params.count` stars uniformly through the layer's cube.
    pub fn generate<R: Rng>(params: &StarLayerParams, rng: &mut R) -> Result<Self, ParamError> {
        params.validate()?;

        let mut positions = Vec::with_capacity(params.count as usize * 3);
        for _ in 0..params.count {
            positions.push((rng.gen::<f32>() - 0.5) * params.extent);
            positions.push((rng.gen::<f32>() - 0.5) * params.extent);
            positions.push((rng.gen::<f32>() - 0.5) * params.extent);
        }
        Ok(Self { positions })
    }

    /// Number of stars in the layer.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    /// Whether the layer holds no stars. Never true for a generated layer.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_layer_counts_and_bounds() {
        let mut rng = SmallRng::seed_from_u64(3);
        for params in &BACKGROUND_LAYERS {
            let layer = StarLayer::generate(params, &mut rng).unwrap();
            assert_eq!(layer.len(), params.count as usize);
            let half = params.extent / 2.0;
            assert!(layer.positions.iter().all(|p| p.abs() <= half));
        }
    }

    #[test]
    fn test_layer_validation() {
        let params = StarLayerParams {
            count: 0,
            ..BACKGROUND_LAYERS[0]
        };
        assert_eq!(params.validate(), Err(ParamError::ZeroCount));
    }

    #[test]
    fn test_middle_layer_counter_rotates() {
        assert!(BACKGROUND_LAYERS[1].spin_y < 0.0);
        assert!(BACKGROUND_LAYERS[0].spin_y > 0.0);
        assert!(BACKGROUND_LAYERS[2].spin_y > 0.0);
    }
}
