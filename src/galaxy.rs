//! Procedural spiral-galaxy point field.
//!
//! [`GalaxyField::generate`] builds three parallel buffers (positions, colors,
//! scales) for `count` particles arranged along logarithmic spiral branches
//! with randomized radial jitter. The buffers are immutable after generation;
//! changing any parameter means generating a fresh field and releasing the
//! old device buffers.
//!
//! # Example
//!
//! ```ignore
//! use stardrift::galaxy::{GalaxyField, GalaxyParams};
//!
//! let params = GalaxyParams::default();
//! let field = GalaxyField::generate_seeded(&params, 42)?;
//! assert_eq!(field.len(), params.count as usize);
//! ```

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use crate::error::ParamError;

/// Parameters controlling galaxy generation.
///
/// Immutable once a field has been generated from them; regenerate the whole
/// field to apply a change.
#[derive(Debug, Clone, PartialEq)]
pub struct GalaxyParams {
    /// Total particle count.
    pub count: u32,
    /// Base rendered point size.
    pub size: f32,
    /// Spiral extent in world units.
    pub radius: f32,
    /// Number of evenly spaced spiral arms.
    pub branches: u32,
    /// Radians of twist per unit radius.
    pub spin: f32,
    /// Jitter magnitude scale.
    pub randomness: f32,
    /// Jitter concentration exponent; higher values pull jitter toward the arm.
    pub randomness_power: f32,
    /// Color at the galactic center.
    pub inside_color: Vec3,
    /// Color at the outer rim.
    pub outside_color: Vec3,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            count: 100_000,
            size: 2.5,
            radius: 120.0,
            branches: 6,
            spin: 1.2,
            randomness: 0.6,
            randomness_power: 3.0,
            // #ff6030 / #1b3984
            inside_color: Vec3::new(1.0, 0.376, 0.188),
            outside_color: Vec3::new(0.106, 0.224, 0.518),
        }
    }
}

impl GalaxyParams {
    /// Check that the parameter set can produce a field.
    ///
    /// Rejects empty fields and zero branch counts before any buffer is
    /// allocated, and non-finite values that would poison every position.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.count == 0 {
            return Err(ParamError::ZeroCount);
        }
        if self.branches == 0 {
            return Err(ParamError::ZeroBranches);
        }
        if !self.radius.is_finite() {
            return Err(ParamError::NonFinite("radius"));
        }
        if !self.spin.is_finite() {
            return Err(ParamError::NonFinite("spin"));
        }
        if !self.randomness.is_finite() {
            return Err(ParamError::NonFinite("randomness"));
        }
        if !self.randomness_power.is_finite() {
            return Err(ParamError::NonFinite("randomness_power"));
        }
        Ok(())
    }
}

/// Angular position of the spiral arm particle `index` belongs to.
///
/// Arm membership cycles deterministically through the buffer: indices
/// `0, branches, 2*branches, ...` share an arm.
#[inline]
pub fn branch_angle(index: u32, branches: u32) -> f32 {
    (index % branches) as f32 / branches as f32 * TAU
}

/// Interpolated particle color at a radial distance from the center.
///
/// Component-wise lerp from `inside_color` (radius 0) to `outside_color`
/// (full radius) in linear RGB.
#[inline]
pub fn radial_color(params: &GalaxyParams, radius: f32) -> Vec3 {
    params
        .inside_color
        .lerp(params.outside_color, radius / params.radius)
}

/// A generated point field: three parallel buffers of length `count`.
///
/// Positions and colors are flat `[x, y, z, x, y, z, ...]` layouts ready for
/// vertex-buffer upload; scales hold one f32 per particle.
#[derive(Debug, Clone)]
pub struct GalaxyField {
    /// World-space particle positions, 3 floats per particle.
    pub positions: Vec<f32>,
    /// Linear RGB colors in [0, 1], 3 floats per particle.
    pub colors: Vec<f32>,
    /// Per-particle size factors in [0, 1).
    pub scales: Vec<f32>,
}

impl GalaxyField {
    /// Generate a field from `params`, drawing jitter from `rng`.
    ///
    /// Injecting the RNG keeps generation reproducible: the same parameters
    /// and the same seeded RNG produce the same buffers bit for bit.
    pub fn generate<R: Rng>(params: &GalaxyParams, rng: &mut R) -> Result<Self, ParamError> {
        params.validate()?;

        let count = params.count as usize;
        let mut positions = Vec::with_capacity(count * 3);
        let mut colors = Vec::with_capacity(count * 3);
        let mut scales = Vec::with_capacity(count);

        for i in 0..params.count {
            let radius = rng.gen::<f32>() * params.radius;
            let spin_angle = radius * params.spin;
            let branch = branch_angle(i, params.branches);

            let mut jitter = |flatten: f32| {
                let sign = if rng.gen::<f32>() < 0.5 { 1.0 } else { -1.0 };
                rng.gen::<f32>().powf(params.randomness_power)
                    * sign
                    * params.randomness
                    * radius
                    * flatten
            };

            let ox = jitter(1.0);
            // Flattened to keep the disk thin
            let oy = jitter(0.3);
            let oz = jitter(1.0);

            positions.push((branch + spin_angle).cos() * radius + ox);
            positions.push(oy);
            positions.push((branch + spin_angle).sin() * radius + oz);

            let color = radial_color(params, radius);
            colors.push(color.x);
            colors.push(color.y);
            colors.push(color.z);

            scales.push(rng.gen::<f32>());
        }

        Ok(Self {
            positions,
            colors,
            scales,
        })
    }

    /// Generate a field from a seed, for reproducible runs and tests.
    pub fn generate_seeded(params: &GalaxyParams, seed: u64) -> Result<Self, ParamError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::generate(params, &mut rng)
    }

    /// Number of particles in the field.
    #[inline]
    pub fn len(&self) -> usize {
        self.scales.len()
    }

    /// Whether the field holds no particles. Never true for a generated field.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }
}
