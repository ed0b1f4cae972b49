//! Integration tests for the public scene API.
//!
//! These drive the same path the window loop takes — generate, click,
//! advance, build uniform blocks — without a GPU device, and validate the
//! WGSL sources the render pipelines are built from.

use stardrift::galaxy::{GalaxyField, GalaxyParams};
use stardrift::scene::Scene;
use stardrift::uniforms::GalaxyUniforms;
use stardrift::waves::{displacement, vertical_offset, SENTINEL_AGE};
use stardrift::{Vec2, Vec3};

// ============================================================================
// Generation → Scene → Snapshot
// ============================================================================

#[test]
fn test_full_frame_path_without_gpu() {
    let params = GalaxyParams {
        count: 5_000,
        ..GalaxyParams::default()
    };
    let field = GalaxyField::generate_seeded(&params, 1).unwrap();
    assert_eq!(field.len(), 5_000);

    let mut scene = Scene::new(params).unwrap();
    scene.click(Vec2::ZERO, 16.0 / 9.0);
    let snapshot = scene.advance(16.0 / 9.0);

    // One live wave in slot 0, sentinels beyond.
    assert!(snapshot.waves[0].age < SENTINEL_AGE);
    assert_eq!(snapshot.waves[1].age, SENTINEL_AGE);

    // The uniform block reflects the snapshot verbatim.
    let uniforms = GalaxyUniforms::from_snapshot(&snapshot);
    assert_eq!(uniforms.time, snapshot.elapsed);
    assert_eq!(uniforms.size, snapshot.point_size);
    assert_eq!(uniforms.waves[0][3], snapshot.waves[0].age);
}

#[test]
fn test_displacement_matches_across_slots_and_reference() {
    let mut scene = Scene::new(GalaxyParams::default()).unwrap();
    scene.click(Vec2::ZERO, 16.0 / 9.0);
    let snapshot = scene.advance(1.0);

    // The start pose looks at the origin, so the wave origin is (~0, ~0):
    // summing slots equals the single-wave reference at that distance.
    let probe = Vec3::new(12.0, 0.0, 0.0);
    let origin = snapshot.waves[0].origin;
    let dist = Vec2::new(probe.x, probe.z).distance(origin);
    let expected = displacement(dist, snapshot.waves[0].age);
    let total = vertical_offset(probe, &snapshot.waves);
    assert!((total - expected).abs() < 1e-5);
}

#[test]
fn test_wave_expires_after_lifetime() {
    let mut scene = Scene::new(GalaxyParams::default()).unwrap();
    scene.click(Vec2::ZERO, 16.0 / 9.0);
    assert_eq!(scene.waves.len(), 1);

    // Prune far past the lifetime window.
    scene.waves.prune(10.0);
    assert!(scene.waves.is_empty());
}

// ============================================================================
// Shader sources
// ============================================================================

#[test]
fn test_galaxy_shader_parses() {
    naga::front::wgsl::parse_str(stardrift::gpu::GALAXY_SHADER)
        .expect("galaxy shader must be valid WGSL");
}

#[test]
fn test_starfield_shader_parses() {
    naga::front::wgsl::parse_str(stardrift::gpu::STARFIELD_SHADER)
        .expect("starfield shader must be valid WGSL");
}

#[test]
fn test_shaders_and_reference_share_wave_constants() {
    // The WGSL wave math must stay in lockstep with waves::displacement.
    // Spot-check the literals that define the wave's shape.
    let source = stardrift::gpu::GALAXY_SHADER;
    for literal in ["* 30.0", "-age * 0.8", "* 15.0", "20.0 + age * 5.0", "0.2", "4.0"] {
        assert!(
            source.contains(literal),
            "shader lost wave constant `{literal}`"
        );
    }
}
