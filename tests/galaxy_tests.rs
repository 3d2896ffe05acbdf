//! Integration tests for galaxy generation.
//!
//! These tests run the generator through the public API with seeded random
//! sources and check the geometric and color properties of the cloud.

use galaxy::galaxy::{branch_angle, mix_factor};
use galaxy::{generate, generate_with, BlendMode, Color, GalaxyParams};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn seeded(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

fn params(count: u32) -> GalaxyParams {
    GalaxyParams {
        count,
        ..Default::default()
    }
}

// ============================================================================
// Counts
// ============================================================================

#[test]
fn test_cloud_has_count_positions_and_colors() {
    for count in [1, 2, 3, 100, 12_345] {
        let cloud = generate_with(&params(count), &mut seeded(1)).unwrap();
        assert_eq!(cloud.len(), count as usize);
        assert_eq!(cloud.positions().len(), count as usize);
        assert_eq!(cloud.colors().len(), count as usize);
    }
}

#[test]
fn test_default_galaxy_via_thread_rng() {
    let cloud = generate(&GalaxyParams::default()).unwrap();
    assert_eq!(cloud.len(), 100_000);
}

#[test]
fn test_empty_galaxy() {
    let cloud = generate_with(&params(0), &mut seeded(2)).unwrap();
    assert!(cloud.is_empty());
    assert!(cloud.vertices().is_empty());
}

#[test]
fn test_single_particle() {
    let cloud = generate_with(&params(1), &mut seeded(3)).unwrap();
    assert_eq!(cloud.len(), 1);
    assert!(cloud.positions()[0].is_finite());
    assert!(cloud.colors()[0].is_finite());
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_positions_stay_within_radius_plus_jitter() {
    let p = GalaxyParams {
        count: 20_000,
        radius: 4.0,
        randomness: 0.5,
        ..Default::default()
    };
    let cloud = generate_with(&p, &mut seeded(4)).unwrap();
    // Horizontal jitter adds at most `randomness` per axis
    let limit = p.radius + p.randomness * std::f32::consts::SQRT_2 + 1e-4;
    for pos in cloud.positions() {
        let planar = (pos.x * pos.x + pos.z * pos.z).sqrt();
        assert!(planar <= limit, "planar distance {} exceeds {}", planar, limit);
        assert!(pos.y.abs() <= p.randomness);
    }
}

#[test]
fn test_no_randomness_gives_a_flat_clean_spiral() {
    let p = GalaxyParams {
        count: 5_000,
        randomness: 0.0,
        randomness_power: 1.0,
        ..Default::default()
    };
    let cloud = generate_with(&p, &mut seeded(5)).unwrap();
    for (i, pos) in cloud.positions().iter().enumerate() {
        assert_eq!(pos.y, 0.0);

        // Without jitter each point sits exactly on its twisted arm
        let radius = (pos.x * pos.x + pos.z * pos.z).sqrt();
        assert!(radius <= p.radius + 1e-4);
        let expected = branch_angle(i as u32, p.branches) + radius * p.spin;
        let angle = pos.z.atan2(pos.x);
        let diff = (angle - expected).rem_euclid(std::f32::consts::TAU);
        let diff = diff.min(std::f32::consts::TAU - diff);
        // Angle is ill-defined right at the core
        if radius > 1e-2 {
            assert!(diff < 1e-2, "point {} off its arm by {} rad", i, diff);
        }
    }
}

#[test]
fn test_branch_assignment_repeats_every_branches() {
    for branches in 1..=8 {
        for i in 0..64 {
            assert_eq!(branch_angle(i, branches), branch_angle(i + branches, branches));
        }
    }
}

#[test]
fn test_same_seed_same_cloud() {
    let p = params(1_000);
    let a = generate_with(&p, &mut seeded(6)).unwrap();
    let b = generate_with(&p, &mut seeded(6)).unwrap();
    let c = generate_with(&p, &mut seeded(7)).unwrap();
    assert_eq!(a.positions(), b.positions());
    assert_ne!(a.positions(), c.positions());
}

// ============================================================================
// Colors
// ============================================================================

#[test]
fn test_mix_factor_in_unit_range() {
    for i in 0..=100 {
        let r = i as f32 * 0.05;
        let t = mix_factor(r, 5.0);
        assert!((0.0..=1.0).contains(&t));
    }
    assert_eq!(mix_factor(1.0, 0.0), 0.0);
}

#[test]
fn test_colors_lie_between_endpoints() {
    let p = params(5_000);
    let (inside, outside) = p.colors().unwrap();
    let cloud = generate_with(&p, &mut seeded(8)).unwrap();
    let lo = inside.to_vec3().min(outside.to_vec3()) - 1e-5;
    let hi = inside.to_vec3().max(outside.to_vec3()) + 1e-5;
    for c in cloud.colors() {
        assert!(c.cmpge(lo).all() && c.cmple(hi).all(), "color {:?} outside gradient", c);
    }
}

#[test]
fn test_equal_colors_give_uniform_cloud() {
    let p = GalaxyParams {
        count: 2_000,
        inside_color: "#44aa88".into(),
        outside_color: "#44aa88".into(),
        ..Default::default()
    };
    let expected = "#44aa88".parse::<Color>().unwrap().to_vec3();
    let cloud = generate_with(&p, &mut seeded(9)).unwrap();
    assert!(cloud.colors().iter().all(|c| *c == expected));
}

#[test]
fn test_invalid_color_is_an_error() {
    let p = GalaxyParams {
        inside_color: "#12345".into(),
        ..Default::default()
    };
    let err = generate_with(&p, &mut seeded(10)).unwrap_err();
    assert_eq!(err.input, "#12345");
}

// ============================================================================
// Material
// ============================================================================

#[test]
fn test_cloud_material_is_glowing_points() {
    let p = GalaxyParams {
        count: 10,
        size: 0.03,
        ..Default::default()
    };
    let material = *generate_with(&p, &mut seeded(11)).unwrap().material();
    assert_eq!(material.size, 0.03);
    assert!(material.size_attenuation);
    assert!(material.vertex_colors);
    assert!(!material.depth_write);
    assert_eq!(material.blend, BlendMode::Additive);
}
