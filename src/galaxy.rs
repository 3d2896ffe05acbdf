//! Procedural spiral galaxy generation.
//!
//! Every particle is placed on one of `branches` evenly spaced arms (chosen
//! by index), at a uniformly random distance from the center. The arm is
//! twisted by `spin` radians per unit radius, and each axis gets a signed
//! jitter whose distribution sharpens as `randomness_power` grows. Color
//! fades from `inside_color` at the core to `outside_color` at the rim.
//!
//! ```ignore
//! let params = GalaxyParams::default();
//! let cloud = galaxy::generate(&params)?;
//! assert_eq!(cloud.len(), params.count as usize);
//! ```

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::Rng;

use crate::color::Color;
use crate::error::ColorParseError;
use crate::params::GalaxyParams;
use crate::visuals::PointsMaterial;

/// One interleaved vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// A generated set of colored points.
///
/// Positions and colors are parallel and always the same length. A cloud is
/// never edited after generation; a parameter change produces a new one.
#[derive(Debug, Clone)]
pub struct PointCloud {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    material: PointsMaterial,
}

impl PointCloud {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn material(&self) -> &PointsMaterial {
        &self.material
    }

    /// Interleave positions and colors for a vertex buffer.
    pub fn vertices(&self) -> Vec<PointVertex> {
        self.positions
            .iter()
            .zip(&self.colors)
            .map(|(p, c)| PointVertex {
                position: p.to_array(),
                color: c.to_array(),
            })
            .collect()
    }
}

/// Generate a galaxy using the thread-local random source.
///
/// Each call is independent and yields a statistically similar but
/// pointwise different cloud.
pub fn generate(params: &GalaxyParams) -> Result<PointCloud, ColorParseError> {
    generate_with(params, &mut rand::thread_rng())
}

/// Generate a galaxy from a caller-supplied random source.
pub fn generate_with<R: Rng + ?Sized>(
    params: &GalaxyParams,
    rng: &mut R,
) -> Result<PointCloud, ColorParseError> {
    let (inside, outside) = params.colors()?;
    Ok(generate_with_colors(params, inside, outside, rng))
}

/// Generate a galaxy with already resolved gradient colors.
///
/// The color strings in `params` are ignored.
///
/// # Panics
///
/// Panics if `params.branches` is zero.
pub fn generate_with_colors<R: Rng + ?Sized>(
    params: &GalaxyParams,
    inside: Color,
    outside: Color,
    rng: &mut R,
) -> PointCloud {
    let count = params.count as usize;
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);

    for i in 0..params.count {
        let radius = rng.gen::<f32>() * params.radius;
        let spin_angle = radius * params.spin;
        let angle = branch_angle(i, params.branches) + spin_angle;

        let jitter_x = jitter(rng, params.randomness_power, params.randomness);
        let jitter_y = jitter(rng, params.randomness_power, params.randomness);
        let jitter_z = jitter(rng, params.randomness_power, params.randomness);

        positions.push(Vec3::new(
            angle.cos() * radius + jitter_x,
            jitter_y,
            angle.sin() * radius + jitter_z,
        ));

        let t = mix_factor(radius, params.radius);
        colors.push(inside.lerp(outside, t).to_vec3());
    }

    PointCloud {
        positions,
        colors,
        material: PointsMaterial::galaxy(params.size),
    }
}

/// Angle of the arm that particle `index` belongs to.
///
/// Arms are assigned round-robin, so `index` and `index + branches` always
/// share an arm.
#[inline]
pub fn branch_angle(index: u32, branches: u32) -> f32 {
    debug_assert!(branches >= 1, "a galaxy needs at least one branch");
    (index % branches) as f32 / branches as f32 * TAU
}

/// Signed per-axis offset: `uniform^power * ±1 * randomness`.
#[inline]
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, power: f32, randomness: f32) -> f32 {
    let magnitude = rng.gen::<f32>().powf(power);
    let sign = if rng.gen::<f32>() < 0.5 { 1.0 } else { -1.0 };
    magnitude * sign * randomness
}

/// Gradient position of a particle at `radius` in a galaxy of `max_radius`.
///
/// A zero-radius galaxy collapses to the inside color.
#[inline]
pub fn mix_factor(radius: f32, max_radius: f32) -> f32 {
    if max_radius == 0.0 {
        0.0
    } else {
        (radius / max_radius).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn test_branch_angles_evenly_spaced() {
        assert_eq!(branch_angle(0, 4), 0.0);
        assert!((branch_angle(1, 4) - TAU / 4.0).abs() < 1e-6);
        assert!((branch_angle(3, 4) - 3.0 * TAU / 4.0).abs() < 1e-6);
        assert_eq!(branch_angle(5, 4), branch_angle(1, 4));
    }

    #[test]
    fn test_single_branch_is_always_zero() {
        for i in 0..10 {
            assert_eq!(branch_angle(i, 1), 0.0);
        }
    }

    #[test]
    fn test_jitter_bounded_by_randomness() {
        let mut rng = rng();
        for _ in 0..1000 {
            let j = jitter(&mut rng, 3.0, 0.5);
            assert!(j.abs() <= 0.5);
        }
    }

    #[test]
    fn test_jitter_uses_both_signs() {
        let mut rng = rng();
        let samples: Vec<f32> = (0..200).map(|_| jitter(&mut rng, 1.0, 1.0)).collect();
        assert!(samples.iter().any(|j| *j > 0.0));
        assert!(samples.iter().any(|j| *j < 0.0));
    }

    #[test]
    fn test_higher_power_tightens_jitter() {
        let mut rng = rng();
        let mean = |rng: &mut SmallRng, power: f32| {
            (0..5000).map(|_| jitter(rng, power, 1.0).abs()).sum::<f32>() / 5000.0
        };
        let loose = mean(&mut rng, 1.0);
        let tight = mean(&mut rng, 6.0);
        assert!(tight < loose, "power 6 mean {} should be below power 1 mean {}", tight, loose);
    }

    #[test]
    fn test_mix_factor_zero_radius() {
        assert_eq!(mix_factor(0.0, 0.0), 0.0);
        assert_eq!(mix_factor(2.5, 5.0), 0.5);
    }

    #[test]
    fn test_zero_radius_galaxy_is_pure_jitter() {
        let params = GalaxyParams {
            count: 500,
            radius: 0.0,
            randomness: 0.3,
            ..Default::default()
        };
        let cloud = generate_with(&params, &mut rng()).unwrap();
        let (inside, _) = params.colors().unwrap();
        for (p, c) in cloud.positions().iter().zip(cloud.colors()) {
            assert!(p.x.abs() <= 0.3 && p.y.abs() <= 0.3 && p.z.abs() <= 0.3);
            assert!(p.is_finite());
            assert_eq!(*c, inside.to_vec3());
        }
    }

    #[test]
    fn test_vertices_interleave() {
        let params = GalaxyParams {
            count: 3,
            ..Default::default()
        };
        let cloud = generate_with(&params, &mut rng()).unwrap();
        let vertices = cloud.vertices();
        assert_eq!(vertices.len(), 3);
        for (i, v) in vertices.iter().enumerate() {
            assert_eq!(v.position, cloud.positions()[i].to_array());
            assert_eq!(v.color, cloud.colors()[i].to_array());
        }
        assert_eq!(bytemuck::cast_slice::<_, u8>(&vertices).len(), 3 * 24);
    }

    #[test]
    fn test_material_carries_size() {
        let params = GalaxyParams {
            count: 1,
            size: 0.05,
            ..Default::default()
        };
        let cloud = generate_with(&params, &mut rng()).unwrap();
        assert_eq!(cloud.material().size, 0.05);
    }
}
