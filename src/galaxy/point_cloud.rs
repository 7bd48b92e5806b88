use bevy::prelude::*;
use rand::prelude::*;
use rayon::prelude::*;
use std::f32::consts::TAU;

use super::GalaxyConfig;

/// Particles generated per rayon chunk. Each chunk derives its own RNG
/// stream from the seed and chunk index, so the output for a given seed is
/// independent of how the chunks get scheduled.
const CHUNK_PARTICLES: usize = 4096;

/// Parallel position/color arrays, `3 * count` floats each. Produced
/// together and always swapped into the scene as a pair.
pub struct PointCloudBuffers {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
}

impl PointCloudBuffers {
    pub fn particle_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Generates a fresh point cloud with an OS-seeded RNG.
pub fn generate(config: &GalaxyConfig) -> PointCloudBuffers {
    generate_seeded(config, rand::rng().random())
}

/// Deterministic generation: the same `(config, seed)` pair always produces
/// identical buffers.
pub fn generate_seeded(config: &GalaxyConfig, seed: u64) -> PointCloudBuffers {
    let count = config.count as usize;
    let mut positions = vec![0.0f32; count * 3];
    let mut colors = vec![0.0f32; count * 3];

    positions
        .par_chunks_mut(CHUNK_PARTICLES * 3)
        .zip(colors.par_chunks_mut(CHUNK_PARTICLES * 3))
        .enumerate()
        .for_each(|(chunk, (pos, col))| {
            let stream = seed ^ (chunk as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
            let mut rng = StdRng::seed_from_u64(stream);
            let first = chunk * CHUNK_PARTICLES;

            for local in 0..pos.len() / 3 {
                let (p, c) = sample_particle(config, first + local, &mut rng);
                pos[local * 3..local * 3 + 3].copy_from_slice(&p.to_array());
                col[local * 3..local * 3 + 3].copy_from_slice(&c.to_array());
            }
        });

    PointCloudBuffers { positions, colors }
}

/// Maps one particle index to a position on (or jittered off) its spiral arm
/// and the radius-interpolated color.
fn sample_particle(config: &GalaxyConfig, index: usize, rng: &mut StdRng) -> (Vec3, Vec3) {
    let r = rng.random::<f32>() * config.radius;

    // the angular offset grows linearly with distance from the center,
    // which is what bends each arm into a spiral
    let spin_angle = r * config.spin;
    let branch_angle = (index as u32 % config.branches) as f32 / config.branches as f32 * TAU;
    let angle = branch_angle + spin_angle;

    let jitter = vec3(
        jitter_axis(config, rng),
        jitter_axis(config, rng),
        jitter_axis(config, rng),
    );

    // the disc itself is flat; only jitter gives it thickness
    let position = vec3(angle.cos() * r, 0.0, angle.sin() * r) + jitter;
    let color = config
        .inside_color
        .lerp(config.outside_color, r / config.radius);

    (position, color)
}

/// Signed power-law jitter: a uniform draw raised to `randomness_power`
/// keeps most particles tight on the arm while leaving a rare long tail.
/// Swapping this for e.g. a Gaussian changes the visual signature.
fn jitter_axis(config: &GalaxyConfig, rng: &mut StdRng) -> f32 {
    let sign = if rng.random::<bool>() { 1.0 } else { -1.0 };
    sign * rng.random::<f32>().powf(config.randomness_power) * config.randomness
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GalaxyConfig {
        GalaxyConfig {
            count: 1_000,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            ..default()
        }
    }

    fn particle(buffers: &PointCloudBuffers, i: usize) -> (Vec3, Vec3) {
        (
            Vec3::new(
                buffers.positions[i * 3],
                buffers.positions[i * 3 + 1],
                buffers.positions[i * 3 + 2],
            ),
            Vec3::new(
                buffers.colors[i * 3],
                buffers.colors[i * 3 + 1],
                buffers.colors[i * 3 + 2],
            ),
        )
    }

    #[test]
    fn buffers_hold_three_floats_per_particle() {
        for count in [1u32, 7, 1_000, 4_096, 5_000] {
            let config = GalaxyConfig {
                count,
                ..test_config()
            };
            let buffers = generate_seeded(&config, 11);
            assert_eq!(buffers.positions.len(), count as usize * 3);
            assert_eq!(buffers.colors.len(), count as usize * 3);
            assert_eq!(buffers.particle_count(), count as usize);
        }
    }

    #[test]
    fn fixed_seed_reproduces_identical_buffers() {
        let config = test_config();

        let a = generate_seeded(&config, 42);
        let b = generate_seeded(&config, 42);
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.colors, b.colors);

        let c = generate_seeded(&config, 43);
        assert_eq!(c.positions.len(), a.positions.len());
        assert_ne!(c.positions, a.positions);
    }

    #[test]
    fn zero_randomness_lies_exactly_on_the_spiral() {
        let config = GalaxyConfig {
            randomness: 0.0,
            ..test_config()
        };
        let buffers = generate_seeded(&config, 7);

        for i in 0..buffers.particle_count() {
            let (pos, _) = particle(&buffers, i);
            assert_eq!(pos.y, 0.0, "particle {i} has out-of-plane offset");

            let r = pos.xz().length();
            let branch_angle =
                (i as u32 % config.branches) as f32 / config.branches as f32 * TAU;
            let angle = branch_angle + r * config.spin;

            // r recovered from x/z is exact up to the cos^2+sin^2 rounding
            assert!((angle.cos() * r - pos.x).abs() < 1e-3);
            assert!((angle.sin() * r - pos.z).abs() < 1e-3);
        }
    }

    #[test]
    fn single_branch_collapses_to_one_arm() {
        let config = GalaxyConfig {
            branches: 1,
            spin: 0.0,
            randomness: 0.0,
            ..test_config()
        };
        let buffers = generate_seeded(&config, 3);

        for i in 0..buffers.particle_count() {
            let (pos, _) = particle(&buffers, i);
            assert_eq!(pos.y, 0.0);
            assert_eq!(pos.z, 0.0);
            assert!(pos.x >= 0.0);
        }
    }

    #[test]
    fn color_is_the_radius_lerp_of_the_endpoints() {
        let config = GalaxyConfig {
            count: 10_000,
            randomness: 0.0,
            ..test_config()
        };
        let buffers = generate_seeded(&config, 5);

        let mut innermost = (f32::MAX, Vec3::ZERO);
        let mut outermost = (f32::MIN, Vec3::ZERO);

        for i in 0..buffers.particle_count() {
            let (pos, color) = particle(&buffers, i);
            let t = pos.xz().length() / config.radius;
            let expected = config.inside_color.lerp(config.outside_color, t);
            assert!(
                (color - expected).length() < 1e-3,
                "particle {i}: color {color} != lerp {expected}"
            );

            if t < innermost.0 {
                innermost = (t, color);
            }
            if t > outermost.0 {
                outermost = (t, color);
            }
        }

        // with 10k uniform radius draws the extremes sit hard against the
        // endpoints, so the endpoint colors must be reproduced there
        assert!(innermost.0 < 0.01);
        assert!((innermost.1 - config.inside_color).length() < 0.02);
        assert!(outermost.0 > 0.99);
        assert!((outermost.1 - config.outside_color).length() < 0.02);
    }

    #[test]
    fn two_branch_scenario_splits_particles_across_the_axis() {
        let config = GalaxyConfig {
            count: 4,
            branches: 2,
            spin: 0.0,
            randomness: 0.0,
            radius: 10.0,
            ..test_config()
        };
        let buffers = generate_seeded(&config, 19);

        for i in [0usize, 2] {
            let (pos, _) = particle(&buffers, i);
            // branch angle 0: positive x axis
            assert!(pos.x >= 0.0);
            assert!(pos.z.abs() < 1e-5);
        }
        for i in [1usize, 3] {
            let (pos, _) = particle(&buffers, i);
            // branch angle pi: negative x axis
            assert!(pos.x <= 0.0);
            assert!(pos.z.abs() < 1e-5);
        }
    }
}
