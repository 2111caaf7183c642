//! Deterministic point starfield backdrop.

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Half the side length of the cube stars are scattered in.
pub const STARFIELD_EXTENT: f32 = 1000.0;

/// Scatters stars uniformly through a cube centred on the origin.
pub struct StarfieldGenerator {
    seed: u64,
    star_count: u32,
}

impl StarfieldGenerator {
    pub fn new(seed: u64, star_count: u32) -> Self {
        Self { seed, star_count }
    }

    /// Star positions. Deterministic for a given seed.
    pub fn generate(&self) -> Vec<Vec3> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        (0..self.star_count)
            .map(|_| {
                Vec3::new(
                    (rng.random::<f32>() - 0.5) * 2.0 * STARFIELD_EXTENT,
                    (rng.random::<f32>() - 0.5) * 2.0 * STARFIELD_EXTENT,
                    (rng.random::<f32>() - 0.5) * 2.0 * STARFIELD_EXTENT,
                )
            })
            .collect()
    }
}
