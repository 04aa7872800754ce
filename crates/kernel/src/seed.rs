use lifespace_common::{Bounds, LifeError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::World;

/// Parameters for a random seeding pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    pub count: usize,
    pub x_min: i64,
    pub x_max: i64,
    pub y_min: i64,
    pub y_max: i64,
    /// RNG seed. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            count: 100,
            x_min: -100,
            x_max: 200,
            y_min: -100,
            y_max: 200,
            seed: None,
        }
    }
}

impl SeedConfig {
    /// The validated seeding rectangle.
    pub fn bounds(&self) -> Result<Bounds, LifeError> {
        Bounds::new(self.x_min, self.x_max, self.y_min, self.y_max)
    }
}

/// Populates worlds with uniformly random cells from an owned RNG.
///
/// The RNG is injected so tests and replays can use a fixed seed.
#[derive(Debug, Clone)]
pub struct Seeder<R = StdRng> {
    rng: R,
}

impl Seeder<StdRng> {
    /// Deterministic seeder: the same seed always draws the same cells.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Seeder drawing its RNG seed from the OS.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Build the seeder described by `config`.
    pub fn from_config(config: &SeedConfig) -> Self {
        match config.seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> Seeder<R> {
    /// Wrap a caller-supplied RNG.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Insert `count` random cells with x in `[x_min, x_max)` and y in
    /// `[y_min, y_max)`. Repeated draws collapse into one live cell.
    pub fn populate(
        &mut self,
        world: &mut World,
        count: usize,
        x_min: i64,
        x_max: i64,
        y_min: i64,
        y_max: i64,
    ) -> Result<(), LifeError> {
        let bounds = Bounds::new(x_min, x_max, y_min, y_max)?;
        world.seed_random(&mut self.rng, count, bounds);
        Ok(())
    }

    /// Populate `world` as described by `config`, ignoring its `seed` field.
    pub fn populate_with(
        &mut self,
        world: &mut World,
        config: &SeedConfig,
    ) -> Result<(), LifeError> {
        world.seed_random(&mut self.rng, config.count, config.bounds()?);
        Ok(())
    }
}
