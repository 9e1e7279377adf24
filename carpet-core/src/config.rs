use anyhow::{Result, ensure};
use rand::SeedableRng;
use rand_pcg::Pcg64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Side of the square drawing surface in pixels.
    pub win_size: usize,
    /// Loop iterations performed per repaint.
    pub steps_per_frame: usize,
    /// Fixed generator seed; `None` seeds from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            win_size: 1000,
            steps_per_frame: 500,
            seed: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.win_size > 0, "win_size must be positive");
        ensure!(self.steps_per_frame > 0, "steps_per_frame must be positive");
        Ok(())
    }

    /// Builds the random source for a new run.
    pub fn rng(&self) -> Pcg64 {
        match self.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_rng(&mut rand::rng()),
        }
    }
}
