//! Seeded randomness
//!
//! Every draw in the generator goes through a caller-owned RNG handle.
//! Nothing here touches process-wide random state, so two generations
//! running side by side never observe each other's draws.

use rand::distributions::Distribution;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use statrs::distribution::Normal;
use std::ops::Range;

use super::error::{GeneratorError, GeneratorResult};

/// RNG used for all synthetic data.
pub type SeededRng = ChaCha8Rng;

/// Create the RNG for a seed.
pub fn seeded_rng(seed: u64) -> SeededRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Build a Gaussian sampler, mapping parameter errors into generator errors.
pub fn normal(mean: f64, std_dev: f64) -> GeneratorResult<Normal> {
    Normal::new(mean, std_dev).map_err(|e| {
        GeneratorError::invalid(
            "normal",
            format!("mean={} std_dev={}: {}", mean, std_dev, e),
        )
    })
}

/// Draw `n` Gaussian samples.
pub fn normal_samples<R: Rng + ?Sized>(
    rng: &mut R,
    mean: f64,
    std_dev: f64,
    n: usize,
) -> GeneratorResult<Vec<f64>> {
    let dist = normal(mean, std_dev)?;
    Ok((0..n).map(|_| dist.sample(rng)).collect())
}

/// Pick one entry of a fixed, non-empty category set.
pub fn choose<'a, R: Rng + ?Sized>(rng: &mut R, options: &[&'a str]) -> &'a str {
    options[rng.gen_range(0..options.len())]
}

/// Uniform real draw rounded to two decimals.
pub fn uniform_cents<R: Rng + ?Sized>(rng: &mut R, range: Range<f64>) -> f64 {
    round_cents(rng.gen_range(range))
}

/// Round half away from zero to two decimals.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
