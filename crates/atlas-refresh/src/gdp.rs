use rand::Rng;
use std::ops::Range;

/// Half-open range the production multiplier is drawn from.
pub const GDP_MULTIPLIER_RANGE: Range<f64> = 1000.0..2000.0;

/// Source of the per-record GDP multiplier.
///
/// The production draw is uniform over [1000, 2000) for every record of
/// every refresh, so estimated GDP figures move between refreshes even when
/// upstream data does not. That is expected behavior; tests pin the draw
/// through this trait instead of fighting the randomness.
pub trait GdpMultiplier: Send + Sync + 'static {
    fn draw(&self) -> f64;
}

/// Uniform draw over [`GDP_MULTIPLIER_RANGE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformMultiplier;

impl GdpMultiplier for UniformMultiplier {
    fn draw(&self) -> f64 {
        rand::thread_rng().gen_range(GDP_MULTIPLIER_RANGE)
    }
}

/// Pinned multiplier for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedMultiplier(pub f64);

impl GdpMultiplier for FixedMultiplier {
    fn draw(&self) -> f64 {
        self.0
    }
}
