//! Bounded random-walk sampler and the randomness seam behind it.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::sim::channel::ChannelSpec;

/// Source of uniform draws in `[0, 1)`.
///
/// Everything random in the simulation goes through this trait so a run
/// can be replayed from a seed, or driven by a fixed sequence in tests.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send {
    fn unit(&mut self) -> f64;

    /// Uniform draw in `[low, low + width)`.
    fn between(&mut self, low: f64, width: f64) -> f64 {
        low + self.unit() * width
    }
}

/// ChaCha8 generator, seeded explicitly or from the OS.
pub struct ChaChaSource {
    rng: ChaCha8Rng,
}

impl ChaChaSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_os() -> Self {
        Self {
            rng: ChaCha8Rng::from_os_rng(),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => {
                tracing::debug!(seed, "using seeded random source");
                Self::seeded(seed)
            }
            None => Self::from_os(),
        }
    }
}

impl RandomSource for ChaChaSource {
    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Apply one perturbation drawn as `unit` in `[0, 1)`.
///
/// The step is `(unit - 0.5) * max_step`, i.e. uniform over
/// `[-max_step/2, +max_step/2)`, and the result is clamped into range.
pub fn perturb(previous: f64, spec: &ChannelSpec, unit: f64) -> f64 {
    let step = (unit - 0.5) * spec.max_step();
    spec.clamp(previous + step)
}

/// Next reading for one channel.
pub fn sample(previous: f64, spec: &ChannelSpec, rng: &mut dyn RandomSource) -> f64 {
    perturb(previous, spec, rng.unit())
}

/// Replays a fixed list of draws, wrapping around at the end.
#[cfg(test)]
pub(crate) struct FixedSequence {
    values: Vec<f64>,
    pos: usize,
}

#[cfg(test)]
impl FixedSequence {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty());
        Self { values, pos: 0 }
    }

    pub(crate) fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

#[cfg(test)]
impl RandomSource for FixedSequence {
    fn unit(&mut self) -> f64 {
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::channel::{Channel, ChannelTable};

    #[test]
    fn midpoint_draw_leaves_value_unchanged() {
        let spec = Channel::Cpu.default_spec();
        assert_eq!(perturb(55.0, &spec, 0.5), 55.0);
    }

    #[test]
    fn extreme_draws_move_by_half_the_step() {
        let spec = Channel::Cpu.default_spec();
        assert_eq!(perturb(50.0, &spec, 0.0), 45.0);
        assert!((perturb(50.0, &spec, 0.999_999) - 55.0).abs() < 1e-4);
    }

    #[test]
    fn clamps_at_both_edges() {
        let spec = Channel::Temperature.default_spec();
        assert_eq!(perturb(60.0, &spec, 0.0), 60.0);
        assert_eq!(perturb(85.0, &spec, 0.999), 85.0);
        assert_eq!(perturb(84.5, &spec, 0.99), 85.0);
    }

    #[test]
    fn stays_in_range_across_seeded_walks() {
        let table = ChannelTable::default();
        let mut rng = ChaChaSource::seeded(7);
        for (_, spec) in table.iter() {
            for start in [spec.min(), spec.max(), (spec.min() + spec.max()) / 2.0] {
                let mut value = start;
                for _ in 0..2_000 {
                    let next = sample(value, spec, &mut rng);
                    assert!(next >= spec.min() && next <= spec.max());
                    assert!((next - value).abs() <= spec.max_step() / 2.0 + 1e-9);
                    value = next;
                }
            }
        }
    }

    #[test]
    fn same_seed_same_walk() {
        let spec = Channel::Power.default_spec();
        let mut a = ChaChaSource::seeded(99);
        let mut b = ChaChaSource::seeded(99);
        let walk_a: Vec<f64> = (0..20).map(|_| sample(500.0, &spec, &mut a)).collect();
        let walk_b: Vec<f64> = (0..20).map(|_| sample(500.0, &spec, &mut b)).collect();
        assert_eq!(walk_a, walk_b);
    }

    #[test]
    fn draws_exactly_once_per_sample() {
        let mut mock = MockRandomSource::new();
        mock.expect_unit().times(1).return_const(0.25);
        let spec = Channel::Network.default_spec();
        let next = sample(80.0, &spec, &mut mock);
        assert!((next - 78.5).abs() < 1e-9);
    }

    #[test]
    fn between_scales_the_draw() {
        let mut rng = FixedSequence::constant(0.5);
        assert_eq!(rng.between(60.0, 30.0), 75.0);
    }
}
