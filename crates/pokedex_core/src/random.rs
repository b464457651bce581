//! Uniform random sources for record sampling.
//!
//! # Responsibility
//! - Abstract the `[0, 1)` generator used by `RecordCollection::sample`.
//! - Provide a thread-local production source and a fixed source for replay.
//!
//! # Invariants
//! - Every source yields values in `[0.0, 1.0)`.

use rand::Rng;

/// Generator of uniformly distributed reals in `[0.0, 1.0)`.
pub trait UniformSource {
    fn next_unit(&mut self) -> f64;
}

/// Production source backed by `rand::thread_rng`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSource;

impl UniformSource for ThreadRngSource {
    fn next_unit(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Source that returns the same value on every draw.
///
/// Out-of-range inputs are clamped into `[0.0, 1.0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSource(f64);

impl FixedSource {
    pub fn new(value: f64) -> Self {
        let value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, LARGEST_BELOW_ONE)
        };
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl UniformSource for FixedSource {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

impl<U: UniformSource + ?Sized> UniformSource for &mut U {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Largest `f64` strictly below `1.0`.
pub const LARGEST_BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

#[cfg(test)]
mod tests {
    use super::{FixedSource, ThreadRngSource, UniformSource, LARGEST_BELOW_ONE};

    #[test]
    fn fixed_source_clamps_into_unit_interval() {
        assert_eq!(FixedSource::new(-3.0).value(), 0.0);
        assert_eq!(FixedSource::new(1.0).value(), LARGEST_BELOW_ONE);
        assert_eq!(FixedSource::new(f64::NAN).value(), 0.0);
        assert!(LARGEST_BELOW_ONE < 1.0);
    }

    #[test]
    fn thread_rng_source_stays_in_range() {
        let mut source = ThreadRngSource;
        for _ in 0..1_000 {
            let value = source.next_unit();
            assert!((0.0..1.0).contains(&value));
        }
    }
}
