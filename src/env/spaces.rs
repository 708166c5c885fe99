use crate::sim::Observation;
use fastrand::Rng;

/// `{0, 1, ..., n - 1}`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Discrete {
    n: usize,
}

impl Discrete {
    #[must_use]
    pub const fn new(n: usize) -> Self {
        Self { n }
    }

    #[must_use]
    pub const fn n(&self) -> usize {
        self.n
    }

    #[must_use]
    pub const fn contains(&self, value: usize) -> bool {
        value < self.n
    }

    pub fn sample(&self, rng: &mut Rng) -> usize {
        rng.usize(..self.n)
    }
}

/// Per-element bounded box over observations
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxSpace {
    low: Observation,
    high: Observation,
}

impl BoxSpace {
    /// # Panics
    ///
    /// If any `low` element is above its `high` counterpart
    #[must_use]
    pub fn new(low: Observation, high: Observation) -> Self {
        assert!(
            low.iter().zip(&high).all(|(lo, hi)| lo <= hi),
            "BoxSpace low {low:?} must not exceed high {high:?}"
        );
        Self { low, high }
    }

    #[must_use]
    pub const fn low(&self) -> &Observation {
        &self.low
    }

    #[must_use]
    pub const fn high(&self) -> &Observation {
        &self.high
    }

    #[must_use]
    pub fn contains(&self, value: &Observation) -> bool {
        value
            .iter()
            .zip(self.low.iter().zip(&self.high))
            .all(|(val, (lo, hi))| (lo..=hi).contains(&val))
    }

    pub fn sample(&self, rng: &mut Rng) -> Observation {
        let mut out = self.low;
        for (val, hi) in out.iter_mut().zip(&self.high) {
            *val += rng.f32() * (hi - *val);
        }
        out
    }
}
