use crate::{SimError, consts::track};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackBounds {
    pub left: f32,
    pub right: f32,
}

impl TrackBounds {
    #[must_use]
    pub fn center(self) -> f32 {
        (self.left + self.right) * 0.5
    }

    /// True if `x` is within the bounds, edges included
    #[must_use]
    pub fn contains(self, x: f32) -> bool {
        (self.left..=self.right).contains(&x)
    }
}

/// An endless sinusoidal road running along the y axis
///
/// Nothing is stored per segment, every query is recomputed from y alone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    pub base_center: f32,
    pub amplitude: f32,
    pub frequency: f32,
    pub half_width: f32,
}

impl Default for Track {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Track {
    pub const DEFAULT: Self = Self {
        base_center: track::BASE_CENTER,
        amplitude: track::AMPLITUDE,
        frequency: track::FREQUENCY,
        half_width: track::HALF_WIDTH,
    };

    pub fn validate(&self) -> Result<(), SimError> {
        if self.half_width.is_nan() || self.half_width <= 0.0 {
            return Err(SimError::InvalidConfig("half_width must be positive"));
        }

        if !(self.base_center.is_finite() && self.amplitude.is_finite() && self.frequency.is_finite())
        {
            return Err(SimError::InvalidConfig("track parameters must be finite"));
        }

        Ok(())
    }

    #[must_use]
    pub fn center(&self, y: f32) -> f32 {
        self.base_center + self.amplitude * (self.frequency * y).sin()
    }

    #[must_use]
    pub fn bounds(&self, y: f32) -> TrackBounds {
        let center = self.center(y);
        TrackBounds {
            left: center - self.half_width,
            right: center + self.half_width,
        }
    }

    /// True if a car at `(x, y)` is on the road
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.bounds(y).contains(x)
    }

    /// Signed distance from the lane center, positive to the right
    #[must_use]
    pub fn lateral_error(&self, x: f32, y: f32) -> f32 {
        x - self.center(y)
    }

    /// How much the lane center shifts between `y` and `lookahead` pixels further up,
    /// scaled into `[-1, 1]` by the peak-to-peak swing of the road
    #[must_use]
    pub fn direction_hint(&self, y: f32, lookahead: f32) -> f32 {
        let swing = 2.0 * self.amplitude.abs();
        if swing <= f32::EPSILON {
            return 0.0;
        }

        let shift = self.center(y - lookahead) - self.center(y);
        (shift / swing).clamp(-1.0, 1.0)
    }
}
