use super::Action;
use crate::{
    SimError,
    consts::{self, gates, track},
    math::heading_dir,
};
use glam::Vec2;

/// Kinematic tuning of the arcade car
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarConfig {
    pub max_speed: f32,
    /// Speed added per tick while accelerating
    pub acceleration: f32,
    /// Speed removed per tick while braking
    pub brake_decel: f32,
    /// Heading change per tick while turning, in degrees
    pub turn_degrees: f32,
    /// Speed multiplier applied every tick
    pub friction: f32,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self::TRACK
    }
}

impl CarConfig {
    pub const TRACK: Self = Self {
        max_speed: track::MAX_SPEED,
        acceleration: track::ACCELERATION,
        brake_decel: track::BRAKE_DECEL,
        turn_degrees: track::TURN_DEGREES,
        friction: consts::FRICTION,
    };

    pub const GATES: Self = Self {
        max_speed: gates::MAX_SPEED,
        acceleration: gates::ACCELERATION,
        brake_decel: gates::BRAKE_DECEL,
        turn_degrees: gates::TURN_DEGREES,
        friction: consts::FRICTION,
    };

    pub fn validate(&self) -> Result<(), SimError> {
        if self.max_speed.is_nan() || self.max_speed <= 0.0 {
            return Err(SimError::InvalidConfig("max_speed must be positive"));
        }

        if self.friction.is_nan() || self.friction <= 0.0 || self.friction > 1.0 {
            return Err(SimError::InvalidConfig("friction must be in (0, 1]"));
        }

        if !(self.max_speed.is_finite()
            && self.acceleration.is_finite()
            && self.brake_decel.is_finite()
            && self.turn_degrees.is_finite())
        {
            return Err(SimError::InvalidConfig("car parameters must be finite"));
        }

        if self.acceleration < 0.0 || self.brake_decel < 0.0 || self.turn_degrees < 0.0 {
            return Err(SimError::InvalidConfig(
                "acceleration, brake_decel and turn_degrees must not be negative",
            ));
        }

        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarState {
    pub pos: Vec2,
    /// Heading in degrees, 0 is up and it increases clockwise
    ///
    /// Never wrapped, so it can grow past ±360
    pub angle: f32,
    /// Always within `[0, max_speed]`
    pub speed: f32,
}

impl Default for CarState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CarState {
    pub const DEFAULT: Self = Self {
        pos: Vec2::ZERO,
        angle: 0.0,
        speed: 0.0,
    };

    #[must_use]
    pub const fn at_rest(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            angle,
            speed: 0.0,
        }
    }

    /// Direction of travel
    #[must_use]
    pub fn forward(&self) -> Vec2 {
        heading_dir(self.angle)
    }

    #[must_use]
    pub fn angle_rad(&self) -> f32 {
        self.angle.to_radians()
    }

    /// Advances the car by one tick
    #[must_use]
    pub fn step(mut self, action: Action, config: &CarConfig) -> Self {
        match action {
            Action::TurnLeft => self.angle -= config.turn_degrees,
            Action::TurnRight => self.angle += config.turn_degrees,
            Action::Accelerate => {
                self.speed = (self.speed + config.acceleration).clamp(0.0, config.max_speed);
            }
            Action::Brake => self.speed = (self.speed - config.brake_decel).max(0.0),
            Action::Idle => {}
        }

        self.speed *= config.friction;
        self.pos += self.forward() * self.speed;

        self
    }

    /// Keeps the car `margin` pixels inside a `viewport`-sized screen
    #[must_use]
    pub fn clamped_to(mut self, viewport: Vec2, margin: f32) -> Self {
        let min = Vec2::splat(margin);
        let max = (viewport - margin).max(min);
        self.pos = self.pos.clamp(min, max);
        self
    }
}
