use super::{
    Action, CarConfig, CarState, EpisodeStatus, Game, Observation, StepResult, Track,
    validate_viewport,
};
use crate::{
    SimError,
    consts::{OBS_DISTANCE_NORM, track},
    math::normalize_angle,
    render::{Frame, Scene},
};
use glam::Vec2;
use log::debug;
use std::f32::consts::PI;

/// Weights of the shaped reward
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackRewards {
    /// Flat reward on the tick the car leaves the road
    pub crash_penalty: f32,
    pub speed_scale: f32,
    /// Below this speed `slow_penalty` replaces the speed term
    pub min_speed: f32,
    pub slow_penalty: f32,
    /// Reward for sitting exactly on the lane center, fading to 0 at the edge
    pub center_bonus: f32,
    /// Reward per pixel of upward progress since the previous tick
    pub progress_scale: f32,
    pub steering_bonus: f32,
}

impl Default for TrackRewards {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TrackRewards {
    pub const DEFAULT: Self = Self {
        crash_penalty: track::CRASH_PENALTY,
        speed_scale: track::SPEED_REWARD_SCALE,
        min_speed: track::MIN_SPEED,
        slow_penalty: track::SLOW_PENALTY,
        center_bonus: track::CENTER_BONUS,
        progress_scale: track::PROGRESS_SCALE,
        steering_bonus: track::STEERING_BONUS,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackConfig {
    pub car: CarConfig,
    pub track: Track,
    pub rewards: TrackRewards,
    pub viewport: Vec2,
    /// The car spawns on the lane center at this y, heading up
    pub start_y: f32,
    /// The episode ends once the car is above this y
    pub top_boundary_y: f32,
    /// Look-ahead distance for the track direction hint
    pub lookahead: f32,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TrackConfig {
    pub const DEFAULT: Self = Self {
        car: CarConfig::TRACK,
        track: Track::DEFAULT,
        rewards: TrackRewards::DEFAULT,
        viewport: track::VIEWPORT,
        start_y: track::START_Y,
        top_boundary_y: track::TOP_BOUNDARY_Y,
        lookahead: track::LOOKAHEAD,
    };

    pub fn validate(&self) -> Result<(), SimError> {
        self.car.validate()?;
        self.track.validate()?;
        validate_viewport(self.viewport)?;

        if !(self.start_y.is_finite() && self.top_boundary_y.is_finite() && self.lookahead.is_finite()) {
            return Err(SimError::InvalidConfig("track positions must be finite"));
        }

        if self.start_y <= self.top_boundary_y {
            return Err(SimError::InvalidConfig(
                "start_y must be below the top boundary",
            ));
        }

        Ok(())
    }

    #[must_use]
    pub fn start_state(&self) -> CarState {
        CarState::at_rest(
            Vec2::new(self.track.center(self.start_y), self.start_y),
            0.0,
        )
    }
}

/// Mutable state of one track episode
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackSession {
    pub car: CarState,
    pub step_count: u32,
    pub cumulative_reward: f32,
    /// Set once the car leaves the road, never cleared until reset
    pub crashed: bool,
    /// Set once the car drives above the top boundary
    pub finished: bool,
    /// y at the end of the previous tick, `None` before the first tick
    pub prev_y: Option<f32>,
}

impl TrackSession {
    #[must_use]
    pub fn new(config: &TrackConfig) -> Self {
        Self {
            car: config.start_state(),
            step_count: 0,
            cumulative_reward: 0.0,
            crashed: false,
            finished: false,
            prev_y: None,
        }
    }

    #[must_use]
    pub const fn status(&self) -> EpisodeStatus {
        if self.crashed || self.finished {
            EpisodeStatus::Terminal
        } else {
            EpisodeStatus::Active
        }
    }

    /// Runs one tick, returning the reward and whether the episode is over
    ///
    /// A finished session ignores further actions and earns nothing.
    pub fn advance(&mut self, config: &TrackConfig, action: Action) -> (f32, bool) {
        if self.status().is_terminal() {
            return (0.0, true);
        }

        let car = self.car.step(action, &config.car);
        let prev_y = self.prev_y;

        self.car = car;
        self.step_count = self.step_count.saturating_add(1);
        self.prev_y = Some(car.pos.y);

        let reward = if config.track.contains(car.pos.x, car.pos.y) {
            shaped_reward(config, &car, prev_y)
        } else {
            debug!(
                "Car left the track at ({:.1}, {:.1}) after {} steps",
                car.pos.x, car.pos.y, self.step_count
            );
            self.crashed = true;
            config.rewards.crash_penalty
        };

        if !self.crashed && car.pos.y < config.top_boundary_y {
            debug!("Car reached the top after {} steps", self.step_count);
            self.finished = true;
        }

        self.cumulative_reward += reward;

        (reward, self.status().is_terminal())
    }
}

/// Reward for a tick the car spent on the road
#[must_use]
pub fn shaped_reward(config: &TrackConfig, car: &CarState, prev_y: Option<f32>) -> f32 {
    let rewards = &config.rewards;
    let track = &config.track;

    let speed_reward = if car.speed < rewards.min_speed {
        rewards.slow_penalty
    } else {
        car.speed * rewards.speed_scale
    };

    let lateral_error = track.lateral_error(car.pos.x, car.pos.y);
    let center_reward = if lateral_error.abs() < track.half_width {
        (1.0 - lateral_error.abs() / track.half_width) * rewards.center_bonus
    } else {
        0.0
    };

    let progress_reward = prev_y.map_or(0.0, |prev_y| (prev_y - car.pos.y) * rewards.progress_scale);

    // Only the signs matter: right of center wants a negative heading, left of center a positive one
    let steers_to_center =
        (lateral_error > 0.0 && car.angle < 0.0) || (lateral_error < 0.0 && car.angle > 0.0);
    let steering_reward = if steers_to_center {
        rewards.steering_bonus
    } else {
        0.0
    };

    speed_reward + center_reward + progress_reward + steering_reward
}

/// `[left distance, right distance, speed, heading, track direction]`
#[must_use]
pub fn track_observation(config: &TrackConfig, car: &CarState) -> Observation {
    let bounds = config.track.bounds(car.pos.y);

    let left_dist = (car.pos.x - bounds.left).clamp(0.0, OBS_DISTANCE_NORM);
    let right_dist = (bounds.right - car.pos.x).clamp(0.0, OBS_DISTANCE_NORM);

    [
        left_dist / OBS_DISTANCE_NORM,
        right_dist / OBS_DISTANCE_NORM,
        car.speed / config.car.max_speed,
        normalize_angle(car.angle_rad()) / PI,
        config.track.direction_hint(car.pos.y, config.lookahead),
    ]
}

/// Stay-on-the-road driving on an endless curved track
#[derive(Clone, Debug)]
pub struct TrackGame {
    config: TrackConfig,
    session: TrackSession,
}

impl Default for TrackGame {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackGame {
    #[must_use]
    pub fn new() -> Self {
        let config = TrackConfig::DEFAULT;
        Self {
            session: TrackSession::new(&config),
            config,
        }
    }

    pub fn new_with_config(config: TrackConfig) -> Result<Self, SimError> {
        config.validate()?;

        Ok(Self {
            session: TrackSession::new(&config),
            config,
        })
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &TrackConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub const fn session(&self) -> &TrackSession {
        &self.session
    }

    #[inline]
    #[must_use]
    pub const fn track(&self) -> &Track {
        &self.config.track
    }

    #[inline]
    #[must_use]
    pub const fn crashed(&self) -> bool {
        self.session.crashed
    }

    #[inline]
    #[must_use]
    pub const fn finished(&self) -> bool {
        self.session.finished
    }
}

impl Game for TrackGame {
    fn reset(&mut self) -> Observation {
        self.session = TrackSession::new(&self.config);
        self.observation()
    }

    fn step(&mut self, action: Action) -> StepResult {
        let (reward, done) = self.session.advance(&self.config, action);

        StepResult {
            observation: self.observation(),
            reward,
            done,
        }
    }

    fn observation(&self) -> Observation {
        track_observation(&self.config, &self.session.car)
    }

    fn status(&self) -> EpisodeStatus {
        self.session.status()
    }

    fn car(&self) -> &CarState {
        &self.session.car
    }

    fn step_count(&self) -> u32 {
        self.session.step_count
    }

    fn cumulative_reward(&self) -> f32 {
        self.session.cumulative_reward
    }

    fn frame(&self) -> Frame<'_> {
        Frame {
            viewport: self.config.viewport,
            car: self.session.car,
            step_count: self.session.step_count,
            cumulative_reward: self.session.cumulative_reward,
            status: self.session.status(),
            scene: Scene::Track(self.config.track),
        }
    }
}
