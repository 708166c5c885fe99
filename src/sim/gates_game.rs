use super::{
    Action, CarConfig, CarState, EpisodeStatus, Game, GateCourse, Observation, StepResult,
    validate_viewport,
};
use crate::{
    SimError,
    consts::{OBS_DISTANCE_NORM, gates},
    math::{heading_to, normalize_angle},
    render::{Frame, Scene},
};
use glam::Vec2;
use log::debug;
use std::f32::consts::PI;

/// Largest start heading magnitude, in degrees
const MAX_START_ANGLE: f32 = 360.0;

#[derive(Clone, Debug, PartialEq)]
pub struct GatesConfig {
    pub car: CarConfig,
    pub course: GateCourse,
    pub viewport: Vec2,
    /// The car is clamped this far inside the viewport
    pub screen_margin: f32,
    pub start_pos: Vec2,
    pub start_angle: f32,
    /// Max vertical distance from a gate's line that still counts as crossing it
    pub pass_tolerance: f32,
    /// Max angle (radians) between heading and the gate center for the alignment flag
    pub align_tolerance: f32,
    pub gate_reward: f32,
    pub step_cost: f32,
    /// The episode times out after this many ticks
    pub max_steps: u32,
}

impl Default for GatesConfig {
    fn default() -> Self {
        Self {
            car: CarConfig::GATES,
            course: GateCourse::default(),
            viewport: gates::VIEWPORT,
            screen_margin: gates::SCREEN_MARGIN,
            start_pos: gates::START_POS,
            start_angle: gates::START_ANGLE,
            pass_tolerance: gates::PASS_TOLERANCE,
            align_tolerance: gates::ALIGN_TOLERANCE,
            gate_reward: gates::GATE_REWARD,
            step_cost: gates::STEP_COST,
            max_steps: gates::MAX_STEPS,
        }
    }
}

impl GatesConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        self.car.validate()?;
        self.course.validate()?;
        validate_viewport(self.viewport)?;

        if !self.start_pos.is_finite() {
            return Err(SimError::InvalidConfig("start_pos must be finite"));
        }

        if !(-MAX_START_ANGLE..=MAX_START_ANGLE).contains(&self.start_angle) {
            return Err(SimError::InvalidConfig("start_angle must be within one turn of 0"));
        }

        if self.pass_tolerance.is_nan() || self.pass_tolerance < 0.0 {
            return Err(SimError::InvalidConfig("pass_tolerance must not be negative"));
        }

        if self.max_steps == 0 {
            return Err(SimError::InvalidConfig("max_steps must be at least 1"));
        }

        Ok(())
    }

    #[must_use]
    pub const fn start_state(&self) -> CarState {
        CarState::at_rest(self.start_pos, self.start_angle)
    }

    #[must_use]
    pub fn total_gates(&self) -> usize {
        self.course.len()
    }
}

/// Mutable state of one gates episode
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GatesSession {
    pub car: CarState,
    pub step_count: u32,
    pub cumulative_reward: f32,
    /// Index of the only gate that can be passed next
    pub current_gate: usize,
    pub gates_passed: usize,
}

impl GatesSession {
    #[must_use]
    pub const fn new(config: &GatesConfig) -> Self {
        Self {
            car: config.start_state(),
            step_count: 0,
            cumulative_reward: 0.0,
            current_gate: 0,
            gates_passed: 0,
        }
    }

    #[must_use]
    pub fn all_gates_passed(&self, config: &GatesConfig) -> bool {
        self.gates_passed >= config.total_gates()
    }

    #[must_use]
    pub const fn timed_out(&self, config: &GatesConfig) -> bool {
        self.step_count >= config.max_steps
    }

    #[must_use]
    pub fn status(&self, config: &GatesConfig) -> EpisodeStatus {
        if self.all_gates_passed(config) || self.timed_out(config) {
            EpisodeStatus::Terminal
        } else {
            EpisodeStatus::Active
        }
    }

    /// Checks the current gate against the car, moving on to the next one if it was crossed
    fn try_pass_gate(&mut self, config: &GatesConfig) -> bool {
        if let Some(gate) = config.course.get(self.current_gate)
            && gate.is_crossed_by(self.car.pos, config.pass_tolerance)
        {
            self.current_gate += 1;
            self.gates_passed += 1;
            debug!(
                "Gate {}/{} passed after {} steps",
                self.gates_passed,
                config.total_gates(),
                self.step_count
            );
            true
        } else {
            false
        }
    }

    /// Runs one tick, returning the reward and whether the episode is over
    ///
    /// The car keeps moving after the episode ends, only `done` stays set.
    pub fn advance(&mut self, config: &GatesConfig, action: Action) -> (f32, bool) {
        self.car = self
            .car
            .step(action, &config.car)
            .clamped_to(config.viewport, config.screen_margin);
        self.step_count = self.step_count.saturating_add(1);

        let reward = if self.try_pass_gate(config) {
            config.gate_reward
        } else {
            config.step_cost
        };

        self.cumulative_reward += reward;

        (reward, self.status(config).is_terminal())
    }
}

/// `[distance to gate, angle to gate, speed, aligned, progress]`
#[must_use]
pub fn gates_observation(config: &GatesConfig, session: &GatesSession) -> Observation {
    let car = &session.car;
    let target = config.course.target(session.current_gate);

    let distance = car.pos.distance(target).min(OBS_DISTANCE_NORM);
    let rel_angle = normalize_angle(heading_to(car.pos, target) - car.angle_rad());
    let aligned = if rel_angle.abs() <= config.align_tolerance {
        1.0
    } else {
        0.0
    };

    [
        distance / OBS_DISTANCE_NORM,
        rel_angle / PI,
        car.speed / config.car.max_speed,
        aligned,
        session.gates_passed as f32 / config.total_gates() as f32,
    ]
}

/// Drive through a fixed sequence of gates, in order
#[derive(Clone, Debug)]
pub struct GatesGame {
    config: GatesConfig,
    session: GatesSession,
}

impl Default for GatesGame {
    fn default() -> Self {
        Self::new()
    }
}

impl GatesGame {
    #[must_use]
    pub fn new() -> Self {
        let config = GatesConfig::default();
        Self {
            session: GatesSession::new(&config),
            config,
        }
    }

    pub fn new_with_config(config: GatesConfig) -> Result<Self, SimError> {
        config.validate()?;

        Ok(Self {
            session: GatesSession::new(&config),
            config,
        })
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &GatesConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub const fn session(&self) -> &GatesSession {
        &self.session
    }

    #[inline]
    #[must_use]
    pub const fn current_gate(&self) -> usize {
        self.session.current_gate
    }

    #[inline]
    #[must_use]
    pub const fn gates_passed(&self) -> usize {
        self.session.gates_passed
    }

    #[inline]
    #[must_use]
    pub fn total_gates(&self) -> usize {
        self.config.total_gates()
    }

    /// Ran out of steps before passing every gate
    #[must_use]
    pub fn truncated(&self) -> bool {
        self.session.timed_out(&self.config) && !self.session.all_gates_passed(&self.config)
    }
}

impl Game for GatesGame {
    fn reset(&mut self) -> Observation {
        self.session = GatesSession::new(&self.config);
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
        gates_observation(&self.config, &self.session)
    }

    fn status(&self) -> EpisodeStatus {
        self.session.status(&self.config)
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
            status: self.status(),
            scene: Scene::Gates {
                gates: self.config.course.as_slice(),
                current_gate: self.session.current_gate,
                gates_passed: self.session.gates_passed,
            },
        }
    }
}
