use super::{Action, CarState};
use crate::{SimError, consts::OBS_SIZE, render::Frame};
use glam::Vec2;

/// Normalized state vector handed to the policy
pub type Observation = [f32; OBS_SIZE];

#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum EpisodeStatus {
    #[default]
    Active,
    Terminal,
}

impl EpisodeStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Terminal)
    }
}

/// Rejects screens that are empty or not finite
pub fn validate_viewport(viewport: Vec2) -> Result<(), SimError> {
    if !viewport.is_finite() || viewport.min_element() <= 0.0 {
        return Err(SimError::InvalidConfig("viewport must be finite and non-empty"));
    }

    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f32,
    pub done: bool,
}

/// A single-car driving game advanced one tick at a time
pub trait Game {
    /// Puts the game back in its initial state and returns the first observation
    fn reset(&mut self) -> Observation;

    fn step(&mut self, action: Action) -> StepResult;

    fn observation(&self) -> Observation;

    fn status(&self) -> EpisodeStatus;

    fn car(&self) -> &CarState;

    fn step_count(&self) -> u32;

    fn cumulative_reward(&self) -> f32;

    /// Snapshot of everything a renderer needs to draw the current tick
    fn frame(&self) -> Frame<'_>;
}
