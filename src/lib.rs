//! Top-down 2D car driving games for reinforcement learning.
//!
//! Two headless cores share one kinematic car model:
//!
//! * [`sim::TrackGame`]: stay on an endless sinusoidal road (shaped reward)
//! * [`sim::GatesGame`]: drive through a fixed sequence of gates in order (sparse reward)
//!
//! Both advance one tick per [`sim::Game::step`] and never touch a renderer.
//! [`env`] wraps them with step limits and action validation,
//! [`render`] has the swappable drawing back-ends.

pub mod consts;
pub mod env;
mod error;
pub mod logging;
pub mod math;
pub mod render;
pub mod sim;

pub use error::SimError;
pub use sim::{Action, Game, GatesGame, Observation, StepResult, TrackGame};
