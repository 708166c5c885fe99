//! Gym-style wrapper around the game cores: step limits, action validation,
//! observation bounds and per-episode info.

mod spaces;

pub use spaces::{BoxSpace, Discrete};

use crate::{
    SimError,
    consts::{NUM_ACTIONS, gates, track},
    render::Renderer,
    sim::{Action, Game, GatesGame, Observation, TrackGame},
};
use ahash::AHashMap;
use fastrand::Rng;
use log::{info, warn};

/// Extra per-step values, keyed by name
pub type Info = AHashMap<&'static str, f64>;

#[derive(Clone, Debug)]
pub struct Step {
    pub observation: Observation,
    pub reward: f32,
    /// The game itself ended the episode
    pub terminated: bool,
    /// The step limit ended the episode
    pub truncated: bool,
    pub info: Info,
}

impl Step {
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}

pub trait Env {
    /// Starts a new episode, re-seeding the env's RNG if `seed` is given
    fn reset(&mut self, seed: Option<u64>) -> (Observation, Info);

    /// Advances one tick, rejecting actions outside the action space
    fn step(&mut self, action: usize) -> Result<Step, SimError>;

    /// Draws the current state with the attached renderer, if any
    fn render(&mut self);

    fn action_space(&self) -> Discrete;

    fn observation_space(&self) -> BoxSpace;

    /// A uniformly random valid action
    fn sample_action(&mut self) -> usize;
}

/// What the env layer needs to know about a specific game
pub trait EnvGame: Game {
    const MAX_STEPS: u32;

    fn observation_space() -> BoxSpace;

    /// Adds game-specific values to a step's info
    fn record_info(&self, info: &mut Info);
}

impl EnvGame for TrackGame {
    const MAX_STEPS: u32 = track::MAX_STEPS;

    fn observation_space() -> BoxSpace {
        BoxSpace::new([0.0, 0.0, 0.0, -1.0, -1.0], [1.0; 5])
    }

    fn record_info(&self, info: &mut Info) {
        info.insert("crashed", f64::from(u8::from(self.crashed())));
        info.insert("finished", f64::from(u8::from(self.finished())));
    }
}

impl EnvGame for GatesGame {
    const MAX_STEPS: u32 = gates::MAX_STEPS;

    fn observation_space() -> BoxSpace {
        BoxSpace::new([0.0, -1.0, 0.0, 0.0, 0.0], [1.0; 5])
    }

    fn record_info(&self, info: &mut Info) {
        info.insert("gates_passed", self.gates_passed() as f64);
        info.insert("total_gates", self.total_gates() as f64);
        info.insert("current_gate", self.current_gate() as f64);
    }
}

/// Wraps a game, ending episodes after `max_steps` ticks
pub struct TimeLimit<G: EnvGame> {
    game: G,
    max_steps: u32,
    current_step: u32,
    rng: Rng,
    renderer: Option<Box<dyn Renderer>>,
}

/// Stay on the curved road, truncated after 1000 steps
pub type DrivingEnv = TimeLimit<TrackGame>;

/// Pass every gate in order, truncated after 3000 steps
pub type CheckpointRacingEnv = TimeLimit<GatesGame>;

impl<G: EnvGame + Default> Default for TimeLimit<G> {
    fn default() -> Self {
        Self::new(G::default())
    }
}

impl<G: EnvGame> TimeLimit<G> {
    #[must_use]
    pub fn new(game: G) -> Self {
        Self::new_with_max_steps(game, G::MAX_STEPS)
    }

    #[must_use]
    pub fn new_with_max_steps(game: G, max_steps: u32) -> Self {
        Self {
            game,
            max_steps: max_steps.max(1),
            current_step: 0,
            rng: Rng::new(),
            renderer: None,
        }
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn set_renderer(&mut self, renderer: Option<Box<dyn Renderer>>) {
        self.renderer = renderer;
    }

    #[inline]
    #[must_use]
    pub const fn game(&self) -> &G {
        &self.game
    }

    #[inline]
    #[must_use]
    pub const fn max_steps(&self) -> u32 {
        self.max_steps
    }

    #[inline]
    #[must_use]
    pub const fn current_step(&self) -> u32 {
        self.current_step
    }

    fn make_info(&self) -> Info {
        let mut info = Info::new();
        info.insert("episode_reward", f64::from(self.game.cumulative_reward()));
        info.insert("episode_length", f64::from(self.current_step));
        self.game.record_info(&mut info);
        info
    }
}

impl<G: EnvGame> Env for TimeLimit<G> {
    fn reset(&mut self, seed: Option<u64>) -> (Observation, Info) {
        if let Some(seed) = seed {
            self.rng.seed(seed);
        }

        self.current_step = 0;
        let observation = self.game.reset();
        (observation, self.make_info())
    }

    fn step(&mut self, action: usize) -> Result<Step, SimError> {
        let action = Action::try_from(action)?;

        self.current_step = self.current_step.saturating_add(1);
        let result = self.game.step(action);

        let truncated = self.current_step >= self.max_steps;
        let terminated = result.done && !truncated;

        let step = Step {
            observation: result.observation,
            reward: result.reward,
            terminated,
            truncated,
            info: self.make_info(),
        };

        if step.is_done() {
            info!(
                "Episode {} after {} steps, total reward {:.2}",
                if terminated { "terminated" } else { "truncated" },
                self.current_step,
                self.game.cumulative_reward()
            );
        }

        Ok(step)
    }

    fn render(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        if let Err(e) = renderer.draw(&self.game.frame()) {
            warn!("Failed to render frame {}: {e}", self.current_step);
        }
    }

    fn action_space(&self) -> Discrete {
        Discrete::new(NUM_ACTIONS)
    }

    fn observation_space(&self) -> BoxSpace {
        G::observation_space()
    }

    fn sample_action(&mut self) -> usize {
        self.action_space().sample(&mut self.rng)
    }
}
