use drivesim::{
    Action, Game, GatesGame, SimError, TrackGame,
    consts::{NUM_ACTIONS, gates, track},
    env::{CheckpointRacingEnv, DrivingEnv, Env, TimeLimit},
    render::{Frame, Renderer},
    sim::GatesConfig,
};
use std::{cell::Cell, io, rc::Rc};

struct CountingRenderer(Rc<Cell<u32>>);

impl Renderer for CountingRenderer {
    fn draw(&mut self, _frame: &Frame<'_>) -> io::Result<()> {
        self.0.set(self.0.get() + 1);
        Ok(())
    }
}

#[test]
fn default_limits() {
    assert_eq!(DrivingEnv::default().max_steps(), track::MAX_STEPS);
    assert_eq!(CheckpointRacingEnv::default().max_steps(), gates::MAX_STEPS);
}

#[test]
fn rejects_invalid_actions() {
    let mut env = DrivingEnv::default();
    env.reset(None);

    assert_eq!(
        env.step(NUM_ACTIONS).unwrap_err(),
        SimError::InvalidAction(NUM_ACTIONS as i64)
    );
    assert_eq!(env.current_step(), 0);
    assert_eq!(env.game().step_count(), 0);

    assert!(env.step(Action::Accelerate.index()).is_ok());
    assert_eq!(env.current_step(), 1);
}

#[test]
fn crash_terminates() {
    let mut env = DrivingEnv::default();
    env.reset(Some(3));

    let mut step = env.step(Action::Accelerate.index()).unwrap();
    while !step.is_done() {
        step = env.step(Action::Accelerate.index()).unwrap();
    }

    assert!(step.terminated);
    assert!(!step.truncated);
    assert_eq!(step.reward, track::CRASH_PENALTY);
    assert_eq!(step.info["crashed"], 1.0);
    assert_eq!(step.info["finished"], 0.0);
    assert_eq!(step.info["episode_length"], f64::from(env.current_step()));
}

#[test]
fn step_limit_truncates() {
    let mut env = TimeLimit::new_with_max_steps(GatesGame::new(), 10);
    env.reset(None);

    for _ in 0..9 {
        let step = env.step(Action::Idle.index()).unwrap();
        assert!(!step.is_done());
    }

    let step = env.step(Action::Idle.index()).unwrap();
    assert!(step.truncated);
    assert!(!step.terminated);
    assert_eq!(step.info["episode_length"], 10.0);
}

#[test]
fn truncation_wins_when_both_end() {
    let config = GatesConfig {
        max_steps: 20,
        ..Default::default()
    };
    let game = GatesGame::new_with_config(config).unwrap();
    let mut env = TimeLimit::new_with_max_steps(game, 20);
    env.reset(None);

    let mut step = env.step(Action::Idle.index()).unwrap();
    for _ in 1..20 {
        step = env.step(Action::Idle.index()).unwrap();
    }

    assert!(step.truncated);
    assert!(!step.terminated);
}

#[test]
fn reset_info() {
    let mut env = CheckpointRacingEnv::default();
    let (obs, info) = env.reset(Some(0));

    assert_eq!(obs[3], 1.0);
    assert_eq!(info["episode_reward"], 0.0);
    assert_eq!(info["episode_length"], 0.0);
    assert_eq!(info["gates_passed"], 0.0);
    assert_eq!(info["current_gate"], 0.0);
    assert_eq!(info["total_gates"], gates::DEFAULT_GATE_AMOUNT as f64);

    for _ in 0..40 {
        env.step(Action::Accelerate.index()).unwrap();
    }
    let (_, info) = env.reset(None);
    assert_eq!(info["gates_passed"], 0.0);
    assert_eq!(env.current_step(), 0);
}

#[test]
fn seeded_sampling_is_reproducible() {
    let mut a = DrivingEnv::default();
    let mut b = DrivingEnv::default();
    a.reset(Some(42));
    b.reset(Some(42));

    let first: Vec<usize> = (0..100).map(|_| a.sample_action()).collect();
    let second: Vec<usize> = (0..100).map(|_| b.sample_action()).collect();
    assert_eq!(first, second);
    assert!(first.iter().all(|&action| a.action_space().contains(action)));

    // Re-seeding restarts the sequence
    a.reset(Some(42));
    let again: Vec<usize> = (0..100).map(|_| a.sample_action()).collect();
    assert_eq!(first, again);
}

fn random_episodes<G: drivesim::env::EnvGame>(mut env: TimeLimit<G>, episodes: usize) {
    let space = env.observation_space();

    for episode in 0..episodes {
        let (obs, _) = env.reset(Some(episode as u64));
        assert!(space.contains(&obs));

        loop {
            let action = env.sample_action();
            let step = env.step(action).unwrap();
            assert!(space.contains(&step.observation), "{:?}", step.observation);
            if step.is_done() {
                break;
            }
        }
    }
}

#[test]
fn random_observations_stay_in_space() {
    random_episodes(DrivingEnv::new(TrackGame::new()), 5);
    random_episodes(TimeLimit::new_with_max_steps(GatesGame::new(), 500), 3);
}

#[test]
fn render_uses_attached_renderer() {
    let count = Rc::new(Cell::new(0));
    let mut env =
        CheckpointRacingEnv::default().with_renderer(Box::new(CountingRenderer(count.clone())));
    env.reset(None);

    for _ in 0..5 {
        env.step(Action::Idle.index()).unwrap();
        env.render();
    }
    assert_eq!(count.get(), 5);

    // Headless after detaching
    env.set_renderer(None);
    env.render();
    assert_eq!(count.get(), 5);
}
