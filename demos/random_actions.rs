use std::{thread, time::Duration};

use drivesim::{
    Action,
    env::{CheckpointRacingEnv, Env},
    logging,
    render::AsciiRenderer,
};
use log::info;

const MAX_STEPS: usize = 50;

fn main() {
    logging::try_init().unwrap();

    let mut env = CheckpointRacingEnv::default().with_renderer(Box::new(AsciiRenderer::stdout()));
    let (obs, _) = env.reset(Some(0));
    info!("Initial observation: {obs:?}");
    info!("Observation layout: [distance, angle to gate, speed, aligned, progress]");

    for step in 0..MAX_STEPS {
        let action = env.sample_action();
        let current_gate = env.game().current_gate();

        let result = env.step(action).unwrap();
        info!(
            "Step {step}: {} (gate {current_gate}) -> reward {:.2}, obs {:?}",
            Action::try_from(action).unwrap().name(),
            result.reward,
            result.observation
        );

        if result.reward > 0.0 {
            info!("Gate passed!");
        }

        env.render();
        thread::sleep(Duration::from_millis(100));

        if result.is_done() {
            info!("Episode ended after {} steps", step + 1);
            break;
        }
    }
}
