use std::{thread, time::Duration};

use drivesim::{
    Action, Game,
    env::{DrivingEnv, Env},
    logging,
    render::AsciiRenderer,
};
use log::info;

fn main() {
    logging::try_init().unwrap();

    let mut env = DrivingEnv::default().with_renderer(Box::new(AsciiRenderer::stdout()));
    env.reset(None);

    for i in 0..50 {
        let result = env.step(Action::Accelerate.index()).unwrap();
        env.render();

        let car = env.game().car();
        info!(
            "Step {i}: speed = {:.2}, position = ({:.1}, {:.1})",
            car.speed, car.pos.x, car.pos.y
        );
        thread::sleep(Duration::from_millis(50));

        if result.is_done() {
            info!("Episode ended!");
            break;
        }
    }
}
