use std::time::Instant;

use drivesim::{Action, Game, GatesGame, TrackGame};
use fastrand::Rng;

const TICKS: u32 = 2_000_000;

fn run<G: Game>(name: &str, game: &mut G, rng: &mut Rng) {
    game.reset();

    let start = Instant::now();
    let mut episodes = 0u32;
    for _ in 0..TICKS {
        let action = Action::ALL[rng.usize(..Action::ALL.len())];
        if game.step(action).done {
            game.reset();
            episodes += 1;
        }
    }
    let elapsed = Instant::now().duration_since(start).as_secs_f32();

    println!(
        "{name}\n  Elapsed: {elapsed}\n  Episodes: {episodes}\n  TPS: {}",
        TICKS as f32 / elapsed
    );
}

fn main() {
    let mut rng = Rng::with_seed(0);

    run("track", &mut TrackGame::new(), &mut rng);
    run("gates", &mut GatesGame::new(), &mut rng);
}
