use drivesim::{
    Action, Game, Observation, TrackGame,
    consts::track,
    sim::{EpisodeStatus, Track, TrackConfig},
};
use std::f32::consts::PI;

/// Steers toward the lane center using only the observation
fn follow_center(obs: &Observation) -> Action {
    let lateral_error = (obs[0] - obs[1]) * 400.0 / 2.0;
    let desired = -0.01 * lateral_error + obs[4];
    let heading = obs[3] * PI;

    if heading < desired - 0.05 {
        Action::TurnRight
    } else if heading > desired + 0.05 {
        Action::TurnLeft
    } else if obs[2] < 0.25 {
        Action::Accelerate
    } else {
        Action::Idle
    }
}

#[test]
fn reset_is_idempotent() {
    let mut game = TrackGame::new();
    let first = game.reset();
    let second = game.reset();
    assert_eq!(first, second);

    for _ in 0..20 {
        game.step(Action::Accelerate);
    }
    game.step(Action::TurnLeft);

    assert_eq!(game.reset(), first);
    assert_eq!(game.step_count(), 0);
    assert_eq!(game.cumulative_reward(), 0.0);
    assert!(game.session().prev_y.is_none());
    assert_eq!(game.status(), EpisodeStatus::Active);
}

#[test]
fn initial_observation() {
    let mut game = TrackGame::new();
    let obs = game.reset();

    // Spawned on the lane center, at rest, heading up
    let half = track::HALF_WIDTH / 400.0;
    assert!((obs[0] - half).abs() < 1e-5);
    assert!((obs[1] - half).abs() < 1e-5);
    assert_eq!(obs[2], 0.0);
    assert_eq!(obs[3], 0.0);

    // The lane center 100 px further up sits about 20 px to the right
    let road = game.track();
    let expected = (road.center(track::START_Y - track::LOOKAHEAD) - road.center(track::START_Y))
        / (2.0 * track::AMPLITUDE);
    assert!((obs[4] - expected).abs() < 1e-5);
    assert!((obs[4] - 0.101).abs() < 1e-3);
}

#[test]
fn never_crashes_while_on_track() {
    let mut game = TrackGame::new();
    game.reset();

    let mut crashed_at = None;
    for i in 0..200 {
        let result = game.step(Action::Accelerate);
        let car = *game.car();
        let on_track = game.track().contains(car.pos.x, car.pos.y);

        assert_eq!(game.crashed(), !on_track, "step {i}: {car:?}");

        if result.done {
            crashed_at = Some(i);
            break;
        }
    }

    // Driving straight up a curved road eventually leaves it
    assert!(crashed_at.is_some());
    assert!(game.crashed());
}

#[test]
fn crash_is_terminal_and_latched() {
    let mut game = TrackGame::new();
    game.reset();

    let mut last = None;
    for _ in 0..500 {
        let result = game.step(Action::Accelerate);
        if result.done {
            last = Some(result);
            break;
        }
    }

    let crash = last.expect("car should leave the track");
    assert_eq!(crash.reward, track::CRASH_PENALTY);
    assert_eq!(game.status(), EpisodeStatus::Terminal);

    let car = *game.car();
    let steps = game.step_count();
    let total = game.cumulative_reward();

    for action in Action::ALL {
        let result = game.step(action);
        assert!(result.done);
        assert_eq!(result.reward, 0.0);
        assert_eq!(result.observation, crash.observation);
    }

    assert!(game.crashed());
    assert_eq!(*game.car(), car);
    assert_eq!(game.step_count(), steps);
    assert_eq!(game.cumulative_reward(), total);
}

#[test]
fn first_step_has_no_progress_baseline() {
    let mut game = TrackGame::new();
    game.reset();
    let start_y = game.car().pos.y;

    let result = game.step(Action::Accelerate);
    let car = *game.car();
    assert!(car.pos.y < start_y);

    // speed below the slow threshold, nearly centered, heading straight, no progress term
    let expected = track::SLOW_PENALTY
        + (1.0 - game.track().lateral_error(car.pos.x, car.pos.y).abs() / track::HALF_WIDTH)
            * track::CENTER_BONUS;
    assert!((result.reward - expected).abs() < 1e-4);
    assert_eq!(game.session().prev_y, Some(car.pos.y));
}

#[test]
fn progress_rewards_moving_up() {
    let mut game = TrackGame::new();
    game.reset();
    game.step(Action::Accelerate);

    let prev_y = game.car().pos.y;
    let result = game.step(Action::Accelerate);
    let car = *game.car();

    // Still heading straight up, so no steering term
    assert_eq!(car.angle, 0.0);
    assert!(car.speed >= track::MIN_SPEED);

    let lateral = game.track().lateral_error(car.pos.x, car.pos.y).abs();
    let progress = prev_y - car.pos.y;
    assert!(progress > 0.0);

    let expected = car.speed * track::SPEED_REWARD_SCALE
        + (1.0 - lateral / track::HALF_WIDTH) * track::CENTER_BONUS
        + progress * track::PROGRESS_SCALE;

    assert!((result.reward - expected).abs() < 1e-4);
}

#[test]
fn observations_stay_in_box() {
    let mut game = TrackGame::new();
    let mut obs = game.reset();

    for i in 0..1000 {
        let action = if i % 3 == 0 {
            Action::TurnRight
        } else {
            Action::Accelerate
        };
        let result = game.step(action);
        obs = result.observation;

        assert!((0.0..=1.0).contains(&obs[0]));
        assert!((0.0..=1.0).contains(&obs[1]));
        assert!((0.0..=1.0).contains(&obs[2]));
        assert!((-1.0..=1.0).contains(&obs[3]));
        assert!((-1.0..=1.0).contains(&obs[4]));

        if result.done {
            break;
        }
    }

    assert!(obs.iter().all(|v| v.is_finite()));
}

#[test]
fn speed_stays_bounded() {
    let mut game = TrackGame::new();
    game.reset();

    for i in 0..300_usize {
        let action = Action::ALL[(i * 7 + i / 3) % Action::ALL.len()];
        let result = game.step(action);
        let speed = game.car().speed;
        assert!((0.0..=track::MAX_SPEED).contains(&speed));
        if result.done {
            game.reset();
        }
    }
}

#[test]
fn centering_driver_reaches_the_top() {
    let mut game = TrackGame::new();
    let mut obs = game.reset();

    let mut done = false;
    for _ in 0..track::MAX_STEPS {
        let result = game.step(follow_center(&obs));
        obs = result.observation;
        if result.done {
            done = true;
            break;
        }
    }

    assert!(done);
    assert!(!game.crashed());
    assert!(game.finished());
    assert!(game.car().pos.y < track::TOP_BOUNDARY_Y);
    assert!(game.cumulative_reward() > 0.0);
}

#[test]
fn custom_straight_track() {
    let config = TrackConfig {
        track: Track {
            amplitude: 0.0,
            ..Track::DEFAULT
        },
        ..TrackConfig::DEFAULT
    };

    let mut game = TrackGame::new_with_config(config).unwrap();
    let obs = game.reset();
    assert_eq!(obs[4], 0.0);

    // A straight road can be driven flat out to the top
    let mut result = game.step(Action::Accelerate);
    while !result.done {
        result = game.step(Action::Accelerate);
    }

    assert!(game.finished());
    assert!(!game.crashed());
}
