/// Per-step speed multiplier applied regardless of the action
pub const FRICTION: f32 = 0.98;

/// Distances in observations are capped at this many pixels before normalizing
pub const OBS_DISTANCE_NORM: f32 = 400.0;

pub const NUM_ACTIONS: usize = 5;
pub const OBS_SIZE: usize = 5;

pub mod track {
    use glam::Vec2;

    pub const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    pub const MAX_SPEED: f32 = 8.0;
    pub const ACCELERATION: f32 = 0.3;
    pub const BRAKE_DECEL: f32 = 0.5;
    pub const TURN_DEGREES: f32 = 5.0;

    pub const BASE_CENTER: f32 = 400.0;
    pub const AMPLITUDE: f32 = 100.0;
    pub const FREQUENCY: f32 = 0.01;
    pub const HALF_WIDTH: f32 = 80.0;

    /// The car spawns on the lane center at this y
    pub const START_Y: f32 = 500.0;
    /// Leaving the viewport above this y ends the episode
    pub const TOP_BOUNDARY_Y: f32 = 0.0;
    /// How far ahead (in -y) the track-direction hint looks
    pub const LOOKAHEAD: f32 = 100.0;

    pub const CRASH_PENALTY: f32 = -100.0;
    pub const SPEED_REWARD_SCALE: f32 = 0.1;
    pub const MIN_SPEED: f32 = 0.5;
    pub const SLOW_PENALTY: f32 = -0.5;
    pub const CENTER_BONUS: f32 = 0.5;
    pub const PROGRESS_SCALE: f32 = 0.2;
    pub const STEERING_BONUS: f32 = 0.1;

    pub const MAX_STEPS: u32 = 1000;
}

pub mod gates {
    use glam::Vec2;

    pub const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);
    /// The car is kept at least this far inside the viewport
    pub const SCREEN_MARGIN: f32 = 10.0;

    pub const MAX_SPEED: f32 = 5.0;
    pub const ACCELERATION: f32 = 0.2;
    pub const BRAKE_DECEL: f32 = 0.4;
    pub const TURN_DEGREES: f32 = 4.0;

    pub const START_POS: Vec2 = Vec2::new(400.0, 550.0);
    pub const START_ANGLE: f32 = 0.0;

    /// Vertical distance from a gate's y within which the car counts as crossing it
    pub const PASS_TOLERANCE: f32 = 20.0;
    /// Facing within this many radians of the gate center sets the alignment flag
    pub const ALIGN_TOLERANCE: f32 = std::f32::consts::FRAC_PI_4;

    pub const GATE_REWARD: f32 = 100.0;
    pub const STEP_COST: f32 = -0.1;

    pub const MAX_GATES: usize = 16;

    pub const DEFAULT_GATE_AMOUNT: usize = 5;
    /// (left post, right post) of each gate, in driving order
    pub const DEFAULT_GATES: [(Vec2, Vec2); DEFAULT_GATE_AMOUNT] = [
        (Vec2::new(350.0, 450.0), Vec2::new(450.0, 450.0)),
        (Vec2::new(480.0, 350.0), Vec2::new(580.0, 350.0)),
        (Vec2::new(240.0, 250.0), Vec2::new(340.0, 250.0)),
        (Vec2::new(440.0, 150.0), Vec2::new(540.0, 150.0)),
        (Vec2::new(340.0, 60.0), Vec2::new(440.0, 60.0)),
    ];

    pub const MAX_STEPS: u32 = 3000;
}
