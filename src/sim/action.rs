use crate::SimError;

/// One of the 5 discrete inputs the car accepts each tick
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum Action {
    #[default]
    Idle,
    TurnLeft,
    TurnRight,
    Accelerate,
    Brake,
}

impl Action {
    pub const ALL: [Self; 5] = [
        Self::Idle,
        Self::TurnLeft,
        Self::TurnRight,
        Self::Accelerate,
        Self::Brake,
    ];

    const NAMES: [&'static str; 5] = ["nothing", "left", "right", "accelerate", "brake"];

    #[must_use]
    pub const fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Maps any raw value to an action, treating everything unknown as [`Action::Idle`]
    #[must_use]
    pub const fn from_raw_lossy(value: i64) -> Self {
        match value {
            1 => Self::TurnLeft,
            2 => Self::TurnRight,
            3 => Self::Accelerate,
            4 => Self::Brake,
            _ => Self::Idle,
        }
    }
}

impl TryFrom<i64> for Action {
    type Error = SimError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0..=4 => Ok(Self::from_raw_lossy(value)),
            _ => Err(SimError::InvalidAction(value)),
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = SimError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        i64::try_from(value)
            .map_err(|_| SimError::InvalidAction(i64::MAX))
            .and_then(Self::try_from)
    }
}

impl TryFrom<u8> for Action {
    type Error = SimError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}
