use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SimError {
    /// The raw action value doesn't map to any of the 5 discrete actions
    #[error("invalid action {0}, expected a value in 0..=4")]
    InvalidAction(i64),
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}
