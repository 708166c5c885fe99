mod action;
mod car;
mod game;
mod gate;
mod gates_game;
mod track;
mod track_game;

pub use action::*;
pub use car::*;
pub use game::*;
pub use gate::*;
pub use gates_game::*;
pub use track::*;
pub use track_game::*;
