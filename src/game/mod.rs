pub mod machine;
pub mod state;
pub mod timer;
pub mod validator;

pub use machine::Game;
pub use state::{GameEvent, GameSettings, KeyInput, RoundStatus, Snapshot};
