// The binary in main.rs is a thin terminal driver over this library; the
// round logic, word source, and stores are reachable from tests and benches.

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod game;
pub mod logging;
pub mod store;
pub mod ui;
pub mod vocab;
