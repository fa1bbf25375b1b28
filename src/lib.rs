pub mod config;
pub mod console;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod model;
pub mod remote;
pub mod selection;
pub mod session;
pub mod status;
pub mod tree;
pub mod tui;

mod tui_shell;

#[cfg(test)]
#[path = "tests/fakes.rs"]
pub(crate) mod fakes;
