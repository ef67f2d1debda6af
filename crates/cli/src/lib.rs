//! fontshelf command-line front end.

pub mod app;
pub mod cli;
pub mod commands;
pub mod menu;
pub mod prompt;

pub use app::App;
pub use prompt::Console;
