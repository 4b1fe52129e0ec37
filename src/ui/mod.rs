//! Terminal UI for playing against the computer.

mod app;
mod game_view;

pub use app::App;
