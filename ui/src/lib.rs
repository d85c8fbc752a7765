#![warn(clippy::all, rust_2018_idioms)]
//! egui front end of the user registration screen.

pub mod app;
pub mod state;
pub mod widgets;

pub use app::UserRegApp;
