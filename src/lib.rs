//! Rock, paper, scissors against the computer.
//!
//! The game is split into layers, roughly bottom-up:
//!
//! - [`rules`], [`opponent`] and [`session`] are the game proper: who beats whom, how the computer picks, and the
//!   score and history. None of them know anything about the screen.
//! - [`media`] handles the decorations, sound cues and animated avatars. Failures there are logged and skipped.
//! - [`io`] and [`ui`] are the display: a character grid, the widgets drawn onto it, and the systems (terminal or
//!   window) that show it and turn the player's clicks and keypresses into [`io::Action`]s.
//! - [`game`] puts all of that together, and [`runner`] runs it.
//!
//! Which IO systems exist is decided at compile time, by features. See `Cargo.toml`.

pub mod assets;
pub mod constants;
mod error;
pub mod game;
pub mod io;
pub mod logging;
pub mod media;
pub mod opponent;
pub mod rules;
pub mod runner;
pub mod session;
pub mod timing;
pub mod ui;

pub use error::{Error, Result};
pub use game::Rochambeau;
pub use runner::{Game, Response, Runner};
