//! Everything between the game and the player: the character grid that gets rendered, how it's formatted, what the
//! player can do, and the systems that connect those to a real terminal or window.

mod action;
pub mod fmt;
mod screen;
pub mod sys;
mod xy;

pub use action::{Action, Key, MouseButton};
pub use screen::Screen;
pub use xy::XY;
