//! Sound effects and animated avatars. Both are decoration: if anything goes wrong it's logged and skipped.

mod avatar;
mod sound;

pub use avatar::{Animation, Frame, Picture};
pub use sound::SoundBoard;

use crate::{
    constants::assets::{LOSS_SOUND, TIE_SOUND, WIN_SOUND},
    rules::Outcome,
};

/// A sound effect to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Tie,
    Win,
    Loss,
}

impl Cue {
    /// The cue that goes with how a round turned out.
    pub fn for_outcome(outcome: Outcome) -> Cue {
        match outcome {
            Outcome::Tie => Cue::Tie,
            Outcome::UserWin => Cue::Win,
            Outcome::ComputerWin => Cue::Loss,
        }
    }

    /// The asset holding this cue's sound.
    pub fn file_name(self) -> &'static str {
        match self {
            Cue::Tie => TIE_SOUND,
            Cue::Win => WIN_SOUND,
            Cue::Loss => LOSS_SOUND,
        }
    }
}

/// Plays cues, without blocking and without reporting failure.
pub trait CuePlayer {
    fn notify(&self, cue: Cue);
}
