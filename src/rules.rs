//! The rules of the game: which choice beats which.

use std::fmt;

use crate::media::Cue;

/// One of the three hands a player can throw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    /// Every choice, in the order they're offered to the player.
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// The choice this one defeats.
    pub const fn beats(self) -> Choice {
        match self {
            Choice::Rock => Choice::Scissors,
            Choice::Paper => Choice::Rock,
            Choice::Scissors => Choice::Paper,
        }
    }

    /// The choice that defeats this one.
    pub const fn loses_to(self) -> Choice {
        // the relation is a 3-cycle, so going around twice goes back one
        self.beats().beats()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Choice::Rock => "Rock",
            Choice::Paper => "Paper",
            Choice::Scissors => "Scissors",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a round ended, from the player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Tie,
    UserWin,
    ComputerWin,
}

impl Outcome {
    /// The short label used in the round history.
    pub const fn label(self) -> &'static str {
        match self {
            Outcome::Tie => "It's a Tie",
            Outcome::UserWin => "You Win",
            Outcome::ComputerWin => "Computer Wins",
        }
    }

    /// The sound that plays when a round ends this way.
    pub fn cue(self) -> Cue {
        Cue::for_outcome(self)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decide a round.
pub fn resolve(user: Choice, computer: Choice) -> Outcome {
    if user == computer {
        Outcome::Tie
    } else if user.beats() == computer {
        Outcome::UserWin
    } else {
        Outcome::ComputerWin
    }
}
