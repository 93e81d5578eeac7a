//! Scores, round counting and the history of a run of games.

use std::fmt;

use crate::{
    opponent::Opponent,
    rules::{resolve, Choice, Outcome},
};

/// Running totals since the last reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub user: usize,
    pub computer: usize,
    pub ties: usize,
}

impl Score {
    /// How many rounds these totals cover.
    pub fn rounds(&self) -> usize {
        self.user + self.computer + self.ties
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Tie => self.ties += 1,
            Outcome::UserWin => self.user += 1,
            Outcome::ComputerWin => self.computer += 1,
        }
    }
}

/// One line of the history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundRecord {
    pub round: usize,
    pub user: Choice,
    pub computer: Choice,
    pub outcome: Outcome,
}

impl fmt::Display for RoundRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Round {}: You - {}, Comp - {} -> {}",
            self.round, self.user, self.computer, self.outcome
        )
    }
}

/// Everything the display needs to know about the round that was just played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundResult {
    pub round: usize,
    pub user: Choice,
    pub computer: Choice,
    pub outcome: Outcome,
    /// The score *after* this round.
    pub score: Score,
}

/// The state of a run of rounds: score, which round is next, and what happened so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    score: Score,
    round: usize,
    history: Vec<RoundRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            score: Score::default(),
            round: 1,
            history: vec![],
        }
    }

    /// The number the next round will have.
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Every round since the last reset, oldest first.
    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    /// Play one round with both hands already decided.
    pub fn play(&mut self, user: Choice, computer: Choice) -> RoundResult {
        let outcome = resolve(user, computer);
        let round = self.round;
        self.score.record(outcome);
        self.history.push(RoundRecord {
            round,
            user,
            computer,
            outcome,
        });
        self.round += 1;
        RoundResult {
            round,
            user,
            computer,
            outcome,
            score: self.score,
        }
    }

    /// Play one round, asking `opponent` for the computer's hand.
    pub fn play_against(&mut self, user: Choice, opponent: &mut (impl Opponent + ?Sized)) -> RoundResult {
        let computer = opponent.pick();
        self.play(user, computer)
    }

    /// Back to round 1 with nothing on the board.
    pub fn reset(&mut self) {
        self.score = Score::default();
        self.round = 1;
        self.history.clear();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
