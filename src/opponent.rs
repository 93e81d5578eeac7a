//! Who the player is up against.

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::rules::Choice;

/// Anything that can throw a hand.
pub trait Opponent {
    fn pick(&mut self) -> Choice;
}

/// Picks uniformly at random.
pub struct RandomOpponent {
    rng: SmallRng,
}

impl RandomOpponent {
    /// Seeded from the OS's entropy, so every run plays differently.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Always plays the same sequence for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent for RandomOpponent {
    fn pick(&mut self) -> Choice {
        Choice::ALL[self.rng.gen_range(0..Choice::ALL.len())]
    }
}

/// Plays a fixed list of choices, starting over once it runs out.
#[derive(Clone, Debug)]
pub struct Scripted {
    draws: Vec<Choice>,
    next: usize,
}

impl Scripted {
    /// Panics if `draws` is empty.
    pub fn new(draws: impl IntoIterator<Item = Choice>) -> Self {
        let draws: Vec<_> = draws.into_iter().collect();
        assert!(!draws.is_empty(), "a scripted opponent needs at least one draw");
        Self { draws, next: 0 }
    }
}

impl Opponent for Scripted {
    fn pick(&mut self) -> Choice {
        let res = self.draws[self.next];
        self.next = (self.next + 1) % self.draws.len();
        res
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn seeded_opponents_repeat_themselves() {
        let mut a = RandomOpponent::seeded(42);
        let mut b = RandomOpponent::seeded(42);
        for _ in 0..50 {
            assert_eq!(a.pick(), b.pick());
        }
    }

    #[test]
    fn random_opponent_eventually_throws_everything() {
        let mut opp = RandomOpponent::seeded(7);
        let mut seen = [false; 3];
        for _ in 0..300 {
            let pick = opp.pick();
            let idx = Choice::ALL.iter().position(|&c| c == pick).unwrap();
            seen[idx] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn scripted_cycles() {
        let mut opp = Scripted::new([Choice::Paper, Choice::Rock]);
        let got: Vec<_> = (0..5).map(|_| opp.pick()).collect();
        assert_eq!(
            got,
            [Choice::Paper, Choice::Rock, Choice::Paper, Choice::Rock, Choice::Paper]
        );
    }

    #[test]
    #[should_panic]
    fn scripted_needs_draws() {
        Scripted::new([]);
    }
}
