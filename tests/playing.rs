//! Driving the game with the same actions a display would send it.

use std::{cell::RefCell, rc::Rc};

use rochambeau::{
    io::{Action, Key, MouseButton, Screen, XY},
    media::{Cue, CuePlayer},
    opponent::Scripted,
    rules::Choice,
    Game, Response, Rochambeau,
};

#[derive(Clone, Default)]
struct Cues(Rc<RefCell<Vec<Cue>>>);

impl CuePlayer for Cues {
    fn notify(&self, cue: Cue) {
        self.0.borrow_mut().push(cue);
    }
}

struct Harness {
    game: Rochambeau,
    screen: Screen,
    cues: Cues,
}

impl Harness {
    fn new(draws: &[Choice]) -> Self {
        let cues = Cues::default();
        let game = Rochambeau::new(
            Box::new(Scripted::new(draws.iter().copied())),
            Box::new(cues.clone()),
        );
        Self {
            game,
            screen: Screen::new(XY(80, 30)),
            cues,
        }
    }

    /// Send an action, then keep redrawing until the game settles, like the runner does.
    fn send(&mut self, action: Action) -> Response {
        self.screen.clear();
        let mut res = self.game.attach(&mut self.screen, action);
        while res == Response::Redraw {
            self.screen.clear();
            res = self.game.attach(&mut self.screen, Action::Redraw);
        }
        res
    }

    fn press(&mut self, ch: char) -> Response {
        self.send(Action::KeyPress { key: Key::Char(ch) })
    }

    fn click(&mut self, label: &str) -> Response {
        let pos = self.find(label).unwrap_or_else(|| panic!("{:?} isn't on screen", label));
        self.send(Action::MousePress {
            pos,
            button: MouseButton::Left,
        })
    }

    fn find(&self, needle: &str) -> Option<XY> {
        (0..self.screen.size().y()).find_map(|y| {
            let row = self.screen.row_text(y);
            row.find(needle).map(|i| XY(row[..i].chars().count(), y))
        })
    }

    fn shows(&self, needle: &str) -> bool {
        self.find(needle).is_some()
    }
}

#[test]
fn a_short_game() {
    let mut h = Harness::new(&[Choice::Rock, Choice::Paper, Choice::Scissors]);
    h.send(Action::Redraw);
    assert!(h.shows("Rock, Paper, Scissors"));
    assert!(h.shows("You: 0   Comp: 0   Ties: 0"));

    assert_eq!(h.click("ROCK"), Response::Nothing);
    assert!(h.shows("It's a Tie!"));
    assert_eq!(h.press('R'), Response::Nothing);
    assert!(h.shows("Computer Wins!"));
    assert!(h.shows("Computer chose: Paper"));
    assert_eq!(h.press('r'), Response::Nothing);
    assert!(h.shows("You Win!"));
    assert!(h.shows("You: 1   Comp: 1   Ties: 1"));
    assert!(h.shows("Round 1: You - Rock, Comp - Rock -> It's a Tie"));
    assert!(h.shows("Round 3: You - Rock, Comp - Scissors -> You Win"));
    assert_eq!(*h.cues.0.borrow(), [Cue::Tie, Cue::Loss, Cue::Win]);
}

#[test]
fn reset_button_starts_over() {
    let mut h = Harness::new(&[Choice::Rock]);
    h.press('p');
    h.click("Reset");
    assert_eq!(h.game.session().round(), 1);
    assert!(h.shows("You: 0   Comp: 0   Ties: 0"));
    assert!(!h.shows("Round 1"));
    assert!(!h.shows("You Win!"));
}

#[test]
fn history_scrolls_and_snaps_back() {
    let mut h = Harness::new(&[Choice::Paper]);
    for _ in 0..20 {
        h.press('s');
    }
    assert!(h.shows("Round 20:"));
    h.send(Action::KeyPress { key: Key::PageUp });
    assert!(!h.shows("Round 20:"));
    h.press('s');
    assert!(h.shows("Round 21:"));
}

#[test]
fn escape_and_quit_both_stop() {
    let mut h = Harness::new(&[Choice::Rock]);
    h.send(Action::Redraw);
    assert_eq!(h.send(Action::KeyPress { key: Key::Escape }), Response::Quit);
    assert_eq!(h.click("Quit"), Response::Quit);
}
