//! The game itself: wires the rules, the opponent and the media up to the screen.

use crate::{
    assets::AssetDir,
    constants::{
        assets::{COMPUTER_GIF, PLAYER_GIF},
        graphics::{AVATAR, AVATAR_GAP, BUTTON_GAP, BUTTON_HEIGHT, BUTTON_WIDTH, MIN_SIZE},
    },
    io::{
        fmt::{Color, FormattedExt},
        Action, Key, Screen, XY,
    },
    media::{Animation, CuePlayer, Picture, SoundBoard},
    opponent::{Opponent, RandomOpponent},
    rules::{Choice, Outcome},
    runner::{Game, Response},
    session::{RoundResult, Session},
    text,
    timing::Instant,
    ui::{Button, List, Region, Scroll},
};

/// Rock, paper, scissors against the computer.
pub struct Rochambeau {
    session: Session,
    opponent: Box<dyn Opponent>,
    cues: Box<dyn CuePlayer>,
    player: Option<Animation>,
    computer: Option<Animation>,
    /// the round shown in the choice slots and the banner
    last: Option<RoundResult>,
    history: Scroll,
    hover: Option<XY>,
}

fn choice_button(choice: Choice) -> Button<'static> {
    let (label, hotkey, bg) = match choice {
        Choice::Rock => ("ROCK", 'r', Color::Cyan),
        Choice::Paper => ("PAPER", 'p', Color::Yellow),
        Choice::Scissors => ("SCISSORS", 's', Color::Magenta),
    };
    Button::new(label).hotkey(hotkey).colors(Color::BrightWhite, bg)
}

fn outcome_color(outcome: Outcome) -> Color {
    match outcome {
        Outcome::Tie => Color::BrightYellow,
        Outcome::UserWin => Color::BrightGreen,
        Outcome::ComputerWin => Color::BrightRed,
    }
}

fn load_avatar(assets: &AssetDir, name: &str) -> Option<Animation> {
    match Animation::load(assets, name, AVATAR * XY(1, 2)) {
        Ok(anim) => Some(anim),
        Err(e) => {
            log::warn!("couldn't load avatar {}: {}", name, e);
            None
        }
    }
}

impl Rochambeau {
    /// A game with no avatars.
    pub fn new(opponent: Box<dyn Opponent>, cues: Box<dyn CuePlayer>) -> Self {
        Self {
            session: Session::new(),
            opponent,
            cues,
            player: None,
            computer: None,
            last: None,
            history: Scroll::default(),
            hover: None,
        }
    }

    pub fn with_avatars(mut self, player: Option<Animation>, computer: Option<Animation>) -> Self {
        self.player = player;
        self.computer = computer;
        self
    }

    /// The real thing: a random opponent, with sounds and avatars from `assets`. Avatars that fail to load are left out.
    pub fn load(assets: &AssetDir) -> Self {
        let player = load_avatar(assets, PLAYER_GIF);
        let computer = load_avatar(assets, COMPUTER_GIF);
        Self::new(
            Box::new(RandomOpponent::new()),
            Box::new(SoundBoard::new(assets.clone())),
        )
        .with_avatars(player, computer)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Play a round with the player's choice, against the opponent's.
    pub fn play(&mut self, choice: Choice) -> RoundResult {
        let res = self.session.play_against(choice, self.opponent.as_mut());
        log::debug!(
            "round {}: {} vs {}, {} ({}-{}-{})",
            res.round,
            res.user,
            res.computer,
            res.outcome,
            res.score.user,
            res.score.computer,
            res.score.ties,
        );
        self.cues.notify(res.outcome.cue());
        self.history.follow();
        self.last = Some(res);
        res
    }

    /// Start over from round 1 with a clean board.
    pub fn reset(&mut self) {
        log::info!("resetting after {} rounds", self.session.score().rounds());
        self.session.reset();
        self.last = None;
        self.history = Scroll::default();
    }

    fn too_small(&self, root: Region, screen: &mut Screen) -> Response {
        let quit = matches!(root.input(), Some(Action::KeyPress { key }) if key.is_char('q'));
        root.centered(screen, text!(bright_yellow "Please enlarge the window"));
        if quit {
            Response::Quit
        } else {
            Response::Nothing
        }
    }

    fn avatars(&self, region: Region, screen: &mut Screen) {
        let row = region.center_x(AVATAR.x() * 2 + AVATAR_GAP);
        let (player, rest) = row.split_left(AVATAR.x());
        let (gap, computer) = rest.split_left(AVATAR_GAP);
        player.attach(screen, Picture(self.player.as_ref()));
        gap.centered(screen, text!(bold "VS"));
        computer.attach(screen, Picture(self.computer.as_ref()));
    }

    fn slots(&self, region: Region, screen: &mut Screen) {
        let (you, rest) = region.split_top(1);
        let (computer, banner) = rest.split_top(1);
        let user = self.last.map_or("", |r| r.user.name());
        let comp = self.last.map_or("", |r| r.computer.name());
        you.centered(screen, text!("You chose: ", bold "{}"(user)));
        computer.centered(screen, text!("Computer chose: ", bold "{}"(comp)));
        if let Some(last) = self.last {
            let line = crate::text1!(bold "{}!"(last.outcome.label())).fg(outcome_color(last.outcome));
            banner.centered(screen, vec![line]);
        }
    }

    /// Returns which button was clicked, if any.
    fn choices(&self, region: Region, screen: &mut Screen) -> Option<Choice> {
        let mut row = region.center_x(Choice::ALL.len() * (BUTTON_WIDTH + BUTTON_GAP) - BUTTON_GAP);
        let mut picked = None;
        for (i, choice) in Choice::ALL.into_iter().enumerate() {
            if i > 0 {
                row = row.split_left(BUTTON_GAP).1;
            }
            let (button, rest) = row.split_left(BUTTON_WIDTH);
            row = rest;
            if button.attach(screen, choice_button(choice)) {
                picked = Some(choice);
            }
        }
        picked
    }

    fn scores(&self, region: Region, screen: &mut Screen) {
        let score = self.session.score();
        region.centered(
            screen,
            text!(
                "You: ", bold "{}"(score.user), "   ",
                "Comp: ", bold "{}"(score.computer), "   ",
                "Ties: ", bold "{}"(score.ties),
            ),
        );
    }
}

impl Game for Rochambeau {
    fn attach(&mut self, screen: &mut Screen, input: Action) -> Response {
        if let Some(pos) = input.position() {
            self.hover = Some(pos);
        }
        if matches!(input, Action::KeyPress { key: Key::Escape }) {
            return Response::Quit;
        }
        let root = Region::new(screen.size(), input, self.hover);
        if !screen.size().fits(MIN_SIZE) {
            return self.too_small(root, screen);
        }

        let (title, rest) = root.split_top(1);
        title.centered(screen, text!(bold bright_magenta "Rock, Paper, Scissors"));
        let (avatars, rest) = rest.split_top(AVATAR.y());
        self.avatars(avatars, screen);
        let (slots, rest) = rest.split_top(3);
        self.slots(slots, screen);
        let (choices, rest) = rest.split_top(BUTTON_HEIGHT);
        let picked = self.choices(choices, screen);
        let (scores, rest) = rest.split_top(1);
        self.scores(scores, screen);
        let (header, rest) = rest.split_top(1);
        header.text(screen, text!(bold underline "History"));
        let (footer, history) = rest.split_bottom(BUTTON_HEIGHT);
        history.attach(screen, List::new(self.session.history(), &mut self.history));

        let row = footer.center_x(BUTTON_WIDTH * 2 + BUTTON_GAP);
        let (reset, rest) = row.split_left(BUTTON_WIDTH);
        let (_, quit) = rest.split_left(BUTTON_GAP);
        let reset = reset.attach(
            screen,
            Button::new("Reset (n)").hotkey('n').colors(Color::BrightWhite, Color::Green),
        );
        let quit = quit.attach(
            screen,
            Button::new("Quit (q)").hotkey('q').colors(Color::BrightWhite, Color::Red),
        );

        // the slots, scores and history were drawn before the click was seen, so they need another pass
        if quit {
            Response::Quit
        } else if reset {
            self.reset();
            Response::Redraw
        } else if let Some(choice) = picked {
            self.play(choice);
            Response::Redraw
        } else {
            Response::Nothing
        }
    }

    fn tick(&mut self, now: Instant) -> Response {
        let mut changed = false;
        for anim in [&mut self.player, &mut self.computer].into_iter().flatten() {
            changed |= anim.advance(now);
        }
        if changed {
            Response::Redraw
        } else {
            Response::Nothing
        }
    }

    fn next_tick(&self) -> Option<Instant> {
        self.player
            .iter()
            .chain(self.computer.iter())
            .filter_map(Animation::next_frame_at)
            .min()
    }
}

#[cfg(test)]
mod test {
    use std::{cell::RefCell, rc::Rc};

    use crate::{
        io::MouseButton,
        media::Cue,
        opponent::Scripted,
    };

    use super::*;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Cue>>>);

    impl CuePlayer for Recorder {
        fn notify(&self, cue: Cue) {
            self.0.borrow_mut().push(cue);
        }
    }

    fn game(draws: &[Choice]) -> (Rochambeau, Recorder) {
        let cues = Recorder::default();
        let game = Rochambeau::new(Box::new(Scripted::new(draws.iter().copied())), Box::new(cues.clone()));
        (game, cues)
    }

    fn key(ch: char) -> Action {
        Action::KeyPress { key: Key::Char(ch) }
    }

    fn find(screen: &Screen, needle: &str) -> Option<XY> {
        (0..screen.size().y()).find_map(|y| {
            let row = screen.row_text(y);
            row.find(needle).map(|i| XY(row[..i].chars().count(), y))
        })
    }

    fn screen() -> Screen {
        Screen::new(XY(60, 26))
    }

    /// Attach onto a freshly cleared screen, like the runner does.
    fn show(game: &mut Rochambeau, screen: &mut Screen, input: Action) -> Response {
        screen.clear();
        game.attach(screen, input)
    }

    #[test]
    fn hotkey_plays_a_round() {
        let (mut game, cues) = game(&[Choice::Scissors]);
        let mut screen = screen();
        assert_eq!(show(&mut game, &mut screen, key('r')), Response::Redraw);
        assert_eq!(game.session().score().user, 1);
        assert_eq!(game.session().round(), 2);
        assert_eq!(*cues.0.borrow(), [Cue::Win]);

        assert_eq!(show(&mut game, &mut screen, Action::Redraw), Response::Nothing);
        assert!(find(&screen, "You chose: Rock").is_some());
        assert!(find(&screen, "Computer chose: Scissors").is_some());
        assert!(find(&screen, "You Win!").is_some());
        assert!(find(&screen, "You: 1   Comp: 0   Ties: 0").is_some());
        assert!(find(&screen, "Round 1: You - Rock, Comp - Scissors -> You Win").is_some());
    }

    #[test]
    fn clicking_a_button_plays_it() {
        let (mut game, cues) = game(&[Choice::Scissors]);
        let mut screen = screen();
        show(&mut game, &mut screen, Action::Redraw);
        let pos = find(&screen, "PAPER").expect("no paper button");
        let click = Action::MousePress { pos, button: MouseButton::Left };
        assert_eq!(show(&mut game, &mut screen, click), Response::Redraw);
        let last = game.session().history()[0];
        assert_eq!((last.user, last.computer, last.outcome), (Choice::Paper, Choice::Scissors, Outcome::ComputerWin));
        assert_eq!(*cues.0.borrow(), [Cue::Loss]);
    }

    #[test]
    fn every_round_gets_exactly_one_cue() {
        let (mut game, cues) = game(&[Choice::Rock, Choice::Paper, Choice::Scissors]);
        let mut screen = screen();
        for _ in 0..3 {
            show(&mut game, &mut screen, key('r'));
        }
        assert_eq!(*cues.0.borrow(), [Cue::Tie, Cue::Loss, Cue::Win]);
        let score = game.session().score();
        assert_eq!((score.user, score.computer, score.ties), (1, 1, 1));
    }

    #[test]
    fn other_input_does_nothing() {
        let (mut game, cues) = game(&[Choice::Rock]);
        let mut screen = screen();
        assert_eq!(show(&mut game, &mut screen, key('x')), Response::Nothing);
        let nowhere = Action::MousePress { pos: XY(0, 0), button: MouseButton::Left };
        assert_eq!(show(&mut game, &mut screen, nowhere), Response::Nothing);
        assert_eq!(game.session().round(), 1);
        assert!(cues.0.borrow().is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let (mut game, _) = game(&[Choice::Scissors]);
        let mut screen = screen();
        show(&mut game, &mut screen, key('r'));
        show(&mut game, &mut screen, key('s'));
        assert_eq!(show(&mut game, &mut screen, key('n')), Response::Redraw);
        assert_eq!(game.session(), &Session::new());

        show(&mut game, &mut screen, Action::Redraw);
        assert!(find(&screen, "You chose: Rock").is_none());
        assert!(find(&screen, "You Win!").is_none());
        assert!(find(&screen, "It's a Tie!").is_none());
        assert!(find(&screen, "You: 0   Comp: 0   Ties: 0").is_some());
        assert!(find(&screen, "Round 1").is_none());
    }

    #[test]
    fn quitting() {
        let (mut game, _) = game(&[Choice::Rock]);
        let mut screen = screen();
        assert_eq!(show(&mut game, &mut screen, key('q')), Response::Quit);
        assert_eq!(show(&mut game, &mut screen, Action::KeyPress { key: Key::Escape }), Response::Quit);
        show(&mut game, &mut screen, Action::Redraw);
        let pos = find(&screen, "Quit").expect("no quit button");
        let click = Action::MousePress { pos, button: MouseButton::Left };
        assert_eq!(show(&mut game, &mut screen, click), Response::Quit);
    }

    #[test]
    fn small_screens_only_quit() {
        let (mut game, cues) = game(&[Choice::Rock]);
        let mut screen = Screen::new(XY(40, 10));
        assert_eq!(show(&mut game, &mut screen, key('r')), Response::Nothing);
        assert!(find(&screen, "Please enlarge the window").is_some());
        assert_eq!(game.session().round(), 1);
        assert!(cues.0.borrow().is_empty());
        assert_eq!(show(&mut game, &mut screen, key('q')), Response::Quit);
    }

    #[test]
    fn missing_avatars_get_placeholders_and_never_tick() {
        let (mut game, _) = game(&[Choice::Rock]);
        let mut screen = screen();
        show(&mut game, &mut screen, Action::Redraw);
        assert!(find(&screen, "░░░░").is_some());
        assert!(find(&screen, "VS").is_some());
        assert_eq!(game.next_tick(), None);
        assert_eq!(game.tick(Instant::now()), Response::Nothing);
    }

    #[test]
    fn missing_asset_dir_still_loads() {
        let dir = AssetDir::at(std::env::temp_dir().join("rochambeau-nothing-here"));
        let game = Rochambeau::load(&dir);
        assert!(game.player.is_none());
        assert!(game.computer.is_none());
    }
}
