//! The main loop: pump input into the game, let it animate, and draw it when something changed.

use std::{collections::BTreeMap, thread, time::Duration};

use crate::{
    assets::AssetDir,
    constants::{graphics::RENDER_PERIOD, timing::INPUT_POLL},
    io::{
        sys::{IoRunner, IoSystem},
        Action, Screen,
    },
    timing::{until, Instant, Timer},
    Error,
};

/// What the game wants the runner to do after it's handled something.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Response {
    /// Nothing visible changed.
    Nothing,
    /// The screen needs to be drawn again.
    Redraw,
    /// Stop running the game.
    Quit,
}

/// Something the [`Runner`] can run.
pub trait Game {
    /// Handle one input and render the whole screen in light of it.
    ///
    /// [`Action::Redraw`] means "just render". Everything is redrawn on every call, so whatever the screen held before
    /// can be ignored.
    fn attach(&mut self, screen: &mut Screen, input: Action) -> Response;

    /// Let time-based things (i.e. animations) catch up to `now`.
    fn tick(&mut self, now: Instant) -> Response;

    /// When [`Self::tick`] will next have something to do, if ever.
    fn next_tick(&self) -> Option<Instant>;
}

struct GameRunner<G: Game, IO: IoSystem> {
    game: G,
    iosys: IO,
    screen: Screen,
    /// the game's state changed since the screen was last rendered
    stale: bool,
    /// the screen changed since it was last drawn
    undrawn: bool,
    render_timer: Timer,
}

impl<G: Game, IO: IoSystem> GameRunner<G, IO> {
    fn new(game: G, iosys: IO) -> Self {
        let screen = Screen::new(iosys.size());
        Self {
            game,
            iosys,
            screen,
            stale: true,
            undrawn: true,
            render_timer: Timer::new(RENDER_PERIOD),
        }
    }

    fn respond(&mut self, res: Response) -> bool {
        match res {
            Response::Nothing => (),
            Response::Redraw => self.stale = true,
            Response::Quit => return true,
        }
        false
    }

    /// Render the game with a given input. Returns whether a stop was requested.
    fn attach(&mut self, input: Action) -> bool {
        self.screen.resize(self.iosys.size());
        let res = self.game.attach(&mut self.screen, input);
        self.stale = false;
        self.undrawn = true;
        self.respond(res)
    }

    /// Feed every available input to the game. Returns whether a stop was requested.
    fn io(&mut self) -> bool {
        loop {
            let action = match self.iosys.poll_input() {
                Ok(Some(action)) => action,
                Ok(None) => return false,
                Err(e) => {
                    log::error!("failed to read input: {}", e);
                    return true;
                }
            };
            match action {
                Action::Closed => return true,
                Action::Redraw => self.stale = true,
                Action::Error(e) => log::warn!("input error: {}", e),
                Action::Unknown(what) => log::trace!("ignoring unknown input: {}", what),
                other => {
                    if self.attach(other) {
                        return true;
                    }
                }
            }
        }
    }

    /// Advance the game's clock. Returns whether a stop was requested.
    fn tick(&mut self) -> bool {
        let res = self.game.tick(Instant::now());
        self.respond(res)
    }

    /// Render and draw, but only if something changed and it's been long enough since the last draw.
    ///
    /// Returns whether a stop was requested.
    fn render(&mut self) -> bool {
        let resized = self.iosys.size() != self.screen.size();
        if !(self.stale || self.undrawn || resized) || !self.render_timer.ready() {
            return false;
        }
        if (self.stale || resized) && self.attach(Action::Redraw) {
            return true;
        }
        if let Err(e) = self.iosys.draw(&self.screen) {
            log::error!("failed to draw: {}", e);
        }
        self.undrawn = false;
        false
    }

    /// How long the loop can sleep before there's something to do.
    fn idle_time(&self) -> Duration {
        let mut wait = INPUT_POLL;
        if self.stale || self.undrawn {
            wait = wait.min(self.render_timer.remaining());
        }
        if let Some(at) = self.game.next_tick() {
            wait = wait.min(until(at, Instant::now()));
        }
        wait
    }
}

/// Handles starting up and running a [`Game`].
#[must_use]
pub struct Runner<G: Game> {
    game: G,
}

impl<G: Game> Runner<G> {
    /// Prepare a game to be run
    pub fn new(game: G) -> Self {
        Self { game }
    }

    /// Run the game on this thread, interleaved with the IO runner, until it quits or the display is closed.
    ///
    /// Returns the game, mostly for testing.
    pub fn run(self, iosys: impl IoSystem, mut iorun: impl IoRunner) -> G {
        let mut gr = GameRunner::new(self.game, iosys);
        loop {
            if iorun.step() || gr.io() || gr.tick() || gr.render() {
                break;
            }
            thread::sleep(gr.idle_time());
        }
        gr.iosys.stop();
        iorun.run();
        gr.game
    }

    /// Use [`load!`](crate::load) to pick an IO system from the ones compiled in, then [`Self::run`].
    ///
    /// This **must** be run on the main thread. If no IO system could start, returns why each one failed.
    pub fn load_run(self, assets: &AssetDir) -> Result<G, BTreeMap<&'static str, Error>> {
        crate::load!(assets, self.run)
    }
}
