//! Tuning knobs for the game. Changing any of these shouldn't break anything, it'll just look or feel different.

pub mod graphics {
    use std::time::Duration;

    use crate::io::XY;

    /// How many cells each avatar takes up. Every cell shows two pixels stacked vertically, so the avatar images are
    /// scaled to `AVATAR.x()` by `2 * AVATAR.y()` pixels.
    pub const AVATAR: XY = XY(14, 7);
    /// Space between the two avatars, where the `VS` goes.
    pub const AVATAR_GAP: usize = 8;

    pub const BUTTON_WIDTH: usize = 14;
    pub const BUTTON_HEIGHT: usize = 3;
    pub const BUTTON_GAP: usize = 2;

    /// Rows of history that must be visible for the layout to be usable at all.
    pub const MIN_HISTORY: usize = 3;
    /// The smallest screen the full layout fits in.
    pub const MIN_SIZE: XY = XY(3 * BUTTON_WIDTH + 2 * BUTTON_GAP + 2, 19 + MIN_HISTORY);

    /// Used for frames that don't say how long they last.
    pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(100);
    /// Don't render more often than this.
    pub const RENDER_PERIOD: Duration = Duration::from_micros(1_000_000 / 60);

    /// Size of the GUI's font, in pixels.
    pub const GUI_FONT_SIZE: f32 = 18.0;
    /// How many cells the GUI window starts out with.
    pub const GUI_GRID: XY = XY(80, 30);
}

pub mod timing {
    use std::time::Duration;

    /// Longest the main loop sleeps before checking for input again.
    pub const INPUT_POLL: Duration = Duration::from_millis(5);
}

pub mod assets {
    pub const DIR: &str = "assets";
    pub const PLAYER_GIF: &str = "player.gif";
    pub const COMPUTER_GIF: &str = "computer.gif";
    pub const WIN_SOUND: &str = "win.mp3";
    pub const LOSS_SOUND: &str = "boo.mp3";
    pub const TIE_SOUND: &str = "laugh.mp3";
    pub const FONT_REGULAR: &str = "font.ttf";
    pub const FONT_BOLD: &str = "font-bold.ttf";
    pub const LOG_FILE: &str = "rochambeau.log";
}
