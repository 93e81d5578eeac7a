//! Renders to a terminal, through crossterm.

use std::{
    io::Write,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, TryRecvError},
        Arc,
    },
    time::Duration,
};

use crossterm::{
    cursor::{Hide, MoveDown, MoveTo, MoveToColumn, Show},
    event::{self as ct, DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{
        Attribute, Color as CtColor, ResetColor, SetAttribute, SetAttributes, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen,
    },
};

use crate::{
    io::{
        fmt::{Cell, Color, Formatted},
        Action, Key, MouseButton, Screen, XY,
    },
    Result,
};

use super::{IoRunner, IoSystem};

fn btn4ct(ct: ct::MouseButton) -> MouseButton {
    match ct {
        ct::MouseButton::Left => MouseButton::Left,
        ct::MouseButton::Middle => MouseButton::Middle,
        ct::MouseButton::Right => MouseButton::Right,
    }
}

fn key4ct(code: ct::KeyCode) -> Option<Key> {
    Some(match code {
        ct::KeyCode::Char(c) => Key::Char(c),
        ct::KeyCode::F(c) => Key::F(c as usize),
        ct::KeyCode::Backspace => Key::Backspace,
        ct::KeyCode::Enter => Key::Enter,
        ct::KeyCode::Left => Key::Left,
        ct::KeyCode::Right => Key::Right,
        ct::KeyCode::Up => Key::Up,
        ct::KeyCode::Down => Key::Down,
        ct::KeyCode::Home => Key::Home,
        ct::KeyCode::End => Key::End,
        ct::KeyCode::PageUp => Key::PageUp,
        ct::KeyCode::PageDown => Key::PageDown,
        ct::KeyCode::Tab | ct::KeyCode::BackTab => Key::Tab,
        ct::KeyCode::Delete => Key::Delete,
        ct::KeyCode::Insert => Key::Insert,
        ct::KeyCode::Esc => Key::Escape,
        _ => return None,
    })
}

/// Crossterm color for our colors
fn ct4color(c: Color) -> CtColor {
    match c {
        Color::BrightBlack => CtColor::DarkGrey,
        Color::Black => CtColor::Black,
        Color::BrightRed => CtColor::Red,
        Color::Red => CtColor::DarkRed,
        Color::BrightGreen => CtColor::Green,
        Color::Green => CtColor::DarkGreen,
        Color::BrightYellow => CtColor::Yellow,
        Color::Yellow => CtColor::DarkYellow,
        Color::BrightBlue => CtColor::Blue,
        Color::Blue => CtColor::DarkBlue,
        Color::BrightMagenta => CtColor::Magenta,
        Color::Magenta => CtColor::DarkMagenta,
        Color::BrightCyan => CtColor::Cyan,
        Color::Cyan => CtColor::DarkCyan,
        Color::BrightWhite => CtColor::White,
        Color::White => CtColor::Grey,
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
    }
}

pub struct CtRunner {
    actions: mpsc::Sender<Action>,
    stop: Arc<AtomicBool>,
}

impl CtRunner {
    fn init_term() -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            std::io::stdout(),
            EnableMouseCapture,
            EnterAlternateScreen,
            DisableLineWrap,
            Hide,
            Clear(ClearType::All),
        )?;
        Ok(())
    }

    fn clean_term() -> Result<()> {
        execute!(
            std::io::stdout(),
            Clear(ClearType::All),
            Show,
            EnableLineWrap,
            LeaveAlternateScreen,
            DisableMouseCapture,
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn new(actions: mpsc::Sender<Action>, stop: Arc<AtomicBool>) -> Result<Self> {
        Self::init_term()?;
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = Self::clean_term();
            default_hook(info);
        }));
        Ok(Self { actions, stop })
    }

    /// Turn one crossterm event into zero or more actions. Returns `false` if the other end hung up.
    fn translate(&self, ev: ct::Event) -> bool {
        let send = |a: Action| self.actions.send(a).is_ok();
        match ev {
            ct::Event::Key(ct::KeyEvent { code, kind, .. }) => {
                if kind == ct::KeyEventKind::Release {
                    // only reported with the kitty protocol, and we always send the release with the press
                    return true;
                }
                match key4ct(code) {
                    Some(key) => send(Action::KeyPress { key }) && send(Action::KeyRelease { key }),
                    None => send(Action::Unknown(format!("key {:?}", code))),
                }
            }
            ct::Event::Mouse(ct::MouseEvent {
                row, column, kind, ..
            }) => {
                let pos = XY(column as usize, row as usize);
                match kind {
                    ct::MouseEventKind::Down(btn) => send(Action::MousePress {
                        pos,
                        button: btn4ct(btn),
                    }),
                    ct::MouseEventKind::Up(btn) => send(Action::MouseRelease {
                        pos,
                        button: btn4ct(btn),
                    }),
                    ct::MouseEventKind::Drag(_) | ct::MouseEventKind::Moved => send(Action::MouseMove { pos }),
                    ct::MouseEventKind::ScrollUp => send(Action::MousePress {
                        pos,
                        button: MouseButton::ScrollUp,
                    }),
                    ct::MouseEventKind::ScrollDown => send(Action::MousePress {
                        pos,
                        button: MouseButton::ScrollDown,
                    }),
                    #[allow(unreachable_patterns)]
                    other => send(Action::Unknown(format!("mouse {:?}", other))),
                }
            }
            ct::Event::Resize(..) | ct::Event::FocusGained => send(Action::Redraw),
            ct::Event::FocusLost => true,
            ct::Event::Paste(_) => send(Action::Unknown("paste".into())),
        }
    }
}

impl Drop for CtRunner {
    fn drop(&mut self) {
        let _ = Self::clean_term();
    }
}

impl IoRunner for CtRunner {
    fn step(&mut self) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            return true;
        }
        // drain whatever's ready without blocking
        loop {
            match ct::poll(Duration::ZERO) {
                Ok(false) => return false,
                Ok(true) => (),
                Err(e) => {
                    let _ = self.actions.send(Action::Error(format!("polling: {}", e)));
                    return true;
                }
            }
            let ev = match ct::read() {
                Ok(ev) => ev,
                Err(e) => {
                    let _ = self.actions.send(Action::Error(format!("reading: {}", e)));
                    return true;
                }
            };
            if !self.translate(ev) {
                return true;
            }
        }
    }
}

/// Render a single row of cells into bytes that can be printed.
fn render_row(row: &[Cell], out: &mut Vec<u8>) -> std::io::Result<()> {
    let mut ch_b = [0u8; 4];
    let mut last = None;
    for cell in row {
        let fmt = cell.get_fmt();
        if last != Some(fmt) {
            let attrs = [
                if fmt.bold { Attribute::Bold } else { Attribute::NormalIntensity },
                if fmt.underline { Attribute::Underlined } else { Attribute::NoUnderline },
            ];
            queue!(
                out,
                SetForegroundColor(ct4color(fmt.fg)),
                SetBackgroundColor(ct4color(fmt.bg)),
                SetAttributes(attrs.as_ref().into()),
            )?;
            last = Some(fmt);
        }
        out.extend_from_slice(cell.ch.encode_utf8(&mut ch_b).as_bytes());
    }
    queue!(out, ResetColor, SetAttribute(Attribute::Reset), MoveDown(1), MoveToColumn(0))
}

pub struct CtSystem {
    queue: mpsc::Receiver<Action>,
    stop: Arc<AtomicBool>,
}

impl CtSystem {
    pub fn new() -> Result<(Self, CtRunner)> {
        let (queue_s, queue_r) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let runner = CtRunner::new(queue_s, stop.clone())?;
        Ok((Self { queue: queue_r, stop }, runner))
    }
}

impl IoSystem for CtSystem {
    fn size(&self) -> XY {
        // if the terminal won't say, assume the classic size
        let (x, y) = terminal::size().unwrap_or((80, 24));
        XY(x as usize, y as usize)
    }

    fn draw(&mut self, screen: &Screen) -> Result<()> {
        let mut out = vec![];
        queue!(&mut out, MoveTo(0, 0))?;
        for row in screen.rows() {
            render_row(row, &mut out)?;
        }
        let stdout = std::io::stdout();
        let mut stdout = stdout.lock();
        stdout.write_all(&out)?;
        stdout.flush()?;
        Ok(())
    }

    fn poll_input(&mut self) -> Result<Option<Action>> {
        match self.queue.try_recv() {
            Ok(res) => Ok(Some(res)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err("terminal input stopped unexpectedly".into()),
        }
    }

    fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn named_and_rgb_colors_map() {
        assert_eq!(ct4color(Color::BrightRed), CtColor::Red);
        assert_eq!(ct4color(Color::Rgb(1, 2, 3)), CtColor::Rgb { r: 1, g: 2, b: 3 });
    }

    #[test]
    fn keys_map_and_unknowns_dont_panic() {
        assert_eq!(key4ct(ct::KeyCode::Char('r')), Some(Key::Char('r')));
        assert_eq!(key4ct(ct::KeyCode::Esc), Some(Key::Escape));
        assert_eq!(key4ct(ct::KeyCode::Null), None);
    }

    #[test]
    fn rows_only_restyle_on_change() {
        let row = vec![Cell::of('a'), Cell::of('b'), crate::cell!(red 'c')];
        let mut out = vec![];
        render_row(&row, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("ab"), "unchanged style shouldn't be re-sent: {:?}", text);
        assert!(text.contains('c'));
    }
}
