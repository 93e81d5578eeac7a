//! Implements all the common window management stuff and delegates the rendering to a [`GuiRenderer`].

use std::{
    sync::{
        mpsc::{self, TryRecvError},
        Arc, Once,
    },
    time::{Duration, Instant},
};

use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, MouseScrollDelta, VirtualKeyCode, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopBuilder},
    platform::run_return::EventLoopExtRunReturn,
    window::{Window, WindowBuilder},
};

use crate::{
    assets::AssetDir,
    constants::{
        assets::{FONT_BOLD, FONT_REGULAR},
        graphics::GUI_GRID,
    },
    io::{Action, Key, MouseButton, Screen, XY},
    Result,
};

use super::{IoRunner, IoSystem};

pub mod softbuffer;

macro_rules! keymap {
    ( $vkc:expr; $( $( $from:ident )|+ => $to:expr ),* $(,)? ) => {
        match $vkc {
            $( $( VirtualKeyCode::$from )|+ => Some($to), )*
            _ => None,
        }
    };
}

/// Convert a winit [`VirtualKeyCode`] to a [`Key`]
fn key4vkc(vkc: Option<VirtualKeyCode>) -> Option<Key> {
    keymap! { vkc?;
        A => Key::Char('a'), B => Key::Char('b'), C => Key::Char('c'), D => Key::Char('d'),
        E => Key::Char('e'), F => Key::Char('f'), G => Key::Char('g'), H => Key::Char('h'),
        I => Key::Char('i'), J => Key::Char('j'), K => Key::Char('k'), L => Key::Char('l'),
        M => Key::Char('m'), N => Key::Char('n'), O => Key::Char('o'), P => Key::Char('p'),
        Q => Key::Char('q'), R => Key::Char('r'), S => Key::Char('s'), T => Key::Char('t'),
        U => Key::Char('u'), V => Key::Char('v'), W => Key::Char('w'), X => Key::Char('x'),
        Y => Key::Char('y'), Z => Key::Char('z'),
        Key0 | Numpad0 => Key::Char('0'), Key1 | Numpad1 => Key::Char('1'), Key2 | Numpad2 => Key::Char('2'),
        Key3 | Numpad3 => Key::Char('3'), Key4 | Numpad4 => Key::Char('4'), Key5 | Numpad5 => Key::Char('5'),
        Key6 | Numpad6 => Key::Char('6'), Key7 | Numpad7 => Key::Char('7'), Key8 | Numpad8 => Key::Char('8'),
        Key9 | Numpad9 => Key::Char('9'),
        Space => Key::Char(' '),
        Escape => Key::Escape,
        Return | NumpadEnter => Key::Enter,
        Back => Key::Backspace,
        Tab => Key::Tab,
        Up => Key::Up, Down => Key::Down, Left => Key::Left, Right => Key::Right,
        PageUp => Key::PageUp, PageDown => Key::PageDown, Home => Key::Home, End => Key::End,
        Insert => Key::Insert, Delete => Key::Delete,
        LShift => Key::LeftShift, RShift => Key::RightShift,
        LControl => Key::LeftCtrl, RControl => Key::RightCtrl,
        LAlt => Key::LeftAlt, RAlt => Key::RightAlt,
        LWin => Key::LeftSuper, RWin => Key::RightSuper,
    }
}

/// Convert a winit [`MouseButton`](winit::event::MouseButton) to our [`MouseButton`]
fn mb4button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Other(_) => None,
    }
}

/// Convert pixel position in the window to the cell under it.
///
/// The grid is centered in the window, so there's a margin of leftover pixels around it.
fn char4pixel_pos(pos: XY, char_size: XY, win_size: XY) -> XY {
    let margin = (win_size % char_size) / 2;
    let pos = pos.clamp(margin, win_size.saturating_sub(char_size) + margin);
    (pos - margin) / char_size
}

/// Common interface for the GUI rendering backends.
///
/// [`GuiSystem`] / [`GuiRunner`] handle the window and its input; a `GuiRenderer` just draws [`Screen`]s into it.
pub trait GuiRenderer: Send + Sync + Sized {
    /// Create a new renderer from TTF font data.
    ///
    /// The font size is `fontdue`'s understanding of it: the (approximate) width in pixels of the `m` character.
    fn new(regular: Vec<u8>, bold: Vec<u8>, font_size: f32) -> Result<Self>;

    /// Render a screen onto the window, returning once it's in the OS's hands.
    fn render(&self, window: &Window, screen: &Screen) -> Result<()>;

    /// The size of one cell, in pixels.
    fn char_size(&self) -> XY;
}

/// A winit-based GUI [`IoSystem`], deferring the actual drawing to a [`GuiRenderer`].
pub struct GuiSystem<B: GuiRenderer> {
    window: Window,
    inputs: mpsc::Receiver<Action>,
    kill_el: Arc<Once>,
    backend: B,
}

impl<B: GuiRenderer> GuiSystem<B> {
    /// Open a window, with fonts loaded from the assets.
    pub fn new(assets: &AssetDir, font_size: f32) -> Result<(Self, GuiRunner)> {
        let regular = assets.read(FONT_REGULAR)?;
        let bold = match assets.read(FONT_BOLD) {
            Ok(bold) => bold,
            Err(e) => {
                log::debug!("no bold font ({}), using regular for bold text", e);
                regular.clone()
            }
        };
        let backend = B::new(regular, bold, font_size)?;
        let char_size = backend.char_size();
        let win_size = char_size * GUI_GRID;

        let el = EventLoopBuilder::<Action>::with_user_event().build();
        let window = WindowBuilder::new()
            .with_inner_size(PhysicalSize::new(win_size.x() as u32, win_size.y() as u32))
            .with_title("Rock, Paper, Scissors")
            .build(&el)?;
        let (act_send, inputs) = mpsc::channel();
        let kill = Arc::new(Once::new());

        let runner = GuiRunner {
            el,
            rest: WrRest {
                act_send,
                kill_recv: kill.clone(),
                char_size,
                win_size,
                cursor: XY(0, 0),
            },
        };
        let system = Self {
            window,
            inputs,
            kill_el: kill,
            backend,
        };
        Ok((system, runner))
    }
}

impl<B: GuiRenderer> IoSystem for GuiSystem<B> {
    fn draw(&mut self, screen: &Screen) -> Result<()> {
        self.backend.render(&self.window, screen)
    }

    fn size(&self) -> XY {
        let raw_sz = self.window.inner_size();
        XY(raw_sz.width as usize, raw_sz.height as usize) / self.backend.char_size()
    }

    fn poll_input(&mut self) -> Result<Option<Action>> {
        match self.inputs.try_recv() {
            Ok(res) => Ok(Some(res)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err("window event loop has terminated unexpectedly".into()),
        }
    }

    fn stop(&mut self) {
        self.kill_el.call_once(|| {})
    }
}

/// Everything in a [`GuiRunner`] except the winit `EventLoop`, split out so the event loop's callback can borrow it
/// while the loop itself is mutably borrowed.
struct WrRest {
    act_send: mpsc::Sender<Action>,
    kill_recv: Arc<Once>,
    char_size: XY,
    win_size: XY,
    cursor: XY,
}

impl WrRest {
    const CONTINUE_CODE: i32 = 0;
    const STOP_CODE: i32 = 1;

    fn run_return_cb(&mut self, stepping: bool, ev: Event<'_, Action>, cf: &mut ControlFlow) {
        if self.kill_recv.is_completed() {
            cf.set_exit_with_code(Self::STOP_CODE);
            return;
        }

        if stepping {
            // hand control back right after this event
            cf.set_exit_with_code(Self::CONTINUE_CODE)
        } else {
            // check at least once a second whether we should quit
            cf.set_wait_until(Instant::now() + Duration::from_secs(1));
        }

        macro_rules! send {
            ( $( $act:expr ),* $(,)? ) => { {
                $(
                    if self.act_send.send( $act ).is_err() {
                        // they hung up on us! how rude!
                        cf.set_exit_with_code(Self::STOP_CODE);
                    }
                )*
            } };
        }
        let event = match ev {
            Event::UserEvent(a) => return send!(a),
            Event::RedrawRequested(_) => return send!(Action::Redraw),
            Event::Suspended => return send!(Action::Paused),
            Event::Resumed => return send!(Action::Unpaused),
            Event::WindowEvent { event, .. } => event,
            _ => return,
        };
        match event {
            WindowEvent::Resized(sz) => {
                self.win_size = XY(sz.width as usize, sz.height as usize);
                send!(Action::Redraw);
            }
            WindowEvent::CloseRequested | WindowEvent::Destroyed => send!(Action::Closed),
            WindowEvent::KeyboardInput { input, .. } => {
                if let Some(key) = key4vkc(input.virtual_keycode) {
                    match input.state {
                        ElementState::Pressed => send!(Action::KeyPress { key }),
                        ElementState::Released => send!(Action::KeyRelease { key }),
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pixel = XY(position.x.max(0.0) as usize, position.y.max(0.0) as usize);
                let pos = char4pixel_pos(pixel, self.char_size, self.win_size);
                if self.cursor != pos {
                    self.cursor = pos;
                    send!(Action::MouseMove { pos });
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = mb4button(button) {
                    let pos = self.cursor;
                    match state {
                        ElementState::Pressed => send!(Action::MousePress { pos, button }),
                        ElementState::Released => send!(Action::MouseRelease { pos, button }),
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let up = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y > 0.0,
                    MouseScrollDelta::PixelDelta(p) => p.y > 0.0,
                };
                let button = if up { MouseButton::ScrollUp } else { MouseButton::ScrollDown };
                send!(Action::MousePress { pos: self.cursor, button });
            }
            _ => (),
        }
    }
}

/// Runner for a [`GuiSystem`].
pub struct GuiRunner {
    el: EventLoop<Action>,
    rest: WrRest,
}

impl IoRunner for GuiRunner {
    fn step(&mut self) -> bool {
        self.el.run_return(|ev, _, cf| self.rest.run_return_cb(true, ev, cf)) == WrRest::STOP_CODE
    }

    fn run(&mut self) {
        self.el.run_return(|ev, _, cf| self.rest.run_return_cb(false, ev, cf));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pixels_map_to_centered_cells() {
        let ch = XY(10, 20);
        // 11x11 cells, with 2px of margin left/right and 4px top/bottom
        let win = XY(114, 228);
        assert_eq!(char4pixel_pos(XY(2, 4), ch, win), XY(0, 0));
        assert_eq!(char4pixel_pos(XY(13, 25), ch, win), XY(1, 1));
        assert_eq!(char4pixel_pos(XY(0, 0), ch, win), XY(0, 0));
        assert_eq!(char4pixel_pos(XY(500, 500), ch, win), XY(10, 10));
    }

    #[test]
    fn tiny_windows_dont_underflow() {
        assert_eq!(char4pixel_pos(XY(3, 3), XY(10, 20), XY(4, 4)), XY(0, 0));
    }

    #[test]
    fn hotkeys_are_lowercase_chars() {
        assert_eq!(key4vkc(Some(VirtualKeyCode::R)), Some(Key::Char('r')));
        assert_eq!(key4vkc(Some(VirtualKeyCode::Numpad3)), Some(Key::Char('3')));
        assert_eq!(key4vkc(Some(VirtualKeyCode::Escape)), Some(Key::Escape));
        assert_eq!(key4vkc(None), None);
    }
}
