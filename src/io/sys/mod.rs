//! The IO systems: one per way of showing the game, each enabled by a feature.

use crate::{
    io::{Action, Screen, XY},
    Result,
};

#[cfg(feature = "sys_cli")]
pub mod cli;
#[cfg(feature = "__sys_gui")]
pub mod gui;
#[cfg(feature = "sys_nop")]
pub mod nop;

/// An input/output system.
///
/// The output is called a "display" to distinguish it from the [`Screen`]. This object is associated with an
/// [`IoRunner`], which does whatever has to happen on the main thread.
pub trait IoSystem: Send {
    /// Actually render a [`Screen`] to the display.
    ///
    /// This must be able to handle `Screen`s of the wrong size without crashing.
    fn draw(&mut self, screen: &Screen) -> Result<()>;
    /// Get the size of the display, in characters.
    fn size(&self) -> XY;

    /// If the next user input is available, return it. Otherwise, return `None`.
    fn poll_input(&mut self) -> Result<Option<Action>>;

    /// Tells the associated [`IoRunner`] to stop and dispose of any resources it's handling.
    ///
    /// This **must not** wait for the runner to finish tearing down, since they usually share a thread.
    fn stop(&mut self);
}

/// The other half of an [`IoSystem`].
pub trait IoRunner {
    /// Execute one quick, non-blocking 'step'. Returns whether an exit has been requested (i.e. by
    /// [`IoSystem::stop`]) since the last time `step` was called.
    ///
    /// Will always be called on the main thread.
    #[must_use]
    fn step(&mut self) -> bool;

    /// Run until the paired [`IoSystem`] says to [stop](IoSystem::stop).
    fn run(&mut self) {
        while !self.step() {}
    }
}

/// Based on IO system features enabled, attempt to initialize an IO system; in order:
///
/// - NOP (`sys_nop`), for benchmarks
/// - CPU-rendered GUI (`sys_gui_softbuffer`)
/// - crossterm CLI (`sys_cli`)
///
/// Takes the [`AssetDir`](crate::assets::AssetDir) to load fonts from, then a function or method to call with the
/// loaded system, as `$thing(iosys, iorun)`. If it's called, this "returns" `Ok(its result)`. Otherwise every load
/// failed, and this "returns" `Err(map)`, mapping each feature name to why it failed.
#[macro_export]
macro_rules! load {
    ( $assets:expr, $( $callback:tt )* ) => {
        loop {
            #[allow(unused_variables)]
            let assets: &$crate::assets::AssetDir = $assets;
            #[allow(unused_mut)]
            let mut errs = ::std::collections::BTreeMap::<&'static str, $crate::Error>::new();
            #[cfg(feature = "sys_nop")]
            match $crate::io::sys::nop::NopSystem::new() {
                Ok((iosys, iorun)) => {
                    ::log::info!("using {}", "sys_nop");
                    break Ok($($callback)*(iosys, iorun));
                }
                Err(e) => { errs.insert("sys_nop", e); }
            }
            #[cfg(feature = "sys_gui_softbuffer")]
            match $crate::io::sys::gui::GuiSystem::<$crate::io::sys::gui::softbuffer::SoftbufferRenderer>::new(
                assets,
                $crate::constants::graphics::GUI_FONT_SIZE,
            ) {
                Ok((iosys, iorun)) => {
                    ::log::info!("using {}", "sys_gui_softbuffer");
                    break Ok($($callback)*(iosys, iorun));
                }
                Err(e) => { errs.insert("sys_gui_softbuffer", e); }
            }
            #[cfg(feature = "sys_cli")]
            match $crate::io::sys::cli::CtSystem::new() {
                Ok((iosys, iorun)) => {
                    ::log::info!("using {}", "sys_cli");
                    break Ok($($callback)*(iosys, iorun));
                }
                Err(e) => { errs.insert("sys_cli", e); }
            }
            break Err(errs);
        }
    };
}
