//! A small immediate-mode UI: split the screen into [`Region`]s and attach elements to them.

mod bounds;
mod button;
mod list;
mod region;

pub use bounds::Bounds;
pub use button::Button;
pub use list::{List, Scroll};
pub use region::{Attachment, Region};
