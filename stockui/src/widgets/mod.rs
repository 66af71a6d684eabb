//! Composite widgets.
//!
//! Each widget is a cheap handle over shared state. It builds a
//! `stockdom::Element` for the current state and takes `stockdom` events
//! through a `handle` method that reports whether the event was used.

pub mod button;
pub mod command;
pub mod field;
pub mod label;
pub mod popover;
pub mod select;

pub use button::Button;
pub use command::{Command, CommandDialog, CommandEntry, CommandItem};
pub use field::Input;
pub use label::Label;
pub use popover::Popover;
pub use select::{Select, SelectEntry, SelectItem};
