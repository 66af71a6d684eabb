//! Select widget: a trigger showing the current value and a portalled list
//! of options.

mod events;
pub mod item;
mod render;
mod state;

pub use item::{SelectEntry, SelectItem};
pub use render::CONTENT_Z_INDEX;
pub use state::{ChangeHandler, ContentPosition, Select, SelectChange, TriggerSize};
