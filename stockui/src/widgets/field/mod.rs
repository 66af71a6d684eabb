//! Input widget: a single-line text field with validation state.

mod events;
mod render;
mod state;

pub use state::Input;
