//! Interaction primitives the composite widgets are built on.
//!
//! These hold state and perform transitions only. They know nothing about
//! elements, styling or slots.

pub mod listbox;
pub mod popover;

pub use listbox::{Commit, ItemDescriptor, ItemId, Listbox, Outcome, SelectionState};
pub use popover::{clamp, place, Placement, PopoverState, Side};
