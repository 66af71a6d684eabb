//! Command widget: a query input over a filterable list of actions, usable
//! inline or as a modal palette.

mod dialog;
mod events;
pub mod filter;
pub mod item;
mod render;
mod state;

pub use dialog::{CommandDialog, DEFAULT_DESCRIPTION, DEFAULT_TITLE, DIALOG_Z_INDEX};
pub use filter::{
    fuzzy_filter, CommandError, Filter, FilterMatch, FuzzyFilter, PredicateFilter,
    SubstringFilter,
};
pub use item::{CommandEntry, CommandItem};
pub use state::{Command, SelectHandler, DEFAULT_EMPTY_TEXT, DEFAULT_PLACEHOLDER};
