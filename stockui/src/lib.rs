pub mod adapter;
pub mod events;
pub mod form;
pub mod primitive;
pub mod tokens;
pub mod validation;
pub mod widgets;

pub use events::{EventContext, EventResult};

/// Display width of `s` in cells, saturating.
pub(crate) fn text_width(s: &str) -> u16 {
    stockdom::text::display_width(s).min(u16::MAX as usize) as u16
}

pub mod prelude {
    pub use crate::adapter::Props;
    pub use crate::events::{EventContext, EventResult};
    pub use crate::form::{Form, SubmitError, SubmitState};
    pub use crate::primitive::popover::{Align, Side};
    pub use crate::primitive::{Commit, ItemDescriptor, ItemId, Outcome, SelectionState};
    pub use crate::validation::{ErrorDisplay, Validatable, ValidationResult, Validator};
    pub use crate::widgets::command::{CommandError, Filter, FuzzyFilter, SubstringFilter};
    pub use crate::widgets::select::{ContentPosition, SelectChange, TriggerSize};
    pub use crate::widgets::{
        Button, Command, CommandDialog, CommandEntry, CommandItem, Input, Label, Popover,
        Select, SelectEntry, SelectItem,
    };
}
