//! Default style tokens, one per structural slot.
//!
//! The table is built once and never mutated afterwards. Colors are theme
//! variables, so the concrete palette stays with the host theme.

use std::collections::HashMap;
use std::sync::OnceLock;

use stockdom::{Border, Color, Style};

/// Structural slot names, written to elements as `data-slot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Label,
    Popover,
    PopoverTrigger,
    PopoverContent,
    PopoverAnchor,
    Select,
    SelectGroup,
    SelectValue,
    SelectTrigger,
    SelectContent,
    SelectLabel,
    SelectItem,
    SelectItemIndicator,
    SelectSeparator,
    SelectScrollUpButton,
    SelectScrollDownButton,
    Command,
    CommandDialog,
    CommandInputWrapper,
    CommandInput,
    CommandList,
    CommandEmpty,
    CommandGroup,
    CommandItem,
    CommandSeparator,
    CommandShortcut,
    Field,
    FieldError,
    Button,
}

impl Slot {
    pub const ALL: [Slot; 29] = [
        Slot::Label,
        Slot::Popover,
        Slot::PopoverTrigger,
        Slot::PopoverContent,
        Slot::PopoverAnchor,
        Slot::Select,
        Slot::SelectGroup,
        Slot::SelectValue,
        Slot::SelectTrigger,
        Slot::SelectContent,
        Slot::SelectLabel,
        Slot::SelectItem,
        Slot::SelectItemIndicator,
        Slot::SelectSeparator,
        Slot::SelectScrollUpButton,
        Slot::SelectScrollDownButton,
        Slot::Command,
        Slot::CommandDialog,
        Slot::CommandInputWrapper,
        Slot::CommandInput,
        Slot::CommandList,
        Slot::CommandEmpty,
        Slot::CommandGroup,
        Slot::CommandItem,
        Slot::CommandSeparator,
        Slot::CommandShortcut,
        Slot::Field,
        Slot::FieldError,
        Slot::Button,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Slot::Label => "label",
            Slot::Popover => "popover",
            Slot::PopoverTrigger => "popover-trigger",
            Slot::PopoverContent => "popover-content",
            Slot::PopoverAnchor => "popover-anchor",
            Slot::Select => "select",
            Slot::SelectGroup => "select-group",
            Slot::SelectValue => "select-value",
            Slot::SelectTrigger => "select-trigger",
            Slot::SelectContent => "select-content",
            Slot::SelectLabel => "select-label",
            Slot::SelectItem => "select-item",
            Slot::SelectItemIndicator => "select-item-indicator",
            Slot::SelectSeparator => "select-separator",
            Slot::SelectScrollUpButton => "select-scroll-up-button",
            Slot::SelectScrollDownButton => "select-scroll-down-button",
            Slot::Command => "command",
            Slot::CommandDialog => "command-dialog",
            Slot::CommandInputWrapper => "command-input-wrapper",
            Slot::CommandInput => "command-input",
            Slot::CommandList => "command-list",
            Slot::CommandEmpty => "command-empty",
            Slot::CommandGroup => "command-group",
            Slot::CommandItem => "command-item",
            Slot::CommandSeparator => "command-separator",
            Slot::CommandShortcut => "command-shortcut",
            Slot::Field => "field",
            Slot::FieldError => "field-error",
            Slot::Button => "button",
        }
    }
}

/// State attributes that have their own token layered over the slot default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Highlighted,
    Disabled,
    Placeholder,
    Focused,
    Invalid,
}

impl State {
    pub const fn attr(self) -> &'static str {
        match self {
            State::Highlighted => "data-highlighted",
            State::Disabled => "data-disabled",
            State::Placeholder => "data-placeholder",
            State::Focused => "data-focused",
            State::Invalid => "aria-invalid",
        }
    }
}

type Table = HashMap<(Slot, Option<State>), Style>;

static TOKENS: OnceLock<Table> = OnceLock::new();
static EMPTY: Style = Style {
    background: None,
    foreground: None,
    border: None,
    bold: None,
    italic: None,
    underline: None,
    dim: None,
};

/// Build the table now instead of on first lookup.
pub fn init() {
    let table = TOKENS.get_or_init(build);
    log::debug!("style tokens ready ({} entries)", table.len());
}

/// Default style of a slot.
pub fn style(slot: Slot) -> &'static Style {
    TOKENS.get_or_init(build).get(&(slot, None)).unwrap_or(&EMPTY)
}

/// Extra style applied to a slot while `state` holds. Empty when the slot has
/// no token for that state.
pub fn state_style(slot: Slot, state: State) -> &'static Style {
    TOKENS
        .get_or_init(build)
        .get(&(slot, Some(state)))
        .unwrap_or(&EMPTY)
}

/// Slot default with every active state layered on top, in the given order.
pub fn resolve(slot: Slot, states: &[State]) -> Style {
    states
        .iter()
        .fold(style(slot).clone(), |acc, &state| acc.merge(state_style(slot, state)))
}

fn var(name: &str) -> Color {
    Color::var(name)
}

fn build() -> Table {
    let mut t = Table::new();
    let mut put = |slot: Slot, state: Option<State>, style: Style| {
        t.insert((slot, state), style);
    };

    let floating = Style::new()
        .background(var("popover"))
        .foreground(var("popover-foreground"))
        .border(Border::Rounded);
    let highlighted = Style::new()
        .background(var("accent"))
        .foreground(var("accent-foreground"));
    let disabled = Style::new().dim();
    let muted = Style::new().foreground(var("muted-foreground"));
    let focused = Style::new().foreground(var("ring"));

    put(Slot::Label, None, Style::new().bold());
    put(Slot::Label, Some(State::Disabled), disabled.clone().no_bold());

    put(Slot::PopoverContent, None, floating.clone());

    put(
        Slot::SelectTrigger,
        None,
        Style::new().foreground(var("foreground")).border(Border::Rounded),
    );
    put(Slot::SelectTrigger, Some(State::Focused), focused.clone());
    put(Slot::SelectTrigger, Some(State::Disabled), disabled.clone());
    put(
        Slot::SelectTrigger,
        Some(State::Invalid),
        Style::new().foreground(var("destructive")),
    );
    put(Slot::SelectValue, Some(State::Placeholder), muted.clone());
    put(Slot::SelectContent, None, floating.clone());
    put(Slot::SelectLabel, None, muted.clone());
    put(Slot::SelectItem, None, Style::new().foreground(var("popover-foreground")));
    put(Slot::SelectItem, Some(State::Highlighted), highlighted.clone());
    put(Slot::SelectItem, Some(State::Disabled), disabled.clone());
    put(Slot::SelectSeparator, None, Style::new().foreground(var("border")));
    put(Slot::SelectScrollUpButton, None, muted.clone());
    put(Slot::SelectScrollDownButton, None, muted.clone());

    put(
        Slot::Command,
        None,
        Style::new()
            .background(var("popover"))
            .foreground(var("popover-foreground")),
    );
    put(Slot::CommandDialog, None, floating);
    put(
        Slot::CommandInputWrapper,
        None,
        Style::new().foreground(var("border")),
    );
    put(Slot::CommandInput, None, Style::new().foreground(var("foreground")));
    put(Slot::CommandInput, Some(State::Placeholder), muted.clone());
    put(Slot::CommandEmpty, None, muted.clone());
    put(Slot::CommandGroup, None, muted.clone().bold());
    put(Slot::CommandItem, None, Style::new().foreground(var("popover-foreground")));
    put(Slot::CommandItem, Some(State::Highlighted), highlighted);
    put(Slot::CommandItem, Some(State::Disabled), disabled.clone());
    put(Slot::CommandSeparator, None, Style::new().foreground(var("border")));
    put(Slot::CommandShortcut, None, muted.clone());

    put(
        Slot::Field,
        None,
        Style::new().foreground(var("foreground")).border(Border::Rounded),
    );
    put(Slot::Field, Some(State::Focused), focused.clone());
    put(Slot::Field, Some(State::Placeholder), muted);
    put(Slot::Field, Some(State::Disabled), disabled.clone());
    put(
        Slot::Field,
        Some(State::Invalid),
        Style::new().foreground(var("destructive")),
    );
    put(
        Slot::FieldError,
        None,
        Style::new().foreground(var("destructive")),
    );

    put(
        Slot::Button,
        None,
        Style::new()
            .background(var("primary"))
            .foreground(var("primary-foreground"))
            .bold(),
    );
    put(
        Slot::Button,
        Some(State::Focused),
        Style::new().background(var("ring")),
    );
    put(Slot::Button, Some(State::Disabled), disabled);

    t
}
