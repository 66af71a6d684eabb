/// Where a widget shows its validation message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorDisplay {
    /// On its own row under the control.
    #[default]
    Below,
    /// To the right of the control, on the same row.
    Inline,
    /// Not shown; the control is only styled as invalid.
    None,
}
