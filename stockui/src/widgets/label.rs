//! Label associated with a control.
//!
//! A label is stateless. It carries `for=<control id>`, which the focus
//! manager follows when the label is clicked.

use stockdom::{Element, FOR_ATTR};

use crate::adapter::{self, Props};
use crate::tokens::{Slot, State};

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    text: String,
    control: String,
    disabled: bool,
    props: Props,
}

impl Label {
    /// Label `text` for the control whose element id is `control`.
    pub fn new(text: impl Into<String>, control: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            control: control.into(),
            disabled: false,
            props: Props::default(),
        }
    }

    /// Mirror the control's disabled flag; the label renders dimmed.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn id(&self) -> String {
        self.props
            .id
            .clone()
            .unwrap_or_else(|| format!("{}-label", self.control))
    }

    pub fn element(&self) -> Element {
        let mut el = Element::text(&self.text)
            .id(self.id())
            .clickable(true)
            .data(FOR_ATTR, &self.control);
        if self.disabled {
            el = adapter::with_states(Slot::Label, el, &[State::Disabled]);
        }
        adapter::adapt(Slot::Label, el, &self.props)
    }
}
