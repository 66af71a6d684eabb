//! Styling adapter between widgets and the elements they emit.
//!
//! Every element a widget produces goes through [`adapt`], which stamps the
//! structural slot, layers the caller's style over the slot default and copies
//! the caller's attributes verbatim. The adapter holds no state.

use std::collections::BTreeMap;

use stockdom::{Element, Style, SLOT_ATTR};

use crate::tokens::{self, Slot, State};

/// Caller-supplied configuration for one adapted element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    /// Overrides the element's generated id.
    pub id: Option<String>,
    /// Layered over the slot default; set fields win.
    pub style: Style,
    pub disabled: bool,
    /// Passed through to the element untouched.
    pub attrs: BTreeMap<String, String>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }
}

/// Apply `slot` defaults and `props` to `element`.
///
/// Style precedence, lowest first: slot default, whatever state styling the
/// widget already put on the element, the caller override.
pub fn adapt(slot: Slot, element: Element, props: &Props) -> Element {
    let mut element = element;

    if let Some(id) = &props.id {
        element.id = id.clone();
    }

    let mut base = tokens::style(slot).merge(&element.style);
    if props.disabled {
        element.disabled = true;
        element
            .data
            .insert(State::Disabled.attr().to_string(), "true".to_string());
        base = base.merge(tokens::state_style(slot, State::Disabled));
    }
    element.style = base.merge(&props.style);

    for (key, value) in &props.attrs {
        element.data.insert(key.clone(), value.clone());
    }
    element
        .data
        .insert(SLOT_ATTR.to_string(), slot.as_str().to_string());

    element
}

/// Adapt with no caller configuration.
pub fn slot(slot: Slot, element: Element) -> Element {
    adapt(slot, element, &Props::default())
}

/// Mirror a set of state flags onto an element and layer their tokens.
pub(crate) fn with_states(slot: Slot, element: Element, states: &[State]) -> Element {
    let mut element = element;
    for state in states {
        element
            .data
            .insert(state.attr().to_string(), "true".to_string());
    }
    element.style = tokens::resolve(slot, states).merge(&element.style);
    element
}
