use super::{Border, Color, TextStyle};

/// Visual style of an element.
///
/// Every field is optional so that two styles can be layered: [`Style::merge`]
/// takes each field from the overriding style when it is set and falls back to
/// the base otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub background: Option<Color>,
    pub foreground: Option<Color>,
    pub border: Option<Border>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub dim: Option<bool>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = Some(true);
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = Some(true);
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = Some(true);
        self
    }

    /// Explicitly turn dimming off, overriding a base that sets it.
    pub fn no_dim(mut self) -> Self {
        self.dim = Some(false);
        self
    }

    pub fn no_bold(mut self) -> Self {
        self.bold = Some(false);
        self
    }

    /// Layer `over` on top of `self`. Fields set in `over` win.
    pub fn merge(&self, over: &Style) -> Style {
        Style {
            background: over.background.clone().or_else(|| self.background.clone()),
            foreground: over.foreground.clone().or_else(|| self.foreground.clone()),
            border: over.border.or(self.border),
            bold: over.bold.or(self.bold),
            italic: over.italic.or(self.italic),
            underline: over.underline.or(self.underline),
            dim: over.dim.or(self.dim),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }

    pub fn border_width(&self) -> u16 {
        self.border.map(|b| b.width()).unwrap_or(0)
    }

    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            bold: self.bold.unwrap_or(false),
            italic: self.italic.unwrap_or(false),
            underline: self.underline.unwrap_or(false),
            dim: self.dim.unwrap_or(false),
        }
    }
}
