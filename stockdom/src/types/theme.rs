use crate::types::{Color, Rgb};

/// A theme provides named color variables.
pub trait Theme: Send + Sync {
    /// Resolve a color variable name to a concrete color.
    /// Returns None if the variable is not defined.
    fn resolve(&self, name: &str) -> Option<&Color>;
}

/// Theme that resolves nothing.
pub struct EmptyTheme;

impl Theme for EmptyTheme {
    fn resolve(&self, _name: &str) -> Option<&Color> {
        None
    }
}

/// Dark dashboard palette with a yellow accent.
///
/// Variable names follow the semantic roles used by the widget tokens:
/// `background`, `foreground`, `popover`, `popover-foreground`, `primary`,
/// `primary-foreground`, `muted`, `muted-foreground`, `accent`,
/// `accent-foreground`, `border`, `input`, `ring` and `destructive`.
pub struct DefaultTheme {
    pub background: Color,
    pub foreground: Color,
    pub popover: Color,
    pub popover_foreground: Color,
    pub primary: Color,
    pub primary_foreground: Color,
    pub muted: Color,
    pub muted_foreground: Color,
    pub accent: Color,
    pub accent_foreground: Color,
    pub border: Color,
    pub input: Color,
    pub ring: Color,
    pub destructive: Color,
}

impl DefaultTheme {
    pub const fn new() -> Self {
        Self {
            background: Color::Rgb { r: 20, g: 20, b: 20 },
            foreground: Color::Rgb { r: 230, g: 230, b: 230 },
            popover: Color::Rgb { r: 33, g: 33, b: 36 },
            popover_foreground: Color::Rgb { r: 230, g: 230, b: 230 },
            primary: Color::Rgb { r: 253, g: 212, b: 88 },
            primary_foreground: Color::Rgb { r: 20, g: 20, b: 20 },
            muted: Color::Rgb { r: 48, g: 48, b: 52 },
            muted_foreground: Color::Rgb { r: 140, g: 140, b: 150 },
            accent: Color::Rgb { r: 60, g: 60, b: 66 },
            accent_foreground: Color::Rgb { r: 250, g: 250, b: 250 },
            border: Color::Rgb { r: 70, g: 70, b: 78 },
            input: Color::Rgb { r: 90, g: 90, b: 98 },
            ring: Color::Rgb { r: 253, g: 212, b: 88 },
            destructive: Color::Rgb { r: 239, g: 83, b: 80 },
        }
    }
}

impl Default for DefaultTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for DefaultTheme {
    fn resolve(&self, name: &str) -> Option<&Color> {
        match name {
            "background" => Some(&self.background),
            "foreground" => Some(&self.foreground),
            "popover" => Some(&self.popover),
            "popover-foreground" => Some(&self.popover_foreground),
            "primary" => Some(&self.primary),
            "primary-foreground" => Some(&self.primary_foreground),
            "muted" => Some(&self.muted),
            "muted-foreground" => Some(&self.muted_foreground),
            "accent" => Some(&self.accent),
            "accent-foreground" => Some(&self.accent_foreground),
            "border" => Some(&self.border),
            "input" => Some(&self.input),
            "ring" => Some(&self.ring),
            "destructive" => Some(&self.destructive),
            _ => None,
        }
    }
}

/// Resolves theme variables to concrete RGB values.
pub struct ColorContext<'a> {
    theme: &'a dyn Theme,
}

impl<'a> ColorContext<'a> {
    pub fn new(theme: &'a dyn Theme) -> Self {
        Self { theme }
    }

    pub fn to_rgb(&self, color: &Color) -> Rgb {
        self.resolve(color, 0).to_rgb()
    }

    // Depth guards against themes whose variables reference each other.
    fn resolve(&self, color: &Color, depth: u8) -> Color {
        match color {
            Color::Var(name) if depth < 8 => match self.theme.resolve(name) {
                Some(resolved) => self.resolve(resolved, depth + 1),
                None => {
                    log::trace!("unresolved color variable {name}");
                    Color::Rgb { r: 0, g: 0, b: 0 }
                }
            },
            Color::Var(_) => Color::Rgb { r: 0, g: 0, b: 0 },
            other => other.clone(),
        }
    }
}
