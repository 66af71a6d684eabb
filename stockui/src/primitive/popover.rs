//! Open state and placement for content floating next to an anchor.

use stockdom::Rect;

/// Which side of the anchor the content prefers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Side {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Alignment of the content along the anchor edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    Start,
    #[default]
    Center,
    End,
}

impl Align {
    pub fn as_str(self) -> &'static str {
        match self {
            Align::Start => "start",
            Align::Center => "center",
            Align::End => "end",
        }
    }
}

/// Where floating content ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: u16,
    pub y: u16,
    /// The side actually used, after flipping.
    pub side: Side,
}

impl Placement {
    pub fn rect(&self, width: u16, height: u16) -> Rect {
        Rect::new(self.x, self.y, width, height)
    }
}

/// Place content of `size` next to `anchor` inside `viewport`.
///
/// The preferred side is flipped when the content does not fit there but does
/// fit on the opposite side. The result is always clamped to the viewport.
pub fn place(
    anchor: Rect,
    size: (u16, u16),
    viewport: Rect,
    side: Side,
    align: Align,
    offset: u16,
) -> Placement {
    let (width, height) = (size.0 as i32, size.1 as i32);
    let offset = offset as i32;

    let fits = |side: Side| match side {
        Side::Bottom => anchor.bottom() as i32 + offset + height <= viewport.bottom() as i32,
        Side::Top => anchor.y as i32 - offset - height >= viewport.y as i32,
        Side::Right => anchor.right() as i32 + offset + width <= viewport.right() as i32,
        Side::Left => anchor.x as i32 - offset - width >= viewport.x as i32,
    };
    let side = if !fits(side) && fits(side.opposite()) {
        log::trace!("flipping popover from {} to {}", side.as_str(), side.opposite().as_str());
        side.opposite()
    } else {
        side
    };

    let aligned = |start: u16, extent: u16, length: i32| -> i32 {
        let (start, extent) = (start as i32, extent as i32);
        match align {
            Align::Start => start,
            Align::Center => start + (extent - length) / 2,
            Align::End => start + extent - length,
        }
    };

    let (x, y) = match side {
        Side::Bottom => (
            aligned(anchor.x, anchor.width, width),
            anchor.bottom() as i32 + offset,
        ),
        Side::Top => (
            aligned(anchor.x, anchor.width, width),
            anchor.y as i32 - offset - height,
        ),
        Side::Right => (
            anchor.right() as i32 + offset,
            aligned(anchor.y, anchor.height, height),
        ),
        Side::Left => (
            anchor.x as i32 - offset - width,
            aligned(anchor.y, anchor.height, height),
        ),
    };

    Placement {
        x: clamp_axis(x, width, viewport.x, viewport.width),
        y: clamp_axis(y, height, viewport.y, viewport.height),
        side,
    }
}

/// Clamp a box at (`x`, `y`) so that it lies inside `viewport` wherever it
/// fits. Boxes larger than the viewport are pinned to its origin.
pub fn clamp(viewport: Rect, x: i32, y: i32, size: (u16, u16)) -> (u16, u16) {
    (
        clamp_axis(x, size.0 as i32, viewport.x, viewport.width),
        clamp_axis(y, size.1 as i32, viewport.y, viewport.height),
    )
}

fn clamp_axis(pos: i32, length: i32, start: u16, extent: u16) -> u16 {
    let min = start as i32;
    let max = (start as i32 + extent as i32 - length).max(min);
    pos.clamp(min, max) as u16
}

/// Open flag for a popover root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopoverState {
    open: bool,
}

impl PopoverState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns true if the state changed.
    pub fn open(&mut self) -> bool {
        !std::mem::replace(&mut self.open, true)
    }

    /// Returns true if the state changed.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }
}
