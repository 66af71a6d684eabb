use crate::buffer::{Buffer, Cell};
use crate::element::{Content, Element};
use crate::layout::{LayoutResult, Rect};
use crate::text::{align_offset, char_width, display_width, truncate_to_width};
use crate::types::{Border, ColorContext, Overflow, Rgb, Style};

/// An element queued for drawing with its stacking order and clip rect.
struct RenderItem<'a> {
    element: &'a Element,
    z_index: i16,
    tree_order: usize,
    clip: Option<Rect>,
}

/// Draw `root` into `buf` using a precomputed layout.
///
/// Elements are painted in ascending z_index; ties keep tree order, so later
/// siblings paint over earlier ones. Children inherit their parent's z_index
/// as a floor, which lets a portal subtree stay above the page it overlays.
pub fn render_to_buffer(
    root: &Element,
    layout: &LayoutResult,
    buf: &mut Buffer,
    colors: &ColorContext,
) {
    let mut items = Vec::new();
    collect(root, layout, &mut items, root.z_index, None);
    items.sort_by_key(|item| (item.z_index, item.tree_order));

    log::trace!("rendering {} elements", items.len());

    for item in items {
        let Some(rect) = layout.get(&item.element.id) else {
            continue;
        };
        let area = match item.clip {
            Some(clip) => rect.intersect(&clip),
            None => *rect,
        };
        if area.is_empty() {
            continue;
        }
        draw(item.element, *rect, area, buf, colors);
    }
}

fn collect<'a>(
    element: &'a Element,
    layout: &LayoutResult,
    items: &mut Vec<RenderItem<'a>>,
    parent_z: i16,
    parent_clip: Option<Rect>,
) {
    let z_index = element.z_index.max(parent_z);
    let tree_order = items.len();
    items.push(RenderItem {
        element,
        z_index,
        tree_order,
        clip: parent_clip,
    });

    let child_clip = match (element.overflow, layout.get(&element.id)) {
        (Overflow::Hidden, Some(rect)) => {
            let border = element.style.border_width();
            let inner = rect.shrink(
                element.padding.top + border,
                element.padding.right + border,
                element.padding.bottom + border,
                element.padding.left + border,
            );
            Some(match parent_clip {
                Some(clip) => inner.intersect(&clip),
                None => inner,
            })
        }
        _ => parent_clip,
    };

    for child in element.content.children() {
        collect(child, layout, items, z_index, child_clip);
    }
}

fn draw(element: &Element, rect: Rect, clip: Rect, buf: &mut Buffer, colors: &ColorContext) {
    let style = &element.style;
    let fg = style
        .foreground
        .as_ref()
        .map(|c| colors.to_rgb(c))
        .unwrap_or(Rgb::new(255, 255, 255));
    let bg = style.background.as_ref().map(|c| colors.to_rgb(c));

    if let Some(bg) = bg {
        fill(buf, clip, bg);
    }

    if let Some(border) = style.border {
        draw_border(border, rect, clip, fg, buf);
    }

    if let Content::Text(text) = &element.content {
        draw_text(text, element, rect, clip, fg, bg, style, buf);
    }
}

fn fill(buf: &mut Buffer, area: Rect, bg: Rgb) {
    for y in area.y..area.bottom().min(buf.height()) {
        for x in area.x..area.right().min(buf.width()) {
            if let Some(cell) = buf.get_mut(x, y) {
                *cell = Cell::new(' ').with_bg(bg);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_text(
    text: &str,
    element: &Element,
    rect: Rect,
    clip: Rect,
    fg: Rgb,
    bg: Option<Rgb>,
    style: &Style,
    buf: &mut Buffer,
) {
    let border = style.border_width();
    let inner = rect.shrink(
        element.padding.top + border,
        element.padding.right + border,
        element.padding.bottom + border,
        element.padding.left + border,
    );
    let text_style = style.text_style();

    for (row, line) in text.split('\n').enumerate() {
        let y = inner.y.saturating_add(row as u16);
        if y >= inner.bottom() {
            break;
        }

        let line = truncate_to_width(line, inner.width as usize);
        let offset = align_offset(display_width(&line), inner.width as usize, element.text_align);
        let mut x = inner.x.saturating_add(offset as u16);

        for ch in line.chars() {
            let width = char_width(ch) as u16;
            if width == 0 {
                continue;
            }
            if x + width > inner.right() {
                break;
            }
            if clip.contains(x, y) {
                // Keep whatever background is already painted underneath.
                let cell_bg = bg.unwrap_or_else(|| buf.get(x, y).map(|c| c.bg).unwrap_or_default());
                buf.set(
                    x,
                    y,
                    Cell::new(ch).with_fg(fg).with_bg(cell_bg).with_style(text_style),
                );
                if width == 2 && clip.contains(x + 1, y) {
                    let mut continuation = Cell::new(' ').with_bg(cell_bg);
                    continuation.wide_continuation = true;
                    buf.set(x + 1, y, continuation);
                }
            }
            x += width;
        }
    }
}

fn draw_border(border: Border, rect: Rect, clip: Rect, fg: Rgb, buf: &mut Buffer) {
    let (tl, tr, bl, br, h, v) = match border {
        Border::None => return,
        Border::Single => ('┌', '┐', '└', '┘', '─', '│'),
        Border::Double => ('╔', '╗', '╚', '╝', '═', '║'),
        Border::Rounded => ('╭', '╮', '╰', '╯', '─', '│'),
        Border::Thick => ('┏', '┓', '┗', '┛', '━', '┃'),
    };

    if rect.width < 2 || rect.height < 2 {
        return;
    }

    let right = rect.right() - 1;
    let bottom = rect.bottom() - 1;

    let mut put = |x: u16, y: u16, ch: char| {
        if clip.contains(x, y) {
            if let Some(cell) = buf.get_mut(x, y) {
                cell.char = ch;
                cell.fg = fg;
                cell.wide_continuation = false;
            }
        }
    };

    put(rect.x, rect.y, tl);
    put(right, rect.y, tr);
    put(rect.x, bottom, bl);
    put(right, bottom, br);

    for x in (rect.x + 1)..right {
        put(x, rect.y, h);
        put(x, bottom, h);
    }
    for y in (rect.y + 1)..bottom {
        put(rect.x, y, v);
        put(right, y, v);
    }
}
