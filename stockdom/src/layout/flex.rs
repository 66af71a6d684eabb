use std::collections::HashMap;

use super::Rect;
use crate::element::{Content, Element};
use crate::text::display_width;
use crate::types::{Align, Direction, Position, Size};

pub type LayoutResult = HashMap<String, Rect>;

pub fn layout(element: &Element, available: Rect) -> LayoutResult {
    let mut result = LayoutResult::new();
    layout_element(element, available, available, &mut result);
    result
}

/// Natural `(width, height)` of an element, including padding and border.
pub fn intrinsic_size(element: &Element) -> (u16, u16) {
    let chrome_w = element.padding.horizontal_total() + element.style.border_width() * 2;
    let chrome_h = element.padding.vertical_total() + element.style.border_width() * 2;

    let (w, h) = match &element.content {
        Content::None => (0, 0),
        Content::Text(text) => {
            let lines: Vec<&str> = text.split('\n').collect();
            let width = lines.iter().map(|l| display_width(l)).max().unwrap_or(0);
            (clamp_u16(width), clamp_u16(lines.len()))
        }
        Content::Children(children) => {
            let flow: Vec<(u16, u16)> = children
                .iter()
                .filter(|c| c.position != Position::Absolute)
                .map(fixed_or_intrinsic)
                .collect();
            let gaps = element.gap.saturating_mul(flow.len().saturating_sub(1) as u16);
            match element.direction {
                Direction::Row => (
                    flow.iter().map(|s| s.0).fold(0u16, u16::saturating_add) + gaps,
                    flow.iter().map(|s| s.1).max().unwrap_or(0),
                ),
                Direction::Column => (
                    flow.iter().map(|s| s.0).max().unwrap_or(0),
                    flow.iter().map(|s| s.1).fold(0u16, u16::saturating_add) + gaps,
                ),
            }
        }
    };

    let width = apply_width_limits(element, w.saturating_add(chrome_w));
    let height = apply_height_limits(element, h.saturating_add(chrome_h));
    (width, height)
}

fn fixed_or_intrinsic(element: &Element) -> (u16, u16) {
    let (w, h) = intrinsic_size(element);
    let w = match element.width {
        Size::Fixed(n) => n,
        _ => w,
    };
    let h = match element.height {
        Size::Fixed(n) => n,
        _ => h,
    };
    (w, h)
}

fn clamp_u16(n: usize) -> u16 {
    n.min(u16::MAX as usize) as u16
}

fn apply_width_limits(element: &Element, width: u16) -> u16 {
    let width = element.min_width.map_or(width, |min| width.max(min));
    element.max_width.map_or(width, |max| width.min(max))
}

fn apply_height_limits(element: &Element, height: u16) -> u16 {
    element.max_height.map_or(height, |max| height.min(max))
}

fn resolve(size: Size, available: u16, intrinsic: u16) -> u16 {
    match size {
        Size::Fixed(n) => n,
        Size::Fill => available,
        Size::Auto => intrinsic.min(available),
        Size::Percent(p) => ((available as f32) * p / 100.0).round() as u16,
    }
}

fn layout_element(element: &Element, available: Rect, screen: Rect, result: &mut LayoutResult) {
    let (iw, ih) = intrinsic_size(element);

    let rect = if element.position == Position::Absolute {
        let x = element.left.unwrap_or(0).max(0) as u16;
        let y = element.top.unwrap_or(0).max(0) as u16;
        let room_w = screen.right().saturating_sub(x);
        let room_h = screen.bottom().saturating_sub(y);
        let width = apply_width_limits(element, resolve(element.width, room_w, iw)).min(room_w);
        let height = apply_height_limits(element, resolve(element.height, room_h, ih)).min(room_h);
        Rect::new(x, y, width, height)
    } else {
        let width = apply_width_limits(element, resolve(element.width, available.width, iw));
        let height = apply_height_limits(element, resolve(element.height, available.height, ih));
        Rect::new(available.x, available.y, width, height)
    };

    result.insert(element.id.clone(), rect);
    layout_children(element, rect, screen, result);
}

fn layout_children(element: &Element, rect: Rect, screen: Rect, result: &mut LayoutResult) {
    let Content::Children(children) = &element.content else {
        return;
    };

    let border = element.style.border_width();
    let inner = rect.shrink(
        element.padding.top + border,
        element.padding.right + border,
        element.padding.bottom + border,
        element.padding.left + border,
    );

    let flow: Vec<&Element> = children
        .iter()
        .filter(|c| c.position != Position::Absolute)
        .collect();

    let is_row = element.direction == Direction::Row;
    let main_total = if is_row { inner.width } else { inner.height };
    let cross_total = if is_row { inner.height } else { inner.width };

    // First pass: sizes of non-growing children along the main axis.
    let mut main_sizes: Vec<Option<u16>> = Vec::with_capacity(flow.len());
    let mut fixed_sum = 0u16;
    let mut grow_sum = 0u16;
    for child in &flow {
        let main_size = if is_row { child.width } else { child.height };
        let grows = child.flex_grow > 0 || main_size == Size::Fill;
        if grows {
            grow_sum += child.flex_grow.max(1);
            main_sizes.push(None);
        } else {
            let (iw, ih) = intrinsic_size(child);
            let natural = if is_row { iw } else { ih };
            let size = resolve(main_size, main_total, natural);
            fixed_sum = fixed_sum.saturating_add(size);
            main_sizes.push(Some(size));
        }
    }

    let gaps = element.gap.saturating_mul(flow.len().saturating_sub(1) as u16);
    let mut remaining = main_total.saturating_sub(fixed_sum).saturating_sub(gaps);

    // Second pass: place children.
    let mut cursor = 0u16;
    for (child, fixed) in flow.iter().zip(main_sizes) {
        let main = match fixed {
            Some(size) => size,
            None => {
                let share = child.flex_grow.max(1);
                let size = if grow_sum == 0 {
                    0
                } else {
                    ((remaining as u32 * share as u32) / grow_sum as u32) as u16
                };
                grow_sum -= share;
                remaining -= size;
                size
            }
        };
        let main = main.min(main_total.saturating_sub(cursor));

        let (iw, ih) = intrinsic_size(child);
        let cross_size = if is_row { child.height } else { child.width };
        let natural_cross = if is_row { ih } else { iw };
        let align = element.align;
        let cross = match (cross_size, align) {
            (Size::Auto, Align::Stretch) => cross_total,
            _ => resolve(cross_size, cross_total, natural_cross).min(cross_total),
        };
        let cross_offset = match align {
            Align::Start | Align::Stretch => 0,
            Align::Center => (cross_total - cross) / 2,
            Align::End => cross_total - cross,
        };

        let slot = if is_row {
            Rect::new(inner.x + cursor, inner.y + cross_offset, main, cross)
        } else {
            Rect::new(inner.x + cross_offset, inner.y + cursor, cross, main)
        };

        let child_rect = Rect::new(
            slot.x,
            slot.y,
            apply_width_limits(child, slot.width).min(if is_row { main } else { cross_total }),
            apply_height_limits(child, slot.height).min(if is_row { cross_total } else { main }),
        );
        result.insert(child.id.clone(), child_rect);
        layout_children(child, child_rect, screen, result);

        cursor = cursor.saturating_add(main).saturating_add(element.gap);
    }

    for child in children.iter().filter(|c| c.position == Position::Absolute) {
        layout_element(child, inner, screen, result);
    }
}
