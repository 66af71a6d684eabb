use stockdom::{Align, Border, Edges, Element, Rect, Size, Style};

fn layout_root(root: &Element, width: u16, height: u16) -> stockdom::LayoutResult {
    stockdom::layout(root, Rect::new(0, 0, width, height))
}

// ============================================================================
// Flow Tests
// ============================================================================

#[test]
fn test_column_stacks_children_with_gap() {
    let root = Element::col()
        .id("root")
        .width(Size::Fixed(40))
        .height(Size::Fixed(20))
        .gap(1)
        .child(Element::text("Email").id("a"))
        .child(Element::text("Password").id("b"));

    let layout = layout_root(&root, 80, 24);

    assert_eq!(layout["a"], Rect::new(0, 0, 40, 1));
    assert_eq!(layout["b"], Rect::new(0, 2, 40, 1));
}

#[test]
fn test_row_uses_intrinsic_widths() {
    let root = Element::row()
        .id("root")
        .width(Size::Fixed(40))
        .height(Size::Fixed(1))
        .gap(2)
        .child(Element::text("Dashboard").id("a"))
        .child(Element::text("Search").id("b"));

    let layout = layout_root(&root, 80, 24);

    assert_eq!(layout["a"], Rect::new(0, 0, 9, 1));
    assert_eq!(layout["b"], Rect::new(11, 0, 6, 1));
}

#[test]
fn test_flex_grow_takes_remaining_space() {
    let root = Element::row()
        .id("root")
        .width(Size::Fixed(30))
        .height(Size::Fixed(1))
        .child(Element::text("Value").id("value").flex_grow(1))
        .child(Element::text("v").id("chevron"));

    let layout = layout_root(&root, 80, 24);

    assert_eq!(layout["value"].width, 29);
    assert_eq!(layout["chevron"], Rect::new(29, 0, 1, 1));
}

#[test]
fn test_padding_and_border_shrink_content() {
    let root = Element::col()
        .id("root")
        .width(Size::Fixed(20))
        .height(Size::Fixed(5))
        .padding(Edges::horizontal(1))
        .style(Style::new().border(Border::Rounded))
        .child(Element::text("Item").id("item"));

    let layout = layout_root(&root, 80, 24);

    assert_eq!(layout["item"], Rect::new(2, 1, 16, 1));
}

#[test]
fn test_intrinsic_size_counts_chrome() {
    let el = Element::text("Growth")
        .padding(Edges::horizontal(1))
        .style(Style::new().border(Border::Single));

    assert_eq!(stockdom::layout::intrinsic_size(&el), (10, 3));
}

#[test]
fn test_max_width_caps_fill() {
    let root = Element::col()
        .id("root")
        .width(Size::Fill)
        .max_width(30)
        .height(Size::Fixed(3));

    let layout = layout_root(&root, 80, 24);
    assert_eq!(layout["root"].width, 30);
}

#[test]
fn test_align_center_on_cross_axis() {
    let root = Element::col()
        .id("root")
        .width(Size::Fixed(20))
        .height(Size::Fixed(3))
        .align(Align::Center)
        .child(Element::text("Log in").id("title"));

    let layout = layout_root(&root, 80, 24);
    assert_eq!(layout["title"], Rect::new(7, 0, 6, 1));
}

// ============================================================================
// Absolute Positioning Tests
// ============================================================================

#[test]
fn test_absolute_child_uses_screen_coordinates() {
    let root = Element::col()
        .id("root")
        .width(Size::Fill)
        .height(Size::Fill)
        .padding(Edges::all(2))
        .child(Element::text("Portal").id("portal").at(10, 5));

    let layout = layout_root(&root, 80, 24);
    assert_eq!(layout["portal"], Rect::new(10, 5, 6, 1));
}

#[test]
fn test_absolute_child_clamped_to_screen() {
    let root = Element::col()
        .id("root")
        .width(Size::Fill)
        .height(Size::Fill)
        .child(
            Element::box_()
                .id("portal")
                .width(Size::Fixed(30))
                .height(Size::Fixed(10))
                .at(70, 20),
        );

    let layout = layout_root(&root, 80, 24);
    assert_eq!(layout["portal"], Rect::new(70, 20, 10, 4));
}

#[test]
fn test_absolute_child_does_not_take_flow_space() {
    let root = Element::col()
        .id("root")
        .width(Size::Fixed(20))
        .height(Size::Fixed(10))
        .child(Element::text("floating").id("float").at(0, 8))
        .child(Element::text("first").id("first"));

    let layout = layout_root(&root, 80, 24);
    assert_eq!(layout["first"].y, 0);
}
