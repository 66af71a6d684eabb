mod flex;
mod rect;

pub use flex::{intrinsic_size, layout, LayoutResult};
pub use rect::Rect;
