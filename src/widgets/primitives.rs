//! Low-level drawing helpers shared across widgets.
//!
//! Every draw call discards its result with `.ok()`: a failed pixel write on the
//! panel bus is not recoverable and the next full redraw repaints anyway.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;

use crate::styles::CENTERED;

/// Shrink a rectangle by `px` on every side.
///
/// Returns a zero-sized rectangle at the center if the inset consumes it.
pub fn inset(
    rect: &Rectangle,
    px: u32,
) -> Rectangle {
    if rect.size.width <= 2 * px || rect.size.height <= 2 * px {
        return Rectangle::new(rect.center(), Size::zero());
    }
    Rectangle::new(
        rect.top_left + Point::new(px as i32, px as i32),
        Size::new(rect.size.width - 2 * px, rect.size.height - 2 * px),
    )
}

/// Fill (and optionally outline) a rectangle.
pub fn fill_rect<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    rect: &Rectangle,
    style: PrimitiveStyle<Rgb565>,
) {
    rect.into_styled(style).draw(display).ok();
}

/// Draw text centered in a rectangle.
pub fn draw_centered_text<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    text: &str,
    rect: &Rectangle,
    style: MonoTextStyle<'_, Rgb565>,
) {
    Text::with_text_style(text, rect.center(), style, CENTERED)
        .draw(display)
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inset_shrinks_each_side() {
        let rect = Rectangle::new(Point::new(10, 20), Size::new(100, 50));
        let inner = inset(&rect, 3);
        assert_eq!(inner.top_left, Point::new(13, 23));
        assert_eq!(inner.size, Size::new(94, 44));
    }

    #[test]
    fn test_inset_too_large_collapses() {
        let rect = Rectangle::new(Point::new(0, 0), Size::new(4, 40));
        assert!(inset(&rect, 2).is_zero_sized());
    }
}
