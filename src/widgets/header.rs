//! Header bar: title on the left, system state on the right.

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle, text::Text};

use super::primitives::fill_rect;
use crate::{
    config::{HEADER_HEIGHT, SCREEN_WIDTH},
    styles::{HEADER_FILL, LABEL_STYLE_WHITE, LEFT_MIDDLE, RIGHT_MIDDLE, TITLE_STYLE_WHITE},
};

/// Full header rectangle.
pub const HEADER_RECT: Rectangle = Rectangle::new(Point::new(0, 0), Size::new(SCREEN_WIDTH, HEADER_HEIGHT));

/// Right part of the header holding the system state text.
pub const HEADER_STATUS_RECT: Rectangle = Rectangle::new(Point::new(150, 0), Size::new(SCREEN_WIDTH - 150, HEADER_HEIGHT));

const TITLE_POS: Point = Point::new(8, HEADER_HEIGHT as i32 / 2);

const STATUS_POS: Point = Point::new(SCREEN_WIDTH as i32 - 8, HEADER_HEIGHT as i32 / 2);

/// Draw the header bar with title and system state.
pub fn draw_header<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    status: &str,
) {
    fill_rect(display, &HEADER_RECT, HEADER_FILL);
    Text::with_text_style("RELAYS", TITLE_POS, TITLE_STYLE_WHITE, LEFT_MIDDLE)
        .draw(display)
        .ok();
    draw_header_status(display, status);
}

/// Redraw only the system state text.
pub fn draw_header_status<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    status: &str,
) {
    fill_rect(display, &HEADER_STATUS_RECT, HEADER_FILL);
    Text::with_text_style(status, STATUS_POS, LABEL_STYLE_WHITE, RIGHT_MIDDLE)
        .draw(display)
        .ok();
}
