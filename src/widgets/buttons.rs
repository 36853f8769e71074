//! Bottom-bar buttons.
//!
//! An "on" button is filled green with a black label. An "off" button is an outline
//! in its accent color with a white label.

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyleBuilder, RoundedRectangle},
};

use super::primitives::draw_centered_text;
use crate::{
    colors::{BLACK, GRAY, SKY},
    styles::{BUTTON_ON, TITLE_STYLE_BLACK, TITLE_STYLE_WHITE},
    touch::ButtonId,
};

/// Corner radius of button outlines.
const CORNER_RADIUS: u32 = 8;

const fn accent(button: ButtonId) -> Rgb565 {
    match button {
        ButtonId::System => GRAY,
        ButtonId::Sleep => SKY,
    }
}

/// Draw a button in its on/off style.
pub fn draw_button<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    button: ButtonId,
    on: bool,
) {
    let region = button.region();
    let style = if on {
        BUTTON_ON
    } else {
        PrimitiveStyleBuilder::new()
            .fill_color(BLACK)
            .stroke_color(accent(button))
            .stroke_width(2)
            .build()
    };

    RoundedRectangle::with_equal_corners(region.rect, Size::new(CORNER_RADIUS, CORNER_RADIUS))
        .into_styled(style)
        .draw(display)
        .ok();

    let label_style = if on { TITLE_STYLE_BLACK } else { TITLE_STYLE_WHITE };
    draw_centered_text(display, region.label, &region.rect, label_style);
}
