//! Temperature cards and the relay status line.
//!
//! Each card is an outlined panel with a small label at the top and the reading in
//! the middle. Readings are redrawn in place by clearing only the value area.

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
    text::Text,
};

use super::primitives::{draw_centered_text, fill_rect, inset};
use crate::{
    colors::{AMBER, RED},
    config::{RELAY_LINE, TEMP_CARDS},
    sensors::PLACEHOLDER,
    styles::{CARD_CLEAR, CARD_STYLE, CENTERED, LABEL_STYLE_WHITE, TITLE_STYLE_WHITE, VALUE_FONT},
};

/// Height of the label strip at the top of a card.
const LABEL_STRIP: u32 = 20;

const CARD_LABELS: [&str; 2] = ["TEMP 1", "TEMP 2"];

/// Area of card `index` that holds the reading.
pub fn value_area(index: usize) -> Rectangle {
    let card = inset(&TEMP_CARDS[index], 2);
    Rectangle::new(
        card.top_left + Point::new(0, LABEL_STRIP as i32),
        Size::new(card.size.width, card.size.height.saturating_sub(LABEL_STRIP)),
    )
}

/// Draw card `index` with its label and reading text.
pub fn draw_temp_card<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    index: usize,
    reading: &str,
) {
    let card = TEMP_CARDS[index];
    fill_rect(display, &card, CARD_STYLE);
    let label_pos = card.top_left + Point::new(card.size.width as i32 / 2, LABEL_STRIP as i32 / 2 + 2);
    Text::with_text_style(CARD_LABELS[index], label_pos, LABEL_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
    draw_temp_value(display, index, reading);
}

/// Redraw only the reading of card `index`.
pub fn draw_temp_value<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    index: usize,
    reading: &str,
) {
    let area = value_area(index);
    fill_rect(display, &area, CARD_CLEAR);
    let color = if reading == PLACEHOLDER { RED } else { AMBER };
    draw_centered_text(display, reading, &area, MonoTextStyle::new(VALUE_FONT, color));
}

/// Draw the relay status line (outline and text).
pub fn draw_relay_line<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    text: &str,
) {
    fill_rect(display, &RELAY_LINE, CARD_STYLE);
    draw_relay_text(display, text);
}

/// Redraw only the relay status text.
pub fn draw_relay_text<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    text: &str,
) {
    let area = inset(&RELAY_LINE, 2);
    fill_rect(display, &area, CARD_CLEAR);
    draw_centered_text(display, text, &area, TITLE_STYLE_WHITE);
}
