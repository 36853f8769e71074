//! Pre-computed text and primitive styles.
//!
//! `MonoTextStyle`, `TextStyle` and `PrimitiveStyle` constructors are `const fn` in
//! embedded-graphics 0.8, so every style the widgets use is built at compile time and
//! shared. Widgets that need a dynamic color build `MonoTextStyle::new(VALUE_FONT, c)`.

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_10X20},
    },
    pixelcolor::Rgb565,
    primitives::{PrimitiveStyle, PrimitiveStyleBuilder},
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_18_POINT;

use crate::colors::{BLACK, CARD_FILL, GRAY, GREEN, NAVY, WHITE};

// =============================================================================
// Text Alignment
// =============================================================================

/// Centered horizontally and vertically on the anchor point.
pub const CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

/// Left-aligned, vertically centered on the anchor point.
pub const LEFT_MIDDLE: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Middle)
    .build();

/// Right-aligned, vertically centered on the anchor point.
pub const RIGHT_MIDDLE: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Right)
    .baseline(Baseline::Middle)
    .build();

// =============================================================================
// Fonts and Text Styles
// =============================================================================

/// Temperature value font (`ProFont` 18pt). Fits "-10.5 C" inside a card.
pub const VALUE_FONT: &MonoFont = &PROFONT_18_POINT;

/// Card labels and header status.
pub const LABEL_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, WHITE);

/// Header title and button labels on dark fills.
pub const TITLE_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, WHITE);

/// Button labels on the green "on" fill.
pub const TITLE_STYLE_BLACK: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, BLACK);

// =============================================================================
// Primitive Styles
// =============================================================================

/// Header bar background.
pub const HEADER_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(NAVY);

/// Card background with a gray outline.
pub const CARD_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyleBuilder::new()
    .fill_color(CARD_FILL)
    .stroke_color(GRAY)
    .stroke_width(1)
    .build();

/// Clears a text area inside a card.
pub const CARD_CLEAR: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(CARD_FILL);

/// Filled button for the "on" state.
pub const BUTTON_ON: PrimitiveStyle<Rgb565> = PrimitiveStyleBuilder::new()
    .fill_color(GREEN)
    .stroke_color(GREEN)
    .stroke_width(2)
    .build();
