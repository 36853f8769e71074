//! Display and layout configuration constants.
//!
//! The panel is a 240x320 portrait display. From top to bottom:
//!
//! ```text
//! +---------------------------+  y = 0
//! | header (title + SYS state)|
//! +-------------+-------------+  y = 36
//! |  TEMP 1     |  TEMP 2     |
//! +-------------+-------------+  y = 156
//! |  relay status line        |
//! +---------------------------+  y = 250 (button bar)
//! | [ SYSTEM ]  | [ SLEEP ]   |
//! +-------------+-------------+  y = 320
//! ```
//!
//! Rectangles are `const` so the hit-testing table and the drawing code share one
//! source of truth with no runtime arithmetic.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (portrait).
pub const SCREEN_WIDTH: u32 = 240;

/// Display height in pixels (portrait).
pub const SCREEN_HEIGHT: u32 = 320;

/// Header bar height in pixels.
pub const HEADER_HEIGHT: u32 = 36;

/// Top edge of the button bar. Button rectangles sit 10px below it.
pub const BUTTON_BAR_Y: u32 = 250;

// =============================================================================
// Cards
// =============================================================================

/// Temperature cards, indexed by sensor index.
pub const TEMP_CARDS: [Rectangle; 2] = [
    Rectangle::new(Point::new(10, 46), Size::new(105, 110)),
    Rectangle::new(Point::new(125, 46), Size::new(105, 110)),
];

/// Relay status line spanning the panel width.
pub const RELAY_LINE: Rectangle = Rectangle::new(Point::new(10, 170), Size::new(220, 40));

// =============================================================================
// Buttons
// =============================================================================

/// `SYSTEM` toggle button (Active mode only).
pub const SYSTEM_BUTTON: Rectangle = Rectangle::new(Point::new(10, BUTTON_BAR_Y as i32 + 10), Size::new(105, 60));

/// `SLEEP` button while Active, `WAKE` region while Suspended.
pub const SLEEP_BUTTON: Rectangle = Rectangle::new(Point::new(125, BUTTON_BAR_Y as i32 + 10), Size::new(105, 60));

#[cfg(test)]
mod tests {
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::ContainsPoint;

    use super::*;

    fn inside_screen(rect: &Rectangle) -> bool {
        let screen = Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        rect.bottom_right().is_some_and(|br| screen.contains(rect.top_left) && screen.contains(br))
    }

    #[test]
    fn test_all_regions_fit_on_screen() {
        assert!(inside_screen(&SYSTEM_BUTTON));
        assert!(inside_screen(&SLEEP_BUTTON));
        assert!(inside_screen(&RELAY_LINE));
        assert!(TEMP_CARDS.iter().all(inside_screen));
    }

    #[test]
    fn test_buttons_do_not_overlap() {
        assert!(SYSTEM_BUTTON.intersection(&SLEEP_BUTTON).is_zero_sized());
    }

    #[test]
    fn test_buttons_below_content() {
        assert!(SYSTEM_BUTTON.top_left.y > RELAY_LINE.top_left.y + RELAY_LINE.size.height as i32);
        assert!(TEMP_CARDS[0].top_left.y >= HEADER_HEIGHT as i32);
    }
}
