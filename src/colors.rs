//! Color constants for the relay panel.
//!
//! Standard colors come from the `RgbColor` trait constants; the rest are Rgb565
//! values picked to stay readable on the panel's dark background.
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red (0-31), 6 bits green (0-63), 5 bits blue
//! (0-31). It is the native pixel format of the ILI9341/ST7789 controllers.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors
// =============================================================================

/// Screen background and text on light fills.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Text on dark backgrounds.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Disconnected sensor readings.
pub const RED: Rgb565 = Rgb565::RED;

/// Energized relay and "on" button fill.
pub const GREEN: Rgb565 = Rgb565::GREEN;

// =============================================================================
// Custom Colors
// =============================================================================

/// Header bar fill. RGB565: (0, 12, 12) - dark blue.
pub const NAVY: Rgb565 = Rgb565::new(0, 12, 12);

/// Card and button outlines. RGB565: (8, 16, 8) - roughly 25% brightness.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Card interior. RGB565: (2, 4, 2) - just above black so cards read as panels.
pub const CARD_FILL: Rgb565 = Rgb565::new(2, 4, 2);

/// Temperature values. RGB565: (31, 40, 0) - amber.
pub const AMBER: Rgb565 = Rgb565::new(31, 40, 0);

/// Sleep button outline. RGB565: (6, 24, 31) - light blue.
pub const SKY: Rgb565 = Rgb565::new(6, 24, 31);
