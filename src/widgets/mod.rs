//! Widget components for the panel display.
//!
//! - [`header`]: Title bar with the system state
//! - [`cards`]: Temperature cards and the relay status line
//! - [`buttons`]: Bottom-bar buttons in on/off style
//! - [`primitives`]: Shared low-level drawing helpers
//!
//! All drawing functions are generic over `DrawTarget<Color = Rgb565>` so the same
//! code draws to the SPI panel, the simulator window and test framebuffers. Styles
//! come from [`styles`](crate::styles) and are built at compile time.

pub mod buttons;
pub mod cards;
pub mod header;
pub mod primitives;

pub use buttons::draw_button;
pub use cards::{draw_relay_line, draw_relay_text, draw_temp_card, draw_temp_value};
pub use header::{draw_header, draw_header_status};
