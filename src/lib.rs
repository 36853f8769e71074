//! Relay panel library - the control core of a two-relay touchscreen panel.
//!
//! The panel shows two temperature readings and two buttons, cycles two relays, and
//! saves power by suspending the panel controller, backlight and CPU clock. This
//! library holds everything that can be tested on the host machine; the `pico`
//! firmware and the desktop `simulator` plug real or simulated hardware into it.
//!
//! - [`power`]: Active/Suspended state machine and the hardware capabilities it drives
//! - [`touch`]: Touch samples, button regions, release wait and calibration records
//! - [`scheduler`]: Fixed-interval periodic tasks (sampling, relay cycling)
//! - [`sensors`] / [`relay`]: Temperature probe surface and the two-relay output bank
//! - [`refresh`]: Dirty-region tracking between the state machine and the drawing code
//! - [`controller`]: [`PanelController`], the single owner of all mutable state
//! - [`graphics`] / [`widgets`]: embedded-graphics implementation of the panel drawing
//! - [`lcd`]: `mipidsi` panel adapter (drawing target plus sleep/wake commands)
//! - [`event_log`]: Bounded history of transitions and touches
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Must come first so the logging macros are visible to every module below
#[macro_use]
mod fmt;

// Configuration
pub mod config;

// State machine and scheduling
pub mod controller;
pub mod power;
pub mod relay;
pub mod scheduler;
pub mod sensors;
pub mod touch;

// Rendering
pub mod colors;
pub mod graphics;
pub mod lcd;
pub mod refresh;
pub mod styles;
pub mod widgets;

// Diagnostics
pub mod event_log;

pub use controller::{PanelController, PanelHardware};
pub use power::PowerMode;
