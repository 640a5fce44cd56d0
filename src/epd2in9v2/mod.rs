//! Waveshare 2.9" V2 ePaper Display Driver
//!
//! Black and white 128x296 panel. This is the V2 board; the V1 uses a
//! different controller and is not covered.
//!
//! ### Protocol
//! Per-byte framing: every command and every data byte is its own
//! chip-select assertion, clocked with a single-byte transfer.
//!
//! ### Usage
//! Same as every other panel in this crate: [`driver::Epd2in9v2::new`],
//! [`crate::Panel::configure`], draw, [`crate::Panel::display`]. For faster
//! updates with some ghosting call [`crate::Panel::set_lut`] with
//! [`crate::RefreshMode::Partial`] before each `display` that should use it.

pub mod driver;
pub mod lut;

mod cmd;
mod flag;

pub use driver::{Epd2in9v2, PANEL};

/// Maximum display height this driver supports
pub const MAX_HEIGHT: u16 = 296;

/// Maximum display width this driver supports
pub const MAX_WIDTH: u16 = 176;

/// Display height, pixels vertically
pub const HEIGHT: u16 = 296;

/// Display width, pixels horizontally
pub const WIDTH: u16 = 128;
