//! SSD1681 ePaper Display Driver
//!
//! Used in the Adafruit / Good Display 1.54" 200x200 monochrome panels. The
//! waveforms come from the controller OTP, so there is no LUT to upload.
//!
//! ### Protocol
//! Burst framing: a command byte and all of its parameters go out inside one
//! chip-select assertion, D/C low for the opcode and high for the data. The
//! board also has a power enable line, driven high by `configure`.
//!
//! ### Usage
//! 1. bind bus and pins with [`driver::Ssd1681::new`]
//! 1. call [`crate::Panel::configure`]
//! 1. draw into the framebuffer, preferably with
//!    [`embedded_graphics`](https://github.com/embedded-graphics/embedded-graphics)
//! 1. push it out with [`crate::Panel::display`]

pub mod driver;

mod cmd;
mod flag;

pub use driver::{Ssd1681, PANEL};

/// Maximum display height this driver supports
pub const MAX_HEIGHT: u16 = 200;

/// Maximum display width this driver supports
pub const MAX_WIDTH: u16 = 200;

/// Display height, pixels vertically
pub const HEIGHT: u16 = 200;

/// Display width, pixels horizontally
pub const WIDTH: u16 = 200;
