//! Monochrome e-paper display drivers
//!
//! Drives black and white electrophoretic panels over SPI. Every driver keeps
//! a bit-packed framebuffer in MCU RAM, pushes it to panel RAM on
//! [`Panel::display`] and waits for the refresh to finish on the BUSY line.
//!
//! Supported panels:
//! - [`ssd1681::Ssd1681`], 1.54" 200x200 boards with on-chip waveforms
//! - [`epd2in9v2::Epd2in9v2`], Waveshare 2.9" V2 128x296 with uploaded waveforms
//!
//! ### Usage
//! 1. bind the SPI bus, the control pins and a delay with the driver's `new`
//! 1. call [`Panel::configure`], which resets the panel and clears the buffer to white
//! 1. draw with [`Panel::set_pixel`], [`Panel::fill_rectangle`] or
//!    [`embedded_graphics`](https://github.com/embedded-graphics/embedded-graphics)
//! 1. send it with [`Panel::display`]
//! 1. [`Panel::deep_sleep`] when done, `configure` again to wake up
//!
//! Single pixels follow the rotation set with [`Panel::set_rotation`];
//! rectangles are always given in the panel's native orientation.
//!
//! The crate logs through [`log`] and installs no logger.
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![allow(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

extern crate alloc;

pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod framebuffer;
pub mod graphics;
pub mod interface;
pub mod lut;

pub mod epd2in9v2;
pub mod ssd1681;

pub use color::{Color, Polarity};
pub use config::{Config, Geometry, PanelSpec};
pub use controller::{ControllerState, Panel};
pub use error::{ConfigError, Error, GeometryError, Line};
pub use framebuffer::{DisplayRotation, Framebuffer};
pub use interface::{BusyWait, DisplayInterface, Framing, ResetTiming};
pub use lut::RefreshMode;
