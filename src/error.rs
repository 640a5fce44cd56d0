//! Error types shared by every panel driver
use core::fmt;

use display_interface::DisplayError;

use crate::controller::ControllerState;

/// A rectangle fill that does not fit the panel.
///
/// Carries the rejected request; the framebuffer is untouched when this is returned.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GeometryError {
    /// Requested left edge
    pub x: i32,
    /// Requested top edge
    pub y: i32,
    /// Requested width
    pub width: i32,
    /// Requested height
    pub height: i32,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rectangle {}x{} at ({}, {}) outside display area",
            self.width, self.height, self.x, self.y
        )
    }
}

impl core::error::Error for GeometryError {}

/// Rejected panel configuration
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConfigError {
    /// Width or height of zero
    ZeroSize,
    /// Requested geometry exceeds what the controller can address
    TooLarge {
        /// Requested width (or logical width)
        width: u16,
        /// Requested height
        height: u16,
        /// Panel maximum width
        max_width: u16,
        /// Panel maximum height
        max_height: u16,
    },
    /// Logical width has to be a multiple of 8
    LogicalWidthUnaligned(u16),
    /// Logical width has to cover the physical width
    LogicalWidthTooSmall {
        /// Requested logical width
        logical_width: u16,
        /// Physical width
        width: u16,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroSize => write!(f, "width and height must be at least 1"),
            ConfigError::TooLarge {
                width,
                height,
                max_width,
                max_height,
            } => write!(
                f,
                "{width}x{height} exceeds panel maximum {max_width}x{max_height}"
            ),
            ConfigError::LogicalWidthUnaligned(w) => {
                write!(f, "logical width {w} is not a multiple of 8")
            }
            ConfigError::LogicalWidthTooSmall {
                logical_width,
                width,
            } => write!(f, "logical width {logical_width} is smaller than width {width}"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// The signal line whose pin operation failed
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Line {
    /// Chip-select output
    ChipSelect,
    /// Data/command select output
    DataCommand,
    /// Reset output
    Reset,
    /// Busy input
    Busy,
    /// Panel power enable output
    Enable,
}

/// Driver error, generic over the bus error `SpiE` and the pin error `PinE`.
///
/// Bus and pin errors are carried as returned by the HAL; nothing is retried.
#[derive(Debug)]
pub enum Error<SpiE, PinE> {
    /// Bus transfer failed
    Spi(SpiE),
    /// Setting or reading a pin failed
    Pin {
        /// Which line
        line: Line,
        /// The HAL error
        source: PinE,
    },
    /// The busy line stayed asserted past the configured bound
    Timeout {
        /// Milliseconds spent polling before giving up
        waited_ms: u32,
    },
    /// Rectangle outside the panel
    Geometry(GeometryError),
    /// Invalid configuration
    Config(ConfigError),
    /// Operation needs a configured, awake controller
    NotReady(ControllerState),
}

impl<SpiE, PinE> Error<SpiE, PinE> {
    pub(crate) fn pin(line: Line) -> impl FnOnce(PinE) -> Self {
        move |source| Error::Pin { line, source }
    }
}

impl<SpiE, PinE> From<GeometryError> for Error<SpiE, PinE> {
    fn from(e: GeometryError) -> Self {
        Error::Geometry(e)
    }
}

impl<SpiE, PinE> From<ConfigError> for Error<SpiE, PinE> {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl<SpiE: fmt::Debug, PinE: fmt::Debug> fmt::Display for Error<SpiE, PinE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Spi(e) => write!(f, "SPI error: {e:?}"),
            Error::Pin { line, source } => write!(f, "{line:?} pin error: {source:?}"),
            Error::Timeout { waited_ms } => {
                write!(f, "busy line still asserted after {waited_ms} ms")
            }
            Error::Geometry(e) => write!(f, "{e}"),
            Error::Config(e) => write!(f, "invalid configuration: {e}"),
            Error::NotReady(state) => write!(f, "controller not ready ({state:?})"),
        }
    }
}

impl<SpiE: fmt::Debug, PinE: fmt::Debug> core::error::Error for Error<SpiE, PinE> {}

impl From<GeometryError> for DisplayError {
    fn from(_: GeometryError) -> Self {
        DisplayError::OutOfBoundsError
    }
}

impl<SpiE, PinE> From<Error<SpiE, PinE>> for DisplayError {
    fn from(e: Error<SpiE, PinE>) -> Self {
        match e {
            Error::Pin {
                line: Line::ChipSelect,
                ..
            } => DisplayError::CSError,
            Error::Pin {
                line: Line::DataCommand,
                ..
            } => DisplayError::DCError,
            Error::Pin {
                line: Line::Reset, ..
            } => DisplayError::RSError,
            Error::Geometry(_) => DisplayError::OutOfBoundsError,
            _ => DisplayError::BusWriteError,
        }
    }
}
