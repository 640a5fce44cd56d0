//! Panel description and caller configuration
use crate::color::Polarity;
use crate::error::ConfigError;
use crate::framebuffer::DisplayRotation;
use crate::interface::{BusyWait, Framing, ResetTiming, DEFAULT_BUSY_TIMEOUT_MS};

/// Immutable description of one panel family.
///
/// Every driver embeds one of these as a constant.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PanelSpec {
    /// Human readable panel name, used in log output
    pub name: &'static str,
    /// Width used when the configuration leaves it unset
    pub default_width: u16,
    /// Height used when the configuration leaves it unset
    pub default_height: u16,
    /// Largest width (source lines) the controller addresses
    pub max_width: u16,
    /// Largest height (gate lines) the controller addresses
    pub max_height: u16,
    /// Bit meaning in panel RAM
    pub polarity: Polarity,
    /// Bus framing convention
    pub framing: Framing,
    /// Reset pulse timing
    pub reset: ResetTiming,
    /// Delay between busy line reads
    pub busy_poll_ms: u32,
}

/// Resolved panel geometry
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Geometry {
    /// Native width in pixels
    pub width: u16,
    /// Native height in pixels
    pub height: u16,
    /// Row stride in pixels, a multiple of 8 and at least `width`
    pub logical_width: u16,
}

impl Geometry {
    /// Bytes per framebuffer row
    pub const fn stride(&self) -> usize {
        self.logical_width as usize / 8
    }

    /// Framebuffer length in bytes
    pub const fn buffer_len(&self) -> usize {
        self.stride() * self.height as usize
    }

    /// Every pixel of `width` x `height` maps to a bit of a whole-byte row
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if self.logical_width % 8 != 0 {
            return Err(ConfigError::LogicalWidthUnaligned(self.logical_width));
        }
        if self.logical_width < self.width {
            return Err(ConfigError::LogicalWidthTooSmall {
                logical_width: self.logical_width,
                width: self.width,
            });
        }
        Ok(())
    }
}

/// Caller configuration for `configure`.
///
/// Unset fields fall back to the panel defaults.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Config {
    width: Option<u16>,
    height: Option<u16>,
    logical_width: Option<u16>,
    rotation: DisplayRotation,
    busy_wait: Option<BusyWait>,
}

impl Config {
    /// All defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Native width in pixels
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Native height in pixels
    pub fn height(mut self, height: u16) -> Self {
        self.height = Some(height);
        self
    }

    /// Row stride in pixels, padded to a multiple of 8
    pub fn logical_width(mut self, logical_width: u16) -> Self {
        self.logical_width = Some(logical_width);
        self
    }

    /// Initial rotation
    pub fn rotation(mut self, rotation: DisplayRotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Busy line polling policy
    pub fn busy_wait(mut self, busy_wait: BusyWait) -> Self {
        self.busy_wait = Some(busy_wait);
        self
    }

    /// Configured rotation
    pub fn get_rotation(&self) -> DisplayRotation {
        self.rotation
    }

    /// Busy policy, bounded by [`DEFAULT_BUSY_TIMEOUT_MS`] unless set
    pub fn resolve_busy_wait(&self, panel: &PanelSpec) -> BusyWait {
        self.busy_wait
            .unwrap_or(BusyWait::bounded(panel.busy_poll_ms, DEFAULT_BUSY_TIMEOUT_MS))
    }

    /// Fill in defaults and validate against the panel limits
    pub fn resolve_geometry(&self, panel: &PanelSpec) -> Result<Geometry, ConfigError> {
        let width = self.width.unwrap_or(panel.default_width);
        let height = self.height.unwrap_or(panel.default_height);
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroSize);
        }
        let too_large = |width| ConfigError::TooLarge {
            width,
            height,
            max_width: panel.max_width,
            max_height: panel.max_height,
        };
        if width > panel.max_width || height > panel.max_height {
            return Err(too_large(width));
        }

        let logical_width = match self.logical_width {
            Some(lw) => lw,
            None => width.div_ceil(8) * 8,
        };
        let geometry = Geometry {
            width,
            height,
            logical_width,
        };
        geometry.check()?;

        // RAM is addressed in whole bytes
        if logical_width > panel.max_width.div_ceil(8) * 8 {
            return Err(too_large(logical_width));
        }
        Ok(geometry)
    }
}
