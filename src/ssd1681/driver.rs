//! SSD1681 Display Driver Implementation
//!
//! ## Refresh sequence
//!
//! `display` points the RAM counters at the origin, writes every framebuffer
//! row as its own data burst after a single `WRITE_BWRAM`, then triggers
//! Display Update Control 2 with `0xF7` (full) or `0xFF` (partial, LUT mode 2)
//! followed by master activation and a busy wait.
//!
//! ## Polarity
//!
//! A set bit is a white pixel, so a fresh framebuffer is all `0xFF`.
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiBus;

use crate::color::{Color, Polarity};
use crate::config::{Config, Geometry, PanelSpec};
use crate::controller::{ControllerState, Panel};
use crate::error::{Error, GeometryError, Line};
use crate::framebuffer::{DisplayRotation, Framebuffer};
use crate::graphics::impl_draw_target;
use crate::interface::{
    BusyWait, DisplayInterface, Framing, ResetTiming, DEFAULT_BUSY_TIMEOUT_MS,
};
use crate::lut::RefreshMode;
use crate::ssd1681::{cmd::Cmd, flag::Flag, HEIGHT, MAX_HEIGHT, MAX_WIDTH, WIDTH};

/// Panel description of the SSD1681 1.54" boards
pub const PANEL: PanelSpec = PanelSpec {
    name: "SSD1681",
    default_width: WIDTH,
    default_height: HEIGHT,
    max_width: MAX_WIDTH,
    max_height: MAX_HEIGHT,
    polarity: Polarity::WhiteIsSet,
    framing: Framing::Burst,
    reset: ResetTiming {
        high_ms: 100,
        low_ms: 100,
        settle_ms: 200,
    },
    busy_poll_ms: 10,
};

/// SSD1681 E-Paper Display Driver
///
/// ## Type Parameters
///
/// - `SPI` - SPI bus, chip-select is driven by the driver
/// - `CS` - chip-select output pin
/// - `DC` - Data/Command output pin
/// - `RST` - Reset output pin
/// - `BSY` - BUSY input pin (HIGH when display is busy)
/// - `EN` - power enable output pin
/// - `DELAY` - Delay provider for timing
pub struct Ssd1681<SPI, CS, DC, RST, BSY, EN, DELAY> {
    /// The display interface
    pub interface: DisplayInterface<SPI, CS, DC, RST, BSY, DELAY>,
    enable: EN,
    framebuffer: Framebuffer,
    state: ControllerState,
    busy_wait: BusyWait,
    refresh: RefreshMode,
}

impl<SPI, CS, DC, RST, BSY, EN, DELAY> Ssd1681<SPI, CS, DC, RST, BSY, EN, DELAY> {
    /// Bind bus, pins and delay. The panel is not touched until `configure`.
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST, busy: BSY, enable: EN, delay: DELAY) -> Self {
        Ssd1681 {
            interface: DisplayInterface::new(spi, cs, dc, rst, busy, delay, PANEL.framing),
            enable,
            framebuffer: Framebuffer::default(),
            state: ControllerState::Uninitialized,
            busy_wait: BusyWait::bounded(PANEL.busy_poll_ms, DEFAULT_BUSY_TIMEOUT_MS),
            refresh: RefreshMode::Full,
        }
    }

    /// Give back bus, pins and delay
    pub fn release(self) -> (SPI, CS, DC, RST, BSY, EN, DELAY) {
        let (spi, cs, dc, rst, busy, delay) = self.interface.release();
        (spi, cs, dc, rst, busy, self.enable, delay)
    }
}

impl<SPI, CS, DC, RST, BSY, EN, DELAY, PinE> Ssd1681<SPI, CS, DC, RST, BSY, EN, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin<Error = PinE>,
    DC: OutputPin<Error = PinE>,
    RST: OutputPin<Error = PinE>,
    BSY: InputPin<Error = PinE>,
    EN: OutputPin<Error = PinE>,
    DELAY: DelayNs,
{
    fn ensure_idle(&self) -> Result<(), Error<SPI::Error, PinE>> {
        self.state.ensure_idle()
    }

    fn power_on(&mut self) -> Result<(), Error<SPI::Error, PinE>> {
        self.enable.set_high().map_err(Error::pin(Line::Enable))
    }

    /// Register setup after the software reset
    fn init(&mut self, geometry: Geometry) -> Result<(), Error<SPI::Error, PinE>> {
        let last_row = geometry.height - 1;
        let last_column_byte = (geometry.stride() - 1) as u8;

        // Gate settings: `height` gates, G0 first, non-interlaced
        self.interface.cmd_with_data(
            Cmd::DRIVER_CONTROL,
            &[
                (last_row & 0xFF) as u8,
                (last_row >> 8) as u8,
                Flag::DRIVER_OUTPUT_GATE_SCAN_NORMAL,
            ],
        )?;
        self.interface
            .cmd_with_data(Cmd::DATA_MODE, &[Flag::DATA_ENTRY_INCRY_INCRX])?;
        self.interface
            .cmd_with_data(Cmd::SET_RAMXPOS, &[0x00, last_column_byte])?;
        self.interface.cmd_with_data(
            Cmd::SET_RAMYPOS,
            &[0x00, 0x00, (last_row & 0xFF) as u8, (last_row >> 8) as u8],
        )?;
        self.interface
            .cmd_with_data(Cmd::WRITE_BORDER, &[Flag::BORDER_WAVEFORM_FOLLOW_LUT1])?;
        self.interface
            .cmd_with_data(Cmd::TEMP_CONTROL, &[Flag::INTERNAL_TEMP_SENSOR])?;
        self.interface.wait_until_idle(self.busy_wait)
    }

    /// Set RAM X and Y counters to origin (0, 0)
    fn reset_ram_counters(&mut self) -> Result<(), Error<SPI::Error, PinE>> {
        self.interface.cmd_with_data(Cmd::SET_RAMXCOUNT, &[0x00])?;
        self.interface
            .cmd_with_data(Cmd::SET_RAMYCOUNT, &[0x00, 0x00])
    }

    /// Trigger display update with the selected waveform and wait for completion
    fn trigger_display_update(&mut self) -> Result<(), Error<SPI::Error, PinE>> {
        self.state.advance(ControllerState::Refreshing);
        let ctrl2 = match self.refresh {
            RefreshMode::Full => Flag::DISPLAY_MODE_1,
            RefreshMode::Partial => Flag::DISPLAY_MODE_2,
        };
        self.interface.cmd_with_data(Cmd::DISP_CTRL2, &[ctrl2])?;
        self.interface.cmd(Cmd::MASTER_ACTIVATE)?;
        self.interface.wait_until_idle(self.busy_wait)?;

        // partial is good for one refresh only
        self.refresh = RefreshMode::Full;
        self.state.advance(ControllerState::Idle);
        Ok(())
    }
}

impl<SPI, CS, DC, RST, BSY, EN, DELAY, PinE> Panel for Ssd1681<SPI, CS, DC, RST, BSY, EN, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin<Error = PinE>,
    DC: OutputPin<Error = PinE>,
    RST: OutputPin<Error = PinE>,
    BSY: InputPin<Error = PinE>,
    EN: OutputPin<Error = PinE>,
    DELAY: DelayNs,
{
    type Error = Error<SPI::Error, PinE>;

    fn configure(&mut self, config: Config) -> Result<(), Self::Error> {
        let geometry = config.resolve_geometry(&PANEL)?;
        self.busy_wait = config.resolve_busy_wait(&PANEL);
        self.framebuffer =
            Framebuffer::new(geometry, config.get_rotation(), PANEL.polarity)?;
        self.refresh = RefreshMode::Full;
        log::info!(
            "Configuring {} {}x{}",
            PANEL.name,
            geometry.width,
            geometry.height
        );

        self.interface.idle()?;
        self.power_on()?;

        self.state.advance(ControllerState::Resetting);
        self.interface.reset(PANEL.reset)?;
        self.interface.wait_until_idle(self.busy_wait)?;
        self.interface.cmd(Cmd::SW_RESET)?;
        self.interface.wait_until_idle(self.busy_wait)?;

        self.state.advance(ControllerState::Initializing);
        self.init(geometry)?;
        self.state.advance(ControllerState::Idle);
        Ok(())
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.framebuffer.set_pixel(x, y, color);
    }

    fn fill_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    ) -> Result<(), GeometryError> {
        self.framebuffer.fill_rectangle(x, y, width, height, color)
    }

    fn display(&mut self) -> Result<(), Self::Error> {
        self.ensure_idle()?;
        self.state.advance(ControllerState::Transferring);
        self.reset_ram_counters()?;
        self.interface.cmd(Cmd::WRITE_BWRAM)?;
        let height = self.framebuffer.geometry().height;
        for y in 0..height {
            self.interface.data(self.framebuffer.row(y))?;
        }
        log::debug!("Sent {} bytes of frame data", self.framebuffer.buffer().len());
        self.trigger_display_update()
    }

    fn clear_display(&mut self) -> Result<(), Self::Error> {
        self.ensure_idle()?;
        self.framebuffer.clear(Color::White);
        self.state.advance(ControllerState::Transferring);
        self.reset_ram_counters()?;
        self.interface.cmd(Cmd::WRITE_BWRAM)?;
        let len = self.framebuffer.buffer().len() as u32;
        self.interface
            .data_x_times(PANEL.polarity.fill_byte(Color::White), len)?;
        self.trigger_display_update()
    }

    fn clear_buffer(&mut self, color: Color) {
        self.framebuffer.clear(color);
    }

    fn deep_sleep(&mut self) -> Result<(), Self::Error> {
        self.ensure_idle()?;
        log::info!("{} entering deep sleep", PANEL.name);
        self.interface
            .cmd_with_data(Cmd::DEEP_SLEEP, &[Flag::DEEP_SLEEP_MODE_1])?;
        self.state.advance(ControllerState::DeepSleep);
        Ok(())
    }

    fn set_lut(&mut self, mode: RefreshMode) -> Result<(), Self::Error> {
        self.ensure_idle()?;
        log::debug!("{} refresh mode {:?}", PANEL.name, mode);
        self.refresh = mode;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        self.framebuffer.size()
    }

    fn set_rotation(&mut self, rotation: DisplayRotation) {
        self.framebuffer.set_rotation(rotation);
    }

    fn is_busy(&mut self) -> Result<bool, Self::Error> {
        self.interface.is_busy()
    }

    fn state(&self) -> ControllerState {
        self.state
    }

    fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }
}

impl_draw_target!(Ssd1681<SPI, CS, DC, RST, BSY, EN, DELAY>);
