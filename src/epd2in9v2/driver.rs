//! Waveshare 2.9" V2 Display Driver Implementation
//!
//! ### Initialization
//! Hardware reset, software reset, driver output control with the gate
//! count, data entry mode Y+ X+, display update control 1, then the full
//! waveform is uploaded.
//!
//! ### Waveforms
//! Both refresh modes use register tables (see [`super::lut`]). Selecting
//! `Partial` uploads the partial table for the next `display`; on the
//! `display` after that the full table is uploaded again before the frame
//! goes out.
//!
//! ### BUSY Pin Wait
//! After the LUT upload, after moving the RAM pointer and after master
//! activation the driver waits for BUSY to go LOW. Deep sleep does not wait,
//! the line stays high while asleep.
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiBus;

use crate::color::{Color, Polarity};
use crate::config::{Config, Geometry, PanelSpec};
use crate::controller::{ControllerState, Panel};
use crate::epd2in9v2::{cmd::Cmd, flag::Flag, lut, HEIGHT, MAX_HEIGHT, MAX_WIDTH, WIDTH};
use crate::error::{Error, GeometryError};
use crate::framebuffer::{DisplayRotation, Framebuffer};
use crate::graphics::impl_draw_target;
use crate::interface::{
    BusyWait, DisplayInterface, Framing, ResetTiming, DEFAULT_BUSY_TIMEOUT_MS,
};
use crate::lut::RefreshMode;

/// Extra settle time after the reset pulse
const POST_RESET_DELAY_MS: u32 = 100;

/// Panel description of the Waveshare 2.9" V2
pub const PANEL: PanelSpec = PanelSpec {
    name: "EPD 2.9in V2",
    default_width: WIDTH,
    default_height: HEIGHT,
    max_width: MAX_WIDTH,
    max_height: MAX_HEIGHT,
    polarity: Polarity::WhiteIsSet,
    framing: Framing::PerByte,
    reset: ResetTiming {
        high_ms: 10,
        low_ms: 2,
        settle_ms: 10,
    },
    busy_poll_ms: 100,
};

/// Waveshare 2.9" V2 E-Paper Display Driver
///
/// ## Type Parameters
///
/// - `SPI` - SPI bus, chip-select is driven by the driver
/// - `CS` - chip-select output pin
/// - `DC` - Data/Command output pin
/// - `RST` - Reset output pin
/// - `BSY` - BUSY input pin (HIGH when display is busy)
/// - `DELAY` - Delay provider for timing
pub struct Epd2in9v2<SPI, CS, DC, RST, BSY, DELAY> {
    /// The display interface
    pub interface: DisplayInterface<SPI, CS, DC, RST, BSY, DELAY>,
    framebuffer: Framebuffer,
    state: ControllerState,
    busy_wait: BusyWait,
    /// Table currently in the controller, `None` before the first upload
    lut_loaded: Option<RefreshMode>,
    /// Partial table was selected for the next refresh
    partial_armed: bool,
}

impl<SPI, CS, DC, RST, BSY, DELAY> Epd2in9v2<SPI, CS, DC, RST, BSY, DELAY> {
    /// Bind bus, pins and delay. The panel is not touched until `configure`.
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST, busy: BSY, delay: DELAY) -> Self {
        Epd2in9v2 {
            interface: DisplayInterface::new(spi, cs, dc, rst, busy, delay, PANEL.framing),
            framebuffer: Framebuffer::default(),
            state: ControllerState::Uninitialized,
            busy_wait: BusyWait::bounded(PANEL.busy_poll_ms, DEFAULT_BUSY_TIMEOUT_MS),
            lut_loaded: None,
            partial_armed: false,
        }
    }

    /// Waveform currently uploaded to the controller
    pub fn loaded_lut(&self) -> Option<RefreshMode> {
        self.lut_loaded
    }

    /// Give back bus, pins and delay
    pub fn release(self) -> (SPI, CS, DC, RST, BSY, DELAY) {
        self.interface.release()
    }
}

impl<SPI, CS, DC, RST, BSY, DELAY, PinE> Epd2in9v2<SPI, CS, DC, RST, BSY, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin<Error = PinE>,
    DC: OutputPin<Error = PinE>,
    RST: OutputPin<Error = PinE>,
    BSY: InputPin<Error = PinE>,
    DELAY: DelayNs,
{
    fn ensure_idle(&self) -> Result<(), Error<SPI::Error, PinE>> {
        self.state.ensure_idle()
    }

    fn init(&mut self, geometry: Geometry) -> Result<(), Error<SPI::Error, PinE>> {
        self.interface.cmd(Cmd::SW_RESET)?;
        self.interface.wait_until_idle(self.busy_wait)?;

        let last_row = geometry.height - 1;
        self.interface.cmd_with_data(
            Cmd::DRIVER_OUTPUT_CONTROL,
            &[
                (last_row & 0xFF) as u8,
                (last_row >> 8) as u8,
                Flag::DRIVER_OUTPUT_GATE_SCAN_NORMAL,
            ],
        )?;
        self.interface.cmd_with_data(
            Cmd::DATA_ENTRY_MODE_SETTING,
            &[Flag::DATA_ENTRY_INCRY_INCRX],
        )?;
        self.interface.cmd_with_data(
            Cmd::DISPLAY_UPDATE_CONTROL_1,
            &[
                Flag::DISPLAY_UPDATE_NORMAL,
                Flag::DISPLAY_UPDATE_SOURCE_S8_S167,
            ],
        )?;
        self.interface.wait_until_idle(self.busy_wait)?;
        self.load_lut(RefreshMode::Full)
    }

    /// Upload a waveform table and the voltage registers that go with it
    fn load_lut(&mut self, mode: RefreshMode) -> Result<(), Error<SPI::Error, PinE>> {
        log::debug!("Setting LUT data ({:?})", mode);
        let waveform = lut::waveform(mode);

        log::trace!("LUT register, {} bytes", waveform.phases().len());
        self.interface
            .cmd_with_data(Cmd::WRITE_LUT_REGISTER, waveform.phases())?;
        self.interface.wait_until_idle(self.busy_wait)?;

        log::trace!("End option 0x{:02X}", waveform.end_option());
        self.interface
            .cmd_with_data(Cmd::END_OPTION, &[waveform.end_option()])?;
        log::trace!("Gate voltage 0x{:02X}", waveform.gate_voltage());
        self.interface.cmd_with_data(
            Cmd::GATE_DRIVING_VOLTAGE_CONTROL,
            &[waveform.gate_voltage()],
        )?;
        log::trace!("Source voltage {:02X?}", waveform.source_voltage());
        self.interface.cmd_with_data(
            Cmd::SOURCE_DRIVING_VOLTAGE_CONTROL,
            waveform.source_voltage(),
        )?;
        log::trace!("VCOM 0x{:02X}", waveform.vcom());
        self.interface
            .cmd_with_data(Cmd::WRITE_VCOM_REGISTER, &[waveform.vcom()])?;

        self.lut_loaded = Some(mode);
        Ok(())
    }

    /// Put the full table back if the partial one is loaded but was not
    /// selected for this refresh
    fn restore_full_lut(&mut self) -> Result<(), Error<SPI::Error, PinE>> {
        if self.lut_loaded != Some(RefreshMode::Full) && !self.partial_armed {
            self.load_lut(RefreshMode::Full)?;
        }
        Ok(())
    }

    /// Sets the area of the display RAM that will be written
    fn set_memory_area(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), Error<SPI::Error, PinE>> {
        self.interface.cmd_with_data(
            Cmd::SET_RAM_X_ADDRESS_START_END_POSITION,
            &[(x0 >> 3) as u8, (x1 >> 3) as u8],
        )?;
        self.interface.cmd_with_data(
            Cmd::SET_RAM_Y_ADDRESS_START_END_POSITION,
            &[
                (y0 & 0xFF) as u8,
                (y0 >> 8) as u8,
                (y1 & 0xFF) as u8,
                (y1 >> 8) as u8,
            ],
        )
    }

    /// Moves the RAM address counter
    fn set_memory_pointer(&mut self, x: u16, y: u16) -> Result<(), Error<SPI::Error, PinE>> {
        self.interface
            .cmd_with_data(Cmd::SET_RAM_X_ADDRESS_COUNTER, &[(x >> 3) as u8])?;
        self.interface.cmd_with_data(
            Cmd::SET_RAM_Y_ADDRESS_COUNTER,
            &[(y & 0xFF) as u8, (y >> 8) as u8],
        )?;
        self.interface.wait_until_idle(self.busy_wait)
    }

    /// Window over the whole buffer, pointer at the origin, `WRITE_RAM` issued
    fn begin_ram_write(&mut self) -> Result<(), Error<SPI::Error, PinE>> {
        let geometry = self.framebuffer.geometry();
        self.set_memory_area(0, 0, geometry.logical_width - 1, geometry.height - 1)?;
        self.set_memory_pointer(0, 0)?;
        self.interface.cmd(Cmd::WRITE_RAM)
    }

    fn trigger_display_update(&mut self) -> Result<(), Error<SPI::Error, PinE>> {
        self.state.advance(ControllerState::Refreshing);
        self.interface.cmd_with_data(
            Cmd::DISPLAY_UPDATE_CONTROL_2,
            &[Flag::DISPLAY_UPDATE_SEQUENCE],
        )?;
        self.interface.cmd(Cmd::MASTER_ACTIVATION)?;
        self.interface.wait_until_idle(self.busy_wait)?;

        self.partial_armed = false;
        self.state.advance(ControllerState::Idle);
        Ok(())
    }
}

impl<SPI, CS, DC, RST, BSY, DELAY, PinE> Panel for Epd2in9v2<SPI, CS, DC, RST, BSY, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin<Error = PinE>,
    DC: OutputPin<Error = PinE>,
    RST: OutputPin<Error = PinE>,
    BSY: InputPin<Error = PinE>,
    DELAY: DelayNs,
{
    type Error = Error<SPI::Error, PinE>;

    fn configure(&mut self, config: Config) -> Result<(), Self::Error> {
        let geometry = config.resolve_geometry(&PANEL)?;
        self.busy_wait = config.resolve_busy_wait(&PANEL);
        self.framebuffer =
            Framebuffer::new(geometry, config.get_rotation(), PANEL.polarity)?;
        self.lut_loaded = None;
        self.partial_armed = false;
        log::info!(
            "Configuring {} {}x{} (logical width {})",
            PANEL.name,
            geometry.width,
            geometry.height,
            geometry.logical_width
        );

        self.interface.idle()?;
        self.state.advance(ControllerState::Resetting);
        self.interface.reset(PANEL.reset)?;
        self.interface.delay.delay_ms(POST_RESET_DELAY_MS);

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
        self.restore_full_lut()?;

        self.state.advance(ControllerState::Transferring);
        self.begin_ram_write()?;
        let height = self.framebuffer.geometry().height;
        for y in 0..height {
            self.interface.data(self.framebuffer.row(y))?;
        }
        log::debug!("Sent {} bytes of frame data", self.framebuffer.buffer().len());
        self.trigger_display_update()
    }

    fn clear_display(&mut self) -> Result<(), Self::Error> {
        self.ensure_idle()?;
        self.restore_full_lut()?;
        self.framebuffer.clear(Color::White);

        self.state.advance(ControllerState::Transferring);
        self.begin_ram_write()?;
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
            .cmd_with_data(Cmd::DEEP_SLEEP_MODE, &[Flag::DEEP_SLEEP_MODE_1])?;
        self.lut_loaded = None;
        self.state.advance(ControllerState::DeepSleep);
        Ok(())
    }

    fn set_lut(&mut self, mode: RefreshMode) -> Result<(), Self::Error> {
        self.ensure_idle()?;
        self.load_lut(mode)?;
        self.partial_armed = mode == RefreshMode::Partial;
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

impl_draw_target!(Epd2in9v2<SPI, CS, DC, RST, BSY, DELAY>);
