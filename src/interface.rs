//! Display interface using SPI
//!
//! Owns the bus, the control lines and the delay provider of one panel and
//! frames every command and data transfer with chip-select and data/command.
//! Chip-select is driven by hand, so the bus itself may be shared with other
//! devices as long as the caller serializes access.
use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use crate::error::{Error, Line};

/// Bytes per bus write when repeating one value
const CHUNK_SIZE: usize = 32;

/// Default bound for a busy wait
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 10_000;

/// How commands and their data are framed on the bus
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Framing {
    /// One chip-select assertion covers a command byte and all of its data
    Burst,
    /// Every byte gets its own chip-select assertion and a single-byte transfer
    PerByte,
}

/// Reset line timing, fixed per panel
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ResetTiming {
    /// Time reset is held high before the pulse
    pub high_ms: u32,
    /// Length of the low pulse
    pub low_ms: u32,
    /// Settle time after releasing reset
    pub settle_ms: u32,
}

/// Polling policy for the busy line
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BusyWait {
    /// Delay between two reads of the busy line
    pub poll_ms: u32,
    /// Give up after this many polls, `None` waits forever
    pub max_polls: Option<u32>,
}

impl BusyWait {
    /// Poll until idle, no matter how long it takes
    pub const fn unbounded(poll_ms: u32) -> Self {
        BusyWait {
            poll_ms,
            max_polls: None,
        }
    }

    /// Poll until idle or until `timeout_ms` has been spent waiting.
    ///
    /// `poll_ms` is raised to at least 1 ms so the timeout is real time.
    pub const fn bounded(poll_ms: u32, timeout_ms: u32) -> Self {
        let poll_ms = if poll_ms == 0 { 1 } else { poll_ms };
        BusyWait {
            poll_ms,
            max_polls: Some(timeout_ms.div_ceil(poll_ms)),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Command,
    Data,
}

/// The connection of one panel: SPI bus, control lines and delay
pub struct DisplayInterface<SPI, CS, DC, RST, BSY, DELAY> {
    /// SPI bus, chip-select is handled here
    spi: SPI,
    /// Chip-select, low while the panel is addressed
    cs: CS,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Reseting
    rst: RST,
    /// High for busy, wait until display is ready
    busy: BSY,
    /// Delay provider
    pub(crate) delay: DELAY,
    framing: Framing,
}

impl<SPI, CS, DC, RST, BSY, DELAY> DisplayInterface<SPI, CS, DC, RST, BSY, DELAY> {
    /// Bind bus, pins and delay. Nothing is sent yet.
    pub fn new(
        spi: SPI,
        cs: CS,
        dc: DC,
        rst: RST,
        busy: BSY,
        delay: DELAY,
        framing: Framing,
    ) -> Self {
        DisplayInterface {
            spi,
            cs,
            dc,
            rst,
            busy,
            delay,
            framing,
        }
    }

    /// Framing used for every transfer
    pub fn framing(&self) -> Framing {
        self.framing
    }

    /// Give back bus, pins and delay
    pub fn release(self) -> (SPI, CS, DC, RST, BSY, DELAY) {
        (self.spi, self.cs, self.dc, self.rst, self.busy, self.delay)
    }
}

impl<SPI, CS, DC, RST, BSY, DELAY, PinE> DisplayInterface<SPI, CS, DC, RST, BSY, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin<Error = PinE>,
    DC: OutputPin<Error = PinE>,
    RST: OutputPin<Error = PinE>,
    BSY: InputPin<Error = PinE>,
    DELAY: DelayNs,
{
    /// Basic function for sending commands
    pub(crate) fn cmd(&mut self, command: u8) -> Result<(), Error<SPI::Error, PinE>> {
        self.send(Mode::Command, &[command])
    }

    /// Basic function for sending an array of u8-values of data over spi
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), Error<SPI::Error, PinE>> {
        self.send(Mode::Data, data)
    }

    /// Basic function for sending a command and the data belonging to it.
    ///
    /// With [`Framing::Burst`] both go out inside a single chip-select assertion.
    pub(crate) fn cmd_with_data(
        &mut self,
        command: u8,
        data: &[u8],
    ) -> Result<(), Error<SPI::Error, PinE>> {
        match self.framing {
            Framing::Burst => {
                self.set_mode(Mode::Command)?;
                self.select()?;
                self.write(&[command])?;
                if !data.is_empty() {
                    // DC may only change once the command byte is on the wire
                    self.flush()?;
                    self.set_mode(Mode::Data)?;
                    self.write(data)?;
                }
                self.deselect()
            }
            Framing::PerByte => {
                self.cmd(command)?;
                self.data(data)
            }
        }
    }

    /// Basic function for sending the same byte of data (one u8) multiple times over spi.
    /// Used for setting one color for the whole frame
    pub(crate) fn data_x_times(
        &mut self,
        val: u8,
        repetitions: u32,
    ) -> Result<(), Error<SPI::Error, PinE>> {
        if repetitions == 0 {
            return Ok(());
        }
        self.set_mode(Mode::Data)?;
        match self.framing {
            Framing::Burst => {
                let buffer = [val; CHUNK_SIZE];
                let full_chunks = repetitions as usize / CHUNK_SIZE;
                let remainder = repetitions as usize % CHUNK_SIZE;

                self.select()?;
                for _ in 0..full_chunks {
                    self.write(&buffer)?;
                }
                if remainder > 0 {
                    self.write(&buffer[..remainder])?;
                }
                self.deselect()?;
            }
            Framing::PerByte => {
                for _ in 0..repetitions {
                    self.framed_transfer(val)?;
                }
            }
        }
        log::debug!("Completed sending {} bytes of data", repetitions);
        Ok(())
    }

    /// Exchange one byte, returns what the panel clocked back.
    ///
    /// Does not touch chip-select.
    pub(crate) fn transfer_byte(&mut self, byte: u8) -> Result<u8, Error<SPI::Error, PinE>> {
        let mut buf = [byte];
        self.spi
            .transfer_in_place(&mut buf)
            .map(|()| buf[0])
            .map_err(Error::Spi)
    }

    /// Raise chip-select so the panel ignores the bus
    pub(crate) fn idle(&mut self) -> Result<(), Error<SPI::Error, PinE>> {
        self.cs.set_high().map_err(Error::pin(Line::ChipSelect))
    }

    /// Single read of the busy line
    pub fn is_busy(&mut self) -> Result<bool, Error<SPI::Error, PinE>> {
        self.busy.is_high().map_err(Error::pin(Line::Busy))
    }

    /// Poll the busy line until the panel reports idle.
    ///
    /// A bounded policy turns an expired wait into [`Error::Timeout`].
    pub(crate) fn wait_until_idle(
        &mut self,
        policy: BusyWait,
    ) -> Result<(), Error<SPI::Error, PinE>> {
        let mut polls: u32 = 0;
        while self.is_busy()? {
            if let Some(max_polls) = policy.max_polls {
                if polls >= max_polls {
                    let waited_ms = polls.saturating_mul(policy.poll_ms);
                    log::warn!("Busy line still high after {} ms, giving up", waited_ms);
                    return Err(Error::Timeout { waited_ms });
                }
            }
            self.delay.delay_ms(policy.poll_ms);
            polls = polls.saturating_add(1);
        }
        if polls > 0 {
            log::debug!("Panel idle after {} polls", polls);
        }
        Ok(())
    }

    /// Pulse the reset line with the panel's timing
    pub(crate) fn reset(&mut self, timing: ResetTiming) -> Result<(), Error<SPI::Error, PinE>> {
        self.set_reset(true)?;
        self.delay.delay_ms(timing.high_ms);
        self.set_reset(false)?;
        self.delay.delay_ms(timing.low_ms);
        self.set_reset(true)?;
        self.delay.delay_ms(timing.settle_ms);
        Ok(())
    }

    fn set_reset(&mut self, high: bool) -> Result<(), Error<SPI::Error, PinE>> {
        let result = if high {
            self.rst.set_high()
        } else {
            self.rst.set_low()
        };
        result.map_err(Error::pin(Line::Reset))
    }

    fn send(&mut self, mode: Mode, bytes: &[u8]) -> Result<(), Error<SPI::Error, PinE>> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.set_mode(mode)?;
        match self.framing {
            Framing::Burst => {
                self.select()?;
                self.write(bytes)?;
                self.deselect()
            }
            Framing::PerByte => {
                for &byte in bytes {
                    self.framed_transfer(byte)?;
                }
                Ok(())
            }
        }
    }

    fn framed_transfer(&mut self, byte: u8) -> Result<(), Error<SPI::Error, PinE>> {
        self.select()?;
        self.transfer_byte(byte)?;
        self.deselect()
    }

    fn set_mode(&mut self, mode: Mode) -> Result<(), Error<SPI::Error, PinE>> {
        // low for commands, high for data
        let result = match mode {
            Mode::Command => self.dc.set_low(),
            Mode::Data => self.dc.set_high(),
        };
        result.map_err(Error::pin(Line::DataCommand))
    }

    fn select(&mut self) -> Result<(), Error<SPI::Error, PinE>> {
        self.cs.set_low().map_err(Error::pin(Line::ChipSelect))
    }

    fn deselect(&mut self) -> Result<(), Error<SPI::Error, PinE>> {
        self.flush()?;
        self.cs.set_high().map_err(Error::pin(Line::ChipSelect))
    }

    fn flush(&mut self) -> Result<(), Error<SPI::Error, PinE>> {
        self.spi.flush().map_err(Error::Spi)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Error<SPI::Error, PinE>> {
        self.spi.write(bytes).map_err(Error::Spi)
    }

    fn send_format(&mut self, mode: Mode, format: DataFormat<'_>) -> Result<(), DisplayError> {
        match format {
            DataFormat::U8(bytes) => self.send(mode, bytes).map_err(DisplayError::from),
            DataFormat::U8Iter(iter) => {
                let mut chunk = [0u8; CHUNK_SIZE];
                let mut len = 0;
                for byte in iter {
                    chunk[len] = byte;
                    len += 1;
                    if len == CHUNK_SIZE {
                        self.send(mode, &chunk)?;
                        len = 0;
                    }
                }
                self.send(mode, &chunk[..len]).map_err(DisplayError::from)
            }
            _ => Err(DisplayError::DataFormatNotImplemented),
        }
    }
}

impl<SPI, CS, DC, RST, BSY, DELAY, PinE> WriteOnlyDataCommand
    for DisplayInterface<SPI, CS, DC, RST, BSY, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin<Error = PinE>,
    DC: OutputPin<Error = PinE>,
    RST: OutputPin<Error = PinE>,
    BSY: InputPin<Error = PinE>,
    DELAY: DelayNs,
{
    fn send_commands(&mut self, cmd: DataFormat<'_>) -> Result<(), DisplayError> {
        self.send_format(Mode::Command, cmd)
    }

    fn send_data(&mut self, buf: DataFormat<'_>) -> Result<(), DisplayError> {
        self.send_format(Mode::Data, buf)
    }
}
