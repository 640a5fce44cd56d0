//! Refresh waveform selection
//!
//! Panels with register programmable waveforms take a 159 byte table: 153
//! bytes of phase data for the LUT register followed by the values of the
//! registers that go with it (end option, gate voltage, three source
//! voltages, VCOM).

/// Length of a register waveform table
pub const WAVEFORM_LEN: usize = 159;

/// Bytes written to the LUT register itself
pub const PHASE_LEN: usize = 153;

/// Which refresh waveform the next `display` uses
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum RefreshMode {
    /// Slow, redraws every pixel, no ghosting
    #[default]
    Full,
    /// Fast, leaves visible ghosting
    Partial,
}

/// View over one waveform table
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Waveform<'a>(&'a [u8; WAVEFORM_LEN]);

impl<'a> Waveform<'a> {
    /// Wrap a table
    pub const fn new(table: &'a [u8; WAVEFORM_LEN]) -> Self {
        Waveform(table)
    }

    /// Phase data for the LUT register
    pub fn phases(&self) -> &'a [u8] {
        &self.0[..PHASE_LEN]
    }

    /// End option (EOPT)
    pub fn end_option(&self) -> u8 {
        self.0[153]
    }

    /// Gate driving voltage (VGH)
    pub fn gate_voltage(&self) -> u8 {
        self.0[154]
    }

    /// Source driving voltages VSH1, VSH2, VSL
    pub fn source_voltage(&self) -> &'a [u8] {
        &self.0[155..158]
    }

    /// VCOM register value
    pub fn vcom(&self) -> u8 {
        self.0[158]
    }
}
