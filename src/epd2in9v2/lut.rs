//! Waveform tables of the 2.9" V2 panel
use crate::lut::{RefreshMode, Waveform, WAVEFORM_LEN};

/// Look up table for full updates
#[rustfmt::skip]
pub const LUT_FULL_UPDATE: [u8; WAVEFORM_LEN] = [
    0x80, 0x66, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00, // VS L0
    0x10, 0x66, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00, 0x00, // VS L1
    0x80, 0x66, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00, // VS L2
    0x10, 0x66, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00, 0x00, // VS L3
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // VS L4
    0x14, 0x08, 0x00, 0x00, 0x00, 0x00, 0x01, // TP, SR, RP of group 0
    0x0A, 0x0A, 0x00, 0x0A, 0x0A, 0x00, 0x01, // group 1
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // group 2
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // group 3
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // group 4
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // group 5
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // group 6
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // group 7
    0x14, 0x08, 0x00, 0x01, 0x00, 0x00, 0x01, // group 8
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, // group 9
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // group 10
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // group 11
    0x44, 0x44, 0x44, 0x44, 0x44, 0x44, 0x00, 0x00, 0x00, // FR, XON
    0x22, 0x17, 0x41, 0x00, 0x32, 0x36, // EOPT, VGH, VSH1, VSH2, VSL, VCOM
];

/// Look up table for partial updates, faster but there will be some ghosting
#[rustfmt::skip]
pub const LUT_PARTIAL_UPDATE: [u8; WAVEFORM_LEN] = [
    0x00, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // VS L0
    0x80, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // VS L1
    0x40, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // VS L2
    0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // VS L3
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // VS L4
    0x0A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, // TP, SR, RP of group 0
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // group 1
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // group 2
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // group 3
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // group 4
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // group 5
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // group 6
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // group 7
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // group 8
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // group 9
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // group 10
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // group 11
    0x22, 0x22, 0x22, 0x22, 0x22, 0x22, 0x00, 0x00, 0x00, // FR, XON
    0x22, 0x17, 0x41, 0xB0, 0x32, 0x36, // EOPT, VGH, VSH1, VSH2, VSL, VCOM
];

/// Table for a refresh mode
pub fn waveform(mode: RefreshMode) -> Waveform<'static> {
    match mode {
        RefreshMode::Full => Waveform::new(&LUT_FULL_UPDATE),
        RefreshMode::Partial => Waveform::new(&LUT_PARTIAL_UPDATE),
    }
}
