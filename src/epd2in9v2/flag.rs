/// Parameter values for the 2.9" V2 registers in use.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Driver Output Control (0x01): GD = 0, SM = 0, TB = 0
    pub const DRIVER_OUTPUT_GATE_SCAN_NORMAL: u8 = 0x00;

    // Data Entry Mode (0x11)
    pub const DATA_ENTRY_INCRY_INCRX: u8 = 0x03;

    // Display Update Control 1 (0x21): normal RAM content, source S8..S167
    pub const DISPLAY_UPDATE_NORMAL: u8 = 0x00;
    pub const DISPLAY_UPDATE_SOURCE_S8_S167: u8 = 0x80;

    // Display Update Control 2 (0x22): clock, analog, display, off
    pub const DISPLAY_UPDATE_SEQUENCE: u8 = 0xC7;

    // Deep Sleep Mode (0x10)
    pub const DEEP_SLEEP_MODE_1: u8 = 0x01;
}
