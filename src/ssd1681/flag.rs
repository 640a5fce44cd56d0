/// Parameter values for the SSD1681 commands in use.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Driver Output Control (0x01), third byte: G0 first, non-interlaced, top to bottom
    pub const DRIVER_OUTPUT_GATE_SCAN_NORMAL: u8 = 0x00;

    // Data Entry Mode (0x11)
    pub const DATA_ENTRY_INCRY_INCRX: u8 = 0x03; // Y increment, X increment, update in X

    // Border Waveform Control (0x3C): GS transition, follow LUT 1
    pub const BORDER_WAVEFORM_FOLLOW_LUT1: u8 = 0x05;

    // Temperature Sensor Control (0x18)
    pub const INTERNAL_TEMP_SENSOR: u8 = 0x80;

    // Display Update Control 2 (0x22)
    pub const DISPLAY_MODE_1: u8 = 0xF7; // clock, analog, temp, LUT mode 1, display, off
    pub const DISPLAY_MODE_2: u8 = 0xFF; // same with LUT mode 2 (partial)

    // Deep Sleep Mode (0x10)
    pub const DEEP_SLEEP_MODE_1: u8 = 0x01;
}
