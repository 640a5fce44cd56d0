/// Opcodes of the Waveshare 2.9" V2 controller that the driver sends
pub struct Cmd;
#[allow(missing_docs)]
impl Cmd {
    // Init
    pub const DRIVER_OUTPUT_CONTROL: u8 = 0x01;
    pub const GATE_DRIVING_VOLTAGE_CONTROL: u8 = 0x03;
    pub const SOURCE_DRIVING_VOLTAGE_CONTROL: u8 = 0x04;
    pub const DEEP_SLEEP_MODE: u8 = 0x10;
    pub const DATA_ENTRY_MODE_SETTING: u8 = 0x11;
    pub const SW_RESET: u8 = 0x12;
    pub const DISPLAY_UPDATE_CONTROL_1: u8 = 0x21;

    // Waveform
    pub const WRITE_VCOM_REGISTER: u8 = 0x2C;
    pub const WRITE_LUT_REGISTER: u8 = 0x32;
    pub const END_OPTION: u8 = 0x3F;

    // Update
    pub const MASTER_ACTIVATION: u8 = 0x20;
    pub const DISPLAY_UPDATE_CONTROL_2: u8 = 0x22;
    pub const WRITE_RAM: u8 = 0x24;
    pub const SET_RAM_X_ADDRESS_START_END_POSITION: u8 = 0x44;
    pub const SET_RAM_Y_ADDRESS_START_END_POSITION: u8 = 0x45;
    pub const SET_RAM_X_ADDRESS_COUNTER: u8 = 0x4E;
    pub const SET_RAM_Y_ADDRESS_COUNTER: u8 = 0x4F;
}
