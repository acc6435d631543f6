//We have seperate consts and enums for the purpose of being used during
//testing(consts) or as parameters(enum).
pub const INIT_AIR_QUALITY: [u8; 2] = [0x20, 0x03];
pub const MEASURE_AIR_QUALITY: [u8; 2] = [0x20, 0x08];
pub const GET_BASELINE: [u8; 2] = [0x20, 0x15];
pub const SET_BASELINE: [u8; 2] = [0x20, 0x1E];
pub const SET_HUMIDITY: [u8; 2] = [0x20, 0x61];
pub const MEASURE_TEST: [u8; 2] = [0x20, 0x32];
pub const GET_FEATURE_SET_VERSION: [u8; 2] = [0x20, 0x2F];
pub const MEASURE_RAW_SIGNALS: [u8; 2] = [0x20, 0x50];
pub const GET_SERIAL_ID: [u8; 2] = [0x36, 0x82];

//The reset byte goes to the i2c general call address, so it is not
//scoped to this device.
pub const GENERAL_CALL_ADDRESS: u8 = 0x00;
pub const GENERAL_CALL_RESET: u8 = 0x06;

#[derive(Clone, Copy)]
pub enum Command {
    InitAirQuality,
    MeasureAirQuality,
    GetBaseline,
    SetBaseline,
    SetHumidity,
    MeasureTest,
    GetFeatureSetVersion,
    MeasureRawSignals,
    GetSerialId,
}

//Response size and completion time differ per command; keeping those
//facts next to the opcode saves a hand written read path for each one.
//Write only commands carry no response and no polling budget.
pub struct DeviceCommand {
    pub opcode: [u8; 2],
    pub response_words: usize,
    pub poll_attempts: u32,
    pub poll_interval_ms: u32,
}

impl Command {
    pub fn as_device_command(&self) -> DeviceCommand {
        match self {
            Command::InitAirQuality => DeviceCommand {
                opcode: INIT_AIR_QUALITY,
                response_words: 0,
                poll_attempts: 0,
                poll_interval_ms: 0,
            },
            Command::MeasureAirQuality => DeviceCommand {
                opcode: MEASURE_AIR_QUALITY,
                response_words: 2,
                poll_attempts: 12,
                poll_interval_ms: 1,
            },
            Command::GetBaseline => DeviceCommand {
                opcode: GET_BASELINE,
                response_words: 2,
                poll_attempts: 12,
                poll_interval_ms: 1,
            },
            Command::SetBaseline => DeviceCommand {
                opcode: SET_BASELINE,
                response_words: 0,
                poll_attempts: 0,
                poll_interval_ms: 0,
            },
            Command::SetHumidity => DeviceCommand {
                opcode: SET_HUMIDITY,
                response_words: 0,
                poll_attempts: 0,
                poll_interval_ms: 0,
            },
            Command::MeasureTest => DeviceCommand {
                opcode: MEASURE_TEST,
                response_words: 1,
                poll_attempts: 22,
                poll_interval_ms: 10,
            },
            Command::GetFeatureSetVersion => DeviceCommand {
                opcode: GET_FEATURE_SET_VERSION,
                response_words: 1,
                poll_attempts: 3,
                poll_interval_ms: 1,
            },
            Command::MeasureRawSignals => DeviceCommand {
                opcode: MEASURE_RAW_SIGNALS,
                response_words: 2,
                poll_attempts: 5,
                poll_interval_ms: 5,
            },
            Command::GetSerialId => DeviceCommand {
                opcode: GET_SERIAL_ID,
                response_words: 3,
                poll_attempts: 5,
                poll_interval_ms: 1,
            },
        }
    }
}
