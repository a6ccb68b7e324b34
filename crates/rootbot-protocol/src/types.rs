//! Common types used in the protocol.

use crate::constants::*;
use crate::error::ProtocolError;

/// Board selector for the GetVersions command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardVersion {
    /// The robot's main board.
    #[default]
    MainBoard,
    /// The color sensor board.
    ColorBoard,
}

impl BoardVersion {
    /// The magic selector byte carried in the request payload.
    pub fn selector(self) -> u8 {
        match self {
            BoardVersion::MainBoard => BOARD_MAIN,
            BoardVersion::ColorBoard => BOARD_COLOR,
        }
    }
}

/// Version numbers reported by a board.
///
/// The response payload pairs bytes 1..=8 into four "major.minor" strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    /// Firmware version.
    pub firmware: String,
    /// Hardware version.
    pub hardware: String,
    /// Bootloader version.
    pub bootloader: String,
    /// Protocol version.
    pub protocol: String,
}

impl VersionInfo {
    /// Decode from a GetVersions response payload.
    pub fn from_payload(payload: &[u8; PAYLOAD_SIZE]) -> Self {
        VersionInfo {
            firmware: format!("{}.{}", payload[1], payload[2]),
            hardware: format!("{}.{}", payload[3], payload[4]),
            bootloader: format!("{}.{}", payload[5], payload[6]),
            protocol: format!("{}.{}", payload[7], payload[8]),
        }
    }
}

/// Position of the marker/eraser actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerEraserPosition {
    /// Marker up, eraser up.
    MarkerUpEraserUp = 0,
    /// Marker down, eraser up.
    MarkerDownEraserUp = 1,
    /// Marker up, eraser down.
    MarkerUpEraserDown = 2,
}

/// LED cross animation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedAnimation {
    /// LEDs off.
    Off = 0,
    /// Solid color.
    On = 1,
    /// Blinking.
    Blink = 2,
    /// Spinning.
    Spin = 3,
}

/// Lighting option used while sampling the color sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingOption {
    /// Illumination off.
    Off = 0,
    /// Red illumination.
    Red = 1,
    /// Green illumination.
    Green = 2,
    /// Blue illumination.
    Blue = 3,
    /// All channels on.
    All = 4,
}

/// Which motor a stall event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StallMotor {
    /// Left drive motor.
    Left,
    /// Right drive motor.
    Right,
    /// Marker/eraser actuator motor.
    MarkerEraser,
}

impl StallMotor {
    pub(crate) fn from_code(code: u8) -> Result<Self, ProtocolError> {
        match code {
            0 => Ok(StallMotor::Left),
            1 => Ok(StallMotor::Right),
            2 => Ok(StallMotor::MarkerEraser),
            value => Err(ProtocolError::InvalidFieldValue {
                field: "stall motor",
                value,
            }),
        }
    }
}

/// Cause of a motor stall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StallCause {
    /// No stall.
    NoStall,
    /// Overcurrent detected.
    Overcurrent,
    /// Undercurrent detected.
    Undercurrent,
    /// Motor turning slower than commanded.
    Underspeed,
    /// PID controller output saturated.
    SaturatedPid,
    /// Command timed out.
    Timeout,
}

impl StallCause {
    pub(crate) fn from_code(code: u8) -> Result<Self, ProtocolError> {
        match code {
            0 => Ok(StallCause::NoStall),
            1 => Ok(StallCause::Overcurrent),
            2 => Ok(StallCause::Undercurrent),
            3 => Ok(StallCause::Underspeed),
            4 => Ok(StallCause::SaturatedPid),
            5 => Ok(StallCause::Timeout),
            value => Err(ProtocolError::InvalidFieldValue {
                field: "stall cause",
                value,
            }),
        }
    }
}

/// Ambient light state reported by the light sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightState {
    /// Both eyes dark.
    BothDark,
    /// Right eye brighter than left.
    RightBrighter,
    /// Left eye brighter than right.
    LeftBrighter,
    /// Both eyes bright.
    BothBright,
}

impl LightState {
    pub(crate) fn from_code(code: u8) -> Result<Self, ProtocolError> {
        match code {
            0 => Ok(LightState::BothDark),
            1 => Ok(LightState::RightBrighter),
            2 => Ok(LightState::LeftBrighter),
            4 => Ok(LightState::BothBright),
            value => Err(ProtocolError::InvalidFieldValue {
                field: "light state",
                value,
            }),
        }
    }
}

/// A battery reading, shared by the GetBatteryLevel response and the
/// unsolicited battery level event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryLevel {
    /// Timestamp in milliseconds.
    pub timestamp_ms: u32,
    /// Battery voltage in millivolts.
    pub voltage_mv: u16,
    /// Battery percent, 0-100.
    pub percent: u8,
}

/// Select sensor states from the robot-state characteristic bitfield.
///
/// Decoded from two bytes: a status bitmask
/// (`0b00<Cliff><L_Bump><R_Bump><RL_Touch><RR_Touch><FL_Touch><FR_Touch>`)
/// and a battery percent byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RobotState {
    /// Cliff detected.
    pub cliff: bool,
    /// Left bumper pressed.
    pub left_bumper: bool,
    /// Right bumper pressed.
    pub right_bumper: bool,
    /// Rear-left touch pad pressed.
    pub rear_left_touch: bool,
    /// Rear-right touch pad pressed.
    pub rear_right_touch: bool,
    /// Front-left touch pad pressed.
    pub front_left_touch: bool,
    /// Front-right touch pad pressed.
    pub front_right_touch: bool,
    /// Battery percent, 0-100.
    pub battery_percent: u8,
}

impl RobotState {
    /// Decode the two-byte characteristic value.
    ///
    /// Some firmware revisions report only the battery byte; the status
    /// bits then read as all-clear.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let status = if bytes.len() >= 2 { bytes[0] } else { 0 };
        let battery = bytes.last().copied().unwrap_or(0);
        RobotState {
            cliff: status & MASK_STATE_CLIFF != 0,
            left_bumper: status & MASK_STATE_LEFT_BUMPER != 0,
            right_bumper: status & MASK_STATE_RIGHT_BUMPER != 0,
            rear_left_touch: status & MASK_STATE_REAR_LEFT_TOUCH != 0,
            rear_right_touch: status & MASK_STATE_REAR_RIGHT_TOUCH != 0,
            front_left_touch: status & MASK_STATE_FRONT_LEFT_TOUCH != 0,
            front_right_touch: status & MASK_STATE_FRONT_RIGHT_TOUCH != 0,
            battery_percent: battery,
        }
    }
}

/// Robot identity read once at connection time.
///
/// These come from plain characteristic reads, not from the framed
/// protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotInfo {
    /// Product serial number.
    pub serial_number: String,
    /// Firmware version string.
    pub firmware_version: String,
    /// Hardware version string.
    pub hardware_version: String,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Sensor/battery snapshot at connection time.
    pub state: RobotState,
}

/// Interpret NUL-padded bytes as a string, stripping padding.
pub fn string_from_padded(bytes: &[u8]) -> String {
    bytes
        .iter()
        .filter(|&&b| b != 0)
        .map(|&b| b as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info_pairs_bytes() {
        let mut payload = [0u8; PAYLOAD_SIZE];
        payload[1..=8].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let info = VersionInfo::from_payload(&payload);
        assert_eq!(info.firmware, "1.2");
        assert_eq!(info.hardware, "3.4");
        assert_eq!(info.bootloader, "5.6");
        assert_eq!(info.protocol, "7.8");
    }

    #[test]
    fn test_robot_state_bumpers() {
        let state = RobotState::from_bytes(&[0b0011_0000, 87]);
        assert!(state.left_bumper);
        assert!(state.right_bumper);
        assert!(!state.cliff);
        assert_eq!(state.battery_percent, 87);
    }

    #[test]
    fn test_robot_state_cliff_and_touch() {
        let state = RobotState::from_bytes(&[0b0100_1001, 12]);
        assert!(state.cliff);
        assert!(state.rear_left_touch);
        assert!(state.front_right_touch);
        assert!(!state.left_bumper);
    }

    #[test]
    fn test_robot_state_battery_only() {
        let state = RobotState::from_bytes(&[42]);
        assert_eq!(state.battery_percent, 42);
        assert!(!state.cliff);
    }

    #[test]
    fn test_string_from_padded() {
        assert_eq!(string_from_padded(b"Root\0\0\0\0"), "Root");
        assert_eq!(string_from_padded(&[]), "");
    }

    #[test]
    fn test_light_state_rejects_three() {
        assert!(LightState::from_code(3).is_err());
        assert_eq!(LightState::from_code(4).unwrap(), LightState::BothBright);
    }
}
