//! Commands that can be sent to the robot.

use bytes::BufMut;

use crate::constants::*;
use crate::types::*;

/// Commands that can be sent to the robot.
///
/// A command knows its target device, its command code and its payload
/// encoding; whether the caller blocks for the matching response is a
/// client-side policy, not part of the encoding.
#[derive(Debug, Clone)]
pub enum Command {
    /// Get software/hardware versions for one board.
    GetVersions {
        /// Which board to query.
        board: BoardVersion,
    },

    /// Set the BLE advertising name (up to 16 bytes, NUL-padded).
    SetName {
        /// The new name.
        name: String,
    },

    /// Get the BLE advertising name.
    GetName,

    /// Immediately stop the robot and cancel pending actions.
    StopAndReset,

    /// Ask the robot to drop the BLE connection from its side.
    Disconnect,

    /// Enable event notifications for the listed devices.
    EnableEvents {
        /// Device ids whose events to enable.
        devices: Vec<u8>,
    },

    /// Disable event notifications for the listed devices.
    DisableEvents {
        /// Device ids whose events to disable.
        devices: Vec<u8>,
    },

    /// Get the product serial number.
    GetSerialNumber,

    /// Set both motor speeds in mm/s, clamped to [-100, 100].
    SetLeftRightSpeed {
        /// Left motor speed.
        left: i32,
        /// Right motor speed.
        right: i32,
    },

    /// Set the left motor speed only.
    SetLeftSpeed {
        /// Left motor speed in mm/s.
        speed: i32,
    },

    /// Set the right motor speed only.
    SetRightSpeed {
        /// Right motor speed in mm/s.
        speed: i32,
    },

    /// Drive a straight-line distance.
    DriveDistance {
        /// Distance in millimeters; negative drives backwards.
        distance_mm: i32,
    },

    /// Rotate in place.
    RotateAngle {
        /// Angle in decidegrees (1/10 degree); positive is clockwise.
        decidegrees: i32,
    },

    /// Set the marker/eraser actuator position.
    SetMarkerEraser {
        /// Requested position.
        position: MarkerEraserPosition,
    },

    /// Set the LED cross animation mode and color.
    SetLedAnimation {
        /// Animation mode.
        mode: LedAnimation,
        /// Red channel brightness.
        red: u8,
        /// Green channel brightness.
        green: u8,
        /// Blue channel brightness.
        blue: u8,
    },

    /// Read one bank of color sensor data.
    GetColorData {
        /// Sensor bank, 0..=3.
        bank: u8,
        /// Illumination to use while sampling.
        lighting: LightingOption,
    },

    /// Play a note from the buzzer.
    PlayNote {
        /// Frequency in Hz.
        frequency_hz: u32,
        /// Duration in milliseconds; zero cancels any playing note.
        duration_ms: u16,
    },

    /// Immediately stop any playing note.
    StopNote,

    /// Speak a phrase in robot language (up to 16 bytes).
    SayPhrase {
        /// The phrase to speak.
        phrase: String,
    },

    /// Request the current battery level.
    GetBatteryLevel,
}

impl Command {
    /// The device id this command is addressed to.
    pub fn device(&self) -> u8 {
        match self {
            Command::GetVersions { .. }
            | Command::SetName { .. }
            | Command::GetName
            | Command::StopAndReset
            | Command::Disconnect
            | Command::EnableEvents { .. }
            | Command::DisableEvents { .. }
            | Command::GetSerialNumber => DEVICE_GENERAL,

            Command::SetLeftRightSpeed { .. }
            | Command::SetLeftSpeed { .. }
            | Command::SetRightSpeed { .. }
            | Command::DriveDistance { .. }
            | Command::RotateAngle { .. } => DEVICE_MOTORS,

            Command::SetMarkerEraser { .. } => DEVICE_MARKER_ERASER,
            Command::SetLedAnimation { .. } => DEVICE_LED_LIGHTS,
            Command::GetColorData { .. } => DEVICE_COLOR_SENSOR,

            Command::PlayNote { .. } | Command::StopNote | Command::SayPhrase { .. } => {
                DEVICE_SOUND
            }

            Command::GetBatteryLevel => DEVICE_BATTERY,
        }
    }

    /// The command code within the target device.
    pub fn code(&self) -> u8 {
        match self {
            Command::GetVersions { .. } => CMD_GENERAL_GET_VERSIONS,
            Command::SetName { .. } => CMD_GENERAL_SET_NAME,
            Command::GetName => CMD_GENERAL_GET_NAME,
            Command::StopAndReset => CMD_GENERAL_STOP_AND_RESET,
            Command::Disconnect => CMD_GENERAL_DISCONNECT,
            Command::EnableEvents { .. } => CMD_GENERAL_ENABLE_EVENTS,
            Command::DisableEvents { .. } => CMD_GENERAL_DISABLE_EVENTS,
            Command::GetSerialNumber => CMD_GENERAL_GET_SERIAL_NUMBER,
            Command::SetLeftRightSpeed { .. } => CMD_MOTORS_SET_LEFT_RIGHT_SPEED,
            Command::SetLeftSpeed { .. } => CMD_MOTORS_SET_LEFT_SPEED,
            Command::SetRightSpeed { .. } => CMD_MOTORS_SET_RIGHT_SPEED,
            Command::DriveDistance { .. } => CMD_MOTORS_DRIVE_DISTANCE,
            Command::RotateAngle { .. } => CMD_MOTORS_ROTATE_ANGLE,
            Command::SetMarkerEraser { .. } => CMD_MARKER_ERASER_SET_POSITION,
            Command::SetLedAnimation { .. } => CMD_LED_SET_ANIMATION,
            Command::GetColorData { .. } => CMD_COLOR_GET_DATA,
            // StopNote goes out as PlayNote with an empty payload, which the
            // robot reads as duration zero.
            Command::PlayNote { .. } | Command::StopNote => CMD_SOUND_PLAY_NOTE,
            Command::SayPhrase { .. } => CMD_SOUND_SAY_PHRASE,
            Command::GetBatteryLevel => CMD_BATTERY_GET_LEVEL,
        }
    }

    /// Encode the logical payload. All multi-byte fields are big-endian.
    ///
    /// The result may be shorter than the wire payload area; the frame
    /// codec zero-pads it to the full 16 bytes.
    pub fn encode_payload(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(PAYLOAD_SIZE);

        match self {
            Command::GetVersions { board } => {
                buf.push(board.selector());
            }

            Command::SetName { name } => {
                buf.extend_from_slice(name.as_bytes());
            }

            Command::GetName
            | Command::StopAndReset
            | Command::Disconnect
            | Command::GetSerialNumber
            | Command::GetBatteryLevel
            | Command::StopNote => {}

            Command::EnableEvents { devices } | Command::DisableEvents { devices } => {
                buf.extend_from_slice(&device_bitfield(devices));
            }

            Command::SetLeftRightSpeed { left, right } => {
                buf.put_i32((*left).clamp(MOTOR_SPEED_MIN, MOTOR_SPEED_MAX));
                buf.put_i32((*right).clamp(MOTOR_SPEED_MIN, MOTOR_SPEED_MAX));
            }

            Command::SetLeftSpeed { speed } | Command::SetRightSpeed { speed } => {
                buf.put_i32((*speed).clamp(MOTOR_SPEED_MIN, MOTOR_SPEED_MAX));
            }

            Command::DriveDistance { distance_mm } => {
                buf.put_i32(*distance_mm);
            }

            Command::RotateAngle { decidegrees } => {
                buf.put_i32(*decidegrees);
            }

            Command::SetMarkerEraser { position } => {
                buf.push(*position as u8);
            }

            Command::SetLedAnimation { mode, red, green, blue } => {
                buf.push(*mode as u8);
                buf.push(*red);
                buf.push(*green);
                buf.push(*blue);
            }

            Command::GetColorData { bank, lighting } => {
                buf.push(*bank);
                buf.push(*lighting as u8);
                buf.push(COLOR_FORMAT_ADC);
            }

            Command::PlayNote { frequency_hz, duration_ms } => {
                buf.put_u32(*frequency_hz);
                buf.put_u16(*duration_ms);
            }

            Command::SayPhrase { phrase } => {
                buf.extend_from_slice(phrase.as_bytes());
            }
        }

        buf
    }
}

/// Build the 128-bit device bitfield used by event enable/disable.
///
/// Bit N (for device id N) lives in byte `15 - N / 8`, bit `N % 8`, so the
/// whole field reads as one big-endian 128-bit integer.
fn device_bitfield(devices: &[u8]) -> [u8; PAYLOAD_SIZE] {
    let mut field = [0u8; PAYLOAD_SIZE];
    for &device in devices {
        field[PAYLOAD_SIZE - 1 - (device as usize) / 8] |= 1 << (device % 8);
    }
    field
}
