//! Telemetry events sent by the robot without a matching request.
//!
//! All multi-byte fields are big-endian; every sensor event starts with a
//! u32 timestamp in milliseconds at payload offset 0.

use bytes::Buf;

use crate::constants::*;
use crate::error::ProtocolError;
use crate::frame::Frame;
use crate::types::*;

/// A decoded unsolicited event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryEvent {
    /// The running project was stopped on the robot.
    StopProject,

    /// A bumper was pressed or released.
    Bumpers {
        /// Timestamp in milliseconds.
        timestamp_ms: u32,
        /// Left bumper pressed.
        left_pressed: bool,
        /// Right bumper pressed.
        right_pressed: bool,
    },

    /// A motor stalled (or recovered).
    MotorStall {
        /// Timestamp in milliseconds.
        timestamp_ms: u32,
        /// Which motor.
        motor: StallMotor,
        /// Why it stalled.
        cause: StallCause,
    },

    /// The color sensors saw new colors.
    ///
    /// Each payload byte is split into its high then low nibble, giving 32
    /// 4-bit color values in sensor order.
    NewColor {
        /// Nibble values, two per payload byte.
        colors: [u8; PAYLOAD_SIZE * 2],
    },

    /// The ambient light state changed.
    Light {
        /// Timestamp in milliseconds.
        timestamp_ms: u32,
        /// New ambient light state.
        state: LightState,
        /// Left eye ambient level in millivolts.
        left_ambient_mv: u16,
        /// Right eye ambient level in millivolts.
        right_ambient_mv: u16,
    },

    /// The battery level dropped by more than 10%.
    BatteryLevel(BatteryLevel),

    /// A touch pad was pressed or released.
    TouchSensors {
        /// Timestamp in milliseconds.
        timestamp_ms: u32,
        /// Front-left pad pressed.
        front_left: bool,
        /// Front-right pad pressed.
        front_right: bool,
        /// Rear-right pad pressed.
        rear_right: bool,
        /// Rear-left pad pressed.
        rear_left: bool,
    },

    /// The cliff sensor detected (or cleared) a cliff.
    CliffSensor {
        /// Timestamp in milliseconds.
        timestamp_ms: u32,
        /// Cliff currently detected.
        detected: bool,
        /// Current sensor value in millivolts.
        sensor_mv: u16,
        /// Current detection threshold in millivolts.
        threshold_mv: u16,
    },
}

impl TelemetryEvent {
    /// Decode an unclaimed inbound frame.
    ///
    /// Returns `Ok(None)` for device/command pairs that carry no known
    /// event; callers log and ignore those rather than failing.
    pub fn decode(frame: &Frame) -> Result<Option<TelemetryEvent>, ProtocolError> {
        let event = match (frame.device, frame.command) {
            (DEVICE_GENERAL, EVT_GENERAL_STOP_PROJECT) => TelemetryEvent::StopProject,
            (DEVICE_BUMPERS, EVT_BUMPERS_CHANGED) => decode_bumpers(&frame.payload),
            (DEVICE_MOTORS, EVT_MOTORS_STALL) => decode_motor_stall(&frame.payload)?,
            (DEVICE_COLOR_SENSOR, EVT_COLOR_NEW_COLOR) => decode_new_color(&frame.payload),
            (DEVICE_LIGHT_SENSORS, EVT_LIGHT_CHANGED) => decode_light(&frame.payload)?,
            (DEVICE_BATTERY, EVT_BATTERY_LEVEL) => {
                TelemetryEvent::BatteryLevel(decode_battery_level(&frame.payload))
            }
            (DEVICE_TOUCH_SENSORS, EVT_TOUCH_CHANGED) => decode_touch(&frame.payload),
            (DEVICE_CLIFF_SENSOR, EVT_CLIFF_CHANGED) => decode_cliff(&frame.payload),
            _ => return Ok(None),
        };
        Ok(Some(event))
    }
}

/// Decode a battery reading (u16 voltage at 4, u8 percent at 6).
///
/// Also used for the GetBatteryLevel response, which shares the layout.
pub fn decode_battery_level(payload: &[u8; PAYLOAD_SIZE]) -> BatteryLevel {
    let mut buf = &payload[..];
    BatteryLevel {
        timestamp_ms: buf.get_u32(),
        voltage_mv: buf.get_u16(),
        percent: buf.get_u8(),
    }
}

fn decode_bumpers(payload: &[u8; PAYLOAD_SIZE]) -> TelemetryEvent {
    let mut buf = &payload[..];
    let timestamp_ms = buf.get_u32();
    let state = buf.get_u8();
    TelemetryEvent::Bumpers {
        timestamp_ms,
        left_pressed: state & MASK_BUMPER_LEFT != 0,
        right_pressed: state & MASK_BUMPER_RIGHT != 0,
    }
}

fn decode_motor_stall(payload: &[u8; PAYLOAD_SIZE]) -> Result<TelemetryEvent, ProtocolError> {
    let mut buf = &payload[..];
    let timestamp_ms = buf.get_u32();
    let motor = StallMotor::from_code(buf.get_u8())?;
    let cause = StallCause::from_code(buf.get_u8())?;
    Ok(TelemetryEvent::MotorStall { timestamp_ms, motor, cause })
}

fn decode_new_color(payload: &[u8; PAYLOAD_SIZE]) -> TelemetryEvent {
    let mut colors = [0u8; PAYLOAD_SIZE * 2];
    for (i, &byte) in payload.iter().enumerate() {
        colors[i * 2] = byte >> 4;
        colors[i * 2 + 1] = byte & 0x0F;
    }
    TelemetryEvent::NewColor { colors }
}

fn decode_light(payload: &[u8; PAYLOAD_SIZE]) -> Result<TelemetryEvent, ProtocolError> {
    let mut buf = &payload[..];
    let timestamp_ms = buf.get_u32();
    let state = LightState::from_code(buf.get_u8())?;
    Ok(TelemetryEvent::Light {
        timestamp_ms,
        state,
        left_ambient_mv: buf.get_u16(),
        right_ambient_mv: buf.get_u16(),
    })
}

fn decode_touch(payload: &[u8; PAYLOAD_SIZE]) -> TelemetryEvent {
    let mut buf = &payload[..];
    let timestamp_ms = buf.get_u32();
    let state = buf.get_u8();
    TelemetryEvent::TouchSensors {
        timestamp_ms,
        front_left: state & MASK_TOUCH_FRONT_LEFT != 0,
        front_right: state & MASK_TOUCH_FRONT_RIGHT != 0,
        rear_right: state & MASK_TOUCH_REAR_RIGHT != 0,
        rear_left: state & MASK_TOUCH_REAR_LEFT != 0,
    }
}

fn decode_cliff(payload: &[u8; PAYLOAD_SIZE]) -> TelemetryEvent {
    let mut buf = &payload[..];
    let timestamp_ms = buf.get_u32();
    let detected = buf.get_u8() == 1;
    TelemetryEvent::CliffSensor {
        timestamp_ms,
        detected,
        sensor_mv: buf.get_u16(),
        threshold_mv: buf.get_u16(),
    }
}
