//! Protocol constants
//!
//! These constants define the device ids, command codes, event codes and
//! bitmasks used by the Root robot UART protocol.

// ============================================================================
// Sizes
// ============================================================================

/// Total size of a wire frame in bytes.
pub const FRAME_SIZE: usize = 20;
/// Size of the frame payload in bytes (always zero-padded to this length).
pub const PAYLOAD_SIZE: usize = 16;
/// Maximum length of the robot name and spoken phrases, in bytes.
pub const MAX_NAME_LEN: usize = 16;

// ============================================================================
// Device Ids
// ============================================================================

/// General robot control (versions, name, reset, disconnect).
pub const DEVICE_GENERAL: u8 = 0;
/// Left/right drive motors.
pub const DEVICE_MOTORS: u8 = 1;
/// Marker/eraser actuator.
pub const DEVICE_MARKER_ERASER: u8 = 2;
/// LED cross animation.
pub const DEVICE_LED_LIGHTS: u8 = 3;
/// Downward-facing color sensor array.
pub const DEVICE_COLOR_SENSOR: u8 = 4;
/// Buzzer and speech.
pub const DEVICE_SOUND: u8 = 5;
/// Front bumpers.
pub const DEVICE_BUMPERS: u8 = 12;
/// Ambient light sensors ("eyes").
pub const DEVICE_LIGHT_SENSORS: u8 = 13;
/// Battery monitor.
pub const DEVICE_BATTERY: u8 = 14;
/// Top touch sensor pads.
pub const DEVICE_TOUCH_SENSORS: u8 = 17;
/// Front IR cliff sensor.
pub const DEVICE_CLIFF_SENSOR: u8 = 20;

// ============================================================================
// General Commands (device 0)
// ============================================================================

/// Get board software/hardware versions.
pub const CMD_GENERAL_GET_VERSIONS: u8 = 0;
/// Set the BLE advertising name.
pub const CMD_GENERAL_SET_NAME: u8 = 1;
/// Get the BLE advertising name.
pub const CMD_GENERAL_GET_NAME: u8 = 2;
/// Immediately stop the robot and cancel pending actions.
pub const CMD_GENERAL_STOP_AND_RESET: u8 = 3;
/// Stop Project event (robot → host, no payload).
pub const EVT_GENERAL_STOP_PROJECT: u8 = 4;
/// Instruct the robot to terminate the BLE connection from its side.
pub const CMD_GENERAL_DISCONNECT: u8 = 6;
/// Enable event notifications for devices (enabled by default).
pub const CMD_GENERAL_ENABLE_EVENTS: u8 = 7;
/// Disable event notifications for devices.
pub const CMD_GENERAL_DISABLE_EVENTS: u8 = 9;
/// Query which device events are enabled.
pub const CMD_GENERAL_GET_ENABLED_EVENTS: u8 = 11;
/// Get the product serial number.
pub const CMD_GENERAL_GET_SERIAL_NUMBER: u8 = 14;

/// Board selector byte for the main board in GetVersions.
pub const BOARD_MAIN: u8 = 0xA5;
/// Board selector byte for the color board in GetVersions.
pub const BOARD_COLOR: u8 = 0xC6;

// ============================================================================
// Motors Commands (device 1)
// ============================================================================

/// Set left and right motor speed together.
pub const CMD_MOTORS_SET_LEFT_RIGHT_SPEED: u8 = 4;
/// Set left motor speed only.
pub const CMD_MOTORS_SET_LEFT_SPEED: u8 = 6;
/// Set right motor speed only.
pub const CMD_MOTORS_SET_RIGHT_SPEED: u8 = 7;
/// Drive a straight-line distance in millimeters.
pub const CMD_MOTORS_DRIVE_DISTANCE: u8 = 8;
/// Rotate in place by an angle in decidegrees.
pub const CMD_MOTORS_ROTATE_ANGLE: u8 = 12;
/// Motor stall event (robot → host).
pub const EVT_MOTORS_STALL: u8 = 29;

/// Minimum motor speed in mm/s.
pub const MOTOR_SPEED_MIN: i32 = -100;
/// Maximum motor speed in mm/s.
pub const MOTOR_SPEED_MAX: i32 = 100;

// ============================================================================
// MarkerEraser Commands (device 2)
// ============================================================================

/// Set the marker/eraser actuator position.
pub const CMD_MARKER_ERASER_SET_POSITION: u8 = 0;

// ============================================================================
// LEDLights Commands (device 3)
// ============================================================================

/// Set LED cross animation mode and color.
pub const CMD_LED_SET_ANIMATION: u8 = 3;

// ============================================================================
// ColorSensor Commands (device 4)
// ============================================================================

/// Read color sensor data for one bank of sensors.
pub const CMD_COLOR_GET_DATA: u8 = 1;
/// New color event (robot → host).
pub const EVT_COLOR_NEW_COLOR: u8 = 2;

/// Highest valid color sensor bank index.
pub const COLOR_BANK_MAX: u8 = 3;
/// Color data format: 12-bit ADC counts.
pub const COLOR_FORMAT_ADC: u8 = 0;
/// Color data format: millivolts.
pub const COLOR_FORMAT_MILLIVOLTS: u8 = 1;

// ============================================================================
// Sound Commands (device 5)
// ============================================================================

/// Play a note from the buzzer.
pub const CMD_SOUND_PLAY_NOTE: u8 = 0;
/// Stop any currently playing note.
pub const CMD_SOUND_STOP_NOTE: u8 = 1;
/// Speak a phrase in robot language.
pub const CMD_SOUND_SAY_PHRASE: u8 = 4;

// ============================================================================
// Sensor Events (devices 12, 13, 14, 17, 20)
// ============================================================================

/// Bumper pressed/released event.
pub const EVT_BUMPERS_CHANGED: u8 = 0;
/// Ambient light state event.
pub const EVT_LIGHT_CHANGED: u8 = 0;
/// Battery level event (sent on a >10% drop).
pub const EVT_BATTERY_LEVEL: u8 = 0;
/// Request the current battery level.
pub const CMD_BATTERY_GET_LEVEL: u8 = 1;
/// Touch sensor pressed/released event.
pub const EVT_TOUCH_CHANGED: u8 = 0;
/// Cliff detected/cleared event.
pub const EVT_CLIFF_CHANGED: u8 = 0;

// ============================================================================
// Bitmasks
// ============================================================================

/// Bumper event state byte: left bumper pressed.
pub const MASK_BUMPER_LEFT: u8 = 0x80;
/// Bumper event state byte: right bumper pressed.
pub const MASK_BUMPER_RIGHT: u8 = 0x40;

/// Touch event state byte: front-left pad.
pub const MASK_TOUCH_FRONT_LEFT: u8 = 0x80;
/// Touch event state byte: front-right pad.
pub const MASK_TOUCH_FRONT_RIGHT: u8 = 0x40;
/// Touch event state byte: rear-right pad.
pub const MASK_TOUCH_REAR_RIGHT: u8 = 0x20;
/// Touch event state byte: rear-left pad.
pub const MASK_TOUCH_REAR_LEFT: u8 = 0x10;

// Robot-state characteristic status byte:
// 0b00<Cliff><L_Bump><R_Bump><RL_Touch><RR_Touch><FL_Touch><FR_Touch>

/// Status byte: cliff detected.
pub const MASK_STATE_CLIFF: u8 = 1 << 6;
/// Status byte: left bumper pressed.
pub const MASK_STATE_LEFT_BUMPER: u8 = 1 << 5;
/// Status byte: right bumper pressed.
pub const MASK_STATE_RIGHT_BUMPER: u8 = 1 << 4;
/// Status byte: rear-left touch pad.
pub const MASK_STATE_REAR_LEFT_TOUCH: u8 = 1 << 3;
/// Status byte: rear-right touch pad.
pub const MASK_STATE_REAR_RIGHT_TOUCH: u8 = 1 << 2;
/// Status byte: front-left touch pad.
pub const MASK_STATE_FRONT_LEFT_TOUCH: u8 = 1 << 1;
/// Status byte: front-right touch pad.
pub const MASK_STATE_FRONT_RIGHT_TOUCH: u8 = 1;
