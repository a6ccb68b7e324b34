//! Connection lifecycle and device aggregate.

use std::fmt;
use std::time::Duration;

use log::{debug, info, warn};
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::devices::{
    Battery, Bumpers, CliffSensor, ColorSensor, General, LedLights, LightSensors, MarkerEraser,
    Motors, Sound, TouchSensors,
};
use crate::error::ClientError;
use crate::link::RobotLink;
use crate::transport::{ByteChannel, InfoItem};
use rootbot_protocol::{string_from_padded, RobotInfo, RobotState};

/// Where a connection is in its lifecycle.
///
/// Framed operations are accepted only in `Ready`. A failure during
/// establishment puts the connection back in `Disconnected`, from which
/// [`Connection::connect`] may be retried; `Disposed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No transport connection.
    Disconnected,
    /// Transport-level connect in progress.
    Connecting,
    /// Enumerating services and characteristics.
    DiscoveringServices,
    /// Turning on frame notifications.
    Subscribing,
    /// Reading the identity characteristics.
    ReadingInfo,
    /// Fully established; framed operations are accepted.
    Ready,
    /// Torn down for good.
    Disposed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::DiscoveringServices => "discovering services",
            ConnectionState::Subscribing => "subscribing",
            ConnectionState::ReadingInfo => "reading info",
            ConnectionState::Ready => "ready",
            ConnectionState::Disposed => "disposed",
        };
        f.write_str(name)
    }
}

/// Connection tunables.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// How long to wait for the matching response to a request before
    /// failing it. Applies to every awaited request on the connection.
    pub response_timeout: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        ConnectionConfig {
            response_timeout: Duration::from_secs(2),
        }
    }
}

/// One robot connection and its device handles.
///
/// Constructing a connection is cheap and does no I/O; the handles exist
/// immediately but every framed operation fails with
/// [`ClientError::NotConnected`] until [`connect`](Self::connect)
/// completes.
pub struct Connection<C: ByteChannel> {
    link: RobotLink<C>,
    general: General<C>,
    motors: Motors<C>,
    marker_eraser: MarkerEraser<C>,
    led_lights: LedLights<C>,
    color_sensor: ColorSensor<C>,
    sound: Sound<C>,
    bumpers: Bumpers<C>,
    light_sensors: LightSensors<C>,
    battery: Battery<C>,
    touch_sensors: TouchSensors<C>,
    cliff_sensor: CliffSensor<C>,
    robot_info: Mutex<Option<RobotInfo>>,
    rx_task: Mutex<Option<JoinHandle<()>>>,
}

impl<C: ByteChannel> Connection<C> {
    /// Wrap a byte channel. No I/O happens until [`connect`](Self::connect).
    pub fn new(channel: C, config: ConnectionConfig) -> Self {
        let link = RobotLink::new(channel, config.response_timeout);
        Connection {
            general: General::new(link.clone()),
            motors: Motors::new(link.clone()),
            marker_eraser: MarkerEraser::new(link.clone()),
            led_lights: LedLights::new(link.clone()),
            color_sensor: ColorSensor::new(link.clone()),
            sound: Sound::new(link.clone()),
            bumpers: Bumpers::new(link.clone()),
            light_sensors: LightSensors::new(link.clone()),
            battery: Battery::new(link.clone()),
            touch_sensors: TouchSensors::new(link.clone()),
            cliff_sensor: CliffSensor::new(link.clone()),
            link,
            robot_info: Mutex::new(None),
            rx_task: Mutex::new(None),
        }
    }

    /// Establish the connection end to end.
    ///
    /// Runs the transport connect, service discovery, frame subscription
    /// and identity reads in order, then enters `Ready`. On any failure
    /// the connection returns to `Disconnected` and the call fails with
    /// [`ClientError::ConnectionFailed`] naming the phase.
    pub async fn connect(&self) -> Result<RobotInfo, ClientError> {
        match self.state() {
            ConnectionState::Disconnected => {}
            ConnectionState::Disposed => return Err(ClientError::NotConnected),
            other => {
                debug!("connect called while {}", other);
                return Err(ClientError::NotConnected);
            }
        }

        self.link.set_state(ConnectionState::Connecting);
        if let Err(source) = self.link.channel().connect().await {
            self.link.set_state(ConnectionState::Disconnected);
            return Err(ClientError::ConnectionFailed { phase: "connect", source });
        }

        self.link.set_state(ConnectionState::DiscoveringServices);
        if let Err(source) = self.link.channel().discover_capabilities().await {
            self.link.set_state(ConnectionState::Disconnected);
            return Err(ClientError::ConnectionFailed { phase: "service discovery", source });
        }

        self.link.set_state(ConnectionState::Subscribing);
        let mut frames = match self.link.channel().subscribe_frames() {
            Ok(frames) => frames,
            Err(source) => {
                self.link.set_state(ConnectionState::Disconnected);
                return Err(ClientError::ConnectionFailed { phase: "subscribe", source });
            }
        };

        let rx_link = self.link.clone();
        let task = tokio::spawn(async move {
            while let Some(bytes) = frames.recv().await {
                rx_link.handle_inbound(&bytes);
            }
            debug!("inbound frame stream ended");
        });
        if let Some(old) = self.rx_task.lock().replace(task) {
            old.abort();
        }

        self.link.set_state(ConnectionState::ReadingInfo);
        let info = match self.read_robot_info().await {
            Ok(info) => info,
            Err(err) => {
                self.abort_rx_task();
                self.link.set_state(ConnectionState::Disconnected);
                return Err(err);
            }
        };

        info!(
            "connected to {} (firmware {}, battery {}%)",
            info.serial_number, info.firmware_version, info.state.battery_percent
        );
        *self.robot_info.lock() = Some(info.clone());
        self.link.set_state(ConnectionState::Ready);
        Ok(info)
    }

    /// Read the identity characteristics concurrently.
    async fn read_robot_info(&self) -> Result<RobotInfo, ClientError> {
        let channel = self.link.channel();
        let (serial, firmware, hardware, manufacturer, state) = tokio::try_join!(
            channel.read_info(InfoItem::SerialNumber),
            channel.read_info(InfoItem::FirmwareVersion),
            channel.read_info(InfoItem::HardwareVersion),
            channel.read_info(InfoItem::Manufacturer),
            channel.read_info(InfoItem::RobotState),
        )
        .map_err(|source| ClientError::ConnectionFailed { phase: "reading info", source })?;

        Ok(RobotInfo {
            serial_number: string_from_padded(&serial),
            firmware_version: string_from_padded(&firmware),
            hardware_version: string_from_padded(&hardware),
            manufacturer: string_from_padded(&manufacturer),
            state: RobotState::from_bytes(&state),
        })
    }

    /// Tear the connection down for good.
    ///
    /// Stops the inbound pump and rejects all further operations. Safe to
    /// call more than once. To ask the robot to drop the link from its
    /// side first, call [`General::disconnect`] before disposing.
    pub fn dispose(&self) {
        if self.state() == ConnectionState::Disposed {
            return;
        }
        self.abort_rx_task();
        self.link.set_state(ConnectionState::Disposed);
    }

    fn abort_rx_task(&self) {
        if let Some(task) = self.rx_task.lock().take() {
            task.abort();
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        self.link.state()
    }

    /// Identity read at connection time, if connected.
    pub fn robot_info(&self) -> Option<RobotInfo> {
        self.robot_info.lock().clone()
    }

    /// General robot control.
    pub fn general(&self) -> &General<C> {
        &self.general
    }

    /// Drive motors.
    pub fn motors(&self) -> &Motors<C> {
        &self.motors
    }

    /// Marker/eraser actuator.
    pub fn marker_eraser(&self) -> &MarkerEraser<C> {
        &self.marker_eraser
    }

    /// LED cross.
    pub fn led_lights(&self) -> &LedLights<C> {
        &self.led_lights
    }

    /// Color sensor array.
    pub fn color_sensor(&self) -> &ColorSensor<C> {
        &self.color_sensor
    }

    /// Buzzer and speech.
    pub fn sound(&self) -> &Sound<C> {
        &self.sound
    }

    /// Front bumpers.
    pub fn bumpers(&self) -> &Bumpers<C> {
        &self.bumpers
    }

    /// Ambient light sensors.
    pub fn light_sensors(&self) -> &LightSensors<C> {
        &self.light_sensors
    }

    /// Battery monitor.
    pub fn battery(&self) -> &Battery<C> {
        &self.battery
    }

    /// Top touch pads.
    pub fn touch_sensors(&self) -> &TouchSensors<C> {
        &self.touch_sensors
    }

    /// Cliff sensor.
    pub fn cliff_sensor(&self) -> &CliffSensor<C> {
        &self.cliff_sensor
    }
}

impl<C: ByteChannel> Drop for Connection<C> {
    fn drop(&mut self) {
        if self.state() != ConnectionState::Disposed {
            warn!("connection dropped without dispose; aborting inbound pump");
            self.abort_rx_task();
        }
    }
}
