//! Per-device handles over one robot link.
//!
//! Each handle is a thin view: it validates parameters, encodes them into
//! a [`Command`](rootbot_protocol::Command), and lets the link do the
//! framing, correlation and timeout work. Handles are cheap to clone and
//! stay valid for the lifetime of the connection they came from.

use log::{debug, warn};
use tokio::sync::mpsc;

use rootbot_protocol::{Frame, TelemetryEvent};

pub mod battery;
pub mod bumpers;
pub mod cliff_sensor;
pub mod color_sensor;
pub mod general;
pub mod led_lights;
pub mod light_sensors;
pub mod marker_eraser;
pub mod motors;
pub mod sound;
pub mod touch_sensors;

pub use battery::Battery;
pub use bumpers::Bumpers;
pub use cliff_sensor::CliffSensor;
pub use color_sensor::ColorSensor;
pub use general::General;
pub use led_lights::LedLights;
pub use light_sensors::LightSensors;
pub use marker_eraser::MarkerEraser;
pub use motors::Motors;
pub use sound::Sound;
pub use touch_sensors::TouchSensors;

/// A stream of decoded telemetry events from one device.
///
/// Wraps the raw frame subscription and decodes each frame as it arrives.
/// Frames with an unknown command code are skipped silently; frames that
/// fail to decode are logged and skipped. The stream ends (`None`) when
/// the connection is dropped.
pub struct EventStream {
    frames: mpsc::UnboundedReceiver<Frame>,
}

impl EventStream {
    pub(crate) fn new(frames: mpsc::UnboundedReceiver<Frame>) -> Self {
        EventStream { frames }
    }

    /// Await the next decodable event.
    pub async fn next(&mut self) -> Option<TelemetryEvent> {
        while let Some(frame) = self.frames.recv().await {
            match TelemetryEvent::decode(&frame) {
                Ok(Some(event)) => return Some(event),
                Ok(None) => {
                    debug!(
                        "ignoring frame with no event mapping: device {} command {}",
                        frame.device, frame.command
                    );
                }
                Err(err) => {
                    warn!(
                        "skipping undecodable event from device {}: {}",
                        frame.device, err
                    );
                }
            }
        }
        None
    }
}
