//! Ambient light ("eye") sensor events.

use rootbot_protocol::DEVICE_LIGHT_SENSORS;

use crate::devices::EventStream;
use crate::link::RobotLink;
use crate::transport::ByteChannel;

/// Handle for the ambient light sensors (device id 13). Event-only.
pub struct LightSensors<C: ByteChannel> {
    link: RobotLink<C>,
}

impl<C: ByteChannel> LightSensors<C> {
    pub(crate) fn new(link: RobotLink<C>) -> Self {
        LightSensors { link }
    }

    /// Subscribe to ambient light state changes.
    pub fn events(&self) -> EventStream {
        EventStream::new(self.link.subscribe(DEVICE_LIGHT_SENSORS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{push_event, ready_link};
    use rootbot_protocol::{LightState, TelemetryEvent, EVT_LIGHT_CHANGED};

    #[tokio::test]
    async fn test_light_event_stream_skips_bad_state_codes() {
        let (link, mock) = ready_link();
        let sensors = LightSensors::new(link);
        let mut events = sensors.events();

        // State code 3 is not a valid light state; the stream skips it.
        push_event(&mock, DEVICE_LIGHT_SENSORS, EVT_LIGHT_CHANGED, &[0, 0, 0, 1, 3]);
        push_event(&mock, DEVICE_LIGHT_SENSORS, EVT_LIGHT_CHANGED, &[0, 0, 0, 2, 4]);

        match events.next().await.unwrap() {
            TelemetryEvent::Light { timestamp_ms, state, .. } => {
                assert_eq!(timestamp_ms, 2);
                assert_eq!(state, LightState::BothBright);
            }
            other => panic!("expected Light, got {:?}", other),
        }
    }
}
