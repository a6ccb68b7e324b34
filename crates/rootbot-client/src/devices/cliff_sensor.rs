//! Cliff sensor events.

use rootbot_protocol::DEVICE_CLIFF_SENSOR;

use crate::devices::EventStream;
use crate::link::RobotLink;
use crate::transport::ByteChannel;

/// Handle for the front cliff sensor (device id 20). Event-only.
pub struct CliffSensor<C: ByteChannel> {
    link: RobotLink<C>,
}

impl<C: ByteChannel> CliffSensor<C> {
    pub(crate) fn new(link: RobotLink<C>) -> Self {
        CliffSensor { link }
    }

    /// Subscribe to cliff detected/cleared events.
    pub fn events(&self) -> EventStream {
        EventStream::new(self.link.subscribe(DEVICE_CLIFF_SENSOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{push_event, ready_link};
    use rootbot_protocol::{TelemetryEvent, EVT_CLIFF_CHANGED};

    #[tokio::test]
    async fn test_cliff_event_stream() {
        let (link, mock) = ready_link();
        let cliff = CliffSensor::new(link);
        let mut events = cliff.events();

        push_event(
            &mock,
            DEVICE_CLIFF_SENSOR,
            EVT_CLIFF_CHANGED,
            &[0, 0, 0, 8, 1, 0x01, 0x00, 0x00, 0x80],
        );

        assert_eq!(
            events.next().await.unwrap(),
            TelemetryEvent::CliffSensor {
                timestamp_ms: 8,
                detected: true,
                sensor_mv: 256,
                threshold_mv: 128,
            }
        );
    }
}
