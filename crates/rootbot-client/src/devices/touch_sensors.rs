//! Top touch pad events.

use rootbot_protocol::DEVICE_TOUCH_SENSORS;

use crate::devices::EventStream;
use crate::link::RobotLink;
use crate::transport::ByteChannel;

/// Handle for the top touch pads (device id 17). Event-only.
pub struct TouchSensors<C: ByteChannel> {
    link: RobotLink<C>,
}

impl<C: ByteChannel> TouchSensors<C> {
    pub(crate) fn new(link: RobotLink<C>) -> Self {
        TouchSensors { link }
    }

    /// Subscribe to touch pad press/release events.
    pub fn events(&self) -> EventStream {
        EventStream::new(self.link.subscribe(DEVICE_TOUCH_SENSORS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{push_event, ready_link};
    use rootbot_protocol::{TelemetryEvent, EVT_TOUCH_CHANGED};

    #[tokio::test]
    async fn test_touch_event_stream() {
        let (link, mock) = ready_link();
        let touch = TouchSensors::new(link);
        let mut events = touch.events();

        push_event(
            &mock,
            DEVICE_TOUCH_SENSORS,
            EVT_TOUCH_CHANGED,
            &[0, 0, 0, 3, 0b1001_0000],
        );

        match events.next().await.unwrap() {
            TelemetryEvent::TouchSensors {
                front_left, rear_left, front_right, rear_right, ..
            } => {
                assert!(front_left && rear_left);
                assert!(!front_right && !rear_right);
            }
            other => panic!("expected TouchSensors, got {:?}", other),
        }
    }
}
